/// quick start - amortize a 30-year loan
use mortgage_strategy_rs::{amortize, LoanParameters, Money, Rate};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // $300,000 at 6% for 30 years
    let loan = LoanParameters::new(Money::from_major(300_000), Rate::from_percentage(6), 360)?;

    let baseline = amortize(&loan, Money::ZERO);
    let with_extra = amortize(&loan, Money::from_major(200));

    println!("monthly payment: {}", baseline.periodic_payment.to_cents());
    println!("total interest:  {}", baseline.total_interest.to_cents());
    println!(
        "with $200/month extra: {} months, {} interest",
        with_extra.actual_term_periods,
        with_extra.total_interest.to_cents()
    );

    Ok(())
}
