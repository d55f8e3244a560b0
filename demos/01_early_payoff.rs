/// compare bi-weekly extra payments plus a yearly lump sum against the baseline
use mortgage_strategy_rs::{
    early_payoff_strategy, LoanParameters, LumpSumFrequency, Money, PaymentFrequency, Rate,
    StrategyInputs,
};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let loan = LoanParameters::new(Money::from_major(425_000), Rate::from_decimal(dec!(0.0675)), 360)?;

    let inputs = StrategyInputs::new(
        Money::from_major(150),
        PaymentFrequency::BiWeekly,
        Money::from_major(5_000),
        LumpSumFrequency::Yearly,
    );
    inputs.validate()?;

    let result = early_payoff_strategy(&loan, &inputs);

    println!("baseline payment:  {}", result.baseline.periodic_payment.to_cents());
    println!("new payment:       {}", result.new_periodic_payment.to_cents());
    println!("interest saved:    {}", result.interest_savings.to_cents());
    println!("months saved:      {}", result.term_reduction_periods);

    Ok(())
}
