/// reactive VA scenario - the funding fee follows every loan amount change
use mortgage_strategy_rs::chrono::NaiveDate;
use mortgage_strategy_rs::{
    FundingFeeType, MortgageScenario, Money, PaymentFrequency, Rate, SafeTimeProvider,
    ScenarioView, TimeSource,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let time = SafeTimeProvider::new(TimeSource::System);

    let mut scenario = MortgageScenario::builder()
        .home_value(Money::from_major(400_000))
        .rate(Rate::from_percentage(6))
        .va(FundingFeeType::FirstTime)
        .additional_payment(Money::from_major(100), PaymentFrequency::Monthly)
        .first_payment_date(NaiveDate::from_ymd_opt(2025, 7, 1).ok_or("bad date")?)
        .build_with_time(&time)?;

    let result = scenario.recalculate(&time)?;
    println!("{}", ScenarioView::from_result(&result).to_json_pretty()?);

    // a larger down payment shrinks the fee on the next recalculation
    scenario.set_down_payment(Money::from_major(40_000), &time)?;
    let result = scenario.recalculate(&time)?;
    println!("{}", ScenarioView::from_result(&result).to_json_pretty()?);

    for event in scenario.events.take_events() {
        println!("{:?}", event);
    }

    Ok(())
}
