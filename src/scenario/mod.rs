pub mod builder;
pub mod serialization;

use chrono::{DateTime, NaiveDate, Utc};
use hourglass_rs::SafeTimeProvider;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::config::ScenarioConfig;
use crate::decimal::{Money, Rate};
use crate::errors::Result;
use crate::events::{Event, EventStore};
use crate::fees::VaFundingFee;
use crate::payments::{
    early_payoff_strategy, generate_schedule, AmortizationResult, EarlyPayoffStrategyResult,
    LoanParameters, PaymentDateSchedule, StrategyInputs,
};
use crate::types::{LoanProgram, PaymentFrequency, ScenarioId};

pub use builder::ScenarioBuilder;
pub use serialization::ScenarioView;

/// calculator state for one borrower scenario
///
/// Only inputs are stored. The funding fee, loan amount and every result are
/// derived on demand, so a changed home value or down payment can never leave
/// a stale fee behind.
#[derive(Debug)]
pub struct MortgageScenario {
    pub id: ScenarioId,
    config: ScenarioConfig,
    pub events: EventStore,
}

/// everything the calculator screen renders for one input tuple
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub scenario_id: ScenarioId,
    pub loan: LoanParameters,
    pub funding_fee: Option<VaFundingFee>,
    pub strategy: EarlyPayoffStrategyResult,
    pub baseline_payoff_date: Option<NaiveDate>,
    pub strategy_payoff_date: Option<NaiveDate>,
    pub calculated_at: DateTime<Utc>,
}

impl ScenarioResult {
    pub fn baseline(&self) -> &AmortizationResult {
        &self.strategy.baseline
    }

    pub fn with_strategy(&self) -> &AmortizationResult {
        &self.strategy.with_strategy
    }
}

impl MortgageScenario {
    pub fn new(config: ScenarioConfig, time_provider: &SafeTimeProvider) -> Result<Self> {
        config.validate()?;

        let mut scenario = Self {
            id: Uuid::new_v4(),
            config,
            events: EventStore::new(),
        };

        scenario.events.emit(Event::ScenarioCreated {
            scenario_id: scenario.id,
            base_loan_amount: scenario.base_loan_amount(),
            timestamp: time_provider.now(),
        });
        scenario.emit_funding_fee(time_provider);

        Ok(scenario)
    }

    pub fn builder() -> ScenarioBuilder {
        ScenarioBuilder::new()
    }

    pub fn config(&self) -> &ScenarioConfig {
        &self.config
    }

    pub fn base_loan_amount(&self) -> Money {
        self.config.base_loan_amount()
    }

    /// fee for the current base loan amount, `None` for conventional loans
    pub fn funding_fee(&self) -> Option<VaFundingFee> {
        self.config
            .program
            .funding_fee_type()
            .map(|fee_type| VaFundingFee::calculate(self.base_loan_amount(), fee_type))
    }

    /// amount actually amortized: fee-inclusive for VA loans
    pub fn financed_amount(&self) -> Money {
        self.funding_fee()
            .map(|fee| fee.final_loan_amount)
            .unwrap_or_else(|| self.base_loan_amount())
    }

    pub fn loan_parameters(&self) -> Result<LoanParameters> {
        LoanParameters::new(
            self.financed_amount(),
            self.config.annual_rate,
            self.config.term_months,
        )
    }

    pub fn set_home_value(&mut self, home_value: Money, time_provider: &SafeTimeProvider) -> Result<()> {
        self.update(|config| config.home_value = home_value, time_provider)
    }

    pub fn set_down_payment(&mut self, down_payment: Money, time_provider: &SafeTimeProvider) -> Result<()> {
        self.update(|config| config.down_payment = down_payment, time_provider)
    }

    pub fn set_program(&mut self, program: LoanProgram, time_provider: &SafeTimeProvider) -> Result<()> {
        self.update(|config| config.program = program, time_provider)
    }

    pub fn set_interest_rate(&mut self, annual_rate: Rate, time_provider: &SafeTimeProvider) -> Result<()> {
        self.update(|config| config.annual_rate = annual_rate, time_provider)
    }

    pub fn set_term_months(&mut self, term_months: u32, time_provider: &SafeTimeProvider) -> Result<()> {
        self.update(|config| config.term_months = term_months, time_provider)
    }

    pub fn set_strategy(&mut self, strategy: StrategyInputs, time_provider: &SafeTimeProvider) -> Result<()> {
        self.update(|config| config.strategy = strategy, time_provider)
    }

    pub fn set_first_payment_date(&mut self, date: Option<NaiveDate>) {
        self.config.first_payment_date = date;
    }

    /// recompute baseline and strategy from the current inputs
    pub fn recalculate(&mut self, time_provider: &SafeTimeProvider) -> Result<ScenarioResult> {
        let now = time_provider.now();
        let loan = self.loan_parameters()?;
        let strategy = early_payoff_strategy(&loan, &self.config.strategy);

        for run in [&strategy.baseline, &strategy.with_strategy] {
            if run.guard_reached {
                self.events.emit(Event::IterationGuardReached {
                    scenario_id: self.id,
                    periods: run.actual_term_periods,
                    remaining_balance: run.remaining_balance,
                    timestamp: now,
                });
            }
        }

        let (baseline_payoff_date, strategy_payoff_date) = match self.config.first_payment_date {
            Some(first) => (
                payoff_date(first, &strategy.baseline)?,
                payoff_date(first, &strategy.with_strategy)?,
            ),
            None => (None, None),
        };

        self.events.emit(Event::ScenarioRecalculated {
            scenario_id: self.id,
            principal: loan.principal,
            baseline_interest: strategy.baseline.total_interest,
            strategy_interest: strategy.with_strategy.total_interest,
            interest_savings: strategy.interest_savings,
            term_reduction_periods: strategy.term_reduction_periods,
            timestamp: now,
        });

        debug!(
            scenario_id = %self.id,
            principal = %loan.principal,
            savings = %strategy.interest_savings,
            "scenario recalculated"
        );

        Ok(ScenarioResult {
            scenario_id: self.id,
            loan,
            funding_fee: self.funding_fee(),
            strategy,
            baseline_payoff_date,
            strategy_payoff_date,
            calculated_at: now,
        })
    }

    /// payment dates for the scenario, starting at the configured first
    /// payment date or one period after today
    pub fn payment_dates(
        &mut self,
        frequency: PaymentFrequency,
        count: usize,
        time_provider: &SafeTimeProvider,
    ) -> Result<PaymentDateSchedule> {
        let schedule = match self.config.first_payment_date {
            Some(first) => PaymentDateSchedule::generate(first, frequency, count)?,
            None => PaymentDateSchedule::starting_next_period(frequency, count, time_provider)?,
        };

        self.events.emit(Event::ScheduleGenerated {
            scenario_id: self.id,
            frequency,
            first_payment_date: schedule.first_payment_date,
            payment_count: schedule.len(),
            timestamp: time_provider.now(),
        });

        Ok(schedule)
    }

    fn update<F>(&mut self, apply: F, time_provider: &SafeTimeProvider) -> Result<()>
    where
        F: FnOnce(&mut ScenarioConfig),
    {
        let mut next = self.config.clone();
        apply(&mut next);
        next.validate()?;

        let old_amount = self.base_loan_amount();
        let old_program = self.config.program;
        self.config = next;

        let new_amount = self.base_loan_amount();
        if new_amount != old_amount {
            self.events.emit(Event::LoanAmountChanged {
                scenario_id: self.id,
                old_amount,
                new_amount,
                timestamp: time_provider.now(),
            });
        }

        if new_amount != old_amount || self.config.program != old_program {
            self.emit_funding_fee(time_provider);
        }

        Ok(())
    }

    fn emit_funding_fee(&mut self, time_provider: &SafeTimeProvider) {
        if let Some(fee) = self.funding_fee() {
            self.events.emit(Event::FundingFeeRecalculated {
                scenario_id: self.id,
                fee_type: fee.fee_type,
                base_loan_amount: fee.base_loan_amount,
                fee_amount: fee.fee_amount,
                final_loan_amount: fee.final_loan_amount,
                timestamp: time_provider.now(),
            });
        }
    }
}

fn payoff_date(first: NaiveDate, run: &AmortizationResult) -> Result<Option<NaiveDate>> {
    let dates = generate_schedule(first, PaymentFrequency::Monthly, run.actual_term_periods as usize)?;
    Ok(dates.last().copied())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FundingFeeType, LumpSumFrequency};
    use chrono::TimeZone;
    use hourglass_rs::TimeSource;

    fn test_time() -> SafeTimeProvider {
        SafeTimeProvider::new(TimeSource::Test(
            Utc.with_ymd_and_hms(2025, 1, 15, 9, 0, 0).unwrap(),
        ))
    }

    fn va_scenario(time: &SafeTimeProvider) -> MortgageScenario {
        MortgageScenario::new(
            ScenarioConfig::va_purchase(
                Money::from_major(450_000),
                Money::from_major(50_000),
                Rate::from_percentage(6),
                FundingFeeType::FirstTime,
            ),
            time,
        )
        .unwrap()
    }

    fn latest_fee_event(scenario: &MortgageScenario) -> Option<(Money, Money)> {
        scenario.events.events().iter().rev().find_map(|event| match event {
            Event::FundingFeeRecalculated {
                fee_amount,
                final_loan_amount,
                ..
            } => Some((*fee_amount, *final_loan_amount)),
            _ => None,
        })
    }

    #[test]
    fn test_va_scenario_finances_fee() {
        let time = test_time();
        let scenario = va_scenario(&time);

        assert_eq!(scenario.base_loan_amount(), Money::from_major(400_000));
        let fee = scenario.funding_fee().unwrap();
        assert_eq!(fee.fee_amount, Money::from_major(8_600));
        assert_eq!(scenario.financed_amount(), Money::from_major(408_600));
        assert_eq!(scenario.loan_parameters().unwrap().principal, Money::from_major(408_600));
        assert_eq!(
            latest_fee_event(&scenario),
            Some((Money::from_major(8_600), Money::from_major(408_600)))
        );
    }

    #[test]
    fn test_fee_follows_home_value_and_down_payment() {
        let time = test_time();
        let mut scenario = va_scenario(&time);

        scenario.set_home_value(Money::from_major(500_000), &time).unwrap();
        assert_eq!(scenario.funding_fee().unwrap().fee_amount, Money::from_major(9_675));
        assert_eq!(
            latest_fee_event(&scenario),
            Some((Money::from_major(9_675), Money::from_major(459_675)))
        );

        scenario.set_down_payment(Money::from_major(100_000), &time).unwrap();
        assert_eq!(scenario.funding_fee().unwrap().fee_amount, Money::from_major(8_600));
        assert_eq!(scenario.financed_amount(), Money::from_major(408_600));

        scenario.set_down_payment(Money::from_major(500_000), &time).unwrap();
        let fee = scenario.funding_fee().unwrap();
        assert_eq!(fee.fee_amount, Money::ZERO);
        assert_eq!(fee.final_loan_amount, Money::ZERO);
    }

    #[test]
    fn test_loan_amount_change_events() {
        let time = test_time();
        let mut scenario = va_scenario(&time);
        scenario.events.clear();

        scenario.set_interest_rate(Rate::from_percentage(7), &time).unwrap();
        assert!(scenario.events.is_empty());

        scenario.set_down_payment(Money::from_major(80_000), &time).unwrap();
        assert!(matches!(
            scenario.events.events()[0],
            Event::LoanAmountChanged { new_amount, .. } if new_amount == Money::from_major(370_000)
        ));
        assert!(matches!(scenario.events.events()[1], Event::FundingFeeRecalculated { .. }));
    }

    #[test]
    fn test_program_switch_recomputes_fee() {
        let time = test_time();
        let mut scenario = va_scenario(&time);

        scenario
            .set_program(LoanProgram::Va { fee_type: FundingFeeType::Exempt }, &time)
            .unwrap();
        assert_eq!(scenario.financed_amount(), Money::from_major(400_000));
        assert_eq!(latest_fee_event(&scenario), Some((Money::ZERO, Money::from_major(400_000))));

        scenario.set_program(LoanProgram::Conventional, &time).unwrap();
        assert!(scenario.funding_fee().is_none());
        assert_eq!(scenario.financed_amount(), Money::from_major(400_000));
    }

    #[test]
    fn test_invalid_update_leaves_state_untouched() {
        let time = test_time();
        let mut scenario = va_scenario(&time);
        let before = scenario.config().clone();
        let event_count = scenario.events.len();

        assert!(scenario.set_term_months(0, &time).is_err());
        assert!(scenario.set_home_value(Money::from_major(-1), &time).is_err());

        assert_eq!(scenario.config(), &before);
        assert_eq!(scenario.events.len(), event_count);
    }

    #[test]
    fn test_recalculate_with_strategy() {
        let time = test_time();
        let mut scenario = MortgageScenario::new(
            ScenarioConfig::conventional_30_year(
                Money::from_major(375_000),
                Money::from_major(75_000),
                Rate::from_percentage(6),
            ),
            &time,
        )
        .unwrap();

        let baseline_only = scenario.recalculate(&time).unwrap();
        assert_eq!(baseline_only.strategy.interest_savings, Money::ZERO);
        assert_eq!(baseline_only.baseline().actual_term_periods, 360);

        scenario
            .set_strategy(
                StrategyInputs::new(
                    Money::from_major(200),
                    PaymentFrequency::Monthly,
                    Money::from_major(10_000),
                    LumpSumFrequency::OneTime,
                ),
                &time,
            )
            .unwrap();

        let result = scenario.recalculate(&time).unwrap();
        assert!(result.strategy.interest_savings.is_positive());
        assert!(result.with_strategy().actual_term_periods < 360);
        assert_eq!(result.calculated_at, time.now());
        assert!(result.funding_fee.is_none());
        assert!(matches!(
            scenario.events.events().last(),
            Some(Event::ScenarioRecalculated { .. })
        ));
    }

    #[test]
    fn test_payoff_dates() {
        let time = test_time();
        let mut scenario = va_scenario(&time);
        scenario.set_first_payment_date(NaiveDate::from_ymd_opt(2025, 3, 1));
        scenario
            .set_strategy(
                StrategyInputs::new(Money::from_major(500), PaymentFrequency::Monthly, Money::ZERO, LumpSumFrequency::OneTime),
                &time,
            )
            .unwrap();

        let result = scenario.recalculate(&time).unwrap();

        assert_eq!(result.baseline_payoff_date, NaiveDate::from_ymd_opt(2055, 2, 1));
        let strategy_payoff = result.strategy_payoff_date.unwrap();
        assert!(strategy_payoff < result.baseline_payoff_date.unwrap());
    }

    #[test]
    fn test_payment_dates_default_to_next_period() {
        let time = test_time();
        let mut scenario = va_scenario(&time);

        let schedule = scenario.payment_dates(PaymentFrequency::Weekly, 4, &time).unwrap();
        assert_eq!(schedule.first_payment_date, NaiveDate::from_ymd_opt(2025, 1, 22).unwrap());
        assert_eq!(schedule.len(), 4);
        assert!(matches!(
            scenario.events.events().last(),
            Some(Event::ScheduleGenerated { payment_count: 4, .. })
        ));

        scenario.set_first_payment_date(NaiveDate::from_ymd_opt(2025, 2, 1));
        let schedule = scenario.payment_dates(PaymentFrequency::Monthly, 2, &time).unwrap();
        assert_eq!(schedule.dates[1], NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());
    }

    #[test]
    fn test_zero_loan_amount_recalculates() {
        let time = test_time();
        let mut scenario = va_scenario(&time);
        scenario.set_down_payment(Money::from_major(450_000), &time).unwrap();

        let result = scenario.recalculate(&time).unwrap();
        assert_eq!(result.loan.principal, Money::ZERO);
        assert_eq!(result.baseline().total_interest, Money::ZERO);
        assert_eq!(result.baseline_payoff_date, None);
    }
}
