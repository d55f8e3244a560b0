use chrono::NaiveDate;
use hourglass_rs::{SafeTimeProvider, TimeSource};

use crate::config::ScenarioConfig;
use crate::decimal::{Money, Rate};
use crate::errors::{MortgageError, Result};
use crate::payments::StrategyInputs;
use crate::types::{FundingFeeType, LoanProgram, LumpSumFrequency, PaymentFrequency};

use super::MortgageScenario;

/// builder for mortgage scenarios
#[derive(Debug, Default)]
pub struct ScenarioBuilder {
    home_value: Option<Money>,
    down_payment: Option<Money>,
    rate: Option<Rate>,
    term_months: Option<u32>,
    program: Option<LoanProgram>,
    strategy: StrategyInputs,
    first_payment_date: Option<NaiveDate>,
}

impl ScenarioBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn home_value(mut self, value: Money) -> Self {
        self.home_value = Some(value);
        self
    }

    pub fn down_payment(mut self, amount: Money) -> Self {
        self.down_payment = Some(amount);
        self
    }

    pub fn rate(mut self, rate: Rate) -> Self {
        self.rate = Some(rate);
        self
    }

    pub fn term_months(mut self, months: u32) -> Self {
        self.term_months = Some(months);
        self
    }

    /// price as a VA loan with the given funding fee category
    pub fn va(mut self, fee_type: FundingFeeType) -> Self {
        self.program = Some(LoanProgram::Va { fee_type });
        self
    }

    pub fn additional_payment(mut self, amount: Money, frequency: PaymentFrequency) -> Self {
        self.strategy.additional_payment = amount;
        self.strategy.frequency = frequency;
        self
    }

    pub fn lump_sum(mut self, amount: Money, frequency: LumpSumFrequency) -> Self {
        self.strategy.lump_sum = amount;
        self.strategy.lump_sum_frequency = frequency;
        self
    }

    pub fn first_payment_date(mut self, date: NaiveDate) -> Self {
        self.first_payment_date = Some(date);
        self
    }

    /// build the config without creating a scenario
    pub fn config(&self) -> Result<ScenarioConfig> {
        let home_value = self.home_value.ok_or(MortgageError::InvalidConfiguration {
            message: "Home value required".to_string(),
        })?;

        let rate = self.rate.ok_or(MortgageError::InvalidConfiguration {
            message: "Rate required".to_string(),
        })?;

        let config = ScenarioConfig {
            home_value,
            down_payment: self.down_payment.unwrap_or(Money::ZERO),
            annual_rate: rate,
            term_months: self.term_months.unwrap_or(360),
            program: self.program.unwrap_or(LoanProgram::Conventional),
            strategy: self.strategy,
            first_payment_date: self.first_payment_date,
        };
        config.validate()?;

        Ok(config)
    }

    /// build with system time
    pub fn build(self) -> Result<MortgageScenario> {
        let time = SafeTimeProvider::new(TimeSource::System);
        self.build_with_time(&time)
    }

    pub fn build_with_time(self, time_provider: &SafeTimeProvider) -> Result<MortgageScenario> {
        MortgageScenario::new(self.config()?, time_provider)
    }
}
