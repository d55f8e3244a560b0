use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::errors::{MortgageError, Result};
use crate::fees::base_loan_amount;
use crate::payments::StrategyInputs;
use crate::types::{FundingFeeType, LoanProgram};

/// full set of calculator inputs for one scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioConfig {
    pub home_value: Money,
    pub down_payment: Money,
    pub annual_rate: Rate,
    pub term_months: u32,
    pub program: LoanProgram,
    #[serde(default)]
    pub strategy: StrategyInputs,
    #[serde(default)]
    pub first_payment_date: Option<NaiveDate>,
}

impl ScenarioConfig {
    /// 30-year fixed conventional purchase
    pub fn conventional_30_year(home_value: Money, down_payment: Money, annual_rate: Rate) -> Self {
        Self {
            home_value,
            down_payment,
            annual_rate,
            term_months: 360,
            program: LoanProgram::Conventional,
            strategy: StrategyInputs::none(),
            first_payment_date: None,
        }
    }

    /// 15-year fixed conventional purchase
    pub fn conventional_15_year(home_value: Money, down_payment: Money, annual_rate: Rate) -> Self {
        Self {
            term_months: 180,
            ..Self::conventional_30_year(home_value, down_payment, annual_rate)
        }
    }

    /// 30-year VA purchase with the funding fee financed into the loan
    pub fn va_purchase(
        home_value: Money,
        down_payment: Money,
        annual_rate: Rate,
        fee_type: FundingFeeType,
    ) -> Self {
        Self {
            program: LoanProgram::Va { fee_type },
            ..Self::conventional_30_year(home_value, down_payment, annual_rate)
        }
    }

    pub fn base_loan_amount(&self) -> Money {
        base_loan_amount(self.home_value, self.down_payment)
    }

    pub fn validate(&self) -> Result<()> {
        if self.home_value.is_negative() {
            return Err(MortgageError::InvalidConfiguration {
                message: format!("home value cannot be negative: {}", self.home_value),
            });
        }

        if self.down_payment.is_negative() {
            return Err(MortgageError::InvalidConfiguration {
                message: format!("down payment cannot be negative: {}", self.down_payment),
            });
        }

        if self.annual_rate.is_negative() {
            return Err(MortgageError::InvalidInterestRate {
                rate: self.annual_rate,
            });
        }

        if self.term_months == 0 {
            return Err(MortgageError::InvalidTerm {
                months: self.term_months,
            });
        }

        self.strategy.validate()
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use crate::types::{LumpSumFrequency, PaymentFrequency};

    #[test]
    fn test_presets() {
        let conventional = ScenarioConfig::conventional_30_year(
            Money::from_major(500_000),
            Money::from_major(100_000),
            Rate::from_decimal(dec!(0.065)),
        );
        assert_eq!(conventional.term_months, 360);
        assert_eq!(conventional.base_loan_amount(), Money::from_major(400_000));
        assert!(conventional.validate().is_ok());

        let fifteen = ScenarioConfig::conventional_15_year(
            Money::from_major(500_000),
            Money::from_major(100_000),
            Rate::from_decimal(dec!(0.055)),
        );
        assert_eq!(fifteen.term_months, 180);

        let va = ScenarioConfig::va_purchase(
            Money::from_major(400_000),
            Money::ZERO,
            Rate::from_percentage(6),
            FundingFeeType::Subsequent,
        );
        assert_eq!(va.program.funding_fee_type(), Some(FundingFeeType::Subsequent));
    }

    #[test]
    fn test_validation_errors() {
        let mut config = ScenarioConfig::conventional_30_year(
            Money::from_major(300_000),
            Money::from_major(60_000),
            Rate::from_percentage(6),
        );

        config.term_months = 0;
        assert!(matches!(config.validate(), Err(MortgageError::InvalidTerm { .. })));

        config.term_months = 360;
        config.annual_rate = Rate::ZERO;
        assert!(config.validate().is_ok());

        config.annual_rate = Rate::from_decimal(dec!(-0.01));
        assert!(matches!(config.validate(), Err(MortgageError::InvalidInterestRate { .. })));

        config.annual_rate = Rate::from_percentage(6);
        config.down_payment = Money::from_major(-5);
        assert!(matches!(config.validate(), Err(MortgageError::InvalidConfiguration { .. })));

        config.down_payment = Money::ZERO;
        config.strategy.lump_sum = Money::from_major(-1);
        assert!(matches!(config.validate(), Err(MortgageError::InvalidPaymentAmount { .. })));
    }

    #[test]
    fn test_json_persistence() {
        let mut config = ScenarioConfig::va_purchase(
            Money::from_major(350_000),
            Money::from_major(10_000),
            Rate::from_decimal(dec!(0.0575)),
            FundingFeeType::FirstTime,
        );
        config.strategy = StrategyInputs::new(
            Money::from_major(100),
            PaymentFrequency::BiWeekly,
            Money::from_major(5_000),
            LumpSumFrequency::Yearly,
        );
        config.first_payment_date = NaiveDate::from_ymd_opt(2025, 2, 1);

        let json = config.to_json().unwrap();
        assert_eq!(ScenarioConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_json_defaults_and_errors() {
        let json = r#"{
            "home_value": "300000",
            "down_payment": "60000",
            "annual_rate": "0.06",
            "term_months": 360,
            "program": "Conventional"
        }"#;
        let config = ScenarioConfig::from_json(json).unwrap();
        assert_eq!(config.strategy, StrategyInputs::none());
        assert_eq!(config.first_payment_date, None);

        assert!(matches!(
            ScenarioConfig::from_json("{ not json"),
            Err(MortgageError::Serialization { .. })
        ));
    }
}
