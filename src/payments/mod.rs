pub mod amortization;
pub mod frequency;
pub mod schedule;
pub mod strategy;

use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::errors::{MortgageError, Result};

pub use amortization::{
    amortize, calculate_level_payment, AmortizationCalculator, AmortizationResult,
    AmortizationSchedule, ScheduledPayment,
};
pub use frequency::{adjust_for_frequency, annualize, to_monthly};
pub use schedule::{generate_schedule, PaymentDateSchedule};
pub use strategy::{
    early_payoff_strategy, lump_sum_per_month, EarlyPayoffStrategyResult, StrategyInputs,
};

/// loan inputs for one calculation pass
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanParameters {
    pub principal: Money,
    pub annual_rate: Rate,
    pub term_months: u32,
}

impl LoanParameters {
    /// validated constructor
    pub fn new(principal: Money, annual_rate: Rate, term_months: u32) -> Result<Self> {
        let params = Self {
            principal,
            annual_rate,
            term_months,
        };
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> Result<()> {
        if self.principal.is_negative() {
            return Err(MortgageError::InvalidPrincipal {
                amount: self.principal,
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

        Ok(())
    }

    /// convenience for hosts holding plain floats
    pub fn from_f64(principal: f64, annual_rate: f64, term_months: u32) -> Result<Self> {
        Self::new(
            Money::try_from_f64(principal)?,
            Rate::try_from_f64(annual_rate)?,
            term_months,
        )
    }
}
