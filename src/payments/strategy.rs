use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::decimal::Money;
use crate::errors::{MortgageError, Result};
use crate::types::{LumpSumFrequency, PaymentFrequency};

use super::amortization::{amortize, AmortizationResult};
use super::frequency::adjust_for_frequency;
use super::LoanParameters;

/// extra-payment inputs of an early-payoff strategy
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct StrategyInputs {
    /// extra paid every period of `frequency`
    pub additional_payment: Money,
    pub frequency: PaymentFrequency,
    pub lump_sum: Money,
    pub lump_sum_frequency: LumpSumFrequency,
}

impl StrategyInputs {
    pub fn new(
        additional_payment: Money,
        frequency: PaymentFrequency,
        lump_sum: Money,
        lump_sum_frequency: LumpSumFrequency,
    ) -> Self {
        Self {
            additional_payment,
            frequency,
            lump_sum,
            lump_sum_frequency,
        }
    }

    /// no extra payments at all
    pub fn none() -> Self {
        Self::default()
    }

    pub fn validate(&self) -> Result<()> {
        if self.additional_payment.is_negative() {
            return Err(MortgageError::InvalidPaymentAmount {
                field: "additional_payment".to_string(),
                amount: self.additional_payment,
            });
        }

        if self.lump_sum.is_negative() {
            return Err(MortgageError::InvalidPaymentAmount {
                field: "lump_sum".to_string(),
                amount: self.lump_sum,
            });
        }

        Ok(())
    }
}

/// strategy outcome relative to the no-extra-payment baseline
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EarlyPayoffStrategyResult {
    pub interest_savings: Money,
    /// level payment plus every extra contribution, per month
    pub new_periodic_payment: Money,
    pub term_reduction_periods: u32,
    pub adjusted_extra: Money,
    pub lump_sum_per_month: Money,
    pub baseline: AmortizationResult,
    pub with_strategy: AmortizationResult,
}

impl EarlyPayoffStrategyResult {
    /// total extra applied on top of the level payment each month
    pub fn monthly_extra(&self) -> Money {
        self.adjusted_extra + self.lump_sum_per_month
    }
}

/// spread a lump sum into an equivalent monthly contribution
pub fn lump_sum_per_month(lump_sum: Money, frequency: LumpSumFrequency, term_months: u32) -> Money {
    let divisor = match frequency {
        LumpSumFrequency::OneTime => term_months,
        LumpSumFrequency::Yearly => 12,
        LumpSumFrequency::Quarterly => 3,
    };

    if divisor == 0 {
        return lump_sum;
    }

    lump_sum / Decimal::from(divisor)
}

/// compare a loan with and without the extra payments in `inputs`
pub fn early_payoff_strategy(
    loan: &LoanParameters,
    inputs: &StrategyInputs,
) -> EarlyPayoffStrategyResult {
    let baseline = amortize(loan, Money::ZERO);

    let adjusted_extra = adjust_for_frequency(inputs.additional_payment, inputs.frequency);
    let lump_sum_monthly =
        lump_sum_per_month(inputs.lump_sum, inputs.lump_sum_frequency, loan.term_months);

    let with_strategy = amortize(loan, adjusted_extra + lump_sum_monthly);

    let result = EarlyPayoffStrategyResult {
        interest_savings: baseline.total_interest - with_strategy.total_interest,
        new_periodic_payment: with_strategy.periodic_payment + adjusted_extra + lump_sum_monthly,
        term_reduction_periods: baseline
            .actual_term_periods
            .saturating_sub(with_strategy.actual_term_periods),
        adjusted_extra,
        lump_sum_per_month: lump_sum_monthly,
        baseline,
        with_strategy,
    };

    debug!(
        interest_savings = %result.interest_savings,
        term_reduction = result.term_reduction_periods,
        "early payoff strategy evaluated"
    );

    result
}
