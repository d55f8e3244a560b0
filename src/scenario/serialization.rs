use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::types::{FundingFeeType, ScenarioId};

use super::ScenarioResult;

/// serializable, display-ready view of a scenario result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioView {
    pub scenario_id: ScenarioId,
    pub loan: LoanView,
    pub funding_fee: Option<FundingFeeView>,
    pub baseline: PayoffView,
    pub strategy: PayoffView,
    pub savings: SavingsView,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanView {
    pub principal: Money,
    pub annual_rate: Rate,
    pub term_months: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundingFeeView {
    pub fee_type: FundingFeeType,
    pub rate: Rate,
    pub fee_amount: Money,
    pub final_loan_amount: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayoffView {
    pub monthly_payment: Money,
    pub total_interest: Money,
    pub total_payment: Money,
    pub term_periods: u32,
    pub payoff_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsView {
    pub interest_savings: Money,
    pub term_reduction_periods: u32,
    pub monthly_extra: Money,
}

impl ScenarioView {
    /// amounts are rounded to cents
    pub fn from_result(result: &ScenarioResult) -> Self {
        let strategy = &result.strategy;

        ScenarioView {
            scenario_id: result.scenario_id,
            loan: LoanView {
                principal: result.loan.principal.to_cents(),
                annual_rate: result.loan.annual_rate,
                term_months: result.loan.term_months,
            },
            funding_fee: result.funding_fee.map(|fee| FundingFeeView {
                fee_type: fee.fee_type,
                rate: fee.rate,
                fee_amount: fee.fee_amount.to_cents(),
                final_loan_amount: fee.final_loan_amount.to_cents(),
            }),
            baseline: PayoffView {
                monthly_payment: strategy.baseline.periodic_payment.to_cents(),
                total_interest: strategy.baseline.total_interest.to_cents(),
                total_payment: strategy.baseline.total_payment.to_cents(),
                term_periods: strategy.baseline.actual_term_periods,
                payoff_date: result.baseline_payoff_date,
            },
            strategy: PayoffView {
                monthly_payment: strategy.new_periodic_payment.to_cents(),
                total_interest: strategy.with_strategy.total_interest.to_cents(),
                total_payment: strategy.with_strategy.total_payment.to_cents(),
                term_periods: strategy.with_strategy.actual_term_periods,
                payoff_date: result.strategy_payoff_date,
            },
            savings: SavingsView {
                interest_savings: strategy.interest_savings.to_cents(),
                term_reduction_periods: strategy.term_reduction_periods,
                monthly_extra: strategy.monthly_extra().to_cents(),
            },
        }
    }

    /// convert to pretty-printed json string
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
