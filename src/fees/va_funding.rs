use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::types::FundingFeeType;

/// VA funding fee derived from a base loan amount
///
/// Holds no state beyond its inputs: callers rebuild it with
/// [`VaFundingFee::calculate`] whenever the base loan amount changes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VaFundingFee {
    pub fee_type: FundingFeeType,
    pub rate: Rate,
    pub base_loan_amount: Money,
    pub fee_amount: Money,
    pub final_loan_amount: Money,
}

impl VaFundingFee {
    pub fn calculate(base_loan_amount: Money, fee_type: FundingFeeType) -> Self {
        let fee_amount = va_funding_fee(base_loan_amount, fee_type);

        Self {
            fee_type,
            rate: fee_type.rate(),
            base_loan_amount,
            fee_amount,
            final_loan_amount: final_loan_amount(base_loan_amount, fee_amount),
        }
    }

    pub fn is_waived(&self) -> bool {
        self.fee_amount.is_zero()
    }
}

/// fee = base loan amount x category rate
pub fn va_funding_fee(base_loan_amount: Money, fee_type: FundingFeeType) -> Money {
    base_loan_amount.apply_rate(fee_type.rate())
}

/// base loan amount with the fee financed in
pub fn final_loan_amount(base_loan_amount: Money, fee_amount: Money) -> Money {
    base_loan_amount + fee_amount
}
