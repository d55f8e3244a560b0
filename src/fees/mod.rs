pub mod va_funding;

use crate::decimal::Money;

pub use va_funding::{final_loan_amount, va_funding_fee, VaFundingFee};

/// amount borrowed before any financed fee: home value less down payment, floored at zero
pub fn base_loan_amount(home_value: Money, down_payment: Money) -> Money {
    (home_value - down_payment).max(Money::ZERO)
}
