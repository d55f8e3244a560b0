use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::decimal::{Money, Rate};
use crate::errors::Result;
use crate::types::PaymentFrequency;

use super::schedule::generate_schedule;
use super::LoanParameters;

/// summary of one amortization run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AmortizationResult {
    /// level payment before any extra contribution
    pub periodic_payment: Money,
    pub total_interest: Money,
    /// interest plus principal actually paid
    pub total_payment: Money,
    pub actual_term_periods: u32,
    /// balance left when the loop stopped, zero for a fully paid loan
    pub remaining_balance: Money,
    /// the `2 x term` iteration cap ended the loop
    pub guard_reached: bool,
}

impl AmortizationResult {
    pub fn is_paid_off(&self) -> bool {
        self.remaining_balance.is_zero()
    }
}

/// one period of an amortization table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledPayment {
    pub payment_number: u32,
    pub payment_date: Option<NaiveDate>,
    pub beginning_balance: Money,
    pub payment_amount: Money,
    pub principal_portion: Money,
    pub interest_portion: Money,
    pub ending_balance: Money,
    pub cumulative_interest: Money,
    pub cumulative_principal: Money,
}

/// amortization table plus its summary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmortizationSchedule {
    pub loan: LoanParameters,
    pub extra_payment: Money,
    pub payments: Vec<ScheduledPayment>,
    pub summary: AmortizationResult,
}

impl AmortizationSchedule {
    /// get payment for a 1-based payment number
    pub fn get_payment(&self, payment_number: u32) -> Option<&ScheduledPayment> {
        let index = payment_number.checked_sub(1)?;
        self.payments.get(index as usize)
    }

    /// remaining balance after the given payment
    pub fn balance_after_payment(&self, payment_number: u32) -> Money {
        self.get_payment(payment_number)
            .map(|p| p.ending_balance)
            .unwrap_or(self.loan.principal)
    }

    /// date of the final payment, when the table is dated
    pub fn payoff_date(&self) -> Option<NaiveDate> {
        self.payments.last().and_then(|p| p.payment_date)
    }
}

/// month-by-month amortization with an optional constant extra payment
#[derive(Debug, Clone)]
pub struct AmortizationCalculator {
    loan: LoanParameters,
    extra_payment: Money,
}

impl AmortizationCalculator {
    pub fn new(loan: LoanParameters) -> Self {
        Self {
            loan,
            extra_payment: Money::ZERO,
        }
    }

    /// constant amount added to every monthly payment
    pub fn with_extra_payment(mut self, extra_payment: Money) -> Self {
        self.extra_payment = extra_payment;
        self
    }

    pub fn level_payment(&self) -> Money {
        calculate_level_payment(self.loan.principal, self.loan.annual_rate, self.loan.term_months)
    }

    /// run the loop and return only the totals
    pub fn summarize(&self) -> AmortizationResult {
        self.run(|_| {})
    }

    /// run the loop and keep every period, dated monthly from `first_payment_date`
    pub fn schedule(&self, first_payment_date: Option<NaiveDate>) -> Result<AmortizationSchedule> {
        let mut payments = Vec::new();
        let summary = self.run(|payment| payments.push(payment));

        if let Some(first) = first_payment_date {
            let dates = generate_schedule(first, PaymentFrequency::Monthly, payments.len())?;
            for (payment, date) in payments.iter_mut().zip(dates) {
                payment.payment_date = Some(date);
            }
        }

        Ok(AmortizationSchedule {
            loan: self.loan,
            extra_payment: self.extra_payment,
            payments,
            summary,
        })
    }

    fn run<F>(&self, mut visit: F) -> AmortizationResult
    where
        F: FnMut(ScheduledPayment),
    {
        let monthly_rate = self.loan.annual_rate.monthly_rate().as_decimal();
        let payment = self.level_payment();
        let max_periods = self.loan.term_months.saturating_mul(2);

        let mut balance = self.loan.principal;
        let mut total_interest = Money::ZERO;
        let mut total_payment = Money::ZERO;
        let mut cumulative_principal = Money::ZERO;
        let mut period = 0;

        while balance.is_positive() && period < max_periods {
            let beginning_balance = balance;
            let interest = balance * monthly_rate;
            let mut principal_paid = (payment - interest + self.extra_payment).min(balance);

            balance -= principal_paid;

            // sub-cent residue left by rounding the level payment
            if principal_paid.is_positive() && balance.is_positive() && balance < Money::CENT {
                principal_paid += balance;
                balance = Money::ZERO;
            }

            let paid = interest + principal_paid;
            total_interest += interest;
            total_payment += paid;
            cumulative_principal += principal_paid;
            period += 1;

            visit(ScheduledPayment {
                payment_number: period,
                payment_date: None,
                beginning_balance,
                payment_amount: paid,
                principal_portion: principal_paid,
                interest_portion: interest,
                ending_balance: balance,
                cumulative_interest: total_interest,
                cumulative_principal,
            });
        }

        let guard_reached = balance.is_positive() && period >= max_periods;
        if guard_reached {
            warn!(
                periods = period,
                remaining_balance = %balance,
                extra_payment = %self.extra_payment,
                "amortization stopped at iteration cap with balance outstanding"
            );
        }

        AmortizationResult {
            periodic_payment: payment,
            total_interest,
            total_payment,
            actual_term_periods: period,
            remaining_balance: balance,
            guard_reached,
        }
    }
}

/// amortize a loan with a constant monthly extra payment
pub fn amortize(loan: &LoanParameters, extra_payment: Money) -> AmortizationResult {
    AmortizationCalculator::new(*loan)
        .with_extra_payment(extra_payment)
        .summarize()
}

/// standard annuity payment, `principal / months` when the rate is zero
pub fn calculate_level_payment(principal: Money, annual_rate: Rate, months: u32) -> Money {
    if months == 0 {
        return principal;
    }

    let r = annual_rate.monthly_rate().as_decimal();

    if r.is_zero() {
        return principal / Decimal::from(months);
    }

    // payment = P * r * (1 + r)^n / ((1 + r)^n - 1)
    let base = Decimal::ONE + r;
    let mut compound = Decimal::ONE;
    for _ in 0..months {
        match compound.checked_mul(base) {
            Some(next) => compound = next,
            // (1 + r)^n / ((1 + r)^n - 1) tends to 1
            None => return principal * r,
        }
    }

    let factor = compound / (compound - Decimal::ONE);

    Money::from_decimal(principal.as_decimal() * r * factor)
}
