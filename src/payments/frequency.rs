use chrono::{Datelike, Days, NaiveDate};
use rust_decimal::Decimal;

use crate::decimal::Money;
use crate::errors::{MortgageError, Result};
use crate::types::PaymentFrequency;

const MONTHS_PER_YEAR: u32 = 12;

impl PaymentFrequency {
    /// number of payments in one year
    pub fn periods_per_year(&self) -> u32 {
        match self {
            PaymentFrequency::Monthly => 12,
            PaymentFrequency::BiWeekly => 26,
            PaymentFrequency::Weekly => 52,
        }
    }

    /// fixed day step, `None` for calendar months
    pub fn step_days(&self) -> Option<u64> {
        match self {
            PaymentFrequency::Monthly => None,
            PaymentFrequency::BiWeekly => Some(14),
            PaymentFrequency::Weekly => Some(7),
        }
    }

    /// advance a payment date by one period
    ///
    /// Monthly steps keep the day of month and let overflow roll into the
    /// following month (Jan 31 -> Mar 3, or Mar 2 in a leap year) instead of
    /// clamping to the last day of the shorter month.
    pub fn advance(&self, date: NaiveDate) -> Result<NaiveDate> {
        let next = match self.step_days() {
            Some(days) => date.checked_add_days(Days::new(days)),
            None => add_calendar_month_rolling(date),
        };

        next.ok_or_else(|| MortgageError::InvalidDate {
            message: format!("cannot advance {} by one {:?} period", date, self),
        })
    }
}

/// per-period amount equivalent to a monthly amount: `monthly * 12 / periods_per_year`
pub fn adjust_for_frequency(monthly_amount: Money, frequency: PaymentFrequency) -> Money {
    monthly_amount * Decimal::from(MONTHS_PER_YEAR) / Decimal::from(frequency.periods_per_year())
}

/// inverse of [`adjust_for_frequency`]
pub fn to_monthly(per_period_amount: Money, frequency: PaymentFrequency) -> Money {
    per_period_amount * Decimal::from(frequency.periods_per_year()) / Decimal::from(MONTHS_PER_YEAR)
}

/// yearly total of a per-period amount
pub fn annualize(per_period_amount: Money, frequency: PaymentFrequency) -> Money {
    per_period_amount * Decimal::from(frequency.periods_per_year())
}

fn add_calendar_month_rolling(date: NaiveDate) -> Option<NaiveDate> {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };

    NaiveDate::from_ymd_opt(year, month, 1)?.checked_add_days(Days::new(u64::from(date.day() - 1)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_periods_per_year() {
        assert_eq!(PaymentFrequency::Monthly.periods_per_year(), 12);
        assert_eq!(PaymentFrequency::BiWeekly.periods_per_year(), 26);
        assert_eq!(PaymentFrequency::Weekly.periods_per_year(), 52);
    }

    #[test]
    fn test_monthly_adjustment_is_identity() {
        let amount = Money::from_major(200);
        assert_eq!(adjust_for_frequency(amount, PaymentFrequency::Monthly), amount);
    }

    #[test]
    fn test_annualized_total_invariant_across_frequencies() {
        let monthly = Money::from_major(250);
        let expected = Money::from_major(3_000);

        for frequency in PaymentFrequency::ALL {
            let per_period = adjust_for_frequency(monthly, frequency);
            let annual = annualize(per_period, frequency);
            assert!((annual - expected).abs() < Money::ONE, "{:?}: {}", frequency, annual);
        }
    }

    #[test]
    fn test_higher_frequency_smaller_period_amount() {
        let monthly = Money::from_major(300);
        let bi_weekly = adjust_for_frequency(monthly, PaymentFrequency::BiWeekly);
        let weekly = adjust_for_frequency(monthly, PaymentFrequency::Weekly);

        assert!(bi_weekly < monthly);
        assert!(weekly < bi_weekly);
    }

    #[test]
    fn test_round_trip_recovers_monthly_amount() {
        let monthly = Money::from_str_exact("1234.56").unwrap();
        for frequency in PaymentFrequency::ALL {
            let back = to_monthly(adjust_for_frequency(monthly, frequency), frequency);
            assert!((back - monthly).abs() < Money::CENT);
        }
    }

    #[test]
    fn test_fixed_day_steps() {
        let start = date(2024, 12, 28);
        assert_eq!(PaymentFrequency::Weekly.advance(start).unwrap(), date(2025, 1, 4));
        assert_eq!(PaymentFrequency::BiWeekly.advance(start).unwrap(), date(2025, 1, 11));
    }

    #[test]
    fn test_monthly_step_keeps_day() {
        assert_eq!(PaymentFrequency::Monthly.advance(date(2024, 1, 15)).unwrap(), date(2024, 2, 15));
        assert_eq!(PaymentFrequency::Monthly.advance(date(2024, 12, 1)).unwrap(), date(2025, 1, 1));
    }

    #[test]
    fn test_monthly_step_rolls_past_short_month() {
        // 2023 is not a leap year: Feb has 28 days
        assert_eq!(PaymentFrequency::Monthly.advance(date(2023, 1, 31)).unwrap(), date(2023, 3, 3));
        assert_eq!(PaymentFrequency::Monthly.advance(date(2024, 1, 31)).unwrap(), date(2024, 3, 2));
        assert_eq!(PaymentFrequency::Monthly.advance(date(2024, 3, 31)).unwrap(), date(2024, 5, 1));
    }

    #[test]
    fn test_advance_past_max_date_errors() {
        assert!(PaymentFrequency::Weekly.advance(NaiveDate::MAX).is_err());
        assert!(PaymentFrequency::Monthly.advance(NaiveDate::MAX).is_err());
    }
}
