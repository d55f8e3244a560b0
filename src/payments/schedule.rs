use chrono::NaiveDate;
use hourglass_rs::SafeTimeProvider;
use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::types::PaymentFrequency;

const MAX_RESERVED_DATES: usize = 1024;

/// dates of successive payments from a first payment date
pub fn generate_schedule(
    first_payment_date: NaiveDate,
    frequency: PaymentFrequency,
    count: usize,
) -> Result<Vec<NaiveDate>> {
    let mut dates = Vec::with_capacity(count.min(MAX_RESERVED_DATES));
    let mut current = first_payment_date;

    for i in 0..count {
        dates.push(current);
        // no step after the last emitted date, so a schedule ending at the
        // calendar limit is still valid
        if i + 1 < count {
            current = frequency.advance(current)?;
        }
    }

    Ok(dates)
}

/// a generated payment-date schedule with its inputs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentDateSchedule {
    pub first_payment_date: NaiveDate,
    pub frequency: PaymentFrequency,
    pub dates: Vec<NaiveDate>,
}

impl PaymentDateSchedule {
    pub fn generate(
        first_payment_date: NaiveDate,
        frequency: PaymentFrequency,
        count: usize,
    ) -> Result<Self> {
        Ok(Self {
            first_payment_date,
            frequency,
            dates: generate_schedule(first_payment_date, frequency, count)?,
        })
    }

    /// schedule whose first payment falls one period after the provider's current date
    pub fn starting_next_period(
        frequency: PaymentFrequency,
        count: usize,
        time_provider: &SafeTimeProvider,
    ) -> Result<Self> {
        let today = time_provider.now().date_naive();
        Self::generate(frequency.advance(today)?, frequency, count)
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn last_payment_date(&self) -> Option<NaiveDate> {
        self.dates.last().copied()
    }

    /// payments falling on or before `date`
    pub fn payments_through(&self, date: NaiveDate) -> usize {
        self.dates.partition_point(|d| *d <= date)
    }
}
