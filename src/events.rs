use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::types::{FundingFeeType, PaymentFrequency, ScenarioId};

/// all events that can be emitted by a scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    ScenarioCreated {
        scenario_id: ScenarioId,
        base_loan_amount: Money,
        timestamp: DateTime<Utc>,
    },

    // input events
    LoanAmountChanged {
        scenario_id: ScenarioId,
        old_amount: Money,
        new_amount: Money,
        timestamp: DateTime<Utc>,
    },
    FundingFeeRecalculated {
        scenario_id: ScenarioId,
        fee_type: FundingFeeType,
        base_loan_amount: Money,
        fee_amount: Money,
        final_loan_amount: Money,
        timestamp: DateTime<Utc>,
    },

    // calculation events
    ScenarioRecalculated {
        scenario_id: ScenarioId,
        principal: Money,
        baseline_interest: Money,
        strategy_interest: Money,
        interest_savings: Money,
        term_reduction_periods: u32,
        timestamp: DateTime<Utc>,
    },
    IterationGuardReached {
        scenario_id: ScenarioId,
        periods: u32,
        remaining_balance: Money,
        timestamp: DateTime<Utc>,
    },
    ScheduleGenerated {
        scenario_id: ScenarioId,
        frequency: PaymentFrequency,
        first_payment_date: NaiveDate,
        payment_count: usize,
        timestamp: DateTime<Utc>,
    },
}

/// event store for collecting events during operations
#[derive(Debug, Default)]
pub struct EventStore {
    events: Vec<Event>,
}

impl EventStore {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn emit(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}
