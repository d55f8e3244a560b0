pub mod config;
pub mod decimal;
pub mod errors;
pub mod events;
pub mod fees;
pub mod payments;
pub mod scenario;
pub mod types;

// re-export key types
pub use config::ScenarioConfig;
pub use decimal::{Money, Rate};
pub use errors::{MortgageError, Result};
pub use events::{Event, EventStore};
pub use fees::{base_loan_amount, final_loan_amount, va_funding_fee, VaFundingFee};
pub use payments::{
    adjust_for_frequency, amortize, early_payoff_strategy, generate_schedule,
    AmortizationCalculator, AmortizationResult, AmortizationSchedule, EarlyPayoffStrategyResult,
    LoanParameters, PaymentDateSchedule, ScheduledPayment, StrategyInputs,
};
pub use scenario::{MortgageScenario, ScenarioBuilder, ScenarioResult, ScenarioView};
pub use types::{FundingFeeType, LoanProgram, LumpSumFrequency, PaymentFrequency, ScenarioId};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
pub use uuid::Uuid;
