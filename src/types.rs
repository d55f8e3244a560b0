use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::decimal::Rate;

/// unique identifier for a scenario
pub type ScenarioId = Uuid;

/// payment cadence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PaymentFrequency {
    /// twelve payments a year
    #[default]
    Monthly,
    /// every 14 days, 26 payments a year
    BiWeekly,
    /// every 7 days, 52 payments a year
    Weekly,
}

impl PaymentFrequency {
    pub const ALL: [PaymentFrequency; 3] = [
        PaymentFrequency::Monthly,
        PaymentFrequency::BiWeekly,
        PaymentFrequency::Weekly,
    ];
}

/// how often a lump sum is contributed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum LumpSumFrequency {
    /// single contribution, spread across the whole term
    #[default]
    OneTime,
    /// once every twelve months
    Yearly,
    /// once every three months
    Quarterly,
}

/// VA funding fee borrower category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum FundingFeeType {
    /// first use of the VA loan benefit
    #[default]
    FirstTime,
    /// subsequent use of the benefit
    Subsequent,
    /// fee waived (e.g. service-connected disability)
    Exempt,
}

impl FundingFeeType {
    /// fee as a fraction of the base loan amount
    pub fn rate(&self) -> Rate {
        match self {
            FundingFeeType::FirstTime => Rate::from_bps(215),
            FundingFeeType::Subsequent => Rate::from_bps(330),
            FundingFeeType::Exempt => Rate::ZERO,
        }
    }
}

/// loan program the scenario is priced under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoanProgram {
    Conventional,
    Va { fee_type: FundingFeeType },
}

impl LoanProgram {
    pub fn funding_fee_type(&self) -> Option<FundingFeeType> {
        match self {
            LoanProgram::Conventional => None,
            LoanProgram::Va { fee_type } => Some(*fee_type),
        }
    }
}
