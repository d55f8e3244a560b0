use thiserror::Error;

use crate::decimal::{Money, Rate};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MortgageError {
    #[error("invalid principal: {amount}")]
    InvalidPrincipal {
        amount: Money,
    },

    #[error("invalid interest rate: {rate}")]
    InvalidInterestRate {
        rate: Rate,
    },

    #[error("invalid term: {months} months")]
    InvalidTerm {
        months: u32,
    },

    #[error("invalid payment amount for {field}: {amount}")]
    InvalidPaymentAmount {
        field: String,
        amount: Money,
    },

    #[error("non-finite input for {field}: {value}")]
    NonFiniteInput {
        field: String,
        value: f64,
    },

    #[error("input out of range for {field}: {value}")]
    OutOfRangeInput {
        field: String,
        value: f64,
    },

    #[error("invalid date: {message}")]
    InvalidDate {
        message: String,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        message: String,
    },

    #[error("serialization error: {message}")]
    Serialization {
        message: String,
    },
}

impl From<serde_json::Error> for MortgageError {
    fn from(err: serde_json::Error) -> Self {
        MortgageError::Serialization {
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, MortgageError>;
