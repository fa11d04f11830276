use thiserror::Error;

use crate::decimal::Money;
use crate::types::{InvestmentId, InvestmentStatus, PackageId};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvestmentError {
    #[error("investment package not found: {id}")]
    PackageNotFound {
        id: PackageId,
    },

    #[error("amount must not be negative: {amount}")]
    NegativeAmount {
        amount: Money,
    },

    #[error("minimum investment amount is {minimum}, requested {requested}")]
    BelowMinimumInvestment {
        minimum: Money,
        requested: Money,
    },

    #[error("investment not found: {id}")]
    InvestmentNotFound {
        id: InvestmentId,
    },

    #[error("unknown investment status: {value}")]
    InvalidStatus {
        value: String,
    },

    #[error("invalid status transition: {from:?} -> {to:?}")]
    InvalidStatusTransition {
        from: InvestmentStatus,
        to: InvestmentStatus,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        message: String,
    },

    #[error("missing required projection input: {field}")]
    MissingProjectionInput {
        field: &'static str,
    },

    #[error("projection over {years} years exceeds the representable range")]
    ProjectionOverflow {
        years: u32,
    },

    #[error("investment store unavailable: {message}")]
    StoreUnavailable {
        message: String,
    },
}

pub type Result<T> = std::result::Result<T, InvestmentError>;
