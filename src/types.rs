use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::errors::InvestmentError;

/// unique identifier for an investment
pub type InvestmentId = Uuid;

/// catalog identifier for an investment package
pub type PackageId = u32;

/// identifier of the user owning a portfolio
pub type UserId = u64;

/// investment status
///
/// Moves only `Active -> Completed` or `Active -> Cancelled`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvestmentStatus {
    /// accruing daily returns
    Active,
    /// package duration elapsed
    Completed,
    /// cancelled by the user, principal refunded
    Cancelled,
}

impl InvestmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvestmentStatus::Active => "active",
            InvestmentStatus::Completed => "completed",
            InvestmentStatus::Cancelled => "cancelled",
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, InvestmentStatus::Active)
    }

    pub fn can_transition_to(&self, next: InvestmentStatus) -> bool {
        matches!(
            (self, next),
            (InvestmentStatus::Active, InvestmentStatus::Completed)
                | (InvestmentStatus::Active, InvestmentStatus::Cancelled)
        )
    }
}

impl fmt::Display for InvestmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InvestmentStatus {
    type Err = InvestmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(InvestmentStatus::Active),
            "completed" => Ok(InvestmentStatus::Completed),
            "cancelled" => Ok(InvestmentStatus::Cancelled),
            other => Err(InvestmentError::InvalidStatus {
                value: other.to_string(),
            }),
        }
    }
}
