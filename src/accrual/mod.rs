pub mod engine;
pub mod projection;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::types::InvestmentId;

pub use engine::AccrualEngine;
pub use projection::{project_returns, ProjectionRequest, ReturnProjection};

/// accrual of a single investment as of a point in time
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AccrualResult {
    pub investment_id: InvestmentId,
    pub days_active: u32,
    pub daily_profit: Money,
    pub cumulative_profit: Money,
}

/// portfolio totals for one user
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct UserSummary {
    pub total_principal: Money,
    pub total_daily_profit: Money,
    pub total_cumulative_profit: Money,
    pub active_count: u32,
}

/// active daily profit on one calendar day, for charting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyProfitSignal {
    pub date: NaiveDate,
    pub profit: Money,
    /// display only, not a rate of return
    pub percentage_label: String,
}

/// principal committed to one package
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageAllocation {
    pub package_name: String,
    pub amount: Money,
}
