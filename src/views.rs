//! serialization views for the http layer
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::accrual::{
    AccrualEngine, DailyProfitSignal, PackageAllocation, ReturnProjection, UserSummary,
};
use crate::config::{PackageCatalog, PackageConfig};
use crate::investment::InvestmentRecord;
use crate::types::{InvestmentId, InvestmentStatus, PackageId};

/// dashboard totals, with the field names the frontend expects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryView {
    #[serde(with = "rust_decimal::serde::float")]
    pub total_investment: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_daily_profit: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_profit: Decimal,
    pub active_investments: u32,
}

impl SummaryView {
    pub fn from_summary(summary: &UserSummary, dp: u32) -> Self {
        Self {
            total_investment: summary.total_principal.round_display(dp),
            total_daily_profit: summary.total_daily_profit.round_display(dp),
            total_profit: summary.total_cumulative_profit.round_display(dp),
            active_investments: summary.active_count,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalView {
    pub date: NaiveDate,
    #[serde(with = "rust_decimal::serde::float")]
    pub profit: Decimal,
    pub percentage: String,
}

impl SignalView {
    pub fn from_signal(signal: &DailyProfitSignal, dp: u32) -> Self {
        Self {
            date: signal.date,
            profit: signal.profit.round_display(dp),
            percentage: signal.percentage_label.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationView {
    pub package_name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}

impl AllocationView {
    pub fn from_allocation(allocation: &PackageAllocation, dp: u32) -> Self {
        Self {
            package_name: allocation.package_name.clone(),
            amount: allocation.amount.round_display(dp),
        }
    }
}

/// per-investment row of the dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentStatView {
    pub id: InvestmentId,
    pub package_name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub daily_profit: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_profit: Decimal,
    pub days_diff: u32,
    pub status: InvestmentStatus,
    /// daily rate as a fraction (0.045 for 4.5%), left unrounded since
    /// display places would truncate it
    #[serde(with = "rust_decimal::serde::float")]
    pub daily_rate: Decimal,
    pub start_date: DateTime<Utc>,
}

/// everything the stats dashboard renders
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub summary: SummaryView,
    pub investment_stats: Vec<InvestmentStatView>,
    pub profit_signals: Vec<SignalView>,
    pub investment_distribution: Vec<AllocationView>,
}

impl DashboardView {
    pub fn build(engine: &AccrualEngine, records: &[InvestmentRecord], as_of: DateTime<Utc>) -> Self {
        let dp = engine.config.display_dp;

        let investment_stats = records
            .iter()
            .map(|record| {
                let accrual = engine.compute_accrual(record, as_of);
                InvestmentStatView {
                    id: record.id,
                    package_name: record.package_name.clone(),
                    amount: record.principal.round_display(dp),
                    daily_profit: accrual.daily_profit.round_display(dp),
                    total_profit: accrual.cumulative_profit.round_display(dp),
                    days_diff: accrual.days_active,
                    status: record.status,
                    daily_rate: record.daily_rate.as_decimal(),
                    start_date: record.start_date,
                }
            })
            .collect();

        Self {
            summary: SummaryView::from_summary(&engine.summarize(records, as_of), dp),
            investment_stats,
            profit_signals: engine
                .profit_signals(records, as_of)
                .iter()
                .map(|s| SignalView::from_signal(s, dp))
                .collect(),
            investment_distribution: engine
                .allocation_by_package(records)
                .iter()
                .map(|a| AllocationView::from_allocation(a, dp))
                .collect(),
        }
    }

    /// convert to pretty-printed json string
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// one row of the investment listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentView {
    pub id: InvestmentId,
    pub package_name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub status: InvestmentStatus,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    #[serde(with = "rust_decimal::serde::float")]
    pub daily_return: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_return: Decimal,
    pub days_active: u32,
}

impl InvestmentView {
    pub fn from_record(engine: &AccrualEngine, record: &InvestmentRecord, as_of: DateTime<Utc>) -> Self {
        let dp = engine.config.display_dp;
        let accrual = engine.compute_accrual(record, as_of);
        Self {
            id: record.id,
            package_name: record.package_name.clone(),
            amount: record.principal.round_display(dp),
            status: record.status,
            start_date: record.start_date,
            end_date: record.end_date(),
            daily_return: accrual.daily_profit.round_display(dp),
            total_return: accrual.cumulative_profit.round_display(dp),
            days_active: accrual.days_active,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestmentListView {
    pub investments: Vec<InvestmentView>,
}

impl InvestmentListView {
    pub fn build(engine: &AccrualEngine, records: &[InvestmentRecord], as_of: DateTime<Utc>) -> Self {
        let investments = records
            .iter()
            .map(|record| InvestmentView::from_record(engine, record, as_of))
            .collect();

        Self { investments }
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// public package listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageView {
    pub id: PackageId,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub min_investment: Decimal,
    /// daily return in percent
    #[serde(with = "rust_decimal::serde::float")]
    pub daily_return: Decimal,
    pub duration: u32,
    pub description: Option<String>,
}

impl PackageView {
    pub fn from_package(package: &PackageConfig) -> Self {
        Self {
            id: package.id,
            name: package.name.clone(),
            min_investment: package.minimum_investment.round_display(2),
            daily_return: package.daily_rate.as_percentage().normalize(),
            duration: package.duration_days,
            description: package.description.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageListView {
    pub packages: Vec<PackageView>,
}

impl PackageListView {
    pub fn from_catalog(catalog: &PackageCatalog) -> Self {
        Self {
            packages: catalog.packages().iter().map(PackageView::from_package).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionView {
    #[serde(with = "rust_decimal::serde::float")]
    pub total_investment: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_return: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub final_amount: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub monthly_rate: Decimal,
}

impl ProjectionView {
    pub fn from_projection(projection: &ReturnProjection, dp: u32) -> Self {
        Self {
            total_investment: projection.total_investment.round_display(dp),
            total_return: projection.total_return.round_display(dp),
            final_amount: projection.final_amount.round_display(dp),
            monthly_rate: projection.monthly_rate.normalize(),
        }
    }
}
