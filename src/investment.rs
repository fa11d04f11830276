use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::{PackageCatalog, PackageConfig};
use crate::decimal::{Money, Rate};
use crate::errors::{InvestmentError, Result};
use crate::types::{InvestmentId, InvestmentStatus, PackageId};

/// a user's position in an investment package
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestmentRecord {
    pub id: InvestmentId,
    pub package_id: PackageId,
    pub package_name: String,
    pub principal: Money,
    pub daily_rate: Rate,
    pub duration_days: u32,
    pub status: InvestmentStatus,
    pub start_date: DateTime<Utc>,
    pub last_status_change: DateTime<Utc>,
}

impl InvestmentRecord {
    pub fn builder() -> InvestmentBuilder {
        InvestmentBuilder::new()
    }

    /// open a new active investment in a package
    pub fn open(package: &PackageConfig, amount: Money, now: DateTime<Utc>) -> Result<Self> {
        if amount.is_negative() {
            return Err(InvestmentError::NegativeAmount { amount });
        }
        if amount < package.minimum_investment {
            return Err(InvestmentError::BelowMinimumInvestment {
                minimum: package.minimum_investment,
                requested: amount,
            });
        }

        Ok(Self {
            id: Uuid::new_v4(),
            package_id: package.id,
            package_name: package.name.clone(),
            principal: amount,
            daily_rate: package.daily_rate,
            duration_days: package.duration_days,
            status: InvestmentStatus::Active,
            start_date: now,
            last_status_change: now,
        })
    }

    pub fn end_date(&self) -> DateTime<Utc> {
        self.start_date + Duration::days(self.duration_days as i64)
    }

    /// the package duration has fully elapsed at `as_of`
    pub fn has_matured(&self, as_of: DateTime<Utc>) -> bool {
        as_of >= self.end_date()
    }

    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }

    /// mark the investment completed
    pub fn complete(&mut self, now: DateTime<Utc>) -> Result<InvestmentStatus> {
        self.transition(InvestmentStatus::Completed, now)
    }

    /// cancel the investment, returning the refunded principal
    pub fn cancel(&mut self, now: DateTime<Utc>) -> Result<Money> {
        self.transition(InvestmentStatus::Cancelled, now)?;
        Ok(self.principal)
    }

    /// move to `next`, returning the previous status
    fn transition(&mut self, next: InvestmentStatus, now: DateTime<Utc>) -> Result<InvestmentStatus> {
        if !self.status.can_transition_to(next) {
            return Err(InvestmentError::InvalidStatusTransition {
                from: self.status,
                to: next,
            });
        }
        let previous = self.status;
        self.status = next;
        self.last_status_change = now;
        Ok(previous)
    }
}

/// validated request body for opening an investment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenInvestmentRequest {
    pub package_id: PackageId,
    pub amount: Money,
}

impl OpenInvestmentRequest {
    pub fn new(package_id: PackageId, amount: Money) -> Self {
        Self { package_id, amount }
    }

    /// check the request against the catalog and return the target package
    pub fn validate<'a>(&self, catalog: &'a PackageCatalog) -> Result<&'a PackageConfig> {
        if self.amount.is_negative() {
            return Err(InvestmentError::NegativeAmount { amount: self.amount });
        }
        let package = catalog.get(self.package_id)?;
        if self.amount < package.minimum_investment {
            return Err(InvestmentError::BelowMinimumInvestment {
                minimum: package.minimum_investment,
                requested: self.amount,
            });
        }
        Ok(package)
    }
}

/// builder for investment records with explicit fields
pub struct InvestmentBuilder {
    id: Option<InvestmentId>,
    package_id: Option<PackageId>,
    package_name: Option<String>,
    principal: Option<Money>,
    daily_rate: Option<Rate>,
    duration_days: Option<u32>,
    status: Option<InvestmentStatus>,
    start_date: Option<DateTime<Utc>>,
}

impl InvestmentBuilder {
    pub fn new() -> Self {
        Self {
            id: None,
            package_id: None,
            package_name: None,
            principal: None,
            daily_rate: None,
            duration_days: None,
            status: None,
            start_date: None,
        }
    }

    /// seed package fields from a catalog entry
    pub fn package(mut self, package: &PackageConfig) -> Self {
        self.package_id = Some(package.id);
        self.package_name = Some(package.name.clone());
        self.daily_rate = Some(package.daily_rate);
        self.duration_days = Some(package.duration_days);
        self
    }

    pub fn id(mut self, id: InvestmentId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn package_id(mut self, id: PackageId) -> Self {
        self.package_id = Some(id);
        self
    }

    pub fn package_name(mut self, name: impl Into<String>) -> Self {
        self.package_name = Some(name.into());
        self
    }

    pub fn principal(mut self, amount: Money) -> Self {
        self.principal = Some(amount);
        self
    }

    pub fn daily_rate(mut self, rate: Rate) -> Self {
        self.daily_rate = Some(rate);
        self
    }

    pub fn duration_days(mut self, days: u32) -> Self {
        self.duration_days = Some(days);
        self
    }

    pub fn status(mut self, status: InvestmentStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn start_date(mut self, date: DateTime<Utc>) -> Self {
        self.start_date = Some(date);
        self
    }

    pub fn build(self) -> Result<InvestmentRecord> {
        let principal = self.principal.ok_or(InvestmentError::InvalidConfiguration {
            message: "Principal required".to_string(),
        })?;
        if principal.is_negative() {
            return Err(InvestmentError::NegativeAmount { amount: principal });
        }

        let daily_rate = self.daily_rate.ok_or(InvestmentError::InvalidConfiguration {
            message: "Daily rate required".to_string(),
        })?;
        if daily_rate.is_negative() {
            return Err(InvestmentError::InvalidConfiguration {
                message: format!("Daily rate must not be negative: {}", daily_rate),
            });
        }

        let start_date = self.start_date.ok_or(InvestmentError::InvalidConfiguration {
            message: "Start date required".to_string(),
        })?;

        let duration_days = self.duration_days.unwrap_or(30);
        if duration_days == 0 {
            return Err(InvestmentError::InvalidConfiguration {
                message: "Duration must be at least one day".to_string(),
            });
        }

        Ok(InvestmentRecord {
            id: self.id.unwrap_or_else(Uuid::new_v4),
            package_id: self.package_id.unwrap_or_default(),
            package_name: self.package_name.unwrap_or_default(),
            principal,
            daily_rate,
            duration_days,
            status: self.status.unwrap_or(InvestmentStatus::Active),
            start_date,
            last_status_change: start_date,
        })
    }
}

impl Default for InvestmentBuilder {
    fn default() -> Self {
        Self::new()
    }
}
