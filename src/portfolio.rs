use chrono::{DateTime, Utc};
use hourglass_rs::SafeTimeProvider;
use tracing::{info, warn};

use crate::accrual::{AccrualEngine, AccrualResult, DailyProfitSignal, UserSummary};
use crate::config::PackageCatalog;
use crate::decimal::Money;
use crate::errors::{InvestmentError, Result};
use crate::events::{Event, EventStore};
use crate::investment::{InvestmentRecord, OpenInvestmentRequest};
use crate::types::{InvestmentId, InvestmentStatus, UserId};

/// one user's investments and the events they produced
#[derive(Debug)]
pub struct Portfolio {
    pub user_id: UserId,
    pub engine: AccrualEngine,
    investments: Vec<InvestmentRecord>,
    pub events: EventStore,
}

impl Portfolio {
    pub fn new(user_id: UserId, engine: AccrualEngine) -> Self {
        Self {
            user_id,
            engine,
            investments: Vec::new(),
            events: EventStore::new(),
        }
    }

    /// rebuild a portfolio from stored records
    pub fn from_records(user_id: UserId, engine: AccrualEngine, investments: Vec<InvestmentRecord>) -> Self {
        Self {
            user_id,
            engine,
            investments,
            events: EventStore::new(),
        }
    }

    pub fn investments(&self) -> &[InvestmentRecord] {
        &self.investments
    }

    pub fn get(&self, id: InvestmentId) -> Result<&InvestmentRecord> {
        self.investments
            .iter()
            .find(|r| r.id == id)
            .ok_or(InvestmentError::InvestmentNotFound { id })
    }

    fn get_mut(&mut self, id: InvestmentId) -> Result<&mut InvestmentRecord> {
        self.investments
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(InvestmentError::InvestmentNotFound { id })
    }

    /// validate a request and open the investment
    pub fn open_investment(
        &mut self,
        request: &OpenInvestmentRequest,
        catalog: &PackageCatalog,
        time_provider: &SafeTimeProvider,
    ) -> Result<InvestmentId> {
        let package = request.validate(catalog).map_err(|e| {
            warn!(user_id = self.user_id, package_id = request.package_id, error = %e, "rejected investment request");
            e
        })?;

        let now = time_provider.now();
        let record = InvestmentRecord::open(package, request.amount, now)?;
        let id = record.id;

        self.events.emit(Event::InvestmentOpened {
            investment_id: id,
            package_id: package.id,
            amount: record.principal,
            timestamp: now,
        });
        info!(user_id = self.user_id, investment_id = %id, package = %package.name, amount = %record.principal, "opened investment");

        self.investments.push(record);
        Ok(id)
    }

    /// cancel an active investment, returning the refund
    pub fn cancel_investment(&mut self, id: InvestmentId, time_provider: &SafeTimeProvider) -> Result<Money> {
        let now = time_provider.now();
        let record = self.get_mut(id)?;
        let refund = record.cancel(now)?;

        self.events.emit(Event::StatusChanged {
            investment_id: id,
            old_status: InvestmentStatus::Active,
            new_status: InvestmentStatus::Cancelled,
            reason: "cancelled by user".to_string(),
            timestamp: now,
        });
        self.events.emit(Event::InvestmentCancelled {
            investment_id: id,
            refund,
            timestamp: now,
        });
        info!(user_id = self.user_id, investment_id = %id, refund = %refund, "cancelled investment");

        Ok(refund)
    }

    /// complete every active investment whose duration has elapsed
    pub fn settle_matured(&mut self, time_provider: &SafeTimeProvider) -> Result<Vec<InvestmentId>> {
        let now = time_provider.now();
        let mut completed = Vec::new();

        for record in self.investments.iter_mut() {
            if !record.is_active() || !record.has_matured(now) {
                continue;
            }
            let old_status = record.complete(now)?;
            completed.push(record.id);

            self.events.emit(Event::StatusChanged {
                investment_id: record.id,
                old_status,
                new_status: InvestmentStatus::Completed,
                reason: format!("{} day duration elapsed", record.duration_days),
                timestamp: now,
            });
            self.events.emit(Event::InvestmentCompleted {
                investment_id: record.id,
                timestamp: now,
            });
        }

        if !completed.is_empty() {
            info!(user_id = self.user_id, count = completed.len(), "settled matured investments");
        }
        Ok(completed)
    }

    pub fn accruals(&self, as_of: DateTime<Utc>) -> Vec<AccrualResult> {
        self.investments
            .iter()
            .map(|r| self.engine.compute_accrual(r, as_of))
            .collect()
    }

    pub fn summary(&self, time_provider: &SafeTimeProvider) -> UserSummary {
        self.engine.summarize(&self.investments, time_provider.now())
    }

    pub fn profit_signals(&self, time_provider: &SafeTimeProvider) -> Vec<DailyProfitSignal> {
        self.engine.profit_signals(&self.investments, time_provider.now())
    }
}
