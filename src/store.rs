use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::errors::{InvestmentError, Result};
use crate::events::Event;
use crate::investment::InvestmentRecord;
use crate::types::{InvestmentId, InvestmentStatus, UserId};

/// persistence seam for investment records and their ledger events
pub trait InvestmentStore: Send + Sync {
    fn records_for_user(&self, user_id: UserId) -> Result<Vec<InvestmentRecord>>;

    fn insert(&self, user_id: UserId, record: InvestmentRecord) -> Result<()>;

    fn update_status(
        &self,
        user_id: UserId,
        id: InvestmentId,
        status: InvestmentStatus,
        at: DateTime<Utc>,
    ) -> Result<()>;

    /// append lifecycle events to the user's ledger, in order
    fn append_events(&self, user_id: UserId, events: Vec<Event>) -> Result<()>;

    fn events_for_user(&self, user_id: UserId) -> Result<Vec<Event>>;
}

/// in-process store keyed by user
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<HashMap<UserId, Vec<InvestmentRecord>>>,
    events: RwLock<HashMap<UserId, Vec<Event>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<E>(_: E) -> InvestmentError {
    InvestmentError::StoreUnavailable {
        message: "lock poisoned".to_string(),
    }
}

impl InvestmentStore for MemoryStore {
    fn records_for_user(&self, user_id: UserId) -> Result<Vec<InvestmentRecord>> {
        let records = self.records.read().map_err(poisoned)?;
        Ok(records.get(&user_id).cloned().unwrap_or_default())
    }

    fn insert(&self, user_id: UserId, record: InvestmentRecord) -> Result<()> {
        let mut records = self.records.write().map_err(poisoned)?;
        debug!(user_id, investment_id = %record.id, "storing investment");
        records.entry(user_id).or_default().push(record);
        Ok(())
    }

    fn update_status(
        &self,
        user_id: UserId,
        id: InvestmentId,
        status: InvestmentStatus,
        at: DateTime<Utc>,
    ) -> Result<()> {
        let mut records = self.records.write().map_err(poisoned)?;
        let record = records
            .get_mut(&user_id)
            .and_then(|list| list.iter_mut().find(|r| r.id == id))
            .ok_or(InvestmentError::InvestmentNotFound { id })?;

        match status {
            InvestmentStatus::Completed => record.complete(at).map(|_| ()),
            InvestmentStatus::Cancelled => record.cancel(at).map(|_| ()),
            InvestmentStatus::Active => Err(InvestmentError::InvalidStatusTransition {
                from: record.status,
                to: status,
            }),
        }
    }

    fn append_events(&self, user_id: UserId, events: Vec<Event>) -> Result<()> {
        if events.is_empty() {
            return Ok(());
        }
        let mut ledger = self.events.write().map_err(poisoned)?;
        debug!(user_id, count = events.len(), "appending ledger events");
        ledger.entry(user_id).or_default().extend(events);
        Ok(())
    }

    fn events_for_user(&self, user_id: UserId) -> Result<Vec<Event>> {
        let ledger = self.events.read().map_err(poisoned)?;
        Ok(ledger.get(&user_id).cloned().unwrap_or_default())
    }
}
