use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::types::{InvestmentId, InvestmentStatus, PackageId};

/// all events that can be emitted by a portfolio
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    // lifecycle events
    InvestmentOpened {
        investment_id: InvestmentId,
        package_id: PackageId,
        amount: Money,
        timestamp: DateTime<Utc>,
    },
    InvestmentCompleted {
        investment_id: InvestmentId,
        timestamp: DateTime<Utc>,
    },
    InvestmentCancelled {
        investment_id: InvestmentId,
        refund: Money,
        timestamp: DateTime<Utc>,
    },

    // status change events
    StatusChanged {
        investment_id: InvestmentId,
        old_status: InvestmentStatus,
        new_status: InvestmentStatus,
        reason: String,
        timestamp: DateTime<Utc>,
    },
}

impl Event {
    pub fn investment_id(&self) -> InvestmentId {
        match self {
            Event::InvestmentOpened { investment_id, .. }
            | Event::InvestmentCompleted { investment_id, .. }
            | Event::InvestmentCancelled { investment_id, .. }
            | Event::StatusChanged { investment_id, .. } => *investment_id,
        }
    }

    /// signed ledger amount: deposits are negative, refunds positive
    pub fn ledger_amount(&self) -> Option<Money> {
        match self {
            Event::InvestmentOpened { amount, .. } => Some(Money::ZERO - *amount),
            Event::InvestmentCancelled { refund, .. } => Some(*refund),
            _ => None,
        }
    }
}

/// event store for collecting events during operations
#[derive(Debug, Default)]
pub struct EventStore {
    events: Vec<Event>,
}

impl EventStore {
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
        }
    }

    pub fn emit(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn events_for(&self, id: InvestmentId) -> impl Iterator<Item = &Event> {
        self.events.iter().filter(move |e| e.investment_id() == id)
    }

    /// net cash moved by the recorded events
    pub fn ledger_balance(&self) -> Money {
        self.events.iter().filter_map(Event::ledger_amount).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use uuid::Uuid;

    #[test]
    fn test_ledger_balance() {
        let ts = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let first = Uuid::new_v4();
        let second = Uuid::new_v4();

        let mut store = EventStore::new();
        store.emit(Event::InvestmentOpened {
            investment_id: first,
            package_id: 1,
            amount: Money::from_major(1_000),
            timestamp: ts,
        });
        store.emit(Event::InvestmentOpened {
            investment_id: second,
            package_id: 2,
            amount: Money::from_major(2_500),
            timestamp: ts,
        });
        store.emit(Event::InvestmentCancelled {
            investment_id: first,
            refund: Money::from_major(1_000),
            timestamp: ts,
        });

        assert_eq!(store.ledger_balance(), Money::from_major(-2_500));
        assert_eq!(store.events_for(first).count(), 2);

        let taken = store.take_events();
        assert_eq!(taken.len(), 3);
        assert!(store.events().is_empty());
    }
}
