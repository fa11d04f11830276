pub mod accrual;
pub mod config;
pub mod decimal;
pub mod errors;
pub mod events;
pub mod investment;
pub mod portfolio;
pub mod service;
pub mod store;
pub mod types;
pub mod views;

// re-export key types
pub use accrual::{
    project_returns, AccrualEngine, AccrualResult, DailyProfitSignal, PackageAllocation,
    ProjectionRequest, ReturnProjection, UserSummary,
};
pub use config::{EngineConfig, PackageCatalog, PackageConfig};
pub use decimal::{Money, Rate};
pub use errors::{InvestmentError, Result};
pub use events::{Event, EventStore};
pub use investment::{InvestmentBuilder, InvestmentRecord, OpenInvestmentRequest};
pub use portfolio::Portfolio;
pub use service::DashboardService;
pub use store::{InvestmentStore, MemoryStore};
pub use types::{InvestmentId, InvestmentStatus, PackageId, UserId};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
pub use uuid::Uuid;
