use hourglass_rs::SafeTimeProvider;
use tracing::info;

use crate::accrual::{project_returns, AccrualEngine, ProjectionRequest};
use crate::config::{EngineConfig, PackageCatalog};
use crate::decimal::Money;
use crate::errors::Result;
use crate::events::Event;
use crate::investment::{InvestmentRecord, OpenInvestmentRequest};
use crate::portfolio::Portfolio;
use crate::store::InvestmentStore;
use crate::types::{InvestmentId, InvestmentStatus, UserId};
use crate::views::{DashboardView, InvestmentListView, InvestmentView, PackageListView, ProjectionView};

/// request-facing operations over an injected store
///
/// Construct once at startup and share between handlers; the user id is
/// resolved by the caller's auth layer.
pub struct DashboardService<S: InvestmentStore> {
    store: S,
    catalog: PackageCatalog,
    engine: AccrualEngine,
}

impl<S: InvestmentStore> DashboardService<S> {
    pub fn new(store: S, catalog: PackageCatalog, config: EngineConfig) -> Result<Self> {
        let engine = AccrualEngine::new(config)?;
        info!(packages = catalog.packages().len(), window = config.signal_window_days, "dashboard service ready");
        Ok(Self { store, catalog, engine })
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn catalog(&self) -> &PackageCatalog {
        &self.catalog
    }

    fn portfolio(&self, user_id: UserId) -> Result<Portfolio> {
        let records = self.store.records_for_user(user_id)?;
        Ok(Portfolio::from_records(user_id, self.engine, records))
    }

    pub fn packages(&self) -> PackageListView {
        PackageListView::from_catalog(&self.catalog)
    }

    pub fn open_investment(
        &self,
        user_id: UserId,
        request: &OpenInvestmentRequest,
        time_provider: &SafeTimeProvider,
    ) -> Result<InvestmentRecord> {
        let mut portfolio = self.portfolio(user_id)?;
        let id = portfolio.open_investment(request, &self.catalog, time_provider)?;
        let record = portfolio.get(id)?.clone();
        self.store.insert(user_id, record.clone())?;
        self.store.append_events(user_id, portfolio.events.take_events())?;
        Ok(record)
    }

    pub fn cancel_investment(
        &self,
        user_id: UserId,
        id: InvestmentId,
        time_provider: &SafeTimeProvider,
    ) -> Result<Money> {
        let mut portfolio = self.portfolio(user_id)?;
        let refund = portfolio.cancel_investment(id, time_provider)?;
        self.store
            .update_status(user_id, id, InvestmentStatus::Cancelled, time_provider.now())?;
        self.store.append_events(user_id, portfolio.events.take_events())?;
        Ok(refund)
    }

    /// complete matured investments so later reads see final statuses
    ///
    /// Each id is persisted with its events before the next one. If a store
    /// call fails partway, the ids already written stay completed and a retry
    /// only picks up the investments still active.
    pub fn settle_matured(&self, user_id: UserId, time_provider: &SafeTimeProvider) -> Result<Vec<InvestmentId>> {
        let mut portfolio = self.portfolio(user_id)?;
        let completed = portfolio.settle_matured(time_provider)?;
        let mut events = portfolio.events.take_events();
        for id in &completed {
            self.store
                .update_status(user_id, *id, InvestmentStatus::Completed, time_provider.now())?;
            let (own, rest): (Vec<Event>, Vec<Event>) =
                events.into_iter().partition(|e| e.investment_id() == *id);
            self.store.append_events(user_id, own)?;
            events = rest;
        }
        Ok(completed)
    }

    /// one of the user's investments; ids owned by other users are not found
    pub fn investment(
        &self,
        user_id: UserId,
        id: InvestmentId,
        time_provider: &SafeTimeProvider,
    ) -> Result<InvestmentView> {
        let portfolio = self.portfolio(user_id)?;
        let record = portfolio.get(id)?;
        Ok(InvestmentView::from_record(&self.engine, record, time_provider.now()))
    }

    pub fn events(&self, user_id: UserId) -> Result<Vec<Event>> {
        self.store.events_for_user(user_id)
    }

    /// net cash the user's ledger has moved: deposits negative, refunds positive
    pub fn ledger_balance(&self, user_id: UserId) -> Result<Money> {
        let events = self.store.events_for_user(user_id)?;
        Ok(events.iter().filter_map(Event::ledger_amount).sum())
    }

    pub fn dashboard(&self, user_id: UserId, time_provider: &SafeTimeProvider) -> Result<DashboardView> {
        let records = self.store.records_for_user(user_id)?;
        Ok(DashboardView::build(&self.engine, &records, time_provider.now()))
    }

    pub fn listing(&self, user_id: UserId, time_provider: &SafeTimeProvider) -> Result<InvestmentListView> {
        let records = self.store.records_for_user(user_id)?;
        Ok(InvestmentListView::build(&self.engine, &records, time_provider.now()))
    }

    pub fn project(&self, request: &ProjectionRequest) -> Result<ProjectionView> {
        let projection = project_returns(request)?;
        Ok(ProjectionView::from_projection(&projection, self.engine.config.display_dp))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::InvestmentError;
    use crate::store::MemoryStore;
    use chrono::{Duration, TimeZone, Utc};
    use hourglass_rs::TimeSource;
    use rust_decimal_macros::dec;

    fn service() -> DashboardService<MemoryStore> {
        DashboardService::new(MemoryStore::new(), PackageCatalog::default(), EngineConfig::default()).unwrap()
    }

    #[test]
    fn test_full_flow() {
        let service = service();
        let time = SafeTimeProvider::new(TimeSource::Test(
            Utc.with_ymd_and_hms(2024, 2, 1, 10, 0, 0).unwrap(),
        ));
        let control = time.test_control().unwrap();

        let gold = service
            .open_investment(1, &OpenInvestmentRequest::new(1, Money::from_major(1_000)), &time)
            .unwrap();
        service
            .open_investment(1, &OpenInvestmentRequest::new(2, Money::from_major(2_500)), &time)
            .unwrap();

        control.advance(Duration::days(5));
        let dashboard = service.dashboard(1, &time).unwrap();
        assert_eq!(dashboard.summary.total_investment, dec!(3500));
        assert_eq!(dashboard.summary.total_profit, dec!(1287.5));
        assert_eq!(dashboard.summary.active_investments, 2);

        let refund = service.cancel_investment(1, gold.id, &time).unwrap();
        assert_eq!(refund, Money::from_major(1_000));

        let listing = service.listing(1, &time).unwrap();
        let cancelled = listing.investments.iter().find(|i| i.id == gold.id).unwrap();
        assert_eq!(cancelled.status, InvestmentStatus::Cancelled);
        assert_eq!(cancelled.total_return, dec!(0));

        // other users see nothing
        assert!(service.listing(2, &time).unwrap().investments.is_empty());
    }

    #[test]
    fn test_settle_persists_completion() {
        let service = service();
        let time = SafeTimeProvider::new(TimeSource::Test(
            Utc.with_ymd_and_hms(2024, 2, 1, 10, 0, 0).unwrap(),
        ));
        let control = time.test_control().unwrap();

        let record = service
            .open_investment(4, &OpenInvestmentRequest::new(3, Money::from_major(5_000)), &time)
            .unwrap();

        control.advance(Duration::days(31));
        assert_eq!(service.settle_matured(4, &time).unwrap(), vec![record.id]);
        assert!(service.settle_matured(4, &time).unwrap().is_empty());

        let stored = service.store().records_for_user(4).unwrap();
        assert_eq!(stored[0].status, InvestmentStatus::Completed);
        assert!(matches!(
            service.cancel_investment(4, record.id, &time),
            Err(InvestmentError::InvalidStatusTransition { .. })
        ));
    }

    #[test]
    fn test_ledger_survives_open_and_cancel() {
        let service = service();
        let time = SafeTimeProvider::new(TimeSource::Test(
            Utc.with_ymd_and_hms(2024, 2, 1, 10, 0, 0).unwrap(),
        ));

        let record = service
            .open_investment(3, &OpenInvestmentRequest::new(1, Money::from_major(1_200)), &time)
            .unwrap();
        assert_eq!(service.ledger_balance(3).unwrap(), Money::from_major(-1_200));

        service.cancel_investment(3, record.id, &time).unwrap();
        assert_eq!(service.ledger_balance(3).unwrap(), Money::ZERO);

        let events = service.events(3).unwrap();
        assert_eq!(events.len(), 3);
        assert!(matches!(events[0], Event::InvestmentOpened { .. }));
        assert!(matches!(events[2], Event::InvestmentCancelled { .. }));
        assert!(service.events(4).unwrap().is_empty());
    }

    #[test]
    fn test_settle_records_completion_events() {
        let service = service();
        let time = SafeTimeProvider::new(TimeSource::Test(
            Utc.with_ymd_and_hms(2024, 2, 1, 10, 0, 0).unwrap(),
        ));
        let control = time.test_control().unwrap();

        let record = service
            .open_investment(5, &OpenInvestmentRequest::new(1, Money::from_major(1_000)), &time)
            .unwrap();
        control.advance(Duration::days(30));
        service.settle_matured(5, &time).unwrap();

        let events = service.events(5).unwrap();
        assert_eq!(events.len(), 3);
        assert!(events.iter().all(|e| e.investment_id() == record.id));
        assert!(matches!(events[2], Event::InvestmentCompleted { .. }));
        assert_eq!(service.ledger_balance(5).unwrap(), Money::from_major(-1_000));
    }

    #[test]
    fn test_investment_lookup_is_owner_scoped() {
        let service = service();
        let time = SafeTimeProvider::new(TimeSource::Test(
            Utc.with_ymd_and_hms(2024, 2, 1, 10, 0, 0).unwrap(),
        ));
        let control = time.test_control().unwrap();

        let record = service
            .open_investment(1, &OpenInvestmentRequest::new(2, Money::from_major(2_500)), &time)
            .unwrap();
        control.advance(Duration::days(2));

        let view = service.investment(1, record.id, &time).unwrap();
        assert_eq!(view.id, record.id);
        assert_eq!(view.days_active, 2);
        assert_eq!(view.total_return, dec!(425));

        assert_eq!(
            service.investment(2, record.id, &time),
            Err(InvestmentError::InvestmentNotFound { id: record.id })
        );
        let unknown = uuid::Uuid::new_v4();
        assert_eq!(
            service.investment(1, unknown, &time),
            Err(InvestmentError::InvestmentNotFound { id: unknown })
        );
    }

    #[test]
    fn test_rejects_unknown_package() {
        let service = service();
        let time = SafeTimeProvider::new(TimeSource::System);

        let result = service.open_investment(1, &OpenInvestmentRequest::new(99, Money::from_major(1_000)), &time);
        assert_eq!(result, Err(InvestmentError::PackageNotFound { id: 99 }));
        assert!(service.store().records_for_user(1).unwrap().is_empty());
    }

    #[test]
    fn test_project_and_packages() {
        let service = service();
        let view = service
            .project(&ProjectionRequest {
                initial_investment: Money::from_major(1_000),
                monthly_contribution: Money::ZERO,
                expected_return: dec!(12),
                years: 1,
            })
            .unwrap();
        assert_eq!(view.final_amount, dec!(1126.83));

        assert_eq!(service.packages().packages.len(), 3);
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = EngineConfig { percentage_scale: dec!(0), ..EngineConfig::default() };
        assert!(DashboardService::new(MemoryStore::new(), PackageCatalog::default(), config).is_err());

        let wide = EngineConfig::default().with_window(10_000);
        assert!(DashboardService::new(MemoryStore::new(), PackageCatalog::default(), wide).is_err());
    }
}
