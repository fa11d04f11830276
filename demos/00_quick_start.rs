/// quick start - minimal example to get started
use investment_accrual_rs::{
    DashboardService, EngineConfig, MemoryStore, Money, OpenInvestmentRequest, PackageCatalog,
    SafeTimeProvider, TimeSource,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let service = DashboardService::new(
        MemoryStore::new(),
        PackageCatalog::default(),
        EngineConfig::default(),
    )?;
    let time = SafeTimeProvider::new(TimeSource::System);

    // put $1,000 into the gold package for user 1
    service.open_investment(1, &OpenInvestmentRequest::new(1, Money::from_major(1_000)), &time)?;

    // print the dashboard
    println!("{}", service.dashboard(1, &time)?.to_json_pretty()?);

    Ok(())
}
