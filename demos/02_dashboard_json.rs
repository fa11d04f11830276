/// dashboard json - the payloads the http layer serializes
use chrono::{Duration, TimeZone, Utc};
use investment_accrual_rs::{
    DashboardService, EngineConfig, MemoryStore, Money, OpenInvestmentRequest, PackageCatalog,
    ProjectionRequest, SafeTimeProvider, TimeSource,
};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    ));
    let controller = time.test_control().unwrap();

    let service = DashboardService::new(
        MemoryStore::new(),
        PackageCatalog::default(),
        EngineConfig::default(),
    )?;

    println!("=== packages ===\n");
    println!("{}\n", serde_json::to_string_pretty(&service.packages())?);

    service.open_investment(1, &OpenInvestmentRequest::new(1, Money::from_major(1_000)), &time)?;
    controller.advance(Duration::days(3));
    service.open_investment(1, &OpenInvestmentRequest::new(2, Money::from_major(2_500)), &time)?;
    controller.advance(Duration::days(2));

    println!("=== dashboard ===\n");
    println!("{}\n", service.dashboard(1, &time)?.to_json_pretty()?);

    println!("=== investments ===\n");
    println!("{}\n", service.listing(1, &time)?.to_json_pretty()?);

    println!("=== projection ===\n");
    let projection = service.project(&ProjectionRequest {
        initial_investment: Money::from_major(1_000),
        monthly_contribution: Money::from_major(100),
        expected_return: dec!(12),
        years: 5,
    })?;
    println!("{}", serde_json::to_string_pretty(&projection)?);

    Ok(())
}
