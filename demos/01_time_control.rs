/// time control - watch returns accrue by advancing a test clock
use chrono::{Duration, TimeZone, Utc};
use investment_accrual_rs::{
    AccrualEngine, Money, OpenInvestmentRequest, PackageCatalog, Portfolio, SafeTimeProvider,
    TimeSource,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap()
    ));
    let controller = time.test_control().unwrap();

    let catalog = PackageCatalog::default();
    let mut portfolio = Portfolio::new(1, AccrualEngine::default());
    portfolio.open_investment(&OpenInvestmentRequest::new(2, Money::from_major(2_500)), &catalog, &time)?;

    println!("day | days active | daily profit | total profit");
    for day in 0..=10 {
        let summary = portfolio.summary(&time);
        let days_active = portfolio.accruals(time.now())[0].days_active;
        println!(
            "{:>3} | {:>11} | {:>12} | {:>12}",
            day,
            days_active,
            summary.total_daily_profit.round_display(2),
            summary.total_cumulative_profit.round_display(2),
        );
        controller.advance(Duration::days(1));
    }

    Ok(())
}
