/// lifecycle - open, cancel, and mature investments
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
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    ));
    let controller = time.test_control().unwrap();

    let catalog = PackageCatalog::default();
    let mut portfolio = Portfolio::new(42, AccrualEngine::default());

    // below the diamond minimum
    let rejected = portfolio.open_investment(
        &OpenInvestmentRequest::new(3, Money::from_major(1_000)),
        &catalog,
        &time,
    );
    println!("diamond with $1,000: {}", rejected.unwrap_err());

    let gold = portfolio.open_investment(&OpenInvestmentRequest::new(1, Money::from_major(1_000)), &catalog, &time)?;
    let diamond = portfolio.open_investment(&OpenInvestmentRequest::new(3, Money::from_major(5_000)), &catalog, &time)?;

    controller.advance(Duration::days(7));
    let refund = portfolio.cancel_investment(diamond, &time)?;
    println!("cancelled diamond, refund {}", refund);

    controller.advance(Duration::days(23));
    let completed = portfolio.settle_matured(&time)?;
    println!("completed: {:?}", completed);
    println!("gold status: {}", portfolio.get(gold)?.status);

    println!("\nevents:");
    for event in portfolio.events.events() {
        println!("  {:?}", event);
    }
    println!("net ledger: {}", portfolio.events.ledger_balance());

    Ok(())
}
