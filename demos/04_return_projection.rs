/// return projection - the investment calculator
use investment_accrual_rs::{project_returns, Money, ProjectionRequest};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("years | invested | final amount | return");
    for years in [1, 5, 10, 20] {
        let projection = project_returns(&ProjectionRequest {
            initial_investment: Money::from_major(10_000),
            monthly_contribution: Money::from_major(250),
            expected_return: dec!(7),
            years,
        })?;
        println!(
            "{:>5} | {:>8} | {:>12} | {:>10}",
            years,
            projection.total_investment.round_display(2),
            projection.final_amount.round_display(2),
            projection.total_return.round_display(2),
        );
    }

    Ok(())
}
