use chrono::{DateTime, Duration, NaiveDate, Utc};
use hourglass_rs::SafeTimeProvider;
use rust_decimal::Decimal;
use tracing::debug;

use crate::accrual::{AccrualResult, DailyProfitSignal, PackageAllocation, UserSummary};
use crate::config::{EngineConfig, MAX_SIGNAL_WINDOW_DAYS};
use crate::decimal::Money;
use crate::errors::Result;
use crate::investment::InvestmentRecord;

/// engine for linear daily-return accrual
///
/// Stateless: every method is a pure function of its arguments, so one
/// engine can be shared across request handlers.
#[derive(Debug, Clone, Copy, Default)]
pub struct AccrualEngine {
    pub config: EngineConfig,
}

impl AccrualEngine {
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// whole days elapsed since `start`, truncated and clamped at zero
    pub fn days_active(start: DateTime<Utc>, as_of: DateTime<Utc>) -> u32 {
        let days = (as_of - start).num_days().max(0);
        u32::try_from(days).unwrap_or(u32::MAX)
    }

    /// profit credited per day; zero unless the investment is active
    pub fn daily_profit(record: &InvestmentRecord) -> Money {
        if record.is_active() {
            record.principal.apply_daily_rate(record.daily_rate, 1)
        } else {
            Money::ZERO
        }
    }

    /// compute the accrual of one investment as of `as_of`
    pub fn compute_accrual(&self, record: &InvestmentRecord, as_of: DateTime<Utc>) -> AccrualResult {
        let days_active = Self::days_active(record.start_date, as_of);
        let daily_profit = Self::daily_profit(record);

        AccrualResult {
            investment_id: record.id,
            days_active,
            daily_profit,
            cumulative_profit: daily_profit * Decimal::from(days_active),
        }
    }

    /// compute accrual with a time provider
    pub fn accrue_with_time(
        &self,
        record: &InvestmentRecord,
        time_provider: &SafeTimeProvider,
    ) -> AccrualResult {
        self.compute_accrual(record, time_provider.now())
    }

    /// fold a user's investments into portfolio totals
    pub fn summarize(&self, records: &[InvestmentRecord], as_of: DateTime<Utc>) -> UserSummary {
        let summary = records.iter().fold(UserSummary::default(), |mut summary, record| {
            let accrual = self.compute_accrual(record, as_of);

            summary.total_principal += record.principal;
            summary.total_cumulative_profit += accrual.cumulative_profit;
            if record.is_active() {
                summary.total_daily_profit += accrual.daily_profit;
                summary.active_count += 1;
            }
            summary
        });

        debug!(
            records = records.len(),
            active = summary.active_count,
            total_principal = %summary.total_principal,
            "summarized portfolio"
        );

        summary
    }

    /// daily profit signals over the configured window
    pub fn profit_signals(&self, records: &[InvestmentRecord], as_of: DateTime<Utc>) -> Vec<DailyProfitSignal> {
        self.build_profit_signals(records, as_of, self.config.signal_window_days)
    }

    /// one signal per calendar day, oldest first, ending on `as_of`'s date
    ///
    /// An active record contributes its full daily profit to every day on or
    /// after its start date. Windows longer than `MAX_SIGNAL_WINDOW_DAYS` are
    /// cut to that length.
    pub fn build_profit_signals(
        &self,
        records: &[InvestmentRecord],
        as_of: DateTime<Utc>,
        window_days: u32,
    ) -> Vec<DailyProfitSignal> {
        let contributions: Vec<(NaiveDate, Money)> = records
            .iter()
            .filter(|r| r.is_active())
            .map(|r| (r.start_date.date_naive(), Self::daily_profit(r)))
            .collect();

        let last_day = as_of.date_naive();
        (0..window_days.min(MAX_SIGNAL_WINDOW_DAYS))
            .rev()
            .map(|offset| {
                let date = last_day - Duration::days(offset as i64);
                let profit: Money = contributions
                    .iter()
                    .filter(|(start, _)| *start <= date)
                    .map(|(_, profit)| *profit)
                    .sum();

                DailyProfitSignal {
                    date,
                    profit,
                    percentage_label: self.percentage_label(profit),
                }
            })
            .collect()
    }

    /// cosmetic label: `profit / scale * 100`, two places, or "0%"
    ///
    /// A non-positive scale labels every day "0%".
    pub fn percentage_label(&self, profit: Money) -> String {
        if !profit.is_positive() || self.config.percentage_scale <= Decimal::ZERO {
            return "0%".to_string();
        }
        let scaled = profit / self.config.percentage_scale * Decimal::from(100);
        format!("+{}%", scaled.round_display(self.config.display_dp))
    }

    /// principal grouped by package name, in first-seen order
    pub fn allocation_by_package(&self, records: &[InvestmentRecord]) -> Vec<PackageAllocation> {
        let mut allocations: Vec<PackageAllocation> = Vec::new();
        for record in records {
            match allocations.iter_mut().find(|a| a.package_name == record.package_name) {
                Some(existing) => existing.amount += record.principal,
                None => allocations.push(PackageAllocation {
                    package_name: record.package_name.clone(),
                    amount: record.principal,
                }),
            }
        }
        allocations
    }
}
