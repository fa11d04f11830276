use chrono::{DateTime, Duration, TimeZone, Utc};
use investment_accrual_rs::{AccrualEngine, InvestmentRecord, InvestmentStatus, Money, Rate};
use proptest::prelude::*;
use proptest::test_runner::Config;
use rust_decimal::Decimal;

fn base() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()
}

fn status_from(index: u8) -> InvestmentStatus {
    match index % 3 {
        0 => InvestmentStatus::Active,
        1 => InvestmentStatus::Completed,
        _ => InvestmentStatus::Cancelled,
    }
}

fn record(cents: i64, bps: u32, start_offset_secs: i64, status: InvestmentStatus) -> InvestmentRecord {
    InvestmentRecord::builder()
        .principal(Money::from_minor(cents, 2))
        .daily_rate(Rate::from_bps(bps))
        .status(status)
        .start_date(base() + Duration::seconds(start_offset_secs))
        .build()
        .expect("valid record")
}

proptest! {
    #![proptest_config(Config::with_cases(256))]

    #[test]
    fn cumulative_is_daily_times_days(
        cents in 0_i64..100_000_000,
        bps in 0_u32..5_000,
        offset in -864_000_i64..8_640_000,
        status in 0_u8..3,
    ) {
        let engine = AccrualEngine::default();
        let r = record(cents, bps, offset, status_from(status));
        let accrual = engine.compute_accrual(&r, base() + Duration::days(50));

        prop_assert_eq!(accrual.cumulative_profit, accrual.daily_profit * Decimal::from(accrual.days_active));
        if !r.status.is_active() {
            prop_assert_eq!(accrual.daily_profit, Money::ZERO);
            prop_assert_eq!(accrual.cumulative_profit, Money::ZERO);
        }
    }

    #[test]
    fn days_active_is_monotonic_and_clamped(
        offset in -864_000_i64..864_000,
        first in 0_i64..2_000_000,
        step in 0_i64..2_000_000,
    ) {
        let engine = AccrualEngine::default();
        let r = record(100_000, 450, offset, InvestmentStatus::Active);
        let earlier = base() + Duration::seconds(first);
        let later = earlier + Duration::seconds(step);

        let a = engine.compute_accrual(&r, earlier).days_active;
        let b = engine.compute_accrual(&r, later).days_active;
        prop_assert!(a <= b);

        if earlier <= r.start_date {
            prop_assert_eq!(a, 0);
        }
    }

    #[test]
    fn signals_have_fixed_gap_free_window(
        window in 0_u32..40,
        count in 0_usize..6,
        offset in -864_000_i64..864_000,
    ) {
        let engine = AccrualEngine::default();
        let records: Vec<_> = (0..count)
            .map(|i| record(50_000, 300, offset * i as i64, InvestmentStatus::Active))
            .collect();

        let signals = engine.build_profit_signals(&records, base(), window);
        prop_assert_eq!(signals.len(), window as usize);
        if let Some(last) = signals.last() {
            prop_assert_eq!(last.date, base().date_naive());
        }
        for pair in signals.windows(2) {
            prop_assert_eq!(pair[1].date - pair[0].date, Duration::days(1));
            prop_assert!(pair[0].profit <= pair[1].profit);
        }
    }

    #[test]
    fn summary_matches_per_record_accruals(
        amounts in proptest::collection::vec((0_i64..10_000_000, 0_u32..3_000, 0_u8..3), 0..8),
    ) {
        let engine = AccrualEngine::default();
        let as_of = base() + Duration::days(12);
        let records: Vec<_> = amounts
            .iter()
            .map(|(cents, bps, status)| record(*cents, *bps, -86_400 * (*bps as i64 % 20), status_from(*status)))
            .collect();

        let summary = engine.summarize(&records, as_of);
        let expected_profit: Money = records.iter().map(|r| engine.compute_accrual(r, as_of).cumulative_profit).sum();
        let expected_principal: Money = records.iter().map(|r| r.principal).sum();
        let active = records.iter().filter(|r| r.is_active()).count() as u32;

        prop_assert_eq!(summary.total_cumulative_profit, expected_profit);
        prop_assert_eq!(summary.total_principal, expected_principal);
        prop_assert_eq!(summary.active_count, active);
    }
}
