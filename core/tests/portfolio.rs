use chrono::{Datelike, NaiveDate};
use kur_monitor_core::{
    config::{FloatRange, IntRange, PortfolioBounds},
    error::DashboardError,
    portfolio::{generate_monthly_portfolio, PortfolioGenerator},
    table::{Provenance, TableSource},
};

// ── Helpers ──────────────────────────────────────────────────────────────────

fn ymd(y: i32, m: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, 1).unwrap()
}

// ── Tests ────────────────────────────────────────────────────────────────────

/// Outstanding is the running sum of the monthly increments, for both products.
#[test]
fn outstanding_is_prefix_sum_of_increments() {
    for seed in [1u64, 7, 42, 1234] {
        let records = generate_monthly_portfolio(ymd(2024, 1), ymd(2025, 11), seed).unwrap();

        assert_eq!(records[0].kur_outstanding, records[0].kur_increment);
        assert_eq!(records[0].kur_khusus_outstanding, records[0].kur_khusus_increment);

        for i in 1..records.len() {
            let (prev, cur) = (&records[i - 1], &records[i]);
            assert!(cur.kur_outstanding >= prev.kur_outstanding);
            assert!(cur.kur_khusus_outstanding >= prev.kur_khusus_outstanding);
            assert_eq!(cur.kur_outstanding - prev.kur_outstanding, cur.kur_increment);
            assert_eq!(
                cur.kur_khusus_outstanding - prev.kur_khusus_outstanding,
                cur.kur_khusus_increment
            );
        }
    }
}

#[test]
fn every_field_within_generation_bounds() {
    let bounds = PortfolioBounds::default();
    let records = generate_monthly_portfolio(ymd(2020, 1), ymd(2025, 12), 42).unwrap();

    for r in &records {
        assert!(bounds.kur_disbursed.contains(r.kur_disbursed), "kur_disbursed {}", r.kur_disbursed);
        assert!(bounds.kur_khusus_disbursed.contains(r.kur_khusus_disbursed));
        assert!(bounds.kur_increment.contains(r.kur_increment));
        assert!(bounds.kur_khusus_increment.contains(r.kur_khusus_increment));
        assert!(
            (1.5..=4.5).contains(&r.npl_rate),
            "npl_rate {} outside [1.5, 4.5]",
            r.npl_rate
        );
        assert!(
            (85.0..=97.0).contains(&r.collection_rate),
            "collection_rate {} outside [85, 97]",
            r.collection_rate
        );
    }
}

#[test]
fn months_are_consecutive_month_starts() {
    let records = generate_monthly_portfolio(ymd(2024, 10), ymd(2025, 3), 5).unwrap();
    let months: Vec<(i32, u32)> = records.iter().map(|r| (r.month.year(), r.month.month())).collect();
    assert_eq!(
        months,
        vec![(2024, 10), (2024, 11), (2024, 12), (2025, 1), (2025, 2), (2025, 3)]
    );
    assert!(records.iter().all(|r| r.month.day() == 1));
}

#[test]
fn end_before_start_is_a_config_error() {
    let err = generate_monthly_portfolio(ymd(2025, 1), ymd(2024, 12), 42).unwrap_err();
    assert!(
        matches!(err, DashboardError::InvalidDateRange { .. }),
        "expected InvalidDateRange, got {err:?}"
    );
}

#[test]
fn single_month_range_yields_one_record() {
    let records = generate_monthly_portfolio(ymd(2024, 6), ymd(2024, 6), 42).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].kur_outstanding, records[0].kur_increment);
}

/// A one-value range pins every draw, which exercises the bounds plumbing.
#[test]
fn custom_bounds_are_honoured() {
    let bounds = PortfolioBounds {
        kur_disbursed: IntRange::scaled(7, 8, 1_000),
        kur_increment: IntRange::new(10, 11),
        ..PortfolioBounds::default()
    };
    let generator = PortfolioGenerator::new(ymd(2024, 1), ymd(2024, 4), 3, bounds).unwrap();
    let records = generator.generate();

    assert!(records.iter().all(|r| r.kur_disbursed == 7_000));
    let outstanding: Vec<i64> = records.iter().map(|r| r.kur_outstanding).collect();
    assert_eq!(outstanding, vec![10, 20, 30, 40]);
}

#[test]
fn invalid_bounds_rejected_at_construction() {
    let bounds = PortfolioBounds {
        collection_rate: FloatRange::new(97.0, 85.0),
        ..PortfolioBounds::default()
    };
    let result = PortfolioGenerator::new(ymd(2024, 1), ymd(2024, 12), 42, bounds);
    assert!(matches!(result, Err(DashboardError::InvalidConfig(_))));
}

/// Outstanding balances accumulate every increment, so bounds that fit a
/// single draw can still overflow once summed over the range.
#[test]
fn cumulative_overflow_rejected_at_construction() {
    let bounds = PortfolioBounds {
        kur_increment: IntRange::new(i64::MAX / 4, i64::MAX / 2),
        ..PortfolioBounds::default()
    };
    let result = PortfolioGenerator::new(ymd(2024, 1), ymd(2024, 12), 42, bounds.clone());
    assert!(matches!(result, Err(DashboardError::InvalidConfig(_))));

    // A single month of the same bounds still fits.
    let single = PortfolioGenerator::new(ymd(2024, 1), ymd(2024, 1), 42, bounds).unwrap();
    assert_eq!(single.generate().len(), 1);
}

#[test]
fn disbursement_totals_must_fit() {
    let bounds = PortfolioBounds {
        kur_disbursed: IntRange::new(i64::MAX / 2, i64::MAX),
        kur_khusus_disbursed: IntRange::new(i64::MAX / 2, i64::MAX),
        ..PortfolioBounds::default()
    };
    let result = PortfolioGenerator::new(ymd(2024, 1), ymd(2024, 1), 42, bounds);
    assert!(matches!(result, Err(DashboardError::InvalidConfig(_))));
}

#[test]
fn generator_is_a_seeded_table_source() {
    let generator = PortfolioGenerator::new(ymd(2024, 1), ymd(2024, 12), 11, PortfolioBounds::default()).unwrap();
    assert_eq!(generator.name(), "portfolio");
    assert_eq!(generator.provenance(), Provenance::Seeded { seed: 11 });
    assert_eq!(generator.months().len(), 12);
    assert_eq!(generator.rows().unwrap(), generator.generate());
}
