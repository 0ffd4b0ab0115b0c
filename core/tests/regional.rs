use kur_monitor_core::{
    config::{RegionalBounds, DEFAULT_REGIONS},
    error::DashboardError,
    metrics::AverageCredit,
    regional::{find_region, generate_regional, RegionalGenerator},
    table::{Provenance, TableSource},
};

// ── Helpers ──────────────────────────────────────────────────────────────────

fn default_names() -> Vec<String> {
    DEFAULT_REGIONS.iter().map(|r| r.to_string()).collect()
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[test]
fn one_record_per_region_in_given_order() {
    let names = default_names();
    let records = generate_regional(&names, 42).unwrap();

    let regions: Vec<&str> = records.iter().map(|r| r.region.as_str()).collect();
    assert_eq!(regions, DEFAULT_REGIONS.to_vec());
}

#[test]
fn fields_within_generation_bounds() {
    let bounds = RegionalBounds::default();
    for seed in [1u64, 42, 777] {
        for r in generate_regional(&default_names(), seed).unwrap() {
            assert!(bounds.total_credit.contains(r.total_credit), "total_credit {}", r.total_credit);
            assert!(bounds.borrower_count.contains(r.borrower_count));
            assert!((1.0..=5.0).contains(&r.npl_rate), "npl_rate {}", r.npl_rate);
            assert!(bounds.land_area_hectares.contains(r.land_area_hectares));
            assert!(bounds.avg_credit_per_farmer.contains(r.avg_credit_per_farmer));
        }
    }
}

#[test]
fn duplicate_region_names_rejected() {
    let names = vec!["Lampung".to_string(), "Jawa Timur".to_string(), "Lampung".to_string()];
    let err = generate_regional(&names, 42).unwrap_err();
    match err {
        DashboardError::DuplicateRegion { name } => assert_eq!(name, "Lampung"),
        other => panic!("expected DuplicateRegion, got {other:?}"),
    }
}

#[test]
fn empty_region_list_rejected() {
    let err = generate_regional(&[], 42).unwrap_err();
    assert!(matches!(err, DashboardError::InvalidConfig(_)));
}

/// Regional average credit is a drawn value, not total / borrowers.
#[test]
fn regional_average_is_stored_not_computed() {
    for r in generate_regional(&default_names(), 42).unwrap() {
        let avg = r.average_credit();
        assert!(avg.is_stored());
        assert_eq!(avg, AverageCredit::Stored(r.avg_credit_per_farmer));
        assert_eq!(avg.value(), Some(r.avg_credit_per_farmer as f64));
    }
}

#[test]
fn lookup_by_name() {
    let records = generate_regional(&default_names(), 42).unwrap();
    assert_eq!(find_region(&records, "Lampung").map(|r| r.region.as_str()), Some("Lampung"));
    assert!(find_region(&records, "Papua").is_none());
}

#[test]
fn generator_is_a_seeded_table_source() {
    let generator = RegionalGenerator::new(default_names(), 9, RegionalBounds::default()).unwrap();
    assert_eq!(generator.name(), "regional");
    assert_eq!(generator.provenance(), Provenance::Seeded { seed: 9 });
    assert_eq!(generator.rows().unwrap(), generate_regional(&default_names(), 9).unwrap());
}
