use kur_monitor_core::{
    aging::{generate_aging, AgingBucket, AgingTable},
    metrics::AverageCredit,
    seasonal::{generate_harvest_alignment, generate_productivity, HarvestTable, ProductivityTable},
    segment::{generate_segments, SegmentKind, SegmentRecord, SegmentTable},
    table::{Provenance, TableSource},
    types::{BILLION, MILLION},
};

#[test]
fn aging_buckets_in_display_order() {
    let aging = generate_aging();
    let buckets: Vec<AgingBucket> = aging.iter().map(|r| r.bucket).collect();
    assert_eq!(buckets, AgingBucket::ALL.to_vec());

    let labels: Vec<&str> = aging.iter().map(|r| r.bucket.label()).collect();
    assert_eq!(labels, vec!["Lancar", "1-30 Hari", "31-60 Hari", "61-90 Hari", ">90 Hari"]);
}

#[test]
fn aging_amounts_are_fixed() {
    let aging = generate_aging();
    assert_eq!(aging[0].kur_amount, 850 * BILLION);
    assert_eq!(aging[0].kur_khusus_amount, 520 * BILLION);
    assert_eq!(aging[4].kur_amount, 35 * BILLION);
    assert_eq!(aging[4].total(), 59 * BILLION);

    let kur_total: i64 = aging.iter().map(|r| r.kur_amount).sum();
    assert_eq!(kur_total, 970 * BILLION);
}

#[test]
fn segments_are_fixed() {
    let segments = generate_segments();
    let kinds: Vec<SegmentKind> = segments.iter().map(|s| s.segment).collect();
    assert_eq!(kinds, SegmentKind::ALL.to_vec());

    let counts: Vec<i64> = segments.iter().map(|s| s.count).collect();
    assert_eq!(counts, vec![3_200, 1_800, 1_500, 3_500]);
    assert_eq!(segments[2].npl_rate, 4.5);
    assert_eq!(segments[3].total_credit, 840 * BILLION);
}

/// Segment average credit is always total credit over count.
#[test]
fn segment_average_is_computed() {
    let segments = generate_segments();
    let individual = &segments[0];
    assert_eq!(
        individual.average_credit(),
        AverageCredit::Computed(Some((200 * MILLION) as f64))
    );
    assert!(!individual.average_credit().is_stored());

    let empty = SegmentRecord { count: 0, ..individual.clone() };
    assert_eq!(empty.average_credit(), AverageCredit::Computed(None));
    assert_eq!(empty.average_credit().value(), None);
}

#[test]
fn seasonal_tables_cover_year_and_bands() {
    let harvest = generate_harvest_alignment();
    assert_eq!(harvest.len(), 12);
    assert_eq!(harvest[0].month, "Jan");
    assert_eq!(harvest[11].month, "Des");
    assert!(harvest.iter().all(|h| h.actual_repayment <= h.expected_harvest));
    assert_eq!(harvest[3].gap(), -2.0);

    let productivity = generate_productivity();
    assert_eq!(productivity.len(), 4);
    assert_eq!(productivity[0].avg_loan, 45 * MILLION);
    assert_eq!(productivity.iter().map(|p| p.farmer_count).sum::<i64>(), 5_000);
}

#[test]
fn constant_tables_report_constant_provenance() {
    assert_eq!(AgingTable.provenance(), Provenance::Constant);
    assert_eq!(SegmentTable.provenance(), Provenance::Constant);
    assert_eq!(HarvestTable.provenance(), Provenance::Constant);
    assert_eq!(ProductivityTable.provenance(), Provenance::Constant);

    assert_eq!(AgingTable.rows().unwrap(), generate_aging());
    assert_eq!(SegmentTable.rows().unwrap(), generate_segments());
    assert_eq!(HarvestTable.name(), "harvest_alignment");
    assert_eq!(ProductivityTable.rows().unwrap().len(), 4);
}
