//! Derived metrics over the dashboard tables.
//!
//! Every function here is pure. Presentation code must go through
//! these instead of repeating the arithmetic, so that every chart
//! and KPI agrees on deltas, quarters and shares.
//!
//! Division is always guarded: a zero denominator yields `None`,
//! which the formatters render as "N/A".

use crate::{
    calendar,
    portfolio::MonthlyPortfolioRecord,
    regional::RegionalRecord,
    segment::SegmentRecord,
    types::{Percent, Rupiah},
};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// A numeric column of a record type.
pub trait RecordField<R>: Copy {
    fn value(&self, record: &R) -> f64;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PortfolioField {
    KurDisbursed,
    KurKhususDisbursed,
    KurOutstanding,
    KurKhususOutstanding,
    TotalDisbursed,
    TotalOutstanding,
    NplRate,
    CollectionRate,
}

impl RecordField<MonthlyPortfolioRecord> for PortfolioField {
    fn value(&self, r: &MonthlyPortfolioRecord) -> f64 {
        match self {
            Self::KurDisbursed => r.kur_disbursed as f64,
            Self::KurKhususDisbursed => r.kur_khusus_disbursed as f64,
            Self::KurOutstanding => r.kur_outstanding as f64,
            Self::KurKhususOutstanding => r.kur_khusus_outstanding as f64,
            Self::TotalDisbursed => r.total_disbursed() as f64,
            Self::TotalOutstanding => r.total_outstanding() as f64,
            Self::NplRate => r.npl_rate,
            Self::CollectionRate => r.collection_rate,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegionalField {
    TotalCredit,
    BorrowerCount,
    NplRate,
    LandAreaHectares,
    AvgCreditPerFarmer,
}

impl RecordField<RegionalRecord> for RegionalField {
    fn value(&self, r: &RegionalRecord) -> f64 {
        match self {
            Self::TotalCredit => r.total_credit as f64,
            Self::BorrowerCount => r.borrower_count as f64,
            Self::NplRate => r.npl_rate,
            Self::LandAreaHectares => r.land_area_hectares as f64,
            Self::AvgCreditPerFarmer => r.avg_credit_per_farmer as f64,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentField {
    Count,
    TotalCredit,
    NplRate,
}

impl RecordField<SegmentRecord> for SegmentField {
    fn value(&self, r: &SegmentRecord) -> f64 {
        match self {
            Self::Count => r.count as f64,
            Self::TotalCredit => r.total_credit as f64,
            Self::NplRate => r.npl_rate,
        }
    }
}

// ── Deltas ────────────────────────────────────────────────────────

/// `latest.field - previous.field`.
pub fn delta<R, F: RecordField<R>>(latest: &R, previous: &R, field: F) -> f64 {
    field.value(latest) - field.value(previous)
}

/// The last record and the one before it, if there are at least two.
pub fn latest_pair<R>(records: &[R]) -> Option<(&R, &R)> {
    match records {
        [.., previous, latest] => Some((latest, previous)),
        _ => None,
    }
}

// ── Quarters ──────────────────────────────────────────────────────

/// `YYYY-Qn` for the quarter containing `month`.
pub fn quarter_key(month: NaiveDate) -> String {
    format!("{}-Q{}", month.year(), calendar::quarter_of(month))
}

/// Per-field sums for one quarter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuarterRollup {
    pub quarter: String,
    pub months: usize,
    pub sums: Vec<(PortfolioField, f64)>,
}

impl QuarterRollup {
    pub fn sum(&self, field: PortfolioField) -> Option<f64> {
        self.sums.iter().find(|(f, _)| *f == field).map(|(_, v)| *v)
    }
}

/// Group records by quarter and sum each requested field.
///
/// Quarters come out in order of first appearance, which is
/// chronological for a generated series. Every record lands in
/// exactly one quarter.
pub fn quarter_rollup(
    records: &[MonthlyPortfolioRecord],
    fields: &[PortfolioField],
) -> Vec<QuarterRollup> {
    let mut rollups: Vec<QuarterRollup> = Vec::new();
    for record in records {
        let key = quarter_key(record.month);
        let idx = match rollups.iter().position(|q| q.quarter == key) {
            Some(idx) => idx,
            None => {
                rollups.push(QuarterRollup {
                    quarter: key,
                    months: 0,
                    sums: fields.iter().map(|f| (*f, 0.0)).collect(),
                });
                rollups.len() - 1
            }
        };
        let rollup = &mut rollups[idx];
        rollup.months += 1;
        for (field, sum) in rollup.sums.iter_mut() {
            *sum += field.value(record);
        }
    }
    rollups
}

// ── Ranking ───────────────────────────────────────────────────────

/// The `n` records with the greatest `field`, highest first.
/// Ties keep their original order. `n` past the end returns everything.
pub fn top_n<R, F: RecordField<R>>(records: &[R], field: F, n: usize) -> Vec<&R> {
    let mut ranked: Vec<&R> = records.iter().collect();
    ranked.sort_by(|a, b| field.value(b).total_cmp(&field.value(a)));
    ranked.truncate(n);
    ranked
}

/// All records sorted ascending by `field`, ties in original order.
pub fn sorted_ascending<R, F: RecordField<R>>(records: &[R], field: F) -> Vec<&R> {
    let mut sorted: Vec<&R> = records.iter().collect();
    sorted.sort_by(|a, b| field.value(a).total_cmp(&field.value(b)));
    sorted
}

// ── Ratios ────────────────────────────────────────────────────────

/// `numerator / denominator`, or `None` when the denominator is zero.
pub fn safe_ratio(numerator: f64, denominator: f64) -> Option<f64> {
    if denominator == 0.0 {
        None
    } else {
        Some(numerator / denominator)
    }
}

/// `part / whole * 100`, or `None` when `whole` is zero.
pub fn percentage_share(part: f64, whole: f64) -> Option<Percent> {
    safe_ratio(part, whole).map(|r| r * 100.0)
}

/// Sum of one field across a table.
pub fn total<R, F: RecordField<R>>(records: &[R], field: F) -> f64 {
    records.iter().map(|r| field.value(r)).sum()
}

// ── Average credit ────────────────────────────────────────────────

/// Average credit per borrower, tagged by how it was obtained.
///
/// Regional averages are drawn alongside the other regional columns
/// and need not equal total credit over borrower count. Segment
/// averages are always total credit over count. The two kinds are
/// kept apart on purpose.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum AverageCredit {
    Stored(Rupiah),
    Computed(Option<f64>),
}

impl AverageCredit {
    pub fn value(&self) -> Option<f64> {
        match self {
            Self::Stored(v) => Some(*v as f64),
            Self::Computed(v) => *v,
        }
    }

    pub fn is_stored(&self) -> bool {
        matches!(self, Self::Stored(_))
    }
}

// ── Risk classes ──────────────────────────────────────────────────

/// Traffic-light class for an NPL rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskClass {
    Good,
    Medium,
    High,
}

impl RiskClass {
    /// Good below 3 %, medium below 5 %, high otherwise.
    pub fn from_npl(npl_rate: Percent) -> Self {
        if npl_rate < 3.0 {
            Self::Good
        } else if npl_rate < 5.0 {
            Self::Medium
        } else {
            Self::High
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Row(&'static str, f64);

    #[derive(Clone, Copy)]
    struct Score;

    impl RecordField<Row> for Score {
        fn value(&self, r: &Row) -> f64 {
            r.1
        }
    }

    #[test]
    fn latest_pair_needs_two_records() {
        assert!(latest_pair::<u8>(&[]).is_none());
        assert!(latest_pair(&[1]).is_none());
        assert_eq!(latest_pair(&[1, 2, 3]), Some((&3, &2)));
    }

    #[test]
    fn top_n_is_stable_on_ties() {
        let rows = vec![Row("a", 1.0), Row("b", 5.0), Row("c", 5.0), Row("d", 3.0)];
        let top: Vec<&str> = top_n(&rows, Score, 3).iter().map(|r| r.0).collect();
        assert_eq!(top, vec!["b", "c", "d"]);
    }

    #[test]
    fn top_n_past_end_returns_all() {
        let rows = vec![Row("a", 1.0), Row("b", 2.0)];
        assert_eq!(top_n(&rows, Score, 10).len(), 2);
        assert!(top_n(&rows, Score, 0).is_empty());
    }

    #[test]
    fn ascending_sort_keeps_tie_order() {
        let rows = vec![Row("a", 2.0), Row("b", 1.0), Row("c", 2.0)];
        let order: Vec<&str> = sorted_ascending(&rows, Score).iter().map(|r| r.0).collect();
        assert_eq!(order, vec!["b", "a", "c"]);
    }

    #[test]
    fn zero_whole_is_not_applicable() {
        assert_eq!(percentage_share(12.0, 0.0), None);
        assert_eq!(percentage_share(0.0, 0.0), None);
        assert_eq!(percentage_share(1.0, 4.0), Some(25.0));
    }

    #[test]
    fn risk_class_boundaries() {
        assert_eq!(RiskClass::from_npl(2.99), RiskClass::Good);
        assert_eq!(RiskClass::from_npl(3.0), RiskClass::Medium);
        assert_eq!(RiskClass::from_npl(4.99), RiskClass::Medium);
        assert_eq!(RiskClass::from_npl(5.0), RiskClass::High);
    }

    #[test]
    fn quarter_key_format() {
        let d = NaiveDate::from_ymd_opt(2025, 8, 1).unwrap();
        assert_eq!(quarter_key(d), "2025-Q3");
    }
}
