//! Debtor segmentation snapshot. Literal values, no randomness.

use crate::{
    error::DashboardResult,
    metrics::{safe_ratio, AverageCredit},
    table::{Provenance, TableSource},
    types::{Percent, Rupiah, BILLION},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentKind {
    IndividualFarmer,
    FarmerGroup,
    /// Less than two years of farming history.
    Novice,
    /// More than two years of farming history.
    Experienced,
}

impl SegmentKind {
    pub const ALL: [SegmentKind; 4] = [
        Self::IndividualFarmer,
        Self::FarmerGroup,
        Self::Novice,
        Self::Experienced,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::IndividualFarmer => "Petani Individu",
            Self::FarmerGroup => "Kelompok Tani",
            Self::Novice => "Pemula (<2 tahun)",
            Self::Experienced => "Berpengalaman (>2 tahun)",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentRecord {
    pub segment: SegmentKind,
    pub count: i64,
    pub total_credit: Rupiah,
    pub npl_rate: Percent,
}

impl SegmentRecord {
    /// Total credit over debtor count; `None` for an empty segment.
    pub fn average_credit(&self) -> AverageCredit {
        AverageCredit::Computed(safe_ratio(self.total_credit as f64, self.count as f64))
    }
}

pub fn generate_segments() -> Vec<SegmentRecord> {
    let rows: [(SegmentKind, i64, Rupiah, Percent); 4] = [
        (SegmentKind::IndividualFarmer, 3_200, 640 * BILLION, 3.2),
        (SegmentKind::FarmerGroup, 1_800, 480 * BILLION, 1.8),
        (SegmentKind::Novice, 1_500, 280 * BILLION, 4.5),
        (SegmentKind::Experienced, 3_500, 840 * BILLION, 2.1),
    ];
    rows.into_iter()
        .map(|(segment, count, total_credit, npl_rate)| SegmentRecord {
            segment,
            count,
            total_credit,
            npl_rate,
        })
        .collect()
}

pub struct SegmentTable;

impl TableSource for SegmentTable {
    type Row = SegmentRecord;

    fn name(&self) -> &'static str {
        "segments"
    }

    fn provenance(&self) -> Provenance {
        Provenance::Constant
    }

    fn rows(&self) -> DashboardResult<Vec<SegmentRecord>> {
        Ok(generate_segments())
    }
}
