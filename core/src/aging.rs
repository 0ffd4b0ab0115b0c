//! Loan aging snapshot. Literal values, no randomness.

use crate::{
    error::DashboardResult,
    table::{Provenance, TableSource},
    types::{Rupiah, BILLION},
};
use serde::{Deserialize, Serialize};

/// Days-past-due bucket, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgingBucket {
    Current,
    Days1To30,
    Days31To60,
    Days61To90,
    Over90,
}

impl AgingBucket {
    pub const ALL: [AgingBucket; 5] = [
        Self::Current,
        Self::Days1To30,
        Self::Days31To60,
        Self::Days61To90,
        Self::Over90,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Current => "Lancar",
            Self::Days1To30 => "1-30 Hari",
            Self::Days31To60 => "31-60 Hari",
            Self::Days61To90 => "61-90 Hari",
            Self::Over90 => ">90 Hari",
        }
    }

    /// Literal (KUR, KUR Khusus) amounts for the bucket.
    fn amounts(&self) -> (Rupiah, Rupiah) {
        match self {
            Self::Current => (850 * BILLION, 520 * BILLION),
            Self::Days1To30 => (45 * BILLION, 28 * BILLION),
            Self::Days31To60 => (25 * BILLION, 18 * BILLION),
            Self::Days61To90 => (15 * BILLION, 10 * BILLION),
            Self::Over90 => (35 * BILLION, 24 * BILLION),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgingRecord {
    pub bucket: AgingBucket,
    pub kur_amount: Rupiah,
    pub kur_khusus_amount: Rupiah,
}

impl AgingRecord {
    pub fn total(&self) -> Rupiah {
        self.kur_amount + self.kur_khusus_amount
    }
}

pub fn generate_aging() -> Vec<AgingRecord> {
    AgingBucket::ALL
        .iter()
        .map(|bucket| {
            let (kur_amount, kur_khusus_amount) = bucket.amounts();
            AgingRecord { bucket: *bucket, kur_amount, kur_khusus_amount }
        })
        .collect()
}

pub struct AgingTable;

impl TableSource for AgingTable {
    type Row = AgingRecord;

    fn name(&self) -> &'static str {
        "aging"
    }

    fn provenance(&self) -> Provenance {
        Provenance::Constant
    }

    fn rows(&self) -> DashboardResult<Vec<AgingRecord>> {
        Ok(generate_aging())
    }
}
