//! Agricultural reference tables: harvest-vs-repayment timing and
//! land productivity bands. Literal values, no randomness.

use crate::{
    error::DashboardResult,
    table::{Provenance, TableSource},
    types::{Percent, Rupiah, MILLION},
};
use serde::{Deserialize, Serialize};

const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "Mei", "Jun", "Jul", "Agt", "Sep", "Okt", "Nov", "Des",
];
const EXPECTED_HARVEST: [Percent; 12] = [15.0, 18.0, 25.0, 30.0, 20.0, 15.0, 10.0, 12.0, 20.0, 28.0, 32.0, 25.0];
const ACTUAL_REPAYMENT: [Percent; 12] = [14.0, 17.0, 24.0, 28.0, 19.0, 14.0, 9.0, 11.0, 19.0, 26.0, 30.0, 23.0];

/// Share of the annual harvest and of annual repayments falling in one month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HarvestRecord {
    pub month: String,
    pub expected_harvest: Percent,
    pub actual_repayment: Percent,
}

impl HarvestRecord {
    /// Repayment minus harvest share; negative means repayments lag the harvest.
    pub fn gap(&self) -> Percent {
        self.actual_repayment - self.expected_harvest
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductivityRecord {
    pub band: String,
    pub farmer_count: i64,
    pub npl_rate: Percent,
    pub avg_loan: Rupiah,
}

pub fn generate_harvest_alignment() -> Vec<HarvestRecord> {
    MONTH_LABELS
        .iter()
        .zip(EXPECTED_HARVEST)
        .zip(ACTUAL_REPAYMENT)
        .map(|((month, expected_harvest), actual_repayment)| HarvestRecord {
            month: month.to_string(),
            expected_harvest,
            actual_repayment,
        })
        .collect()
}

pub fn generate_productivity() -> Vec<ProductivityRecord> {
    [
        ("<60 ton/ha", 850, 5.2, 45),
        ("60-80 ton/ha", 1_920, 2.8, 62),
        ("80-100 ton/ha", 1_680, 1.9, 78),
        (">100 ton/ha", 550, 1.2, 95),
    ]
    .into_iter()
    .map(|(band, farmer_count, npl_rate, avg_loan_millions)| ProductivityRecord {
        band: band.to_string(),
        farmer_count,
        npl_rate,
        avg_loan: avg_loan_millions * MILLION,
    })
    .collect()
}

pub struct HarvestTable;

impl TableSource for HarvestTable {
    type Row = HarvestRecord;

    fn name(&self) -> &'static str {
        "harvest_alignment"
    }

    fn provenance(&self) -> Provenance {
        Provenance::Constant
    }

    fn rows(&self) -> DashboardResult<Vec<HarvestRecord>> {
        Ok(generate_harvest_alignment())
    }
}

pub struct ProductivityTable;

impl TableSource for ProductivityTable {
    type Row = ProductivityRecord;

    fn name(&self) -> &'static str {
        "productivity"
    }

    fn provenance(&self) -> Provenance {
        Provenance::Constant
    }

    fn rows(&self) -> DashboardResult<Vec<ProductivityRecord>> {
        Ok(generate_productivity())
    }
}
