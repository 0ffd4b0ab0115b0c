//! Per-region snapshot.
//!
//! Each column is drawn independently per region. In particular
//! `avg_credit_per_farmer` is its own draw, not total credit over
//! borrower count.

use crate::{
    config::{validate_region_names, DashboardConfig, RegionalBounds},
    error::DashboardResult,
    metrics::{AverageCredit, RiskClass},
    rng::{RngBank, TableSlot},
    table::{Provenance, TableSource},
    types::{Percent, Rupiah},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionalRecord {
    pub region: String,
    pub total_credit: Rupiah,
    pub borrower_count: i64,
    pub npl_rate: Percent,
    pub land_area_hectares: i64,
    pub avg_credit_per_farmer: Rupiah,
}

impl RegionalRecord {
    pub fn average_credit(&self) -> AverageCredit {
        AverageCredit::Stored(self.avg_credit_per_farmer)
    }

    pub fn risk_class(&self) -> RiskClass {
        RiskClass::from_npl(self.npl_rate)
    }
}

#[derive(Debug, Clone)]
pub struct RegionalGenerator {
    seed: u64,
    names: Vec<String>,
    bounds: RegionalBounds,
}

impl RegionalGenerator {
    pub fn new(names: Vec<String>, seed: u64, bounds: RegionalBounds) -> DashboardResult<Self> {
        validate_region_names(&names)?;
        bounds.validate()?;
        Ok(Self { seed, names, bounds })
    }

    pub fn from_config(config: &DashboardConfig) -> DashboardResult<Self> {
        Self::new(config.regions.clone(), config.seed, config.regional.clone())
    }

    pub fn generate(&self) -> Vec<RegionalRecord> {
        let mut rng = RngBank::new(self.seed).for_table(TableSlot::Regional);
        let n = self.names.len();
        let b = &self.bounds;

        let total_credit: Vec<Rupiah> = (0..n).map(|_| b.total_credit.draw(&mut rng)).collect();
        let borrower_count: Vec<i64> = (0..n).map(|_| b.borrower_count.draw(&mut rng)).collect();
        let npl_rate: Vec<f64> = (0..n).map(|_| b.npl_rate.draw(&mut rng)).collect();
        let land: Vec<i64> = (0..n).map(|_| b.land_area_hectares.draw(&mut rng)).collect();
        let avg_credit: Vec<Rupiah> = (0..n).map(|_| b.avg_credit_per_farmer.draw(&mut rng)).collect();

        log::debug!("regional: seed={} regions={n}", self.seed);

        self.names
            .iter()
            .enumerate()
            .map(|(i, name)| RegionalRecord {
                region: name.clone(),
                total_credit: total_credit[i],
                borrower_count: borrower_count[i],
                npl_rate: npl_rate[i],
                land_area_hectares: land[i],
                avg_credit_per_farmer: avg_credit[i],
            })
            .collect()
    }
}

impl TableSource for RegionalGenerator {
    type Row = RegionalRecord;

    fn name(&self) -> &'static str {
        TableSlot::Regional.name()
    }

    fn provenance(&self) -> Provenance {
        Provenance::Seeded { seed: self.seed }
    }

    fn rows(&self) -> DashboardResult<Vec<RegionalRecord>> {
        Ok(self.generate())
    }
}

/// Generate the regional table with the default bounds.
/// Names must be non-empty and unique.
pub fn generate_regional(region_names: &[String], seed: u64) -> DashboardResult<Vec<RegionalRecord>> {
    Ok(RegionalGenerator::new(region_names.to_vec(), seed, RegionalBounds::default())?.generate())
}

/// Look up one region by name.
pub fn find_region<'a>(records: &'a [RegionalRecord], name: &str) -> Option<&'a RegionalRecord> {
    records.iter().find(|r| r.region == name)
}
