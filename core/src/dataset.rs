//! The full set of tables one session renders from.

use crate::{
    aging::{AgingRecord, AgingTable},
    config::DashboardConfig,
    error::DashboardResult,
    portfolio::{MonthlyPortfolioRecord, PortfolioGenerator},
    regional::{RegionalGenerator, RegionalRecord},
    seasonal::{HarvestRecord, HarvestTable, ProductivityRecord, ProductivityTable},
    segment::{SegmentRecord, SegmentTable},
    table::TableSource,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardData {
    pub seed: u64,
    pub portfolio: Vec<MonthlyPortfolioRecord>,
    pub regional: Vec<RegionalRecord>,
    pub aging: Vec<AgingRecord>,
    pub segments: Vec<SegmentRecord>,
    pub harvest: Vec<HarvestRecord>,
    pub productivity: Vec<ProductivityRecord>,
}

impl DashboardData {
    /// Build every table from `config`. Fails only on invalid config.
    pub fn generate(config: &DashboardConfig) -> DashboardResult<Self> {
        let portfolio = PortfolioGenerator::from_config(config)?;
        let regional = RegionalGenerator::from_config(config)?;

        let data = Self {
            seed: config.seed,
            portfolio: load(&portfolio)?,
            regional: load(&regional)?,
            aging: load(&AgingTable)?,
            segments: load(&SegmentTable)?,
            harvest: load(&HarvestTable)?,
            productivity: load(&ProductivityTable)?,
        };
        log::debug!(
            "dataset: seed={} months={} regions={}",
            data.seed,
            data.portfolio.len(),
            data.regional.len()
        );
        Ok(data)
    }
}

fn load<S: TableSource>(source: &S) -> DashboardResult<Vec<S::Row>> {
    let rows = source.rows()?;
    log::trace!("table {} ({:?}): {} rows", source.name(), source.provenance(), rows.len());
    Ok(rows)
}
