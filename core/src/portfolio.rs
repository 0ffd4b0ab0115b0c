//! Monthly portfolio series for the two loan products.
//!
//! Disbursements, rates and outstanding increments are drawn
//! independently per month. The only derived columns are the two
//! outstanding balances, which are running sums of their own
//! increments and therefore never decrease.

use crate::{
    calendar,
    config::{DashboardConfig, PortfolioBounds},
    error::DashboardResult,
    rng::{RngBank, TableSlot},
    table::{Provenance, TableSource},
    types::{Percent, Rupiah},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyPortfolioRecord {
    pub month: NaiveDate,
    pub kur_disbursed: Rupiah,
    pub kur_khusus_disbursed: Rupiah,
    /// This month's addition to `kur_outstanding`.
    pub kur_increment: Rupiah,
    pub kur_khusus_increment: Rupiah,
    pub kur_outstanding: Rupiah,
    pub kur_khusus_outstanding: Rupiah,
    pub npl_rate: Percent,
    pub collection_rate: Percent,
}

impl MonthlyPortfolioRecord {
    pub fn total_outstanding(&self) -> Rupiah {
        self.kur_outstanding + self.kur_khusus_outstanding
    }

    pub fn total_disbursed(&self) -> Rupiah {
        self.kur_disbursed + self.kur_khusus_disbursed
    }
}

/// Seeded generator for the monthly series.
///
/// The date range and bounds are checked in `new`, so `generate`
/// cannot fail.
#[derive(Debug, Clone)]
pub struct PortfolioGenerator {
    seed: u64,
    months: Vec<NaiveDate>,
    bounds: PortfolioBounds,
}

impl PortfolioGenerator {
    pub fn new(
        start_month: NaiveDate,
        end_month: NaiveDate,
        seed: u64,
        bounds: PortfolioBounds,
    ) -> DashboardResult<Self> {
        bounds.validate()?;
        let months = calendar::month_range(start_month, end_month)?;
        bounds.validate_accumulation(months.len())?;
        Ok(Self { seed, months, bounds })
    }

    pub fn from_config(config: &DashboardConfig) -> DashboardResult<Self> {
        Self::new(
            config.start_month,
            config.end_month,
            config.seed,
            config.portfolio.clone(),
        )
    }

    pub fn months(&self) -> &[NaiveDate] {
        &self.months
    }

    pub fn generate(&self) -> Vec<MonthlyPortfolioRecord> {
        let mut rng = RngBank::new(self.seed).for_table(TableSlot::Portfolio);
        let n = self.months.len();
        let b = &self.bounds;

        // Column-major draw order: every month of one column before the next.
        let kur_disbursed: Vec<Rupiah> = (0..n).map(|_| b.kur_disbursed.draw(&mut rng)).collect();
        let kur_khusus_disbursed: Vec<Rupiah> =
            (0..n).map(|_| b.kur_khusus_disbursed.draw(&mut rng)).collect();
        let kur_increment: Vec<Rupiah> = (0..n).map(|_| b.kur_increment.draw(&mut rng)).collect();
        let kur_khusus_increment: Vec<Rupiah> =
            (0..n).map(|_| b.kur_khusus_increment.draw(&mut rng)).collect();
        let npl_rate: Vec<f64> = (0..n).map(|_| b.npl_rate.draw(&mut rng)).collect();
        let collection_rate: Vec<f64> = (0..n).map(|_| b.collection_rate.draw(&mut rng)).collect();

        let kur_outstanding = running_sum(&kur_increment);
        let kur_khusus_outstanding = running_sum(&kur_khusus_increment);

        let records: Vec<MonthlyPortfolioRecord> = (0..n)
            .map(|i| MonthlyPortfolioRecord {
                month: self.months[i],
                kur_disbursed: kur_disbursed[i],
                kur_khusus_disbursed: kur_khusus_disbursed[i],
                kur_increment: kur_increment[i],
                kur_khusus_increment: kur_khusus_increment[i],
                kur_outstanding: kur_outstanding[i],
                kur_khusus_outstanding: kur_khusus_outstanding[i],
                npl_rate: npl_rate[i],
                collection_rate: collection_rate[i],
            })
            .collect();

        log::debug!(
            "portfolio: seed={} months={} first={} last={}",
            self.seed,
            n,
            self.months.first().map(|m| m.to_string()).unwrap_or_default(),
            self.months.last().map(|m| m.to_string()).unwrap_or_default(),
        );
        records
    }
}

impl TableSource for PortfolioGenerator {
    type Row = MonthlyPortfolioRecord;

    fn name(&self) -> &'static str {
        TableSlot::Portfolio.name()
    }

    fn provenance(&self) -> Provenance {
        Provenance::Seeded { seed: self.seed }
    }

    fn rows(&self) -> DashboardResult<Vec<MonthlyPortfolioRecord>> {
        Ok(self.generate())
    }
}

/// Generate the monthly series with the default bounds.
/// Fails only when `end_month` is before `start_month`.
pub fn generate_monthly_portfolio(
    start_month: NaiveDate,
    end_month: NaiveDate,
    seed: u64,
) -> DashboardResult<Vec<MonthlyPortfolioRecord>> {
    Ok(PortfolioGenerator::new(start_month, end_month, seed, PortfolioBounds::default())?.generate())
}

fn running_sum(increments: &[Rupiah]) -> Vec<Rupiah> {
    increments
        .iter()
        .scan(0, |acc, x| {
            *acc += x;
            Some(*acc)
        })
        .collect()
}
