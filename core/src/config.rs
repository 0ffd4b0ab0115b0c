use crate::{
    calendar,
    error::{DashboardError, DashboardResult},
    rng::TableRng,
    types::{Percent, Rupiah, BILLION, MILLION, TRILLION},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

// ── Generation bounds ──────────────────────────────────────────────

/// Half-open integer draw range, multiplied by `scale` after drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntRange {
    pub low: i64,
    pub high: i64,
    #[serde(default = "unit_scale")]
    pub scale: i64,
}

fn unit_scale() -> i64 {
    1
}

impl IntRange {
    pub const fn new(low: i64, high: i64) -> Self {
        Self { low, high, scale: 1 }
    }

    pub const fn scaled(low: i64, high: i64, scale: i64) -> Self {
        Self { low, high, scale }
    }

    pub fn draw(&self, rng: &mut TableRng) -> i64 {
        rng.int_in(self.low, self.high) * self.scale
    }

    /// Whether an already-scaled value could have come from this range.
    pub fn contains(&self, value: i64) -> bool {
        value % self.scale == 0 && (self.low..self.high).contains(&(value / self.scale))
    }

    /// Largest magnitude a single scaled draw can take.
    fn peak(&self) -> i128 {
        let low = self.low as i128 * self.scale as i128;
        let high = (self.high as i128 - 1) * self.scale as i128;
        low.abs().max(high.abs())
    }

    fn validate(&self, field: &str) -> DashboardResult<()> {
        if self.high <= self.low {
            return Err(DashboardError::InvalidConfig(format!(
                "{field}: empty range [{}, {})",
                self.low, self.high
            )));
        }
        if self.scale <= 0 {
            return Err(DashboardError::InvalidConfig(format!(
                "{field}: scale must be positive, got {}",
                self.scale
            )));
        }
        if self.high.checked_mul(self.scale).is_none() || self.low.checked_mul(self.scale).is_none() {
            return Err(DashboardError::InvalidConfig(format!("{field}: scaled range overflows")));
        }
        Ok(())
    }
}

/// Half-open float draw range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FloatRange {
    pub low: f64,
    pub high: f64,
}

impl FloatRange {
    pub const fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    pub fn draw(&self, rng: &mut TableRng) -> f64 {
        rng.uniform(self.low, self.high)
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.low && value <= self.high
    }

    fn validate(&self, field: &str) -> DashboardResult<()> {
        if !(self.low.is_finite() && self.high.is_finite()) || self.high <= self.low {
            return Err(DashboardError::InvalidConfig(format!(
                "{field}: invalid range [{}, {})",
                self.low, self.high
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PortfolioBounds {
    pub kur_disbursed: IntRange,
    pub kur_khusus_disbursed: IntRange,
    /// Monthly increments that accumulate into KUR outstanding.
    pub kur_increment: IntRange,
    pub kur_khusus_increment: IntRange,
    pub npl_rate: FloatRange,
    pub collection_rate: FloatRange,
}

impl Default for PortfolioBounds {
    fn default() -> Self {
        Self {
            kur_disbursed: IntRange::scaled(5_000, 15_000, MILLION),
            kur_khusus_disbursed: IntRange::scaled(3_000, 8_000, MILLION),
            kur_increment: IntRange::scaled(3_000, 10_000, MILLION),
            kur_khusus_increment: IntRange::scaled(2_000, 6_000, MILLION),
            npl_rate: FloatRange::new(1.5, 4.5),
            collection_rate: FloatRange::new(85.0, 97.0),
        }
    }
}

impl PortfolioBounds {
    pub fn validate(&self) -> DashboardResult<()> {
        self.kur_disbursed.validate("portfolio.kur_disbursed")?;
        self.kur_khusus_disbursed.validate("portfolio.kur_khusus_disbursed")?;
        self.kur_increment.validate("portfolio.kur_increment")?;
        self.kur_khusus_increment.validate("portfolio.kur_khusus_increment")?;
        self.npl_rate.validate("portfolio.npl_rate")?;
        self.collection_rate.validate("portfolio.collection_rate")?;
        Ok(())
    }

    /// The outstanding balances sum `months` increments per product, and the
    /// totals add both products. Every such sum must stay within `Rupiah`.
    pub fn validate_accumulation(&self, months: usize) -> DashboardResult<()> {
        let months = months as i128;
        let outstanding = months * (self.kur_increment.peak() + self.kur_khusus_increment.peak());
        let disbursed = self.kur_disbursed.peak() + self.kur_khusus_disbursed.peak();
        for (field, peak) in [("portfolio increments", outstanding), ("portfolio disbursements", disbursed)] {
            if peak > Rupiah::MAX as i128 {
                return Err(DashboardError::InvalidConfig(format!(
                    "{field}: cumulative totals over {months} months overflow"
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegionalBounds {
    pub total_credit: IntRange,
    pub borrower_count: IntRange,
    pub npl_rate: FloatRange,
    pub land_area_hectares: IntRange,
    pub avg_credit_per_farmer: IntRange,
}

impl Default for RegionalBounds {
    fn default() -> Self {
        Self {
            total_credit: IntRange::scaled(50_000, 200_000, MILLION),
            borrower_count: IntRange::new(500, 2_000),
            npl_rate: FloatRange::new(1.0, 5.0),
            land_area_hectares: IntRange::new(1_000, 5_000),
            avg_credit_per_farmer: IntRange::scaled(20, 80, MILLION),
        }
    }
}

impl RegionalBounds {
    pub fn validate(&self) -> DashboardResult<()> {
        self.total_credit.validate("regional.total_credit")?;
        self.borrower_count.validate("regional.borrower_count")?;
        self.npl_rate.validate("regional.npl_rate")?;
        self.land_area_hectares.validate("regional.land_area_hectares")?;
        self.avg_credit_per_farmer.validate("regional.avg_credit_per_farmer")?;
        Ok(())
    }
}

// ── Display targets and static indicators ─────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetConfig {
    /// Outstanding credit target used for the achievement KPI.
    pub credit_target: Rupiah,
    /// Achievement deltas are shown relative to this percentage.
    pub achievement_baseline: Percent,
    pub npl_threshold: Percent,
    pub npl_target: Percent,
    pub collection_floor: Percent,
    pub top_regions: usize,
    /// Hard-coded change label shown under the active-debtor KPI.
    pub active_debtor_delta: String,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            credit_target: 15 * TRILLION,
            achievement_baseline: 85.0,
            npl_threshold: 5.0,
            npl_target: 3.0,
            collection_floor: 90.0,
            top_regions: 3,
            active_debtor_delta: "+127".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StaticIndicators {
    pub restructured_rate: Percent,
    pub utilization_rate: Percent,
    pub collateral_coverage: Percent,
    pub interest_subsidy: Rupiah,
}

impl Default for StaticIndicators {
    fn default() -> Self {
        Self {
            restructured_rate: 2.3,
            utilization_rate: 87.5,
            collateral_coverage: 145.0,
            interest_subsidy: 12_500 * MILLION,
        }
    }
}

// ── Top-level config ──────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub seed: u64,
    pub start_month: NaiveDate,
    pub end_month: NaiveDate,
    pub regions: Vec<String>,
    pub portfolio: PortfolioBounds,
    pub regional: RegionalBounds,
    pub targets: TargetConfig,
    pub indicators: StaticIndicators,
}

pub const DEFAULT_REGIONS: [&str; 5] = [
    "Jawa Timur",
    "Jawa Tengah",
    "Lampung",
    "Sumatera Selatan",
    "Sulawesi Selatan",
];

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            start_month: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default(),
            end_month: NaiveDate::from_ymd_opt(2025, 11, 1).unwrap_or_default(),
            regions: DEFAULT_REGIONS.iter().map(|r| r.to_string()).collect(),
            portfolio: PortfolioBounds::default(),
            regional: RegionalBounds::default(),
            targets: TargetConfig::default(),
            indicators: StaticIndicators::default(),
        }
    }
}

impl DashboardConfig {
    /// Load from a JSON file. Missing keys fall back to defaults.
    pub fn load(path: &str) -> DashboardResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        log::debug!("config loaded from {path}: seed={} regions={}", config.seed, config.regions.len());
        Ok(config)
    }

    /// Reject anything the generators could not honour.
    pub fn validate(&self) -> DashboardResult<()> {
        let months = calendar::month_range(self.start_month, self.end_month)?;
        validate_region_names(&self.regions)?;
        self.portfolio.validate()?;
        self.portfolio.validate_accumulation(months.len())?;
        self.regional.validate()?;
        if self.targets.credit_target <= 0 {
            return Err(DashboardError::InvalidConfig(
                "targets.credit_target must be positive".into(),
            ));
        }
        if self.targets.top_regions == 0 {
            return Err(DashboardError::InvalidConfig(
                "targets.top_regions must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Config with a small, fixed shape for use in tests.
    pub fn default_test() -> Self {
        Self {
            seed: 7,
            start_month: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default(),
            end_month: NaiveDate::from_ymd_opt(2024, 12, 1).unwrap_or_default(),
            regions: vec!["Alpha".into(), "Beta".into(), "Gamma".into(), "Delta".into()],
            indicators: StaticIndicators {
                interest_subsidy: 10 * BILLION,
                ..StaticIndicators::default()
            },
            ..Self::default()
        }
    }
}

/// Region names must be non-empty and unique.
pub fn validate_region_names(names: &[String]) -> DashboardResult<()> {
    if names.is_empty() {
        return Err(DashboardError::InvalidConfig("at least one region is required".into()));
    }
    let mut seen = HashSet::new();
    for name in names {
        if name.trim().is_empty() {
            return Err(DashboardError::InvalidConfig("region names must not be blank".into()));
        }
        if !seen.insert(name.as_str()) {
            return Err(DashboardError::DuplicateRegion { name: name.clone() });
        }
    }
    Ok(())
}
