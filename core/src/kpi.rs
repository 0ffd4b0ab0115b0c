//! Headline KPIs shown at the top of the dashboard.
//!
//! Month-over-month figures compare the last two monthly records.
//! With a single month there is nothing to compare against and the
//! deltas are left empty.

use crate::{
    config::{StaticIndicators, TargetConfig},
    format,
    metrics::{delta, latest_pair, percentage_share, safe_ratio, total, PortfolioField, RegionalField},
    portfolio::MonthlyPortfolioRecord,
    regional::RegionalRecord,
    types::{Percent, Rupiah},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiSummary {
    pub total_outstanding: Rupiah,
    pub total_outstanding_delta: Option<f64>,
    pub total_disbursed: Rupiah,
    pub total_disbursed_delta: Option<f64>,
    /// Total outstanding as a percentage of the credit target.
    pub target_achievement: Option<Percent>,
    pub npl_rate: Percent,
    pub npl_rate_delta: Option<Percent>,
    pub collection_rate: Percent,
    pub collection_rate_delta: Option<Percent>,
    pub active_debtors: i64,
    /// Latest total outstanding over active debtors.
    pub avg_credit_per_farmer: Option<f64>,
    pub total_land_hectares: i64,
}

impl KpiSummary {
    /// `None` only when the portfolio series is empty.
    pub fn compute(
        portfolio: &[MonthlyPortfolioRecord],
        regional: &[RegionalRecord],
        targets: &TargetConfig,
    ) -> Option<Self> {
        let latest = portfolio.last()?;
        let pair = latest_pair(portfolio);
        let month_delta =
            |field: PortfolioField| pair.map(|(latest, previous)| delta(latest, previous, field));

        let total_outstanding = latest.total_outstanding();
        let active_debtors = total(regional, RegionalField::BorrowerCount) as i64;
        let avg_credit_per_farmer = safe_ratio(total_outstanding as f64, active_debtors as f64);
        if avg_credit_per_farmer.is_none() {
            log::warn!("kpi: active debtor count is zero, average credit per farmer unavailable");
        }

        Some(Self {
            total_outstanding,
            total_outstanding_delta: month_delta(PortfolioField::TotalOutstanding),
            total_disbursed: latest.total_disbursed(),
            total_disbursed_delta: month_delta(PortfolioField::TotalDisbursed),
            target_achievement: percentage_share(
                total_outstanding as f64,
                targets.credit_target as f64,
            ),
            npl_rate: latest.npl_rate,
            npl_rate_delta: month_delta(PortfolioField::NplRate),
            collection_rate: latest.collection_rate,
            collection_rate_delta: month_delta(PortfolioField::CollectionRate),
            active_debtors,
            avg_credit_per_farmer,
            total_land_hectares: total(regional, RegionalField::LandAreaHectares) as i64,
        })
    }

    /// Achievement relative to the configured baseline.
    pub fn target_achievement_delta(&self, targets: &TargetConfig) -> Option<Percent> {
        self.target_achievement.map(|a| a - targets.achievement_baseline)
    }

    /// Formatted cards: the six headline KPIs, then the six secondary ones.
    pub fn metric_cards(&self, targets: &TargetConfig, indicators: &StaticIndicators) -> Vec<MetricCard> {
        vec![
            MetricCard::new("Total Kredit Berjalan", format::rupiah_billions(self.total_outstanding, 2))
                .with_delta(self.total_outstanding_delta.map(format::billions_delta)),
            MetricCard::new("Total Kredit Selesai", format::rupiah_billions(self.total_disbursed, 2))
                .with_delta(self.total_disbursed_delta.map(format::billions_delta)),
            MetricCard::new("Pencapaian Target", format::or_na(self.target_achievement, |v| format::percent(v, 1)))
                .with_delta(self.target_achievement_delta(targets).map(|d| format::percent(d, 1))),
            MetricCard::new("NPL Rate", format::percent(self.npl_rate, 2))
                .with_delta(self.npl_rate_delta.map(|d| format::percent(d, 2)))
                .inverse(),
            MetricCard::new("Collection Rate", format::percent(self.collection_rate, 1))
                .with_delta(self.collection_rate_delta.map(|d| format::percent(d, 1))),
            MetricCard::new("Jumlah Debitur Aktif", format::thousands(self.active_debtors))
                .with_delta(Some(targets.active_debtor_delta.clone())),
            MetricCard::new("Rata² Kredit/Petani", format::or_na(self.avg_credit_per_farmer, format::rupiah_millions)),
            MetricCard::new("Total Lahan (Ha)", format::thousands(self.total_land_hectares)),
            MetricCard::new("Restrukturisasi", format::percent(indicators.restructured_rate, 1)),
            MetricCard::new("Tingkat Utilisasi", format::percent(indicators.utilization_rate, 1)),
            MetricCard::new("Collateral Coverage", format::percent(indicators.collateral_coverage, 0)),
            MetricCard::new("Subsidi Bunga", format::rupiah_billions(indicators.interest_subsidy, 1)),
        ]
    }
}

/// Whether a rising value is good or bad news.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeltaDirection {
    Normal,
    Inverse,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricCard {
    pub label: String,
    pub value: String,
    pub delta: Option<String>,
    pub direction: DeltaDirection,
}

impl MetricCard {
    pub fn new(label: &str, value: String) -> Self {
        Self {
            label: label.to_string(),
            value,
            delta: None,
            direction: DeltaDirection::Normal,
        }
    }

    pub fn with_delta(mut self, delta: Option<String>) -> Self {
        self.delta = delta;
        self
    }

    pub fn inverse(mut self) -> Self {
        self.direction = DeltaDirection::Inverse;
        self
    }
}
