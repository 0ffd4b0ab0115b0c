//! Snapshot serialization: everything one dashboard render shows.
//!
//! A snapshot is built from a session's cached tables. It holds the
//! KPI cards, every chart's series already scaled for display, and
//! the formatted detail tables, so a front end only has to draw.

use crate::{
    aging::AgingRecord,
    calendar,
    config::DashboardConfig,
    dataset::DashboardData,
    filter::FilterSelection,
    format,
    kpi::{KpiSummary, MetricCard},
    metrics::{
        percentage_share, quarter_rollup, sorted_ascending, top_n, total, PortfolioField,
        RegionalField, RiskClass, SegmentField,
    },
    portfolio::MonthlyPortfolioRecord,
    regional::RegionalRecord,
    seasonal::{HarvestRecord, ProductivityRecord},
    segment::SegmentRecord,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: String,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub name: String,
    pub points: Vec<Point>,
}

impl Series {
    fn new(name: &str, points: Vec<Point>) -> Self {
        Self { name: name.to_string(), points }
    }
}

/// A horizontal threshold or target line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceLine {
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chart {
    pub title: String,
    pub x_title: String,
    pub y_title: String,
    pub series: Vec<Series>,
    pub reference_lines: Vec<ReferenceLine>,
}

impl Chart {
    fn new(title: &str, x_title: &str, y_title: &str) -> Self {
        Self {
            title: title.to_string(),
            x_title: x_title.to_string(),
            y_title: y_title.to_string(),
            series: Vec::new(),
            reference_lines: Vec::new(),
        }
    }

    fn series(mut self, series: Series) -> Self {
        self.series.push(series);
        self
    }

    fn line(mut self, label: String, value: f64) -> Self {
        self.reference_lines.push(ReferenceLine { label, value });
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableView {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl TableView {
    fn new(columns: &[&str]) -> Self {
        Self {
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows: Vec::new(),
        }
    }
}

/// Summary card for one of the top regions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionCard {
    pub region: String,
    pub risk_class: RiskClass,
    pub total_credit: String,
    pub borrowers: String,
    pub npl_rate: String,
    pub land_area: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    pub seed: u64,
    pub months: usize,
    pub filter: FilterSelection,
    pub kpis: Option<KpiSummary>,
    pub metric_cards: Vec<MetricCard>,
    pub outstanding_comparison: Chart,
    pub outstanding_trend: Chart,
    pub quarterly_disbursement: Chart,
    pub npl_trend: Chart,
    pub regional_credit: Chart,
    pub top_regions: Vec<RegionCard>,
    pub regional_table: TableView,
    pub aging: Chart,
    pub collection_trend: Chart,
    pub segment_distribution: Chart,
    pub segment_npl: Chart,
    pub segment_table: TableView,
    pub harvest_alignment: Chart,
    pub productivity_chart: Chart,
    pub productivity: TableView,
}

impl DashboardSnapshot {
    pub fn build(data: &DashboardData, config: &DashboardConfig, filter: &FilterSelection) -> Self {
        let kpis = KpiSummary::compute(&data.portfolio, &data.regional, &config.targets);
        let metric_cards = kpis
            .as_ref()
            .map(|k| k.metric_cards(&config.targets, &config.indicators))
            .unwrap_or_default();

        Self {
            seed: data.seed,
            months: data.portfolio.len(),
            filter: filter.clone(),
            kpis,
            metric_cards,
            outstanding_comparison: outstanding_comparison(&data.portfolio),
            outstanding_trend: outstanding_trend(&data.portfolio, config),
            quarterly_disbursement: quarterly_disbursement(&data.portfolio),
            npl_trend: npl_trend(&data.portfolio, config),
            regional_credit: regional_credit(&data.regional),
            top_regions: top_region_cards(&data.regional, config.targets.top_regions),
            regional_table: regional_table(&data.regional),
            aging: aging_chart(&data.aging),
            collection_trend: collection_trend(&data.portfolio, config),
            segment_distribution: segment_distribution(&data.segments),
            segment_npl: segment_npl(&data.segments, config),
            segment_table: segment_table(&data.segments),
            harvest_alignment: harvest_chart(&data.harvest),
            productivity_chart: productivity_chart(&data.productivity),
            productivity: productivity_table(&data.productivity),
        }
    }
}

// ── Portfolio charts ──────────────────────────────────────────────

fn monthly_points(
    portfolio: &[MonthlyPortfolioRecord],
    value: impl Fn(&MonthlyPortfolioRecord) -> f64,
) -> Vec<Point> {
    portfolio
        .iter()
        .map(|r| Point { x: calendar::month_label(r.month), y: value(r) })
        .collect()
}

fn outstanding_comparison(portfolio: &[MonthlyPortfolioRecord]) -> Chart {
    Chart::new(
        "Grafik Perbandingan KUR vs KUR Khusus (Outstanding)",
        "Bulan",
        "Nilai Kredit (Miliar Rp)",
    )
    .series(Series::new(
        "KUR",
        monthly_points(portfolio, |r| format::to_billions(r.kur_outstanding as f64)),
    ))
    .series(Series::new(
        "KUR Khusus",
        monthly_points(portfolio, |r| format::to_billions(r.kur_khusus_outstanding as f64)),
    ))
}

fn outstanding_trend(portfolio: &[MonthlyPortfolioRecord], config: &DashboardConfig) -> Chart {
    let target = format::to_billions(config.targets.credit_target as f64);
    Chart::new("Grafik Portfolio Kredit Tahunan", "Bulan", "Total Outstanding (Miliar Rp)")
        .series(Series::new(
            "Total Outstanding",
            monthly_points(portfolio, |r| format::to_billions(r.total_outstanding() as f64)),
        ))
        .line(format!("Target: {}", format::rupiah_trillions(config.targets.credit_target)), target)
}

fn quarterly_disbursement(portfolio: &[MonthlyPortfolioRecord]) -> Chart {
    let fields = [PortfolioField::KurDisbursed, PortfolioField::KurKhususDisbursed];
    let quarters = quarter_rollup(portfolio, &fields);
    let points = |field: PortfolioField| -> Vec<Point> {
        quarters
            .iter()
            .map(|q| Point {
                x: q.quarter.clone(),
                y: format::to_billions(q.sum(field).unwrap_or(0.0)),
            })
            .collect()
    };
    Chart::new("Penyaluran Kredit per Kuartal", "Kuartal", "Nilai Penyaluran (Miliar Rp)")
        .series(Series::new("KUR", points(PortfolioField::KurDisbursed)))
        .series(Series::new("KUR Khusus", points(PortfolioField::KurKhususDisbursed)))
}

fn npl_trend(portfolio: &[MonthlyPortfolioRecord], config: &DashboardConfig) -> Chart {
    let targets = &config.targets;
    Chart::new("Trend Non-Performing Loan (NPL)", "Bulan", "NPL Rate (%)")
        .series(Series::new("NPL Rate", monthly_points(portfolio, |r| r.npl_rate)))
        .line(format!("Threshold: {}", format::percent(targets.npl_threshold, 0)), targets.npl_threshold)
        .line(format!("Target: <{}", format::percent(targets.npl_target, 0)), targets.npl_target)
}

fn collection_trend(portfolio: &[MonthlyPortfolioRecord], config: &DashboardConfig) -> Chart {
    let floor = config.targets.collection_floor;
    Chart::new("Trend Collection Rate", "Bulan", "Collection Rate (%)")
        .series(Series::new("Collection Rate", monthly_points(portfolio, |r| r.collection_rate)))
        .line(format!("Minimum Target: {}", format::percent(floor, 0)), floor)
}

// ── Regional ──────────────────────────────────────────────────────

fn regional_credit(regional: &[RegionalRecord]) -> Chart {
    let ascending = sorted_ascending(regional, RegionalField::TotalCredit);
    let credit: Vec<Point> = ascending
        .iter()
        .map(|r| Point { x: r.region.clone(), y: r.total_credit as f64 })
        .collect();
    let npl: Vec<Point> = ascending
        .iter()
        .map(|r| Point { x: r.region.clone(), y: r.npl_rate })
        .collect();
    Chart::new("Distribusi Kredit dan NPL per Region", "Total Kredit (Rp)", "Region")
        .series(Series::new("Total Kredit", credit))
        .series(Series::new("NPL Rate", npl))
}

fn top_region_cards(regional: &[RegionalRecord], n: usize) -> Vec<RegionCard> {
    top_n(regional, RegionalField::TotalCredit, n)
        .into_iter()
        .map(|r| RegionCard {
            region: r.region.clone(),
            risk_class: r.risk_class(),
            total_credit: format::rupiah_billions(r.total_credit, 2),
            borrowers: format!("{} petani", format::thousands(r.borrower_count)),
            npl_rate: format::percent(r.npl_rate, 2),
            land_area: format!("{} Ha", format::thousands(r.land_area_hectares)),
        })
        .collect()
}

fn regional_table(regional: &[RegionalRecord]) -> TableView {
    let mut table = TableView::new(&[
        "Region",
        "Total Kredit",
        "Jumlah Debitur",
        "NPL Rate",
        "Luas Lahan",
        "Rata² Kredit/Petani",
    ]);
    for r in regional {
        table.rows.push(vec![
            r.region.clone(),
            format::rupiah_billions(r.total_credit, 2),
            r.borrower_count.to_string(),
            format::percent(r.npl_rate, 2),
            format!("{} Ha", format::thousands(r.land_area_hectares)),
            format::or_na(r.average_credit().value(), format::rupiah_millions),
        ]);
    }
    table
}

// ── Risk ──────────────────────────────────────────────────────────

fn aging_chart(aging: &[AgingRecord]) -> Chart {
    let points = |value: fn(&AgingRecord) -> f64| -> Vec<Point> {
        aging
            .iter()
            .map(|r| Point { x: r.bucket.label().to_string(), y: format::to_billions(value(r)) })
            .collect()
    };
    Chart::new("Aging Analysis - Kualitas Kredit", "Kategori Kolektibilitas", "Nilai Kredit (Miliar Rp)")
        .series(Series::new("KUR", points(|r| r.kur_amount as f64)))
        .series(Series::new("KUR Khusus", points(|r| r.kur_khusus_amount as f64)))
}

// ── Segments ──────────────────────────────────────────────────────

fn segment_distribution(segments: &[SegmentRecord]) -> Chart {
    let whole = total(segments, SegmentField::Count);
    if whole == 0.0 {
        log::warn!("segments: total debtor count is zero, shares shown as 0");
    }
    let shares: Vec<Point> = segments
        .iter()
        .map(|s| Point {
            x: s.segment.label().to_string(),
            y: percentage_share(s.count as f64, whole).unwrap_or(0.0),
        })
        .collect();
    Chart::new("Distribusi Debitur per Segmen", "Segmen", "Porsi Debitur (%)")
        .series(Series::new("Jumlah", shares))
}

fn segment_npl(segments: &[SegmentRecord], config: &DashboardConfig) -> Chart {
    let target = config.targets.npl_target;
    let points: Vec<Point> = sorted_ascending(segments, SegmentField::NplRate)
        .into_iter()
        .map(|s| Point { x: s.segment.label().to_string(), y: s.npl_rate })
        .collect();
    Chart::new("NPL Rate per Segmen Debitur", "Segmen", "NPL Rate (%)")
        .series(Series::new("NPL Rate", points))
        .line(format!("Target NPL: {}", format::percent(target, 0)), target)
}

fn segment_table(segments: &[SegmentRecord]) -> TableView {
    let mut table = TableView::new(&[
        "Segmen Debitur",
        "Jumlah Debitur",
        "Total Kredit",
        "NPL Rate",
        "Rata² Kredit",
    ]);
    for s in segments {
        table.rows.push(vec![
            s.segment.label().to_string(),
            s.count.to_string(),
            format::rupiah_billions(s.total_credit, 2),
            format::percent(s.npl_rate, 2),
            format::or_na(s.average_credit().value(), format::rupiah_millions),
        ]);
    }
    table
}

// ── Agricultural ──────────────────────────────────────────────────

fn harvest_chart(harvest: &[HarvestRecord]) -> Chart {
    let points = |value: fn(&HarvestRecord) -> f64| -> Vec<Point> {
        harvest
            .iter()
            .map(|r| Point { x: r.month.clone(), y: value(r) })
            .collect()
    };
    Chart::new(
        "Alignment Musim Panen vs Pembayaran Kredit",
        "Bulan",
        "Persentase dari Total Tahunan (%)",
    )
    .series(Series::new("Perkiraan Panen (%)", points(|r| r.expected_harvest)))
    .series(Series::new("Pembayaran Aktual (%)", points(|r| r.actual_repayment)))
    .series(Series::new("Selisih (%)", points(HarvestRecord::gap)))
}

fn productivity_chart(productivity: &[ProductivityRecord]) -> Chart {
    let points = |value: fn(&ProductivityRecord) -> f64| -> Vec<Point> {
        productivity
            .iter()
            .map(|p| Point { x: p.band.clone(), y: value(p) })
            .collect()
    };
    Chart::new("Produktivitas Lahan vs Kinerja Kredit", "Tingkat Produktivitas", "Jumlah Petani")
        .series(Series::new("Jumlah Petani", points(|p| p.farmer_count as f64)))
        .series(Series::new("NPL Rate", points(|p| p.npl_rate)))
}

fn productivity_table(productivity: &[ProductivityRecord]) -> TableView {
    let mut table = TableView::new(&["Produktivitas", "Jumlah Petani", "NPL Rate", "Rata² Kredit"]);
    for p in productivity {
        table.rows.push(vec![
            p.band.clone(),
            format::thousands(p.farmer_count),
            format::percent(p.npl_rate, 1),
            format::rupiah_millions(p.avg_loan as f64),
        ]);
    }
    table
}
