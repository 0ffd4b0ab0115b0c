//! Dashboard selector state.
//!
//! The selectors are recorded per session and echoed back in every
//! snapshot, but they do not narrow the generated tables. Callers
//! that want a narrowed view apply `filter_rows` themselves.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoanType {
    #[default]
    All,
    Kur,
    KurKhusus,
}

impl LoanType {
    pub fn label(&self) -> &'static str {
        match self {
            Self::All => "Semua",
            Self::Kur => "KUR",
            Self::KurKhusus => "KUR Khusus",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlantingSeason {
    #[default]
    All,
    First,
    Second,
}

impl PlantingSeason {
    pub fn label(&self) -> &'static str {
        match self {
            Self::All => "Semua",
            Self::First => "Musim Tanam 1",
            Self::Second => "Musim Tanam 2",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Bank {
    #[default]
    All,
    Bri,
    Bni,
    Mandiri,
    Btn,
}

impl Bank {
    pub fn label(&self) -> &'static str {
        match self {
            Self::All => "Semua Bank",
            Self::Bri => "BRI",
            Self::Bni => "BNI",
            Self::Mandiri => "Mandiri",
            Self::Btn => "BTN",
        }
    }
}

pub const ALL_REGIONS_LABEL: &str = "Semua Region";

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSelection {
    /// Reporting period picked in the date control.
    pub period: Option<NaiveDate>,
    /// `None` means every region.
    pub region: Option<String>,
    pub loan_type: LoanType,
    pub planting_season: PlantingSeason,
    pub bank: Bank,
}

impl FilterSelection {
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    pub fn describe(&self) -> String {
        format!(
            "periode={} region={} jenis={} musim={} bank={}",
            self.period.map(|p| p.to_string()).unwrap_or_else(|| "-".into()),
            self.region.as_deref().unwrap_or(ALL_REGIONS_LABEL),
            self.loan_type.label(),
            self.planting_season.label(),
            self.bank.label(),
        )
    }
}

/// Region selector options: the "all" entry followed by each region.
pub fn region_options<'a>(names: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    std::iter::once(ALL_REGIONS_LABEL.to_string())
        .chain(names.into_iter().map(str::to_string))
        .collect()
}

/// Rows matching `predicate`, in their original order.
pub fn filter_rows<R: Clone>(rows: &[R], predicate: impl Fn(&R) -> bool) -> Vec<R> {
    rows.iter().filter(|r| predicate(r)).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_selection_is_all() {
        let selection = FilterSelection::default();
        assert!(selection.is_default());
        assert_eq!(
            selection.describe(),
            "periode=- region=Semua Region jenis=Semua musim=Semua bank=Semua Bank"
        );
    }

    #[test]
    fn filter_rows_keeps_order() {
        let rows = vec![5, 1, 8, 2, 9];
        assert_eq!(filter_rows(&rows, |r| *r > 4), vec![5, 8, 9]);
        assert!(filter_rows(&rows, |_| false).is_empty());
    }

    #[test]
    fn region_options_start_with_all() {
        let options = region_options(["Lampung", "Jawa Timur"]);
        assert_eq!(options, vec!["Semua Region", "Lampung", "Jawa Timur"]);
    }

    #[test]
    fn selection_deserializes_partially() {
        let selection: FilterSelection =
            serde_json::from_str(r#"{ "bank": "bri", "loan_type": "kur_khusus" }"#).unwrap();
        assert_eq!(selection.bank, Bank::Bri);
        assert_eq!(selection.loan_type, LoanType::KurKhusus);
        assert_eq!(selection.region, None);
    }
}
