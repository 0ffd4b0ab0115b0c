use crate::filter::FilterSelection;
use serde::{Deserialize, Serialize};

/// All user-issued dashboard actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum DashboardCommand {
    // ── Data lifecycle ────────────────────────────
    Refresh,

    // ── Selectors ─────────────────────────────────
    SetFilter { selection: FilterSelection },

    // ── Export stubs (acknowledge only) ───────────
    ExportSpreadsheet,
    GeneratePdfSummary,
    EmailManagement,
    ConfigureAlertRules,
}

impl DashboardCommand {
    pub fn export_action(&self) -> Option<ExportAction> {
        match self {
            Self::ExportSpreadsheet => Some(ExportAction::Spreadsheet),
            Self::GeneratePdfSummary => Some(ExportAction::PdfSummary),
            Self::EmailManagement => Some(ExportAction::EmailManagement),
            Self::ConfigureAlertRules => Some(ExportAction::AlertRules),
            Self::Refresh | Self::SetFilter { .. } => None,
        }
    }
}

/// The stubbed outward actions. None of them perform I/O.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportAction {
    Spreadsheet,
    PdfSummary,
    EmailManagement,
    AlertRules,
}

impl ExportAction {
    pub fn acknowledgement(&self) -> &'static str {
        match self {
            Self::Spreadsheet => "Report exported successfully!",
            Self::PdfSummary => "PDF generated successfully!",
            Self::EmailManagement => "Email sent successfully!",
            Self::AlertRules => "Alert rules configuration opened!",
        }
    }
}
