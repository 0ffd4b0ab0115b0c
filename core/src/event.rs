//! Dashboard events.
//!
//! Every state change a command causes is reported as an event.
//! Events carry no behaviour; they are logged and returned to the
//! caller so a front end can show acknowledgements.

use crate::{command::ExportAction, filter::FilterSelection, types::SessionId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DashboardEvent {
    TablesGenerated {
        session: SessionId,
        seed: u64,
        months: usize,
        regions: usize,
    },
    CacheInvalidated {
        session: SessionId,
    },
    FilterChanged {
        session: SessionId,
        selection: FilterSelection,
    },
    ExportRequested {
        session: SessionId,
        action: ExportAction,
        message: String,
    },
}

impl DashboardEvent {
    /// Stable name of the variant, matching its serialized tag.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::TablesGenerated { .. } => "tables_generated",
            Self::CacheInvalidated { .. } => "cache_invalidated",
            Self::FilterChanged { .. } => "filter_changed",
            Self::ExportRequested { .. } => "export_requested",
        }
    }
}
