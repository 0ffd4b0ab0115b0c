//! Table source trait.
//!
//! RULE: Every table the dashboard shows implements TableSource,
//! whether it is backed by a literal constant or a seeded draw.
//! Presentation code reads rows through this trait and never
//! branches on where the rows came from.

use crate::error::DashboardResult;
use serde::{Deserialize, Serialize};

/// Where a table's rows come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Provenance {
    Constant,
    Seeded { seed: u64 },
}

/// The contract every table provider must fulfill.
pub trait TableSource {
    type Row;

    /// Unique stable name for this table.
    fn name(&self) -> &'static str;

    fn provenance(&self) -> Provenance;

    /// Produce the full table. Calling this twice must yield equal rows.
    fn rows(&self) -> DashboardResult<Vec<Self::Row>>;
}
