//! Shared primitive types used across the monitoring model.

/// An amount in whole Rupiah.
pub type Rupiah = i64;

/// A percentage on the 0..100 scale.
pub type Percent = f64;

/// Identifies one dashboard session in the table cache.
pub type SessionId = String;

pub const MILLION: Rupiah = 1_000_000;
pub const BILLION: Rupiah = 1_000_000_000;
pub const TRILLION: Rupiah = 1_000_000_000_000;
