//! Synthetic monitoring model for a sugarcane-farmer KUR loan portfolio.
//!
//! The crate generates the dashboard's tables from a fixed seed, caches
//! them per session, and derives every KPI, chart series and formatted
//! table a front end needs to draw the page.

pub mod aging;
pub mod cache;
pub mod calendar;
pub mod command;
pub mod config;
pub mod dashboard;
pub mod dataset;
pub mod error;
pub mod event;
pub mod filter;
pub mod format;
pub mod kpi;
pub mod metrics;
pub mod portfolio;
pub mod regional;
pub mod rng;
pub mod seasonal;
pub mod segment;
pub mod snapshot;
pub mod table;
pub mod types;
