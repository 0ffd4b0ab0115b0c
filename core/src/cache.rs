//! Per-session table cache.
//!
//! Tables are generated lazily on first read and kept until the
//! session is invalidated. Invalidation drops the whole table set;
//! the next read regenerates it from the same config. Because
//! generation is deterministic, a regenerated set equals the one
//! it replaces.

use crate::{
    config::DashboardConfig,
    dataset::DashboardData,
    error::DashboardResult,
    types::SessionId,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Default)]
struct CacheState {
    entries: HashMap<SessionId, Arc<DashboardData>>,
    generations: u64,
}

pub struct SessionCache {
    config: DashboardConfig,
    state: Mutex<CacheState>,
}

impl SessionCache {
    /// Validates `config` up front so a bad config never reaches a render.
    pub fn new(config: DashboardConfig) -> DashboardResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            state: Mutex::new(CacheState::default()),
        })
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// Cached tables for `session`, generating them if absent.
    pub fn get_or_generate(&self, session: &str) -> DashboardResult<Arc<DashboardData>> {
        let mut state = self.lock();
        if let Some(data) = state.entries.get(session) {
            log::trace!("cache hit: session={session}");
            return Ok(Arc::clone(data));
        }

        let data = Arc::new(DashboardData::generate(&self.config)?);
        state.generations += 1;
        state.entries.insert(session.to_string(), Arc::clone(&data));
        log::debug!(
            "cache miss: session={session} generated tables (generation {})",
            state.generations
        );
        Ok(data)
    }

    /// Drop the cached tables for one session. Returns whether anything was cached.
    pub fn invalidate(&self, session: &str) -> bool {
        let removed = self.lock().entries.remove(session).is_some();
        log::debug!("cache invalidate: session={session} removed={removed}");
        removed
    }

    /// Drop every session's tables. Returns how many were dropped.
    pub fn invalidate_all(&self) -> usize {
        let mut state = self.lock();
        let dropped = state.entries.len();
        state.entries.clear();
        log::debug!("cache invalidate_all: dropped={dropped}");
        dropped
    }

    pub fn is_cached(&self, session: &str) -> bool {
        self.lock().entries.contains_key(session)
    }

    /// Number of full generation passes run so far.
    pub fn generations(&self) -> u64 {
        self.lock().generations
    }

    // A poisoned lock only means a generation panicked; the map is still consistent.
    fn lock(&self) -> MutexGuard<'_, CacheState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
