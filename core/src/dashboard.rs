//! The dashboard facade, the one entry point a front end talks to.
//!
//! RULES:
//!   - Tables are read only through the SessionCache.
//!   - Refresh invalidates and regenerates before returning, so the
//!     next render never sees a half-built table set.
//!   - Export commands acknowledge and log; they never touch I/O.
//!   - Every command's effects are recorded in the event log.

use crate::{
    cache::SessionCache,
    command::DashboardCommand,
    config::DashboardConfig,
    dataset::DashboardData,
    error::DashboardResult,
    event::DashboardEvent,
    filter::FilterSelection,
    regional::find_region,
    snapshot::DashboardSnapshot,
    types::SessionId,
};
use std::collections::HashMap;
use std::sync::Arc;

pub struct Dashboard {
    cache: Arc<SessionCache>,
    filters: HashMap<SessionId, FilterSelection>,
    event_log: Vec<DashboardEvent>,
}

impl Dashboard {
    /// Build a dashboard with its own cache. Fails fast on a bad config.
    pub fn new(config: DashboardConfig) -> DashboardResult<Self> {
        Ok(Self::with_cache(Arc::new(SessionCache::new(config)?)))
    }

    /// Build a dashboard over a cache shared with other dashboards.
    pub fn with_cache(cache: Arc<SessionCache>) -> Self {
        Self {
            cache,
            filters: HashMap::new(),
            event_log: Vec::new(),
        }
    }

    /// Dashboard over `DashboardConfig::default_test()`.
    pub fn build_test() -> DashboardResult<Self> {
        Self::new(DashboardConfig::default_test())
    }

    pub fn config(&self) -> &DashboardConfig {
        self.cache.config()
    }

    pub fn cache(&self) -> &Arc<SessionCache> {
        &self.cache
    }

    /// The session's tables, generating them on first read.
    pub fn data(&mut self, session: &str) -> DashboardResult<Arc<DashboardData>> {
        let before = self.cache.generations();
        let data = self.cache.get_or_generate(session)?;
        if self.cache.generations() != before {
            self.record(tables_generated(session, &data));
        }
        Ok(data)
    }

    /// Current selector state for the session.
    pub fn filter(&self, session: &str) -> FilterSelection {
        self.filters.get(session).cloned().unwrap_or_default()
    }

    /// Build everything the page shows for one session.
    pub fn render(&mut self, session: &str) -> DashboardResult<DashboardSnapshot> {
        let data = self.data(session)?;
        let filter = self.filter(session);
        Ok(DashboardSnapshot::build(&data, self.config(), &filter))
    }

    /// Apply one command. Returns the events it produced.
    pub fn submit_command(
        &mut self,
        session: &str,
        command: DashboardCommand,
    ) -> DashboardResult<Vec<DashboardEvent>> {
        let start = self.event_log.len();

        match command {
            DashboardCommand::Refresh => {
                log::info!("session={session} refresh requested");
                self.cache.invalidate(session);
                self.record(DashboardEvent::CacheInvalidated { session: session.to_string() });
                self.data(session)?;
            }
            DashboardCommand::SetFilter { selection } => {
                if let Some(region) = selection.region.as_deref() {
                    let data = self.data(session)?;
                    if find_region(&data.regional, region).is_none() {
                        log::warn!("session={session} filter names unknown region '{region}'");
                    }
                }
                log::debug!("session={session} filter: {}", selection.describe());
                self.filters.insert(session.to_string(), selection.clone());
                self.record(DashboardEvent::FilterChanged {
                    session: session.to_string(),
                    selection,
                });
            }
            other => {
                if let Some(action) = other.export_action() {
                    let message = action.acknowledgement().to_string();
                    log::info!("session={session} export requested: {action:?}");
                    self.record(DashboardEvent::ExportRequested {
                        session: session.to_string(),
                        action,
                        message,
                    });
                }
            }
        }

        Ok(self.event_log[start..].to_vec())
    }

    /// Every event recorded so far, oldest first.
    pub fn events(&self) -> &[DashboardEvent] {
        &self.event_log
    }

    /// Allocate a fresh session id. Tables are generated on first read.
    pub fn open_session(&self) -> SessionId {
        let session = uuid::Uuid::new_v4().to_string();
        log::debug!("session={session} opened");
        session
    }

    /// Forget a session's tables and selectors.
    pub fn close_session(&mut self, session: &str) {
        self.cache.invalidate(session);
        self.filters.remove(session);
        log::debug!("session={session} closed");
    }

    fn record(&mut self, event: DashboardEvent) {
        log::debug!("event {}: {}", event.kind(), serde_json::to_string(&event).unwrap_or_default());
        self.event_log.push(event);
    }
}

fn tables_generated(session: &str, data: &DashboardData) -> DashboardEvent {
    DashboardEvent::TablesGenerated {
        session: session.to_string(),
        seed: data.seed,
        months: data.portfolio.len(),
        regions: data.regional.len(),
    }
}
