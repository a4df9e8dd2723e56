//! Application state for the HTTP server.

use std::sync::Arc;

use crate::config::AppConfig;
use crate::data::TableProvider;
use crate::models::Clock;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Source of table snapshots. Handlers grab one snapshot per request;
    /// the concrete store behind the trait decides when new data appears.
    pub provider: Arc<dyn TableProvider>,
    /// Application + engine configuration.
    pub config: Arc<AppConfig>,
    /// Source of "now" for default as-of resolution.
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    pub fn new(
        provider: Arc<dyn TableProvider>,
        config: Arc<AppConfig>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            provider,
            config,
            clock,
        }
    }
}
