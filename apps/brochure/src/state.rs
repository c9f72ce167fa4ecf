use std::sync::Arc;

use crate::config::Config;
use crate::layout::FontMetrics;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Pluggable metrics provider. Default: StandardHelvetica (AFM tables).
    /// Shared across concurrent layouts, so it must be stateless.
    pub metrics: Arc<dyn FontMetrics>,
}
