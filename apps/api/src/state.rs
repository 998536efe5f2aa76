use crate::config::Config;
use crate::layout::PageGeometry;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Page geometry used by the planner and renderers. A4 portrait by default.
    pub geometry: PageGeometry,
}
