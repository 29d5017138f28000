use std::sync::Arc;

use crate::clock::Clock;
use crate::config::Config;
use crate::store::PlacementStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Entity store behind a trait so the core stays testable without
    /// Postgres. Production wires in `PgStore`.
    pub store: Arc<dyn PlacementStore>,
    /// Clock seam for deadline comparisons.
    pub clock: Arc<dyn Clock>,
    pub config: Config,
}
