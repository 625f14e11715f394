use std::sync::Arc;

use crate::config::AppConfig;
use crate::metrics::Metrics;
use crate::store::UserStore;

/// The shared application state.
///
/// Cloned into every handler and stateful middleware by Axum. All fields are
/// cheap handles over shared data.
#[derive(Clone)]
pub struct AppState {
    /// The user record store.
    pub store: UserStore,
    /// The application configuration.
    pub config: Arc<AppConfig>,
    /// Request and scanner counters.
    pub metrics: Metrics,
}

impl AppState {
    /// Creates a new `AppState` with an empty store and fresh metrics.
    pub fn new(config: AppConfig) -> Self {
        Self { store: UserStore::new(), config: Arc::new(config), metrics: Metrics::new() }
    }
}
