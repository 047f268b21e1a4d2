//! Application state management.
//!
//! The state is built once at start-up and cloned into routers (cheap Arc clones):
//! - Configuration
//! - The in-memory catalog read model

use domain_catalog::InMemoryCatalog;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: crate::config::Config,
    /// Catalog snapshot serving all three read repositories
    pub catalog: InMemoryCatalog,
}
