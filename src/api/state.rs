//! Application state - Dependency injection container.

use std::sync::Arc;

use crate::config::Config;
use crate::infra::{Database, DiskStorage};
use crate::services::{ServiceContainer, Services};

/// Shared by every handler and guard; immutable after startup.
#[derive(Clone)]
pub struct AppState {
    pub services: Arc<dyn ServiceContainer>,
    pub config: Arc<Config>,
    /// Absent when the router runs over non-database persistence
    pub database: Option<Arc<Database>>,
}

impl AppState {
    /// Wire services over the database and on-disk avatar storage.
    pub fn from_config(database: Arc<Database>, config: Config) -> Self {
        let storage = Arc::new(DiskStorage::from_config(&config));
        let services = Arc::new(Services::from_connection(
            database.get_connection(),
            &config,
            storage,
        ));

        Self {
            services,
            config: Arc::new(config),
            database: Some(database),
        }
    }

    /// Create application state with manually injected services.
    pub fn new(services: Arc<dyn ServiceContainer>, config: Config) -> Self {
        Self {
            services,
            config: Arc::new(config),
            database: None,
        }
    }
}
