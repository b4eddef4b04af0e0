//! Shared application state for all routes.

use crate::config::{ResourceRegistry, Settings, StoreKind};
use crate::store::{ConnectionProvider, MemoryStore, PgStore, RecordStore};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RecordStore>,
    pub registry: Arc<ResourceRegistry>,
    pub settings: Arc<Settings>,
}

impl AppState {
    pub fn new(store: Arc<dyn RecordStore>, registry: ResourceRegistry, settings: Settings) -> Self {
        AppState {
            store,
            registry: Arc::new(registry),
            settings: Arc::new(settings),
        }
    }

    /// State backed by the store `settings.store` selects.
    pub fn from_settings(registry: ResourceRegistry, settings: Settings) -> Self {
        match settings.store {
            StoreKind::Postgres => Self::with_postgres(registry, settings),
            StoreKind::Memory => {
                tracing::warn!("STORE=memory: records live in process memory only");
                Self::new(Arc::new(MemoryStore::new()), registry, settings)
            }
        }
    }

    /// State backed by PostgreSQL. The pool is built on the first query, not here.
    pub fn with_postgres(registry: ResourceRegistry, settings: Settings) -> Self {
        let provider = Arc::new(ConnectionProvider::new(settings.database.clone()));
        Self::new(Arc::new(PgStore::new(provider)), registry, settings)
    }
}
