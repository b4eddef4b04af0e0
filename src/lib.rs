//! Questões API: REST resources (usuarios, questoes) over PostgreSQL.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod response;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;

pub use config::{validate, MergePolicy, StoreKind, ResourceRegistry, ResourceSchema, Settings, QUESTOES, USUARIOS};
pub use error::{AppError, ConfigError};
pub use routes::{app, common_routes, resource_routes};
pub use service::ResourceService;
pub use state::AppState;
pub use store::{ConnectionProvider, MemoryStore, PgStore, Record, RecordStore};
