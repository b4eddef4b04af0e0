//! Store seam: the resource service talks to `RecordStore`, never to a pool directly.

mod memory;
mod postgres;
mod provider;

pub use memory::MemoryStore;
pub use postgres::PgStore;
pub use provider::ConnectionProvider;

use crate::config::ResourceSchema;
use crate::error::AppError;
use async_trait::async_trait;
use serde_json::{Map, Value};

/// One row of a resource table, keyed by column name.
pub type Record = Map<String, Value>;

#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn fetch_all(&self, schema: &ResourceSchema) -> Result<Vec<Record>, AppError>;

    async fn fetch_one(&self, schema: &ResourceSchema, id: i64) -> Result<Option<Record>, AppError>;

    /// Insert one row; `values` follow `schema.fields` order. Returns the stored row.
    async fn insert(&self, schema: &ResourceSchema, values: &[Value]) -> Result<Record, AppError>;

    /// Rewrite every field of one row. `None` when no row has that id.
    async fn update(
        &self,
        schema: &ResourceSchema,
        id: i64,
        values: &[Value],
    ) -> Result<Option<Record>, AppError>;

    /// Delete one row. `None` when no row has that id.
    async fn delete(&self, schema: &ResourceSchema, id: i64) -> Result<Option<Record>, AppError>;

    /// Trivial liveness query.
    async fn ping(&self) -> Result<(), AppError>;
}
