//! Generic resource operations against any `RecordStore`.

use crate::config::{MergePolicy, ResourceSchema};
use crate::error::AppError;
use crate::service::{is_truthy, RequestValidator};
use crate::store::{Record, RecordStore};
use serde_json::Value;

/// Effective value of every field for an update, in declared order.
pub fn merge(schema: &ResourceSchema, policy: MergePolicy, current: &Record, input: &Record) -> Vec<Value> {
    schema
        .all_fields()
        .map(|field| {
            let submitted = match policy {
                MergePolicy::Truthy => input.get(field).filter(|v| is_truthy(v)),
                MergePolicy::Presence => input.get(field),
            };
            submitted
                .or_else(|| current.get(field))
                .cloned()
                .unwrap_or(Value::Null)
        })
        .collect()
}

pub struct ResourceService<'a> {
    store: &'a dyn RecordStore,
    schema: &'a ResourceSchema,
    policy: MergePolicy,
}

impl<'a> ResourceService<'a> {
    pub fn new(store: &'a dyn RecordStore, schema: &'a ResourceSchema, policy: MergePolicy) -> Self {
        ResourceService { store, schema, policy }
    }

    pub async fn list(&self) -> Result<Vec<Record>, AppError> {
        self.store.fetch_all(self.schema).await
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Option<Record>, AppError> {
        self.store.fetch_one(self.schema, id).await
    }

    /// Validates before touching the store. Absent optional fields are stored as null.
    pub async fn create(&self, input: &Record) -> Result<Record, AppError> {
        RequestValidator::validate_create(self.schema, input)?;
        let values: Vec<Value> = self
            .schema
            .all_fields()
            .map(|f| input.get(f).cloned().unwrap_or(Value::Null))
            .collect();
        self.store.insert(self.schema, &values).await
    }

    /// Read, merge, then rewrite every field. `None` if the row is missing before or at write time.
    pub async fn update(&self, id: i64, input: &Record) -> Result<Option<Record>, AppError> {
        let Some(current) = self.get_by_id(id).await? else {
            return Ok(None);
        };
        let values = merge(self.schema, self.policy, &current, input);
        self.store.update(self.schema, id, &values).await
    }

    /// Existence check and delete in one conditional statement.
    pub async fn delete_by_id(&self, id: i64) -> Result<Option<Record>, AppError> {
        self.store.delete(self.schema, id).await
    }
}
