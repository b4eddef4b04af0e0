//! In-process store with serial ids. Stands in for PostgreSQL in tests and local runs.

use crate::config::ResourceSchema;
use crate::error::AppError;
use crate::store::{Record, RecordStore};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

#[derive(Default)]
struct Table {
    next_id: i64,
    rows: BTreeMap<i64, Record>,
}

#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<HashMap<&'static str, Table>>,
    calls: AtomicUsize,
    writes: AtomicUsize,
    failure: Mutex<Option<String>>,
    latency: Mutex<Option<Duration>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of store operations issued so far (reads and writes).
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Number of insert/update/delete operations issued so far.
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Make every following operation fail with `message`, like an unreachable database.
    pub fn fail_with(&self, message: impl Into<String>) {
        *self.lock_failure() = Some(message.into());
    }

    /// Delay every following operation by `latency`, like a slow or hung database.
    pub fn delay_by(&self, latency: Duration) {
        *self.latency.lock().unwrap_or_else(|e| e.into_inner()) = Some(latency);
    }

    fn lock_failure(&self) -> std::sync::MutexGuard<'_, Option<String>> {
        self.failure.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn lock_tables(&self) -> std::sync::MutexGuard<'_, HashMap<&'static str, Table>> {
        self.tables.lock().unwrap_or_else(|e| e.into_inner())
    }

    async fn enter(&self, write: bool) -> Result<(), AppError> {
        let latency = *self.latency.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }
        self.calls.fetch_add(1, Ordering::SeqCst);
        if write {
            self.writes.fetch_add(1, Ordering::SeqCst);
        }
        match self.lock_failure().as_ref() {
            Some(message) => Err(AppError::Db(sqlx::Error::Protocol(message.clone()))),
            None => Ok(()),
        }
    }

    fn fill(schema: &ResourceSchema, record: &mut Record, values: &[Value]) {
        for (i, field) in schema.fields.iter().enumerate() {
            record.insert(field.name.to_string(), values.get(i).cloned().unwrap_or(Value::Null));
        }
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn fetch_all(&self, schema: &ResourceSchema) -> Result<Vec<Record>, AppError> {
        self.enter(false).await?;
        let tables = self.lock_tables();
        Ok(tables
            .get(schema.table_name)
            .map(|t| t.rows.values().cloned().collect())
            .unwrap_or_default())
    }

    async fn fetch_one(&self, schema: &ResourceSchema, id: i64) -> Result<Option<Record>, AppError> {
        self.enter(false).await?;
        let tables = self.lock_tables();
        Ok(tables.get(schema.table_name).and_then(|t| t.rows.get(&id).cloned()))
    }

    async fn insert(&self, schema: &ResourceSchema, values: &[Value]) -> Result<Record, AppError> {
        self.enter(true).await?;
        let mut tables = self.lock_tables();
        let table = tables.entry(schema.table_name).or_default();
        table.next_id += 1;
        let id = table.next_id;
        let mut record = Record::new();
        record.insert(schema.primary_key.to_string(), Value::from(id));
        Self::fill(schema, &mut record, values);
        table.rows.insert(id, record.clone());
        Ok(record)
    }

    async fn update(
        &self,
        schema: &ResourceSchema,
        id: i64,
        values: &[Value],
    ) -> Result<Option<Record>, AppError> {
        self.enter(true).await?;
        let mut tables = self.lock_tables();
        let Some(record) = tables
            .get_mut(schema.table_name)
            .and_then(|t| t.rows.get_mut(&id))
        else {
            return Ok(None);
        };
        Self::fill(schema, record, values);
        Ok(Some(record.clone()))
    }

    async fn delete(&self, schema: &ResourceSchema, id: i64) -> Result<Option<Record>, AppError> {
        self.enter(true).await?;
        let mut tables = self.lock_tables();
        Ok(tables.get_mut(schema.table_name).and_then(|t| t.rows.remove(&id)))
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.enter(false).await
    }
}
