//! PostgreSQL store: schema-driven SQL through the lazily built pool.

use crate::config::ResourceSchema;
use crate::error::AppError;
use crate::sql::{self, PgBindValue};
use crate::store::{ConnectionProvider, Record, RecordStore};
use async_trait::async_trait;
use serde_json::Value;
use sqlx::postgres::PgArguments;
use sqlx::query::Query;
use sqlx::Postgres;
use std::sync::Arc;

pub struct PgStore {
    provider: Arc<ConnectionProvider>,
}

impl PgStore {
    pub fn new(provider: Arc<ConnectionProvider>) -> Self {
        PgStore { provider }
    }

    fn bind_values<'q>(
        mut query: Query<'q, Postgres, PgArguments>,
        params: &[Value],
    ) -> Query<'q, Postgres, PgArguments> {
        for p in params {
            query = query.bind(PgBindValue::from_json(p));
        }
        query
    }
}

#[async_trait]
impl RecordStore for PgStore {
    async fn fetch_all(&self, schema: &ResourceSchema) -> Result<Vec<Record>, AppError> {
        let q = sql::select_all(schema);
        tracing::debug!(sql = %q.sql, "query");
        let pool = self.provider.get().await?;
        let rows = sqlx::query(&q.sql).fetch_all(pool).await?;
        Ok(rows.iter().map(row_to_record).collect())
    }

    async fn fetch_one(&self, schema: &ResourceSchema, id: i64) -> Result<Option<Record>, AppError> {
        let q = sql::select_by_id(schema);
        tracing::debug!(sql = %q.sql, id, "query");
        let pool = self.provider.get().await?;
        let row = sqlx::query(&q.sql).bind(id).fetch_optional(pool).await?;
        Ok(row.map(|r| row_to_record(&r)))
    }

    async fn insert(&self, schema: &ResourceSchema, values: &[Value]) -> Result<Record, AppError> {
        let q = sql::insert(schema, values);
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let pool = self.provider.get().await?;
        let row = Self::bind_values(sqlx::query(&q.sql), &q.params)
            .fetch_one(pool)
            .await?;
        Ok(row_to_record(&row))
    }

    async fn update(
        &self,
        schema: &ResourceSchema,
        id: i64,
        values: &[Value],
    ) -> Result<Option<Record>, AppError> {
        let q = sql::update(schema, values);
        tracing::debug!(sql = %q.sql, params = ?q.params, id, "query");
        let pool = self.provider.get().await?;
        let row = Self::bind_values(sqlx::query(&q.sql), &q.params)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(|r| row_to_record(&r)))
    }

    async fn delete(&self, schema: &ResourceSchema, id: i64) -> Result<Option<Record>, AppError> {
        let q = sql::delete(schema);
        tracing::debug!(sql = %q.sql, id, "query");
        let pool = self.provider.get().await?;
        let row = sqlx::query(&q.sql).bind(id).fetch_optional(pool).await?;
        Ok(row.map(|r| row_to_record(&r)))
    }

    async fn ping(&self) -> Result<(), AppError> {
        let pool = self.provider.get().await?;
        sqlx::query("SELECT 1").execute(pool).await?;
        Ok(())
    }
}

fn row_to_record(row: &sqlx::postgres::PgRow) -> Record {
    use sqlx::Column;
    use sqlx::Row;
    let mut map = Record::new();
    for col in row.columns() {
        let name = col.name();
        map.insert(name.to_string(), cell_to_value(row, name));
    }
    map
}

fn cell_to_value(row: &sqlx::postgres::PgRow, name: &str) -> Value {
    use sqlx::{Row, TypeInfo, ValueRef};
    if let Ok(Some(n)) = row.try_get::<Option<i16>, _>(name) {
        return Value::Number(n.into());
    }
    if let Ok(Some(n)) = row.try_get::<Option<i32>, _>(name) {
        return Value::Number(n.into());
    }
    if let Ok(Some(n)) = row.try_get::<Option<i64>, _>(name) {
        return Value::Number(n.into());
    }
    if let Ok(Some(n)) = row.try_get::<Option<f32>, _>(name) {
        if let Some(n) = serde_json::Number::from_f64(n as f64) {
            return Value::Number(n);
        }
    }
    if let Ok(Some(n)) = row.try_get::<Option<f64>, _>(name) {
        if let Some(n) = serde_json::Number::from_f64(n) {
            return Value::Number(n);
        }
    }
    if let Ok(Some(b)) = row.try_get::<Option<bool>, _>(name) {
        return Value::Bool(b);
    }
    if let Ok(Some(u)) = row.try_get::<Option<uuid::Uuid>, _>(name) {
        return Value::String(u.to_string());
    }
    if let Ok(Some(d)) = row.try_get::<Option<chrono::DateTime<chrono::Utc>>, _>(name) {
        return Value::String(d.to_rfc3339());
    }
    if let Ok(Some(d)) = row.try_get::<Option<chrono::NaiveDateTime>, _>(name) {
        return Value::String(d.format("%Y-%m-%dT%H:%M:%S%.f").to_string());
    }
    if let Ok(Some(d)) = row.try_get::<Option<chrono::NaiveDate>, _>(name) {
        return Value::String(d.format("%Y-%m-%d").to_string());
    }
    if let Ok(Some(s)) = row.try_get::<Option<String>, _>(name) {
        return Value::String(s);
    }
    if let Ok(Some(j)) = row.try_get::<Option<Value>, _>(name) {
        return j;
    }
    match row.try_get_raw(name) {
        Ok(raw) if !raw.is_null() => unsupported_cell(name, raw.type_info().name()),
        _ => Value::Null,
    }
}

/// Non-null cell of a type the ladder above cannot decode.
fn unsupported_cell(column: &str, pg_type: &str) -> Value {
    tracing::warn!(column, pg_type, "unsupported column type; returning null");
    Value::Null
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_cells_decode_as_null() {
        assert_eq!(unsupported_cell("saldo", "NUMERIC"), Value::Null);
    }
}
