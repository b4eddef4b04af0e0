//! Builds parameterized SELECT, INSERT, UPDATE, DELETE from a resource schema.

use crate::config::ResourceSchema;
use serde_json::Value;

/// Quote identifier for PostgreSQL (safe: only from validated schemas).
fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<Value>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    fn push_param(&mut self, v: Value) -> u32 {
        let n = self.params.len() as u32 + 1;
        self.params.push(v);
        n
    }
}

/// SELECT every row.
pub fn select_all(schema: &ResourceSchema) -> QueryBuf {
    let mut q = QueryBuf::new();
    q.sql = format!("SELECT * FROM {}", quoted(schema.table_name));
    q
}

/// SELECT by primary key. Caller binds the id as $1.
pub fn select_by_id(schema: &ResourceSchema) -> QueryBuf {
    let mut q = QueryBuf::new();
    q.sql = format!(
        "SELECT * FROM {} WHERE {} = $1",
        quoted(schema.table_name),
        quoted(schema.primary_key)
    );
    q
}

/// INSERT over every field in declared order. `values` are positional; missing trailing values bind as null.
pub fn insert(schema: &ResourceSchema, values: &[Value]) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut cols = Vec::with_capacity(schema.fields.len());
    let mut placeholders = Vec::with_capacity(schema.fields.len());
    for (i, field) in schema.fields.iter().enumerate() {
        let n = q.push_param(values.get(i).cloned().unwrap_or(Value::Null));
        cols.push(quoted(field.name));
        placeholders.push(format!("${}::{}", n, field.pg_type));
    }
    q.sql = format!(
        "INSERT INTO {} ({}) VALUES ({}) RETURNING *",
        quoted(schema.table_name),
        cols.join(", "),
        placeholders.join(", ")
    );
    q
}

/// UPDATE by primary key rewriting every field. Caller binds the id as the last parameter.
pub fn update(schema: &ResourceSchema, values: &[Value]) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut sets = Vec::with_capacity(schema.fields.len());
    for (i, field) in schema.fields.iter().enumerate() {
        let n = q.push_param(values.get(i).cloned().unwrap_or(Value::Null));
        sets.push(format!("{} = ${}::{}", quoted(field.name), n, field.pg_type));
    }
    let id_param = q.params.len() + 1;
    q.sql = format!(
        "UPDATE {} SET {} WHERE {} = ${} RETURNING *",
        quoted(schema.table_name),
        sets.join(", "),
        quoted(schema.primary_key),
        id_param
    );
    q
}

/// DELETE by primary key. Caller binds the id as $1.
pub fn delete(schema: &ResourceSchema) -> QueryBuf {
    let mut q = QueryBuf::new();
    q.sql = format!(
        "DELETE FROM {} WHERE {} = $1 RETURNING *",
        quoted(schema.table_name),
        quoted(schema.primary_key)
    );
    q
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{QUESTOES, USUARIOS};
    use serde_json::json;

    #[test]
    fn insert_lists_all_fields_in_declared_order() {
        let q = insert(&USUARIOS, &[json!("Ana"), json!("ana@x.com"), json!("pw")]);
        assert_eq!(
            q.sql,
            r#"INSERT INTO "usuarios" ("nome", "email", "senha", "imagem") VALUES ($1::text, $2::text, $3::text, $4::text) RETURNING *"#
        );
        assert_eq!(q.params, vec![json!("Ana"), json!("ana@x.com"), json!("pw"), Value::Null]);
    }

    #[test]
    fn update_sets_every_field_and_binds_id_last() {
        let values: Vec<Value> = (0..5).map(|i| json!(i.to_string())).collect();
        let q = update(&QUESTOES, &values);
        assert_eq!(
            q.sql,
            r#"UPDATE "questoes" SET "enunciado" = $1::text, "disciplina" = $2::text, "tema" = $3::text, "nivel" = $4::text, "imagem" = $5::text WHERE "id" = $6 RETURNING *"#
        );
        assert_eq!(q.params.len(), 5);
    }

    #[test]
    fn lookups_bind_id_as_first_parameter() {
        assert_eq!(select_by_id(&USUARIOS).sql, r#"SELECT * FROM "usuarios" WHERE "id" = $1"#);
        assert_eq!(delete(&QUESTOES).sql, r#"DELETE FROM "questoes" WHERE "id" = $1 RETURNING *"#);
        assert_eq!(select_all(&QUESTOES).sql, r#"SELECT * FROM "questoes""#);
    }
}
