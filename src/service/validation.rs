//! Required-field validation and value truthiness.

use crate::config::ResourceSchema;
use crate::error::AppError;
use crate::store::Record;
use serde_json::Value;

/// JSON truthiness as the API has always applied it: null, false, 0 and "" are falsy.
pub fn is_truthy(v: &Value) -> bool {
    match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

pub struct RequestValidator;

impl RequestValidator {
    /// Every required field must be present and truthy.
    pub fn validate_create(schema: &ResourceSchema, body: &Record) -> Result<(), AppError> {
        let missing = schema
            .required_fields()
            .any(|f| !body.get(f).map(is_truthy).unwrap_or(false));
        if missing {
            let fields: Vec<&str> = schema.required_fields().collect();
            return Err(AppError::Validation(format!(
                "Todos os campos ({}) são obrigatórios.",
                fields.join(", ")
            )));
        }
        Ok(())
    }
}
