//! Response envelope helpers. Key names (`mensagem`, `message`, `erro`) are part of the wire format.

use crate::store::Record;
use axum::{http::StatusCode, Json};
use serde::Serialize;
use serde_json::{Map, Value};

/// Key carrying a human-readable message. Update responses use `message`, everything else `mensagem`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageKey {
    Mensagem,
    Message,
}

impl MessageKey {
    pub fn as_str(self) -> &'static str {
        match self {
            MessageKey::Mensagem => "mensagem",
            MessageKey::Message => "message",
        }
    }
}

pub fn message_body(key: MessageKey, text: &str) -> Value {
    let mut map = Map::new();
    map.insert(key.as_str().to_string(), Value::String(text.to_string()));
    Value::Object(map)
}

#[derive(Serialize)]
pub struct Created {
    pub mensagem: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
}

/// 200 with the records as a bare array.
pub fn records(rows: Vec<Record>) -> (StatusCode, Json<Vec<Record>>) {
    (StatusCode::OK, Json(rows))
}

/// 201 with the creation message and the generated primary key.
pub fn created(message: &'static str, id: Option<Value>) -> (StatusCode, Json<Created>) {
    (StatusCode::CREATED, Json(Created { mensagem: message, id }))
}

/// 200 with a single confirmation message.
pub fn confirmation(key: MessageKey, text: &str) -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(message_body(key, text)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_body_uses_requested_key() {
        assert_eq!(
            message_body(MessageKey::Message, "ok"),
            serde_json::json!({ "message": "ok" })
        );
        assert_eq!(
            message_body(MessageKey::Mensagem, "ok"),
            serde_json::json!({ "mensagem": "ok" })
        );
    }

    #[test]
    fn created_omits_missing_id() {
        let (status, Json(body)) = created("feito", None);
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(serde_json::to_value(body).unwrap(), serde_json::json!({ "mensagem": "feito" }));
    }
}
