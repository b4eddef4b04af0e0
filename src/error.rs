//! Typed errors and HTTP mapping.

use crate::response::{message_body, MessageKey};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid {kind} identifier: '{value}'")]
    InvalidIdentifier { kind: &'static str, value: String },
    #[error("duplicate path segment: {0}")]
    DuplicatePathSegment(String),
    #[error("invalid value for {key}: '{value}'")]
    Invalid { key: &'static str, value: String },
    #[error("validation: {0}")]
    Validation(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    /// Required field missing or empty on create.
    #[error("{0}")]
    Validation(String),
    /// Malformed id or request body.
    #[error("{0}")]
    BadRequest(String),
    #[error("{message}")]
    NotFound { message: String, key: MessageKey },
    #[error("{0}")]
    Db(#[from] sqlx::Error),
    /// Request exceeded `REQUEST_TIMEOUT_SECS`.
    #[error("tempo limite da requisição excedido")]
    Timeout,
}

impl AppError {
    pub fn not_found(message: impl Into<String>) -> Self {
        AppError::NotFound {
            message: message.into(),
            key: MessageKey::Mensagem,
        }
    }

    /// Detail embedded in 500 responses: the database's own message when it reports one.
    pub fn detail(&self) -> String {
        match self {
            AppError::Db(sqlx::Error::Database(db)) => db.message().to_string(),
            other => other.to_string(),
        }
    }
}

#[derive(Serialize)]
pub struct InvalidBody {
    pub erro: &'static str,
    pub mensagem: String,
}

#[derive(Serialize)]
pub struct InternalBody {
    pub erro: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Validation(mensagem) => (
                StatusCode::BAD_REQUEST,
                Json(InvalidBody { erro: "Dados inválidos", mensagem }),
            )
                .into_response(),
            AppError::BadRequest(mensagem) => (
                StatusCode::BAD_REQUEST,
                Json(InvalidBody { erro: "Requisição inválida", mensagem }),
            )
                .into_response(),
            AppError::NotFound { message, key } => {
                (StatusCode::NOT_FOUND, Json(message_body(key, &message))).into_response()
            }
            AppError::Db(_) | AppError::Timeout => {
                let detail = self.detail();
                tracing::error!(error = %self, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(InternalBody {
                        erro: format!("Erro interno do servidor: {}", detail),
                    }),
                )
                    .into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_of(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn timeout_uses_the_internal_error_envelope() {
        let (status, body) = body_of(AppError::Timeout).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body,
            serde_json::json!({ "erro": "Erro interno do servidor: tempo limite da requisição excedido" })
        );
    }

    #[tokio::test]
    async fn bad_request_and_validation_differ_only_in_erro() {
        let (status, body) = body_of(AppError::BadRequest("x".into())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["erro"], "Requisição inválida");
        let (status, body) = body_of(AppError::Validation("x".into())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["erro"], "Dados inválidos");
    }
}
