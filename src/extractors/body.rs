//! Extract the request body as a JSON object (e.g. `POST /usuarios`).

use crate::error::AppError;
use crate::store::Record;
use async_trait::async_trait;
use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::header::CONTENT_TYPE,
    Json,
};
use serde_json::Value;

/// JSON object body. A request without a JSON body, or with an empty one, yields an empty object.
#[derive(Clone, Debug, Default)]
pub struct JsonObject(pub Record);

fn is_json_content_type(req: &Request) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|ct| ct.split(';').next())
        .map(|mime| {
            let mime = mime.trim();
            mime == "application/json" || (mime.starts_with("application/") && mime.ends_with("+json"))
        })
        .unwrap_or(false)
}

#[async_trait]
impl<S> FromRequest<S> for JsonObject
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if !is_json_content_type(&req) {
            return Ok(JsonObject::default());
        }
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(JsonObject::default());
        }
        match Json::<Value>::from_bytes(&bytes) {
            Ok(Json(Value::Object(map))) => Ok(JsonObject(map)),
            Ok(_) => Err(AppError::BadRequest(
                "O corpo da requisição deve ser um objeto JSON.".into(),
            )),
            Err(rejection) => Err(AppError::BadRequest(rejection.body_text())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    async fn extract(content_type: Option<&str>, body: &'static str) -> Result<JsonObject, AppError> {
        let mut builder = axum::http::Request::builder().method("POST").uri("/");
        if let Some(ct) = content_type {
            builder = builder.header(CONTENT_TYPE, ct);
        }
        let req = builder.body(Body::from(body)).unwrap();
        JsonObject::from_request(req, &()).await
    }

    #[tokio::test]
    async fn object_body_passes_through() {
        let JsonObject(map) = extract(Some("application/json"), r#"{"nome":"Ana"}"#).await.unwrap();
        assert_eq!(map["nome"], "Ana");
    }

    #[tokio::test]
    async fn missing_content_type_is_an_empty_object() {
        let JsonObject(map) = extract(None, "").await.unwrap();
        assert!(map.is_empty());
    }

    #[tokio::test]
    async fn empty_json_body_is_an_empty_object() {
        let JsonObject(map) = extract(Some("application/json"), "").await.unwrap();
        assert!(map.is_empty());
        let JsonObject(map) = extract(Some("application/json; charset=utf-8"), "  \n").await.unwrap();
        assert!(map.is_empty());
    }

    #[tokio::test]
    async fn arrays_and_malformed_json_are_bad_requests() {
        assert!(matches!(
            extract(Some("application/json"), "[1,2]").await,
            Err(AppError::BadRequest(_))
        ));
        assert!(matches!(
            extract(Some("application/json"), "{nome").await,
            Err(AppError::BadRequest(_))
        ));
    }
}
