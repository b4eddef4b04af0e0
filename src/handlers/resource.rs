//! Resource CRUD handlers: list, read, create, update, delete.

use crate::config::ResourceSchema;
use crate::error::AppError;
use crate::extractors::JsonObject;
use crate::response::{self, MessageKey};
use crate::service::ResourceService;
use crate::state::AppState;
use axum::{extract::{Path, State}, response::IntoResponse};

fn resolve(state: &AppState, path_segment: &str) -> Result<&'static ResourceSchema, AppError> {
    state
        .registry
        .resource_by_path(path_segment)
        .ok_or_else(|| AppError::not_found(format!("Recurso não encontrado: {}", path_segment)))
}

fn parse_id(id_str: &str) -> Result<i64, AppError> {
    id_str
        .parse()
        .map_err(|_| AppError::BadRequest(format!("Id inválido: {}", id_str)))
}

fn service<'a>(state: &'a AppState, schema: &'a ResourceSchema) -> ResourceService<'a> {
    ResourceService::new(state.store.as_ref(), schema, state.settings.merge_policy)
}

pub async fn list(
    State(state): State<AppState>,
    Path(path_segment): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    tracing::info!(resource = %path_segment, "GET /{} requested", path_segment);
    let schema = resolve(&state, &path_segment)?;
    let rows = service(&state, schema).list().await?;
    Ok(response::records(rows))
}

/// Responds with an array holding the one record.
pub async fn read(
    State(state): State<AppState>,
    Path((path_segment, id_str)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    tracing::info!(resource = %path_segment, id = %id_str, "GET /{}/:id requested", path_segment);
    let schema = resolve(&state, &path_segment)?;
    let id = parse_id(&id_str)?;
    let row = service(&state, schema)
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found(schema.messages.not_found))?;
    Ok(response::records(vec![row]))
}

pub async fn create(
    State(state): State<AppState>,
    Path(path_segment): Path<String>,
    JsonObject(body): JsonObject,
) -> Result<impl IntoResponse, AppError> {
    tracing::info!(resource = %path_segment, "POST /{} requested", path_segment);
    let schema = resolve(&state, &path_segment)?;
    let row = service(&state, schema).create(&body).await?;
    Ok(response::created(
        schema.messages.created,
        row.get(schema.primary_key).cloned(),
    ))
}

pub async fn update(
    State(state): State<AppState>,
    Path((path_segment, id_str)): Path<(String, String)>,
    JsonObject(body): JsonObject,
) -> Result<impl IntoResponse, AppError> {
    tracing::info!(resource = %path_segment, id = %id_str, "PUT /{}/:id requested", path_segment);
    let schema = resolve(&state, &path_segment)?;
    let id = parse_id(&id_str)?;
    service(&state, schema)
        .update(id, &body)
        .await?
        .ok_or_else(|| AppError::NotFound {
            message: schema.messages.not_found.to_string(),
            key: MessageKey::Message,
        })?;
    Ok(response::confirmation(MessageKey::Message, schema.messages.updated))
}

pub async fn delete(
    State(state): State<AppState>,
    Path((path_segment, id_str)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    tracing::info!(resource = %path_segment, id = %id_str, "DELETE /{}/:id requested", path_segment);
    let schema = resolve(&state, &path_segment)?;
    let id = parse_id(&id_str)?;
    service(&state, schema)
        .delete_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found(schema.messages.not_found))?;
    Ok(response::confirmation(MessageKey::Mensagem, schema.messages.deleted))
}
