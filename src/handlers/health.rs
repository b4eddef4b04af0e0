//! Root route: API identity plus database liveness.

use crate::state::AppState;
use axum::{extract::State, Json};
use serde::Serialize;

#[derive(Serialize)]
pub struct HealthBody {
    pub mensagem: String,
    pub autor: String,
    #[serde(rename = "dbStatus")]
    pub db_status: String,
}

/// Always 200; a failing database shows up in `dbStatus`.
pub async fn health(State(state): State<AppState>) -> Json<HealthBody> {
    tracing::info!("GET / requested");
    let db_status = match state.store.ping().await {
        Ok(()) => "ok".to_string(),
        Err(e) => e.detail(),
    };
    Json(HealthBody {
        mensagem: state.settings.api_title.clone(),
        autor: state.settings.api_author.clone(),
        db_status,
    })
}
