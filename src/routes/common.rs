//! Health route and the full application router.

use crate::error::AppError;
use crate::handlers::health;
use crate::routes::resource_routes;
use crate::state::AppState;
use axum::{
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use tower_http::{
    cors::CorsLayer,
    limit::RequestBodyLimitLayer,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

const BODY_LIMIT_BYTES: usize = 1024 * 1024;

/// GET / with the database status.
pub fn common_routes(state: AppState) -> Router {
    Router::new().route("/", get(health)).with_state(state)
}

/// `TimeoutLayer` answers with a bare 408; give it the same `{erro}` body as other failures.
async fn timeout_envelope(response: Response) -> Response {
    if response.status() == StatusCode::REQUEST_TIMEOUT {
        AppError::Timeout.into_response()
    } else {
        response
    }
}

/// Every route plus CORS, tracing, request timeout and body limit.
pub fn app(state: AppState) -> Router {
    let timeout = state.settings.request_timeout;
    Router::new()
        .merge(common_routes(state.clone()))
        .merge(resource_routes(state))
        .layer(RequestBodyLimitLayer::new(BODY_LIMIT_BYTES))
        .layer(TimeoutLayer::new(timeout))
        .layer(middleware::map_response(timeout_envelope))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
