//! Questões API server: loads settings from the environment, mounts the routes and listens.

use questoes_api::{app, validate, AppState, ResourceRegistry, Settings};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new("questoes_api=info,questoes_server=info,tower_http=info")
            }),
        )
        .init();

    let settings = Settings::from_env()?;
    let registry = ResourceRegistry::builtin();
    validate(&registry)?;

    let addr = settings.listen_addr();
    let state = AppState::from_settings(registry, settings);
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("Serviço rodando em {}", listener.local_addr()?);
    axum::serve(listener, app(state)).await?;
    Ok(())
}
