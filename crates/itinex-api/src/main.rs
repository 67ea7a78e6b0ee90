//! HTTP API server for travel plan extraction.

mod error;
mod routes;
mod state;

use itinex_core::ItinexConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = match std::env::var("ITINEX_CONFIG") {
        Ok(path) => ItinexConfig::from_file(std::path::Path::new(&path))?,
        Err(_) => ItinexConfig::default(),
    };

    let app_state = state::AppState::new(config);
    tracing::info!(
        ai_configured = app_state.backend.is_configured(),
        "starting itinex API server"
    );

    let app = routes::create_router(app_state);

    let addr = std::env::var("ITINEX_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
    tracing::info!("listening on {addr}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
