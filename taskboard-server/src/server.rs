/// HTTP server: CORS layer + axum serve loop.

use axum::http::{header, HeaderValue, Method};
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::api::api_router;
use crate::config::ServerConfig;
use crate::state::AppState;

pub async fn serve(state: AppState, config: &ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let app: Router = api_router()
        .layer(cors_layer(&config.allowed_origin))
        .with_state(state);

    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", config.bind_address, config.port)).await?;
    let addr = listener.local_addr()?;

    log::info!("HTTP server listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}

/// Cross-origin access is restricted to the one configured origin, with
/// credentials allowed.
fn cors_layer(allowed_origin: &str) -> CorsLayer {
    let origin = allowed_origin.parse::<HeaderValue>().unwrap_or_else(|e| {
        log::warn!(
            "Invalid allowed_origin '{}' ({}), falling back to default",
            allowed_origin,
            e
        );
        HeaderValue::from_static("https://127.0.0.1:5173")
    });

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true)
}
