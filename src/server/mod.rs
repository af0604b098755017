mod handlers;
mod state;

use axum::routing::get;
use axum::Router;
use state::AppState;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::location::LocationResolver;

pub fn build_router(resolver: LocationResolver) -> Router {
    let state = Arc::new(AppState::new(resolver));

    Router::new()
        .route("/api/classify", get(handlers::classify_point))
        .route("/api/resolve", get(handlers::resolve))
        .route("/api/countries", get(handlers::country_list))
        .route("/api/regions", get(handlers::region_list))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn start(host: &str, port: u16, resolver: LocationResolver) -> std::io::Result<()> {
    let app = build_router(resolver);
    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    log::info!("fieldgeo server listening on http://{}", addr);
    eprintln!("  Press Ctrl+C to stop.");

    axum::serve(listener, app).await
}
