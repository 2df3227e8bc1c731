use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use comparison::Comparator;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{AllowHeaders, AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

pub mod error;
pub mod handlers;

/// The shared application state that all handlers can access.
///
/// Nothing in it is mutable; concurrent requests are fully independent.
#[derive(Clone)]
pub struct AppState {
    pub comparator: Comparator,
}

/// Builds the application router.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::any())
        .allow_methods(Any)
        .allow_headers(AllowHeaders::any());

    Router::new()
        .route("/", get(handlers::index))
        .route("/api/health", get(handlers::health))
        .route("/api/compare", post(handlers::compare))
        .with_state(state)
        .layer(cors)
        // Logs information about every incoming request.
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(64 * 1024))
}

/// Serves the comparison API on `addr` until the process is stopped.
///
/// Tracing must already be initialized by the caller.
pub async fn run_server(addr: SocketAddr, comparator: Comparator) -> anyhow::Result<()> {
    let app = router(Arc::new(AppState { comparator }));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Web server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
