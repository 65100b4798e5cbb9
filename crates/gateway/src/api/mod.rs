pub mod cors;
pub mod health;
pub mod session;

use axum::middleware;
use axum::routing::{any, get};
use axum::Router;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the API router.
///
/// The session broker is mounted twice: `/create-session` and the
/// serverless-style `/api/create-session` the widget calls by default.
/// Both accept any method so the handler owns the OPTIONS / 405 rules.
pub fn router() -> Router<AppState> {
    let broker = Router::new()
        .route("/create-session", any(session::create_session))
        .route("/api/create-session", any(session::create_session))
        .layer(middleware::map_response(cors::with_cors_headers));

    Router::new()
        .route("/health", get(health::health))
        .merge(broker)
}

/// The full application: API routes, the widget's static assets when
/// `server.static_dir` exists, and request tracing.
pub fn app(state: AppState) -> Router {
    let static_dir = state.config.server.static_dir.clone();

    let router = if static_dir.is_dir() {
        let index_html = static_dir.join("index.html");
        let assets = ServeDir::new(&static_dir).not_found_service(ServeFile::new(index_html));
        tracing::info!(dir = %static_dir.display(), "serving widget assets");
        router().fallback_service(assets)
    } else {
        tracing::info!(
            dir = %static_dir.display(),
            "static dir not found; widget assets not served"
        );
        router()
    };

    router.layer(TraceLayer::new_for_http()).with_state(state)
}
