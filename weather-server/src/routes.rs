//! Route definitions

use axum::{Router, routing::get};
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};

use crate::{error::panic_response, handlers};

/// Create the router with every `/api` endpoint and its middleware.
pub fn create_router() -> Router {
    with_middleware(
        Router::new()
            .route("/api", get(handlers::index))
            .route("/api/weather", get(handlers::weather_by_city))
            .route("/api/weather/coordinates", get(handlers::weather_by_coordinates))
            .route("/api/forecast", get(handlers::forecast))
            .route("/api/uvi", get(handlers::uv_index)),
    )
}

/// Wraps `routes` in the fallbacks and layers every endpoint shares.
pub fn with_middleware(routes: Router) -> Router {
    routes
        .fallback(handlers::not_found)
        .method_not_allowed_fallback(handlers::not_found)
        // Order matters: the last layer added is the outermost.
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
