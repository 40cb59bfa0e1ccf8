use axum::{middleware as axum_middleware, routing::any, Router};
use tower::ServiceBuilder;
use tower_http::{
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use crate::{handlers, middleware, state::AppState};

/// Edge router: API pass-through under `/api`, everything else served from
/// the built frontend with `index.html` as the client-side routing fallback.
/// Page navigations under the protected matchers go through the edge gate
/// before any file is served.
pub fn build_router(state: AppState) -> Router {
    let static_dir = state.config.static_dir.clone();
    let pages = ServeDir::new(&static_dir).fallback(ServeFile::new(static_dir.join("index.html")));

    Router::new()
        .route("/api/{*rest}", any(handlers::proxy::forward))
        .fallback_service(pages)
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::edge_gate,
        ))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(axum_middleware::from_fn(middleware::request_id)),
        )
        .with_state(state)
}
