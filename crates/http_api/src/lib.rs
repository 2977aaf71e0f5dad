mod errors;
mod handlers;
mod middleware;
mod state;

use axum::{Router, middleware as axum_middleware, routing::get};

pub use errors::HttpError;
pub use state::HttpState;

pub fn router(state: HttpState) -> Router<()> {
    let api = Router::new()
        .route("/toll_costs", get(handlers::toll_costs))
        .route("/trips_with_tolls", get(handlers::trips_with_tolls));

    Router::new()
        .nest("/api", api)
        .route("/health", get(handlers::health))
        .fallback(handlers::not_found)
        .layer(axum_middleware::from_fn(middleware::trace_requests))
        .with_state(state)
}
