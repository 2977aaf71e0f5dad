use axum::{
    extract::{Json, Query, State, rejection::QueryRejection},
    http::StatusCode,
    response::IntoResponse,
};

use app_api::{AppContext, ReportRequest};
use toll_app::AppError;

use crate::{errors::HttpError, state::HttpState};

pub async fn toll_costs(
    State(state): State<HttpState>,
    query: Result<Query<ReportRequest>, QueryRejection>,
) -> Result<impl IntoResponse, HttpError> {
    let Query(req) = query?;
    let response = run_report(&state, move |ctx| app_api::toll_costs(ctx, req)).await?;
    Ok(Json(response))
}

pub async fn trips_with_tolls(
    State(state): State<HttpState>,
    query: Result<Query<ReportRequest>, QueryRejection>,
) -> Result<impl IntoResponse, HttpError> {
    let Query(req) = query?;
    let response = run_report(&state, move |ctx| app_api::trips_with_tolls(ctx, req)).await?;
    Ok(Json(response))
}

pub async fn health() -> impl IntoResponse {
    Json(app_api::ok())
}

pub async fn not_found() -> HttpError {
    HttpError::new(StatusCode::NOT_FOUND, "not found")
}

/// Runs a report on the blocking pool, bounded by the configured store timeout.
async fn run_report<T, F>(state: &HttpState, report: F) -> Result<T, HttpError>
where
    F: FnOnce(&AppContext) -> toll_app::Result<T> + Send + 'static,
    T: Send + 'static,
{
    let context = state.context.clone();
    let timeout = state.store_timeout;
    let task = tokio::task::spawn_blocking(move || report(&context));
    let joined = tokio::time::timeout(timeout, task)
        .await
        .map_err(|_| HttpError::from(AppError::StoreTimeout(timeout)))?;
    let result = joined.map_err(|err| {
        HttpError::new(StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
    })?;
    Ok(result?)
}
