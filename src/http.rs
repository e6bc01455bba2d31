//! HTTP surface: thin axum handlers translating requests into store calls.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use tracing::error;

use crate::entity::show;
use crate::store::{CinemaStore, NewShow, ShowListing};

/// Shared state handed to every handler; cloning is cheap because the store
/// shares one connection pool.
#[derive(Clone)]
pub struct AppState {
    pub store: CinemaStore,
}

impl AppState {
    pub fn new(store: CinemaStore) -> Self {
        Self { store }
    }
}

/// Builds the application router over the given store.
pub fn router(store: CinemaStore) -> Router {
    Router::new()
        .route("/shows", get(list_shows).post(create_show))
        .with_state(AppState::new(store))
}

/// `GET /shows`: 200 with every show and its related movie, user and seat.
pub async fn list_shows(
    State(state): State<AppState>,
) -> Result<Json<Vec<ShowListing>>, ApiError> {
    Ok(Json(state.store.list_shows().await?))
}

/// `POST /shows`: 201 with the created show, or 500 with an empty body when
/// the insert fails.
pub async fn create_show(
    State(state): State<AppState>,
    Json(payload): Json<NewShow>,
) -> Result<(StatusCode, Json<show::Model>), ApiError> {
    let created = state.store.create_show(payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// A failed store call, surfaced to API clients as a bare 500. The cause is
/// logged; no diagnostic body or error code leaves the process.
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct ApiError(#[from] sea_orm::DbErr);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        error!("request failed: {}", self.0);
        StatusCode::INTERNAL_SERVER_ERROR.into_response()
    }
}
