use axum::{extract::State, response::IntoResponse, routing::get, Json, Router};
use std::sync::Arc;

use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/venues", get(list_venues))
}

// GET /api/venues — список площадок для фильтра в UI
async fn list_venues(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.catalog.list_venues().await)
}
