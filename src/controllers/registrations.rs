use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

use super::status_419;
use crate::booking::BookingError;
use crate::middleware::StudentIdentity;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/registrations", post(register))
        .route("/registrations/cancel", patch(cancel))
        .route("/registrations/my", get(my_registrations))
}

#[derive(Debug, Deserialize)]
struct RegistrationRequest {
    event_id: Uuid,
}

// POST /api/registrations
async fn register(
    State(state): State<Arc<AppState>>,
    student: StudentIdentity,
    Json(req): Json<RegistrationRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    state
        .booking
        .register(student.id, req.event_id)
        .await
        .map_err(booking_error_response)?;

    // Снимок после успеха — для "Registered! Free spots: N" на клиенте
    let free_spots = state.booking.free_spots(req.event_id).await.unwrap_or(0);

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Регистрация оформлена",
            "event_id": req.event_id,
            "free_spots": free_spots,
        })),
    ))
}

// PATCH /api/registrations/cancel — идемпотентная отмена
async fn cancel(
    State(state): State<Arc<AppState>>,
    student: StudentIdentity,
    Json(req): Json<RegistrationRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    state
        .booking
        .cancel(student.id, req.event_id)
        .await
        .map_err(booking_error_response)?;

    Ok((
        StatusCode::OK,
        Json(json!({ "message": "Регистрация отменена" })),
    ))
}

// GET /api/registrations/my
async fn my_registrations(
    State(state): State<Arc<AppState>>,
    student: StudentIdentity,
) -> impl IntoResponse {
    Json(state.booking.list_my_events(student.id).await)
}

fn booking_error_response(err: BookingError) -> (StatusCode, String) {
    let status = match err {
        BookingError::UnknownEvent => StatusCode::NOT_FOUND,
        // бизнес-конфликты — 419, как и в остальных наших сервисах
        BookingError::AlreadyRegistered | BookingError::EventFull => status_419(),
    };
    (status, err.to_string())
}
