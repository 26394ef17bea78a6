use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch, post},
    Json, Router,
};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::catalog::{CatalogError, DayFilter};
use crate::middleware::{AdminIdentity, OrganizerIdentity, StudentIdentity};
use crate::models::EventSummary;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/events", get(search_events))
        .route("/events", post(create_event))
        .route("/events/all", get(list_all_events))
        .route("/events/mine", get(list_my_created_events))
        .route("/events/approve", patch(approve_event))
}

/* ---------- SEARCH / BROWSE ---------- */

#[derive(Debug, Deserialize)]
pub struct EventsQuery {
    pub query: Option<String>,
    pub venue: Option<String>,
    pub day: Option<DayFilter>,
}

// Строка выдачи: summary + аннотация "registered", если студент
// представился заголовком. Аннотацию даёт booking engine — каталог
// состав ledger не трогает.
#[derive(Debug, Serialize)]
pub struct AnnotatedEvent {
    #[serde(flatten)]
    pub event: EventSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registered: Option<bool>,
}

async fn search_events(
    State(state): State<Arc<AppState>>,
    student: Option<StudentIdentity>,
    Query(params): Query<EventsQuery>,
) -> impl IntoResponse {
    let found = state
        .catalog
        .search_approved(
            params.query.as_deref().unwrap_or_default(),
            params.venue.as_deref(),
            params.day.unwrap_or_default(),
        )
        .await;

    let mut rows = Vec::with_capacity(found.len());
    for event in found {
        let registered = match &student {
            Some(s) => Some(state.booking.is_registered(event.id, s.id).await),
            None => None,
        };
        rows.push(AnnotatedEvent { event, registered });
    }

    (StatusCode::OK, Json(rows))
}

// GET /api/events/all — админский обзор, включая неодобренные
async fn list_all_events(
    State(state): State<Arc<AppState>>,
    _admin: AdminIdentity,
) -> impl IntoResponse {
    Json(state.catalog.list_all_events().await)
}

// GET /api/events/mine — события, созданные организатором
async fn list_my_created_events(
    State(state): State<Arc<AppState>>,
    organizer: OrganizerIdentity,
) -> impl IntoResponse {
    Json(state.catalog.list_by_organizer(organizer.id).await)
}

/* ---------- CREATE ---------- */

#[derive(Debug, Deserialize, Validate)]
pub struct CreateEventRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub date_time: NaiveDateTime,
    pub venue_id: Uuid,
    #[validate(range(min = 1))]
    pub capacity: u32,
}

async fn create_event(
    State(state): State<Arc<AppState>>,
    organizer: OrganizerIdentity,
    Json(req): Json<CreateEventRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    req.validate()
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;

    let created = state
        .catalog
        .create_event(
            organizer.id,
            &req.title,
            &req.description,
            req.date_time,
            req.venue_id,
            req.capacity,
        )
        .await
        .map_err(catalog_error_response)?;

    Ok((StatusCode::CREATED, Json(created)))
}

/* ---------- APPROVE ---------- */

#[derive(Debug, Deserialize)]
pub struct ApproveEventRequest {
    pub event_id: Uuid,
    pub approved: bool,
}

async fn approve_event(
    State(state): State<Arc<AppState>>,
    admin: AdminIdentity,
    Json(req): Json<ApproveEventRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let updated = state
        .catalog
        .set_approved(req.event_id, req.approved)
        .await
        .map_err(catalog_error_response)?;

    tracing::info!(admin = %admin.id, event_id = %req.event_id, approved = req.approved, "admin decision");
    Ok((StatusCode::OK, Json(updated)))
}

fn catalog_error_response(err: CatalogError) -> (StatusCode, String) {
    let status = match err {
        CatalogError::UnknownEvent | CatalogError::UnknownVenue | CatalogError::UnknownOrganizer => {
            StatusCode::NOT_FOUND
        }
        CatalogError::InvalidCapacity | CatalogError::CapacityExceedsVenue => {
            StatusCode::BAD_REQUEST
        }
    };
    (status, err.to_string())
}
