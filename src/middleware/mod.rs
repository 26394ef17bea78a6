use axum::{
    extract::{FromRequestParts, OptionalFromRequestParts},
    http::{request::Parts, StatusCode},
};
use std::sync::Arc;
use uuid::Uuid;

use crate::AppState;

// Идентификация без auth-политики: роль приходит в заголовке как UUID
// и проверяется на существование в хранилище. Пароли/токены — не наша
// зона ответственности.

pub const STUDENT_HEADER: &str = "x-student-id";
pub const ORGANIZER_HEADER: &str = "x-organizer-id";
pub const ADMIN_HEADER: &str = "x-admin-id";

#[derive(Debug, Clone)]
pub struct StudentIdentity {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct OrganizerIdentity {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct AdminIdentity {
    pub id: Uuid,
    pub name: String,
}

fn header_uuid(parts: &Parts, header: &str) -> Result<Uuid, StatusCode> {
    let raw = parts
        .headers
        .get(header)
        .and_then(|value| value.to_str().ok())
        .ok_or(StatusCode::UNAUTHORIZED)?;

    Uuid::parse_str(raw.trim()).map_err(|_| StatusCode::UNAUTHORIZED)
}

impl FromRequestParts<Arc<AppState>> for StudentIdentity {
    type Rejection = StatusCode;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let id = header_uuid(parts, STUDENT_HEADER)?;
        let db = state.store.read().await;
        let student = db.students.get(&id).ok_or(StatusCode::UNAUTHORIZED)?;
        Ok(StudentIdentity { id, name: student.name.clone() })
    }
}

// Для ручек, где аннотация "registered" опциональна: нет заголовка —
// нет аннотации, но мусорный заголовок всё равно отклоняем.
impl OptionalFromRequestParts<Arc<AppState>> for StudentIdentity {
    type Rejection = StatusCode;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Option<Self>, Self::Rejection> {
        if parts.headers.get(STUDENT_HEADER).is_none() {
            return Ok(None);
        }
        <Self as FromRequestParts<Arc<AppState>>>::from_request_parts(parts, state)
            .await
            .map(Some)
    }
}

impl FromRequestParts<Arc<AppState>> for OrganizerIdentity {
    type Rejection = StatusCode;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let id = header_uuid(parts, ORGANIZER_HEADER)?;
        let db = state.store.read().await;
        let organizer = db.organizers.get(&id).ok_or(StatusCode::UNAUTHORIZED)?;
        Ok(OrganizerIdentity { id, name: organizer.name.clone() })
    }
}

impl FromRequestParts<Arc<AppState>> for AdminIdentity {
    type Rejection = StatusCode;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let id = header_uuid(parts, ADMIN_HEADER)?;
        let db = state.store.read().await;
        let admin = db.admins.get(&id).ok_or(StatusCode::UNAUTHORIZED)?;
        Ok(AdminIdentity { id, name: admin.name.clone() })
    }
}
