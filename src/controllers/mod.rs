pub mod events;
pub mod registrations;
pub mod venues;

use axum::Router;
use std::sync::Arc;

pub fn routes() -> Router<Arc<crate::AppState>> {
    Router::new()
        .merge(events::routes())
        .merge(registrations::routes())
        .merge(venues::routes())
}

// 419 для бизнес-конфликтов (занято, дубликат), чтобы не путать их
// с 409 транспортного уровня.
pub(crate) fn status_419() -> axum::http::StatusCode {
    axum::http::StatusCode::from_u16(419).unwrap_or(axum::http::StatusCode::CONFLICT)
}
