use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Событие каталога. Identity и capacity фиксируются при создании;
/// мутабельны только approved (админ) и состав ledger (booking engine).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub date_time: NaiveDateTime,
    pub venue_id: Uuid,
    pub organizer_id: Uuid,
    pub capacity: u32,
    pub approved: bool,
}

impl Event {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        date_time: NaiveDateTime,
        venue_id: Uuid,
        organizer_id: Uuid,
        capacity: u32,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            description: description.into(),
            date_time,
            venue_id,
            organizer_id,
            capacity,
            // Как в оригинальной системе: событие видно сразу,
            // админ может снять флаг позже.
            approved: true,
        }
    }

    // Первые 8 символов UUID — короткий идентификатор для выдачи людям.
    pub fn short_id(&self) -> String {
        self.id.to_string()[..8].to_string()
    }
}

/// Read-модель события для выдачи наружу. registered_count всегда
/// вычисляется из ledger, отдельного счётчика в хранилище нет.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventSummary {
    pub id: Uuid,
    pub title: String,
    pub date_time: NaiveDateTime,
    pub venue_name: String,
    pub registered_count: u32,
    pub capacity: u32,
    pub free_spots: u32,
    pub approved: bool,
}
