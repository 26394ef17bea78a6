use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

use crate::models::{Admin, Event, EventSummary, Organizer, Student, Venue};

/// Всё состояние приложения под одним замком. Каталог (venues, events)
/// после создания почти не меняется; мутирует только флаг approved и
/// членство в registrations.
#[derive(Debug, Default)]
pub struct StoreInner {
    pub venues: HashMap<Uuid, Venue>,
    pub students: HashMap<Uuid, Student>,
    pub organizers: HashMap<Uuid, Organizer>,
    pub admins: HashMap<Uuid, Admin>,
    pub events: HashMap<Uuid, Event>,
    // event_id -> зарегистрированные студенты.
    // Единственный источник правды о регистрациях: счётчик мест
    // всегда выводится из размера этого множества.
    pub registrations: HashMap<Uuid, HashSet<Uuid>>,
}

impl StoreInner {
    pub fn registered_count(&self, event_id: Uuid) -> usize {
        self.registrations.get(&event_id).map_or(0, HashSet::len)
    }

    /// Собирает read-модель события. Счётчик выше capacity означает баг
    /// в дисциплине блокировок — клампим и шумим в лог, но не падаем.
    pub fn summarize(&self, event: &Event) -> EventSummary {
        let count = self.registered_count(event.id) as u32;
        if count > event.capacity {
            tracing::warn!(
                event_id = %event.id,
                count,
                capacity = event.capacity,
                "integrity anomaly: ledger size exceeds event capacity"
            );
        }
        let venue_name = self
            .venues
            .get(&event.venue_id)
            .map_or_else(|| "unknown".to_string(), |v| v.name.clone());

        EventSummary {
            id: event.id,
            title: event.title.clone(),
            date_time: event.date_time,
            venue_name,
            registered_count: count.min(event.capacity),
            capacity: event.capacity,
            free_spots: event.capacity.saturating_sub(count),
            approved: event.approved,
        }
    }
}

/// Явно владеемое in-memory хранилище: передаётся сервисам при
/// конструировании, никакого глобального состояния.
#[derive(Clone, Default)]
pub struct Store {
    inner: Arc<RwLock<StoreInner>>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn read(&self) -> RwLockReadGuard<'_, StoreInner> {
        self.inner.read().await
    }

    pub async fn write(&self) -> RwLockWriteGuard<'_, StoreInner> {
        self.inner.write().await
    }
}
