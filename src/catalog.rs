use chrono::{Days, Local, NaiveDateTime};
use serde::Deserialize;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{Event, EventSummary, Venue};
use crate::store::Store;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CatalogError {
    #[error("event not found")]
    UnknownEvent,
    #[error("venue not found")]
    UnknownVenue,
    #[error("organizer not found")]
    UnknownOrganizer,
    #[error("event capacity must be greater than zero")]
    InvalidCapacity,
    #[error("event capacity cannot exceed venue capacity")]
    CapacityExceedsVenue,
}

/// Фильтр по дате, как в оригинальном меню: Сегодня / Неделя / Все.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DayFilter {
    Today,
    Week,
    #[default]
    All,
}

/// Каталог событий: создание, поиск, approve. Занятость мест здесь
/// только читается (через summarize) — мутации ledger остаются за
/// BookingService.
#[derive(Clone)]
pub struct CatalogService {
    store: Store,
}

impl CatalogService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Создание события организатором. Проверки из доменной модели:
    /// capacity > 0 и capacity <= вместимости площадки. Ledger-запись
    /// создаётся пустой в тот же момент, что и само событие.
    pub async fn create_event(
        &self,
        organizer_id: Uuid,
        title: &str,
        description: &str,
        date_time: NaiveDateTime,
        venue_id: Uuid,
        capacity: u32,
    ) -> Result<EventSummary, CatalogError> {
        if capacity == 0 {
            return Err(CatalogError::InvalidCapacity);
        }

        let mut db = self.store.write().await;
        if !db.organizers.contains_key(&organizer_id) {
            return Err(CatalogError::UnknownOrganizer);
        }
        let venue = db.venues.get(&venue_id).ok_or(CatalogError::UnknownVenue)?;
        if capacity > venue.capacity {
            return Err(CatalogError::CapacityExceedsVenue);
        }

        let event = Event::new(title, description, date_time, venue_id, organizer_id, capacity);
        let id = event.id;
        db.registrations.insert(id, Default::default());
        db.events.insert(id, event);

        let summary = db.summarize(&db.events[&id]);
        tracing::info!(event_id = %id, %organizer_id, capacity, "event created");
        Ok(summary)
    }

    /// Поиск по одобренным событиям: подстрока в title/description
    /// (без учёта регистра), фильтр по названию площадки, фильтр по дате.
    pub async fn search_approved(
        &self,
        query: &str,
        venue_filter: Option<&str>,
        day_filter: DayFilter,
    ) -> Vec<EventSummary> {
        let q = query.trim().to_lowercase();
        let today = Local::now().date_naive();
        let week_end = today + Days::new(7);

        let db = self.store.read().await;
        let mut found: Vec<EventSummary> = db
            .events
            .values()
            .filter(|e| e.approved)
            .filter(|e| {
                q.is_empty()
                    || e.title.to_lowercase().contains(&q)
                    || e.description.to_lowercase().contains(&q)
            })
            .filter(|e| match venue_filter {
                None => true,
                Some(name) if name.eq_ignore_ascii_case("ALL") => true,
                Some(name) => db
                    .venues
                    .get(&e.venue_id)
                    .is_some_and(|v| v.name.eq_ignore_ascii_case(name)),
            })
            .filter(|e| {
                let d = e.date_time.date();
                match day_filter {
                    DayFilter::All => true,
                    DayFilter::Today => d == today,
                    DayFilter::Week => d >= today && d <= week_end,
                }
            })
            .map(|e| db.summarize(e))
            .collect();
        found.sort_by_key(|s| s.date_time);
        found
    }

    /// Все события, включая неодобренные (админский обзор).
    pub async fn list_all_events(&self) -> Vec<EventSummary> {
        let db = self.store.read().await;
        let mut all: Vec<EventSummary> = db.events.values().map(|e| db.summarize(e)).collect();
        all.sort_by_key(|s| s.date_time);
        all
    }

    pub async fn list_by_organizer(&self, organizer_id: Uuid) -> Vec<EventSummary> {
        let db = self.store.read().await;
        let mut mine: Vec<EventSummary> = db
            .events
            .values()
            .filter(|e| e.organizer_id == organizer_id)
            .map(|e| db.summarize(e))
            .collect();
        mine.sort_by_key(|s| s.date_time);
        mine
    }

    /// Approve/reject — булев флаг без дополнительной state-machine.
    pub async fn set_approved(
        &self,
        event_id: Uuid,
        approved: bool,
    ) -> Result<EventSummary, CatalogError> {
        let mut db = self.store.write().await;
        let event = db
            .events
            .get_mut(&event_id)
            .ok_or(CatalogError::UnknownEvent)?;
        event.approved = approved;
        tracing::info!(%event_id, approved, "event approval updated");
        let summary = db.summarize(&db.events[&event_id]);
        Ok(summary)
    }

    /// Поиск по короткому id (первые 8 символов UUID) — то, что
    /// показывается людям в списках.
    pub async fn find_event_by_short_id(&self, short_id: &str) -> Option<EventSummary> {
        let db = self.store.read().await;
        db.events
            .values()
            .find(|e| e.short_id().eq_ignore_ascii_case(short_id))
            .map(|e| db.summarize(e))
    }

    pub async fn list_venues(&self) -> Vec<Venue> {
        let db = self.store.read().await;
        let mut venues: Vec<Venue> = db.venues.values().cloned().collect();
        venues.sort_by(|a, b| a.name.cmp(&b.name));
        venues
    }

    pub async fn list_venue_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.list_venues().await.into_iter().map(|v| v.name).collect();
        names.dedup();
        names
    }
}
