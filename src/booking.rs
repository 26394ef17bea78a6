use thiserror::Error;
use uuid::Uuid;

use crate::models::EventSummary;
use crate::store::Store;

/// Ошибки движка регистраций. Все три — обычные операционные отказы,
/// которые обрабатывает вызывающая сторона; процесс они не роняют.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum BookingError {
    #[error("event not found")]
    UnknownEvent,
    #[error("student is already registered for this event")]
    AlreadyRegistered,
    #[error("no free spots left")]
    EventFull,
}

/// Движок регистраций — единственный компонент, которому разрешено
/// менять состав ledger. Счётчик занятых мест нигде не хранится,
/// он всегда равен размеру множества, поэтому разъехаться им не с чем.
#[derive(Clone)]
pub struct BookingService {
    store: Store,
}

impl BookingService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Регистрация студента. Проверки и вставка происходят под одним
    /// write-гардом: снаружи виден либо результат целиком, либо ничего.
    ///
    /// Approved-флаг и дата здесь сознательно не проверяются — это
    /// политика каталога, а не инвариант вместимости.
    pub async fn register(&self, student_id: Uuid, event_id: Uuid) -> Result<(), BookingError> {
        let mut db = self.store.write().await;
        let capacity = db
            .events
            .get(&event_id)
            .ok_or(BookingError::UnknownEvent)?
            .capacity;

        let ledger = db.registrations.entry(event_id).or_default();
        if ledger.contains(&student_id) {
            return Err(BookingError::AlreadyRegistered);
        }
        if ledger.len() as u32 >= capacity {
            return Err(BookingError::EventFull);
        }
        ledger.insert(student_id);
        tracing::debug!(%student_id, %event_id, "registration accepted");
        Ok(())
    }

    /// Отмена регистрации. Отмена несуществующей регистрации — тихий
    /// успех (идемпотентность); ошибка только для неизвестного события.
    pub async fn cancel(&self, student_id: Uuid, event_id: Uuid) -> Result<(), BookingError> {
        let mut db = self.store.write().await;
        if !db.events.contains_key(&event_id) {
            return Err(BookingError::UnknownEvent);
        }
        if let Some(ledger) = db.registrations.get_mut(&event_id) {
            if ledger.remove(&student_id) {
                tracing::debug!(%student_id, %event_id, "registration cancelled");
            }
        }
        Ok(())
    }

    /// Чистое чтение: неизвестное событие — это false, а не ошибка.
    pub async fn is_registered(&self, event_id: Uuid, student_id: Uuid) -> bool {
        let db = self.store.read().await;
        db.registrations
            .get(&event_id)
            .is_some_and(|ledger| ledger.contains(&student_id))
    }

    /// Все события студента, отсортированные по дате. Снимок на момент
    /// вызова: один read-гард, порванных обновлений не видно.
    pub async fn list_my_events(&self, student_id: Uuid) -> Vec<EventSummary> {
        let db = self.store.read().await;
        let mut mine: Vec<EventSummary> = db
            .events
            .values()
            .filter(|e| {
                db.registrations
                    .get(&e.id)
                    .is_some_and(|ledger| ledger.contains(&student_id))
            })
            .map(|e| db.summarize(e))
            .collect();
        mine.sort_by_key(|s| s.date_time);
        mine
    }

    pub async fn free_spots(&self, event_id: Uuid) -> Result<u32, BookingError> {
        let db = self.store.read().await;
        let event = db.events.get(&event_id).ok_or(BookingError::UnknownEvent)?;
        Ok(event
            .capacity
            .saturating_sub(db.registered_count(event_id) as u32))
    }
}
