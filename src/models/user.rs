use serde::{Deserialize, Serialize};
use uuid::Uuid;

// Три роли из кампусной системы. Никакой auth-политики —
// идентификаторы приходят в заголовках и проверяются на существование.

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Student {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Organizer {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Admin {
    pub id: Uuid,
    pub name: String,
}

impl Student {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self { id: Uuid::new_v4(), name: name.into(), email: email.into() }
    }
}

impl Organizer {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self { id: Uuid::new_v4(), name: name.into(), email: email.into() }
    }
}

impl Admin {
    pub fn new(name: impl Into<String>) -> Self {
        Self { id: Uuid::new_v4(), name: name.into() }
    }
}
