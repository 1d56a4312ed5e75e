use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Draft metadata stored alongside the workshop session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DraftMetadata {
    /// Stable identity of this draft across saves.
    pub id: Uuid,
    /// Human-readable draft name.
    pub name: String,
    /// When the draft was first created.
    pub created: DateTime<Utc>,
    /// When the draft was last saved.
    pub modified: DateTime<Utc>,
}

impl DraftMetadata {
    /// Create metadata with the given name, a fresh id, and the current
    /// timestamp.
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            created: now,
            modified: now,
        }
    }

    /// Bump the modification timestamp, as on save-over.
    pub fn touch(&mut self) {
        self.modified = Utc::now();
    }
}
