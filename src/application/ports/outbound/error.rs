//! Error type shared by the storage ports

use crate::domain::entities::EventKind;
use crate::domain::value_objects::EventId;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error in {operation}: {message}")]
    Database {
        operation: &'static str,
        message: String,
    },

    /// A stored value does not decode into the domain model
    #[error("Corrupt record: {0}")]
    Corrupt(String),

    /// The base row names a kind whose child row is absent
    #[error("Event {event_id} is a {kind} event but has no {kind} record")]
    MissingPayload { event_id: EventId, kind: EventKind },
}

impl StoreError {
    pub fn database(operation: &'static str, error: impl ToString) -> Self {
        Self::Database {
            operation,
            message: error.to_string(),
        }
    }

    pub fn corrupt(message: impl ToString) -> Self {
        Self::Corrupt(message.to_string())
    }
}
