//! Storage access for `Person` records.
//!
//! `PersonRepository` is the only seam that touches the storage engine.
//! `PgPersonRepository` talks to PostgreSQL through a sqlx pool;
//! `InMemoryPersonRepository` keeps records in process and can be told to
//! fail, which is how the endpoint and service tests exercise fault paths.

mod memory;
mod postgres;

use std::time::Duration;

use async_trait::async_trait;

use crate::person::{Person, PersonId};

pub use memory::InMemoryPersonRepository;
pub use postgres::PgPersonRepository;

/// Storage-layer fault. Propagated unchanged up to the endpoint layer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("Storage did not answer within {0:?}")]
    Timeout(Duration),

    #[error("Storage rejected the write: {0}")]
    Rejected(String),
}

impl From<sqlx::Error> for StorageError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => {
                if db_err.code().is_some_and(|code| is_availability_code(&code)) {
                    StorageError::Unavailable(db_err.to_string())
                } else {
                    StorageError::Rejected(db_err.to_string())
                }
            }
            sqlx::Error::PoolTimedOut => {
                StorageError::Unavailable("timed out acquiring a pooled connection".to_string())
            }
            other => StorageError::Unavailable(other.to_string()),
        }
    }
}

/// SQLSTATEs that mean the server cannot serve us right now, not that it
/// refused this write: class 08 (connection exception), 53300
/// (too_many_connections) and 57P01..57P03 (shutdown, cannot connect now).
fn is_availability_code(code: &str) -> bool {
    code.starts_with("08") || matches!(code, "53300" | "57P01" | "57P02" | "57P03")
}

#[async_trait]
pub trait PersonRepository: Send + Sync {
    /// Persist a new person and return it with its assigned id.
    ///
    /// `Ok(None)` means the store accepted the call but produced no record.
    async fn save(&self, person: Person) -> Result<Option<Person>, StorageError>;

    async fn find_by_id(&self, id: PersonId) -> Result<Option<Person>, StorageError>;
}

/// Refuse persons that already carry an id; ids are assigned exactly once.
fn ensure_unsaved(person: &Person) -> Result<(), StorageError> {
    match person.id() {
        Some(id) => Err(StorageError::Rejected(format!("person already has id {}", id))),
        None => Ok(()),
    }
}
