//! person-vault: a liveness endpoint and a demo `Person` store.
//!
//! Requests flow through three explicitly composed layers:
//! the axum routes hold a `PersonService`, which holds a `PersonRepository`
//! (PostgreSQL or in-memory). The id assigned by storage travels back up the
//! same path into the plain-text response.

pub mod config;
pub mod error;
pub mod http;
pub mod logging;
pub mod middleware;
pub mod person;
pub mod repository;
pub mod routes;
pub mod service;
pub mod state;

pub use config::AppConfig;
pub use error::AppError;
pub use person::{Person, PersonId};
pub use repository::{InMemoryPersonRepository, PersonRepository, PgPersonRepository, StorageError};
pub use routes::create_router;
pub use service::PersonService;
pub use state::AppState;
