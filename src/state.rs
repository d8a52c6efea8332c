//! Shared application state for request handlers.

use crate::service::PersonService;

/// Shared application state, cloneable across handlers.
///
/// Built once at startup from an explicit repository; nothing is looked up
/// from a global registry.
#[derive(Clone)]
pub struct AppState {
    pub people: PersonService,
}

impl AppState {
    pub fn new(people: PersonService) -> Self {
        Self { people }
    }
}
