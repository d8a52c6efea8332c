//! Persist-and-report endpoint.
//!
//! Writes the demo person on every call and reports the id storage assigned.
//! Repeated calls write repeated records.

use axum::{extract::State, http::StatusCode, Extension};
use http::header::ALLOW;
use tracing::instrument;

use crate::config::SAVE_FAILED_MESSAGE;
use crate::error::AppError;
use crate::middleware::RequestId;
use crate::person::{Person, PersonId};
use crate::state::AppState;

pub fn saved_message(id: PersonId) -> String {
    format!("Gratz, a Person with the id {} was saved to the DB", id)
}

/// Saves `Person::demo()`.
///
/// Absent result renders the failure text with 200; a storage fault becomes an
/// `AppError` with a non-success status.
#[instrument(name = "database::save_demo_person", skip(state, request_id), fields(request_id = %request_id.0))]
pub async fn save_demo_person(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
) -> Result<String, AppError> {
    let saved = state.people.save(Person::demo()).await?;

    match saved.as_ref().and_then(Person::id) {
        Some(id) => Ok(saved_message(id)),
        None => {
            tracing::warn!("Repository produced no record");
            Ok(SAVE_FAILED_MESSAGE.to_string())
        }
    }
}

/// HEAD must stay side-effect free, so it is refused rather than run as a write.
pub async fn refuse_head() -> (StatusCode, [(http::HeaderName, &'static str); 1]) {
    (StatusCode::METHOD_NOT_ALLOWED, [(ALLOW, "GET")])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_saved_message() {
        assert_eq!(
            saved_message(PersonId::from_i64(1)),
            "Gratz, a Person with the id 1 was saved to the DB"
        );
    }
}
