//! Domain service: hands persons to the repository and reports the outcome.

use std::sync::Arc;

use tracing::instrument;

use crate::person::{Person, PersonId};
use crate::repository::{PersonRepository, StorageError};

/// Holds an explicit reference to the repository it delegates to.
#[derive(Clone)]
pub struct PersonService {
    repository: Arc<dyn PersonRepository>,
}

impl PersonService {
    pub fn new(repository: Arc<dyn PersonRepository>) -> Self {
        Self { repository }
    }

    /// Save `person` and return the repository's answer unchanged.
    ///
    /// Faults are not retried or translated; `Ok(None)` passes through as-is.
    #[instrument(name = "person_service::save", skip(self, person), fields(name = %person.name()))]
    pub async fn save(&self, person: Person) -> Result<Option<Person>, StorageError> {
        let saved = self.repository.save(person).await?;

        if let Some(id) = saved.as_ref().and_then(Person::id) {
            tracing::info!(%id, "Entity saved");
        }

        Ok(saved)
    }

    pub async fn find(&self, id: PersonId) -> Result<Option<Person>, StorageError> {
        self.repository.find_by_id(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryPersonRepository;

    fn service_with(
        repo: InMemoryPersonRepository,
    ) -> (PersonService, Arc<InMemoryPersonRepository>) {
        let repo = Arc::new(repo);
        (PersonService::new(repo.clone()), repo)
    }

    #[tokio::test]
    async fn test_save_returns_assigned_id() {
        let (service, _) = service_with(InMemoryPersonRepository::new());
        let saved = service.save(Person::demo()).await.unwrap().unwrap();
        assert_eq!(saved.id(), Some(PersonId::from_i64(1)));
    }

    #[tokio::test]
    async fn test_save_then_find_returns_same_fields() {
        let (service, _) = service_with(InMemoryPersonRepository::new());
        let saved = service
            .save(Person::new("Linus", "fifty-something"))
            .await
            .unwrap()
            .unwrap();

        let found = service.find(saved.id().unwrap()).await.unwrap().unwrap();
        assert_eq!(found.name(), "Linus");
        assert_eq!(found.age(), "fifty-something");
    }

    #[tokio::test]
    async fn test_fault_propagates_unchanged() {
        let fault = StorageError::Timeout(std::time::Duration::from_secs(5));
        let (service, _) = service_with(InMemoryPersonRepository::failing(fault.clone()));

        assert_eq!(service.save(Person::demo()).await, Err(fault));
    }

    #[tokio::test]
    async fn test_absent_result_passes_through() {
        let (service, repo) = service_with(InMemoryPersonRepository::new());
        repo.produce_no_record().await;

        assert_eq!(service.save(Person::demo()).await, Ok(None));
        assert!(repo.is_empty().await);
    }

    #[tokio::test]
    async fn test_no_deduplication() {
        let (service, repo) = service_with(InMemoryPersonRepository::new());
        service.save(Person::demo()).await.unwrap();
        service.save(Person::demo()).await.unwrap();
        assert_eq!(repo.len().await, 2);
    }
}
