//! Process-local person store.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{ensure_unsaved, PersonRepository, StorageError};
use crate::person::{Person, PersonId};

/// How the next calls should behave, for exercising failure paths.
#[derive(Debug, Clone)]
enum Behavior {
    Store,
    NoRecord,
    Fail(StorageError),
}

#[derive(Debug)]
struct Inner {
    people: BTreeMap<PersonId, Person>,
    next_id: i64,
    behavior: Behavior,
}

/// In-memory repository. Ids start at 1 and are never reused.
#[derive(Debug)]
pub struct InMemoryPersonRepository {
    inner: RwLock<Inner>,
}

impl Default for InMemoryPersonRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryPersonRepository {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                people: BTreeMap::new(),
                next_id: 1,
                behavior: Behavior::Store,
            }),
        }
    }

    /// A repository whose every call fails with `err`.
    pub fn failing(err: StorageError) -> Self {
        let mut repo = Self::new();
        repo.inner.get_mut().behavior = Behavior::Fail(err);
        repo
    }

    /// Make subsequent calls fail with `err`.
    pub async fn fail_with(&self, err: StorageError) {
        self.inner.write().await.behavior = Behavior::Fail(err);
    }

    /// Make subsequent saves return the absent result without storing anything.
    pub async fn produce_no_record(&self) {
        self.inner.write().await.behavior = Behavior::NoRecord;
    }

    /// Back to normal operation.
    pub async fn recover(&self) {
        self.inner.write().await.behavior = Behavior::Store;
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.people.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl PersonRepository for InMemoryPersonRepository {
    async fn save(&self, person: Person) -> Result<Option<Person>, StorageError> {
        let mut inner = self.inner.write().await;

        match &inner.behavior {
            Behavior::Fail(err) => return Err(err.clone()),
            Behavior::NoRecord => return Ok(None),
            Behavior::Store => {}
        }

        ensure_unsaved(&person)?;

        let id = PersonId::from_i64(inner.next_id);
        inner.next_id += 1;

        let saved = person.persisted(id);
        inner.people.insert(id, saved.clone());
        Ok(Some(saved))
    }

    async fn find_by_id(&self, id: PersonId) -> Result<Option<Person>, StorageError> {
        let inner = self.inner.read().await;

        if let Behavior::Fail(err) = &inner.behavior {
            return Err(err.clone());
        }

        Ok(inner.people.get(&id).cloned())
    }
}
