//! PostgreSQL-backed person store.
//!
//! All statements run against a shared sqlx pool and are bounded by the
//! configured statement timeout, so a stalled database surfaces as
//! `StorageError::Timeout` rather than a hung request.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};

use super::{ensure_unsaved, PersonRepository, StorageError};
use crate::config::DatabaseConfig;
use crate::person::{Person, PersonId};

const CREATE_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS person (
        id   BIGSERIAL PRIMARY KEY,
        name TEXT NOT NULL,
        age  TEXT NOT NULL
    );
"#;

const INSERT_PERSON: &str = r#"
    INSERT INTO person (name, age)
    VALUES ($1::TEXT, $2::TEXT)
    RETURNING id;
"#;

const SELECT_PERSON: &str = r#"
    SELECT id, name, age
    FROM person
    WHERE id = $1::BIGINT;
"#;

#[derive(Clone, Debug)]
pub struct PgPersonRepository {
    pool: PgPool,
    statement_timeout: Duration,
}

impl PgPersonRepository {
    pub fn new(pool: PgPool, statement_timeout: Duration) -> Self {
        Self {
            pool,
            statement_timeout,
        }
    }

    /// Build the pool and check a connection can actually be acquired.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, StorageError> {
        let pool = PgPoolOptions::new()
            .min_connections(config.min_connections)
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout())
            .idle_timeout(Duration::from_secs(600))
            .test_before_acquire(true)
            .connect(&config.url)
            .await?;

        let repo = Self::new(pool, config.statement_timeout());
        repo.warm_up().await?;

        tracing::info!(
            max_connections = config.max_connections,
            statement_timeout_secs = config.statement_timeout_seconds,
            "Connected to PostgreSQL"
        );

        Ok(repo)
    }

    pub async fn warm_up(&self) -> Result<(), StorageError> {
        self.bounded(sqlx::query("SELECT 1").execute(&self.pool)).await?;
        Ok(())
    }

    /// Create the `person` table on first start. There is no versioning past this.
    pub async fn ensure_schema(&self) -> Result<(), StorageError> {
        self.bounded(sqlx::query(CREATE_TABLE).execute(&self.pool)).await?;
        tracing::debug!("person table ready");
        Ok(())
    }

    async fn bounded<T, F>(&self, fut: F) -> Result<T, StorageError>
    where
        F: Future<Output = Result<T, sqlx::Error>>,
    {
        match tokio::time::timeout(self.statement_timeout, fut).await {
            Ok(result) => result.map_err(StorageError::from),
            Err(_) => Err(StorageError::Timeout(self.statement_timeout)),
        }
    }
}

#[async_trait]
impl PersonRepository for PgPersonRepository {
    async fn save(&self, person: Person) -> Result<Option<Person>, StorageError> {
        ensure_unsaved(&person)?;

        let row: Option<(i64,)> = self
            .bounded(
                sqlx::query_as(INSERT_PERSON)
                    .bind(person.name())
                    .bind(person.age())
                    .fetch_optional(&self.pool),
            )
            .await?;

        Ok(row.map(|(id,)| person.persisted(PersonId::from_i64(id))))
    }

    async fn find_by_id(&self, id: PersonId) -> Result<Option<Person>, StorageError> {
        let row: Option<(i64, String, String)> = self
            .bounded(
                sqlx::query_as(SELECT_PERSON)
                    .bind(id.to_i64())
                    .fetch_optional(&self.pool),
            )
            .await?;

        Ok(row.map(|(id, name, age)| Person::new(name, age).persisted(PersonId::from_i64(id))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DATABASE_URL_ENV;

    /// Runs only against a live database: `DATABASE_URL=postgres://... cargo test`.
    /// Skipped when the variable is unset; a set but broken database fails the test.
    async fn live_repository() -> Option<PgPersonRepository> {
        let url = std::env::var(DATABASE_URL_ENV).ok()?;
        let config = DatabaseConfig {
            url,
            ..DatabaseConfig::default()
        };
        let repo = PgPersonRepository::connect(&config).await.unwrap();
        repo.ensure_schema().await.unwrap();
        Some(repo)
    }

    /// Repository over a pool that never connects until a query needs it.
    fn lazy_repository(statement_timeout: Duration) -> PgPersonRepository {
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://nobody@127.0.0.1:1/none")
            .unwrap();
        PgPersonRepository::new(pool, statement_timeout)
    }

    #[tokio::test]
    async fn test_stalled_statement_times_out() {
        let timeout = Duration::from_millis(50);
        let repo = lazy_repository(timeout);

        let result = repo
            .bounded(std::future::pending::<Result<(), sqlx::Error>>())
            .await;
        assert_eq!(result, Err(StorageError::Timeout(timeout)));
    }

    #[tokio::test]
    async fn test_completed_statement_is_not_timed_out() {
        let repo = lazy_repository(Duration::from_secs(1));

        let result = repo.bounded(async { Ok::<_, sqlx::Error>(7) }).await;
        assert_eq!(result, Ok(7));
    }

    #[tokio::test]
    async fn test_saving_persisted_person_is_rejected_before_querying() {
        let repo = lazy_repository(Duration::from_secs(1));
        let saved = Person::demo().persisted(PersonId::from_i64(1));

        let err = repo.save(saved).await.unwrap_err();
        assert!(matches!(err, StorageError::Rejected(_)));
    }

    #[tokio::test]
    async fn test_save_then_find_against_postgres() {
        let Some(repo) = live_repository().await else {
            return;
        };

        let saved = repo
            .save(Person::new("Johannes", "23"))
            .await
            .unwrap()
            .unwrap();
        let id = saved.id().unwrap();

        let found = repo.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(found.name(), "Johannes");
        assert_eq!(found.age(), "23");
        assert_eq!(found.id(), Some(id));
    }

    #[tokio::test]
    async fn test_repeated_saves_get_distinct_ids_against_postgres() {
        let Some(repo) = live_repository().await else {
            return;
        };

        let first = repo.save(Person::demo()).await.unwrap().unwrap();
        let second = repo.save(Person::demo()).await.unwrap().unwrap();
        assert_ne!(first.id(), second.id());
    }

    #[tokio::test]
    async fn test_connect_to_unreachable_host_is_unavailable() {
        let config = DatabaseConfig {
            url: "postgres://nobody@127.0.0.1:1/none".to_string(),
            acquire_timeout_seconds: 1,
            min_connections: 0,
            ..DatabaseConfig::default()
        };
        let err = PgPersonRepository::connect(&config).await.unwrap_err();
        assert!(matches!(err, StorageError::Unavailable(_)));
    }
}
