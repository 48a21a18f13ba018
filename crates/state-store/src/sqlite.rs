use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{Row, SqlitePool, sqlite::SqliteRow};

use crate::{
    Result, Revision, StateDocument, StoreError,
    store::{PutOptions, StateStore},
};

/// SQLite-backed state store implementation.
///
/// Documents live in the `state_documents` table, one row per name.
#[derive(Clone)]
pub struct SqliteStateStore {
    pool: SqlitePool,
}

impl SqliteStateStore {
    /// Creates a new SQLite state store.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Connects to `database_url` and returns a store over the new pool.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = SqlitePool::connect(database_url).await?;
        Ok(Self::new(pool))
    }

    /// Gets a reference to the underlying connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Runs the database migrations.
    pub async fn run_migrations(&self) -> std::result::Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("../../migrations").run(&self.pool).await
    }

    fn row_to_document(row: SqliteRow) -> Result<StateDocument> {
        let state: String = row.try_get("state")?;

        Ok(StateDocument {
            name: row.try_get("name")?,
            revision: Revision::new(row.try_get("revision")?),
            updated_at: row.try_get::<DateTime<Utc>, _>("updated_at")?,
            state: serde_json::from_str(&state)?,
        })
    }
}

#[async_trait]
impl StateStore for SqliteStateStore {
    #[tracing::instrument(skip(self))]
    async fn get(&self, name: &str) -> Result<Option<StateDocument>> {
        let row = sqlx::query(
            r#"
            SELECT name, revision, updated_at, state
            FROM state_documents
            WHERE name = ?1
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Self::row_to_document).transpose()
    }

    #[tracing::instrument(skip(self, document), fields(name = %document.name))]
    async fn put(&self, document: StateDocument, options: PutOptions) -> Result<Revision> {
        let state = serde_json::to_string(&document.state)?;

        // Check-and-write inside one transaction
        let mut tx = self.pool.begin().await?;

        let current: Option<i64> =
            sqlx::query_scalar("SELECT revision FROM state_documents WHERE name = ?1")
                .bind(&document.name)
                .fetch_optional(&mut *tx)
                .await?;
        let current = Revision::new(current.unwrap_or(0));

        if let Some(expected) = options.expected_revision
            && current != expected
        {
            return Err(StoreError::RevisionConflict {
                name: document.name,
                expected,
                actual: current,
            });
        }

        let revision = current.next();
        sqlx::query(
            r#"
            INSERT INTO state_documents (name, revision, updated_at, state)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT (name) DO UPDATE SET
                revision = excluded.revision,
                updated_at = excluded.updated_at,
                state = excluded.state
            "#,
        )
        .bind(&document.name)
        .bind(revision.as_i64())
        .bind(Utc::now())
        .bind(state)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        metrics::counter!("state_store_puts_total", "backend" => "sqlite").increment(1);
        tracing::debug!(%revision, "state document written");
        Ok(revision)
    }

    async fn get_revision(&self, name: &str) -> Result<Revision> {
        let revision: Option<i64> =
            sqlx::query_scalar("SELECT revision FROM state_documents WHERE name = ?1")
                .bind(name)
                .fetch_optional(&self.pool)
                .await?;

        Ok(Revision::new(revision.unwrap_or(0)))
    }
}
