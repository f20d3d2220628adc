use sqlx::{postgres::PgPoolOptions, PgPool};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::info;

use crate::config::{DatabaseConfig, StoreBackend};

use super::memory::InMemoryCashCardRepository;
use super::repository::{CashCardRepository, PgCashCardRepository};
use super::seed;

/// Errors from the record store
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Query error: {0}")]
    QueryError(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

const CREATE_CASH_CARD_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS cash_card (
        id     BIGSERIAL    PRIMARY KEY,
        amount NUMERIC      NOT NULL DEFAULT 0,
        owner  VARCHAR(256) NOT NULL
    )
"#;

const CREATE_OWNER_INDEX: &str = "CREATE INDEX IF NOT EXISTS cash_card_owner_idx ON cash_card (owner)";

/// Opens the configured record store and prepares it for use
pub struct DatabaseManager;

impl DatabaseManager {
    /// Build the repository selected by `config.backend`.
    /// For postgres this connects, bootstraps the table and optionally seeds demo rows.
    pub async fn open(config: &DatabaseConfig) -> Result<Arc<dyn CashCardRepository>, DatabaseError> {
        match config.backend {
            StoreBackend::Memory => {
                let repository = if config.seed_demo_data {
                    InMemoryCashCardRepository::with_cards(seed::demo_cards())
                } else {
                    InMemoryCashCardRepository::new()
                };
                info!("Using in-memory cash card store");
                Ok(Arc::new(repository))
            }
            StoreBackend::Postgres => {
                let pool = Self::connect(config).await?;
                Self::bootstrap_schema(&pool).await?;
                if config.seed_demo_data {
                    seed::seed_postgres(&pool).await?;
                }
                let threshold = config
                    .enable_slow_query_warning
                    .then(|| Duration::from_millis(config.slow_query_threshold_ms));
                Ok(Arc::new(PgCashCardRepository::new(pool).with_slow_query_threshold(threshold)))
            }
        }
    }

    /// Create a connection pool from the configured DATABASE_URL
    pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, DatabaseError> {
        let url = config
            .url
            .as_deref()
            .ok_or(DatabaseError::ConfigMissing("DATABASE_URL"))?;

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout))
            .connect(url)
            .await?;

        info!("Created database pool (max {} connections)", config.max_connections);
        Ok(pool)
    }

    /// Create the cash_card table if it is missing
    pub async fn bootstrap_schema(pool: &PgPool) -> Result<(), DatabaseError> {
        sqlx::query(CREATE_CASH_CARD_TABLE).execute(pool).await?;
        sqlx::query(CREATE_OWNER_INDEX).execute(pool).await?;
        info!("cash_card schema ready");
        Ok(())
    }
}
