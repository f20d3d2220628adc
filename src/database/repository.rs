use async_trait::async_trait;
use sqlx::PgPool;
use std::time::{Duration, Instant};

use crate::database::manager::DatabaseError;
use crate::database::models::CashCard;
use crate::filter::{FilterOrder, PageRequest};

/// Owner-scoped access to stored cash cards.
///
/// Every read and delete takes the owner alongside the id, so a caller can never reach a
/// row that belongs to somebody else through this interface.
#[async_trait]
pub trait CashCardRepository: Send + Sync {
    /// The card with this id, if it exists and belongs to `owner`
    async fn find_by_id_and_owner(&self, id: i64, owner: &str) -> Result<Option<CashCard>, DatabaseError>;

    /// One page of `owner`'s cards in the requested order
    async fn find_page_by_owner(&self, owner: &str, page: &PageRequest) -> Result<Vec<CashCard>, DatabaseError>;

    /// Insert when `card.id` is `None`, otherwise overwrite the row with that id.
    /// Overwriting a missing row is [`DatabaseError::NotFound`].
    async fn save(&self, card: CashCard) -> Result<CashCard, DatabaseError>;

    /// Remove the card if it belongs to `owner`; `true` when a row was removed
    async fn delete_by_id_and_owner(&self, id: i64, owner: &str) -> Result<bool, DatabaseError>;

    async fn exists_by_id_and_owner(&self, id: i64, owner: &str) -> Result<bool, DatabaseError>;

    /// Cheap round trip used by the health endpoint
    async fn ping(&self) -> Result<(), DatabaseError>;
}

pub struct PgCashCardRepository {
    pool: PgPool,
    slow_query_threshold: Option<Duration>,
}

impl PgCashCardRepository {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            slow_query_threshold: None,
        }
    }

    pub fn with_slow_query_threshold(mut self, threshold: Option<Duration>) -> Self {
        self.slow_query_threshold = threshold;
        self
    }

    fn observe(&self, query: &str, started: Instant) {
        if let Some(threshold) = self.slow_query_threshold {
            let elapsed = started.elapsed();
            if elapsed > threshold {
                tracing::warn!("Slow query {} took {}ms", query, elapsed.as_millis());
            }
        }
    }
}

#[async_trait]
impl CashCardRepository for PgCashCardRepository {
    async fn find_by_id_and_owner(&self, id: i64, owner: &str) -> Result<Option<CashCard>, DatabaseError> {
        let started = Instant::now();
        let card = sqlx::query_as::<_, CashCard>(
            "SELECT id, amount, owner FROM cash_card WHERE id = $1 AND owner = $2",
        )
        .bind(id)
        .bind(owner)
        .fetch_optional(&self.pool)
        .await?;
        self.observe("find_by_id_and_owner", started);
        Ok(card)
    }

    async fn find_page_by_owner(&self, owner: &str, page: &PageRequest) -> Result<Vec<CashCard>, DatabaseError> {
        let offset = i64::try_from(page.offset())
            .map_err(|_| DatabaseError::QueryError(format!("page {} is out of range", page.page)))?;

        let sql = format!(
            "SELECT id, amount, owner FROM cash_card WHERE owner = $1 {} LIMIT $2 OFFSET $3",
            FilterOrder::generate(&page.sort)
        );

        let started = Instant::now();
        let cards = sqlx::query_as::<_, CashCard>(&sql)
            .bind(owner)
            .bind(i64::from(page.size))
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;
        self.observe("find_page_by_owner", started);
        Ok(cards)
    }

    async fn save(&self, card: CashCard) -> Result<CashCard, DatabaseError> {
        let started = Instant::now();
        let saved = match card.id {
            None => {
                sqlx::query_as::<_, CashCard>(
                    "INSERT INTO cash_card (amount, owner) VALUES ($1, $2) RETURNING id, amount, owner",
                )
                .bind(card.amount)
                .bind(&card.owner)
                .fetch_one(&self.pool)
                .await?
            }
            Some(id) => sqlx::query_as::<_, CashCard>(
                "UPDATE cash_card SET amount = $2, owner = $3 WHERE id = $1 RETURNING id, amount, owner",
            )
            .bind(id)
            .bind(card.amount)
            .bind(&card.owner)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("cash card {} does not exist", id)))?,
        };
        self.observe("save", started);
        Ok(saved)
    }

    async fn delete_by_id_and_owner(&self, id: i64, owner: &str) -> Result<bool, DatabaseError> {
        let started = Instant::now();
        let result = sqlx::query("DELETE FROM cash_card WHERE id = $1 AND owner = $2")
            .bind(id)
            .bind(owner)
            .execute(&self.pool)
            .await?;
        self.observe("delete_by_id_and_owner", started);
        Ok(result.rows_affected() > 0)
    }

    async fn exists_by_id_and_owner(&self, id: i64, owner: &str) -> Result<bool, DatabaseError> {
        let started = Instant::now();
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM cash_card WHERE id = $1 AND owner = $2)",
        )
        .bind(id)
        .bind(owner)
        .fetch_one(&self.pool)
        .await?;
        self.observe("exists_by_id_and_owner", started);
        Ok(exists)
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
