use std::sync::Arc;
use tracing::{debug, info};

use crate::auth::Principal;
use crate::database::models::{CashCard, CashCardRequest};
use crate::database::{CashCardRepository, DatabaseError};
use crate::filter::PageRequest;

#[derive(Debug, thiserror::Error)]
pub enum CashCardError {
    /// No card with this id belongs to the caller. Also used when the id exists under
    /// another owner, so callers cannot probe for other people's ids.
    #[error("Cash card {0} not found")]
    NotFound(i64),
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),
}

/// Ownership rules for cash cards. Every call takes the principal explicitly and only
/// ever touches rows whose owner is that principal.
#[derive(Clone)]
pub struct CashCardService {
    repository: Arc<dyn CashCardRepository>,
}

impl CashCardService {
    pub fn new(repository: Arc<dyn CashCardRepository>) -> Self {
        Self { repository }
    }

    pub async fn find(&self, id: i64, principal: &Principal) -> Result<CashCard, CashCardError> {
        debug!("find cash card {} for {}", id, principal.name());
        self.repository
            .find_by_id_and_owner(id, principal.name())
            .await?
            .ok_or(CashCardError::NotFound(id))
    }

    /// Store a new card owned by the principal; returns it with its assigned id
    pub async fn create(&self, request: CashCardRequest, principal: &Principal) -> Result<CashCard, CashCardError> {
        let card = CashCard::new(None, request.amount, principal.name());
        let saved = self.repository.save(card).await?;
        info!("created cash card {:?} for {}", saved.id, principal.name());
        Ok(saved)
    }

    pub async fn list(&self, page: &PageRequest, principal: &Principal) -> Result<Vec<CashCard>, CashCardError> {
        debug!(
            "list cash cards for {} (page {}, size {})",
            principal.name(),
            page.page,
            page.size
        );
        Ok(self.repository.find_page_by_owner(principal.name(), page).await?)
    }

    /// Replace the amount of an owned card; id and owner always come from the stored row
    pub async fn update(&self, id: i64, request: CashCardRequest, principal: &Principal) -> Result<(), CashCardError> {
        let existing = self
            .repository
            .find_by_id_and_owner(id, principal.name())
            .await?
            .ok_or(CashCardError::NotFound(id))?;

        let updated = CashCard::new(existing.id, request.amount, existing.owner);
        self.repository.save(updated).await.map_err(|e| match e {
            // Deleted between the lookup and the write
            DatabaseError::NotFound(_) => CashCardError::NotFound(id),
            other => CashCardError::Database(other),
        })?;
        info!("updated cash card {} for {}", id, principal.name());
        Ok(())
    }

    pub async fn delete(&self, id: i64, principal: &Principal) -> Result<(), CashCardError> {
        if !self.repository.exists_by_id_and_owner(id, principal.name()).await? {
            return Err(CashCardError::NotFound(id));
        }
        if !self.repository.delete_by_id_and_owner(id, principal.name()).await? {
            return Err(CashCardError::NotFound(id));
        }
        info!("deleted cash card {} for {}", id, principal.name());
        Ok(())
    }

    pub async fn health_check(&self) -> Result<(), DatabaseError> {
        self.repository.ping().await
    }
}
