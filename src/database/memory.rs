use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use crate::database::manager::DatabaseError;
use crate::database::models::CashCard;
use crate::database::repository::CashCardRepository;
use crate::filter::{FilterOrder, PageRequest};

#[derive(Debug, Default)]
struct Table {
    rows: BTreeMap<i64, CashCard>,
    next_id: i64,
}

/// Process-local record store with the same semantics as the postgres one.
/// Ids are assigned from a counter that always stays above every stored id.
#[derive(Debug)]
pub struct InMemoryCashCardRepository {
    table: RwLock<Table>,
}

impl InMemoryCashCardRepository {
    pub fn new() -> Self {
        Self::with_cards(Vec::new())
    }

    /// Start from existing rows; cards without an id are assigned one
    pub fn with_cards(cards: Vec<CashCard>) -> Self {
        let mut table = Table {
            rows: BTreeMap::new(),
            next_id: 1,
        };
        for card in cards {
            let id = card.id.unwrap_or(table.next_id);
            table.next_id = table.next_id.max(id + 1);
            table.rows.insert(id, CashCard { id: Some(id), ..card });
        }
        Self {
            table: RwLock::new(table),
        }
    }
}

impl Default for InMemoryCashCardRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CashCardRepository for InMemoryCashCardRepository {
    async fn find_by_id_and_owner(&self, id: i64, owner: &str) -> Result<Option<CashCard>, DatabaseError> {
        let table = self.table.read().await;
        Ok(table.rows.get(&id).filter(|card| card.owner == owner).cloned())
    }

    async fn find_page_by_owner(&self, owner: &str, page: &PageRequest) -> Result<Vec<CashCard>, DatabaseError> {
        let offset = usize::try_from(page.offset())
            .map_err(|_| DatabaseError::QueryError(format!("page {} is out of range", page.page)))?;

        let table = self.table.read().await;
        let mut cards: Vec<CashCard> = table
            .rows
            .values()
            .filter(|card| card.owner == owner)
            .cloned()
            .collect();
        cards.sort_by(|a, b| FilterOrder::compare(a, b, &page.sort));

        Ok(cards.into_iter().skip(offset).take(page.size as usize).collect())
    }

    async fn save(&self, card: CashCard) -> Result<CashCard, DatabaseError> {
        let mut table = self.table.write().await;
        match card.id {
            None => {
                let id = table.next_id;
                table.next_id += 1;
                let saved = CashCard { id: Some(id), ..card };
                table.rows.insert(id, saved.clone());
                Ok(saved)
            }
            Some(id) => match table.rows.get_mut(&id) {
                Some(existing) => {
                    *existing = card.clone();
                    Ok(card)
                }
                None => Err(DatabaseError::NotFound(format!("cash card {} does not exist", id))),
            },
        }
    }

    async fn delete_by_id_and_owner(&self, id: i64, owner: &str) -> Result<bool, DatabaseError> {
        let mut table = self.table.write().await;
        let owned = table.rows.get(&id).is_some_and(|card| card.owner == owner);
        if owned {
            table.rows.remove(&id);
        }
        Ok(owned)
    }

    async fn exists_by_id_and_owner(&self, id: i64, owner: &str) -> Result<bool, DatabaseError> {
        let table = self.table.read().await;
        Ok(table.rows.get(&id).is_some_and(|card| card.owner == owner))
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        Ok(())
    }
}
