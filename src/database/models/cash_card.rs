use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A stored cash card. `id` is absent until the store assigns one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct CashCard {
    pub id: Option<i64>,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub owner: String,
}

impl CashCard {
    pub fn new(id: Option<i64>, amount: Decimal, owner: impl Into<String>) -> Self {
        Self {
            id,
            amount,
            owner: owner.into(),
        }
    }
}

/// Write payload for create and update. Only `amount` is read; an `id` or `owner`
/// sent by the client is dropped during deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CashCardRequest {
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}
