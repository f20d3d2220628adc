pub mod cash_card;

pub use cash_card::{CashCard, CashCardRequest};
