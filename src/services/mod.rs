pub mod cash_card_service;

pub use cash_card_service::{CashCardError, CashCardService};
