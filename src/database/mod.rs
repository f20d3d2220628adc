pub mod manager;
pub mod memory;
pub mod models;
pub mod repository;
pub mod seed;

pub use manager::{DatabaseError, DatabaseManager};
pub use memory::InMemoryCashCardRepository;
pub use repository::{CashCardRepository, PgCashCardRepository};
