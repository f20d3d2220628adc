pub mod types;
pub mod filter_order;
pub mod filter_page;
pub mod error;

pub use types::*;
pub use error::FilterError;
pub use filter_order::FilterOrder;
