// handlers/public/mod.rs - endpoints reachable without credentials
pub mod health;

pub use health::health;
