// handlers/mod.rs - handler tiers
//
// Public (no auth) -> Protected (Basic auth + CARD-OWNER role)
pub mod public;    // /health
pub mod protected; // /cashcards
