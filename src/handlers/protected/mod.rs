// handlers/protected/mod.rs - handlers behind the Basic auth middleware
//
// Each handler receives the authenticated `Principal` as an explicit argument and passes
// it on to the service layer.
pub mod cashcards;
