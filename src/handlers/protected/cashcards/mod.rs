pub mod collection;
pub mod record;

// Re-export handler functions for use in routing
pub use collection::list as cashcards_list;
pub use collection::post as cashcards_post;

pub use record::delete as cashcard_delete;
pub use record::get as cashcard_get;
pub use record::put as cashcard_put;

/// Canonical path of a single card, used for the Location header
pub fn cashcard_path(id: i64) -> String {
    format!("/cashcards/{}", id)
}
