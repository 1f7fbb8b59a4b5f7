// Job board harvesting: paginated search → listing stubs → per-listing details.
// All network access goes through the `JobBoard` trait in `board`.

pub mod board;
pub mod detail;
pub mod models;
pub mod search;

pub use board::{HttpJobBoard, JobBoard};
pub use detail::enrich_postings;
pub use search::harvest;
