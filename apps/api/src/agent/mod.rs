// Agent: one end-to-end run from an uploaded résumé to ranked listings.
// `pipeline` holds the orchestration, `handlers` the multipart HTTP glue.

pub mod handlers;
pub mod models;
pub mod pipeline;
