// Résumé understanding: heuristic text → ParsedResume.
// Pure and deterministic; nothing here touches the network.

pub mod keywords;
pub mod models;
pub mod parser;

pub use models::ParsedResume;
pub use parser::parse_resume;
