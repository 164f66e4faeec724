// Keyword extraction and overlap scoring.

pub mod keywords;
pub mod overlap;
pub mod traits;
