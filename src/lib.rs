// studydeck: transcript deduplication and deck coverage for certification study
//
// This is the library root. Each module corresponds to one stage of the
// study-content pipeline: reading lesson labels, grouping duplicates,
// scoring keyword overlap against the existing deck, and maintaining the
// question CSVs that flashcards are exported from.

pub mod config;
pub mod coverage;
pub mod dedup;
pub mod deck;
pub mod labels;
pub mod output;
pub mod pipeline;
pub mod status;
pub mod topics;
