// Question decks: CSV records, merging and flashcard export.

pub mod csv_io;
pub mod export;
pub mod merge;
pub mod record;
