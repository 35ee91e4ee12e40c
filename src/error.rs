use thiserror::Error;

/// Custom Result type for this crate.
pub type Result<T> = std::result::Result<T, TorahError>;

/// Enum representing all possible errors in the torah_rs library.
///
/// Lexicon lookup misses and stale/corrupt cache snapshots are *not* errors;
/// those are normal control flow inside the lexical core. Only the data
/// loading glue (network, filesystem, JSON) can fail.
#[derive(Error, Debug)]
pub enum TorahError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Data directory not found or could not be determined")]
    DataDirNotFound,

    #[error("Required data file not found: {0}")]
    DataFileNotFound(String),

    #[error("Book not found: {0}")]
    BookNotFound(String),

    #[error("Verse not found: {book} {chapter}:{verse}")]
    VerseNotFound {
        book: String,
        chapter: u32,
        verse: u32,
    },

    #[error("Internal error: {0}")]
    Internal(String), // For unexpected situations
}
