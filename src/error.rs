use thiserror::Error;

/// Error types for watch log operations.
///
/// This enum covers everything that can go wrong while logging media: talking to the
/// catalog service, parsing its responses, reading and writing the local database,
/// and validating what the user typed.
///
/// # Error Handling Examples
///
/// ```rust,no_run
/// use watchlog::{MediaStore, WatchLogError};
///
/// let store = MediaStore::open("media_tracker.db").unwrap();
///
/// match store.delete(42) {
///     Ok(()) => println!("Media deleted."),
///     Err(WatchLogError::NotFound(id)) => eprintln!("No media entry with id {id}"),
///     Err(WatchLogError::Storage(e)) => eprintln!("Database error: {e}"),
///     Err(e) => eprintln!("Other error: {e}"),
/// }
/// ```
#[derive(Error, Debug)]
pub enum WatchLogError {
    /// HTTP/network related errors.
    ///
    /// This includes connection failures, DNS errors and non-success status codes
    /// returned by the catalog service.
    #[error("HTTP error: {0}")]
    Http(String),

    /// Failed to parse a catalog response.
    ///
    /// Raised when the body cannot be read or is not the JSON shape we expect.
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// Database errors (connection or query failure).
    #[error("Database error: {0}")]
    Storage(#[from] rusqlite::Error),

    /// No media entry exists with the given id.
    #[error("No media entry with id {0}")]
    NotFound(i64),

    /// The user typed something we cannot use, or an entry failed validation.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration problems, such as an undeterminable data directory.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Terminal and file system I/O errors.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl WatchLogError {
    /// Whether this error came from the catalog service rather than local state.
    ///
    /// Transient errors are not worth aborting an "add" for: the caller falls back to
    /// manual entry instead.
    pub fn is_transient(&self) -> bool {
        matches!(self, WatchLogError::Http(_) | WatchLogError::Parse(_))
    }
}
