use thiserror::Error;

// Crate-wide Result alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong while paging, matching or configuring.
#[derive(Error, Debug)]
pub enum Error {
    // ---- Paging -------------------------------------------------------------
    /// A fetch against the paginated source failed. Never retried.
    #[error("Source unavailable: {0}")]
    SourceUnavailable(String),

    /// A page body or record did not have the expected shape.
    #[error("Decode error: {0}")]
    Decode(String),

    // ---- Input & Config -----------------------------------------------------
    /// Bad user or config value.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Config file missing, unreadable, or unwritable.
    #[error("Config error: {0}")]
    Config(String),

    // ---- Plumbing / Wrappers ------------------------------------------------
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

// ----------------------- Convenience constructors ----------------------------

impl Error {
    pub fn decode<S: Into<String>>(msg: S) -> Self {
        Error::Decode(msg.into())
    }
    pub fn unavailable<S: Into<String>>(msg: S) -> Self {
        Error::SourceUnavailable(msg.into())
    }

    /// Collapse any error into `SourceUnavailable`, keeping an existing one as-is.
    pub fn into_unavailable(self) -> Self {
        match self {
            Error::SourceUnavailable(_) => self,
            other => Error::SourceUnavailable(other.to_string()),
        }
    }
}
