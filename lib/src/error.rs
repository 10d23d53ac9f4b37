/// Error type for the popmark library
///
/// Storage and tab failures carry a rendered message rather than the source
/// error, since every backend reports them differently and the popup only
/// logs them.
#[derive(Debug, thiserror::Error)]
pub enum PopmarkError {
    /// Reading the persisted bookmark list failed (I/O or malformed data)
    #[error("Storage read error: {0}")]
    StorageRead(String),

    /// Writing the persisted bookmark list failed
    #[error("Storage write error: {0}")]
    StorageWrite(String),

    /// The active tab could not be queried
    #[error("Tab query error: {0}")]
    TabQuery(String),

    /// Import document is not JSON or has no `bookmarks` array
    #[error("Import error: {0}")]
    ImportParse(String),

    /// Invalid input or arguments
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// I/O errors (export files, config files)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON errors
    #[error("JSON error: {0}")]
    Json(String),

    /// YAML parsing/serialization errors
    #[error("YAML error: {0}")]
    Yaml(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Browser integration errors
    #[error("Browser error: {0}")]
    Browser(String),

    /// Generic error for cases that don't fit other categories
    #[error("{0}")]
    Other(String),
}

/// Result type alias using PopmarkError
pub type Result<T> = std::result::Result<T, PopmarkError>;

impl From<String> for PopmarkError {
    fn from(s: String) -> Self {
        PopmarkError::Other(s)
    }
}

impl From<&str> for PopmarkError {
    fn from(s: &str) -> Self {
        PopmarkError::Other(s.to_string())
    }
}

impl From<serde_yaml::Error> for PopmarkError {
    fn from(err: serde_yaml::Error) -> Self {
        PopmarkError::Yaml(err.to_string())
    }
}

impl From<serde_json::Error> for PopmarkError {
    fn from(err: serde_json::Error) -> Self {
        PopmarkError::Json(err.to_string())
    }
}
