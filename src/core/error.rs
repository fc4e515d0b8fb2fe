use std::fmt;
use std::path::PathBuf;

/// Errors that can occur while scanning or reading catalog resources.
///
/// Whole-scan variants end up in `CatalogState::error_message`; per-file
/// variants are swallowed by the scanner and never reach the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// Resource location missing or inaccessible. Retryable.
    DirectoryNotFound(PathBuf),
    /// The listing call itself failed. Retryable.
    EnumerationFailed { path: PathBuf, message: String },
    /// Per-file metadata read failed. Defaulted, never surfaced.
    MetadataReadFailed { path: PathBuf, message: String },
    /// Document content could not be read at open time.
    ContentReadFailed { path: PathBuf, message: String },
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::DirectoryNotFound(path) => {
                write!(f, "resource directory not found: {}", path.display())
            }
            CatalogError::EnumerationFailed { path, message } => {
                write!(f, "failed to list {}: {message}", path.display())
            }
            CatalogError::MetadataReadFailed { path, message } => {
                write!(f, "failed to read metadata for {}: {message}", path.display())
            }
            CatalogError::ContentReadFailed { path, message } => {
                write!(f, "failed to read {}: {message}", path.display())
            }
        }
    }
}

impl std::error::Error for CatalogError {}
