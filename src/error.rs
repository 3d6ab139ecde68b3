//! Error types and handling for Swyft

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias for Swyft operations
pub type Result<T> = std::result::Result<T, SwyftError>;

/// Main error type for Swyft operations
#[derive(Debug, Error)]
pub enum SwyftError {
    /// Input folder is missing or not a directory
    #[error("Input folder does not exist: {path}")]
    InputNotFound { path: PathBuf },

    /// Input folder contains no entries at all
    #[error("No images found in the input folder: {path}")]
    EmptyInput { path: PathBuf },

    /// Invalid flag combination or argument values
    #[error("Invalid arguments: {message}")]
    Validation { message: String },

    /// Source file is not a readable image
    #[error("Failed to decode {file}: {message}")]
    Decode { file: PathBuf, message: String },

    /// Failure while computing or applying the transform
    #[error("Failed to resize {file}: {message}")]
    Resize { file: PathBuf, message: String },

    /// Failure while encoding or writing the output
    #[error("Failed to write {file}: {message}")]
    Write { file: PathBuf, message: String },

    /// I/O related errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A spawned task panicked or was cancelled
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

impl SwyftError {
    /// Create a new input-not-found error
    pub fn input_not_found<P: AsRef<Path>>(path: P) -> Self {
        Self::InputNotFound {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Create a new empty-input error
    pub fn empty_input<P: AsRef<Path>>(path: P) -> Self {
        Self::EmptyInput {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new decode error
    pub fn decode<P: AsRef<Path>, S: Into<String>>(file: P, message: S) -> Self {
        Self::Decode {
            file: file.as_ref().to_path_buf(),
            message: message.into(),
        }
    }

    /// Create a new resize error
    pub fn resize<P: AsRef<Path>, S: Into<String>>(file: P, message: S) -> Self {
        Self::Resize {
            file: file.as_ref().to_path_buf(),
            message: message.into(),
        }
    }

    /// Create a new write error
    pub fn write<P: AsRef<Path>, S: Into<String>>(file: P, message: S) -> Self {
        Self::Write {
            file: file.as_ref().to_path_buf(),
            message: message.into(),
        }
    }

    /// Get the associated file path if available
    pub fn file_path(&self) -> Option<&PathBuf> {
        match self {
            Self::InputNotFound { path } | Self::EmptyInput { path } => Some(path),
            Self::Decode { file, .. } | Self::Resize { file, .. } | Self::Write { file, .. } => {
                Some(file)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_error_creation() {
        let err = SwyftError::validation("bad flags");
        assert!(matches!(err, SwyftError::Validation { .. }));

        let err = SwyftError::decode(Path::new("a.jpg"), "truncated");
        assert!(matches!(err, SwyftError::Decode { .. }));
    }

    #[test]
    fn test_error_messages_carry_path() {
        let err = SwyftError::input_not_found(Path::new("/no/such/dir"));
        assert!(err.to_string().contains("/no/such/dir"));

        let err = SwyftError::write(Path::new("out/a.png"), "disk full");
        assert!(err.to_string().contains("out/a.png"));
        assert!(err.to_string().contains("disk full"));
    }

    #[test]
    fn test_file_path_accessor() {
        let err = SwyftError::resize(Path::new("b.png"), "oops");
        assert_eq!(err.file_path(), Some(&Path::new("b.png").to_path_buf()));

        let err = SwyftError::validation("no path here");
        assert!(err.file_path().is_none());
    }
}
