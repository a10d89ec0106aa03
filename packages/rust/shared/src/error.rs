//! Error types for artifactview.
//!
//! Library crates use [`ArtifactViewError`] via `thiserror`.
//! The CLI app wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all artifactview operations.
#[derive(Debug, thiserror::Error)]
pub enum ArtifactViewError {
    /// Configuration loading or credential resolution error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Run URL did not match the expected GitHub Actions shape.
    #[error("validation error: {message}")]
    Validation { message: String },

    /// Desktop clipboard could not be opened or read (headless session,
    /// missing display).
    #[error("clipboard error: {0}")]
    Clipboard(String),

    /// Network/HTTP error while listing or downloading artifacts.
    #[error("network error: {0}")]
    Network(String),

    /// Archive decompression error (corrupt or truncated zip).
    #[error("archive error: {0}")]
    Archive(String),

    /// Static file server probe, spawn, or exit error.
    #[error("file server error: {0}")]
    Server(String),

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, ArtifactViewError>;

impl ArtifactViewError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a validation error from any displayable message.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Usage-class failures. The CLI prints the usage hint for these before
    /// exiting: bad run URL, missing token, unreadable clipboard.
    pub fn is_usage_error(&self) -> bool {
        matches!(
            self,
            Self::Config { .. } | Self::Validation { .. } | Self::Clipboard(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_formatting() {
        let err = ArtifactViewError::config("GITHUB_TOKEN is not set");
        assert_eq!(err.to_string(), "config error: GITHUB_TOKEN is not set");

        let err = ArtifactViewError::Network("HTTP 502 Bad Gateway".into());
        assert!(err.to_string().contains("502"));
    }

    #[test]
    fn usage_error_classification() {
        assert!(ArtifactViewError::validation("bad URL").is_usage_error());
        assert!(ArtifactViewError::config("no token").is_usage_error());
        assert!(ArtifactViewError::Clipboard("no display".into()).is_usage_error());

        assert!(!ArtifactViewError::Network("HTTP 500".into()).is_usage_error());
        assert!(!ArtifactViewError::Archive("bad magic number".into()).is_usage_error());
        assert!(!ArtifactViewError::Server("npx not found".into()).is_usage_error());
    }
}
