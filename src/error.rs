//! Error types for fadeshow

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for fadeshow operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for fadeshow operations
#[derive(Error, Debug)]
pub enum Error {
    /// Bad or missing input parameters or files
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Transition name not accepted by the encoder
    #[error("Unsupported transition: {0}")]
    UnsupportedTransition(String),

    /// The encoder ran but exited unsuccessfully
    #[error("Encoding failed (exit code {}): {stderr}", exit_code(.code))]
    Encoding { code: Option<i32>, stderr: String },

    /// FFmpeg could not be located or started
    #[error("FFmpeg error: {0}")]
    Ffmpeg(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Configuration error naming every image that could not be found
    pub(crate) fn missing_images(paths: &[PathBuf]) -> Self {
        let listed = paths
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        Self::Configuration(format!("missing image file(s): {}", listed))
    }

    /// Broad classification of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Configuration(_) => ErrorKind::Configuration,
            Error::UnsupportedTransition(_) => ErrorKind::UnsupportedTransition,
            Error::Encoding { .. } | Error::Ffmpeg(_) => ErrorKind::Encoding,
            Error::Io(_) => ErrorKind::Io,
        }
    }
}

fn exit_code(code: &Option<i32>) -> String {
    match code {
        Some(c) => c.to_string(),
        None => "none".to_string(),
    }
}

/// Error classes reported to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Invalid parameters or input files
    Configuration,
    /// Unknown crossfade transition
    UnsupportedTransition,
    /// The external encoder failed
    Encoding,
    /// File-system failure
    Io,
}
