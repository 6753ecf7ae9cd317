//! Error types for ask-core.
//!
//! Context-manager failures (`DuplicateName`, `NotFound`) are local and
//! synchronous; store failures (`Parse`, `Io`) carry the document path.
//! Nothing here is retried internally; callers decide how to present it.

use std::io;
use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A context with this exact name already exists.
    #[error("context with name '{0}' already exists")]
    DuplicateName(String),

    /// No context matches the given id (or id-or-name, for resolution).
    #[error("context not found: {0}")]
    NotFound(String),

    /// The persisted document exists but is not valid JSON for [`crate::State`].
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The storage medium could not be read or written.
    #[error("{action} {}: {source}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Completion(#[from] CompletionError),

    /// Rejected user input (argument parsing, setup and edit-config validation).
    #[error("{0}")]
    InvalidInput(String),

    /// Reading from or writing to the terminal failed.
    #[error("terminal I/O failed: {0}")]
    Terminal(#[from] io::Error),
}

impl Error {
    pub(crate) fn io(action: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Io {
            action,
            path: path.into(),
            source,
        }
    }
}

/// Failures of the remote chat-completion call.
#[derive(Debug, thiserror::Error)]
pub enum CompletionError {
    /// The request never produced a response (DNS, TLS, connection reset, ...).
    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("API error ({status}): {body}")]
    Status { status: u16, body: String },

    /// The response body was not a chat-completion payload.
    #[error("failed to decode response: {0}")]
    Decode(String),

    /// The service returned no choices.
    #[error("no response from the model")]
    EmptyResponse,
}
