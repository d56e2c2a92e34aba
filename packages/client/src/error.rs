//! Error types for the chat client.

use thiserror::Error;

/// Client-specific errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// The server refused the display name (taken or blank)
    #[error("Join rejected: {0}")]
    NameRejected(String),

    /// Connection error
    #[error("Connection error: {0}")]
    ConnectionError(String),
}
