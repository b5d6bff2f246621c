//! Client error types
//!
//! Transport failures, server-side rejections and local validation problems
//! are kept apart: the server is authoritative for business rules, so a
//! rejection carries its status and message through unchanged.

use std::fmt;

#[derive(Debug)]
pub enum ClientError {
    /// Network-level failure (connect, timeout, TLS)
    Transport(String),
    /// Non-success response from the backend, message extracted from the body
    Rejected { status: u16, message: String },
    /// Response body did not match the expected shape
    Decode(String),
    /// Bad input caught before any request was made
    Validation(String),
    /// Local filesystem error (preferences)
    Io(String),
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::Transport(msg) => write!(f, "Transport error: {}", msg),
            ClientError::Rejected { status, message } => {
                write!(f, "Server rejected request ({}): {}", status, message)
            }
            ClientError::Decode(msg) => write!(f, "Decode error: {}", msg),
            ClientError::Validation(msg) => write!(f, "Validation error: {}", msg),
            ClientError::Io(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl std::error::Error for ClientError {}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        ClientError::Transport(e.to_string())
    }
}

impl From<std::io::Error> for ClientError {
    fn from(e: std::io::Error) -> Self {
        ClientError::Io(e.to_string())
    }
}

impl ClientError {
    /// True when the server itself turned the request down, as opposed to the
    /// request never completing. Business rejections (penalty ban, stock
    /// raced away by another staff member) land here.
    pub fn is_rejection(&self) -> bool {
        matches!(self, ClientError::Rejected { .. })
    }
}
