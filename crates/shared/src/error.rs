use thiserror::Error;

/// Raised when the client-persisted session blob cannot produce an identity.
/// Submission aborts on this before any request is sent.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session entry '{key}' is missing")]
    Missing { key: String },
    #[error("session entry '{key}' is malformed: {reason}")]
    Malformed { key: String, reason: String },
}
