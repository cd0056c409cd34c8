use thiserror::Error;

pub type MentorResult<T> = Result<T, MentorError>;

/// Failure taxonomy for the mentor chat. The view layer shows the user a
/// single connectivity message regardless of the variant; the distinction
/// only matters for logs and tests.
#[derive(Debug, Error)]
pub enum MentorError {
    #[error("configuration error: {0}")]
    Config(String),

    /// The endpoint answered with a non-success HTTP status.
    #[error("generation endpoint returned HTTP {status}")]
    Transport { status: u16 },

    /// The request never produced an HTTP status (DNS, refused connection, ...).
    #[error("generation request failed: {0}")]
    Network(String),

    /// The response parsed, but the expected candidate/content/text path is missing.
    #[error("unexpected response shape: {0}")]
    Shape(String),

    #[error("storage error: {0}")]
    Storage(String),
}

impl MentorError {
    pub fn config_error(msg: impl Into<String>) -> Self {
        MentorError::Config(msg.into())
    }

    pub fn transport_error(status: u16) -> Self {
        MentorError::Transport { status }
    }

    pub fn network_error(msg: impl Into<String>) -> Self {
        MentorError::Network(msg.into())
    }

    pub fn shape_error(msg: impl Into<String>) -> Self {
        MentorError::Shape(msg.into())
    }

    pub fn storage_error(msg: impl Into<String>) -> Self {
        MentorError::Storage(msg.into())
    }
}
