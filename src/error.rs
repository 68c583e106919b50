//! Error taxonomy for the board core.
//!
//! Every error here is recoverable: the worst outcome of any operation is a
//! rejected mutation surfaced to the caller as a field-level or single
//! generic message. Nothing aborts the process.

use thiserror::Error;

/// The input field a validation failure refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Email,
    Password,
    ConfirmPassword,
    Title,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Password => "password",
            Self::ConfirmPassword => "confirmPassword",
            Self::Title => "title",
        }
    }
}

/// A field-level validation failure.
///
/// Callers collect these per form so every failing field can be surfaced at
/// once rather than one at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: Field,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: Field, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]: {}", self.field.as_str(), self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Failures from [`Board::authenticate`](crate::Board::authenticate).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// One or more inputs failed the field pre-checks.
    #[error("login input failed validation")]
    Invalid(Vec<ValidationError>),
    /// No user matches the email/password pair. Deliberately does not say
    /// which half was wrong.
    #[error("invalid email or password")]
    InvalidCredentials,
}

/// Failures from [`Board::post_question`](crate::Board::post_question).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PostError {
    /// Posting requires a logged-in session; the caller should prompt login.
    #[error("not logged in")]
    NotAuthenticated,
    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

/// Failures from [`Board::set_like`](crate::Board::set_like).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LikeError {
    /// Liking requires a logged-in session; the caller should prompt login.
    #[error("not logged in")]
    NotAuthenticated,
    /// No question has this id. Should not happen outside stale UI state;
    /// callers log and move on.
    #[error("no question with id {0}")]
    NotFound(i64),
}

/// Failures from the persistence adapter's write path.
///
/// Read-side problems never surface as errors: absent or malformed records
/// are treated as absent and defaults apply.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to write record {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to serialize record {key}: {source}")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}
