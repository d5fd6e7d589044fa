//! Error types for the armory domain and repository layer.

/// Errors that can occur in armory operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// SQLite database error
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// An account with this email already exists
    #[error("an account with email '{0}' already exists")]
    DuplicateEmail(String),

    /// Email/password pair did not match a stored account
    #[error("invalid email or password")]
    InvalidCredentials,

    /// Caller-supplied value rejected before any computation
    #[error("validation error: {0}")]
    Validation(String),

    /// Referenced entity does not exist
    #[error("not found: {0}")]
    NotFound(String),

    /// General internal error
    #[error("{0}")]
    Internal(String),
}

impl Error {
    /// Whether the error is caused by the caller rather than the service.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Error::DuplicateEmail(_)
                | Error::InvalidCredentials
                | Error::Validation(_)
                | Error::NotFound(_)
        )
    }
}

/// Convenience Result type.
pub type Result<T> = std::result::Result<T, Error>;
