//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`PurgeHubError`] via `#[from]` (or a manual `From` impl for adapter
//! errors that the domain cannot name).

/// Top-level error shared by the application and adapter layers.
#[derive(Debug, thiserror::Error)]
pub enum PurgeHubError {
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("{0}")]
    NotFound(#[from] NotFoundError),

    #[error("authentication error: {0}")]
    Auth(#[from] AuthError),

    #[error("provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("storage error")]
    Storage(Box<dyn std::error::Error + Send + Sync>),
}

/// A domain invariant was violated.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A required text field was empty (after trimming).
    #[error("field `{0}` is required")]
    MissingField(&'static str),

    /// A targeted purge was requested without any target.
    #[error("purge type `{0}` requires at least one target")]
    MissingTargets(&'static str),

    /// An identifier could not be parsed.
    #[error("invalid identifier `{0}`")]
    InvalidId(String),

    /// A request body could not be decoded.
    #[error("malformed request: {0}")]
    MalformedBody(String),
}

/// A lookup by identifier found nothing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} `{id}` not found")]
pub struct NotFoundError {
    /// Kind of record that was looked up (e.g. `"Config"`).
    pub entity: &'static str,
    /// Identifier that was looked up, rendered as text.
    pub id: String,
}

/// Authentication or session failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// Unknown user or wrong password. Deliberately indistinguishable.
    #[error("invalid username or password")]
    InvalidCredentials,

    /// The request carried no valid session.
    #[error("login required")]
    SessionRequired,

    /// A stored password hash could not be produced or parsed.
    #[error("password hashing failed: {0}")]
    Hashing(String),
}

/// The CDN provider rejected or failed a request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProviderError {
    /// The provider answered with an application-level error.
    #[error("{message}")]
    Rejected {
        /// Provider error code (e.g. `AuthFailure.SignatureFailure`).
        code: String,
        /// Human-readable provider message.
        message: String,
    },

    /// The provider could not be reached or answered garbage.
    #[error("provider unreachable: {0}")]
    Transport(String),
}
