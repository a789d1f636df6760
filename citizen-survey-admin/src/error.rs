/// Error type for admin sign-in and session checks.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// Unknown username or wrong password. Which one is not revealed.
    #[error("invalid username or password")]
    InvalidCredentials,

    #[error("session expired, please sign in again")]
    SessionExpired,

    /// The token was never issued or has been revoked.
    #[error("unknown session")]
    UnknownSession,
}

/// Error type for admin panel operations.
#[derive(Debug, thiserror::Error)]
pub enum AdminError {
    /// No valid admin session.
    #[error("sign in required: {0}")]
    Unauthenticated(#[from] AuthError),

    #[error("question text must not be empty")]
    EmptyQuestionText,

    /// The backing store failed; the message is passed through.
    #[error("{0:#}")]
    Store(anyhow::Error),
}

impl AdminError {
    /// Create a store error from any error type.
    pub fn store(err: impl Into<anyhow::Error>) -> Self {
        Self::Store(err.into())
    }

    /// Check if this error asks the user to sign in.
    pub fn is_unauthenticated(&self) -> bool {
        matches!(self, Self::Unauthenticated(_))
    }
}
