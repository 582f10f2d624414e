use thiserror::Error as ThisError;

/// Access layer errors. Every failure is terminal for the call;
/// nothing is retried and no partial state is left behind.
#[derive(Debug, Clone, ThisError)]
pub enum StoreError {
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("an account with this email already exists")]
    Conflict,
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("invalid or expired reset token")]
    InvalidToken,
}
