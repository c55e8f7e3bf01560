use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum PasswordError {
    #[error("Could not hash password: {0}")]
    HashingFailed(String),

    /// The stored digest is not a parseable PHC string.
    #[error("Could not verify password: {0}")]
    VerificationFailed(String),

    #[error("Argon2 cost rejected: {0}")]
    InvalidParameters(String),
}
