use thiserror::Error;

/// Failure while signing or checking a token.
///
/// Decoding failures are split by cause so callers can log them apart; the
/// HTTP layer collapses all of them into a single 401.
#[derive(Debug, Clone, Error)]
pub enum JwtError {
    #[error("Token signing failed: {0}")]
    SigningFailed(String),

    #[error("Token has expired")]
    Expired,

    #[error("Token signature does not match")]
    BadSignature,

    #[error("Token lacks required claim: {0}")]
    MissingClaim(String),

    #[error("Malformed token: {0}")]
    Malformed(String),
}
