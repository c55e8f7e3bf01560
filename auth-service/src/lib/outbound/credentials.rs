use std::sync::Arc;

use auth::Authenticator;
use auth::Claims;
use uuid::Uuid;

use crate::domain::user::models::TokenClaims;
use crate::domain::user::ports::CredentialHasher;
use crate::domain::user::ports::TokenIssuer;
use crate::user::errors::CredentialError;
use crate::user::errors::TokenError;

/// Argon2id password hashing backed by the shared authenticator.
pub struct Argon2CredentialHasher {
    authenticator: Arc<Authenticator>,
}

impl Argon2CredentialHasher {
    pub fn new(authenticator: Arc<Authenticator>) -> Self {
        Self { authenticator }
    }
}

impl CredentialHasher for Argon2CredentialHasher {
    fn hash(&self, password: &str) -> Result<String, CredentialError> {
        self.authenticator
            .hash_password(password)
            .map_err(|e| CredentialError::HashingFailed(e.to_string()))
    }

    fn verify(&self, password: &str, digest: &str) -> Result<bool, CredentialError> {
        self.authenticator
            .verify_password(password, digest)
            .map_err(|e| CredentialError::VerificationFailed(e.to_string()))
    }
}

/// HS256 JWT issuance backed by the shared authenticator.
///
/// Every token carries a random `jti`, so two tokens issued for the same
/// user within the same second still differ.
pub struct JwtTokenIssuer {
    authenticator: Arc<Authenticator>,
    expiration_hours: i64,
}

impl JwtTokenIssuer {
    pub fn new(authenticator: Arc<Authenticator>, expiration_hours: i64) -> Self {
        Self {
            authenticator,
            expiration_hours,
        }
    }
}

impl TokenIssuer for JwtTokenIssuer {
    fn issue(&self, claims: &TokenClaims) -> Result<String, TokenError> {
        let claims = Claims::for_principal(
            claims.user_id,
            &claims.username,
            claims.is_admin,
            self.expiration_hours,
        )
        .with_token_id(Uuid::new_v4());

        self.authenticator
            .generate_token(&claims)
            .map_err(|e| TokenError::SigningFailed(e.to_string()))
    }
}
