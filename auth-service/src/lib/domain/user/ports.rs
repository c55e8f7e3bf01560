use async_trait::async_trait;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::IssuedSession;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::RefreshCommand;
use crate::domain::user::models::RegisterCommand;
use crate::domain::user::models::TokenClaims;
use crate::domain::user::models::User;
use crate::user::errors::CredentialError;
use crate::user::errors::TokenError;
use crate::user::errors::UserError;

/// Port for authentication operations exposed to the inbound adapters.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a new user and issue their first token.
    ///
    /// # Arguments
    /// * `command` - Validated username, email and password
    ///
    /// # Returns
    /// The stored user and a signed token
    ///
    /// # Errors
    /// * `EmailAlreadyExists` / `UsernameAlreadyExists` - Store uniqueness violation
    /// * `Credential` - Password hashing failed
    /// * `Token` - Token signing failed
    /// * `DatabaseError` - Database operation failed
    async fn register(&self, command: RegisterCommand) -> Result<IssuedSession, UserError>;

    /// Check credentials and issue a token.
    ///
    /// Unknown email and wrong password both yield `InvalidCredentials`.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Email unknown or password mismatch
    /// * `Credential` - Stored hash could not be checked
    /// * `Token` - Token signing failed
    /// * `DatabaseError` - Database operation failed
    async fn login(&self, command: LoginCommand) -> Result<IssuedSession, UserError>;

    /// Issue a fresh token for an authenticated caller.
    ///
    /// # Returns
    /// Signed token string
    ///
    /// # Errors
    /// * `NotFoundByEmail` - No user owns the email, or it belongs to another subject
    /// * `Token` - Token signing failed
    /// * `DatabaseError` - Database operation failed
    async fn refresh(&self, command: RefreshCommand) -> Result<String, UserError>;
}

/// Credential store: persistence operations for user records.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist a new user. The store assigns the identifier.
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, user: NewUser) -> Result<User, UserError>;

    /// Retrieve user by email address.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError>;
}

/// One-way salted password hashing.
pub trait CredentialHasher: Send + Sync + 'static {
    /// Produce a digest suitable for storage.
    fn hash(&self, password: &str) -> Result<String, CredentialError>;

    /// Compare a raw password to a stored digest in constant time.
    fn verify(&self, password: &str, digest: &str) -> Result<bool, CredentialError>;
}

/// Signs time-bound tokens for a claim set.
pub trait TokenIssuer: Send + Sync + 'static {
    fn issue(&self, claims: &TokenClaims) -> Result<String, TokenError>;
}
