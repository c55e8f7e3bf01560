use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::user::models::IssuedSession;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::RefreshCommand;
use crate::domain::user::models::RegisterCommand;
use crate::domain::user::models::TokenClaims;
use crate::domain::user::models::User;
use crate::user::errors::UserError;
use crate::user::ports::AuthServicePort;
use crate::user::ports::CredentialHasher;
use crate::user::ports::TokenIssuer;
use crate::user::ports::UserRepository;

/// Domain service implementation for authentication.
///
/// Composes the credential store, the password hasher and the token issuer.
/// Each operation is a short sequential chain of calls to those collaborators.
pub struct AuthService<UR, CH, TI>
where
    UR: UserRepository,
    CH: CredentialHasher,
    TI: TokenIssuer,
{
    repository: Arc<UR>,
    hasher: Arc<CH>,
    issuer: Arc<TI>,
}

impl<UR, CH, TI> AuthService<UR, CH, TI>
where
    UR: UserRepository,
    CH: CredentialHasher,
    TI: TokenIssuer,
{
    /// Create a new auth service with injected collaborators.
    ///
    /// # Arguments
    /// * `repository` - Credential store
    /// * `hasher` - Password hashing implementation
    /// * `issuer` - Token signing implementation
    pub fn new(repository: Arc<UR>, hasher: Arc<CH>, issuer: Arc<TI>) -> Self {
        Self {
            repository,
            hasher,
            issuer,
        }
    }

    fn issue_for(&self, user: &User) -> Result<String, UserError> {
        Ok(self.issuer.issue(&TokenClaims::from(user))?)
    }
}

#[async_trait]
impl<UR, CH, TI> AuthServicePort for AuthService<UR, CH, TI>
where
    UR: UserRepository,
    CH: CredentialHasher,
    TI: TokenIssuer,
{
    async fn register(&self, command: RegisterCommand) -> Result<IssuedSession, UserError> {
        let password_hash = self.hasher.hash(command.password.expose())?;

        let user = self
            .repository
            .create(NewUser {
                username: command.username,
                email: command.email,
                password_hash,
                is_admin: false,
            })
            .await?;

        let token = self.issue_for(&user)?;

        tracing::info!(user_id = %user.id, username = %user.username, "User registered");

        Ok(IssuedSession { user, token })
    }

    async fn login(&self, command: LoginCommand) -> Result<IssuedSession, UserError> {
        let Some(user) = self.repository.find_by_email(&command.email).await? else {
            tracing::warn!(email = %command.email, "Login attempt for unknown email");
            return Err(UserError::InvalidCredentials);
        };

        if !self
            .hasher
            .verify(command.password.expose(), &user.password_hash)?
        {
            tracing::warn!(user_id = %user.id, "Login attempt with wrong password");
            return Err(UserError::InvalidCredentials);
        }

        let token = self.issue_for(&user)?;

        tracing::debug!(user_id = %user.id, "User logged in");

        Ok(IssuedSession { user, token })
    }

    async fn refresh(&self, command: RefreshCommand) -> Result<String, UserError> {
        let user = self
            .repository
            .find_by_email(&command.email)
            .await?
            .ok_or_else(|| UserError::NotFoundByEmail(command.email.to_string()))?;

        if user.id != command.subject {
            tracing::warn!(
                subject = %command.subject,
                owner = %user.id,
                "Refresh requested for an email owned by another user"
            );
            return Err(UserError::NotFoundByEmail(command.email.to_string()));
        }

        self.issue_for(&user)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use mockall::mock;

    use super::*;
    use crate::domain::user::models::EmailAddress;
    use crate::domain::user::models::Password;
    use crate::domain::user::models::UserId;
    use crate::domain::user::models::Username;
    use crate::user::errors::CredentialError;
    use crate::user::errors::TokenError;

    mock! {
        pub TestUserRepository {}

        #[async_trait]
        impl UserRepository for TestUserRepository {
            async fn create(&self, user: NewUser) -> Result<User, UserError>;
            async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError>;
        }
    }

    mock! {
        pub TestHasher {}

        impl CredentialHasher for TestHasher {
            fn hash(&self, password: &str) -> Result<String, CredentialError>;
            fn verify(&self, password: &str, digest: &str) -> Result<bool, CredentialError>;
        }
    }

    mock! {
        pub TestIssuer {}

        impl TokenIssuer for TestIssuer {
            fn issue(&self, claims: &TokenClaims) -> Result<String, TokenError>;
        }
    }

    fn email(s: &str) -> EmailAddress {
        EmailAddress::new(s.to_string()).unwrap()
    }

    fn password(s: &str) -> Password {
        Password::new(s.to_string()).unwrap()
    }

    fn stored_user(id: UserId) -> User {
        User {
            id,
            username: Username::new("alice".to_string()).unwrap(),
            email: email("alice@x.com"),
            password_hash: "digest:pw123".to_string(),
            is_admin: false,
            created_at: Utc::now(),
        }
    }

    fn service(
        repository: MockTestUserRepository,
        hasher: MockTestHasher,
        issuer: MockTestIssuer,
    ) -> AuthService<MockTestUserRepository, MockTestHasher, MockTestIssuer> {
        AuthService::new(Arc::new(repository), Arc::new(hasher), Arc::new(issuer))
    }

    fn register_command() -> RegisterCommand {
        RegisterCommand::new(
            Username::new("alice".to_string()).unwrap(),
            email("alice@x.com"),
            password("pw123"),
        )
    }

    #[tokio::test]
    async fn test_register_hashes_then_saves_then_issues() {
        let mut repository = MockTestUserRepository::new();
        let mut hasher = MockTestHasher::new();
        let mut issuer = MockTestIssuer::new();
        let user_id = UserId::new();

        hasher
            .expect_hash()
            .withf(|password| password.to_string() == "pw123")
            .times(1)
            .returning(|p| Ok(format!("digest:{}", p)));

        repository
            .expect_create()
            .withf(|user| {
                user.username.as_str() == "alice"
                    && user.email.as_str() == "alice@x.com"
                    && user.password_hash == "digest:pw123"
                    && !user.is_admin
            })
            .times(1)
            .returning(move |_| Ok(stored_user(user_id)));

        issuer
            .expect_issue()
            .withf(move |claims| {
                claims.user_id == user_id && claims.username == "alice" && !claims.is_admin
            })
            .times(1)
            .returning(|_| Ok("token-1".to_string()));

        let session = service(repository, hasher, issuer)
            .register(register_command())
            .await
            .unwrap();

        assert_eq!(session.token, "token-1");
        assert_eq!(session.user.id, user_id);
    }

    #[tokio::test]
    async fn test_register_duplicate_email_issues_no_token() {
        let mut repository = MockTestUserRepository::new();
        let mut hasher = MockTestHasher::new();
        let mut issuer = MockTestIssuer::new();

        hasher
            .expect_hash()
            .returning(|p| Ok(format!("digest:{}", p)));
        repository.expect_create().times(1).returning(|user| {
            Err(UserError::EmailAlreadyExists(
                user.email.as_str().to_string(),
            ))
        });
        issuer.expect_issue().times(0);

        let result = service(repository, hasher, issuer)
            .register(register_command())
            .await;

        assert!(matches!(result, Err(UserError::EmailAlreadyExists(_))));
    }

    #[tokio::test]
    async fn test_register_hashing_failure_skips_store() {
        let mut repository = MockTestUserRepository::new();
        let mut hasher = MockTestHasher::new();
        let issuer = MockTestIssuer::new();

        hasher
            .expect_hash()
            .returning(|_| Err(CredentialError::HashingFailed("out of memory".to_string())));
        repository.expect_create().times(0);

        let result = service(repository, hasher, issuer)
            .register(register_command())
            .await;

        assert!(matches!(result, Err(UserError::Credential(_))));
    }

    #[tokio::test]
    async fn test_login_success() {
        let mut repository = MockTestUserRepository::new();
        let mut hasher = MockTestHasher::new();
        let mut issuer = MockTestIssuer::new();
        let user_id = UserId::new();

        repository
            .expect_find_by_email()
            .withf(|email| email.as_str() == "alice@x.com")
            .times(1)
            .returning(move |_| Ok(Some(stored_user(user_id))));
        hasher
            .expect_verify()
            .withf(|password, digest| {
                password.to_string() == "pw123" && digest.to_string() == "digest:pw123"
            })
            .times(1)
            .returning(|_, _| Ok(true));
        issuer
            .expect_issue()
            .times(1)
            .returning(|_| Ok("token-2".to_string()));

        let session = service(repository, hasher, issuer)
            .login(LoginCommand {
                email: email("alice@x.com"),
                password: password("pw123"),
            })
            .await
            .unwrap();

        assert_eq!(session.token, "token-2");
        assert_eq!(session.user.id, user_id);
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let mut repository = MockTestUserRepository::new();
        let mut hasher = MockTestHasher::new();
        let mut issuer = MockTestIssuer::new();

        repository
            .expect_find_by_email()
            .returning(|_| Ok(Some(stored_user(UserId::new()))));
        hasher.expect_verify().returning(|_, _| Ok(false));
        issuer.expect_issue().times(0);

        let result = service(repository, hasher, issuer)
            .login(LoginCommand {
                email: email("alice@x.com"),
                password: password("wrong"),
            })
            .await;

        assert!(matches!(result, Err(UserError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_login_unknown_email_is_invalid_credentials() {
        let mut repository = MockTestUserRepository::new();
        let mut hasher = MockTestHasher::new();
        let issuer = MockTestIssuer::new();

        repository.expect_find_by_email().returning(|_| Ok(None));
        hasher.expect_verify().times(0);

        let result = service(repository, hasher, issuer)
            .login(LoginCommand {
                email: email("bob@x.com"),
                password: password("pw123"),
            })
            .await;

        assert!(matches!(result, Err(UserError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_login_store_failure_propagates() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_email()
            .returning(|_| Err(UserError::DatabaseError("connection refused".to_string())));

        let result = service(repository, MockTestHasher::new(), MockTestIssuer::new())
            .login(LoginCommand {
                email: email("alice@x.com"),
                password: password("pw123"),
            })
            .await;

        assert!(matches!(result, Err(UserError::DatabaseError(_))));
    }

    #[tokio::test]
    async fn test_refresh_issues_token_for_owner() {
        let mut repository = MockTestUserRepository::new();
        let mut issuer = MockTestIssuer::new();
        let user_id = UserId::new();

        repository
            .expect_find_by_email()
            .returning(move |_| Ok(Some(stored_user(user_id))));
        issuer
            .expect_issue()
            .withf(move |claims| claims.user_id == user_id)
            .times(1)
            .returning(|_| Ok("token-3".to_string()));

        let token = service(repository, MockTestHasher::new(), issuer)
            .refresh(RefreshCommand {
                email: email("alice@x.com"),
                subject: user_id,
            })
            .await
            .unwrap();

        assert_eq!(token, "token-3");
    }

    #[tokio::test]
    async fn test_refresh_unknown_email() {
        let mut repository = MockTestUserRepository::new();
        repository.expect_find_by_email().returning(|_| Ok(None));

        let result = service(repository, MockTestHasher::new(), MockTestIssuer::new())
            .refresh(RefreshCommand {
                email: email("bob@x.com"),
                subject: UserId::new(),
            })
            .await;

        assert!(matches!(result, Err(UserError::NotFoundByEmail(e)) if e == "bob@x.com"));
    }

    #[tokio::test]
    async fn test_refresh_for_another_users_email_is_not_found() {
        let mut repository = MockTestUserRepository::new();
        let mut issuer = MockTestIssuer::new();

        repository
            .expect_find_by_email()
            .returning(|_| Ok(Some(stored_user(UserId::new()))));
        issuer.expect_issue().times(0);

        let result = service(repository, MockTestHasher::new(), issuer)
            .refresh(RefreshCommand {
                email: email("alice@x.com"),
                subject: UserId::new(),
            })
            .await;

        assert!(matches!(result, Err(UserError::NotFoundByEmail(_))));
    }

    #[tokio::test]
    async fn test_refresh_signing_failure() {
        let mut repository = MockTestUserRepository::new();
        let mut issuer = MockTestIssuer::new();
        let user_id = UserId::new();

        repository
            .expect_find_by_email()
            .returning(move |_| Ok(Some(stored_user(user_id))));
        issuer
            .expect_issue()
            .returning(|_| Err(TokenError::SigningFailed("bad key".to_string())));

        let result = service(repository, MockTestHasher::new(), issuer)
            .refresh(RefreshCommand {
                email: email("alice@x.com"),
                subject: user_id,
            })
            .await;

        assert!(matches!(result, Err(UserError::Token(_))));
    }
}
