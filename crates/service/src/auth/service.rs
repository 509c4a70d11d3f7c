use std::sync::Arc;

use argon2::{Argon2, password_hash::{PasswordHasher, PasswordVerifier, SaltString}, PasswordHash};
use models::application_user::{validate_email, validate_password, validate_user_name};
use models::Role;
use rand::rngs::OsRng;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use super::domain::{AuthSession, AuthUser, LoginInput, NewUser, RegisterInput};
use super::errors::AuthError;
use super::repository::AuthRepository;
use super::token::JwtKeys;

/// Auth business service independent of web framework
pub struct AuthService<R: AuthRepository> {
    repo: Arc<R>,
    keys: Arc<JwtKeys>,
}

impl<R: AuthRepository> AuthService<R> {
    pub fn new(repo: Arc<R>, keys: Arc<JwtKeys>) -> Self { Self { repo, keys } }

    pub fn keys(&self) -> &JwtKeys { &self.keys }

    /// Register a customer account with a hashed password.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{AuthService, JwtKeys, repository::mock::MockAuthRepository};
    /// use service::auth::domain::RegisterInput;
    /// use std::sync::Arc;
    /// let keys = Arc::new(JwtKeys::new("secret", "iss", "aud", chrono::Duration::minutes(5)));
    /// let svc = AuthService::new(Arc::new(MockAuthRepository::default()), keys);
    /// let input = RegisterInput { user_name: "jane".into(), email: "jane@example.com".into(), full_name: "Jane".into(), password: "Secret1!".into() };
    /// let user = tokio_test::block_on(svc.register(input)).unwrap();
    /// assert_eq!(user.role, models::Role::Customer);
    /// ```
    #[instrument(skip(self, input), fields(user_name = %input.user_name))]
    pub async fn register(&self, input: RegisterInput) -> Result<AuthUser, AuthError> {
        validate_user_name(&input.user_name)?;
        validate_email(&input.email)?;
        validate_password(&input.password)?;
        let user = NewUser {
            user_name: input.user_name,
            email: input.email,
            full_name: input.full_name,
            role: Role::Customer,
        };
        let created = self.create_account(user, &input.password).await?;
        info!(user_id = %created.id, "user_registered");
        Ok(created)
    }

    /// Authenticate by user name and issue a token.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{AuthService, JwtKeys, repository::mock::MockAuthRepository};
    /// use service::auth::domain::{RegisterInput, LoginInput};
    /// use std::sync::Arc;
    /// let keys = Arc::new(JwtKeys::new("secret", "iss", "aud", chrono::Duration::minutes(5)));
    /// let svc = AuthService::new(Arc::new(MockAuthRepository::default()), keys);
    /// let _ = tokio_test::block_on(svc.register(RegisterInput { user_name: "sam".into(), email: "s@e.com".into(), full_name: "Sam".into(), password: "Passw0rd!".into() }));
    /// let session = tokio_test::block_on(svc.login(LoginInput { user_name: "sam".into(), password: "Passw0rd!".into() })).unwrap();
    /// assert_eq!(session.user.user_name, "sam");
    /// assert!(!session.token.is_empty());
    /// ```
    #[instrument(skip(self, input), fields(user_name = %input.user_name))]
    pub async fn login(&self, input: LoginInput) -> Result<AuthSession, AuthError> {
        let user = self.repo
            .find_by_user_name(&input.user_name)
            .await?
            .ok_or(AuthError::Unauthorized)?;

        let cred = self.repo
            .get_credentials(user.id)
            .await?
            .ok_or(AuthError::Unauthorized)?;

        let parsed = PasswordHash::new(&cred.password_hash).map_err(|e| AuthError::HashError(e.to_string()))?;
        if Argon2::default().verify_password(input.password.as_bytes(), &parsed).is_err() {
            warn!(user_id = %user.id, "login_failed");
            return Err(AuthError::Unauthorized);
        }

        let (token, claims) = self.keys.issue(&user)?;
        info!(user_id = %user.id, role = %user.role, "login_succeeded");
        Ok(AuthSession { user, token, expires_at: claims.exp })
    }

    /// The user behind a verified token.
    pub async fn me(&self, user_id: Uuid) -> Result<AuthUser, AuthError> {
        self.repo.find_by_id(user_id).await?.ok_or(AuthError::NotFound)
    }

    /// Create the configured administrator unless an Admin already exists.
    /// Returns the created user, or `None` when nothing was done.
    #[instrument(skip(self, seed), fields(user_name = %seed.user_name))]
    pub async fn ensure_admin(&self, seed: &configs::SeedAdminConfig) -> Result<Option<AuthUser>, AuthError> {
        if self.repo.any_with_role(Role::Admin).await? {
            debug!("admin present, skipping seed");
            return Ok(None);
        }
        validate_password(&seed.password)?;
        let user = NewUser {
            user_name: seed.user_name.clone(),
            email: seed.email.clone(),
            full_name: "Administrator".into(),
            role: Role::Admin,
        };
        let created = self.create_account(user, &seed.password).await?;
        info!(user_id = %created.id, "admin_seeded");
        Ok(Some(created))
    }

    async fn create_account(&self, user: NewUser, password: &str) -> Result<AuthUser, AuthError> {
        if self.repo.find_by_user_name(&user.user_name).await?.is_some() {
            debug!(user_name = %user.user_name, "user name taken");
            return Err(AuthError::Conflict(format!("user name {} is already taken", user.user_name)));
        }
        if self.repo.find_by_email(&user.email).await?.is_some() {
            debug!(user_name = %user.user_name, "email registered");
            return Err(AuthError::Conflict("email is already registered".into()));
        }
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AuthError::HashError(e.to_string()))?
            .to_string();
        self.repo.create_user(user, hash).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::repo::SeaOrmAuthRepository;
    use crate::auth::repository::mock::MockAuthRepository;
    use crate::test_support::get_db;
    use chrono::Duration;

    fn keys() -> Arc<JwtKeys> {
        Arc::new(JwtKeys::new("unit-secret", "laundry-backend", "laundry-clients", Duration::minutes(10)))
    }

    fn register_input(user_name: &str, password: &str) -> RegisterInput {
        RegisterInput {
            user_name: user_name.into(),
            email: format!("{user_name}@example.com"),
            full_name: "Test User".into(),
            password: password.into(),
        }
    }

    #[tokio::test]
    async fn password_policy_enforced() {
        let svc = AuthService::new(Arc::new(MockAuthRepository::default()), keys());
        for weak in ["Ab1!", "abcdef1!", "Abcdefg!", "Abcdef12"] {
            let err = svc.register(register_input("weakling", weak)).await.unwrap_err();
            assert!(matches!(err, AuthError::Validation(_)), "{weak} should fail");
        }
        assert!(svc.register(register_input("strong", "Str0ng!")).await.is_ok());
    }

    #[tokio::test]
    async fn duplicate_user_name_or_email_conflicts() {
        let svc = AuthService::new(Arc::new(MockAuthRepository::default()), keys());
        svc.register(register_input("dup", "Passw0rd!")).await.unwrap();
        let again = svc.register(register_input("dup", "Passw0rd!")).await.unwrap_err();
        assert_eq!(again.code(), 1002);

        let mut same_email = register_input("other", "Passw0rd!");
        same_email.email = "DUP@example.com".into();
        match svc.register(same_email).await {
            Err(AuthError::Conflict(msg)) => assert!(msg.contains("email")),
            other => panic!("expected email conflict, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn login_issues_verifiable_token() {
        let svc = AuthService::new(Arc::new(MockAuthRepository::default()), keys());
        let user = svc.register(register_input("loginer", "Passw0rd!")).await.unwrap();

        let bad = svc.login(LoginInput { user_name: "loginer".into(), password: "wrong".into() }).await;
        assert!(matches!(bad, Err(AuthError::Unauthorized)));
        let unknown = svc.login(LoginInput { user_name: "ghost".into(), password: "Passw0rd!".into() }).await;
        assert!(matches!(unknown, Err(AuthError::Unauthorized)));

        let session = svc.login(LoginInput { user_name: "loginer".into(), password: "Passw0rd!".into() }).await.unwrap();
        let claims = svc.keys().verify(&session.token).unwrap();
        assert_eq!(claims.user_id(), Some(user.id));
        assert_eq!(claims.role, Role::Customer);
        assert_eq!(claims.exp, session.expires_at);
        assert_eq!(svc.me(user.id).await.unwrap().user_name, "loginer");
    }

    #[tokio::test]
    async fn admin_seeded_once_against_database() -> anyhow::Result<()> {
        let db = get_db().await?;
        let svc = AuthService::new(Arc::new(SeaOrmAuthRepository::new(db)), keys());
        let seed = configs::SeedAdminConfig {
            user_name: "admin".into(),
            email: "admin@example.com".into(),
            password: "Adm1n!pass".into(),
        };
        let first = svc.ensure_admin(&seed).await?;
        assert_eq!(first.map(|u| u.role), Some(Role::Admin));
        assert!(svc.ensure_admin(&seed).await?.is_none());

        let session = svc.login(LoginInput { user_name: "admin".into(), password: "Adm1n!pass".into() }).await?;
        assert_eq!(session.user.role, Role::Admin);
        Ok(())
    }
}
