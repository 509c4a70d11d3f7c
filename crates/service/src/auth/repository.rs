use async_trait::async_trait;
use models::Role;
use uuid::Uuid;

use super::domain::{AuthUser, Credentials, NewUser};
use super::errors::AuthError;

/// Persistence needed by [`super::AuthService`].
#[async_trait]
pub trait AuthRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<AuthUser>, AuthError>;
    async fn find_by_user_name(&self, user_name: &str) -> Result<Option<AuthUser>, AuthError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<AuthUser>, AuthError>;

    /// Store a user with an already-hashed password.
    async fn create_user(&self, user: NewUser, password_hash: String) -> Result<AuthUser, AuthError>;

    async fn get_credentials(&self, user_id: Uuid) -> Result<Option<Credentials>, AuthError>;

    async fn any_with_role(&self, role: Role) -> Result<bool, AuthError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockAuthRepository {
        users: Mutex<HashMap<Uuid, (AuthUser, String)>>, // user id -> (user, password hash)
    }

    impl MockAuthRepository {
        fn find(&self, pred: impl Fn(&AuthUser) -> bool) -> Option<AuthUser> {
            let users = self.users.lock().unwrap();
            users.values().map(|(u, _)| u).find(|u| pred(u)).cloned()
        }
    }

    #[async_trait]
    impl AuthRepository for MockAuthRepository {
        async fn find_by_id(&self, id: Uuid) -> Result<Option<AuthUser>, AuthError> {
            Ok(self.find(|u| u.id == id))
        }

        async fn find_by_user_name(&self, user_name: &str) -> Result<Option<AuthUser>, AuthError> {
            Ok(self.find(|u| u.user_name == user_name))
        }

        async fn find_by_email(&self, email: &str) -> Result<Option<AuthUser>, AuthError> {
            let email = email.trim().to_lowercase();
            Ok(self.find(|u| u.email == email))
        }

        async fn create_user(&self, user: NewUser, password_hash: String) -> Result<AuthUser, AuthError> {
            let mut users = self.users.lock().unwrap();
            let email = user.email.trim().to_lowercase();
            if users.values().any(|(u, _)| u.user_name == user.user_name || u.email == email) {
                return Err(AuthError::Conflict("account already exists".into()));
            }
            let created = AuthUser {
                id: Uuid::new_v4(),
                user_name: user.user_name,
                email,
                full_name: user.full_name,
                role: user.role,
            };
            users.insert(created.id, (created.clone(), password_hash));
            Ok(created)
        }

        async fn get_credentials(&self, user_id: Uuid) -> Result<Option<Credentials>, AuthError> {
            let users = self.users.lock().unwrap();
            Ok(users
                .get(&user_id)
                .map(|(_, hash)| Credentials { user_id, password_hash: hash.clone() }))
        }

        async fn any_with_role(&self, role: Role) -> Result<bool, AuthError> {
            Ok(self.find(|u| u.role == role).is_some())
        }
    }
}
