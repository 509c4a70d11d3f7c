use models::application_user::{self, NewApplicationUser};
use models::Role;
use sea_orm::{DatabaseConnection, EntityTrait};
use uuid::Uuid;

use crate::auth::domain::{AuthUser, Credentials, NewUser};
use crate::auth::errors::AuthError;
use crate::auth::repository::AuthRepository;

pub struct SeaOrmAuthRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmAuthRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

fn to_auth_user(u: application_user::Model) -> AuthUser {
    AuthUser { id: u.id, user_name: u.user_name, email: u.email, full_name: u.full_name, role: u.role }
}

#[async_trait::async_trait]
impl AuthRepository for SeaOrmAuthRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<AuthUser>, AuthError> {
        let res = application_user::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| AuthError::Repository(e.to_string()))?;
        Ok(res.map(to_auth_user))
    }

    async fn find_by_user_name(&self, user_name: &str) -> Result<Option<AuthUser>, AuthError> {
        Ok(application_user::find_by_user_name(&self.db, user_name).await?.map(to_auth_user))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<AuthUser>, AuthError> {
        Ok(application_user::find_by_email(&self.db, email).await?.map(to_auth_user))
    }

    async fn create_user(&self, user: NewUser, password_hash: String) -> Result<AuthUser, AuthError> {
        let created = application_user::create(
            &self.db,
            NewApplicationUser {
                user_name: user.user_name,
                email: user.email,
                full_name: user.full_name,
                password_hash,
                role: user.role,
            },
        )
        .await?;
        Ok(to_auth_user(created))
    }

    async fn get_credentials(&self, user_id: Uuid) -> Result<Option<Credentials>, AuthError> {
        let res = application_user::Entity::find_by_id(user_id)
            .one(&self.db)
            .await
            .map_err(|e| AuthError::Repository(e.to_string()))?;
        Ok(res.map(|u| Credentials { user_id: u.id, password_hash: u.password_hash }))
    }

    async fn any_with_role(&self, role: Role) -> Result<bool, AuthError> {
        Ok(application_user::exists_with_role(&self.db, role).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;

    fn new_user(user_name: &str, email: &str) -> NewUser {
        NewUser { user_name: user_name.into(), email: email.into(), full_name: "Rae".into(), role: Role::Customer }
    }

    #[tokio::test]
    async fn unique_index_hit_is_a_conflict() -> anyhow::Result<()> {
        let repo = SeaOrmAuthRepository::new(get_db().await?);
        repo.create_user(new_user("rae", "rae@example.com"), "hash".into()).await?;

        // skips the service's pre-insert lookup, as a concurrent registration would
        let err = repo.create_user(new_user("rae", "rae2@example.com"), "hash".into()).await.unwrap_err();
        assert!(matches!(err, AuthError::Conflict(_)));
        assert_eq!(err.code(), 1002);

        let err = repo.create_user(new_user("rae2", "RAE@example.com"), "hash".into()).await.unwrap_err();
        assert!(matches!(err, AuthError::Conflict(_)));
        Ok(())
    }
}
