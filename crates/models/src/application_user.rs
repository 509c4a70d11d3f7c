//! Identity records. Every customer, staff member and store owner is an `application_user`.

use chrono::Utc;
use sea_orm::{entity::prelude::*, DatabaseConnection, QueryFilter, Set, SqlErr};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::enums::Role;
use crate::errors::ModelError;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "application_user")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub user_name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub full_name: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub role: Role,
    pub created_time: DateTimeWithTimeZone,
    pub last_updated_time: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Customer,
    Staff,
    LaundryStore,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Customer => Entity::has_many(super::customer::Entity).into(),
            Relation::Staff => Entity::has_many(super::staff::Entity).into(),
            Relation::LaundryStore => Entity::has_many(super::laundry_store::Entity).into(),
        }
    }
}

impl Related<super::customer::Entity> for Entity {
    fn to() -> RelationDef { Relation::Customer.def() }
}

impl Related<super::staff::Entity> for Entity {
    fn to() -> RelationDef { Relation::Staff.def() }
}

impl Related<super::laundry_store::Entity> for Entity {
    fn to() -> RelationDef { Relation::LaundryStore.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// Fields required to create a user; the password is already hashed.
#[derive(Debug, Clone)]
pub struct NewApplicationUser {
    pub user_name: String,
    pub email: String,
    pub full_name: String,
    pub password_hash: String,
    pub role: Role,
}

pub fn validate_email(email: &str) -> Result<(), ModelError> {
    let email = email.trim();
    let valid = match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.'),
        None => false,
    };
    if !valid || email.contains(char::is_whitespace) {
        return Err(ModelError::Validation("invalid email".into()));
    }
    Ok(())
}

pub fn validate_user_name(user_name: &str) -> Result<(), ModelError> {
    let len = user_name.chars().count();
    if !(3..=64).contains(&len) {
        return Err(ModelError::Validation("user name must be 3..=64 characters".into()));
    }
    if !user_name.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | '@')) {
        return Err(ModelError::Validation("user name may contain letters, digits and _-.@ only".into()));
    }
    Ok(())
}

/// Length >= 6 with at least one digit, one uppercase letter and one non-alphanumeric character.
pub fn validate_password(password: &str) -> Result<(), ModelError> {
    if password.chars().count() < 6 {
        return Err(ModelError::Validation("password must be at least 6 characters".into()));
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(ModelError::Validation("password requires a digit".into()));
    }
    if !password.chars().any(|c| c.is_uppercase()) {
        return Err(ModelError::Validation("password requires an uppercase letter".into()));
    }
    if password.chars().all(|c| c.is_alphanumeric()) {
        return Err(ModelError::Validation("password requires a non-alphanumeric character".into()));
    }
    Ok(())
}

pub async fn create(db: &DatabaseConnection, new: NewApplicationUser) -> Result<Model, ModelError> {
    validate_user_name(&new.user_name)?;
    validate_email(&new.email)?;
    if new.full_name.trim().is_empty() {
        return Err(ModelError::Validation("full name required".into()));
    }
    let now = Utc::now().into();
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        user_name: Set(new.user_name),
        email: Set(new.email.trim().to_lowercase()),
        full_name: Set(new.full_name),
        password_hash: Set(new.password_hash),
        role: Set(new.role),
        created_time: Set(now),
        last_updated_time: Set(now),
    };
    am.insert(db).await.map_err(|e| match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => ModelError::Duplicate(detail),
        _ => ModelError::Db(e.to_string()),
    })
}

pub async fn find_by_user_name(db: &DatabaseConnection, user_name: &str) -> Result<Option<Model>, ModelError> {
    Entity::find()
        .filter(Column::UserName.eq(user_name))
        .one(db)
        .await
        .map_err(|e| ModelError::Db(e.to_string()))
}

pub async fn find_by_email(db: &DatabaseConnection, email: &str) -> Result<Option<Model>, ModelError> {
    Entity::find()
        .filter(Column::Email.eq(email.trim().to_lowercase()))
        .one(db)
        .await
        .map_err(|e| ModelError::Db(e.to_string()))
}

pub async fn exists_with_role(db: &DatabaseConnection, role: Role) -> Result<bool, ModelError> {
    let count = Entity::find()
        .filter(Column::Role.eq(role))
        .count(db)
        .await
        .map_err(|e| ModelError::Db(e.to_string()))?;
    Ok(count > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_policy() {
        assert!(validate_password("Abc12!").is_ok());
        assert!(validate_password("Ab1!").is_err());
        assert!(validate_password("abcd12!").is_err());
        assert!(validate_password("Abcdef!").is_err());
        assert!(validate_password("Abcd123").is_err());
    }

    #[test]
    fn email_and_user_name_rules() {
        assert!(validate_email("a@b.co").is_ok());
        assert!(validate_email("no-at-sign").is_err());
        assert!(validate_email("a@localhost").is_err());
        assert!(validate_user_name("jane_doe").is_ok());
        assert!(validate_user_name("ab").is_err());
        assert!(validate_user_name("has space").is_err());
    }

    #[test]
    fn password_hash_is_not_serialized() {
        let now = Utc::now().into();
        let m = Model {
            id: Uuid::new_v4(),
            user_name: "jane".into(),
            email: "jane@example.com".into(),
            full_name: "Jane".into(),
            password_hash: "secret-hash".into(),
            role: Role::Customer,
            created_time: now,
            last_updated_time: now,
        };
        let json = serde_json::to_value(&m).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["role"], "Customer");
    }
}
