use anyhow::Result;
use chrono::{NaiveTime, Utc};
use migration::MigratorTrait;
use sea_orm::{ActiveModelTrait, Database, DatabaseConnection, EntityTrait, ModelTrait, Set};
use uuid::Uuid;

use crate::application_user::{self, NewApplicationUser};
use crate::{building, customer, laundry_store, Role};

async fn setup_db() -> Result<DatabaseConnection> {
    let db = Database::connect("sqlite::memory:").await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

fn new_user(name: &str, role: Role) -> NewApplicationUser {
    NewApplicationUser {
        user_name: name.into(),
        email: format!("{name}@example.com"),
        full_name: name.to_uppercase(),
        password_hash: "hash".into(),
        role,
    }
}

#[tokio::test]
async fn create_and_lookup_user() -> Result<()> {
    let db = setup_db().await?;
    let created = application_user::create(&db, new_user("alice", Role::Customer)).await?;

    let by_name = application_user::find_by_user_name(&db, "alice").await?;
    assert_eq!(by_name.map(|u| u.id), Some(created.id));
    let by_email = application_user::find_by_email(&db, "ALICE@example.com").await?;
    assert_eq!(by_email.map(|u| u.role), Some(Role::Customer));

    assert!(!application_user::exists_with_role(&db, Role::Admin).await?);
    application_user::create(&db, new_user("root", Role::Admin)).await?;
    assert!(application_user::exists_with_role(&db, Role::Admin).await?);
    Ok(())
}

#[tokio::test]
async fn duplicate_user_name_is_reported_as_duplicate() -> Result<()> {
    let db = setup_db().await?;
    application_user::create(&db, new_user("bob", Role::Staff)).await?;
    let mut dup = new_user("bob", Role::Staff);
    dup.email = "other@example.com".into();
    let err = application_user::create(&db, dup).await.unwrap_err();
    assert!(matches!(err, crate::errors::ModelError::Duplicate(_)));
    Ok(())
}

#[tokio::test]
async fn customer_belongs_to_user_and_building() -> Result<()> {
    let db = setup_db().await?;
    let user = application_user::create(&db, new_user("carol", Role::Customer)).await?;
    let now = Utc::now().into();
    let b = building::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set("Block A".into()),
        address: Set("1 Campus Rd".into()),
        description: Set(None),
        created_time: Set(now),
        last_updated_time: Set(now),
    }
    .insert(&db)
    .await?;
    let c = customer::ActiveModel {
        id: Set(Uuid::new_v4()),
        building_id: Set(b.id),
        application_user_id: Set(user.id),
        created_time: Set(now),
        last_updated_time: Set(now),
    }
    .insert(&db)
    .await?;

    let owner = c.find_related(application_user::Entity).one(&db).await?;
    assert_eq!(owner.map(|u| u.user_name), Some("carol".to_string()));
    let residents = b.find_related(customer::Entity).all(&db).await?;
    assert_eq!(residents.len(), 1);

    // deleting the building cascades to its customers
    building::Entity::delete_by_id(b.id).exec(&db).await?;
    assert!(customer::Entity::find_by_id(c.id).one(&db).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn store_owner_is_optional() -> Result<()> {
    let db = setup_db().await?;
    let now = Utc::now().into();
    let store = laundry_store::ActiveModel {
        id: Set(Uuid::new_v4()),
        store_name: Set("Clean Co".into()),
        address: Set("123 St".into()),
        start_time: Set(NaiveTime::from_hms_opt(8, 0, 0).unwrap()),
        end_time: Set(NaiveTime::from_hms_opt(20, 0, 0).unwrap()),
        status: Set(true),
        application_user_id: Set(None),
        created_time: Set(now),
        last_updated_time: Set(now),
    }
    .insert(&db)
    .await?;
    assert!(store.find_related(application_user::Entity).one(&db).await?.is_none());
    let found = laundry_store::Entity::find_by_id(store.id).one(&db).await?.unwrap();
    assert_eq!(found.start_time, NaiveTime::from_hms_opt(8, 0, 0).unwrap());
    Ok(())
}
