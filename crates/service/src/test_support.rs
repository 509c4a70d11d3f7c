#![cfg(test)]
//! In-memory database and row fixtures for service tests.

use chrono::{NaiveTime, Utc};
use migration::MigratorTrait;
use sea_orm::{ActiveModelTrait, Database, DatabaseConnection, Set};
use uuid::Uuid;

use models::{application_user, building, customer, laundry_store, staff, time_schedule, wallet, Role};

/// A fresh, migrated SQLite database. Each call is isolated.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    let db = Database::connect("sqlite::memory:").await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

pub fn hm(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

pub async fn seed_user(db: &DatabaseConnection, role: Role) -> anyhow::Result<application_user::Model> {
    let tag = Uuid::new_v4().simple().to_string();
    let now = Utc::now().into();
    let user = application_user::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_name: Set(format!("user_{}", &tag[..8])),
        email: Set(format!("{}@example.com", &tag[..8])),
        full_name: Set("Fixture User".into()),
        password_hash: Set("not-a-hash".into()),
        role: Set(role),
        created_time: Set(now),
        last_updated_time: Set(now),
    }
    .insert(db)
    .await?;
    Ok(user)
}

pub async fn seed_building(db: &DatabaseConnection, name: &str) -> anyhow::Result<building::Model> {
    let now = Utc::now().into();
    Ok(building::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name.into()),
        address: Set(format!("{name} street")),
        description: Set(None),
        created_time: Set(now),
        last_updated_time: Set(now),
    }
    .insert(db)
    .await?)
}

pub async fn seed_staff(db: &DatabaseConnection) -> anyhow::Result<staff::Model> {
    let user = seed_user(db, Role::Staff).await?;
    let now = Utc::now().into();
    Ok(staff::ActiveModel {
        id: Set(Uuid::new_v4()),
        application_user_id: Set(user.id),
        phone_number: Set(Some("0900000000".into())),
        created_time: Set(now),
        last_updated_time: Set(now),
    }
    .insert(db)
    .await?)
}

pub async fn seed_customer(db: &DatabaseConnection) -> anyhow::Result<customer::Model> {
    let user = seed_user(db, Role::Customer).await?;
    let b = seed_building(db, "Dorm").await?;
    let now = Utc::now().into();
    Ok(customer::ActiveModel {
        id: Set(Uuid::new_v4()),
        building_id: Set(b.id),
        application_user_id: Set(user.id),
        created_time: Set(now),
        last_updated_time: Set(now),
    }
    .insert(db)
    .await?)
}

pub async fn seed_store(db: &DatabaseConnection) -> anyhow::Result<laundry_store::Model> {
    let now = Utc::now().into();
    Ok(laundry_store::ActiveModel {
        id: Set(Uuid::new_v4()),
        store_name: Set("Fixture Wash".into()),
        address: Set("9 Side St".into()),
        start_time: Set(hm(7, 0)),
        end_time: Set(hm(22, 0)),
        status: Set(true),
        application_user_id: Set(None),
        created_time: Set(now),
        last_updated_time: Set(now),
    }
    .insert(db)
    .await?)
}

pub async fn seed_time_schedule(db: &DatabaseConnection) -> anyhow::Result<time_schedule::Model> {
    let now = Utc::now().into();
    Ok(time_schedule::ActiveModel {
        id: Set(Uuid::new_v4()),
        day_of_week: Set(0),
        start_time: Set(hm(9, 0)),
        end_time: Set(hm(11, 0)),
        created_time: Set(now),
        last_updated_time: Set(now),
    }
    .insert(db)
    .await?)
}

pub async fn seed_wallet(db: &DatabaseConnection, balance: i32) -> anyhow::Result<wallet::Model> {
    let now = Utc::now().into();
    Ok(wallet::ActiveModel {
        id: Set(Uuid::new_v4()),
        balance: Set(balance),
        created_time: Set(now),
        last_updated_time: Set(now),
    }
    .insert(db)
    .await?)
}
