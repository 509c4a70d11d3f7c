//! Migrator registering one migration per table in foreign-key order.
//! Indexes are applied last.
pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_application_user;
mod m20240101_000002_create_building;
mod m20240101_000003_create_wallet;
mod m20240101_000004_create_customer;
mod m20240101_000005_create_staff;
mod m20240101_000006_create_laundry_store;
mod m20240101_000007_create_time_schedule;
mod m20240101_000008_create_staff_trip;
mod m20240101_000009_create_order;
mod m20240101_000010_create_transaction;
mod m20240101_000011_create_payment;
mod m20240101_000012_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_application_user::Migration),
            Box::new(m20240101_000002_create_building::Migration),
            Box::new(m20240101_000003_create_wallet::Migration),
            Box::new(m20240101_000004_create_customer::Migration),
            Box::new(m20240101_000005_create_staff::Migration),
            Box::new(m20240101_000006_create_laundry_store::Migration),
            Box::new(m20240101_000007_create_time_schedule::Migration),
            Box::new(m20240101_000008_create_staff_trip::Migration),
            Box::new(m20240101_000009_create_order::Migration),
            Box::new(m20240101_000010_create_transaction::Migration),
            Box::new(m20240101_000011_create_payment::Migration),
            // Indexes should always be applied last
            Box::new(m20240101_000012_add_indexes::Migration),
        ]
    }
}
