//! Create `order` with FKs to `customer`, `laundry_store` and `staff`.
//!
//! Enum-valued columns are stored as short strings.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Order::Table)
                    .if_not_exists()
                    .col(uuid(Order::Id).primary_key())
                    .col(timestamp_with_time_zone(Order::OrderDate).not_null())
                    .col(string_len(Order::DeliveryTimeFrame, 32).not_null())
                    .col(timestamp_with_time_zone(Order::ExpectedFinishDate).not_null())
                    .col(string_len(Order::OrderType, 32).not_null())
                    .col(string_len(Order::PaymentType, 32).not_null())
                    .col(string_len(Order::Address, 255).not_null())
                    .col(small_integer(Order::Amount).not_null())
                    .col(double(Order::TotalPrice).not_null())
                    .col(uuid(Order::CustomerId).not_null())
                    .col(uuid(Order::LaundryStoreId).not_null())
                    .col(uuid(Order::StaffId).not_null())
                    .col(timestamp_with_time_zone(Order::CreatedTime).not_null())
                    .col(timestamp_with_time_zone(Order::LastUpdatedTime).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_order_customer")
                            .from(Order::Table, Order::CustomerId)
                            .to(Customer::Table, Customer::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_order_laundry_store")
                            .from(Order::Table, Order::LaundryStoreId)
                            .to(LaundryStore::Table, LaundryStore::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_order_staff")
                            .from(Order::Table, Order::StaffId)
                            .to(Staff::Table, Staff::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Order::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Order {
    Table,
    Id,
    OrderDate,
    DeliveryTimeFrame,
    ExpectedFinishDate,
    OrderType,
    PaymentType,
    Address,
    Amount,
    TotalPrice,
    CustomerId,
    LaundryStoreId,
    StaffId,
    CreatedTime,
    LastUpdatedTime,
}

#[derive(DeriveIden)]
enum Customer { Table, Id }

#[derive(DeriveIden)]
enum LaundryStore { Table, Id }

#[derive(DeriveIden)]
enum Staff { Table, Id }
