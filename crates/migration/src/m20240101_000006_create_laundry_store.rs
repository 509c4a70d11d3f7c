//! Create `laundry_store`. The owning user is optional, so its FK nulls out on delete.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(LaundryStore::Table)
                    .if_not_exists()
                    .col(uuid(LaundryStore::Id).primary_key())
                    .col(string_len(LaundryStore::StoreName, 128).not_null())
                    .col(string_len(LaundryStore::Address, 255).not_null())
                    .col(time(LaundryStore::StartTime).not_null())
                    .col(time(LaundryStore::EndTime).not_null())
                    .col(boolean(LaundryStore::Status).not_null().default(true))
                    .col(uuid_null(LaundryStore::ApplicationUserId))
                    .col(timestamp_with_time_zone(LaundryStore::CreatedTime).not_null())
                    .col(timestamp_with_time_zone(LaundryStore::LastUpdatedTime).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_laundry_store_application_user")
                            .from(LaundryStore::Table, LaundryStore::ApplicationUserId)
                            .to(ApplicationUser::Table, ApplicationUser::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(LaundryStore::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum LaundryStore {
    Table,
    Id,
    StoreName,
    Address,
    StartTime,
    EndTime,
    Status,
    ApplicationUserId,
    CreatedTime,
    LastUpdatedTime,
}

#[derive(DeriveIden)]
enum ApplicationUser { Table, Id }
