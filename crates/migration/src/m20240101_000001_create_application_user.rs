//! Create `application_user`, the identity table every role hangs off.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ApplicationUser::Table)
                    .if_not_exists()
                    .col(uuid(ApplicationUser::Id).primary_key())
                    .col(string_len(ApplicationUser::UserName, 64).unique_key().not_null())
                    .col(string_len(ApplicationUser::Email, 255).unique_key().not_null())
                    .col(string_len(ApplicationUser::FullName, 128).not_null())
                    .col(string_len(ApplicationUser::PasswordHash, 255).not_null())
                    .col(string_len(ApplicationUser::Role, 32).not_null())
                    .col(timestamp_with_time_zone(ApplicationUser::CreatedTime).not_null())
                    .col(timestamp_with_time_zone(ApplicationUser::LastUpdatedTime).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(ApplicationUser::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum ApplicationUser { Table, Id, UserName, Email, FullName, PasswordHash, Role, CreatedTime, LastUpdatedTime }
