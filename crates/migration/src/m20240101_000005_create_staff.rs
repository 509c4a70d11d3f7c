use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Staff::Table)
                    .if_not_exists()
                    .col(uuid(Staff::Id).primary_key())
                    .col(uuid(Staff::ApplicationUserId).not_null())
                    .col(string_len_null(Staff::PhoneNumber, 32))
                    .col(timestamp_with_time_zone(Staff::CreatedTime).not_null())
                    .col(timestamp_with_time_zone(Staff::LastUpdatedTime).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_staff_application_user")
                            .from(Staff::Table, Staff::ApplicationUserId)
                            .to(ApplicationUser::Table, ApplicationUser::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Staff::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Staff { Table, Id, ApplicationUserId, PhoneNumber, CreatedTime, LastUpdatedTime }

#[derive(DeriveIden)]
enum ApplicationUser { Table, Id }
