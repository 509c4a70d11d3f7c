use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Building::Table)
                    .if_not_exists()
                    .col(uuid(Building::Id).primary_key())
                    .col(string_len(Building::Name, 128).not_null())
                    .col(string_len(Building::Address, 255).not_null())
                    .col(string_null(Building::Description))
                    .col(timestamp_with_time_zone(Building::CreatedTime).not_null())
                    .col(timestamp_with_time_zone(Building::LastUpdatedTime).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Building::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Building { Table, Id, Name, Address, Description, CreatedTime, LastUpdatedTime }
