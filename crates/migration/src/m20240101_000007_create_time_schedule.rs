use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TimeSchedule::Table)
                    .if_not_exists()
                    .col(uuid(TimeSchedule::Id).primary_key())
                    .col(small_integer(TimeSchedule::DayOfWeek).not_null())
                    .col(time(TimeSchedule::StartTime).not_null())
                    .col(time(TimeSchedule::EndTime).not_null())
                    .col(timestamp_with_time_zone(TimeSchedule::CreatedTime).not_null())
                    .col(timestamp_with_time_zone(TimeSchedule::LastUpdatedTime).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(TimeSchedule::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum TimeSchedule { Table, Id, DayOfWeek, StartTime, EndTime, CreatedTime, LastUpdatedTime }
