//! Create `staff_trip` referencing `time_schedule`, `building` and `staff`.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(StaffTrip::Table)
                    .if_not_exists()
                    .col(uuid(StaffTrip::Id).primary_key())
                    .col(boolean(StaffTrip::TripCollect).not_null())
                    .col(string_len(StaffTrip::TripType, 32).not_null())
                    .col(uuid(StaffTrip::TimeScheduleId).not_null())
                    .col(uuid(StaffTrip::BuildingId).not_null())
                    .col(uuid(StaffTrip::StaffId).not_null())
                    .col(timestamp_with_time_zone(StaffTrip::CreatedTime).not_null())
                    .col(timestamp_with_time_zone(StaffTrip::LastUpdatedTime).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_staff_trip_time_schedule")
                            .from(StaffTrip::Table, StaffTrip::TimeScheduleId)
                            .to(TimeSchedule::Table, TimeSchedule::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_staff_trip_building")
                            .from(StaffTrip::Table, StaffTrip::BuildingId)
                            .to(Building::Table, Building::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_staff_trip_staff")
                            .from(StaffTrip::Table, StaffTrip::StaffId)
                            .to(Staff::Table, Staff::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(StaffTrip::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum StaffTrip {
    Table,
    Id,
    TripCollect,
    TripType,
    TimeScheduleId,
    BuildingId,
    StaffId,
    CreatedTime,
    LastUpdatedTime,
}

#[derive(DeriveIden)]
enum TimeSchedule { Table, Id }

#[derive(DeriveIden)]
enum Building { Table, Id }

#[derive(DeriveIden)]
enum Staff { Table, Id }
