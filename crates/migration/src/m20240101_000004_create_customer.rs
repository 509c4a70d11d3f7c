//! Create `customer` with FKs to `building` and `application_user`.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Customer::Table)
                    .if_not_exists()
                    .col(uuid(Customer::Id).primary_key())
                    .col(uuid(Customer::BuildingId).not_null())
                    .col(uuid(Customer::ApplicationUserId).not_null())
                    .col(timestamp_with_time_zone(Customer::CreatedTime).not_null())
                    .col(timestamp_with_time_zone(Customer::LastUpdatedTime).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_customer_building")
                            .from(Customer::Table, Customer::BuildingId)
                            .to(Building::Table, Building::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_customer_application_user")
                            .from(Customer::Table, Customer::ApplicationUserId)
                            .to(ApplicationUser::Table, ApplicationUser::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Customer::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Customer { Table, Id, BuildingId, ApplicationUserId, CreatedTime, LastUpdatedTime }

#[derive(DeriveIden)]
enum Building { Table, Id }

#[derive(DeriveIden)]
enum ApplicationUser { Table, Id }
