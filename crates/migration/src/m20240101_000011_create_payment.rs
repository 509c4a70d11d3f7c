//! Create `payment`, linking an `order` to the `transaction` that settled it.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Payment::Table)
                    .if_not_exists()
                    .col(uuid(Payment::Id).primary_key())
                    .col(integer(Payment::Amount).not_null())
                    .col(uuid(Payment::OrderId).not_null())
                    .col(uuid(Payment::TransactionId).not_null())
                    .col(timestamp_with_time_zone(Payment::CreatedTime).not_null())
                    .col(timestamp_with_time_zone(Payment::LastUpdatedTime).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_payment_order")
                            .from(Payment::Table, Payment::OrderId)
                            .to(Order::Table, Order::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_payment_transaction")
                            .from(Payment::Table, Payment::TransactionId)
                            .to(Transaction::Table, Transaction::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Payment::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Payment { Table, Id, Amount, OrderId, TransactionId, CreatedTime, LastUpdatedTime }

#[derive(DeriveIden)]
enum Order { Table, Id }

#[derive(DeriveIden)]
enum Transaction { Table, Id }
