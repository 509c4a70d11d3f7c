use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Transaction::Table)
                    .if_not_exists()
                    .col(uuid(Transaction::Id).primary_key())
                    .col(string_len(Transaction::PaymentMethod, 64).not_null())
                    .col(integer(Transaction::Amount).not_null())
                    .col(string(Transaction::Description).not_null())
                    .col(string_len(Transaction::TransactionType, 32).not_null())
                    .col(uuid(Transaction::WalletId).not_null())
                    .col(timestamp_with_time_zone(Transaction::CreatedTime).not_null())
                    .col(timestamp_with_time_zone(Transaction::LastUpdatedTime).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_transaction_wallet")
                            .from(Transaction::Table, Transaction::WalletId)
                            .to(Wallet::Table, Wallet::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Transaction::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Transaction {
    Table,
    Id,
    PaymentMethod,
    Amount,
    Description,
    TransactionType,
    WalletId,
    CreatedTime,
    LastUpdatedTime,
}

#[derive(DeriveIden)]
enum Wallet { Table, Id }
