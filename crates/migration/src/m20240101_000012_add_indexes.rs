use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

const INDEXES: &[(&str, Tbl, Col)] = &[
    ("idx_customer_application_user", Tbl::Customer, Col::ApplicationUserId),
    ("idx_customer_building", Tbl::Customer, Col::BuildingId),
    ("idx_staff_application_user", Tbl::Staff, Col::ApplicationUserId),
    ("idx_laundry_store_application_user", Tbl::LaundryStore, Col::ApplicationUserId),
    ("idx_staff_trip_staff", Tbl::StaffTrip, Col::StaffId),
    ("idx_staff_trip_created", Tbl::StaffTrip, Col::CreatedTime),
    ("idx_order_customer", Tbl::Order, Col::CustomerId),
    ("idx_order_laundry_store", Tbl::Order, Col::LaundryStoreId),
    ("idx_order_created", Tbl::Order, Col::CreatedTime),
    ("idx_transaction_wallet", Tbl::Transaction, Col::WalletId),
    ("idx_payment_order", Tbl::Payment, Col::OrderId),
    ("idx_payment_transaction", Tbl::Payment, Col::TransactionId),
];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for (name, table, col) in INDEXES {
            manager
                .create_index(Index::create().name(*name).table(*table).col(*col).to_owned())
                .await?;
        }
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for (name, table, _) in INDEXES.iter().rev() {
            manager
                .drop_index(Index::drop().name(*name).table(*table).to_owned())
                .await?;
        }
        Ok(())
    }
}

#[derive(DeriveIden, Clone, Copy)]
enum Tbl {
    Customer,
    Staff,
    LaundryStore,
    StaffTrip,
    Order,
    Transaction,
    Payment,
}

#[derive(DeriveIden, Clone, Copy)]
enum Col {
    ApplicationUserId,
    BuildingId,
    StaffId,
    CustomerId,
    LaundryStoreId,
    WalletId,
    OrderId,
    TransactionId,
    CreatedTime,
}
