//! Wallet ledger entries.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::enums::AllowedTransactionType;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "transaction")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub payment_method: String,
    pub amount: i32,
    pub description: String,
    pub transaction_type: AllowedTransactionType,
    pub wallet_id: Uuid,
    pub created_time: DateTimeWithTimeZone,
    pub last_updated_time: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Wallet,
    Payment,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Wallet => Entity::belongs_to(super::wallet::Entity)
                .from(Column::WalletId)
                .to(super::wallet::Column::Id)
                .into(),
            Relation::Payment => Entity::has_many(super::payment::Entity).into(),
        }
    }
}

impl Related<super::wallet::Entity> for Entity {
    fn to() -> RelationDef { Relation::Wallet.def() }
}

impl Related<super::payment::Entity> for Entity {
    fn to() -> RelationDef { Relation::Payment.def() }
}

impl ActiveModelBehavior for ActiveModel {}
