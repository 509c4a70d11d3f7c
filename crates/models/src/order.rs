//! Laundry orders placed by a customer with a store, handled by a staff member.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::enums::{OrderType, PaymentType, TimeFrame};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "order")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub order_date: DateTimeWithTimeZone,
    pub delivery_time_frame: TimeFrame,
    pub expected_finish_date: DateTimeWithTimeZone,
    pub order_type: OrderType,
    pub payment_type: PaymentType,
    /// Delivery address, normally the customer's building.
    pub address: String,
    pub amount: i16,
    #[sea_orm(column_type = "Double")]
    pub total_price: f64,
    pub customer_id: Uuid,
    pub laundry_store_id: Uuid,
    pub staff_id: Uuid,
    pub created_time: DateTimeWithTimeZone,
    pub last_updated_time: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Customer,
    LaundryStore,
    Staff,
    Payment,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Customer => Entity::belongs_to(super::customer::Entity)
                .from(Column::CustomerId)
                .to(super::customer::Column::Id)
                .into(),
            Relation::LaundryStore => Entity::belongs_to(super::laundry_store::Entity)
                .from(Column::LaundryStoreId)
                .to(super::laundry_store::Column::Id)
                .into(),
            Relation::Staff => Entity::belongs_to(super::staff::Entity)
                .from(Column::StaffId)
                .to(super::staff::Column::Id)
                .into(),
            Relation::Payment => Entity::has_many(super::payment::Entity).into(),
        }
    }
}

impl Related<super::customer::Entity> for Entity {
    fn to() -> RelationDef { Relation::Customer.def() }
}

impl Related<super::laundry_store::Entity> for Entity {
    fn to() -> RelationDef { Relation::LaundryStore.def() }
}

impl Related<super::staff::Entity> for Entity {
    fn to() -> RelationDef { Relation::Staff.def() }
}

impl Related<super::payment::Entity> for Entity {
    fn to() -> RelationDef { Relation::Payment.def() }
}

impl ActiveModelBehavior for ActiveModel {}
