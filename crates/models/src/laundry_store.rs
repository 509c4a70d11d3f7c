use chrono::NaiveTime;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "laundry_store")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub store_name: String,
    pub address: String,
    /// Opening time of day.
    pub start_time: NaiveTime,
    /// Closing time of day.
    pub end_time: NaiveTime,
    /// Whether the store currently takes orders.
    pub status: bool,
    pub application_user_id: Option<Uuid>,
    pub created_time: DateTimeWithTimeZone,
    pub last_updated_time: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    ApplicationUser,
    Order,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::ApplicationUser => Entity::belongs_to(super::application_user::Entity)
                .from(Column::ApplicationUserId)
                .to(super::application_user::Column::Id)
                .into(),
            Relation::Order => Entity::has_many(super::order::Entity).into(),
        }
    }
}

impl Related<super::application_user::Entity> for Entity {
    fn to() -> RelationDef { Relation::ApplicationUser.def() }
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef { Relation::Order.def() }
}

impl ActiveModelBehavior for ActiveModel {}
