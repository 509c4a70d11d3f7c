use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "building")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub description: Option<String>,
    pub created_time: DateTimeWithTimeZone,
    pub last_updated_time: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Customer,
    StaffTrip,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Customer => Entity::has_many(super::customer::Entity).into(),
            Relation::StaffTrip => Entity::has_many(super::staff_trip::Entity).into(),
        }
    }
}

impl Related<super::customer::Entity> for Entity {
    fn to() -> RelationDef { Relation::Customer.def() }
}

impl Related<super::staff_trip::Entity> for Entity {
    fn to() -> RelationDef { Relation::StaffTrip.def() }
}

impl ActiveModelBehavior for ActiveModel {}
