use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::enums::TripType;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "staff_trip")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Whether this trip collects laundry from the building.
    pub trip_collect: bool,
    pub trip_type: TripType,
    pub time_schedule_id: Uuid,
    pub building_id: Uuid,
    pub staff_id: Uuid,
    pub created_time: DateTimeWithTimeZone,
    pub last_updated_time: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    TimeSchedule,
    Building,
    Staff,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::TimeSchedule => Entity::belongs_to(super::time_schedule::Entity)
                .from(Column::TimeScheduleId)
                .to(super::time_schedule::Column::Id)
                .into(),
            Relation::Building => Entity::belongs_to(super::building::Entity)
                .from(Column::BuildingId)
                .to(super::building::Column::Id)
                .into(),
            Relation::Staff => Entity::belongs_to(super::staff::Entity)
                .from(Column::StaffId)
                .to(super::staff::Column::Id)
                .into(),
        }
    }
}

impl Related<super::time_schedule::Entity> for Entity {
    fn to() -> RelationDef { Relation::TimeSchedule.def() }
}

impl Related<super::building::Entity> for Entity {
    fn to() -> RelationDef { Relation::Building.def() }
}

impl Related<super::staff::Entity> for Entity {
    fn to() -> RelationDef { Relation::Staff.def() }
}

impl ActiveModelBehavior for ActiveModel {}
