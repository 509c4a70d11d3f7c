//! Staff pickup and delivery trips. Reads load the staff member, building and schedule.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{DatabaseConnection, Set};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use utoipa::ToSchema;
use uuid::Uuid;

use models::{building, staff, staff_trip, time_schedule, TripType};

use crate::contract::{by_id, order_column, CrudService};
use crate::errors::ServiceError;
use crate::pagination::{PaginatedList, Pagination};
use crate::repository::{Repository, SeaOrmRepository};

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct StaffTripModel {
    pub trip_collect: bool,
    #[schema(value_type = String, example = "Pickup")]
    pub trip_type: TripType,
    pub time_schedule_id: Uuid,
    pub building_id: Uuid,
    pub staff_id: Uuid,
}

/// Columns an update may change. Every wire field is mutable here.
#[derive(Debug, Clone)]
pub struct StaffTripUpdate {
    pub trip_collect: bool,
    pub trip_type: TripType,
    pub time_schedule_id: Uuid,
    pub building_id: Uuid,
    pub staff_id: Uuid,
}

impl From<StaffTripModel> for StaffTripUpdate {
    fn from(m: StaffTripModel) -> Self {
        Self {
            trip_collect: m.trip_collect,
            trip_type: m.trip_type,
            time_schedule_id: m.time_schedule_id,
            building_id: m.building_id,
            staff_id: m.staff_id,
        }
    }
}

impl From<StaffTripUpdate> for staff_trip::ActiveModel {
    fn from(u: StaffTripUpdate) -> Self {
        staff_trip::ActiveModel {
            trip_collect: Set(u.trip_collect),
            trip_type: Set(u.trip_type),
            time_schedule_id: Set(u.time_schedule_id),
            building_id: Set(u.building_id),
            staff_id: Set(u.staff_id),
            last_updated_time: Set(Utc::now().into()),
            ..Default::default()
        }
    }
}

fn to_entity(m: StaffTripModel) -> staff_trip::ActiveModel {
    let now = Utc::now().into();
    staff_trip::ActiveModel {
        id: Set(Uuid::new_v4()),
        trip_collect: Set(m.trip_collect),
        trip_type: Set(m.trip_type),
        time_schedule_id: Set(m.time_schedule_id),
        building_id: Set(m.building_id),
        staff_id: Set(m.staff_id),
        created_time: Set(now),
        last_updated_time: Set(now),
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StaffTripDetail {
    #[serde(flatten)]
    pub trip: staff_trip::Model,
    pub staff: Option<staff::Model>,
    pub building: Option<building::Model>,
    pub time_schedule: Option<time_schedule::Model>,
}

pub struct StaffTripService<R = SeaOrmRepository<staff_trip::Entity>> {
    repo: Arc<R>,
}

impl<R> StaffTripService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }
}

impl StaffTripService {
    pub fn from_db(db: DatabaseConnection) -> Self { Self::new(Arc::new(SeaOrmRepository::new(db))) }
}

impl<R: Repository<staff_trip::Entity>> StaffTripService<R> {
    async fn load(&self, trip: staff_trip::Model) -> Result<StaffTripDetail, ServiceError> {
        let staff = self.repo.find_related(&trip, staff::Entity).await?;
        let building = self.repo.find_related(&trip, building::Entity).await?;
        let time_schedule = self.repo.find_related(&trip, time_schedule::Entity).await?;
        Ok(StaffTripDetail { trip, staff, building, time_schedule })
    }
}

#[async_trait]
impl<R> CrudService for StaffTripService<R>
where
    R: Repository<staff_trip::Entity> + 'static,
{
    type Model = staff_trip::Model;
    type Listed = StaffTripDetail;
    type Detail = StaffTripDetail;
    type Input = StaffTripModel;

    async fn get_all(&self) -> Result<Vec<StaffTripDetail>, ServiceError> {
        let trips = self.repo.get(None).await?;
        let mut out = Vec::with_capacity(trips.len());
        for trip in trips {
            out.push(self.load(trip).await?);
        }
        Ok(out)
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<StaffTripDetail>, ServiceError> {
        match self.repo.get_single(by_id(staff_trip::Column::Id, id)).await? {
            Some(trip) => Ok(Some(self.load(trip).await?)),
            None => Ok(None),
        }
    }

    #[instrument(skip(self, input), fields(staff_id = %input.staff_id))]
    async fn create(&self, input: StaffTripModel) -> Result<Uuid, ServiceError> {
        let stored = self.repo.add(to_entity(input)).await?;
        info!(trip_id = %stored.id, "staff_trip_created");
        Ok(stored.id)
    }

    #[instrument(skip(self, input))]
    async fn update(&self, id: Uuid, input: StaffTripModel) -> Result<u64, ServiceError> {
        let changes = StaffTripUpdate::from(input);
        self.repo.update(by_id(staff_trip::Column::Id, id), changes.into()).await
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> Result<u64, ServiceError> {
        self.repo.delete(by_id(staff_trip::Column::Id, id)).await
    }

    async fn get_paginated(
        &self,
        page: Pagination,
        order_by: Option<&str>,
    ) -> Result<PaginatedList<staff_trip::Model>, ServiceError> {
        let column = order_column(order_by, staff_trip::Column::CreatedTime)?;
        self.repo.paginate(None, column, page).await
    }
}
