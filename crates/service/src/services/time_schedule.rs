use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveTime, Utc};
use sea_orm::{DatabaseConnection, Set};
use serde::Deserialize;
use tracing::{info, instrument};
use utoipa::ToSchema;
use uuid::Uuid;

use models::time_schedule;

use crate::contract::{by_id, order_column, CrudService};
use crate::errors::ServiceError;
use crate::pagination::{PaginatedList, Pagination};
use crate::repository::{Repository, SeaOrmRepository};

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct TimeScheduleModel {
    /// 0 = Monday .. 6 = Sunday
    pub day_of_week: i16,
    #[schema(value_type = String, example = "09:00:00")]
    pub start_time: NaiveTime,
    #[schema(value_type = String, example = "11:00:00")]
    pub end_time: NaiveTime,
}

#[derive(Debug, Clone)]
pub struct TimeScheduleUpdate {
    pub day_of_week: i16,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

impl From<TimeScheduleModel> for TimeScheduleUpdate {
    fn from(m: TimeScheduleModel) -> Self {
        Self { day_of_week: m.day_of_week, start_time: m.start_time, end_time: m.end_time }
    }
}

impl From<TimeScheduleUpdate> for time_schedule::ActiveModel {
    fn from(u: TimeScheduleUpdate) -> Self {
        time_schedule::ActiveModel {
            day_of_week: Set(u.day_of_week),
            start_time: Set(u.start_time),
            end_time: Set(u.end_time),
            last_updated_time: Set(Utc::now().into()),
            ..Default::default()
        }
    }
}

fn to_entity(m: TimeScheduleModel) -> time_schedule::ActiveModel {
    let now = Utc::now().into();
    time_schedule::ActiveModel {
        id: Set(Uuid::new_v4()),
        day_of_week: Set(m.day_of_week),
        start_time: Set(m.start_time),
        end_time: Set(m.end_time),
        created_time: Set(now),
        last_updated_time: Set(now),
    }
}

fn validate(m: &TimeScheduleModel) -> Result<(), ServiceError> {
    if !(0..=6).contains(&m.day_of_week) {
        return Err(ServiceError::Validation("day_of_week must be within 0..=6".into()));
    }
    if m.start_time >= m.end_time {
        return Err(ServiceError::Validation("start_time must be before end_time".into()));
    }
    Ok(())
}

pub struct TimeScheduleService<R = SeaOrmRepository<time_schedule::Entity>> {
    repo: Arc<R>,
}

impl<R> TimeScheduleService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }
}

impl TimeScheduleService {
    pub fn from_db(db: DatabaseConnection) -> Self { Self::new(Arc::new(SeaOrmRepository::new(db))) }
}

#[async_trait]
impl<R> CrudService for TimeScheduleService<R>
where
    R: Repository<time_schedule::Entity> + 'static,
{
    type Model = time_schedule::Model;
    type Listed = time_schedule::Model;
    type Detail = time_schedule::Model;
    type Input = TimeScheduleModel;

    async fn get_all(&self) -> Result<Vec<time_schedule::Model>, ServiceError> {
        self.repo.get(None).await
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<time_schedule::Model>, ServiceError> {
        self.repo.get_single(by_id(time_schedule::Column::Id, id)).await
    }

    #[instrument(skip(self, input), fields(day = input.day_of_week))]
    async fn create(&self, input: TimeScheduleModel) -> Result<Uuid, ServiceError> {
        validate(&input)?;
        let stored = self.repo.add(to_entity(input)).await?;
        info!(schedule_id = %stored.id, "time_schedule_created");
        Ok(stored.id)
    }

    #[instrument(skip(self, input))]
    async fn update(&self, id: Uuid, input: TimeScheduleModel) -> Result<u64, ServiceError> {
        validate(&input)?;
        let changes = TimeScheduleUpdate::from(input);
        self.repo.update(by_id(time_schedule::Column::Id, id), changes.into()).await
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> Result<u64, ServiceError> {
        self.repo.delete(by_id(time_schedule::Column::Id, id)).await
    }

    async fn get_paginated(
        &self,
        page: Pagination,
        order_by: Option<&str>,
    ) -> Result<PaginatedList<time_schedule::Model>, ServiceError> {
        let column = order_column(order_by, time_schedule::Column::CreatedTime)?;
        self.repo.paginate(None, column, page).await
    }
}
