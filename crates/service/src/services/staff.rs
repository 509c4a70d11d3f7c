use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{DatabaseConnection, Set};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use utoipa::ToSchema;
use uuid::Uuid;

use models::{application_user, staff};

use crate::contract::{by_id, order_column, CrudService};
use crate::errors::ServiceError;
use crate::pagination::{PaginatedList, Pagination};
use crate::repository::{Repository, SeaOrmRepository};

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct StaffModel {
    pub application_user_id: Uuid,
    #[serde(default)]
    pub phone_number: Option<String>,
}

/// Only the phone number changes; the linked user is fixed.
#[derive(Debug, Clone)]
pub struct StaffUpdate {
    pub phone_number: Option<String>,
}

impl From<StaffUpdate> for staff::ActiveModel {
    fn from(u: StaffUpdate) -> Self {
        staff::ActiveModel {
            phone_number: Set(u.phone_number),
            last_updated_time: Set(Utc::now().into()),
            ..Default::default()
        }
    }
}

fn to_entity(m: StaffModel) -> staff::ActiveModel {
    let now = Utc::now().into();
    staff::ActiveModel {
        id: Set(Uuid::new_v4()),
        application_user_id: Set(m.application_user_id),
        phone_number: Set(m.phone_number),
        created_time: Set(now),
        last_updated_time: Set(now),
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StaffDetail {
    #[serde(flatten)]
    pub staff: staff::Model,
    pub application_user: Option<application_user::Model>,
}

pub struct StaffService<R = SeaOrmRepository<staff::Entity>> {
    repo: Arc<R>,
}

impl<R> StaffService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }
}

impl StaffService {
    pub fn from_db(db: DatabaseConnection) -> Self { Self::new(Arc::new(SeaOrmRepository::new(db))) }
}

#[async_trait]
impl<R> CrudService for StaffService<R>
where
    R: Repository<staff::Entity> + 'static,
{
    type Model = staff::Model;
    type Listed = staff::Model;
    type Detail = StaffDetail;
    type Input = StaffModel;

    async fn get_all(&self) -> Result<Vec<staff::Model>, ServiceError> {
        self.repo.get(None).await
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<StaffDetail>, ServiceError> {
        let Some(staff) = self.repo.get_single(by_id(staff::Column::Id, id)).await? else {
            return Ok(None);
        };
        let application_user = self.repo.find_related(&staff, application_user::Entity).await?;
        Ok(Some(StaffDetail { staff, application_user }))
    }

    #[instrument(skip(self, input), fields(user_id = %input.application_user_id))]
    async fn create(&self, input: StaffModel) -> Result<Uuid, ServiceError> {
        let stored = self.repo.add(to_entity(input)).await?;
        info!(staff_id = %stored.id, "staff_created");
        Ok(stored.id)
    }

    #[instrument(skip(self, input))]
    async fn update(&self, id: Uuid, input: StaffModel) -> Result<u64, ServiceError> {
        let changes = StaffUpdate { phone_number: input.phone_number };
        self.repo.update(by_id(staff::Column::Id, id), changes.into()).await
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> Result<u64, ServiceError> {
        self.repo.delete(by_id(staff::Column::Id, id)).await
    }

    async fn get_paginated(
        &self,
        page: Pagination,
        order_by: Option<&str>,
    ) -> Result<PaginatedList<staff::Model>, ServiceError> {
        let column = order_column(order_by, staff::Column::CreatedTime)?;
        self.repo.paginate(None, column, page).await
    }
}
