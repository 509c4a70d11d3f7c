use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{DatabaseConnection, Set};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use utoipa::ToSchema;
use uuid::Uuid;

use models::{application_user, customer};

use crate::contract::{by_id, order_column, CrudService};
use crate::errors::ServiceError;
use crate::pagination::{PaginatedList, Pagination};
use crate::repository::{Repository, SeaOrmRepository};

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CustomerModel {
    pub building_id: Uuid,
    pub application_user_id: Uuid,
}

/// Columns an update may change.
#[derive(Debug, Clone)]
pub struct CustomerUpdate {
    pub building_id: Uuid,
    pub application_user_id: Uuid,
}

impl From<CustomerModel> for CustomerUpdate {
    fn from(m: CustomerModel) -> Self {
        Self { building_id: m.building_id, application_user_id: m.application_user_id }
    }
}

impl From<CustomerUpdate> for customer::ActiveModel {
    fn from(u: CustomerUpdate) -> Self {
        customer::ActiveModel {
            building_id: Set(u.building_id),
            application_user_id: Set(u.application_user_id),
            last_updated_time: Set(Utc::now().into()),
            ..Default::default()
        }
    }
}

fn to_entity(m: CustomerModel) -> customer::ActiveModel {
    let now = Utc::now().into();
    customer::ActiveModel {
        id: Set(Uuid::new_v4()),
        building_id: Set(m.building_id),
        application_user_id: Set(m.application_user_id),
        created_time: Set(now),
        last_updated_time: Set(now),
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CustomerDetail {
    #[serde(flatten)]
    pub customer: customer::Model,
    pub application_user: Option<application_user::Model>,
}

pub struct CustomerService<R = SeaOrmRepository<customer::Entity>> {
    repo: Arc<R>,
}

impl<R> CustomerService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }
}

impl CustomerService {
    pub fn from_db(db: DatabaseConnection) -> Self { Self::new(Arc::new(SeaOrmRepository::new(db))) }
}

#[async_trait]
impl<R> CrudService for CustomerService<R>
where
    R: Repository<customer::Entity> + 'static,
{
    type Model = customer::Model;
    type Listed = customer::Model;
    type Detail = CustomerDetail;
    type Input = CustomerModel;

    async fn get_all(&self) -> Result<Vec<customer::Model>, ServiceError> {
        self.repo.get(None).await
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<CustomerDetail>, ServiceError> {
        let Some(customer) = self.repo.get_single(by_id(customer::Column::Id, id)).await? else {
            return Ok(None);
        };
        let application_user = self.repo.find_related(&customer, application_user::Entity).await?;
        Ok(Some(CustomerDetail { customer, application_user }))
    }

    #[instrument(skip(self, input), fields(user_id = %input.application_user_id))]
    async fn create(&self, input: CustomerModel) -> Result<Uuid, ServiceError> {
        let stored = self.repo.add(to_entity(input)).await?;
        info!(customer_id = %stored.id, "customer_created");
        Ok(stored.id)
    }

    #[instrument(skip(self, input))]
    async fn update(&self, id: Uuid, input: CustomerModel) -> Result<u64, ServiceError> {
        let changes = CustomerUpdate::from(input);
        self.repo.update(by_id(customer::Column::Id, id), changes.into()).await
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> Result<u64, ServiceError> {
        self.repo.delete(by_id(customer::Column::Id, id)).await
    }

    async fn get_paginated(
        &self,
        page: Pagination,
        order_by: Option<&str>,
    ) -> Result<PaginatedList<customer::Model>, ServiceError> {
        let column = order_column(order_by, customer::Column::CreatedTime)?;
        self.repo.paginate(None, column, page).await
    }
}
