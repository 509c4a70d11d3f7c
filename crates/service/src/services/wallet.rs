use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{DatabaseConnection, Set};
use serde::Deserialize;
use tracing::{info, instrument};
use utoipa::ToSchema;
use uuid::Uuid;

use models::wallet;

use crate::contract::{by_id, order_column, CrudService};
use crate::errors::ServiceError;
use crate::pagination::{PaginatedList, Pagination};
use crate::repository::{Repository, SeaOrmRepository};

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct WalletModel {
    pub balance: i32,
}

#[derive(Debug, Clone)]
pub struct WalletUpdate {
    pub balance: i32,
}

impl From<WalletUpdate> for wallet::ActiveModel {
    fn from(u: WalletUpdate) -> Self {
        wallet::ActiveModel {
            balance: Set(u.balance),
            last_updated_time: Set(Utc::now().into()),
            ..Default::default()
        }
    }
}

fn to_entity(m: WalletModel) -> wallet::ActiveModel {
    let now = Utc::now().into();
    wallet::ActiveModel {
        id: Set(Uuid::new_v4()),
        balance: Set(m.balance),
        created_time: Set(now),
        last_updated_time: Set(now),
    }
}

pub struct WalletService<R = SeaOrmRepository<wallet::Entity>> {
    repo: Arc<R>,
}

impl<R> WalletService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }
}

impl WalletService {
    pub fn from_db(db: DatabaseConnection) -> Self { Self::new(Arc::new(SeaOrmRepository::new(db))) }
}

#[async_trait]
impl<R> CrudService for WalletService<R>
where
    R: Repository<wallet::Entity> + 'static,
{
    type Model = wallet::Model;
    type Listed = wallet::Model;
    type Detail = wallet::Model;
    type Input = WalletModel;

    async fn get_all(&self) -> Result<Vec<wallet::Model>, ServiceError> {
        self.repo.get(None).await
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<wallet::Model>, ServiceError> {
        self.repo.get_single(by_id(wallet::Column::Id, id)).await
    }

    #[instrument(skip(self, input))]
    async fn create(&self, input: WalletModel) -> Result<Uuid, ServiceError> {
        let stored = self.repo.add(to_entity(input)).await?;
        info!(wallet_id = %stored.id, "wallet_created");
        Ok(stored.id)
    }

    #[instrument(skip(self, input))]
    async fn update(&self, id: Uuid, input: WalletModel) -> Result<u64, ServiceError> {
        let changes = WalletUpdate { balance: input.balance };
        self.repo.update(by_id(wallet::Column::Id, id), changes.into()).await
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> Result<u64, ServiceError> {
        self.repo.delete(by_id(wallet::Column::Id, id)).await
    }

    async fn get_paginated(
        &self,
        page: Pagination,
        order_by: Option<&str>,
    ) -> Result<PaginatedList<wallet::Model>, ServiceError> {
        let column = order_column(order_by, wallet::Column::CreatedTime)?;
        self.repo.paginate(None, column, page).await
    }
}
