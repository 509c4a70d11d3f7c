//! Laundry stores, with their optional owning user loaded on reads.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveTime, Utc};
use sea_orm::{DatabaseConnection, Set};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use utoipa::ToSchema;
use uuid::Uuid;

use models::{application_user, laundry_store};

use crate::contract::{by_id, order_column, CrudService};
use crate::errors::ServiceError;
use crate::pagination::{PaginatedList, Pagination};
use crate::repository::{Repository, SeaOrmRepository};

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct LaundryStoreModel {
    pub store_name: String,
    pub address: String,
    #[schema(value_type = String, example = "08:00:00")]
    pub start_time: NaiveTime,
    #[schema(value_type = String, example = "20:00:00")]
    pub end_time: NaiveTime,
    pub status: bool,
    #[serde(default)]
    pub application_user_id: Option<Uuid>,
}

/// Columns an update may change.
#[derive(Debug, Clone)]
pub struct LaundryStoreUpdate {
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub address: String,
    pub status: bool,
}

impl From<LaundryStoreModel> for LaundryStoreUpdate {
    fn from(m: LaundryStoreModel) -> Self {
        Self { start_time: m.start_time, end_time: m.end_time, address: m.address, status: m.status }
    }
}

impl From<LaundryStoreUpdate> for laundry_store::ActiveModel {
    fn from(u: LaundryStoreUpdate) -> Self {
        laundry_store::ActiveModel {
            start_time: Set(u.start_time),
            end_time: Set(u.end_time),
            address: Set(u.address),
            status: Set(u.status),
            last_updated_time: Set(Utc::now().into()),
            ..Default::default()
        }
    }
}

fn to_entity(m: LaundryStoreModel) -> laundry_store::ActiveModel {
    let now = Utc::now().into();
    laundry_store::ActiveModel {
        id: Set(Uuid::new_v4()),
        store_name: Set(m.store_name),
        address: Set(m.address),
        start_time: Set(m.start_time),
        end_time: Set(m.end_time),
        status: Set(m.status),
        application_user_id: Set(m.application_user_id),
        created_time: Set(now),
        last_updated_time: Set(now),
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LaundryStoreDetail {
    #[serde(flatten)]
    pub store: laundry_store::Model,
    pub application_user: Option<application_user::Model>,
}

pub struct LaundryStoreService<R = SeaOrmRepository<laundry_store::Entity>> {
    repo: Arc<R>,
}

impl<R> LaundryStoreService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }
}

impl LaundryStoreService {
    pub fn from_db(db: DatabaseConnection) -> Self { Self::new(Arc::new(SeaOrmRepository::new(db))) }
}

impl<R: Repository<laundry_store::Entity>> LaundryStoreService<R> {
    async fn with_owner(&self, store: laundry_store::Model) -> Result<LaundryStoreDetail, ServiceError> {
        let application_user = self.repo.find_related(&store, application_user::Entity).await?;
        Ok(LaundryStoreDetail { store, application_user })
    }
}

#[async_trait]
impl<R> CrudService for LaundryStoreService<R>
where
    R: Repository<laundry_store::Entity> + 'static,
{
    type Model = laundry_store::Model;
    type Listed = LaundryStoreDetail;
    type Detail = LaundryStoreDetail;
    type Input = LaundryStoreModel;

    async fn get_all(&self) -> Result<Vec<LaundryStoreDetail>, ServiceError> {
        let stores = self.repo.get(None).await?;
        let mut out = Vec::with_capacity(stores.len());
        for store in stores {
            out.push(self.with_owner(store).await?);
        }
        Ok(out)
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<LaundryStoreDetail>, ServiceError> {
        match self.repo.get_single(by_id(laundry_store::Column::Id, id)).await? {
            Some(store) => Ok(Some(self.with_owner(store).await?)),
            None => Ok(None),
        }
    }

    #[instrument(skip(self, input), fields(store_name = %input.store_name))]
    async fn create(&self, input: LaundryStoreModel) -> Result<Uuid, ServiceError> {
        let stored = self.repo.add(to_entity(input)).await?;
        info!(store_id = %stored.id, "laundry_store_created");
        Ok(stored.id)
    }

    #[instrument(skip(self, input))]
    async fn update(&self, id: Uuid, input: LaundryStoreModel) -> Result<u64, ServiceError> {
        let changes = LaundryStoreUpdate::from(input);
        self.repo.update(by_id(laundry_store::Column::Id, id), changes.into()).await
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> Result<u64, ServiceError> {
        self.repo.delete(by_id(laundry_store::Column::Id, id)).await
    }

    async fn get_paginated(
        &self,
        page: Pagination,
        order_by: Option<&str>,
    ) -> Result<PaginatedList<laundry_store::Model>, ServiceError> {
        let column = order_column(order_by, laundry_store::Column::CreatedTime)?;
        self.repo.paginate(None, column, page).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{get_db, hm, seed_user};
    use models::Role;

    fn clean_co() -> LaundryStoreModel {
        LaundryStoreModel {
            store_name: "Clean Co".into(),
            address: "123 St".into(),
            start_time: hm(8, 0),
            end_time: hm(20, 0),
            status: true,
            application_user_id: None,
        }
    }

    #[tokio::test]
    async fn create_then_get_by_id() -> anyhow::Result<()> {
        let svc = LaundryStoreService::from_db(get_db().await?);
        let id = svc.create(clean_co()).await?;

        let found = svc.get_by_id(id).await?.expect("store exists");
        assert_eq!(found.store.address, "123 St");
        assert!(found.store.status);
        assert_eq!(found.store.start_time, hm(8, 0));
        assert!(found.application_user.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn update_leaves_name_alone() -> anyhow::Result<()> {
        let svc = LaundryStoreService::from_db(get_db().await?);
        let id = svc.create(clean_co()).await?;

        let changed = LaundryStoreModel {
            store_name: "Renamed".into(),
            address: "456 Ave".into(),
            start_time: hm(9, 30),
            end_time: hm(18, 0),
            status: false,
            application_user_id: None,
        };
        assert_eq!(svc.update(id, changed).await?, 1);

        let found = svc.get_by_id(id).await?.expect("store exists");
        assert_eq!(found.store.store_name, "Clean Co");
        assert_eq!(found.store.address, "456 Ave");
        assert_eq!(found.store.end_time, hm(18, 0));
        assert!(!found.store.status);
        assert!(found.store.last_updated_time >= found.store.created_time);
        Ok(())
    }

    #[tokio::test]
    async fn unknown_ids_are_not_errors() -> anyhow::Result<()> {
        let svc = LaundryStoreService::from_db(get_db().await?);
        let missing = Uuid::new_v4();
        assert!(svc.get_by_id(missing).await?.is_none());
        assert_eq!(svc.delete(missing).await?, 0);
        assert_eq!(svc.update(missing, clean_co()).await?, 0);
        Ok(())
    }

    #[tokio::test]
    async fn listing_loads_owner() -> anyhow::Result<()> {
        let db = get_db().await?;
        let owner = seed_user(&db, Role::LaundryStore).await?;
        let svc = LaundryStoreService::from_db(db);
        svc.create(LaundryStoreModel { application_user_id: Some(owner.id), ..clean_co() }).await?;
        svc.create(clean_co()).await?;

        let all = svc.get_all().await?;
        assert_eq!(all.len(), 2);
        let owned: Vec<_> = all.iter().filter_map(|s| s.application_user.as_ref()).collect();
        assert_eq!(owned.len(), 1);
        assert_eq!(owned[0].id, owner.id);

        let json = serde_json::to_value(&all[0])?;
        assert!(json.get("store_name").is_some());
        Ok(())
    }
}
