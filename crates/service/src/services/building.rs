use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{DatabaseConnection, Set};
use serde::Deserialize;
use tracing::{info, instrument};
use utoipa::ToSchema;
use uuid::Uuid;

use models::building;

use crate::contract::{by_id, order_column, CrudService};
use crate::errors::ServiceError;
use crate::pagination::{PaginatedList, Pagination};
use crate::repository::{Repository, SeaOrmRepository};

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct BuildingModel {
    pub name: String,
    pub address: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone)]
pub struct BuildingUpdate {
    pub name: String,
    pub address: String,
    pub description: Option<String>,
}

impl From<BuildingModel> for BuildingUpdate {
    fn from(m: BuildingModel) -> Self {
        Self { name: m.name, address: m.address, description: m.description }
    }
}

impl From<BuildingUpdate> for building::ActiveModel {
    fn from(u: BuildingUpdate) -> Self {
        building::ActiveModel {
            name: Set(u.name),
            address: Set(u.address),
            description: Set(u.description),
            last_updated_time: Set(Utc::now().into()),
            ..Default::default()
        }
    }
}

fn to_entity(m: BuildingModel) -> building::ActiveModel {
    let now = Utc::now().into();
    building::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(m.name),
        address: Set(m.address),
        description: Set(m.description),
        created_time: Set(now),
        last_updated_time: Set(now),
    }
}

fn validate(m: &BuildingModel) -> Result<(), ServiceError> {
    if m.name.trim().is_empty() {
        return Err(ServiceError::Validation("building name required".into()));
    }
    Ok(())
}

pub struct BuildingService<R = SeaOrmRepository<building::Entity>> {
    repo: Arc<R>,
}

impl<R> BuildingService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }
}

impl BuildingService {
    pub fn from_db(db: DatabaseConnection) -> Self { Self::new(Arc::new(SeaOrmRepository::new(db))) }
}

#[async_trait]
impl<R> CrudService for BuildingService<R>
where
    R: Repository<building::Entity> + 'static,
{
    type Model = building::Model;
    type Listed = building::Model;
    type Detail = building::Model;
    type Input = BuildingModel;

    async fn get_all(&self) -> Result<Vec<building::Model>, ServiceError> {
        self.repo.get(None).await
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<building::Model>, ServiceError> {
        self.repo.get_single(by_id(building::Column::Id, id)).await
    }

    #[instrument(skip(self, input), fields(name = %input.name))]
    async fn create(&self, input: BuildingModel) -> Result<Uuid, ServiceError> {
        validate(&input)?;
        let stored = self.repo.add(to_entity(input)).await?;
        info!(building_id = %stored.id, "building_created");
        Ok(stored.id)
    }

    #[instrument(skip(self, input))]
    async fn update(&self, id: Uuid, input: BuildingModel) -> Result<u64, ServiceError> {
        validate(&input)?;
        self.repo.update(by_id(building::Column::Id, id), BuildingUpdate::from(input).into()).await
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> Result<u64, ServiceError> {
        self.repo.delete(by_id(building::Column::Id, id)).await
    }

    async fn get_paginated(
        &self,
        page: Pagination,
        order_by: Option<&str>,
    ) -> Result<PaginatedList<building::Model>, ServiceError> {
        let column = order_column(order_by, building::Column::CreatedTime)?;
        self.repo.paginate(None, column, page).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;

    #[tokio::test]
    async fn crud_round() -> anyhow::Result<()> {
        let svc = BuildingService::from_db(get_db().await?);
        let id = svc
            .create(BuildingModel { name: "S1".into(), address: "Lot 1".into(), description: None })
            .await?;
        let n = svc
            .update(id, BuildingModel { name: "S1b".into(), address: "Lot 2".into(), description: Some("west".into()) })
            .await?;
        assert_eq!(n, 1);
        let b = svc.get_by_id(id).await?.expect("building exists");
        assert_eq!(b.name, "S1b");
        assert_eq!(b.description.as_deref(), Some("west"));
        assert_eq!(svc.delete(id).await?, 1);
        assert!(svc.get_all().await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn blank_name_rejected() -> anyhow::Result<()> {
        let svc = BuildingService::from_db(get_db().await?);
        let err = svc
            .create(BuildingModel { name: "  ".into(), address: "x".into(), description: None })
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
        Ok(())
    }

    #[tokio::test]
    async fn paginate_by_name() -> anyhow::Result<()> {
        let svc = BuildingService::from_db(get_db().await?);
        for name in ["C", "A", "B"] {
            svc.create(BuildingModel { name: name.into(), address: "x".into(), description: None }).await?;
        }
        let page = svc.get_paginated(Pagination::new(1, 2), Some("name")).await?;
        let names: Vec<_> = page.items.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B"]);
        assert_eq!(page.total_count, 3);
        Ok(())
    }
}
