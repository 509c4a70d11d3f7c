//! Generic persistence contract shared by every entity service.

use std::marker::PhantomData;

use async_trait::async_trait;
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, Condition, DatabaseConnection, EntityTrait, IntoActiveModel,
    Iterable, ModelTrait, PaginatorTrait, PrimaryKeyToColumn, QueryFilter, QueryOrder, Related,
};
use tracing::debug;

use crate::errors::ServiceError;
use crate::pagination::{PaginatedList, Pagination};

/// CRUD over one entity type. Each call is its own unit of work.
#[async_trait]
pub trait Repository<E>: Send + Sync
where
    E: EntityTrait,
{
    /// Insert and return the stored row.
    async fn add(&self, model: E::ActiveModel) -> Result<E::Model, ServiceError>;

    /// All rows matching `filter`, or every row when `None`.
    async fn get(&self, filter: Option<Condition>) -> Result<Vec<E::Model>, ServiceError>;

    async fn get_single(&self, filter: Condition) -> Result<Option<E::Model>, ServiceError>;

    /// Write the columns set in `changes` on every row matching `filter`; returns rows affected.
    async fn update(&self, filter: Condition, changes: E::ActiveModel) -> Result<u64, ServiceError>;

    async fn delete(&self, filter: Condition) -> Result<u64, ServiceError>;

    /// One page ordered ascending by `order_by`, ties broken by primary key.
    async fn paginate(
        &self,
        filter: Option<Condition>,
        order_by: E::Column,
        page: Pagination,
    ) -> Result<PaginatedList<E::Model>, ServiceError>;

    /// Belongs-to lookup.
    async fn find_related<R>(&self, model: &E::Model, related: R) -> Result<Option<R::Model>, ServiceError>
    where
        R: EntityTrait,
        E: Related<R>;

    /// Has-many lookup.
    async fn find_many_related<R>(&self, model: &E::Model, related: R) -> Result<Vec<R::Model>, ServiceError>
    where
        R: EntityTrait,
        E: Related<R>;
}

/// The SeaORM-backed repository.
pub struct SeaOrmRepository<E> {
    db: DatabaseConnection,
    _entity: PhantomData<fn() -> E>,
}

impl<E> SeaOrmRepository<E> {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db, _entity: PhantomData }
    }
}

impl<E> Clone for SeaOrmRepository<E> {
    fn clone(&self) -> Self {
        Self::new(self.db.clone())
    }
}

#[async_trait]
impl<E> Repository<E> for SeaOrmRepository<E>
where
    E: EntityTrait,
    E::Model: IntoActiveModel<E::ActiveModel> + Sync,
    E::ActiveModel: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send + Sync,
{
    async fn add(&self, model: E::ActiveModel) -> Result<E::Model, ServiceError> {
        let stored = model.insert(&self.db).await?;
        debug!(table = %E::default().table_name(), "row inserted");
        Ok(stored)
    }

    async fn get(&self, filter: Option<Condition>) -> Result<Vec<E::Model>, ServiceError> {
        let mut query = E::find();
        if let Some(filter) = filter {
            query = query.filter(filter);
        }
        Ok(query.all(&self.db).await?)
    }

    async fn get_single(&self, filter: Condition) -> Result<Option<E::Model>, ServiceError> {
        Ok(E::find().filter(filter).one(&self.db).await?)
    }

    async fn update(&self, filter: Condition, changes: E::ActiveModel) -> Result<u64, ServiceError> {
        let res = E::update_many().set(changes).filter(filter).exec(&self.db).await?;
        Ok(res.rows_affected)
    }

    async fn delete(&self, filter: Condition) -> Result<u64, ServiceError> {
        let res = E::delete_many().filter(filter).exec(&self.db).await?;
        Ok(res.rows_affected)
    }

    async fn paginate(
        &self,
        filter: Option<Condition>,
        order_by: E::Column,
        page: Pagination,
    ) -> Result<PaginatedList<E::Model>, ServiceError> {
        let (index, per_page) = page.normalize();
        let mut query = E::find();
        if let Some(filter) = filter {
            query = query.filter(filter);
        }
        query = query.order_by_asc(order_by);
        for key in E::PrimaryKey::iter() {
            query = query.order_by_asc(key.into_column());
        }
        let paginator = query.paginate(&self.db, per_page);
        let totals = paginator.num_items_and_pages().await?;
        let items = paginator.fetch_page(index).await?;
        Ok(PaginatedList::new(items, index, totals.number_of_items, totals.number_of_pages))
    }

    async fn find_related<R>(&self, model: &E::Model, related: R) -> Result<Option<R::Model>, ServiceError>
    where
        R: EntityTrait,
        E: Related<R>,
    {
        Ok(model.find_related(related).one(&self.db).await?)
    }

    async fn find_many_related<R>(&self, model: &E::Model, related: R) -> Result<Vec<R::Model>, ServiceError>
    where
        R: EntityTrait,
        E: Related<R>,
    {
        Ok(model.find_related(related).all(&self.db).await?)
    }
}
