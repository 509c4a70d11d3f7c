//! The CRUD contract every entity service implements.

use std::str::FromStr;

use async_trait::async_trait;
use sea_orm::{ColumnTrait, Condition};
use serde::{de::DeserializeOwned, Serialize};
use uuid::Uuid;

use crate::errors::ServiceError;
use crate::pagination::{PaginatedList, Pagination};

#[async_trait]
pub trait CrudService: Send + Sync + 'static {
    /// Stored entity, as returned in paginated listings.
    type Model: Serialize + Send + 'static;
    /// Item returned by `get_all`, with whatever the listing eagerly loads.
    type Listed: Serialize + Send + 'static;
    /// Result of `get_by_id`, with the related rows it loads.
    type Detail: Serialize + Send + 'static;
    /// Wire model accepted by `create` and `update`.
    type Input: DeserializeOwned + Send + 'static;

    async fn get_all(&self) -> Result<Vec<Self::Listed>, ServiceError>;

    /// `None` for unknown ids.
    async fn get_by_id(&self, id: Uuid) -> Result<Option<Self::Detail>, ServiceError>;

    /// Returns the new row's id.
    async fn create(&self, input: Self::Input) -> Result<Uuid, ServiceError>;

    /// Returns rows affected; 0 for unknown ids.
    async fn update(&self, id: Uuid, input: Self::Input) -> Result<u64, ServiceError>;

    /// Returns rows removed; 0 for unknown ids.
    async fn delete(&self, id: Uuid) -> Result<u64, ServiceError>;

    /// Ordered by `order_by` (a column name) or by creation time when absent.
    async fn get_paginated(
        &self,
        page: Pagination,
        order_by: Option<&str>,
    ) -> Result<PaginatedList<Self::Model>, ServiceError>;
}

/// `id = <id>` on the given column.
pub fn by_id<C: ColumnTrait>(column: C, id: Uuid) -> Condition {
    Condition::all().add(column.eq(id))
}

/// Resolve a column name, falling back to `default` when none was given.
pub fn order_column<C>(order_by: Option<&str>, default: C) -> Result<C, ServiceError>
where
    C: ColumnTrait + FromStr,
{
    match order_by.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(default),
        Some(name) => C::from_str(name)
            .map_err(|_| ServiceError::Validation(format!("unknown order_by column: {name}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::staff_trip::Column;

    #[test]
    fn order_column_defaults_and_parses() {
        assert!(matches!(order_column(None, Column::CreatedTime), Ok(Column::CreatedTime)));
        assert!(matches!(order_column(Some(""), Column::CreatedTime), Ok(Column::CreatedTime)));
        assert!(matches!(order_column(Some("trip_type"), Column::CreatedTime), Ok(Column::TripType)));
        assert!(matches!(
            order_column(Some("nope"), Column::CreatedTime),
            Err(ServiceError::Validation(_))
        ));
    }
}
