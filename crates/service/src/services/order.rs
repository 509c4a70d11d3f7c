//! Laundry orders. Reads by id load the customer, store and assigned staff.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, Utc};
use sea_orm::{DatabaseConnection, Set};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use utoipa::ToSchema;
use uuid::Uuid;

use models::{customer, laundry_store, order, staff, OrderType, PaymentType, TimeFrame};

use crate::contract::{by_id, order_column, CrudService};
use crate::errors::ServiceError;
use crate::pagination::{PaginatedList, Pagination};
use crate::repository::{Repository, SeaOrmRepository};

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct OrderModel {
    /// Defaults to the time of creation.
    #[serde(default)]
    pub order_date: Option<DateTime<FixedOffset>>,
    #[schema(value_type = String, example = "Morning")]
    pub delivery_time_frame: TimeFrame,
    pub expected_finish_date: DateTime<FixedOffset>,
    #[schema(value_type = String, example = "TwoWay")]
    pub order_type: OrderType,
    #[schema(value_type = String, example = "Cash")]
    pub payment_type: PaymentType,
    pub address: String,
    pub amount: i16,
    pub total_price: f64,
    pub customer_id: Uuid,
    pub laundry_store_id: Uuid,
    pub staff_id: Uuid,
}

/// Columns an update may change. Order date, customer and store are fixed once placed.
#[derive(Debug, Clone)]
pub struct OrderUpdate {
    pub delivery_time_frame: TimeFrame,
    pub expected_finish_date: DateTime<FixedOffset>,
    pub order_type: OrderType,
    pub payment_type: PaymentType,
    pub address: String,
    pub amount: i16,
    pub total_price: f64,
    pub staff_id: Uuid,
}

impl From<OrderModel> for OrderUpdate {
    fn from(m: OrderModel) -> Self {
        Self {
            delivery_time_frame: m.delivery_time_frame,
            expected_finish_date: m.expected_finish_date,
            order_type: m.order_type,
            payment_type: m.payment_type,
            address: m.address,
            amount: m.amount,
            total_price: m.total_price,
            staff_id: m.staff_id,
        }
    }
}

impl From<OrderUpdate> for order::ActiveModel {
    fn from(u: OrderUpdate) -> Self {
        order::ActiveModel {
            delivery_time_frame: Set(u.delivery_time_frame),
            expected_finish_date: Set(u.expected_finish_date),
            order_type: Set(u.order_type),
            payment_type: Set(u.payment_type),
            address: Set(u.address),
            amount: Set(u.amount),
            total_price: Set(u.total_price),
            staff_id: Set(u.staff_id),
            last_updated_time: Set(Utc::now().into()),
            ..Default::default()
        }
    }
}

fn to_entity(m: OrderModel) -> order::ActiveModel {
    let now: DateTime<FixedOffset> = Utc::now().into();
    order::ActiveModel {
        id: Set(Uuid::new_v4()),
        order_date: Set(m.order_date.unwrap_or(now)),
        delivery_time_frame: Set(m.delivery_time_frame),
        expected_finish_date: Set(m.expected_finish_date),
        order_type: Set(m.order_type),
        payment_type: Set(m.payment_type),
        address: Set(m.address),
        amount: Set(m.amount),
        total_price: Set(m.total_price),
        customer_id: Set(m.customer_id),
        laundry_store_id: Set(m.laundry_store_id),
        staff_id: Set(m.staff_id),
        created_time: Set(now),
        last_updated_time: Set(now),
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct OrderDetail {
    #[serde(flatten)]
    pub order: order::Model,
    pub customer: Option<customer::Model>,
    pub laundry_store: Option<laundry_store::Model>,
    pub staff: Option<staff::Model>,
}

pub struct OrderService<R = SeaOrmRepository<order::Entity>> {
    repo: Arc<R>,
}

impl<R> OrderService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }
}

impl OrderService {
    pub fn from_db(db: DatabaseConnection) -> Self { Self::new(Arc::new(SeaOrmRepository::new(db))) }
}

#[async_trait]
impl<R> CrudService for OrderService<R>
where
    R: Repository<order::Entity> + 'static,
{
    type Model = order::Model;
    type Listed = order::Model;
    type Detail = OrderDetail;
    type Input = OrderModel;

    async fn get_all(&self) -> Result<Vec<order::Model>, ServiceError> {
        self.repo.get(None).await
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<OrderDetail>, ServiceError> {
        let Some(order) = self.repo.get_single(by_id(order::Column::Id, id)).await? else {
            return Ok(None);
        };
        let customer = self.repo.find_related(&order, customer::Entity).await?;
        let laundry_store = self.repo.find_related(&order, laundry_store::Entity).await?;
        let staff = self.repo.find_related(&order, staff::Entity).await?;
        Ok(Some(OrderDetail { order, customer, laundry_store, staff }))
    }

    #[instrument(skip(self, input), fields(customer_id = %input.customer_id, store_id = %input.laundry_store_id))]
    async fn create(&self, input: OrderModel) -> Result<Uuid, ServiceError> {
        let stored = self.repo.add(to_entity(input)).await?;
        info!(order_id = %stored.id, total_price = stored.total_price, "order_created");
        Ok(stored.id)
    }

    #[instrument(skip(self, input))]
    async fn update(&self, id: Uuid, input: OrderModel) -> Result<u64, ServiceError> {
        let changes = OrderUpdate::from(input);
        self.repo.update(by_id(order::Column::Id, id), changes.into()).await
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> Result<u64, ServiceError> {
        self.repo.delete(by_id(order::Column::Id, id)).await
    }

    async fn get_paginated(
        &self,
        page: Pagination,
        order_by: Option<&str>,
    ) -> Result<PaginatedList<order::Model>, ServiceError> {
        let column = order_column(order_by, order::Column::CreatedTime)?;
        self.repo.paginate(None, column, page).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{get_db, seed_customer, seed_staff, seed_store};
    use chrono::Duration;

    #[tokio::test]
    async fn order_lifecycle() -> anyhow::Result<()> {
        let db = get_db().await?;
        let customer = seed_customer(&db).await?;
        let store = seed_store(&db).await?;
        let staff = seed_staff(&db).await?;
        let other_staff = seed_staff(&db).await?;
        let svc = OrderService::from_db(db);

        let placed: DateTime<FixedOffset> = (Utc::now() - Duration::days(1)).into();
        let input = OrderModel {
            order_date: Some(placed),
            delivery_time_frame: TimeFrame::Morning,
            expected_finish_date: (Utc::now() + Duration::days(2)).into(),
            order_type: OrderType::TwoWay,
            payment_type: PaymentType::Cash,
            address: "Dorm room 101".into(),
            amount: 3,
            total_price: 45.5,
            customer_id: customer.id,
            laundry_store_id: store.id,
            staff_id: staff.id,
        };
        let id = svc.create(input.clone()).await?;

        let d = svc.get_by_id(id).await?.expect("order exists");
        assert_eq!(d.customer.map(|c| c.id), Some(customer.id));
        assert_eq!(d.laundry_store.map(|s| s.id), Some(store.id));
        assert_eq!(d.staff.map(|s| s.id), Some(staff.id));
        assert_eq!(d.order.order_date.timestamp(), placed.timestamp());

        let changed = OrderModel {
            order_date: Some(Utc::now().into()),
            payment_type: PaymentType::EWallet,
            total_price: 60.0,
            staff_id: other_staff.id,
            ..input
        };
        assert_eq!(svc.update(id, changed).await?, 1);
        let after = svc.get_by_id(id).await?.expect("order exists").order;
        assert_eq!(after.payment_type, PaymentType::EWallet);
        assert_eq!(after.total_price, 60.0);
        assert_eq!(after.staff_id, other_staff.id);
        // order date is not part of the update
        assert_eq!(after.order_date.timestamp(), placed.timestamp());

        assert_eq!(svc.get_all().await?.len(), 1);
        assert_eq!(svc.delete(id).await?, 1);
        assert!(svc.get_by_id(id).await?.is_none());
        Ok(())
    }
}
