use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{DatabaseConnection, Set};
use serde::Deserialize;
use tracing::{info, instrument};
use utoipa::ToSchema;
use uuid::Uuid;

use models::payment;

use crate::contract::{by_id, order_column, CrudService};
use crate::errors::ServiceError;
use crate::pagination::{PaginatedList, Pagination};
use crate::repository::{Repository, SeaOrmRepository};

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct PaymentModel {
    pub amount: i32,
    pub order_id: Uuid,
    pub transaction_id: Uuid,
}

#[derive(Debug, Clone)]
pub struct PaymentUpdate {
    pub amount: i32,
}

impl From<PaymentUpdate> for payment::ActiveModel {
    fn from(u: PaymentUpdate) -> Self {
        payment::ActiveModel {
            amount: Set(u.amount),
            last_updated_time: Set(Utc::now().into()),
            ..Default::default()
        }
    }
}

fn to_entity(m: PaymentModel) -> payment::ActiveModel {
    let now = Utc::now().into();
    payment::ActiveModel {
        id: Set(Uuid::new_v4()),
        amount: Set(m.amount),
        order_id: Set(m.order_id),
        transaction_id: Set(m.transaction_id),
        created_time: Set(now),
        last_updated_time: Set(now),
    }
}

pub struct PaymentService<R = SeaOrmRepository<payment::Entity>> {
    repo: Arc<R>,
}

impl<R> PaymentService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }
}

impl PaymentService {
    pub fn from_db(db: DatabaseConnection) -> Self { Self::new(Arc::new(SeaOrmRepository::new(db))) }
}

#[async_trait]
impl<R> CrudService for PaymentService<R>
where
    R: Repository<payment::Entity> + 'static,
{
    type Model = payment::Model;
    type Listed = payment::Model;
    type Detail = payment::Model;
    type Input = PaymentModel;

    async fn get_all(&self) -> Result<Vec<payment::Model>, ServiceError> {
        self.repo.get(None).await
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<payment::Model>, ServiceError> {
        self.repo.get_single(by_id(payment::Column::Id, id)).await
    }

    #[instrument(skip(self, input), fields(order_id = %input.order_id))]
    async fn create(&self, input: PaymentModel) -> Result<Uuid, ServiceError> {
        let stored = self.repo.add(to_entity(input)).await?;
        info!(payment_id = %stored.id, amount = stored.amount, "payment_created");
        Ok(stored.id)
    }

    #[instrument(skip(self, input))]
    async fn update(&self, id: Uuid, input: PaymentModel) -> Result<u64, ServiceError> {
        let changes = PaymentUpdate { amount: input.amount };
        self.repo.update(by_id(payment::Column::Id, id), changes.into()).await
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> Result<u64, ServiceError> {
        self.repo.delete(by_id(payment::Column::Id, id)).await
    }

    async fn get_paginated(
        &self,
        page: Pagination,
        order_by: Option<&str>,
    ) -> Result<PaginatedList<payment::Model>, ServiceError> {
        let column = order_column(order_by, payment::Column::CreatedTime)?;
        self.repo.paginate(None, column, page).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::order::{OrderModel, OrderService};
    use crate::services::transaction::{TransactionModel, TransactionService};
    use crate::test_support::{get_db, seed_customer, seed_staff, seed_store, seed_wallet};
    use models::{AllowedTransactionType, OrderType, PaymentType, TimeFrame};

    #[tokio::test]
    async fn payment_links_order_and_transaction() -> anyhow::Result<()> {
        let db = get_db().await?;
        let customer = seed_customer(&db).await?;
        let store = seed_store(&db).await?;
        let staff = seed_staff(&db).await?;
        let wallet = seed_wallet(&db, 200).await?;

        let orders = OrderService::from_db(db.clone());
        let order_id = orders
            .create(OrderModel {
                order_date: None,
                delivery_time_frame: TimeFrame::Evening,
                expected_finish_date: Utc::now().into(),
                order_type: OrderType::OneWay,
                payment_type: PaymentType::EWallet,
                address: "Dorm".into(),
                amount: 1,
                total_price: 20.0,
                customer_id: customer.id,
                laundry_store_id: store.id,
                staff_id: staff.id,
            })
            .await?;
        let transactions = TransactionService::from_db(db.clone());
        let transaction_id = transactions
            .create(TransactionModel {
                payment_method: "wallet".into(),
                amount: 20,
                description: "order payment".into(),
                transaction_type: AllowedTransactionType::Payment,
                wallet_id: wallet.id,
            })
            .await?;

        let svc = PaymentService::from_db(db);
        let id = svc.create(PaymentModel { amount: 20, order_id, transaction_id }).await?;
        assert_eq!(svc.update(id, PaymentModel { amount: 18, order_id, transaction_id }).await?, 1);
        assert_eq!(svc.get_by_id(id).await?.map(|p| p.amount), Some(18));

        let detail = transactions.get_by_id(transaction_id).await?.expect("transaction exists");
        assert_eq!(detail.payments.len(), 1);
        assert_eq!(detail.payments[0].id, id);
        Ok(())
    }
}
