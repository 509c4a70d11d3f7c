use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{DatabaseConnection, Set};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use utoipa::ToSchema;
use uuid::Uuid;

use models::{payment, transaction, wallet, AllowedTransactionType};

use crate::contract::{by_id, order_column, CrudService};
use crate::errors::ServiceError;
use crate::pagination::{PaginatedList, Pagination};
use crate::repository::{Repository, SeaOrmRepository};

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct TransactionModel {
    pub payment_method: String,
    pub amount: i32,
    pub description: String,
    #[schema(value_type = String, example = "Deposit")]
    pub transaction_type: AllowedTransactionType,
    pub wallet_id: Uuid,
}

/// Columns an update may change; the wallet is fixed.
#[derive(Debug, Clone)]
pub struct TransactionUpdate {
    pub payment_method: String,
    pub amount: i32,
    pub description: String,
    pub transaction_type: AllowedTransactionType,
}

impl From<TransactionModel> for TransactionUpdate {
    fn from(m: TransactionModel) -> Self {
        Self {
            payment_method: m.payment_method,
            amount: m.amount,
            description: m.description,
            transaction_type: m.transaction_type,
        }
    }
}

impl From<TransactionUpdate> for transaction::ActiveModel {
    fn from(u: TransactionUpdate) -> Self {
        transaction::ActiveModel {
            payment_method: Set(u.payment_method),
            amount: Set(u.amount),
            description: Set(u.description),
            transaction_type: Set(u.transaction_type),
            last_updated_time: Set(Utc::now().into()),
            ..Default::default()
        }
    }
}

fn to_entity(m: TransactionModel) -> transaction::ActiveModel {
    let now = Utc::now().into();
    transaction::ActiveModel {
        id: Set(Uuid::new_v4()),
        payment_method: Set(m.payment_method),
        amount: Set(m.amount),
        description: Set(m.description),
        transaction_type: Set(m.transaction_type),
        wallet_id: Set(m.wallet_id),
        created_time: Set(now),
        last_updated_time: Set(now),
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TransactionDetail {
    #[serde(flatten)]
    pub transaction: transaction::Model,
    pub wallet: Option<wallet::Model>,
    pub payments: Vec<payment::Model>,
}

pub struct TransactionService<R = SeaOrmRepository<transaction::Entity>> {
    repo: Arc<R>,
}

impl<R> TransactionService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }
}

impl TransactionService {
    pub fn from_db(db: DatabaseConnection) -> Self { Self::new(Arc::new(SeaOrmRepository::new(db))) }
}

#[async_trait]
impl<R> CrudService for TransactionService<R>
where
    R: Repository<transaction::Entity> + 'static,
{
    type Model = transaction::Model;
    type Listed = transaction::Model;
    type Detail = TransactionDetail;
    type Input = TransactionModel;

    async fn get_all(&self) -> Result<Vec<transaction::Model>, ServiceError> {
        self.repo.get(None).await
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<TransactionDetail>, ServiceError> {
        let Some(transaction) = self.repo.get_single(by_id(transaction::Column::Id, id)).await? else {
            return Ok(None);
        };
        let wallet = self.repo.find_related(&transaction, wallet::Entity).await?;
        let payments = self.repo.find_many_related(&transaction, payment::Entity).await?;
        Ok(Some(TransactionDetail { transaction, wallet, payments }))
    }

    #[instrument(skip(self, input), fields(wallet_id = %input.wallet_id, kind = ?input.transaction_type))]
    async fn create(&self, input: TransactionModel) -> Result<Uuid, ServiceError> {
        let stored = self.repo.add(to_entity(input)).await?;
        info!(transaction_id = %stored.id, amount = stored.amount, "transaction_recorded");
        Ok(stored.id)
    }

    #[instrument(skip(self, input))]
    async fn update(&self, id: Uuid, input: TransactionModel) -> Result<u64, ServiceError> {
        let changes = TransactionUpdate::from(input);
        self.repo.update(by_id(transaction::Column::Id, id), changes.into()).await
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> Result<u64, ServiceError> {
        self.repo.delete(by_id(transaction::Column::Id, id)).await
    }

    async fn get_paginated(
        &self,
        page: Pagination,
        order_by: Option<&str>,
    ) -> Result<PaginatedList<transaction::Model>, ServiceError> {
        let column = order_column(order_by, transaction::Column::CreatedTime)?;
        self.repo.paginate(None, column, page).await
    }
}
