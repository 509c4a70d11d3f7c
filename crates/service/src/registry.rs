//! Explicit service registry built once at startup.

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::services::{
    BuildingService, CustomerService, LaundryStoreService, OrderService, PaymentService, StaffService,
    StaffTripService, TimeScheduleService, TransactionService, WalletService,
};

#[derive(Clone)]
pub struct Services {
    pub buildings: Arc<BuildingService>,
    pub customers: Arc<CustomerService>,
    pub laundry_stores: Arc<LaundryStoreService>,
    pub orders: Arc<OrderService>,
    pub payments: Arc<PaymentService>,
    pub staff: Arc<StaffService>,
    pub staff_trips: Arc<StaffTripService>,
    pub time_schedules: Arc<TimeScheduleService>,
    pub transactions: Arc<TransactionService>,
    pub wallets: Arc<WalletService>,
}

impl Services {
    pub fn new(db: &DatabaseConnection) -> Self {
        Self {
            buildings: Arc::new(BuildingService::from_db(db.clone())),
            customers: Arc::new(CustomerService::from_db(db.clone())),
            laundry_stores: Arc::new(LaundryStoreService::from_db(db.clone())),
            orders: Arc::new(OrderService::from_db(db.clone())),
            payments: Arc::new(PaymentService::from_db(db.clone())),
            staff: Arc::new(StaffService::from_db(db.clone())),
            staff_trips: Arc::new(StaffTripService::from_db(db.clone())),
            time_schedules: Arc::new(TimeScheduleService::from_db(db.clone())),
            transactions: Arc::new(TransactionService::from_db(db.clone())),
            wallets: Arc::new(WalletService::from_db(db.clone())),
        }
    }
}
