//! One service per entity, each implementing [`crate::contract::CrudService`].

pub mod building;
pub mod customer;
pub mod laundry_store;
pub mod order;
pub mod payment;
pub mod staff;
pub mod staff_trip;
pub mod time_schedule;
pub mod transaction;
pub mod wallet;

pub use building::{BuildingModel, BuildingService};
pub use customer::{CustomerModel, CustomerService};
pub use laundry_store::{LaundryStoreModel, LaundryStoreService};
pub use order::{OrderModel, OrderService};
pub use payment::{PaymentModel, PaymentService};
pub use staff::{StaffModel, StaffService};
pub use staff_trip::{StaffTripModel, StaffTripService};
pub use time_schedule::{TimeScheduleModel, TimeScheduleService};
pub use transaction::{TransactionModel, TransactionService};
pub use wallet::{WalletModel, WalletService};
