//! SeaORM entities for the laundry domain plus connection and validation helpers.

pub mod errors;
pub mod db;
pub mod enums;
pub mod application_user;
pub mod building;
pub mod wallet;
pub mod customer;
pub mod staff;
pub mod laundry_store;
pub mod time_schedule;
pub mod staff_trip;
pub mod order;
pub mod transaction;
pub mod payment;

pub use enums::{AllowedTransactionType, OrderType, PaymentType, Role, TimeFrame, TripType};

#[cfg(test)]
mod tests;
