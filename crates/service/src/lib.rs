//! Service layer for the laundry backend.
//! - `repository`: the generic persistence contract and its SeaORM implementation.
//! - `services`: one CRUD service per entity, mapping wire models to entities.
//! - `auth`: registration, login and JWT handling.

pub mod errors;
pub mod pagination;
pub mod repository;
pub mod contract;
pub mod services;
pub mod registry;
pub mod auth;
#[cfg(test)]
pub mod test_support;

pub use contract::CrudService;
pub use registry::Services;
