//! Auth module: three-layer architecture (domain, repository, service) plus JWT handling.

pub mod domain;
pub mod errors;
pub mod repository;
pub mod service;
pub mod repo;
pub mod token;

pub use service::AuthService;
pub use token::JwtKeys;
