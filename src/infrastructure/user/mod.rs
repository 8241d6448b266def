//! User infrastructure module
//!
//! Record store implementations (in-memory and PostgreSQL) and the
//! registration/query service built on top of them.

mod postgres_repository;
mod repository;
mod service;

pub use postgres_repository::PostgresUserRepository;
pub use repository::InMemoryUserRepository;
pub use service::{RegisterRequest, UserService};
