//! # city2city-adapter-storage-sqlite-sqlx
//!
//! `SQLite` persistence adapter using [sqlx](https://docs.rs/sqlx).
//!
//! ## Responsibilities
//! - Implement the repository port traits defined in `city2city-app::ports::storage`
//! - Manage `SQLite` connection pool lifecycle
//! - Run database migrations (using sqlx embedded migrations)
//! - Map between domain types and joined database rows
//! - Classify sqlx failures into [`City2CityError`](city2city_domain::error::City2CityError) variants
//!
//! ## Dependency rule
//! Depends on `city2city-app` (for port traits) and `city2city-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

mod car_repo;
mod city_repo;
mod customer_repo;
mod driver_repo;
mod error;
mod pool;
mod rows;
#[cfg(test)]
mod testing;
mod trip_customer_repo;
mod trip_repo;

pub use car_repo::SqliteCarRepository;
pub use city_repo::SqliteCityRepository;
pub use customer_repo::SqliteCustomerRepository;
pub use driver_repo::SqliteDriverRepository;
pub use error::StorageError;
pub use pool::{Config, DEFAULT_MAX_CONNECTIONS, Database};
pub use trip_customer_repo::SqliteTripCustomerRepository;
pub use trip_repo::SqliteTripRepository;
