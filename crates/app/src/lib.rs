//! # city2city-app
//!
//! Application layer: use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that storage adapters must implement:
//!   - `CityRepository`, `CustomerRepository`: plain CRUD
//!   - `DriverRepository`: CRUD with both cities resolved on read
//!   - `CarRepository`: CRUD plus status and route updates, driver resolved on read
//!   - `TripRepository`: transactional create, fully joined reads
//!   - `TripCustomerRepository`: bookings with the customer resolved on read
//! - Define **use-case services** that validate caller input and delegate to
//!   the ports, one service per repository
//!
//! ## Dependency rule
//! Depends on `city2city-domain` only.
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod services;
