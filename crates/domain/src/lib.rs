//! # city2city-domain
//!
//! Pure domain model for the city2city trip-booking system.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Shared pagination shapes ([`pagination::ListRequest`], [`pagination::Page`])
//! - Define **Cities** and **Customers** (leaf records)
//! - Define **Drivers** (travel between two cities)
//! - Define **Cars** (driven by a driver, carry a current route)
//! - Define **Trips** (a priced journey between two cities with a driver)
//! - Define **Trip customers** (the join between trips and customers)
//! - Input validation for create/update requests
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod pagination;
pub mod time;

pub mod car;
pub mod city;
pub mod customer;
pub mod driver;
pub mod trip;
pub mod trip_customer;
