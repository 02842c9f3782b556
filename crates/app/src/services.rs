//! Application services: use-case implementations.
//!
//! Each service struct accepts port trait implementations via generic parameters
//! (constructor injection), keeping this layer decoupled from concrete adapters.

pub mod car_service;
pub mod city_service;
pub mod customer_service;
pub mod driver_service;
pub mod trip_customer_service;
pub mod trip_service;
