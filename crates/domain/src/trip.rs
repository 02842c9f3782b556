//! Trip: a priced journey between two cities, driven by one driver.

use serde::{Deserialize, Serialize};

use crate::city::City;
use crate::driver::Driver;
use crate::error::ValidationError;
use crate::id::{CityId, DriverId, TripId};
use crate::time::Timestamp;

/// A trip with every reference resolved.
///
/// Trips are only ever read whole: if either city, the driver, or one of
/// the driver's cities is missing, the trip is not returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trip {
    pub id: TripId,
    /// Sequential number for display, assigned by the store on insert.
    pub trip_number_id: i64,
    pub from_city_id: CityId,
    pub to_city_id: CityId,
    pub driver_id: DriverId,
    pub price: f64,
    pub created_at: Timestamp,
    pub from_city_data: City,
    pub to_city_data: City,
    pub driver_data: Driver,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateTrip {
    pub from_city_id: CityId,
    pub to_city_id: CityId,
    pub driver_id: DriverId,
    pub price: f64,
}

impl CreateTrip {
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidPrice`] for negative or non-finite prices.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_price(self.price)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateTrip {
    pub id: TripId,
    pub from_city_id: CityId,
    pub to_city_id: CityId,
    pub driver_id: DriverId,
    pub price: f64,
}

impl UpdateTrip {
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidPrice`] for negative or non-finite prices.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_price(self.price)
    }
}

fn validate_price(price: f64) -> Result<(), ValidationError> {
    if !price.is_finite() || price < 0.0 {
        return Err(ValidationError::InvalidPrice);
    }
    Ok(())
}
