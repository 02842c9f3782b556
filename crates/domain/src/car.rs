//! Car: a vehicle assigned to a driver, with an optional current route.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::driver::Driver;
use crate::error::{ValidationError, require_non_empty};
use crate::id::{CarId, CityId, DriverId};
use crate::time::Timestamp;

/// Whether a car is currently in service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CarStatus {
    Active,
    #[default]
    Inactive,
}

impl CarStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }
}

impl fmt::Display for CarStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CarStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            other => Err(ValidationError::UnknownCarStatus(other.to_string())),
        }
    }
}

/// A car as read back from storage.
///
/// `driver_data` is always present: a car whose driver cannot be resolved is
/// not returned at all. The route fields stay `None` until the first
/// route update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Car {
    pub id: CarId,
    pub model: String,
    pub brand: String,
    pub number: String,
    pub status: CarStatus,
    pub driver_id: DriverId,
    pub from_city_id: Option<CityId>,
    pub to_city_id: Option<CityId>,
    pub departure_time: Option<Timestamp>,
    pub created_at: Timestamp,
    pub driver_data: Driver,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateCar {
    pub model: String,
    pub brand: String,
    pub number: String,
    pub driver_id: DriverId,
}

impl CreateCar {
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyField`] for the first blank field.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_descriptor(&self.model, &self.brand, &self.number)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateCar {
    pub id: CarId,
    pub model: String,
    pub brand: String,
    pub number: String,
    pub driver_id: DriverId,
}

impl UpdateCar {
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyField`] for the first blank field.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_descriptor(&self.model, &self.brand, &self.number)
    }
}

/// Status-only change, so toggling a car does not need the full record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateCarStatus {
    pub id: CarId,
    pub status: CarStatus,
}

/// New route for a car.
///
/// There is no departure time here: the store stamps it when the route is
/// written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateCarRoute {
    pub car_id: CarId,
    pub from_city_id: CityId,
    pub to_city_id: CityId,
}

fn validate_descriptor(model: &str, brand: &str, number: &str) -> Result<(), ValidationError> {
    require_non_empty("model", model)?;
    require_non_empty("brand", brand)?;
    require_non_empty("number", number)
}
