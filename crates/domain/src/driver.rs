//! Driver: a person who drives between an origin and a destination city.

use serde::{Deserialize, Serialize};

use crate::city::City;
use crate::error::{ValidationError, require_non_empty};
use crate::id::{CityId, DriverId};
use crate::time::Timestamp;

/// A driver together with the cities it references.
///
/// `from_city_data` and `to_city_data` are filled on read. They are `None`
/// when the referenced city row no longer exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Driver {
    pub id: DriverId,
    pub full_name: String,
    pub phone: String,
    pub from_city_id: CityId,
    pub to_city_id: CityId,
    pub created_at: Timestamp,
    pub from_city_data: Option<City>,
    pub to_city_data: Option<City>,
}

/// Input for creating a [`Driver`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateDriver {
    pub full_name: String,
    pub phone: String,
    pub from_city_id: CityId,
    pub to_city_id: CityId,
}

impl CreateDriver {
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyField`] when `full_name` or `phone` is blank.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_non_empty("full_name", &self.full_name)?;
        require_non_empty("phone", &self.phone)
    }
}

/// Input for overwriting the mutable fields of a [`Driver`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateDriver {
    pub id: DriverId,
    pub full_name: String,
    pub phone: String,
    pub from_city_id: CityId,
    pub to_city_id: CityId,
}

impl UpdateDriver {
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyField`] when `full_name` or `phone` is blank.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_non_empty("full_name", &self.full_name)?;
        require_non_empty("phone", &self.phone)
    }
}

impl From<&Driver> for UpdateDriver {
    fn from(driver: &Driver) -> Self {
        Self {
            id: driver.id,
            full_name: driver.full_name.clone(),
            phone: driver.phone.clone(),
            from_city_id: driver.from_city_id,
            to_city_id: driver.to_city_id,
        }
    }
}
