//! City: an origin or destination for drivers, cars and trips.

use serde::{Deserialize, Serialize};

use crate::error::{ValidationError, require_non_empty};
use crate::id::CityId;
use crate::time::Timestamp;

/// A city as stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub id: CityId,
    pub name: String,
    pub created_at: Timestamp,
}

/// Input for creating a [`City`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateCity {
    pub name: String,
}

impl CreateCity {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyField`] when `name` is blank.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_non_empty("name", &self.name)
    }
}

/// Input for renaming a [`City`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateCity {
    pub id: CityId,
    pub name: String,
}

impl UpdateCity {
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyField`] when `name` is blank.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_non_empty("name", &self.name)
    }
}
