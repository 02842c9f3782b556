//! Customer: a passenger who can be booked onto trips.

use serde::{Deserialize, Serialize};

use crate::error::{ValidationError, require_non_empty};
use crate::id::CustomerId;
use crate::time::Timestamp;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub full_name: String,
    pub phone: String,
    pub email: String,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateCustomer {
    pub full_name: String,
    pub phone: String,
    pub email: String,
}

impl CreateCustomer {
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyField`] for the first blank field.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_non_empty("full_name", &self.full_name)?;
        require_non_empty("phone", &self.phone)?;
        require_non_empty("email", &self.email)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateCustomer {
    pub id: CustomerId,
    pub full_name: String,
    pub phone: String,
    pub email: String,
}

impl UpdateCustomer {
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyField`] for the first blank field.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_non_empty("full_name", &self.full_name)?;
        require_non_empty("phone", &self.phone)?;
        require_non_empty("email", &self.email)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_report_first_blank_field() {
        let input = CreateCustomer {
            full_name: "Homer".to_string(),
            phone: String::new(),
            email: String::new(),
        };
        assert_eq!(
            input.validate(),
            Err(ValidationError::EmptyField { field: "phone" })
        );
    }
}
