//! Trip customer: books a customer onto a trip.

use serde::{Deserialize, Serialize};

use crate::customer::Customer;
use crate::id::{CustomerId, TripCustomerId, TripId};
use crate::time::Timestamp;

/// A booking row. The trip is referenced by id only; the customer is
/// expanded into `customer_data`, which is `None` when the customer row is
/// gone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripCustomer {
    pub id: TripCustomerId,
    pub trip_id: TripId,
    pub customer_id: CustomerId,
    pub created_at: Timestamp,
    pub customer_data: Option<Customer>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTripCustomer {
    pub trip_id: TripId,
    pub customer_id: CustomerId,
}

/// Re-points a booking to another customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateTripCustomer {
    pub id: TripCustomerId,
    pub customer_id: CustomerId,
}
