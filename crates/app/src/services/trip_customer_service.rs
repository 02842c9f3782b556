//! Trip customer service: use-cases for booking customers onto trips.

use city2city_domain::error::City2CityError;
use city2city_domain::id::{CustomerId, TripCustomerId};
use city2city_domain::pagination::{ListRequest, Page};
use city2city_domain::trip_customer::{CreateTripCustomer, TripCustomer, UpdateTripCustomer};

use crate::ports::TripCustomerRepository;

/// Application service for trip bookings.
pub struct TripCustomerService<R> {
    repo: R,
}

impl<R: TripCustomerRepository> TripCustomerService<R> {
    /// Create a new service backed by the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// # Errors
    ///
    /// Returns [`City2CityError::ConstraintViolation`] for an unknown trip or
    /// customer, or another storage error.
    #[tracing::instrument(skip(self))]
    pub async fn book(
        &self,
        booking: CreateTripCustomer,
    ) -> Result<TripCustomerId, City2CityError> {
        self.repo.create(booking).await
    }

    /// # Errors
    ///
    /// Returns [`City2CityError::NotFound`] when no booking with `id` exists.
    #[tracing::instrument(skip(self))]
    pub async fn get_booking(&self, id: TripCustomerId) -> Result<TripCustomer, City2CityError> {
        self.repo.get_by_id(id).await
    }

    /// # Errors
    ///
    /// Returns [`City2CityError::Validation`] for an invalid page request, or a
    /// storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn list_bookings(
        &self,
        request: ListRequest,
    ) -> Result<Page<TripCustomer>, City2CityError> {
        request.validate()?;
        self.repo.get_list(request).await
    }

    /// Move a booking to another customer.
    ///
    /// # Errors
    ///
    /// Returns [`City2CityError::NotFound`] for an unknown booking, or a
    /// storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn reassign(
        &self,
        id: TripCustomerId,
        customer_id: CustomerId,
    ) -> Result<TripCustomerId, City2CityError> {
        self.repo
            .update(UpdateTripCustomer { id, customer_id })
            .await
    }

    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn cancel(&self, id: TripCustomerId) -> Result<(), City2CityError> {
        self.repo.delete(id).await
    }
}
