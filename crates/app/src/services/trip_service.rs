//! Trip service: use-cases for booking and managing trips.

use city2city_domain::error::City2CityError;
use city2city_domain::id::TripId;
use city2city_domain::pagination::{ListRequest, Page};
use city2city_domain::trip::{CreateTrip, Trip, UpdateTrip};

use crate::ports::TripRepository;

/// Application service for trip operations.
pub struct TripService<R> {
    repo: R,
}

impl<R: TripRepository> TripService<R> {
    /// Create a new service backed by the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Create a trip. The repository commits the row atomically or not at all.
    ///
    /// # Errors
    ///
    /// Returns [`City2CityError::Validation`] for an invalid price,
    /// [`City2CityError::ConstraintViolation`] for unknown cities or driver,
    /// or another storage error.
    #[tracing::instrument(skip(self, trip), fields(driver_id = %trip.driver_id, price = trip.price))]
    pub async fn create_trip(&self, trip: CreateTrip) -> Result<TripId, City2CityError> {
        trip.validate()?;
        self.repo.create(trip).await
    }

    /// # Errors
    ///
    /// Returns [`City2CityError::NotFound`] when the trip or any record it
    /// references is missing.
    #[tracing::instrument(skip(self))]
    pub async fn get_trip(&self, id: TripId) -> Result<Trip, City2CityError> {
        self.repo.get_by_id(id).await
    }

    /// List trips, most recent first.
    ///
    /// # Errors
    ///
    /// Returns [`City2CityError::Validation`] for an invalid page request, or a
    /// storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn list_trips(&self, request: ListRequest) -> Result<Page<Trip>, City2CityError> {
        request.validate()?;
        self.repo.get_list(request).await
    }

    /// # Errors
    ///
    /// Returns [`City2CityError::Validation`] for an invalid price,
    /// [`City2CityError::NotFound`] for an unknown id, or a storage error.
    #[tracing::instrument(skip(self, trip), fields(trip_id = %trip.id))]
    pub async fn update_trip(&self, trip: UpdateTrip) -> Result<TripId, City2CityError> {
        trip.validate()?;
        self.repo.update(trip).await
    }

    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn delete_trip(&self, id: TripId) -> Result<(), City2CityError> {
        self.repo.delete(id).await
    }
}
