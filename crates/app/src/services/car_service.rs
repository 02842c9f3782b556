//! Car service: use-cases for managing cars, their status and their route.

use city2city_domain::car::{Car, CarStatus, CreateCar, UpdateCar, UpdateCarRoute, UpdateCarStatus};
use city2city_domain::error::City2CityError;
use city2city_domain::id::{CarId, CityId};
use city2city_domain::pagination::{ListRequest, Page};

use crate::ports::CarRepository;

/// Application service for car operations.
pub struct CarService<R> {
    repo: R,
}

impl<R: CarRepository> CarService<R> {
    /// Create a new service backed by the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Register a car for an existing driver.
    ///
    /// # Errors
    ///
    /// Returns [`City2CityError::Validation`] for blank fields,
    /// [`City2CityError::ConstraintViolation`] for an unknown driver, or
    /// another storage error.
    #[tracing::instrument(skip(self, car), fields(car_number = %car.number))]
    pub async fn create_car(&self, car: CreateCar) -> Result<CarId, City2CityError> {
        car.validate()?;
        self.repo.create(car).await
    }

    /// # Errors
    ///
    /// Returns [`City2CityError::NotFound`] when the car or its driver is
    /// missing, or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn get_car(&self, id: CarId) -> Result<Car, City2CityError> {
        self.repo.get_by_id(id).await
    }

    /// # Errors
    ///
    /// Returns [`City2CityError::Validation`] for an invalid page request, or a
    /// storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn list_cars(&self, request: ListRequest) -> Result<Page<Car>, City2CityError> {
        request.validate()?;
        self.repo.get_list(request).await
    }

    /// # Errors
    ///
    /// Returns [`City2CityError::Validation`] for blank fields,
    /// [`City2CityError::NotFound`] for an unknown id, or a storage error.
    #[tracing::instrument(skip(self, car), fields(car_id = %car.id))]
    pub async fn update_car(&self, car: UpdateCar) -> Result<CarId, City2CityError> {
        car.validate()?;
        self.repo.update(car).await
    }

    /// Switch a car between active and inactive.
    ///
    /// # Errors
    ///
    /// Returns [`City2CityError::NotFound`] for an unknown id, or a storage
    /// error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn set_car_status(&self, id: CarId, status: CarStatus) -> Result<(), City2CityError> {
        self.repo.update_status(UpdateCarStatus { id, status }).await
    }

    /// Send a car on a new route. The departure time is set by the store.
    ///
    /// # Errors
    ///
    /// Returns [`City2CityError::NotFound`] for an unknown car,
    /// [`City2CityError::ConstraintViolation`] for unknown cities, or another
    /// storage error.
    #[tracing::instrument(skip(self))]
    pub async fn set_car_route(
        &self,
        car_id: CarId,
        from_city_id: CityId,
        to_city_id: CityId,
    ) -> Result<(), City2CityError> {
        self.repo
            .update_route(UpdateCarRoute {
                car_id,
                from_city_id,
                to_city_id,
            })
            .await
    }

    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn delete_car(&self, id: CarId) -> Result<(), City2CityError> {
        self.repo.delete(id).await
    }
}
