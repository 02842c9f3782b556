//! City service: use-cases for managing cities.

use city2city_domain::city::{City, CreateCity, UpdateCity};
use city2city_domain::error::City2CityError;
use city2city_domain::id::CityId;
use city2city_domain::pagination::{ListRequest, Page};

use crate::ports::CityRepository;

/// Application service for city CRUD operations.
pub struct CityService<R> {
    repo: R,
}

impl<R: CityRepository> CityService<R> {
    /// Create a new service backed by the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Create a new city after validating its name.
    ///
    /// # Errors
    ///
    /// Returns [`City2CityError::Validation`] if the name is blank, or a
    /// storage error propagated from the repository.
    #[tracing::instrument(skip(self, city), fields(city_name = %city.name))]
    pub async fn create_city(&self, city: CreateCity) -> Result<CityId, City2CityError> {
        city.validate()?;
        self.repo.create(city).await
    }

    /// # Errors
    ///
    /// Returns [`City2CityError::NotFound`] when no city with `id` exists,
    /// or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn get_city(&self, id: CityId) -> Result<City, City2CityError> {
        self.repo.get_by_id(id).await
    }

    /// # Errors
    ///
    /// Returns [`City2CityError::Validation`] for an invalid page request, or a
    /// storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn list_cities(&self, request: ListRequest) -> Result<Page<City>, City2CityError> {
        request.validate()?;
        self.repo.get_list(request).await
    }

    /// # Errors
    ///
    /// Returns [`City2CityError::Validation`] if the name is blank,
    /// [`City2CityError::NotFound`] for an unknown id, or a storage error.
    #[tracing::instrument(skip(self, city), fields(city_id = %city.id))]
    pub async fn update_city(&self, city: UpdateCity) -> Result<CityId, City2CityError> {
        city.validate()?;
        self.repo.update(city).await
    }

    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn delete_city(&self, id: CityId) -> Result<(), City2CityError> {
        self.repo.delete(id).await
    }
}
