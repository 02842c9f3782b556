//! Driver service: use-cases for managing drivers.

use city2city_domain::driver::{CreateDriver, Driver, UpdateDriver};
use city2city_domain::error::City2CityError;
use city2city_domain::id::DriverId;
use city2city_domain::pagination::{ListRequest, Page};

use crate::ports::DriverRepository;

/// Application service for driver CRUD operations.
pub struct DriverService<R> {
    repo: R,
}

impl<R: DriverRepository> DriverService<R> {
    /// Create a new service backed by the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Register a new driver.
    ///
    /// Both city ids must exist; the store rejects unknown cities.
    ///
    /// # Errors
    ///
    /// Returns [`City2CityError::Validation`] for blank fields,
    /// [`City2CityError::ConstraintViolation`] for unknown cities, or another
    /// storage error.
    #[tracing::instrument(skip(self, driver), fields(driver_name = %driver.full_name))]
    pub async fn create_driver(&self, driver: CreateDriver) -> Result<DriverId, City2CityError> {
        driver.validate()?;
        self.repo.create(driver).await
    }

    /// Look up a driver with both cities resolved.
    ///
    /// # Errors
    ///
    /// Returns [`City2CityError::NotFound`] when no driver with `id` exists,
    /// or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn get_driver(&self, id: DriverId) -> Result<Driver, City2CityError> {
        self.repo.get_by_id(id).await
    }

    /// # Errors
    ///
    /// Returns [`City2CityError::Validation`] for an invalid page request, or a
    /// storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn list_drivers(
        &self,
        request: ListRequest,
    ) -> Result<Page<Driver>, City2CityError> {
        request.validate()?;
        self.repo.get_list(request).await
    }

    /// # Errors
    ///
    /// Returns [`City2CityError::Validation`] for blank fields,
    /// [`City2CityError::NotFound`] for an unknown id, or a storage error.
    #[tracing::instrument(skip(self, driver), fields(driver_id = %driver.id))]
    pub async fn update_driver(&self, driver: UpdateDriver) -> Result<DriverId, City2CityError> {
        driver.validate()?;
        self.repo.update(driver).await
    }

    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn delete_driver(&self, id: DriverId) -> Result<(), City2CityError> {
        self.repo.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use city2city_domain::error::{NotFoundError, ValidationError};
    use city2city_domain::id::CityId;
    use std::collections::HashMap;
    use std::future::Future;
    use std::sync::Mutex;

    /// Keeps drivers in a map; cities are never resolved.
    #[derive(Default)]
    struct InMemoryDriverRepo {
        store: Mutex<HashMap<DriverId, Driver>>,
    }

    impl DriverRepository for InMemoryDriverRepo {
        fn create(
            &self,
            driver: CreateDriver,
        ) -> impl Future<Output = Result<DriverId, City2CityError>> + Send {
            let id = DriverId::new();
            self.store.lock().unwrap().insert(
                id,
                Driver {
                    id,
                    full_name: driver.full_name,
                    phone: driver.phone,
                    from_city_id: driver.from_city_id,
                    to_city_id: driver.to_city_id,
                    created_at: city2city_domain::time::now(),
                    from_city_data: None,
                    to_city_data: None,
                },
            );
            async move { Ok(id) }
        }

        fn get_by_id(
            &self,
            id: DriverId,
        ) -> impl Future<Output = Result<Driver, City2CityError>> + Send {
            let result: Result<Driver, City2CityError> = self
                .store
                .lock()
                .unwrap()
                .get(&id)
                .cloned()
                .ok_or_else(|| NotFoundError::new("Driver", id).into());
            async { result }
        }

        fn get_list(
            &self,
            _request: ListRequest,
        ) -> impl Future<Output = Result<Page<Driver>, City2CityError>> + Send {
            let store = self.store.lock().unwrap();
            let items: Vec<Driver> = store.values().cloned().collect();
            let count = items.len() as u64;
            async move { Ok(Page::new(items, count)) }
        }

        fn update(
            &self,
            driver: UpdateDriver,
        ) -> impl Future<Output = Result<DriverId, City2CityError>> + Send {
            let mut store = self.store.lock().unwrap();
            let result: Result<DriverId, City2CityError> = match store.get_mut(&driver.id) {
                Some(existing) => {
                    existing.full_name = driver.full_name;
                    existing.phone = driver.phone;
                    existing.from_city_id = driver.from_city_id;
                    existing.to_city_id = driver.to_city_id;
                    Ok(driver.id)
                }
                None => Err(NotFoundError::new("Driver", driver.id).into()),
            };
            async { result }
        }

        fn delete(&self, id: DriverId) -> impl Future<Output = Result<(), City2CityError>> + Send {
            self.store.lock().unwrap().remove(&id);
            async { Ok(()) }
        }
    }

    fn make_service() -> DriverService<InMemoryDriverRepo> {
        DriverService::new(InMemoryDriverRepo::default())
    }

    fn valid_driver() -> CreateDriver {
        CreateDriver {
            full_name: "Alice".to_string(),
            phone: "555".to_string(),
            from_city_id: CityId::new(),
            to_city_id: CityId::new(),
        }
    }

    #[tokio::test]
    async fn should_create_driver_when_valid() {
        let svc = make_service();
        let input = valid_driver();
        let id = svc.create_driver(input.clone()).await.unwrap();

        let fetched = svc.get_driver(id).await.unwrap();
        assert_eq!(fetched.full_name, "Alice");
        assert_eq!(fetched.from_city_id, input.from_city_id);
        assert_eq!(fetched.to_city_id, input.to_city_id);
    }

    #[tokio::test]
    async fn should_return_validation_error_when_phone_is_blank() {
        let svc = make_service();
        let result = svc
            .create_driver(CreateDriver {
                phone: String::new(),
                ..valid_driver()
            })
            .await;
        assert!(matches!(
            result,
            Err(City2CityError::Validation(ValidationError::EmptyField { field: "phone" }))
        ));
    }

    #[tokio::test]
    async fn should_return_not_found_when_driver_missing() {
        let svc = make_service();
        let result = svc.get_driver(DriverId::new()).await;
        assert!(matches!(result, Err(City2CityError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_update_driver_when_exists() {
        let svc = make_service();
        let id = svc.create_driver(valid_driver()).await.unwrap();
        let mut update = UpdateDriver::from(&svc.get_driver(id).await.unwrap());
        update.full_name = "Alicia".to_string();

        svc.update_driver(update).await.unwrap();

        assert_eq!(svc.get_driver(id).await.unwrap().full_name, "Alicia");
    }

    #[tokio::test]
    async fn should_reject_page_zero_without_touching_repository() {
        let svc = make_service();
        let result = svc.list_drivers(ListRequest::new(0, 10)).await;
        assert!(matches!(
            result,
            Err(City2CityError::Validation(ValidationError::InvalidPage))
        ));
    }

    #[tokio::test]
    async fn should_succeed_when_deleting_missing_driver() {
        let svc = make_service();
        svc.delete_driver(DriverId::new()).await.unwrap();
    }
}
