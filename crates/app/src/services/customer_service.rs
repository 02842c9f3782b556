//! Customer service: use-cases for managing customers.

use city2city_domain::customer::{CreateCustomer, Customer, UpdateCustomer};
use city2city_domain::error::City2CityError;
use city2city_domain::id::CustomerId;
use city2city_domain::pagination::{ListRequest, Page};

use crate::ports::CustomerRepository;

/// Application service for customer CRUD operations.
pub struct CustomerService<R> {
    repo: R,
}

impl<R: CustomerRepository> CustomerService<R> {
    /// Create a new service backed by the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// # Errors
    ///
    /// Returns [`City2CityError::Validation`] if a field is blank, or a
    /// storage error propagated from the repository.
    #[tracing::instrument(skip(self, customer))]
    pub async fn create_customer(
        &self,
        customer: CreateCustomer,
    ) -> Result<CustomerId, City2CityError> {
        customer.validate()?;
        self.repo.create(customer).await
    }

    /// # Errors
    ///
    /// Returns [`City2CityError::NotFound`] when no customer with `id` exists.
    #[tracing::instrument(skip(self))]
    pub async fn get_customer(&self, id: CustomerId) -> Result<Customer, City2CityError> {
        self.repo.get_by_id(id).await
    }

    /// # Errors
    ///
    /// Returns [`City2CityError::Validation`] for an invalid page request.
    #[tracing::instrument(skip(self))]
    pub async fn list_customers(
        &self,
        request: ListRequest,
    ) -> Result<Page<Customer>, City2CityError> {
        request.validate()?;
        self.repo.get_list(request).await
    }

    /// # Errors
    ///
    /// Returns [`City2CityError::Validation`] if a field is blank, or
    /// [`City2CityError::NotFound`] for an unknown id.
    #[tracing::instrument(skip(self, customer), fields(customer_id = %customer.id))]
    pub async fn update_customer(
        &self,
        customer: UpdateCustomer,
    ) -> Result<CustomerId, City2CityError> {
        customer.validate()?;
        self.repo.update(customer).await
    }

    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn delete_customer(&self, id: CustomerId) -> Result<(), City2CityError> {
        self.repo.delete(id).await
    }
}
