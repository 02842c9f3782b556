//! Storage port: repository traits for persistence.
//!
//! Every repository follows the same contract:
//! - `create` assigns the identifier and `created_at` and returns the id
//! - `get_by_id` returns the denormalized record or
//!   [`City2CityError::NotFound`]
//! - `get_list` returns one [`Page`] together with the total row count
//! - `update` overwrites the mutable fields and returns the id, failing with
//!   [`City2CityError::NotFound`] when no row matched
//! - `delete` is idempotent: removing a missing row succeeds
//!
//! Repositories never call each other; each one issues its own joins.

use std::future::Future;

use city2city_domain::car::{Car, CreateCar, UpdateCar, UpdateCarRoute, UpdateCarStatus};
use city2city_domain::city::{City, CreateCity, UpdateCity};
use city2city_domain::customer::{CreateCustomer, Customer, UpdateCustomer};
use city2city_domain::driver::{CreateDriver, Driver, UpdateDriver};
use city2city_domain::error::City2CityError;
use city2city_domain::id::{CarId, CityId, CustomerId, DriverId, TripCustomerId, TripId};
use city2city_domain::pagination::{ListRequest, Page};
use city2city_domain::trip::{CreateTrip, Trip, UpdateTrip};
use city2city_domain::trip_customer::{CreateTripCustomer, TripCustomer, UpdateTripCustomer};

/// Repository for [`City`] rows.
pub trait CityRepository {
    fn create(
        &self,
        city: CreateCity,
    ) -> impl Future<Output = Result<CityId, City2CityError>> + Send;

    fn get_by_id(&self, id: CityId) -> impl Future<Output = Result<City, City2CityError>> + Send;

    fn get_list(
        &self,
        request: ListRequest,
    ) -> impl Future<Output = Result<Page<City>, City2CityError>> + Send;

    fn update(
        &self,
        city: UpdateCity,
    ) -> impl Future<Output = Result<CityId, City2CityError>> + Send;

    fn delete(&self, id: CityId) -> impl Future<Output = Result<(), City2CityError>> + Send;
}

/// Repository for [`Customer`] rows.
pub trait CustomerRepository {
    fn create(
        &self,
        customer: CreateCustomer,
    ) -> impl Future<Output = Result<CustomerId, City2CityError>> + Send;

    fn get_by_id(
        &self,
        id: CustomerId,
    ) -> impl Future<Output = Result<Customer, City2CityError>> + Send;

    fn get_list(
        &self,
        request: ListRequest,
    ) -> impl Future<Output = Result<Page<Customer>, City2CityError>> + Send;

    fn update(
        &self,
        customer: UpdateCustomer,
    ) -> impl Future<Output = Result<CustomerId, City2CityError>> + Send;

    fn delete(&self, id: CustomerId) -> impl Future<Output = Result<(), City2CityError>> + Send;
}

/// Repository for [`Driver`]s.
///
/// Reads resolve both cities with outer-join semantics: a driver whose city
/// is gone is still returned, with that city's data set to `None`.
pub trait DriverRepository {
    fn create(
        &self,
        driver: CreateDriver,
    ) -> impl Future<Output = Result<DriverId, City2CityError>> + Send;

    fn get_by_id(
        &self,
        id: DriverId,
    ) -> impl Future<Output = Result<Driver, City2CityError>> + Send;

    /// List drivers in store order. `count` covers every driver.
    fn get_list(
        &self,
        request: ListRequest,
    ) -> impl Future<Output = Result<Page<Driver>, City2CityError>> + Send;

    fn update(
        &self,
        driver: UpdateDriver,
    ) -> impl Future<Output = Result<DriverId, City2CityError>> + Send;

    fn delete(&self, id: DriverId) -> impl Future<Output = Result<(), City2CityError>> + Send;
}

/// Repository for [`Car`]s.
///
/// Reads resolve the driver with inner-join semantics: a car whose driver
/// is gone is reported as not found by `get_by_id` and left out of
/// `get_list`, count included.
pub trait CarRepository {
    fn create(&self, car: CreateCar) -> impl Future<Output = Result<CarId, City2CityError>> + Send;

    fn get_by_id(&self, id: CarId) -> impl Future<Output = Result<Car, City2CityError>> + Send;

    fn get_list(
        &self,
        request: ListRequest,
    ) -> impl Future<Output = Result<Page<Car>, City2CityError>> + Send;

    fn update(&self, car: UpdateCar) -> impl Future<Output = Result<CarId, City2CityError>> + Send;

    /// Change only the status of a car.
    fn update_status(
        &self,
        status: UpdateCarStatus,
    ) -> impl Future<Output = Result<(), City2CityError>> + Send;

    /// Set the route of a car and stamp its departure time with "now".
    fn update_route(
        &self,
        route: UpdateCarRoute,
    ) -> impl Future<Output = Result<(), City2CityError>> + Send;

    fn delete(&self, id: CarId) -> impl Future<Output = Result<(), City2CityError>> + Send;
}

/// Repository for [`Trip`]s.
///
/// Reads join the trip with both cities, the driver and the driver's two
/// cities; any missing link hides the trip.
pub trait TripRepository {
    /// Insert a trip atomically: either the row is committed or nothing is.
    fn create(
        &self,
        trip: CreateTrip,
    ) -> impl Future<Output = Result<TripId, City2CityError>> + Send;

    fn get_by_id(&self, id: TripId) -> impl Future<Output = Result<Trip, City2CityError>> + Send;

    /// List trips newest first. `count` covers every trip row, including
    /// trips the join would hide.
    fn get_list(
        &self,
        request: ListRequest,
    ) -> impl Future<Output = Result<Page<Trip>, City2CityError>> + Send;

    fn update(
        &self,
        trip: UpdateTrip,
    ) -> impl Future<Output = Result<TripId, City2CityError>> + Send;

    fn delete(&self, id: TripId) -> impl Future<Output = Result<(), City2CityError>> + Send;
}

/// Repository for [`TripCustomer`] bookings.
///
/// Reads expand the customer with outer-join semantics.
pub trait TripCustomerRepository {
    fn create(
        &self,
        booking: CreateTripCustomer,
    ) -> impl Future<Output = Result<TripCustomerId, City2CityError>> + Send;

    fn get_by_id(
        &self,
        id: TripCustomerId,
    ) -> impl Future<Output = Result<TripCustomer, City2CityError>> + Send;

    fn get_list(
        &self,
        request: ListRequest,
    ) -> impl Future<Output = Result<Page<TripCustomer>, City2CityError>> + Send;

    fn update(
        &self,
        booking: UpdateTripCustomer,
    ) -> impl Future<Output = Result<TripCustomerId, City2CityError>> + Send;

    fn delete(
        &self,
        id: TripCustomerId,
    ) -> impl Future<Output = Result<(), City2CityError>> + Send;
}
