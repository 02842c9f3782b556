//! End-to-end tests for the full city2city stack.
//!
//! Each test wires real services to real repositories over a private
//! in-memory `SQLite` database.

use city2city_adapter_storage_sqlite_sqlx::{
    Config, SqliteCarRepository, SqliteCityRepository, SqliteCustomerRepository,
    SqliteDriverRepository, SqliteTripCustomerRepository, SqliteTripRepository,
};
use city2city_app::services::car_service::CarService;
use city2city_app::services::city_service::CityService;
use city2city_app::services::customer_service::CustomerService;
use city2city_app::services::driver_service::DriverService;
use city2city_app::services::trip_customer_service::TripCustomerService;
use city2city_app::services::trip_service::TripService;
use city2city_domain::car::{CarStatus, CreateCar};
use city2city_domain::city::CreateCity;
use city2city_domain::customer::CreateCustomer;
use city2city_domain::driver::CreateDriver;
use city2city_domain::error::City2CityError;
use city2city_domain::id::{CityId, DriverId};
use city2city_domain::pagination::ListRequest;
use city2city_domain::trip::CreateTrip;
use city2city_domain::trip_customer::CreateTripCustomer;

struct Stack {
    cities: CityService<SqliteCityRepository>,
    customers: CustomerService<SqliteCustomerRepository>,
    drivers: DriverService<SqliteDriverRepository>,
    cars: CarService<SqliteCarRepository>,
    trips: TripService<SqliteTripRepository>,
    bookings: TripCustomerService<SqliteTripCustomerRepository>,
}

/// Build every service over a fresh in-memory database.
async fn stack() -> Stack {
    let db = Config::in_memory()
        .build()
        .await
        .expect("in-memory database should initialise");
    let pool = db.pool().clone();

    Stack {
        cities: CityService::new(SqliteCityRepository::new(pool.clone())),
        customers: CustomerService::new(SqliteCustomerRepository::new(pool.clone())),
        drivers: DriverService::new(SqliteDriverRepository::new(pool.clone())),
        cars: CarService::new(SqliteCarRepository::new(pool.clone())),
        trips: TripService::new(SqliteTripRepository::new(pool.clone())),
        bookings: TripCustomerService::new(SqliteTripCustomerRepository::new(pool)),
    }
}

impl Stack {
    async fn route(&self) -> (CityId, CityId, DriverId) {
        let springfield = self
            .cities
            .create_city(CreateCity::new("Springfield"))
            .await
            .unwrap();
        let shelbyville = self
            .cities
            .create_city(CreateCity::new("Shelbyville"))
            .await
            .unwrap();
        let driver = self
            .drivers
            .create_driver(CreateDriver {
                full_name: "Otto Mann".to_string(),
                phone: "555-0142".to_string(),
                from_city_id: springfield,
                to_city_id: shelbyville,
            })
            .await
            .unwrap();
        (springfield, shelbyville, driver)
    }
}

#[tokio::test]
async fn should_resolve_cities_and_driver_when_trip_is_read_back() {
    let stack = stack().await;
    let (springfield, shelbyville, driver) = stack.route().await;

    let id = stack
        .trips
        .create_trip(CreateTrip {
            from_city_id: springfield,
            to_city_id: shelbyville,
            driver_id: driver,
            price: 18.0,
        })
        .await
        .unwrap();

    let trip = stack.trips.get_trip(id).await.unwrap();
    assert_eq!(trip.from_city_data.name, "Springfield");
    assert_eq!(trip.to_city_data.name, "Shelbyville");
    assert_eq!(trip.driver_data.id, driver);
    assert_eq!(trip.driver_data.full_name, "Otto Mann");
    assert_eq!(
        trip.driver_data.from_city_data.unwrap().name,
        "Springfield"
    );
}

#[tokio::test]
async fn should_return_five_trips_on_second_page_of_fifteen() {
    let stack = stack().await;
    let (springfield, shelbyville, driver) = stack.route().await;
    for _ in 0..15 {
        stack
            .trips
            .create_trip(CreateTrip {
                from_city_id: springfield,
                to_city_id: shelbyville,
                driver_id: driver,
                price: 9.5,
            })
            .await
            .unwrap();
    }

    let page = stack.trips.list_trips(ListRequest::new(2, 10)).await.unwrap();

    assert_eq!(page.items.len(), 5);
    assert_eq!(page.count, 15);
}

#[tokio::test]
async fn should_not_persist_trip_when_driver_does_not_exist() {
    let stack = stack().await;
    let (springfield, shelbyville, _) = stack.route().await;

    let result = stack
        .trips
        .create_trip(CreateTrip {
            from_city_id: springfield,
            to_city_id: shelbyville,
            driver_id: DriverId::new(),
            price: 9.5,
        })
        .await;

    assert!(matches!(
        result,
        Err(City2CityError::ConstraintViolation(_))
    ));
    let page = stack.trips.list_trips(ListRequest::default()).await.unwrap();
    assert_eq!(page.count, 0);
}

#[tokio::test]
async fn should_reject_negative_price_before_reaching_store() {
    let stack = stack().await;
    let (springfield, shelbyville, driver) = stack.route().await;

    let result = stack
        .trips
        .create_trip(CreateTrip {
            from_city_id: springfield,
            to_city_id: shelbyville,
            driver_id: driver,
            price: -1.0,
        })
        .await;

    assert!(matches!(result, Err(City2CityError::Validation(_))));
}

#[tokio::test]
async fn should_activate_and_route_car_for_existing_driver() {
    let stack = stack().await;
    let (springfield, shelbyville, driver) = stack.route().await;

    let car = stack
        .cars
        .create_car(CreateCar {
            model: "Transit".to_string(),
            brand: "Ford".to_string(),
            number: "SPR-001".to_string(),
            driver_id: driver,
        })
        .await
        .unwrap();
    stack
        .cars
        .set_car_status(car, CarStatus::Active)
        .await
        .unwrap();
    stack
        .cars
        .set_car_route(car, shelbyville, springfield)
        .await
        .unwrap();

    let car = stack.cars.get_car(car).await.unwrap();
    assert_eq!(car.status, CarStatus::Active);
    assert_eq!(car.from_city_id, Some(shelbyville));
    assert!(car.departure_time.is_some());
    assert_eq!(car.driver_data.full_name, "Otto Mann");

    let page = stack.cars.list_cars(ListRequest::default()).await.unwrap();
    assert_eq!(page.count, 1);
}

#[tokio::test]
async fn should_book_customer_and_reassign_booking() {
    let stack = stack().await;
    let (springfield, shelbyville, driver) = stack.route().await;
    let trip = stack
        .trips
        .create_trip(CreateTrip {
            from_city_id: springfield,
            to_city_id: shelbyville,
            driver_id: driver,
            price: 12.0,
        })
        .await
        .unwrap();
    let bart = stack
        .customers
        .create_customer(CreateCustomer {
            full_name: "Bart Simpson".to_string(),
            phone: "555-0101".to_string(),
            email: "bart@example.com".to_string(),
        })
        .await
        .unwrap();
    let lisa = stack
        .customers
        .create_customer(CreateCustomer {
            full_name: "Lisa Simpson".to_string(),
            phone: "555-0102".to_string(),
            email: "lisa@example.com".to_string(),
        })
        .await
        .unwrap();

    let booking = stack
        .bookings
        .book(CreateTripCustomer {
            trip_id: trip,
            customer_id: bart,
        })
        .await
        .unwrap();
    stack.bookings.reassign(booking, lisa).await.unwrap();

    let booking = stack.bookings.get_booking(booking).await.unwrap();
    assert_eq!(booking.trip_id, trip);
    assert_eq!(booking.customer_data.unwrap().full_name, "Lisa Simpson");

    stack.bookings.cancel(booking.id).await.unwrap();
    let page = stack
        .bookings
        .list_bookings(ListRequest::default())
        .await
        .unwrap();
    assert!(page.is_empty());
    assert_eq!(page.count, 0);
}

#[tokio::test]
async fn should_report_not_found_for_unknown_city() {
    let stack = stack().await;
    let result = stack.cities.get_city(CityId::new()).await;
    assert!(matches!(result, Err(City2CityError::NotFound(_))));
}
