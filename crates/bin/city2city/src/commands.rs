//! Command dispatch: turns parsed CLI commands into service calls.
//!
//! Every command yields a JSON value: created and updated records report
//! their id, reads return the full record or page, deletes report the id
//! that was removed.

use anyhow::Context;
use serde::Serialize;
use serde_json::{Value, json};

use city2city_adapter_storage_sqlite_sqlx::{
    Database, SqliteCarRepository, SqliteCityRepository, SqliteCustomerRepository,
    SqliteDriverRepository, SqliteTripCustomerRepository, SqliteTripRepository,
};
use city2city_app::services::car_service::CarService;
use city2city_app::services::city_service::CityService;
use city2city_app::services::customer_service::CustomerService;
use city2city_app::services::driver_service::DriverService;
use city2city_app::services::trip_customer_service::TripCustomerService;
use city2city_app::services::trip_service::TripService;
use city2city_domain::car::{CreateCar, UpdateCar};
use city2city_domain::city::{CreateCity, UpdateCity};
use city2city_domain::customer::{CreateCustomer, UpdateCustomer};
use city2city_domain::driver::{CreateDriver, UpdateDriver};
use city2city_domain::trip::{CreateTrip, UpdateTrip};
use city2city_domain::trip_customer::CreateTripCustomer;

use crate::cli::{
    BookingCommand, CarCommand, CityCommand, Command, CustomerCommand, DriverCommand, TripCommand,
};

/// Every application service, wired to the `SQLite` repositories.
pub struct App {
    cities: CityService<SqliteCityRepository>,
    customers: CustomerService<SqliteCustomerRepository>,
    drivers: DriverService<SqliteDriverRepository>,
    cars: CarService<SqliteCarRepository>,
    trips: TripService<SqliteTripRepository>,
    bookings: TripCustomerService<SqliteTripCustomerRepository>,
}

impl App {
    #[must_use]
    pub fn new(db: &Database) -> Self {
        let pool = db.pool();
        Self {
            cities: CityService::new(SqliteCityRepository::new(pool.clone())),
            customers: CustomerService::new(SqliteCustomerRepository::new(pool.clone())),
            drivers: DriverService::new(SqliteDriverRepository::new(pool.clone())),
            cars: CarService::new(SqliteCarRepository::new(pool.clone())),
            trips: TripService::new(SqliteTripRepository::new(pool.clone())),
            bookings: TripCustomerService::new(SqliteTripCustomerRepository::new(pool.clone())),
        }
    }

    /// Execute one command.
    ///
    /// # Errors
    ///
    /// Returns the service error, with the command name as context.
    pub async fn run(&self, command: Command) -> anyhow::Result<Value> {
        match command {
            Command::City(cmd) => self.city(cmd).await.context("city command failed"),
            Command::Customer(cmd) => self.customer(cmd).await.context("customer command failed"),
            Command::Driver(cmd) => self.driver(cmd).await.context("driver command failed"),
            Command::Car(cmd) => self.car(cmd).await.context("car command failed"),
            Command::Trip(cmd) => self.trip(cmd).await.context("trip command failed"),
            Command::Booking(cmd) => self.booking(cmd).await.context("booking command failed"),
        }
    }

    async fn city(&self, cmd: CityCommand) -> anyhow::Result<Value> {
        match cmd {
            CityCommand::Create { name } => {
                id_json(self.cities.create_city(CreateCity::new(name)).await?)
            }
            CityCommand::Get { id } => to_json(self.cities.get_city(id).await?),
            CityCommand::List(page) => to_json(self.cities.list_cities(page.into()).await?),
            CityCommand::Rename { id, name } => {
                id_json(self.cities.update_city(UpdateCity { id, name }).await?)
            }
            CityCommand::Delete { id } => {
                self.cities.delete_city(id).await?;
                id_json(id)
            }
        }
    }

    async fn customer(&self, cmd: CustomerCommand) -> anyhow::Result<Value> {
        match cmd {
            CustomerCommand::Create(args) => id_json(self
                .customers
                .create_customer(CreateCustomer {
                    full_name: args.full_name,
                    phone: args.phone,
                    email: args.email,
                })
                .await?),
            CustomerCommand::Get { id } => to_json(self.customers.get_customer(id).await?),
            CustomerCommand::List(page) => {
                to_json(self.customers.list_customers(page.into()).await?)
            }
            CustomerCommand::Update { id, details } => id_json(
                self.customers
                    .update_customer(UpdateCustomer {
                        id,
                        full_name: details.full_name,
                        phone: details.phone,
                        email: details.email,
                    })
                    .await?,
            ),
            CustomerCommand::Delete { id } => {
                self.customers.delete_customer(id).await?;
                id_json(id)
            }
        }
    }

    async fn driver(&self, cmd: DriverCommand) -> anyhow::Result<Value> {
        match cmd {
            DriverCommand::Create(args) => id_json(self
                .drivers
                .create_driver(CreateDriver {
                    full_name: args.full_name,
                    phone: args.phone,
                    from_city_id: args.from_city_id,
                    to_city_id: args.to_city_id,
                })
                .await?),
            DriverCommand::Get { id } => to_json(self.drivers.get_driver(id).await?),
            DriverCommand::List(page) => to_json(self.drivers.list_drivers(page.into()).await?),
            DriverCommand::Update { id, details } => id_json(
                self.drivers
                    .update_driver(UpdateDriver {
                        id,
                        full_name: details.full_name,
                        phone: details.phone,
                        from_city_id: details.from_city_id,
                        to_city_id: details.to_city_id,
                    })
                    .await?,
            ),
            DriverCommand::Delete { id } => {
                self.drivers.delete_driver(id).await?;
                id_json(id)
            }
        }
    }

    async fn car(&self, cmd: CarCommand) -> anyhow::Result<Value> {
        match cmd {
            CarCommand::Create(args) => id_json(self
                .cars
                .create_car(CreateCar {
                    model: args.model,
                    brand: args.brand,
                    number: args.number,
                    driver_id: args.driver_id,
                })
                .await?),
            CarCommand::Get { id } => to_json(self.cars.get_car(id).await?),
            CarCommand::List(page) => to_json(self.cars.list_cars(page.into()).await?),
            CarCommand::Update { id, details } => id_json(
                self.cars
                    .update_car(UpdateCar {
                        id,
                        model: details.model,
                        brand: details.brand,
                        number: details.number,
                        driver_id: details.driver_id,
                    })
                    .await?,
            ),
            CarCommand::Status { id, status } => {
                self.cars.set_car_status(id, status).await?;
                id_json(id)
            }
            CarCommand::Route {
                id,
                from_city_id,
                to_city_id,
            } => {
                self.cars
                    .set_car_route(id, from_city_id, to_city_id)
                    .await?;
                id_json(id)
            }
            CarCommand::Delete { id } => {
                self.cars.delete_car(id).await?;
                id_json(id)
            }
        }
    }

    async fn trip(&self, cmd: TripCommand) -> anyhow::Result<Value> {
        match cmd {
            TripCommand::Create(args) => id_json(self
                .trips
                .create_trip(CreateTrip {
                    from_city_id: args.from_city_id,
                    to_city_id: args.to_city_id,
                    driver_id: args.driver_id,
                    price: args.price,
                })
                .await?),
            TripCommand::Get { id } => to_json(self.trips.get_trip(id).await?),
            TripCommand::List(page) => to_json(self.trips.list_trips(page.into()).await?),
            TripCommand::Update { id, details } => id_json(
                self.trips
                    .update_trip(UpdateTrip {
                        id,
                        from_city_id: details.from_city_id,
                        to_city_id: details.to_city_id,
                        driver_id: details.driver_id,
                        price: details.price,
                    })
                    .await?,
            ),
            TripCommand::Delete { id } => {
                self.trips.delete_trip(id).await?;
                id_json(id)
            }
        }
    }

    async fn booking(&self, cmd: BookingCommand) -> anyhow::Result<Value> {
        match cmd {
            BookingCommand::Create {
                trip_id,
                customer_id,
            } => id_json(self
                .bookings
                .book(CreateTripCustomer {
                    trip_id,
                    customer_id,
                })
                .await?),
            BookingCommand::Get { id } => to_json(self.bookings.get_booking(id).await?),
            BookingCommand::List(page) => to_json(self.bookings.list_bookings(page.into()).await?),
            BookingCommand::Reassign { id, customer_id } => {
                id_json(self.bookings.reassign(id, customer_id).await?)
            }
            BookingCommand::Delete { id } => {
                self.bookings.cancel(id).await?;
                id_json(id)
            }
        }
    }
}

fn id_json(id: impl std::fmt::Display) -> anyhow::Result<Value> {
    Ok(json!({ "id": id.to_string() }))
}

fn to_json(value: impl Serialize) -> anyhow::Result<Value> {
    serde_json::to_value(value).context("failed to serialize result")
}
