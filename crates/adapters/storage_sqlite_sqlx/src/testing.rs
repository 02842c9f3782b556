//! Fixtures shared by the repository tests.

use sqlx::SqlitePool;

use city2city_app::ports::{CityRepository, CustomerRepository, DriverRepository, TripRepository};
use city2city_domain::city::CreateCity;
use city2city_domain::customer::CreateCustomer;
use city2city_domain::driver::CreateDriver;
use city2city_domain::id::{CityId, CustomerId, DriverId, TripId};
use city2city_domain::trip::CreateTrip;

use crate::city_repo::SqliteCityRepository;
use crate::customer_repo::SqliteCustomerRepository;
use crate::driver_repo::SqliteDriverRepository;
use crate::pool::Config;
use crate::trip_repo::SqliteTripRepository;

/// A fresh, migrated in-memory database.
pub(crate) async fn pool() -> SqlitePool {
    Config::in_memory().build().await.unwrap().pool().clone()
}

pub(crate) async fn city(pool: &SqlitePool, name: &str) -> CityId {
    SqliteCityRepository::new(pool.clone())
        .create(CreateCity::new(name))
        .await
        .unwrap()
}

pub(crate) async fn customer(pool: &SqlitePool, full_name: &str) -> CustomerId {
    SqliteCustomerRepository::new(pool.clone())
        .create(CreateCustomer {
            full_name: full_name.to_string(),
            phone: "555-0100".to_string(),
            email: "customer@example.com".to_string(),
        })
        .await
        .unwrap()
}

pub(crate) async fn driver(
    pool: &SqlitePool,
    full_name: &str,
    from_city_id: CityId,
    to_city_id: CityId,
) -> DriverId {
    SqliteDriverRepository::new(pool.clone())
        .create(CreateDriver {
            full_name: full_name.to_string(),
            phone: "555-0101".to_string(),
            from_city_id,
            to_city_id,
        })
        .await
        .unwrap()
}

pub(crate) async fn trip(
    pool: &SqlitePool,
    from_city_id: CityId,
    to_city_id: CityId,
    driver_id: DriverId,
    price: f64,
) -> TripId {
    SqliteTripRepository::new(pool.clone())
        .create(CreateTrip {
            from_city_id,
            to_city_id,
            driver_id,
            price,
        })
        .await
        .unwrap()
}

/// Run `sql` with foreign key enforcement switched off, leaving dangling
/// references behind.
pub(crate) async fn without_foreign_keys(pool: &SqlitePool, sql: &str) {
    sqlx::query("PRAGMA foreign_keys = OFF")
        .execute(pool)
        .await
        .unwrap();
    sqlx::query(sql).execute(pool).await.unwrap();
    sqlx::query("PRAGMA foreign_keys = ON")
        .execute(pool)
        .await
        .unwrap();
}
