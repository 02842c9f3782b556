//! `SQLite` implementation of [`CarRepository`].
//!
//! Reads inner-join the owning driver, so a car whose driver row is missing
//! is neither returned nor counted. The driver's cities are outer-joined the
//! same way [`crate::driver_repo`] does it.

use std::future::Future;
use std::str::FromStr;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, SqlitePool};

use city2city_app::ports::CarRepository;
use city2city_domain::car::{Car, CarStatus, CreateCar, UpdateCar, UpdateCarRoute, UpdateCarStatus};
use city2city_domain::error::{City2CityError, NotFoundError};
use city2city_domain::id::CarId;
use city2city_domain::pagination::{ListRequest, Page};
use city2city_domain::time;

use crate::error::StorageError;
use crate::rows;

struct Wrapper(Car);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = rows::get(row, "", "id")?;
        let model: String = rows::get(row, "", "model")?;
        let brand: String = rows::get(row, "", "brand")?;
        let number: String = rows::get(row, "", "number")?;
        let status: String = rows::get(row, "", "status")?;
        let driver_id: String = rows::get(row, "", "driver_id")?;
        let from_city_id: Option<String> = rows::get(row, "", "from_city_id")?;
        let to_city_id: Option<String> = rows::get(row, "", "to_city_id")?;
        let departure_time: Option<String> = rows::get(row, "", "departure_time")?;
        let created_at: String = rows::get(row, "", "created_at")?;

        let status =
            CarStatus::from_str(&status).map_err(|err| sqlx::Error::Decode(Box::new(err)))?;
        let departure_time = departure_time
            .as_deref()
            .map(rows::decode_timestamp)
            .transpose()?;

        Ok(Self(Car {
            id: rows::decode_id(&id)?,
            model,
            brand,
            number,
            status,
            driver_id: rows::decode_id(&driver_id)?,
            from_city_id: rows::decode_optional_id(from_city_id)?,
            to_city_id: rows::decode_optional_id(to_city_id)?,
            departure_time,
            created_at: rows::decode_timestamp(&created_at)?,
            driver_data: rows::driver(row, "driver__")?,
        }))
    }
}

macro_rules! select_car {
    () => {
        "SELECT
            c.id AS id, c.model AS model, c.brand AS brand, c.number AS number,
            c.status AS status, c.driver_id AS driver_id,
            c.from_city_id AS from_city_id, c.to_city_id AS to_city_id,
            c.departure_time AS departure_time, c.created_at AS created_at,
            d.id AS driver__id, d.full_name AS driver__full_name, d.phone AS driver__phone,
            d.from_city_id AS driver__from_city_id, d.to_city_id AS driver__to_city_id,
            d.created_at AS driver__created_at,
            dfc.id AS driver__from_city__id, dfc.name AS driver__from_city__name,
            dfc.created_at AS driver__from_city__created_at,
            dtc.id AS driver__to_city__id, dtc.name AS driver__to_city__name,
            dtc.created_at AS driver__to_city__created_at
        FROM cars c
        JOIN drivers d ON d.id = c.driver_id
        LEFT JOIN cities dfc ON dfc.id = d.from_city_id
        LEFT JOIN cities dtc ON dtc.id = d.to_city_id"
    };
}

const INSERT: &str = "INSERT INTO cars (id, model, brand, number, status, driver_id, created_at) VALUES (?, ?, ?, ?, ?, ?, ?)";
const SELECT_BY_ID: &str = concat!(select_car!(), " WHERE c.id = ?");
const SELECT_PAGE: &str = concat!(select_car!(), " LIMIT ? OFFSET ?");
const COUNT_ALL: &str = "SELECT COUNT(*) FROM cars c JOIN drivers d ON d.id = c.driver_id";
const UPDATE: &str = "UPDATE cars SET model = ?, brand = ?, number = ?, driver_id = ? WHERE id = ?";
const UPDATE_STATUS: &str = "UPDATE cars SET status = ? WHERE id = ?";
const UPDATE_ROUTE: &str =
    "UPDATE cars SET departure_time = ?, from_city_id = ?, to_city_id = ? WHERE id = ?";
const DELETE_BY_ID: &str = "DELETE FROM cars WHERE id = ?";

/// `SQLite`-backed car repository.
pub struct SqliteCarRepository {
    pool: SqlitePool,
}

impl SqliteCarRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl CarRepository for SqliteCarRepository {
    fn create(&self, car: CreateCar) -> impl Future<Output = Result<CarId, City2CityError>> + Send {
        let pool = self.pool.clone();
        async move {
            let id = CarId::new();
            sqlx::query(INSERT)
                .bind(id.to_string())
                .bind(&car.model)
                .bind(&car.brand)
                .bind(&car.number)
                .bind(CarStatus::default().as_str())
                .bind(car.driver_id.to_string())
                .bind(rows::encode_timestamp(time::now()))
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(id)
        }
    }

    fn get_by_id(&self, id: CarId) -> impl Future<Output = Result<Car, City2CityError>> + Send {
        let pool = self.pool.clone();
        async move {
            let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
                .bind(id.to_string())
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            row.map(|w| w.0)
                .ok_or_else(|| NotFoundError::new("Car", id).into())
        }
    }

    fn get_list(
        &self,
        request: ListRequest,
    ) -> impl Future<Output = Result<Page<Car>, City2CityError>> + Send {
        let pool = self.pool.clone();
        async move {
            request.validate()?;
            let (limit, offset) = rows::window(request);

            let items: Vec<Wrapper> = sqlx::query_as(SELECT_PAGE)
                .bind(limit)
                .bind(offset)
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;
            let count = rows::count(&pool, COUNT_ALL)
                .await
                .map_err(StorageError::from)?;

            Ok(Page::new(items.into_iter().map(|w| w.0).collect(), count))
        }
    }

    fn update(&self, car: UpdateCar) -> impl Future<Output = Result<CarId, City2CityError>> + Send {
        let pool = self.pool.clone();
        async move {
            let result = sqlx::query(UPDATE)
                .bind(&car.model)
                .bind(&car.brand)
                .bind(&car.number)
                .bind(car.driver_id.to_string())
                .bind(car.id.to_string())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            if result.rows_affected() == 0 {
                return Err(NotFoundError::new("Car", car.id).into());
            }
            Ok(car.id)
        }
    }

    fn update_status(
        &self,
        update: UpdateCarStatus,
    ) -> impl Future<Output = Result<(), City2CityError>> + Send {
        let pool = self.pool.clone();
        async move {
            let result = sqlx::query(UPDATE_STATUS)
                .bind(update.status.as_str())
                .bind(update.id.to_string())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            if result.rows_affected() == 0 {
                return Err(NotFoundError::new("Car", update.id).into());
            }
            Ok(())
        }
    }

    fn update_route(
        &self,
        route: UpdateCarRoute,
    ) -> impl Future<Output = Result<(), City2CityError>> + Send {
        let pool = self.pool.clone();
        async move {
            let result = sqlx::query(UPDATE_ROUTE)
                .bind(rows::encode_timestamp(time::now()))
                .bind(route.from_city_id.to_string())
                .bind(route.to_city_id.to_string())
                .bind(route.car_id.to_string())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            if result.rows_affected() == 0 {
                return Err(NotFoundError::new("Car", route.car_id).into());
            }
            tracing::debug!(car_id = %route.car_id, "car route updated");
            Ok(())
        }
    }

    fn delete(&self, id: CarId) -> impl Future<Output = Result<(), City2CityError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(DELETE_BY_ID)
                .bind(id.to_string())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(())
        }
    }
}
