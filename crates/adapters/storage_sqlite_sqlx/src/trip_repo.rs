//! `SQLite` implementation of [`TripRepository`].
//!
//! Reads inner-join both cities and the driver: a trip with any dangling
//! reference is invisible to `get_by_id` and `get_list`. The listing count
//! is taken over the bare `trips` table and still includes such rows.
//!
//! `trip_number_id` is assigned inside the insert statement as one more than
//! the current maximum, within the same transaction as the insert.

use std::future::Future;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, SqlitePool};

use city2city_app::ports::TripRepository;
use city2city_domain::error::{City2CityError, NotFoundError};
use city2city_domain::id::TripId;
use city2city_domain::pagination::{ListRequest, Page};
use city2city_domain::time;
use city2city_domain::trip::{CreateTrip, Trip, UpdateTrip};

use crate::error::StorageError;
use crate::rows;

struct Wrapper(Trip);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = rows::get(row, "", "id")?;
        let trip_number_id: i64 = rows::get(row, "", "trip_number_id")?;
        let from_city_id: String = rows::get(row, "", "from_city_id")?;
        let to_city_id: String = rows::get(row, "", "to_city_id")?;
        let driver_id: String = rows::get(row, "", "driver_id")?;
        let price: f64 = rows::get(row, "", "price")?;
        let created_at: String = rows::get(row, "", "created_at")?;

        Ok(Self(Trip {
            id: rows::decode_id(&id)?,
            trip_number_id,
            from_city_id: rows::decode_id(&from_city_id)?,
            to_city_id: rows::decode_id(&to_city_id)?,
            driver_id: rows::decode_id(&driver_id)?,
            price,
            created_at: rows::decode_timestamp(&created_at)?,
            from_city_data: rows::city(row, "from_city__")?,
            to_city_data: rows::city(row, "to_city__")?,
            driver_data: rows::driver(row, "driver__")?,
        }))
    }
}

macro_rules! select_trip {
    () => {
        "SELECT
            t.id AS id, t.trip_number_id AS trip_number_id,
            t.from_city_id AS from_city_id, t.to_city_id AS to_city_id,
            t.driver_id AS driver_id, t.price AS price, t.created_at AS created_at,
            fc.id AS from_city__id, fc.name AS from_city__name, fc.created_at AS from_city__created_at,
            tc.id AS to_city__id, tc.name AS to_city__name, tc.created_at AS to_city__created_at,
            d.id AS driver__id, d.full_name AS driver__full_name, d.phone AS driver__phone,
            d.from_city_id AS driver__from_city_id, d.to_city_id AS driver__to_city_id,
            d.created_at AS driver__created_at,
            dfc.id AS driver__from_city__id, dfc.name AS driver__from_city__name,
            dfc.created_at AS driver__from_city__created_at,
            dtc.id AS driver__to_city__id, dtc.name AS driver__to_city__name,
            dtc.created_at AS driver__to_city__created_at
        FROM trips t
        JOIN cities fc ON fc.id = t.from_city_id
        JOIN cities tc ON tc.id = t.to_city_id
        JOIN drivers d ON d.id = t.driver_id
        JOIN cities dfc ON dfc.id = d.from_city_id
        JOIN cities dtc ON dtc.id = d.to_city_id"
    };
}

const INSERT: &str = "INSERT INTO trips (id, trip_number_id, from_city_id, to_city_id, driver_id, price, created_at)
    SELECT ?, COALESCE(MAX(trip_number_id), 0) + 1, ?, ?, ?, ?, ? FROM trips";
const SELECT_BY_ID: &str = concat!(select_trip!(), " WHERE t.id = ?");
const SELECT_PAGE: &str = concat!(
    select_trip!(),
    " ORDER BY t.created_at DESC, t.trip_number_id DESC LIMIT ? OFFSET ?"
);
const COUNT_ALL: &str = "SELECT COUNT(*) FROM trips";
const UPDATE: &str =
    "UPDATE trips SET from_city_id = ?, to_city_id = ?, driver_id = ?, price = ? WHERE id = ?";
const DELETE_BY_ID: &str = "DELETE FROM trips WHERE id = ?";

/// `SQLite`-backed trip repository.
pub struct SqliteTripRepository {
    pool: SqlitePool,
}

impl SqliteTripRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl TripRepository for SqliteTripRepository {
    fn create(&self, trip: CreateTrip) -> impl Future<Output = Result<TripId, City2CityError>> + Send {
        let pool = self.pool.clone();
        async move {
            let id = TripId::new();
            // Dropping an uncommitted transaction rolls it back.
            let mut tx = pool.begin().await.map_err(StorageError::from)?;

            let inserted = sqlx::query(INSERT)
                .bind(id.to_string())
                .bind(trip.from_city_id.to_string())
                .bind(trip.to_city_id.to_string())
                .bind(trip.driver_id.to_string())
                .bind(trip.price)
                .bind(rows::encode_timestamp(time::now()))
                .execute(&mut *tx)
                .await;

            if let Err(err) = inserted {
                tracing::warn!(trip_id = %id, error = %err, "trip insert failed, rolling back");
                if let Err(rollback) = tx.rollback().await {
                    tracing::error!(trip_id = %id, error = %rollback, "trip rollback failed");
                }
                return Err(StorageError::from(err).into());
            }

            tx.commit().await.map_err(StorageError::from)?;
            tracing::debug!(trip_id = %id, "trip created");

            Ok(id)
        }
    }

    fn get_by_id(&self, id: TripId) -> impl Future<Output = Result<Trip, City2CityError>> + Send {
        let pool = self.pool.clone();
        async move {
            let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
                .bind(id.to_string())
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            row.map(|w| w.0)
                .ok_or_else(|| NotFoundError::new("Trip", id).into())
        }
    }

    fn get_list(
        &self,
        request: ListRequest,
    ) -> impl Future<Output = Result<Page<Trip>, City2CityError>> + Send {
        let pool = self.pool.clone();
        async move {
            request.validate()?;
            let (limit, offset) = rows::window(request);

            let count = rows::count(&pool, COUNT_ALL)
                .await
                .map_err(StorageError::from)?;
            let items: Vec<Wrapper> = sqlx::query_as(SELECT_PAGE)
                .bind(limit)
                .bind(offset)
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(Page::new(items.into_iter().map(|w| w.0).collect(), count))
        }
    }

    fn update(&self, trip: UpdateTrip) -> impl Future<Output = Result<TripId, City2CityError>> + Send {
        let pool = self.pool.clone();
        async move {
            let result = sqlx::query(UPDATE)
                .bind(trip.from_city_id.to_string())
                .bind(trip.to_city_id.to_string())
                .bind(trip.driver_id.to_string())
                .bind(trip.price)
                .bind(trip.id.to_string())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            if result.rows_affected() == 0 {
                return Err(NotFoundError::new("Trip", trip.id).into());
            }
            Ok(trip.id)
        }
    }

    fn delete(&self, id: TripId) -> impl Future<Output = Result<(), City2CityError>> + Send {
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
