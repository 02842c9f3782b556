//! `SQLite` implementation of [`TripCustomerRepository`].

use std::future::Future;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, SqlitePool};

use city2city_app::ports::TripCustomerRepository;
use city2city_domain::error::{City2CityError, NotFoundError};
use city2city_domain::id::TripCustomerId;
use city2city_domain::pagination::{ListRequest, Page};
use city2city_domain::time;
use city2city_domain::trip_customer::{CreateTripCustomer, TripCustomer, UpdateTripCustomer};

use crate::error::StorageError;
use crate::rows;

struct Wrapper(TripCustomer);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = rows::get(row, "", "id")?;
        let trip_id: String = rows::get(row, "", "trip_id")?;
        let customer_id: String = rows::get(row, "", "customer_id")?;
        let created_at: String = rows::get(row, "", "created_at")?;

        Ok(Self(TripCustomer {
            id: rows::decode_id(&id)?,
            trip_id: rows::decode_id(&trip_id)?,
            customer_id: rows::decode_id(&customer_id)?,
            created_at: rows::decode_timestamp(&created_at)?,
            customer_data: rows::optional_customer(row, "customer__")?,
        }))
    }
}

macro_rules! select_booking {
    () => {
        "SELECT
            tc.id AS id, tc.trip_id AS trip_id, tc.customer_id AS customer_id,
            tc.created_at AS created_at,
            c.id AS customer__id, c.full_name AS customer__full_name,
            c.phone AS customer__phone, c.email AS customer__email,
            c.created_at AS customer__created_at
        FROM trip_customers tc
        LEFT JOIN customers c ON c.id = tc.customer_id"
    };
}

const INSERT: &str =
    "INSERT INTO trip_customers (id, trip_id, customer_id, created_at) VALUES (?, ?, ?, ?)";
const SELECT_BY_ID: &str = concat!(select_booking!(), " WHERE tc.id = ?");
const SELECT_PAGE: &str = concat!(select_booking!(), " LIMIT ? OFFSET ?");
const COUNT_ALL: &str = "SELECT COUNT(*) FROM trip_customers";
const UPDATE: &str = "UPDATE trip_customers SET customer_id = ? WHERE id = ?";
const DELETE_BY_ID: &str = "DELETE FROM trip_customers WHERE id = ?";

/// `SQLite`-backed repository for customers booked onto trips.
pub struct SqliteTripCustomerRepository {
    pool: SqlitePool,
}

impl SqliteTripCustomerRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl TripCustomerRepository for SqliteTripCustomerRepository {
    fn create(
        &self,
        booking: CreateTripCustomer,
    ) -> impl Future<Output = Result<TripCustomerId, City2CityError>> + Send {
        let pool = self.pool.clone();
        async move {
            let id = TripCustomerId::new();
            sqlx::query(INSERT)
                .bind(id.to_string())
                .bind(booking.trip_id.to_string())
                .bind(booking.customer_id.to_string())
                .bind(rows::encode_timestamp(time::now()))
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(id)
        }
    }

    fn get_by_id(
        &self,
        id: TripCustomerId,
    ) -> impl Future<Output = Result<TripCustomer, City2CityError>> + Send {
        let pool = self.pool.clone();
        async move {
            let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
                .bind(id.to_string())
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            row.map(|w| w.0)
                .ok_or_else(|| NotFoundError::new("TripCustomer", id).into())
        }
    }

    fn get_list(
        &self,
        request: ListRequest,
    ) -> impl Future<Output = Result<Page<TripCustomer>, City2CityError>> + Send {
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

    fn update(
        &self,
        booking: UpdateTripCustomer,
    ) -> impl Future<Output = Result<TripCustomerId, City2CityError>> + Send {
        let pool = self.pool.clone();
        async move {
            let result = sqlx::query(UPDATE)
                .bind(booking.customer_id.to_string())
                .bind(booking.id.to_string())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            if result.rows_affected() == 0 {
                return Err(NotFoundError::new("TripCustomer", booking.id).into());
            }
            Ok(booking.id)
        }
    }

    fn delete(
        &self,
        id: TripCustomerId,
    ) -> impl Future<Output = Result<(), City2CityError>> + Send {
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
