//! `SQLite` implementation of [`CustomerRepository`].

use std::future::Future;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, SqlitePool};

use city2city_app::ports::CustomerRepository;
use city2city_domain::customer::{CreateCustomer, Customer, UpdateCustomer};
use city2city_domain::error::{City2CityError, NotFoundError};
use city2city_domain::id::CustomerId;
use city2city_domain::pagination::{ListRequest, Page};
use city2city_domain::time;

use crate::error::StorageError;
use crate::rows;

struct Wrapper(Customer);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        rows::customer(row, "").map(Self)
    }
}

const INSERT: &str =
    "INSERT INTO customers (id, full_name, phone, email, created_at) VALUES (?, ?, ?, ?, ?)";
const SELECT_BY_ID: &str =
    "SELECT id, full_name, phone, email, created_at FROM customers WHERE id = ?";
const SELECT_PAGE: &str =
    "SELECT id, full_name, phone, email, created_at FROM customers LIMIT ? OFFSET ?";
const COUNT_ALL: &str = "SELECT COUNT(*) FROM customers";
const UPDATE: &str = "UPDATE customers SET full_name = ?, phone = ?, email = ? WHERE id = ?";
const DELETE_BY_ID: &str = "DELETE FROM customers WHERE id = ?";

/// `SQLite`-backed customer repository.
pub struct SqliteCustomerRepository {
    pool: SqlitePool,
}

impl SqliteCustomerRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl CustomerRepository for SqliteCustomerRepository {
    fn create(
        &self,
        customer: CreateCustomer,
    ) -> impl Future<Output = Result<CustomerId, City2CityError>> + Send {
        let pool = self.pool.clone();
        async move {
            let id = CustomerId::new();
            sqlx::query(INSERT)
                .bind(id.to_string())
                .bind(&customer.full_name)
                .bind(&customer.phone)
                .bind(&customer.email)
                .bind(rows::encode_timestamp(time::now()))
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(id)
        }
    }

    fn get_by_id(
        &self,
        id: CustomerId,
    ) -> impl Future<Output = Result<Customer, City2CityError>> + Send {
        let pool = self.pool.clone();
        async move {
            let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
                .bind(id.to_string())
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            row.map(|w| w.0)
                .ok_or_else(|| NotFoundError::new("Customer", id).into())
        }
    }

    fn get_list(
        &self,
        request: ListRequest,
    ) -> impl Future<Output = Result<Page<Customer>, City2CityError>> + Send {
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

    fn update(
        &self,
        customer: UpdateCustomer,
    ) -> impl Future<Output = Result<CustomerId, City2CityError>> + Send {
        let pool = self.pool.clone();
        async move {
            let result = sqlx::query(UPDATE)
                .bind(&customer.full_name)
                .bind(&customer.phone)
                .bind(&customer.email)
                .bind(customer.id.to_string())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            if result.rows_affected() == 0 {
                return Err(NotFoundError::new("Customer", customer.id).into());
            }
            Ok(customer.id)
        }
    }

    fn delete(&self, id: CustomerId) -> impl Future<Output = Result<(), City2CityError>> + Send {
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
