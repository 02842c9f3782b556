//! `SQLite` implementation of [`CityRepository`].

use std::future::Future;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, SqlitePool};

use city2city_app::ports::CityRepository;
use city2city_domain::city::{City, CreateCity, UpdateCity};
use city2city_domain::error::{City2CityError, NotFoundError};
use city2city_domain::id::CityId;
use city2city_domain::pagination::{ListRequest, Page};
use city2city_domain::time;

use crate::error::StorageError;
use crate::rows;

/// Wrapper for converting database rows into domain [`City`].
struct Wrapper(City);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        rows::city(row, "").map(Self)
    }
}

const INSERT: &str = "INSERT INTO cities (id, name, created_at) VALUES (?, ?, ?)";
const SELECT_BY_ID: &str = "SELECT id, name, created_at FROM cities WHERE id = ?";
const SELECT_PAGE: &str = "SELECT id, name, created_at FROM cities LIMIT ? OFFSET ?";
const COUNT_ALL: &str = "SELECT COUNT(*) FROM cities";
const UPDATE: &str = "UPDATE cities SET name = ? WHERE id = ?";
const DELETE_BY_ID: &str = "DELETE FROM cities WHERE id = ?";

/// `SQLite`-backed city repository.
pub struct SqliteCityRepository {
    pool: SqlitePool,
}

impl SqliteCityRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl CityRepository for SqliteCityRepository {
    fn create(
        &self,
        city: CreateCity,
    ) -> impl Future<Output = Result<CityId, City2CityError>> + Send {
        let pool = self.pool.clone();
        async move {
            let id = CityId::new();
            sqlx::query(INSERT)
                .bind(id.to_string())
                .bind(&city.name)
                .bind(rows::encode_timestamp(time::now()))
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(id)
        }
    }

    fn get_by_id(&self, id: CityId) -> impl Future<Output = Result<City, City2CityError>> + Send {
        let pool = self.pool.clone();
        async move {
            let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
                .bind(id.to_string())
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            row.map(|w| w.0)
                .ok_or_else(|| NotFoundError::new("City", id).into())
        }
    }

    fn get_list(
        &self,
        request: ListRequest,
    ) -> impl Future<Output = Result<Page<City>, City2CityError>> + Send {
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
        city: UpdateCity,
    ) -> impl Future<Output = Result<CityId, City2CityError>> + Send {
        let pool = self.pool.clone();
        async move {
            let result = sqlx::query(UPDATE)
                .bind(&city.name)
                .bind(city.id.to_string())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            if result.rows_affected() == 0 {
                return Err(NotFoundError::new("City", city.id).into());
            }
            Ok(city.id)
        }
    }

    fn delete(&self, id: CityId) -> impl Future<Output = Result<(), City2CityError>> + Send {
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
