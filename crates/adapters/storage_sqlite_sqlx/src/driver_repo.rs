//! `SQLite` implementation of [`DriverRepository`].
//!
//! Both cities are resolved with `LEFT JOIN`s, so a driver stays readable
//! after one of its cities has gone.

use std::future::Future;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, SqlitePool};

use city2city_app::ports::DriverRepository;
use city2city_domain::driver::{CreateDriver, Driver, UpdateDriver};
use city2city_domain::error::{City2CityError, NotFoundError};
use city2city_domain::id::DriverId;
use city2city_domain::pagination::{ListRequest, Page};
use city2city_domain::time;

use crate::error::StorageError;
use crate::rows;

struct Wrapper(Driver);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        rows::driver(row, "").map(Self)
    }
}

macro_rules! select_driver {
    () => {
        "SELECT
            d.id AS id, d.full_name AS full_name, d.phone AS phone,
            d.from_city_id AS from_city_id, d.to_city_id AS to_city_id, d.created_at AS created_at,
            fc.id AS from_city__id, fc.name AS from_city__name, fc.created_at AS from_city__created_at,
            tc.id AS to_city__id, tc.name AS to_city__name, tc.created_at AS to_city__created_at
        FROM drivers d
        LEFT JOIN cities fc ON fc.id = d.from_city_id
        LEFT JOIN cities tc ON tc.id = d.to_city_id"
    };
}

const INSERT: &str = "INSERT INTO drivers (id, full_name, phone, from_city_id, to_city_id, created_at) VALUES (?, ?, ?, ?, ?, ?)";
const SELECT_BY_ID: &str = concat!(select_driver!(), " WHERE d.id = ?");
const SELECT_PAGE: &str = concat!(select_driver!(), " LIMIT ? OFFSET ?");
const COUNT_ALL: &str = "SELECT COUNT(*) FROM drivers";
const UPDATE: &str =
    "UPDATE drivers SET full_name = ?, phone = ?, from_city_id = ?, to_city_id = ? WHERE id = ?";
const DELETE_BY_ID: &str = "DELETE FROM drivers WHERE id = ?";

/// `SQLite`-backed driver repository.
pub struct SqliteDriverRepository {
    pool: SqlitePool,
}

impl SqliteDriverRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl DriverRepository for SqliteDriverRepository {
    fn create(
        &self,
        driver: CreateDriver,
    ) -> impl Future<Output = Result<DriverId, City2CityError>> + Send {
        let pool = self.pool.clone();
        async move {
            let id = DriverId::new();
            sqlx::query(INSERT)
                .bind(id.to_string())
                .bind(&driver.full_name)
                .bind(&driver.phone)
                .bind(driver.from_city_id.to_string())
                .bind(driver.to_city_id.to_string())
                .bind(rows::encode_timestamp(time::now()))
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(id)
        }
    }

    fn get_by_id(
        &self,
        id: DriverId,
    ) -> impl Future<Output = Result<Driver, City2CityError>> + Send {
        let pool = self.pool.clone();
        async move {
            let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
                .bind(id.to_string())
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            row.map(|w| w.0)
                .ok_or_else(|| NotFoundError::new("Driver", id).into())
        }
    }

    fn get_list(
        &self,
        request: ListRequest,
    ) -> impl Future<Output = Result<Page<Driver>, City2CityError>> + Send {
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
        driver: UpdateDriver,
    ) -> impl Future<Output = Result<DriverId, City2CityError>> + Send {
        let pool = self.pool.clone();
        async move {
            let result = sqlx::query(UPDATE)
                .bind(&driver.full_name)
                .bind(&driver.phone)
                .bind(driver.from_city_id.to_string())
                .bind(driver.to_city_id.to_string())
                .bind(driver.id.to_string())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            if result.rows_affected() == 0 {
                return Err(NotFoundError::new("Driver", driver.id).into());
            }
            Ok(driver.id)
        }
    }

    fn delete(&self, id: DriverId) -> impl Future<Output = Result<(), City2CityError>> + Send {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing;
    use city2city_domain::id::CityId;

    #[tokio::test]
    async fn should_resolve_both_cities_when_present() {
        let pool = testing::pool().await;
        let repo = SqliteDriverRepository::new(pool.clone());
        let springfield = testing::city(&pool, "Springfield").await;
        let shelbyville = testing::city(&pool, "Shelbyville").await;

        let id = repo
            .create(CreateDriver {
                full_name: "Otto Mann".to_string(),
                phone: "555-0142".to_string(),
                from_city_id: springfield,
                to_city_id: shelbyville,
            })
            .await
            .unwrap();

        let driver = repo.get_by_id(id).await.unwrap();
        assert_eq!(driver.full_name, "Otto Mann");
        assert_eq!(driver.from_city_id, springfield);
        assert_eq!(driver.to_city_id, shelbyville);
        assert_eq!(driver.from_city_data.unwrap().name, "Springfield");
        assert_eq!(driver.to_city_data.unwrap().name, "Shelbyville");
    }

    #[tokio::test]
    async fn should_return_driver_with_empty_city_when_city_row_is_gone() {
        let pool = testing::pool().await;
        let repo = SqliteDriverRepository::new(pool.clone());
        let springfield = testing::city(&pool, "Springfield").await;
        let shelbyville = testing::city(&pool, "Shelbyville").await;
        let id = testing::driver(&pool, "Otto Mann", springfield, shelbyville).await;

        testing::without_foreign_keys(
            &pool,
            &format!("DELETE FROM cities WHERE id = '{shelbyville}'"),
        )
        .await;

        let driver = repo.get_by_id(id).await.unwrap();
        assert_eq!(driver.to_city_id, shelbyville);
        assert!(driver.to_city_data.is_none());
        assert_eq!(driver.from_city_data.unwrap().id, springfield);
    }

    #[tokio::test]
    async fn should_fail_with_constraint_violation_when_city_unknown() {
        let pool = testing::pool().await;
        let repo = SqliteDriverRepository::new(pool.clone());
        let springfield = testing::city(&pool, "Springfield").await;

        let result = repo
            .create(CreateDriver {
                full_name: "Otto Mann".to_string(),
                phone: "555-0142".to_string(),
                from_city_id: springfield,
                to_city_id: CityId::new(),
            })
            .await;

        assert!(matches!(
            result,
            Err(City2CityError::ConstraintViolation(_))
        ));
    }

    #[tokio::test]
    async fn should_move_driver_to_new_route_on_update() {
        let pool = testing::pool().await;
        let repo = SqliteDriverRepository::new(pool.clone());
        let springfield = testing::city(&pool, "Springfield").await;
        let shelbyville = testing::city(&pool, "Shelbyville").await;
        let ogdenville = testing::city(&pool, "Ogdenville").await;
        let id = testing::driver(&pool, "Otto Mann", springfield, shelbyville).await;

        let mut update = UpdateDriver::from(&repo.get_by_id(id).await.unwrap());
        update.to_city_id = ogdenville;
        update.phone = "555-0199".to_string();
        repo.update(update).await.unwrap();

        let driver = repo.get_by_id(id).await.unwrap();
        assert_eq!(driver.phone, "555-0199");
        assert_eq!(driver.to_city_data.unwrap().name, "Ogdenville");
    }

    #[tokio::test]
    async fn should_return_not_found_when_updating_missing_driver() {
        let pool = testing::pool().await;
        let repo = SqliteDriverRepository::new(pool.clone());
        let city = testing::city(&pool, "Springfield").await;

        let result = repo
            .update(UpdateDriver {
                id: DriverId::new(),
                full_name: "Nobody".to_string(),
                phone: "555-0000".to_string(),
                from_city_id: city,
                to_city_id: city,
            })
            .await;

        assert!(matches!(result, Err(City2CityError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_list_drivers_with_total_count() {
        let pool = testing::pool().await;
        let repo = SqliteDriverRepository::new(pool.clone());
        let city = testing::city(&pool, "Springfield").await;
        for index in 0..4 {
            testing::driver(&pool, &format!("Driver {index}"), city, city).await;
        }

        let page = repo.get_list(ListRequest::new(2, 3)).await.unwrap();

        assert_eq!(page.count, 4);
        assert_eq!(page.items.len(), 1);
        assert!(page.items[0].from_city_data.is_some());
    }

    #[tokio::test]
    async fn should_return_not_found_after_delete() {
        let pool = testing::pool().await;
        let repo = SqliteDriverRepository::new(pool.clone());
        let city = testing::city(&pool, "Springfield").await;
        let id = testing::driver(&pool, "Otto Mann", city, city).await;

        repo.delete(id).await.unwrap();

        assert!(matches!(
            repo.get_by_id(id).await,
            Err(City2CityError::NotFound(_))
        ));
    }
}
