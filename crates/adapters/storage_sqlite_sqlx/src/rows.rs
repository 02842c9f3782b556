//! Shared row decoding for joined queries.
//!
//! Joined `SELECT`s alias the columns of every related table with a prefix
//! ending in `__`, e.g. `driver__full_name` or `driver__from_city__name`.
//! The helpers below read one nested record starting at such a prefix; the
//! root table uses the empty prefix.
//!
//! Identifiers and timestamps are stored as TEXT. Timestamps always carry six
//! fractional digits and a `Z` suffix so that lexical order matches time
//! order.

use std::str::FromStr;

use chrono::{DateTime, SecondsFormat};
use sqlx::sqlite::SqliteRow;
use sqlx::{Decode, Row, Sqlite, SqlitePool, Type};

use city2city_domain::city::City;
use city2city_domain::customer::Customer;
use city2city_domain::driver::Driver;
use city2city_domain::pagination::ListRequest;
use city2city_domain::time::Timestamp;

pub(crate) fn encode_timestamp(value: Timestamp) -> String {
    value.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub(crate) fn decode_timestamp(value: &str) -> Result<Timestamp, sqlx::Error> {
    DateTime::parse_from_rfc3339(value)
        .map(|ts| ts.to_utc())
        .map_err(|err| sqlx::Error::Decode(Box::new(err)))
}

pub(crate) fn decode_id<T>(value: &str) -> Result<T, sqlx::Error>
where
    T: FromStr<Err = uuid::Error>,
{
    T::from_str(value).map_err(|err| sqlx::Error::Decode(Box::new(err)))
}

pub(crate) fn decode_optional_id<T>(value: Option<String>) -> Result<Option<T>, sqlx::Error>
where
    T: FromStr<Err = uuid::Error>,
{
    value.as_deref().map(decode_id::<T>).transpose()
}

/// Read column `name` under `prefix`.
pub(crate) fn get<'r, T>(row: &'r SqliteRow, prefix: &str, name: &str) -> Result<T, sqlx::Error>
where
    T: Decode<'r, Sqlite> + Type<Sqlite>,
{
    row.try_get(format!("{prefix}{name}").as_str())
}

pub(crate) fn city(row: &SqliteRow, prefix: &str) -> Result<City, sqlx::Error> {
    let id: String = get(row, prefix, "id")?;
    let name: String = get(row, prefix, "name")?;
    let created_at: String = get(row, prefix, "created_at")?;

    Ok(City {
        id: decode_id(&id)?,
        name,
        created_at: decode_timestamp(&created_at)?,
    })
}

/// A city reached through an outer join; `None` when the join found no row.
pub(crate) fn optional_city(row: &SqliteRow, prefix: &str) -> Result<Option<City>, sqlx::Error> {
    let id: Option<String> = get(row, prefix, "id")?;
    match id {
        Some(_) => city(row, prefix).map(Some),
        None => Ok(None),
    }
}

pub(crate) fn customer(row: &SqliteRow, prefix: &str) -> Result<Customer, sqlx::Error> {
    let id: String = get(row, prefix, "id")?;
    let full_name: String = get(row, prefix, "full_name")?;
    let phone: String = get(row, prefix, "phone")?;
    let email: String = get(row, prefix, "email")?;
    let created_at: String = get(row, prefix, "created_at")?;

    Ok(Customer {
        id: decode_id(&id)?,
        full_name,
        phone,
        email,
        created_at: decode_timestamp(&created_at)?,
    })
}

pub(crate) fn optional_customer(
    row: &SqliteRow,
    prefix: &str,
) -> Result<Option<Customer>, sqlx::Error> {
    let id: Option<String> = get(row, prefix, "id")?;
    match id {
        Some(_) => customer(row, prefix).map(Some),
        None => Ok(None),
    }
}

/// A driver together with its outer-joined cities, which are expected under
/// `{prefix}from_city__` and `{prefix}to_city__`.
pub(crate) fn driver(row: &SqliteRow, prefix: &str) -> Result<Driver, sqlx::Error> {
    let id: String = get(row, prefix, "id")?;
    let full_name: String = get(row, prefix, "full_name")?;
    let phone: String = get(row, prefix, "phone")?;
    let from_city_id: String = get(row, prefix, "from_city_id")?;
    let to_city_id: String = get(row, prefix, "to_city_id")?;
    let created_at: String = get(row, prefix, "created_at")?;

    Ok(Driver {
        id: decode_id(&id)?,
        full_name,
        phone,
        from_city_id: decode_id(&from_city_id)?,
        to_city_id: decode_id(&to_city_id)?,
        created_at: decode_timestamp(&created_at)?,
        from_city_data: optional_city(row, &format!("{prefix}from_city__"))?,
        to_city_data: optional_city(row, &format!("{prefix}to_city__"))?,
    })
}

/// `LIMIT` and `OFFSET` bind values for a validated request.
pub(crate) fn window(request: ListRequest) -> (i64, i64) {
    (
        i64::from(request.limit),
        i64::try_from(request.offset()).unwrap_or(i64::MAX),
    )
}

/// Run a `SELECT COUNT(*)` statement.
pub(crate) async fn count(pool: &SqlitePool, sql: &str) -> Result<u64, sqlx::Error> {
    let (count,): (i64,) = sqlx::query_as(sql).fetch_one(pool).await?;
    Ok(u64::try_from(count).unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use city2city_domain::id::CityId;

    #[test]
    fn should_encode_timestamp_with_fixed_width() {
        let ts = DateTime::parse_from_rfc3339("2024-05-01T08:00:00Z")
            .unwrap()
            .to_utc();
        assert_eq!(encode_timestamp(ts), "2024-05-01T08:00:00.000000Z");
    }

    #[test]
    fn should_order_encoded_timestamps_lexically() {
        let earlier = DateTime::parse_from_rfc3339("2024-05-01T08:00:00.9Z")
            .unwrap()
            .to_utc();
        let later = DateTime::parse_from_rfc3339("2024-05-01T08:00:01Z")
            .unwrap()
            .to_utc();
        assert!(encode_timestamp(earlier) < encode_timestamp(later));
    }

    #[test]
    fn should_decode_what_was_encoded() {
        let ts = city2city_domain::time::now();
        assert_eq!(decode_timestamp(&encode_timestamp(ts)).unwrap(), ts);
    }

    #[test]
    fn should_report_decode_error_when_id_is_malformed() {
        let result = decode_id::<CityId>("not-a-uuid");
        assert!(matches!(result, Err(sqlx::Error::Decode(_))));
    }

    #[test]
    fn should_compute_window_from_page_and_limit() {
        assert_eq!(window(ListRequest::new(1, 10)), (10, 0));
        assert_eq!(window(ListRequest::new(3, 25)), (25, 50));
    }
}
