//! Pagination shapes shared by every listing operation.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A request for one page of a listing.
///
/// `page` is 1-based. The store skips `(page - 1) * limit` rows and returns at
/// most `limit` rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListRequest {
    pub page: u32,
    pub limit: u32,
}

impl Default for ListRequest {
    fn default() -> Self {
        Self { page: 1, limit: 10 }
    }
}

impl ListRequest {
    #[must_use]
    pub fn new(page: u32, limit: u32) -> Self {
        Self { page, limit }
    }

    /// Check that both `page` and `limit` are at least 1.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidPage`] or [`ValidationError::InvalidLimit`].
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.page == 0 {
            return Err(ValidationError::InvalidPage);
        }
        if self.limit == 0 {
            return Err(ValidationError::InvalidLimit);
        }
        Ok(())
    }

    /// Number of rows to skip before this page.
    #[must_use]
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.limit)
    }
}

/// One page of a listing plus the total number of matching rows.
///
/// `count` covers all pages, not just `items`. It comes from a separate
/// query, so it can disagree with the rows actually returned when writes
/// land between the two queries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub count: u64,
}

impl<T> Page<T> {
    #[must_use]
    pub fn new(items: Vec<T>, count: u64) -> Self {
        Self { items, count }
    }

    /// Convert every item, keeping the count.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            count: self.count,
        }
    }

    /// Whether this page holds no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
