//! Paginated result sets.
//!
//! A [`ResultSet`] is one page of [`TestResult`]s plus the number of results
//! matching the current keyword across all pages.

use super::test_result::TestResult;
use serde::{Deserialize, Serialize};

/// Number of rows requested per page.
pub const PAGE_SIZE: usize = 10;

/// One page of results as served by `GET /test_results/`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultSet {
    pub results: Vec<TestResult>,

    /// Count over the keyword-filtered set, independent of offset and limit.
    pub total_count: usize,
}

/// Returns the number of pages needed to show `total_count` rows.
///
/// A `page_size` of zero yields zero pages.
///
/// # Examples
///
/// ```
/// use evalboard::domain::page_count;
///
/// assert_eq!(page_count(0, 10), 0);
/// assert_eq!(page_count(10, 10), 1);
/// assert_eq!(page_count(11, 10), 2);
/// ```
#[must_use]
pub const fn page_count(total_count: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total_count.div_ceil(page_size)
}

/// Returns the row offset of a 1-based page.
///
/// Page 0 is treated as page 1.
#[must_use]
pub const fn page_offset(page: usize, page_size: usize) -> usize {
    page.saturating_sub(1).saturating_mul(page_size)
}
