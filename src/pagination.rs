//! Pagination arithmetic and defensive normalization of untrusted
//! query-string input.
//!
//! Every function here is total: bad input is clamped to a safe default,
//! never rejected.

use crate::domain::NewsFilter;

/// Page sizes the list route accepts.
pub const PER_PAGE_OPTIONS: [u32; 5] = [4, 7, 10, 14, 21];

/// Page size used when the query string carries none, or an unsupported one.
pub const DEFAULT_PER_PAGE: u32 = 7;

/// Page size used for comment fetches when the caller does not specify one.
pub const DEFAULT_COMMENT_LIMIT: u32 = 20;

/// `max(1, ceil(total / limit))`. A zero limit is treated as 1 so the
/// function stays total.
pub fn page_count(total: u64, limit: u32) -> u32 {
    let limit = limit.max(1) as u64;
    (total.div_ceil(limit)).max(1) as u32
}

/// Parse a requested page number. Absent, unparseable, or non-positive
/// input yields page 1.
pub fn normalize_page(raw: Option<&str>) -> u32 {
    raw.and_then(|s| s.trim().parse::<u32>().ok())
        .filter(|&p| p > 0)
        .unwrap_or(1)
}

/// Parse a requested page size. Anything outside [`PER_PAGE_OPTIONS`]
/// yields [`DEFAULT_PER_PAGE`].
pub fn normalize_per_page(raw: Option<&str>) -> u32 {
    raw.and_then(|s| s.trim().parse::<u32>().ok())
        .filter(|n| PER_PAGE_OPTIONS.contains(n))
        .unwrap_or(DEFAULT_PER_PAGE)
}

/// The normalized parameters of the list route. This is the contract the
/// routing layer honors: whatever arrives in the query string, the stores
/// only ever see a valid page, a supported page size, and a known filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListQuery {
    pub page: u32,
    pub per_page: u32,
    pub filter: NewsFilter,
}

impl ListQuery {
    pub fn from_raw(page: Option<&str>, per_page: Option<&str>, filter: Option<&str>) -> Self {
        Self {
            page: normalize_page(page),
            per_page: normalize_per_page(per_page),
            filter: NewsFilter::normalize(filter),
        }
    }
}

impl Default for ListQuery {
    fn default() -> Self {
        Self::from_raw(None, None, None)
    }
}
