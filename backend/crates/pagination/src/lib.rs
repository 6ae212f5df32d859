//! Page/limit pagination primitives shared by listing endpoints.
//!
//! Endpoints accept `page` and `limit` query parameters as strings, clamp
//! them into a valid window, and return a [`Pagination`] envelope alongside
//! the page of results. Keeping the arithmetic here ensures every list
//! endpoint reports `totalPages`/`hasNext`/`hasPrev` consistently.

use serde::{Deserialize, Serialize};

/// Errors raised while interpreting raw pagination query parameters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PageParamsError {
    /// The parameter was present but not a base-10 integer.
    #[error("{field} must be a positive integer")]
    NotANumber {
        /// Name of the offending query parameter.
        field: &'static str,
    },
}

/// Validated page window for a list request.
///
/// ## Invariants
/// - `page >= 1`
/// - `1 <= limit <= MAX_LIMIT`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageParams {
    page: u64,
    limit: u64,
}

impl PageParams {
    /// Page number used when the client omits `page`.
    pub const DEFAULT_PAGE: u64 = 1;
    /// Page size used when the client omits `limit`.
    pub const DEFAULT_LIMIT: u64 = 20;
    /// Largest page size a client may request.
    pub const MAX_LIMIT: u64 = 100;

    /// Build parameters from optional values, clamping into the valid window.
    ///
    /// Zero pages become page 1; zero limits become 1; limits above
    /// [`Self::MAX_LIMIT`] are capped.
    #[must_use]
    pub fn clamped(page: Option<u64>, limit: Option<u64>) -> Self {
        let page = page.unwrap_or(Self::DEFAULT_PAGE).max(1);
        let limit = limit
            .unwrap_or(Self::DEFAULT_LIMIT)
            .clamp(1, Self::MAX_LIMIT);
        Self { page, limit }
    }

    /// Parse raw query parameter strings, then clamp as [`Self::clamped`].
    ///
    /// # Errors
    ///
    /// Returns [`PageParamsError::NotANumber`] when a supplied value is not a
    /// base-10 integer.
    pub fn from_query(
        page: Option<&str>,
        limit: Option<&str>,
    ) -> Result<Self, PageParamsError> {
        let page = parse_raw(page, "page")?;
        let limit = parse_raw(limit, "limit")?;
        Ok(Self::clamped(page, limit))
    }

    /// Requested page number (1-based).
    #[must_use]
    pub const fn page(&self) -> u64 {
        self.page
    }

    /// Requested page size.
    #[must_use]
    pub const fn limit(&self) -> u64 {
        self.limit
    }

    /// Number of rows to skip before this page starts.
    ///
    /// Saturates at `u64::MAX`: `page` is client-supplied and only its lower
    /// bound is clamped.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

impl Default for PageParams {
    fn default() -> Self {
        Self::clamped(None, None)
    }
}

fn parse_raw(raw: Option<&str>, field: &'static str) -> Result<Option<u64>, PageParamsError> {
    match raw {
        None => Ok(None),
        Some(value) if value.trim().is_empty() => Ok(None),
        Some(value) => value
            .trim()
            .parse::<u64>()
            .map(Some)
            .map_err(|_| PageParamsError::NotANumber { field }),
    }
}

/// Pagination envelope returned next to every page of results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    /// Page number the envelope describes (1-based).
    pub page: u64,
    /// Page size used for the query.
    pub limit: u64,
    /// Total matching rows across all pages.
    pub total: u64,
    /// Number of pages needed to cover `total` rows.
    pub total_pages: u64,
    /// Whether a later page exists.
    pub has_next: bool,
    /// Whether an earlier page exists.
    pub has_prev: bool,
}

impl Pagination {
    /// Describe the page selected by `params` over `total` matching rows.
    #[must_use]
    pub const fn for_page(params: PageParams, total: u64) -> Self {
        Self {
            page: params.page,
            limit: params.limit,
            total,
            total_pages: total.div_ceil(params.limit),
            // Saturating keeps oversized client page numbers from wrapping.
            has_next: params.page.saturating_mul(params.limit) < total,
            has_prev: params.page > 1,
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(None, None, 1, 20)]
    #[case(Some(0), Some(0), 1, 1)]
    #[case(Some(3), Some(50), 3, 50)]
    #[case(Some(2), Some(500), 2, 100)]
    fn clamps_page_window(
        #[case] page: Option<u64>,
        #[case] limit: Option<u64>,
        #[case] expected_page: u64,
        #[case] expected_limit: u64,
    ) {
        let params = PageParams::clamped(page, limit);
        assert_eq!(params.page(), expected_page);
        assert_eq!(params.limit(), expected_limit);
    }

    #[rstest]
    #[case(1, 20, 0)]
    #[case(2, 20, 20)]
    #[case(5, 7, 28)]
    #[case(u64::MAX, 100, u64::MAX)]
    fn offset_skips_earlier_pages(#[case] page: u64, #[case] limit: u64, #[case] expected: u64) {
        let params = PageParams::clamped(Some(page), Some(limit));
        assert_eq!(params.offset(), expected);
    }

    #[rstest]
    #[case(None, None, 1, 20)]
    #[case(Some("2"), Some("10"), 2, 10)]
    #[case(Some(" 4 "), Some(""), 4, 20)]
    #[case(Some("18446744073709551615"), Some("100"), u64::MAX, 100)]
    fn from_query_accepts_raw_strings(
        #[case] page: Option<&str>,
        #[case] limit: Option<&str>,
        #[case] expected_page: u64,
        #[case] expected_limit: u64,
    ) {
        let params = PageParams::from_query(page, limit).expect("valid query values");
        assert_eq!(params.page(), expected_page);
        assert_eq!(params.limit(), expected_limit);
    }

    #[rstest]
    #[case(Some("abc"), None, "page")]
    #[case(None, Some("-1"), "limit")]
    #[case(Some("1.5"), None, "page")]
    fn from_query_rejects_non_numeric_values(
        #[case] page: Option<&str>,
        #[case] limit: Option<&str>,
        #[case] field: &'static str,
    ) {
        let err = PageParams::from_query(page, limit).expect_err("non-numeric must fail");
        assert_eq!(err, PageParamsError::NotANumber { field });
    }

    #[rstest]
    #[case(1, 20, 0, 0, false, false)]
    #[case(1, 20, 45, 3, true, false)]
    #[case(3, 20, 45, 3, false, true)]
    #[case(2, 20, 40, 2, false, true)]
    #[case(u64::MAX, 100, 45, 1, false, true)]
    fn envelope_arithmetic(
        #[case] page: u64,
        #[case] limit: u64,
        #[case] total: u64,
        #[case] total_pages: u64,
        #[case] has_next: bool,
        #[case] has_prev: bool,
    ) {
        let envelope = Pagination::for_page(PageParams::clamped(Some(page), Some(limit)), total);
        assert_eq!(envelope.total_pages, total_pages);
        assert_eq!(envelope.has_next, has_next);
        assert_eq!(envelope.has_prev, has_prev);
    }

    #[test]
    fn envelope_serialises_camel_case() {
        let envelope = Pagination::for_page(PageParams::default(), 45);
        let value = serde_json::to_value(envelope).expect("serialise envelope");
        assert!(value.get("totalPages").is_some());
        assert!(value.get("hasNext").is_some());
        assert!(value.get("hasPrev").is_some());
        assert!(value.get("total_pages").is_none());
    }
}
