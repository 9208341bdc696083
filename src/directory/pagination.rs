//! Hypermedia pagination link handling.
//!
//! The Order Directory API describes navigation as opaque URLs in a `view`
//! block; the page number has to be dug out of each link's query string.

use serde::Serialize;
use url::Url;

use crate::directory::models::CollectionView;

/// Extract the `page` query parameter from a pagination link.
///
/// Links may be absolute or relative (`/api/orders?page=2`); relative links
/// fail strict URL parsing, so those fall back to slicing the query string
/// by hand. A link without a usable `page` parameter yields `None`.
pub fn page_from_url(link: &str) -> Option<u32> {
    match Url::parse(link) {
        Ok(url) => url
            .query_pairs()
            .find(|(key, _)| key == "page")
            .and_then(|(_, value)| value.parse().ok()),
        Err(_) => {
            let (_, query) = link.split_once('?')?;
            url::form_urlencoded::parse(query.as_bytes())
                .find(|(key, _)| key == "page")
                .and_then(|(_, value)| value.parse().ok())
        }
    }
}

/// Resolved pagination state for the orders listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Pagination {
    pub page: u32,
    pub first_page: u32,
    pub last_page: u32,
    /// `None` disables the corresponding navigation control
    pub prev_page: Option<u32>,
    pub next_page: Option<u32>,
}

impl Pagination {
    /// Derive pagination from the server's `view` links.
    ///
    /// `first_page` defaults to 1 and `last_page` collapses to `first_page`
    /// when the server omits bounds. Previous/next fall back to arithmetic
    /// neighbors only when the server supplied no link at all; a supplied
    /// link that fails extraction leaves that direction unavailable.
    pub fn resolve(view: Option<&CollectionView>, page: u32) -> Self {
        let first_page = view
            .and_then(|v| v.first.as_deref())
            .and_then(page_from_url)
            .unwrap_or(1);
        let last_page = view
            .and_then(|v| v.last.as_deref())
            .and_then(page_from_url)
            .unwrap_or(first_page);

        let prev_page = match view.and_then(|v| v.previous.as_deref()) {
            Some(link) => page_from_url(link),
            None => (page > first_page).then(|| page - 1),
        };
        let next_page = match view.and_then(|v| v.next.as_deref()) {
            Some(link) => page_from_url(link),
            None => (page < last_page).then(|| page + 1),
        };

        Self {
            page,
            first_page,
            last_page,
            prev_page,
            next_page,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view(
        first: Option<&str>,
        last: Option<&str>,
        next: Option<&str>,
        previous: Option<&str>,
    ) -> CollectionView {
        CollectionView {
            first: first.map(str::to_string),
            last: last.map(str::to_string),
            next: next.map(str::to_string),
            previous: previous.map(str::to_string),
        }
    }

    #[test]
    fn test_page_from_absolute_url() {
        assert_eq!(page_from_url("http://localhost:8000/api/orders?page=3"), Some(3));
    }

    #[test]
    fn test_page_from_relative_url_uses_fallback() {
        assert_eq!(page_from_url("/api/orders?page=2"), Some(2));
        assert_eq!(page_from_url("/api/orders?itemsPerPage=30&page=4"), Some(4));
    }

    #[test]
    fn test_link_without_page_parameter() {
        assert_eq!(page_from_url("/api/orders"), None);
        assert_eq!(page_from_url("/api/orders?itemsPerPage=30"), None);
        assert_eq!(page_from_url("http://localhost:8000/api/orders"), None);
    }

    #[test]
    fn test_non_numeric_page_parameter() {
        assert_eq!(page_from_url("/api/orders?page=abc"), None);
    }

    #[test]
    fn test_missing_view_collapses_to_single_page() {
        let pagination = Pagination::resolve(None, 1);
        assert_eq!(pagination.first_page, 1);
        assert_eq!(pagination.last_page, 1);
        assert_eq!(pagination.prev_page, None);
        assert_eq!(pagination.next_page, None);
    }

    #[test]
    fn test_last_defaults_to_first_when_absent() {
        let v = view(Some("/api/orders?page=1"), None, None, None);
        let pagination = Pagination::resolve(Some(&v), 1);
        assert_eq!(pagination.last_page, pagination.first_page);
    }

    #[test]
    fn test_links_win_over_arithmetic() {
        let v = view(
            Some("/api/orders?page=1"),
            Some("/api/orders?page=9"),
            Some("/api/orders?page=5"),
            Some("/api/orders?page=3"),
        );
        let pagination = Pagination::resolve(Some(&v), 4);
        assert_eq!(pagination.prev_page, Some(3));
        assert_eq!(pagination.next_page, Some(5));
    }

    #[test]
    fn test_arithmetic_fallback_is_bounded() {
        let v = view(Some("/api/orders?page=1"), Some("/api/orders?page=3"), None, None);

        let first = Pagination::resolve(Some(&v), 1);
        assert_eq!(first.prev_page, None);
        assert_eq!(first.next_page, Some(2));

        let last = Pagination::resolve(Some(&v), 3);
        assert_eq!(last.prev_page, Some(2));
        assert_eq!(last.next_page, None);
    }

    #[test]
    fn test_supplied_link_without_page_disables_direction() {
        // A link the server sent but we cannot read is treated as unavailable,
        // not patched up with arithmetic.
        let v = view(
            Some("/api/orders?page=1"),
            Some("/api/orders?page=5"),
            Some("/api/orders"),
            Some("/api/orders"),
        );
        let pagination = Pagination::resolve(Some(&v), 3);
        assert_eq!(pagination.prev_page, None);
        assert_eq!(pagination.next_page, None);
    }
}
