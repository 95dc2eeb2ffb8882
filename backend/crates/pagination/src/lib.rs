//! Keyset cursor and page envelope primitives shared by feed endpoints.
//!
//! Feed listings paginate by visit id rather than row offset: the client
//! passes the id of the last row it saw and the query returns rows strictly
//! older than it. Endpoints fetch one row more than the page size so the
//! envelope can report whether another page exists without a count query.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Number of rows a feed page carries.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Errors raised when constructing a [`Cursor`] from a known-good id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CursorError {
    /// Cursor ids are row ids and therefore always positive.
    #[error("cursor id must be positive")]
    NonPositive,
}

/// Exclusive upper bound on row ids for the next page.
///
/// `Cursor::start()` (no bound) requests the newest page. Client-supplied
/// cursor strings are parsed leniently: anything that is not a positive
/// integer falls back to the start of the feed, mirroring how the feed
/// endpoints have always treated malformed cursors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor(Option<i64>);

impl Cursor {
    /// Cursor for the newest page.
    #[must_use]
    pub const fn start() -> Self {
        Self(None)
    }

    /// Cursor positioned after the row with the given id.
    ///
    /// # Errors
    ///
    /// Returns [`CursorError::NonPositive`] when `id` is zero or negative.
    pub const fn after(id: i64) -> Result<Self, CursorError> {
        if id <= 0 {
            return Err(CursorError::NonPositive);
        }
        Ok(Self(Some(id)))
    }

    /// Parse an optional client-supplied cursor string.
    ///
    /// Malformed or non-positive values degrade to [`Cursor::start`].
    #[must_use]
    pub fn parse(raw: Option<&str>) -> Self {
        let id = raw.and_then(|value| value.trim().parse::<i64>().ok());
        match id {
            Some(id) if id > 0 => Self(Some(id)),
            _ => Self(None),
        }
    }

    /// The exclusive upper bound, if any.
    #[must_use]
    pub const fn after_id(&self) -> Option<i64> {
        self.0
    }
}

/// How many rows to request from the store for one page.
///
/// One extra row signals whether a further page exists.
#[must_use]
pub const fn fetch_limit(page_size: usize) -> i64 {
    page_size as i64 + 1
}

/// One page of feed rows plus continuation state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// The rows of this page, newest first.
    pub data: Vec<T>,
    /// Whether a further page exists after `next_cursor`.
    pub has_next_page: bool,
    /// Cursor for the next page; `None` on the last page.
    pub next_cursor: Option<i64>,
}

impl<T> Page<T> {
    /// Build a page from rows fetched with [`fetch_limit`] extra capacity.
    ///
    /// When more than `page_size` rows came back the surplus is dropped, the
    /// page reports a next page, and the cursor is the id of the last row
    /// returned. Otherwise every row is returned and the page is final.
    pub fn from_rows(mut rows: Vec<T>, page_size: usize, id_of: impl Fn(&T) -> i64) -> Self {
        if rows.len() > page_size {
            rows.truncate(page_size);
            let next_cursor = rows.last().map(id_of);
            Self {
                data: rows,
                has_next_page: true,
                next_cursor,
            }
        } else {
            Self {
                data: rows,
                has_next_page: false,
                next_cursor: None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[derive(Debug, Clone, PartialEq)]
    struct Row(i64);

    fn rows(ids: &[i64]) -> Vec<Row> {
        ids.iter().copied().map(Row).collect()
    }

    #[rstest]
    #[case(None, None)]
    #[case(Some("42"), Some(42))]
    #[case(Some(" 7 "), Some(7))]
    #[case(Some("0"), None)]
    #[case(Some("-3"), None)]
    #[case(Some("abc"), None)]
    #[case(Some(""), None)]
    fn parse_is_lenient(#[case] raw: Option<&str>, #[case] expected: Option<i64>) {
        assert_eq!(Cursor::parse(raw).after_id(), expected);
    }

    #[rstest]
    fn after_rejects_non_positive_ids() {
        assert_eq!(Cursor::after(0), Err(CursorError::NonPositive));
        assert_eq!(Cursor::after(-1), Err(CursorError::NonPositive));
        let cursor = Cursor::after(9).expect("positive id");
        assert_eq!(cursor.after_id(), Some(9));
    }

    #[rstest]
    fn fetch_limit_requests_one_extra_row() {
        assert_eq!(fetch_limit(10), 11);
    }

    #[rstest]
    fn full_fetch_truncates_and_points_at_last_returned_row() {
        let fetched = rows(&[20, 19, 18, 17, 16, 15, 14, 13, 12, 11, 10]);

        let page = Page::from_rows(fetched, DEFAULT_PAGE_SIZE, |row| row.0);

        assert_eq!(page.data.len(), DEFAULT_PAGE_SIZE);
        assert!(page.has_next_page);
        assert_eq!(page.next_cursor, Some(11));
    }

    #[rstest]
    #[case(&[5, 4, 3])]
    #[case(&[10, 9, 8, 7, 6, 5, 4, 3, 2, 1])]
    #[case(&[])]
    fn short_fetch_is_the_final_page(#[case] ids: &[i64]) {
        let page = Page::from_rows(rows(ids), DEFAULT_PAGE_SIZE, |row| row.0);

        assert_eq!(page.data, rows(ids));
        assert!(!page.has_next_page);
        assert_eq!(page.next_cursor, None);
    }

    #[rstest]
    fn following_cursors_enumerates_every_row_exactly_once() {
        let all: Vec<Row> = (1..=23).rev().map(Row).collect();
        let mut seen = Vec::new();
        let mut cursor = Cursor::start();

        loop {
            let fetched: Vec<Row> = all
                .iter()
                .filter(|row| cursor.after_id().is_none_or(|after| row.0 < after))
                .take(DEFAULT_PAGE_SIZE + 1)
                .cloned()
                .collect();
            let page = Page::from_rows(fetched, DEFAULT_PAGE_SIZE, |row| row.0);
            seen.extend(page.data);
            match page.next_cursor {
                Some(next) => cursor = Cursor::after(next).expect("cursors are row ids"),
                None => break,
            }
        }

        assert_eq!(seen, all);
    }
}
