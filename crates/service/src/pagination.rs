//! Pagination utilities for list operations.
//!
//! `Pagination` doubles as the `?page=&per_page=` query of list endpoints.

use serde::Deserialize;

/// Pagination parameters
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Pagination {
    /// 1-based page index
    pub page: u32,
    /// items per page
    pub per_page: u32,
}

impl Pagination {
    pub const MAX_PER_PAGE: u32 = 100;

    /// Clamp to sane defaults; returns a 0-based page index and a page size.
    pub fn normalize(self) -> (u64, u64) {
        let page = self.page.max(1);
        let per_page = self.per_page.clamp(1, Self::MAX_PER_PAGE);
        ((page - 1) as u64, per_page as u64)
    }

    /// Offset/limit view for in-memory slicing.
    pub fn bounds(self) -> (usize, usize) {
        let (idx, per) = self.normalize();
        ((idx * per) as usize, per as usize)
    }
}

impl Default for Pagination {
    fn default() -> Self { Self { page: 1, per_page: 20 } }
}

#[cfg(test)]
mod tests {
    use super::Pagination;

    #[test]
    fn normalize_clamps_zero_to_defaults() {
        let (idx, per) = Pagination { page: 0, per_page: 0 }.normalize();
        assert_eq!(idx, 0);
        assert_eq!(per, 1);
    }

    #[test]
    fn normalize_clamps_upper_bound() {
        let (idx, per) = Pagination { page: 5, per_page: 1000 }.normalize();
        assert_eq!(idx, 4);
        assert_eq!(per, 100);
    }

    #[test]
    fn bounds_are_offset_and_limit() {
        assert_eq!(Pagination { page: 3, per_page: 10 }.bounds(), (20, 10));
        assert_eq!(Pagination::default().bounds(), (0, 20));
    }

    #[test]
    fn query_fields_are_optional() {
        let p: Pagination = serde_json::from_str(r#"{"page": 2}"#).unwrap();
        assert_eq!(p, Pagination { page: 2, per_page: 20 });
    }
}
