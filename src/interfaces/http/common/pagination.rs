//! Pagination query params and response envelope

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Pagination parameters for list endpoints
#[derive(Debug, Clone, Copy, Deserialize, IntoParams)]
pub struct PageParams {
    /// Page number (1-based). Default: 1
    #[serde(default = "default_page")]
    pub page: u64,
    /// Items per page (1-100). Default: 10
    #[serde(default = "default_limit")]
    pub limit: u64,
}

fn default_page() -> u64 {
    1
}

fn default_limit() -> u64 {
    10
}

impl Default for PageParams {
    fn default() -> Self {
        Self { page: 1, limit: 10 }
    }
}

impl PageParams {
    /// Clamped page size
    pub fn limit(&self) -> u64 {
        self.limit.clamp(1, 100)
    }

    /// 1-based page number
    pub fn page(&self) -> u64 {
        self.page.max(1)
    }

    /// Row offset for the current page
    pub fn offset(&self) -> u64 {
        (self.page() - 1) * self.limit()
    }
}

/// Paginated list envelope: `{total, page, totalPages, data}`
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Paginated<T> {
    pub total: u64,
    pub page: u64,
    pub total_pages: u64,
    pub data: Vec<T>,
}

impl<T> Paginated<T> {
    pub fn new(total: u64, params: &PageParams, data: Vec<T>) -> Self {
        Self {
            total,
            page: params.page(),
            total_pages: total.div_ceil(params.limit()),
            data,
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_are_one_based() {
        let params = PageParams { page: 3, limit: 10 };
        assert_eq!(params.offset(), 20);

        let params = PageParams { page: 0, limit: 10 };
        assert_eq!(params.page(), 1);
        assert_eq!(params.offset(), 0);
    }

    #[test]
    fn limit_is_clamped() {
        assert_eq!(PageParams { page: 1, limit: 0 }.limit(), 1);
        assert_eq!(PageParams { page: 1, limit: 500 }.limit(), 100);
    }

    #[test]
    fn total_pages_round_up() {
        let params = PageParams { page: 1, limit: 10 };
        assert_eq!(Paginated::<u8>::new(0, &params, vec![]).total_pages, 0);
        assert_eq!(Paginated::<u8>::new(10, &params, vec![]).total_pages, 1);
        assert_eq!(Paginated::<u8>::new(11, &params, vec![]).total_pages, 2);
    }
}
