use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

pub const DEFAULT_PER_PAGE: u64 = 50;
pub const MAX_PER_PAGE: u64 = 500;

/// Optional paging for the list endpoint. With neither field set the whole
/// collection is returned.
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// 1-based page number
    #[schema(example = 1)]
    pub page: Option<u64>,
    #[schema(example = 50)]
    pub per_page: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub per_page: u64,
}

impl ListQuery {
    pub fn page_request(&self) -> Option<PageRequest> {
        if self.page.is_none() && self.per_page.is_none() {
            return None;
        }

        Some(PageRequest {
            page: self.page.unwrap_or(1).max(1),
            per_page: self
                .per_page
                .unwrap_or(DEFAULT_PER_PAGE)
                .clamp(1, MAX_PER_PAGE),
        })
    }
}

impl PageRequest {
    pub fn offset(&self) -> u64 {
        (self.page - 1).saturating_mul(self.per_page)
    }

    pub fn limit(&self) -> u64 {
        self.per_page
    }
}
