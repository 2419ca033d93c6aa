//! Pagination parameters.

use serde::{Deserialize, Serialize};

/// Highest page number the movie metadata provider will serve.
pub const MAX_UPSTREAM_PAGE: u32 = 500;

/// Pagination for locally stored lists.
///
/// - `per_page`: 1–100, default 20
/// - `page`: ≥ 1, default 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    #[serde(default = "default_per_page", rename = "per-page")]
    pub per_page: u32,
    #[serde(default = "default_page")]
    pub page: u32,
}

fn default_per_page() -> u32 {
    20
}

fn default_page() -> u32 {
    1
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            per_page: default_per_page(),
            page: default_page(),
        }
    }
}

impl PageRequest {
    /// Clamp `per_page` to 1–100 and `page` to ≥ 1.
    pub fn clamped(self) -> Self {
        Self {
            per_page: self.per_page.clamp(1, 100),
            page: self.page.max(1),
        }
    }

    /// Row offset of the first item on this page (call on a clamped request).
    pub fn offset(self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.per_page)
    }
}

/// Page number forwarded to the metadata provider: defaults to 1 and is
/// clamped into the provider's accepted range.
pub fn upstream_page(page: Option<u32>) -> u32 {
    page.unwrap_or(1).clamp(1, MAX_UPSTREAM_PAGE)
}
