use serde::Deserialize;

/// Pagination parameters for record listings (`?page=1&limit=10`).
#[derive(Deserialize, Debug, Clone, Copy, Default)]
pub struct ListQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl ListQuery {
    pub const DEFAULT_LIMIT: u32 = 10;

    /// 1-based page; zero or absent falls back to the first page.
    pub fn page(&self) -> u32 {
        self.page.filter(|p| *p > 0).unwrap_or(1)
    }

    pub fn limit(&self) -> u32 {
        self.limit.filter(|l| *l > 0).unwrap_or(Self::DEFAULT_LIMIT)
    }

    pub fn offset(&self) -> u32 {
        (self.page() - 1).saturating_mul(self.limit())
    }
}

/// Query for the recent-activity feed (`?limit=10`).
#[derive(Deserialize, Debug, Clone, Copy, Default)]
pub struct ActivityQuery {
    pub limit: Option<u32>,
}

impl ActivityQuery {
    pub fn limit(&self) -> u32 {
        self.limit.filter(|l| *l > 0).unwrap_or(10)
    }
}
