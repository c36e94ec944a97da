use serde::Deserialize;
use utoipa::IntoParams;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_PAGE_SIZE: i64 = 10;
/// Maximum number of files accepted by one `upload-multiple` request.
pub const MAX_BATCH_FILES: usize = 10;

#[derive(Debug, Deserialize, IntoParams)]
pub struct PageQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl PageQuery {
    pub fn page(&self) -> i64 {
        self.page.filter(|p| *p >= 1).unwrap_or(DEFAULT_PAGE)
    }

    pub fn limit(&self) -> i64 {
        self.limit.filter(|l| *l >= 1).unwrap_or(DEFAULT_PAGE_SIZE)
    }
}
