//! Wire types for the favorites routes.

use serde::Deserialize;

use crate::ports::Page;

/// Request body for `POST /favorites`.
#[derive(Debug, Deserialize)]
pub struct FavoriteRequest {
    pub training_id: i64,
}

/// Query parameters for `GET /favorites`.
#[derive(Debug, Default, Deserialize)]
pub struct ListFavoritesQuery {
    pub offset: Option<u32>,
    pub limit: Option<u32>,
    /// `"me"` (default), `"all"`, or a user id. Anything but `"me"` and the
    /// caller's own id requires admin.
    pub user: Option<String>,
}

impl ListFavoritesQuery {
    pub fn page(&self) -> Page {
        Page::new(
            self.offset.unwrap_or(0),
            self.limit.unwrap_or(Page::MAX_LIMIT),
        )
    }
}
