//! Blog post data models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::account::AccountId;

/// Post ID type
pub type PostId = i64;

/// Blog post model
///
/// Holds only a back-reference to its author, never the account record itself.
#[derive(Debug, Clone, Serialize)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub body: String,
    pub author_id: AccountId,
    pub posted_at: DateTime<Utc>,
}

/// New post submission
#[derive(Debug, Clone, Deserialize)]
pub struct NewPost {
    pub title: String,
    pub body: String,
    pub author_id: AccountId,
}

/// One page of a larger listing
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based page number
    pub page: u32,
    pub per_page: u32,
    /// Total items across all pages
    pub total: u64,
}

impl<T> Page<T> {
    /// Number of pages needed for `total` items
    pub fn page_count(&self) -> u64 {
        if self.per_page == 0 {
            return 0;
        }
        self.total.div_ceil(u64::from(self.per_page))
    }
}
