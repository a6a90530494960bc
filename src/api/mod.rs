pub mod http;

use async_trait::async_trait;

use crate::app::Result;
use crate::domain::{CommentItem, NewsItem};

pub use http::HttpApi;

/// One page of a paginated collection.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub pages: u32,
}

/// Read-only access to the two REST collections. Implemented over HTTP in
/// production and by in-memory fakes in store tests.
#[async_trait]
pub trait NewsApi {
    /// One page of news, sorted by `dateTime` descending server-side.
    async fn fetch_news(&self, page: u32, per_page: u32) -> Result<Page<NewsItem>>;

    /// The whole news collection, unpaginated.
    async fn fetch_all_news(&self) -> Result<Vec<NewsItem>>;

    /// One page of comments belonging to a single news item.
    async fn fetch_comments(&self, news_id: i64, page: u32, limit: u32) -> Result<Page<CommentItem>>;
}
