use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use url::Url;

use crate::api::{NewsApi, Page};
use crate::app::Result;
use crate::domain::{CommentItem, NewsItem};
use crate::pagination::page_count;

const TOTAL_COUNT_HEADER: &str = "x-total-count";

/// reqwest-backed [`NewsApi`] against a json-server style mock backend.
///
/// Single attempt per call, no retry or backoff; a transport error or a
/// non-2xx status surfaces as one generic failure.
pub struct HttpApi {
    client: Client,
    news_url: Url,
    comments_url: Url,
}

impl HttpApi {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base = Url::parse(base_url)?;
        let news_url = base.join("news")?;
        let comments_url = base.join("comments")?;

        let client = Client::builder()
            .timeout(timeout)
            .gzip(true)
            .brotli(true)
            .user_agent("veracity/0.1.0")
            .build()
            .expect("Failed to build HTTP client");

        Ok(Self {
            client,
            news_url,
            comments_url,
        })
    }

    async fn fetch_page<T: DeserializeOwned>(
        &self,
        response: Response,
        page: u32,
        limit: u32,
    ) -> Result<Page<T>> {
        response.error_for_status_ref()?;

        // the body read consumes the response, so take the header first
        let header_total = total_from_headers(response.headers());
        let items: Vec<T> = response.json().await?;

        // Without the count header the server told us nothing beyond this
        // page; the fallback may under-report the true remote total.
        let total = header_total.unwrap_or(items.len() as u64);
        let pages = page_count(total, limit);

        Ok(Page {
            items,
            total,
            page,
            limit,
            pages,
        })
    }
}

fn total_from_headers(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(TOTAL_COUNT_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse().ok())
}

#[async_trait]
impl NewsApi for HttpApi {
    async fn fetch_news(&self, page: u32, per_page: u32) -> Result<Page<NewsItem>> {
        let response = self
            .client
            .get(self.news_url.clone())
            .query(&[
                ("_page", page.to_string()),
                ("_limit", per_page.to_string()),
                ("_sort", "dateTime".to_string()),
                ("_order", "desc".to_string()),
            ])
            .send()
            .await?;

        self.fetch_page(response, page, per_page).await
    }

    async fn fetch_all_news(&self) -> Result<Vec<NewsItem>> {
        let response = self
            .client
            .get(self.news_url.clone())
            .query(&[("_sort", "dateTime"), ("_order", "desc")])
            .send()
            .await?;

        response.error_for_status_ref()?;
        Ok(response.json().await?)
    }

    async fn fetch_comments(&self, news_id: i64, page: u32, limit: u32) -> Result<Page<CommentItem>> {
        let response = self
            .client
            .get(self.comments_url.clone())
            .query(&[
                ("newsId", news_id.to_string()),
                ("_page", page.to_string()),
                ("_limit", limit.to_string()),
            ])
            .send()
            .await?;

        self.fetch_page(response, page, limit).await
    }
}
