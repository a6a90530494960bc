//! In-memory [`NewsApi`] used by the store tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};

use crate::api::{NewsApi, Page};
use crate::app::{Result, VeracityError};
use crate::domain::{CommentItem, NewsItem, Vote, VoteStatus};
use crate::pagination::page_count;

pub(crate) struct FakeApi {
    pub news: Vec<NewsItem>,
    pub comments: HashMap<i64, Vec<CommentItem>>,
    /// When set, every call fails with a generic error.
    pub fail: AtomicBool,
    /// Total number of requests served, for no-op assertions.
    pub calls: AtomicUsize,
    /// Simulate a backend that never sends `x-total-count`.
    pub omit_total: bool,
    /// Artificial latency before answering comment fetches.
    pub delay: Option<Duration>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self {
            news: Vec::new(),
            comments: HashMap::new(),
            fail: AtomicBool::new(false),
            calls: AtomicUsize::new(0),
            omit_total: false,
            delay: None,
        }
    }

    pub fn with_news(news: Vec<NewsItem>) -> Self {
        Self {
            news,
            ..Self::new()
        }
    }

    pub fn with_comments(news_id: i64, count: usize) -> Self {
        let mut comments = HashMap::new();
        comments.insert(
            news_id,
            (1..=count as i64).map(|i| comment_item(news_id, i)).collect(),
        );
        Self {
            comments,
            ..Self::new()
        }
    }

    fn check(&self) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            return Err(VeracityError::Other("connection refused".into()));
        }
        Ok(())
    }

    fn paginate<T: Clone>(&self, items: &[T], page: u32, limit: u32) -> Page<T> {
        let start = ((page - 1) * limit) as usize;
        let slice: Vec<T> = items.iter().skip(start).take(limit as usize).cloned().collect();
        let total = if self.omit_total {
            slice.len() as u64
        } else {
            items.len() as u64
        };
        Page {
            items: slice,
            total,
            page,
            limit,
            pages: page_count(total, limit),
        }
    }
}

#[async_trait]
impl NewsApi for FakeApi {
    async fn fetch_news(&self, page: u32, per_page: u32) -> Result<Page<NewsItem>> {
        self.check()?;
        let mut sorted = self.news.clone();
        sorted.sort_by(|a, b| b.date_time.cmp(&a.date_time));
        Ok(self.paginate(&sorted, page, per_page))
    }

    async fn fetch_all_news(&self) -> Result<Vec<NewsItem>> {
        self.check()?;
        Ok(self.news.clone())
    }

    async fn fetch_comments(&self, news_id: i64, page: u32, limit: u32) -> Result<Page<CommentItem>> {
        self.check()?;
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        let items = self.comments.get(&news_id).cloned().unwrap_or_default();
        Ok(self.paginate(&items, page, limit))
    }
}

fn timestamp(offset: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(1_700_000_000 + offset, 0).unwrap()
}

pub(crate) fn news_item(id: i64) -> NewsItem {
    NewsItem {
        id,
        topic: format!("Topic {}", id),
        short_detail: "short".into(),
        full_detail: "full".into(),
        status: VoteStatus::Fake,
        reporter: "reporter".into(),
        date_time: timestamp(id),
        image_url: "https://example.com/img.png".into(),
        fake_votes: 0,
        real_votes: 0,
    }
}

pub(crate) fn comment_item(news_id: i64, id: i64) -> CommentItem {
    CommentItem {
        id,
        news_id,
        user: format!("user{}", id),
        vote: Vote::Real,
        comment: format!("comment {}", id),
        attachments: None,
        created_at: Some(timestamp(id)),
    }
}
