use std::sync::{Arc, Mutex, MutexGuard};

use crate::api::NewsApi;
use crate::domain::{NewsFilter, NewsItem};

#[derive(Default)]
struct NewsState {
    /// The most recently fetched page slice.
    news: Option<Vec<NewsItem>>,
    total: u64,
    loading: bool,
    error: Option<String>,
    /// Memoized full list, sorted by `date_time` descending. Filled once
    /// by `ensure_all_news`; there is no invalidation path.
    all: Option<Vec<NewsItem>>,
}

/// Holds the current page of news plus a memoized full list.
///
/// Unlike the comment store there is no request de-duplication here: a
/// second `fetch_news` while one is in flight simply runs, and the last
/// writer wins on the shared fields.
pub struct NewsStore {
    api: Arc<dyn NewsApi + Send + Sync>,
    state: Mutex<NewsState>,
}

impl NewsStore {
    pub fn new(api: Arc<dyn NewsApi + Send + Sync>) -> Self {
        Self {
            api,
            state: Mutex::new(NewsState::default()),
        }
    }

    fn state(&self) -> MutexGuard<'_, NewsState> {
        self.state.lock().expect("news store lock poisoned")
    }

    /// Replace the current page slice and total count. On failure the
    /// error message is recorded and the list is nulled.
    pub async fn fetch_news(&self, page: u32, per_page: u32) {
        {
            let mut st = self.state();
            st.loading = true;
            st.error = None;
        }

        let result = self.api.fetch_news(page, per_page).await;

        let mut st = self.state();
        match result {
            Ok(fetched) => {
                st.news = Some(fetched.items);
                st.total = fetched.total;
            }
            Err(e) => {
                tracing::warn!(page, per_page, "news fetch failed: {}", e);
                st.error = Some(format!("Failed to load news: {}", e));
                st.news = None;
            }
        }
        st.loading = false;
    }

    /// Fetch and cache the full sorted list, once. Skipped whenever a
    /// non-empty cached list already exists; this is memoization, not a
    /// staleness-aware cache.
    pub async fn ensure_all_news(&self) {
        {
            let mut st = self.state();
            if st.all.as_ref().is_some_and(|all| !all.is_empty()) {
                return;
            }
            st.loading = true;
            st.error = None;
        }

        let result = self.api.fetch_all_news().await;

        let mut st = self.state();
        match result {
            Ok(mut items) => {
                items.sort_by(|a, b| b.date_time.cmp(&a.date_time));
                st.total = items.len() as u64;
                st.all = Some(items);
            }
            Err(e) => {
                tracing::warn!("news fetch failed: {}", e);
                st.error = Some(format!("Failed to load news: {}", e));
            }
        }
        st.loading = false;
    }

    pub fn news(&self) -> Option<Vec<NewsItem>> {
        self.state().news.clone()
    }

    pub fn all_news(&self) -> Option<Vec<NewsItem>> {
        self.state().all.clone()
    }

    pub fn total(&self) -> u64 {
        self.state().total
    }

    pub fn is_loading(&self) -> bool {
        self.state().loading
    }

    pub fn error(&self) -> Option<String> {
        self.state().error.clone()
    }

    /// Look an item up by ID in the cached full list, falling back to the
    /// current page slice.
    pub fn find(&self, id: i64) -> Option<NewsItem> {
        let st = self.state();
        st.all
            .iter()
            .chain(st.news.iter())
            .flat_map(|list| list.iter())
            .find(|item| item.id == id)
            .cloned()
    }

    /// The cached full list narrowed by a status filter. Empty until
    /// `ensure_all_news` has succeeded.
    pub fn filtered(&self, filter: NewsFilter) -> Vec<NewsItem> {
        let st = self.state();
        st.all
            .iter()
            .flat_map(|list| list.iter())
            .filter(|item| filter.matches(item))
            .cloned()
            .collect()
    }
}
