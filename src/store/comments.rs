use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;

use crate::api::NewsApi;
use crate::domain::{CommentDraft, CommentItem, Vote, VoteDelta};
use crate::pagination::{page_count, DEFAULT_COMMENT_LIMIT};
use crate::store::persist;

/// Remote pagination state for one news item's comments.
///
/// `page == 0` means nothing has been fetched yet.
#[derive(Debug, Clone)]
pub struct CommentSlot {
    pub items: Vec<CommentItem>,
    pub page: u32,
    pub pages: u32,
    pub total: u64,
    /// Page size remembered from the last fetch.
    pub limit: u32,
    pub loading: bool,
    pub error: Option<String>,
}

impl Default for CommentSlot {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            page: 0,
            pages: 0,
            total: 0,
            limit: DEFAULT_COMMENT_LIMIT,
            loading: false,
            error: None,
        }
    }
}

#[derive(Default)]
struct CommentState {
    slots: HashMap<i64, CommentSlot>,
    local: HashMap<i64, Vec<CommentItem>>,
}

#[derive(Clone, Copy, PartialEq)]
enum PageMode {
    Replace,
    Append,
}

/// Per-news paginated comment cache plus the per-news list of local
/// (client-only, never synced) comments.
///
/// Slots are created lazily on first access and only ever cleared through
/// [`clear_local`](CommentStore::clear_local); fetch failures record an
/// error message on the slot and leave previously loaded items intact.
///
/// State lives behind a mutex that is never held across an await; the
/// `loading` flag on each slot is the cooperative mutual-exclusion check
/// that keeps at most one fetch per slot in flight.
pub struct CommentStore {
    api: Arc<dyn NewsApi + Send + Sync>,
    cache_path: Option<PathBuf>,
    state: Mutex<CommentState>,
}

impl CommentStore {
    pub fn new(api: Arc<dyn NewsApi + Send + Sync>) -> Self {
        Self {
            api,
            cache_path: None,
            state: Mutex::new(CommentState::default()),
        }
    }

    /// Like [`new`](CommentStore::new), but local comments are loaded from
    /// and re-saved to `path`. Loading is best-effort: an unreadable cache
    /// logs a warning and starts empty.
    pub fn with_cache(api: Arc<dyn NewsApi + Send + Sync>, path: PathBuf) -> Self {
        let local = match persist::load(&path) {
            Ok(local) => local,
            Err(e) => {
                tracing::warn!("failed to load local comments from {:?}: {}", path, e);
                HashMap::new()
            }
        };

        Self {
            api,
            cache_path: Some(path),
            state: Mutex::new(CommentState {
                slots: HashMap::new(),
                local,
            }),
        }
    }

    fn state(&self) -> MutexGuard<'_, CommentState> {
        self.state.lock().expect("comment store lock poisoned")
    }

    fn save_cache(&self, state: &CommentState) {
        if let Some(path) = &self.cache_path {
            if let Err(e) = persist::save(path, &state.local) {
                tracing::warn!("failed to save local comments to {:?}: {}", path, e);
            }
        }
    }

    // ------- Remote pagination -------

    /// Fetch page 1, replacing whatever the slot held. No-op while a fetch
    /// for this slot is already in flight.
    pub async fn fetch_first_page(&self, news_id: i64, limit: u32) {
        self.fetch_page(news_id, 1, limit, PageMode::Replace).await
    }

    /// Fetch the page after the current one, appending to the slot. No-op
    /// while loading or when already at the last known page; an untouched
    /// slot (`page == 0`, `pages == 0`) also no-ops and wants
    /// [`fetch_first_page`](CommentStore::fetch_first_page) instead, while
    /// a news item with no slot at all is delegated there directly.
    pub async fn fetch_next_page(&self, news_id: i64, limit: u32) {
        let next = {
            let st = self.state();
            match st.slots.get(&news_id) {
                None => None,
                Some(slot) => {
                    if slot.loading || slot.page >= slot.pages {
                        return;
                    }
                    Some(slot.page + 1)
                }
            }
        };

        match next {
            Some(page) => self.fetch_page(news_id, page, limit, PageMode::Append).await,
            None => self.fetch_first_page(news_id, limit).await,
        }
    }

    async fn fetch_page(&self, news_id: i64, page: u32, limit: u32, mode: PageMode) {
        {
            let mut st = self.state();
            let slot = st.slots.entry(news_id).or_default();
            if slot.loading {
                return;
            }
            slot.loading = true;
            slot.error = None;
        }

        let result = self.api.fetch_comments(news_id, page, limit).await;

        let mut st = self.state();
        let slot = st.slots.entry(news_id).or_default();
        match result {
            Ok(fetched) => {
                match mode {
                    PageMode::Replace => slot.items = fetched.items,
                    PageMode::Append => slot.items.extend(fetched.items),
                }
                slot.page = page;
                slot.pages = fetched.pages;
                slot.total = fetched.total;
                slot.limit = limit;
            }
            Err(e) => {
                tracing::warn!(news_id, page, "comment fetch failed: {}", e);
                slot.error = Some(format!("Failed to load comments: {}", e));
            }
        }
        slot.loading = false;
    }

    // ------- Reads -------

    /// Snapshot of the slot, or the default empty slot when none exists.
    pub fn meta(&self, news_id: i64) -> CommentSlot {
        self.state().slots.get(&news_id).cloned().unwrap_or_default()
    }

    pub fn has_more(&self, news_id: i64) -> bool {
        self.state()
            .slots
            .get(&news_id)
            .is_some_and(|slot| slot.page < slot.pages)
    }

    pub fn local_count(&self, news_id: i64) -> usize {
        self.state().local.get(&news_id).map_or(0, |list| list.len())
    }

    /// The merged view for display. While the remote slot is absent or
    /// still at its first page, local comments are shown above all remote
    /// ones. Past page 1 the view degrades to remote-only: the local
    /// entries were already visible on the first page and are not spliced
    /// into later pages, which would show them twice.
    pub fn combined_list(&self, news_id: i64) -> Vec<CommentItem> {
        let st = self.state();
        let local = st.local.get(&news_id).cloned().unwrap_or_default();
        match st.slots.get(&news_id) {
            Some(slot) if slot.page > 1 => slot.items.clone(),
            Some(slot) => local.into_iter().chain(slot.items.iter().cloned()).collect(),
            None => local,
        }
    }

    /// Slot metadata with local comments counted in: total grows by the
    /// local count and pages are recomputed over the remembered limit.
    pub fn combined_meta(&self, news_id: i64) -> CommentSlot {
        let mut meta = self.meta(news_id);
        meta.total += self.local_count(news_id) as u64;
        meta.pages = page_count(meta.total, meta.limit);
        meta
    }

    /// Fake/real counts among this news item's local comments, for
    /// blending into displayed tallies without touching the server-sourced
    /// counters.
    pub fn local_vote_delta(&self, news_id: i64) -> VoteDelta {
        let st = self.state();
        let mut delta = VoteDelta::default();
        for comment in st.local.get(&news_id).into_iter().flatten() {
            match comment.vote {
                Vote::Fake => delta.fake += 1,
                Vote::Real => delta.real += 1,
            }
        }
        delta
    }

    // ------- Local-only comments -------

    /// Insert a client-only comment at the front of its news item's local
    /// list and return its assigned ID. IDs are allocated by decrementing
    /// the minimum existing local ID, starting at -1, so they can never
    /// collide with a server-assigned (positive) ID.
    pub fn add_local(&self, draft: CommentDraft) -> i64 {
        let mut st = self.state();
        let list = st.local.entry(draft.news_id).or_default();

        let min_id = list.iter().map(|c| c.id).min().unwrap_or(0).min(0);
        let id = min_id - 1;

        let comment = CommentItem {
            id,
            news_id: draft.news_id,
            user: draft.user,
            vote: draft.vote,
            comment: draft.comment,
            attachments: draft.attachments,
            created_at: draft.created_at.or_else(|| Some(Utc::now())),
        };
        list.insert(0, comment);

        self.save_cache(&st);
        id
    }

    /// Remove one local comment by ID; no-op when absent.
    pub fn remove_local(&self, news_id: i64, id: i64) {
        let mut st = self.state();
        if let Some(list) = st.local.get_mut(&news_id) {
            list.retain(|c| c.id != id);
        }
        self.save_cache(&st);
    }

    /// Clear one news item's local comments, or every local list when no
    /// news item is given.
    pub fn clear_local(&self, news_id: Option<i64>) {
        let mut st = self.state();
        match news_id {
            Some(news_id) => {
                st.local.remove(&news_id);
            }
            None => st.local.clear(),
        }
        self.save_cache(&st);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::fake::{comment_item, FakeApi};
    use std::sync::atomic::Ordering;
    use std::time::Duration;

    fn draft(news_id: i64, vote: Vote) -> CommentDraft {
        CommentDraft::new(news_id, "a", vote, "x")
    }

    #[tokio::test]
    async fn test_three_page_walk_over_45_items() {
        let api = Arc::new(FakeApi::with_comments(42, 45));
        let store = CommentStore::new(api.clone());

        store.fetch_first_page(42, 20).await;
        let meta = store.meta(42);
        assert_eq!(meta.page, 1);
        assert_eq!(meta.pages, 3);
        assert_eq!(meta.total, 45);
        assert_eq!(meta.items.len(), 20);
        assert!(store.has_more(42));

        store.fetch_next_page(42, 20).await;
        let meta = store.meta(42);
        assert_eq!(meta.page, 2);
        assert_eq!(meta.pages, 3);
        assert_eq!(meta.items.len(), 40);

        store.fetch_next_page(42, 20).await;
        let meta = store.meta(42);
        assert_eq!(meta.page, 3);
        assert_eq!(meta.items.len(), 45);
        assert!(!store.has_more(42));

        // page(3) >= pages(3): nothing further may be requested
        let calls = api.calls.load(Ordering::SeqCst);
        store.fetch_next_page(42, 20).await;
        assert_eq!(api.calls.load(Ordering::SeqCst), calls);
        assert_eq!(store.meta(42).page, 3);
    }

    #[tokio::test]
    async fn test_first_page_replaces_items() {
        let api = Arc::new(FakeApi::with_comments(7, 30));
        let store = CommentStore::new(api);

        store.fetch_first_page(7, 20).await;
        store.fetch_next_page(7, 20).await;
        assert_eq!(store.meta(7).items.len(), 30);

        store.fetch_first_page(7, 20).await;
        let meta = store.meta(7);
        assert_eq!(meta.page, 1);
        assert_eq!(meta.items.len(), 20);
    }

    #[tokio::test]
    async fn test_next_page_on_unknown_slot_fetches_first_page() {
        let api = Arc::new(FakeApi::with_comments(7, 5));
        let store = CommentStore::new(api);

        store.fetch_next_page(7, 20).await;

        let meta = store.meta(7);
        assert_eq!(meta.page, 1);
        assert_eq!(meta.items.len(), 5);
    }

    #[tokio::test]
    async fn test_reentrant_fetch_is_a_no_op() {
        let mut api = FakeApi::with_comments(7, 5);
        api.delay = Some(Duration::from_millis(20));
        let api = Arc::new(api);
        let store = CommentStore::new(api.clone());

        tokio::join!(store.fetch_first_page(7, 20), store.fetch_first_page(7, 20));

        assert_eq!(api.calls.load(Ordering::SeqCst), 1);
        assert_eq!(store.meta(7).page, 1);
    }

    #[tokio::test]
    async fn test_failure_keeps_previous_items() {
        let api = Arc::new(FakeApi::with_comments(7, 45));
        let store = CommentStore::new(api.clone());

        store.fetch_first_page(7, 20).await;
        assert_eq!(store.meta(7).items.len(), 20);

        api.fail.store(true, Ordering::SeqCst);
        store.fetch_next_page(7, 20).await;

        let meta = store.meta(7);
        assert_eq!(meta.items.len(), 20);
        assert_eq!(meta.page, 1);
        assert!(meta.error.unwrap().starts_with("Failed to load comments"));
        assert!(!meta.loading);

        // a later successful fetch clears the error
        api.fail.store(false, Ordering::SeqCst);
        store.fetch_next_page(7, 20).await;
        let meta = store.meta(7);
        assert_eq!(meta.page, 2);
        assert!(meta.error.is_none());
    }

    #[tokio::test]
    async fn test_failed_first_fetch_leaves_untouched_slot() {
        let api = Arc::new(FakeApi::new());
        api.fail.store(true, Ordering::SeqCst);
        let store = CommentStore::new(api.clone());

        store.fetch_first_page(7, 20).await;
        let meta = store.meta(7);
        assert_eq!(meta.page, 0);
        assert!(meta.error.is_some());

        // page(0) >= pages(0): next-page wants a first fetch instead
        let calls = api.calls.load(Ordering::SeqCst);
        store.fetch_next_page(7, 20).await;
        assert_eq!(api.calls.load(Ordering::SeqCst), calls);
    }

    #[test]
    fn test_local_ids_strictly_decreasing() {
        let store = CommentStore::new(Arc::new(FakeApi::new()));

        let ids: Vec<i64> = (0..5).map(|_| store.add_local(draft(42, Vote::Fake))).collect();
        assert_eq!(ids, vec![-1, -2, -3, -4, -5]);
        assert_eq!(store.local_count(42), 5);

        // allocation is per news item
        assert_eq!(store.add_local(draft(43, Vote::Real)), -1);
    }

    #[test]
    fn test_add_then_remove_round_trips() {
        let store = CommentStore::new(Arc::new(FakeApi::new()));

        store.add_local(draft(42, Vote::Fake));
        let before = store.combined_list(42);

        let id = store.add_local(draft(42, Vote::Real));
        store.remove_local(42, id);

        let after = store.combined_list(42);
        assert_eq!(before.len(), after.len());
        assert_eq!(before[0].id, after[0].id);

        // removing an unknown id is a no-op
        store.remove_local(42, -99);
        store.remove_local(99, -1);
        assert_eq!(store.local_count(42), 1);
    }

    #[test]
    fn test_newest_local_comment_first() {
        let store = CommentStore::new(Arc::new(FakeApi::new()));
        store.add_local(CommentDraft::new(42, "a", Vote::Fake, "first"));
        store.add_local(CommentDraft::new(42, "b", Vote::Fake, "second"));

        let list = store.combined_list(42);
        assert_eq!(list[0].comment, "second");
        assert_eq!(list[1].comment, "first");
    }

    #[tokio::test]
    async fn test_combined_list_merges_only_at_first_page() {
        let api = Arc::new(FakeApi::with_comments(42, 45));
        let store = CommentStore::new(api);

        let local_id = store.add_local(draft(42, Vote::Fake));

        // no slot yet: local only
        assert_eq!(store.combined_list(42).len(), 1);

        store.fetch_first_page(42, 20).await;
        let list = store.combined_list(42);
        assert_eq!(list.len(), 21);
        assert_eq!(list[0].id, local_id);
        assert!(list[0].is_local());

        // past page 1 the local comment drops out of the merged view
        store.fetch_next_page(42, 20).await;
        let list = store.combined_list(42);
        assert_eq!(list.len(), 40);
        assert!(list.iter().all(|c| !c.is_local()));
    }

    #[tokio::test]
    async fn test_combined_meta_counts_local_comments() {
        let api = Arc::new(FakeApi::with_comments(42, 40));
        let store = CommentStore::new(api);

        store.fetch_first_page(42, 20).await;
        assert_eq!(store.combined_meta(42).pages, 2);

        store.add_local(draft(42, Vote::Fake));
        let meta = store.combined_meta(42);
        assert_eq!(meta.total, 41);
        assert_eq!(meta.pages, 3);
    }

    #[test]
    fn test_local_vote_delta() {
        let store = CommentStore::new(Arc::new(FakeApi::new()));
        store.add_local(draft(42, Vote::Fake));
        store.add_local(draft(42, Vote::Fake));
        store.add_local(draft(42, Vote::Real));

        let delta = store.local_vote_delta(42);
        assert_eq!(delta.fake, 2);
        assert_eq!(delta.real, 1);
        assert_eq!(store.local_vote_delta(99), VoteDelta::default());
    }

    #[test]
    fn test_clear_local_one_or_all() {
        let store = CommentStore::new(Arc::new(FakeApi::new()));
        store.add_local(draft(1, Vote::Fake));
        store.add_local(draft(2, Vote::Real));

        store.clear_local(Some(1));
        assert_eq!(store.local_count(1), 0);
        assert_eq!(store.local_count(2), 1);

        store.clear_local(None);
        assert_eq!(store.local_count(2), 0);
    }

    #[test]
    fn test_local_comments_persist_across_stores() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("local_comments.json");

        let store = CommentStore::with_cache(Arc::new(FakeApi::new()), path.clone());
        let id = store.add_local(draft(42, Vote::Fake));

        let reloaded = CommentStore::with_cache(Arc::new(FakeApi::new()), path);
        assert_eq!(reloaded.local_count(42), 1);
        assert_eq!(reloaded.combined_list(42)[0].id, id);

        // a fresh allocation continues below the persisted minimum
        assert_eq!(reloaded.add_local(draft(42, Vote::Real)), -2);
    }

    #[tokio::test]
    async fn test_total_header_fallback_caps_pagination() {
        // backend that never reports a total: the adapter falls back to
        // the page length, so one full page is all the store ever sees
        let mut api = FakeApi::with_comments(42, 45);
        api.omit_total = true;
        let store = CommentStore::new(Arc::new(api));

        store.fetch_first_page(42, 20).await;
        let meta = store.meta(42);
        assert_eq!(meta.total, 20);
        assert_eq!(meta.pages, 1);
        assert!(!store.has_more(42));
    }

    #[test]
    fn test_comment_adds_creation_time_when_missing() {
        let store = CommentStore::new(Arc::new(FakeApi::new()));
        store.add_local(draft(42, Vote::Fake));
        assert!(store.combined_list(42)[0].created_at.is_some());
    }

    #[tokio::test]
    async fn test_slots_are_independent() {
        let mut api = FakeApi::with_comments(1, 25);
        api.comments.insert(2, (1..=5).map(|i| comment_item(2, i)).collect());
        let api = Arc::new(api);
        let store = CommentStore::new(api);

        tokio::join!(store.fetch_first_page(1, 20), store.fetch_first_page(2, 20));

        assert_eq!(store.meta(1).items.len(), 20);
        assert_eq!(store.meta(2).items.len(), 5);
        assert!(store.has_more(1));
        assert!(!store.has_more(2));
    }
}
