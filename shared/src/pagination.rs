//! Incremental fetch-on-scroll for ledger lists.
//!
//! `LoaderState` is the synchronous bookkeeping: it hands out a `FetchTicket`
//! when a fetch may start and folds the response back in when it finishes.
//! `PaginatedLoader` drives it against a `PageFetcher`.
//!
//! Rules:
//! - at most one fetch is in flight (`loading` gates `begin`)
//! - once the server reports `end`, nothing is fetched until `reset`
//! - a response for page ≤ 1 replaces the rows, any later page is appended
//! - a failed fetch leaves rows, page and end untouched
//! - `reset` bumps a generation counter; tickets from an older generation are
//!   discarded when their response finally arrives

use crate::error::ApiError;
use crate::{PageRequest, PageResponse};
use async_trait::async_trait;
use std::cell::{Ref, RefCell};
use std::rc::Rc;

/// Source of pages for a loader
#[async_trait(?Send)]
pub trait PageFetcher {
    type Row;

    async fn fetch_page(&self, request: PageRequest) -> Result<PageResponse<Self::Row>, ApiError>;
}

/// What a call to `request_next_page` ended up doing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// A fetch was already in flight, or there is nothing left to fetch
    Skipped,
    /// The first page arrived and replaced the row collection
    Replaced { rows: usize },
    /// A later page arrived and was appended
    Appended { rows: usize },
    /// The loader was reset while the fetch was in flight; the response was dropped
    Discarded,
}

/// Proof that a fetch was started, required to complete it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
    page: Option<u32>,
}

impl FetchTicket {
    /// Page being requested; `None` is the first page
    pub fn page(&self) -> Option<u32> {
        self.page
    }

    pub fn request(&self) -> PageRequest {
        PageRequest { page: self.page }
    }
}

/// Rows loaded so far plus the pagination cursor
#[derive(Debug, Clone)]
pub struct LoaderState<R> {
    rows: Vec<R>,
    page: Option<u32>,
    end: bool,
    loading: bool,
    /// A fetch has completed successfully since creation or the last reset
    loaded: bool,
    generation: u64,
}

impl<R> Default for LoaderState<R> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            page: None,
            end: false,
            loading: false,
            loaded: false,
            generation: 0,
        }
    }
}

impl<R> LoaderState<R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    /// Last page successfully loaded
    pub fn page(&self) -> Option<u32> {
        self.page
    }

    pub fn is_end(&self) -> bool {
        self.end
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// At least one response has been folded in, even an empty one without a page number
    pub fn has_loaded(&self) -> bool {
        self.loaded
    }

    /// A page has loaded and the server has not reported the end yet
    pub fn has_more(&self) -> bool {
        self.page.is_some() && !self.end
    }

    /// True when the state equals a freshly created one
    pub fn is_initial(&self) -> bool {
        !self.loaded && self.rows.is_empty() && self.page.is_none() && !self.end && !self.loading
    }

    /// Start a fetch if one is allowed right now
    pub fn begin(&mut self) -> Option<FetchTicket> {
        if self.loading || self.end {
            return None;
        }

        self.loading = true;
        Some(FetchTicket {
            generation: self.generation,
            page: self.page.map(|page| page + 1),
        })
    }

    /// Fold the result of a fetch started with `ticket` into the state
    pub fn complete(
        &mut self,
        ticket: FetchTicket,
        result: Result<PageResponse<R>, ApiError>,
    ) -> Result<LoadOutcome, ApiError> {
        if ticket.generation != self.generation {
            log::debug!("Dropping response for page {:?} issued before reset", ticket.page);
            return Ok(LoadOutcome::Discarded);
        }

        self.loading = false;
        let response = result?;

        let count = response.rows.len();
        let outcome = if response.page.map_or(true, |page| page <= 1) {
            self.rows = response.rows;
            LoadOutcome::Replaced { rows: count }
        } else {
            self.rows.extend(response.rows);
            LoadOutcome::Appended { rows: count }
        };

        self.page = response.page;
        self.end = response.end;
        self.loaded = true;
        Ok(outcome)
    }

    /// Back to the initial state; in-flight fetches become stale
    pub fn reset(&mut self) {
        self.rows.clear();
        self.page = None;
        self.end = false;
        self.loading = false;
        self.loaded = false;
        self.generation = self.generation.wrapping_add(1);
    }

    /// Whether the scroll trigger should ask for the next page
    pub fn should_load_more(&self, metrics: &ScrollMetrics, threshold_ratio: f64) -> bool {
        !self.loading && self.has_more() && metrics.is_near_bottom(threshold_ratio)
    }
}

/// Viewport geometry sampled when a scroll event fires
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollMetrics {
    /// Height of the rendered content
    pub content_height: f64,
    /// Height of the visible window
    pub viewport_height: f64,
    /// Current vertical scroll offset
    pub scroll_y: f64,
}

impl ScrollMetrics {
    /// The bottom of the viewport is within `threshold_ratio` viewports of the content end
    pub fn is_near_bottom(&self, threshold_ratio: f64) -> bool {
        let threshold = self.content_height - self.viewport_height * threshold_ratio;
        let position = self.scroll_y + self.viewport_height;
        position > threshold
    }
}

type ChangeCallback = Rc<dyn Fn()>;

/// Cloneable handle driving a `LoaderState` against a fetcher.
///
/// Clones share the same state, so a scroll handler and the owning view can
/// hold one each. An optional change callback runs whenever a fetch starts,
/// a live fetch finishes, or the loader is reset; it is never called while
/// the state is borrowed.
pub struct PaginatedLoader<F: PageFetcher> {
    fetcher: Rc<F>,
    state: Rc<RefCell<LoaderState<F::Row>>>,
    on_change: Rc<RefCell<Option<ChangeCallback>>>,
}

impl<F: PageFetcher> Clone for PaginatedLoader<F> {
    fn clone(&self) -> Self {
        Self {
            fetcher: Rc::clone(&self.fetcher),
            state: Rc::clone(&self.state),
            on_change: Rc::clone(&self.on_change),
        }
    }
}

impl<F: PageFetcher> PaginatedLoader<F> {
    pub fn new(fetcher: F) -> Self {
        Self {
            fetcher: Rc::new(fetcher),
            state: Rc::new(RefCell::new(LoaderState::new())),
            on_change: Rc::new(RefCell::new(None)),
        }
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    pub fn set_on_change(&self, callback: impl Fn() + 'static) {
        *self.on_change.borrow_mut() = Some(Rc::new(callback));
    }

    pub fn clear_on_change(&self) {
        self.on_change.borrow_mut().take();
    }

    fn notify(&self) {
        let callback = self.on_change.borrow().clone();
        if let Some(callback) = callback {
            callback();
        }
    }

    pub fn state(&self) -> Ref<'_, LoaderState<F::Row>> {
        self.state.borrow()
    }

    /// Fetch the next page, or the first one if nothing has loaded yet
    pub async fn request_next_page(&self) -> Result<LoadOutcome, ApiError> {
        let ticket = self.state.borrow_mut().begin();
        let Some(ticket) = ticket else {
            return Ok(LoadOutcome::Skipped);
        };
        self.notify();

        log::debug!("Requesting page {:?}", ticket.page());
        let result = self.fetcher.fetch_page(ticket.request()).await;
        if let Err(e) = &result {
            log::warn!("Page {:?} failed: {}", ticket.page(), e);
        }

        let outcome = self.state.borrow_mut().complete(ticket, result);
        if outcome != Ok(LoadOutcome::Discarded) {
            self.notify();
        }
        outcome
    }

    /// Scroll trigger: fetch only when near the bottom and more data is known to exist
    pub async fn load_more_if_needed(
        &self,
        metrics: ScrollMetrics,
        threshold_ratio: f64,
    ) -> Result<LoadOutcome, ApiError> {
        let wanted = self.state.borrow().should_load_more(&metrics, threshold_ratio);
        if !wanted {
            return Ok(LoadOutcome::Skipped);
        }
        self.request_next_page().await
    }

    pub fn reset(&self) {
        self.state.borrow_mut().reset();
        self.notify();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::collections::HashMap;

    fn init_logging() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn page(rows: Vec<u32>, page: Option<u32>, end: bool) -> PageResponse<u32> {
        PageResponse { rows, page, end }
    }

    /// Serves fixed pages keyed by requested page number and records every request
    struct FakeFetcher {
        pages: HashMap<Option<u32>, PageResponse<u32>>,
        requests: RefCell<Vec<PageRequest>>,
        fail_next: Cell<bool>,
    }

    impl FakeFetcher {
        fn new(pages: Vec<(Option<u32>, PageResponse<u32>)>) -> Self {
            Self {
                pages: pages.into_iter().collect(),
                requests: RefCell::new(Vec::new()),
                fail_next: Cell::new(false),
            }
        }

        fn request_count(&self) -> usize {
            self.requests.borrow().len()
        }
    }

    #[async_trait(?Send)]
    impl PageFetcher for FakeFetcher {
        type Row = u32;

        async fn fetch_page(&self, request: PageRequest) -> Result<PageResponse<u32>, ApiError> {
            self.requests.borrow_mut().push(request.clone());
            // Stay pending for one poll so callers can interleave
            tokio::task::yield_now().await;

            if self.fail_next.replace(false) {
                return Err(ApiError::Network("connection reset".to_string()));
            }
            self.pages
                .get(&request.page)
                .cloned()
                .ok_or_else(|| ApiError::Server {
                    status: 404,
                    message: "no such page".to_string(),
                })
        }
    }

    fn three_pages() -> FakeFetcher {
        FakeFetcher::new(vec![
            (None, page(vec![1, 2], Some(1), false)),
            (Some(2), page(vec![3, 4], Some(2), false)),
            (Some(3), page(vec![5], Some(3), true)),
        ])
    }

    #[test]
    fn test_begin_requests_first_page_then_next() {
        let mut state: LoaderState<u32> = LoaderState::new();

        let first = state.begin().unwrap();
        assert_eq!(first.page(), None);
        assert_eq!(first.request(), PageRequest { page: None });
        assert!(state.is_loading());
        assert!(state.begin().is_none());

        state.complete(first, Ok(page(vec![1], Some(1), false))).unwrap();
        let second = state.begin().unwrap();
        assert_eq!(second.page(), Some(2));
    }

    #[test]
    fn test_first_page_replaces_existing_rows() {
        let mut state: LoaderState<u32> = LoaderState::new();

        let ticket = state.begin().unwrap();
        state.complete(ticket, Ok(page(vec![1, 2], Some(1), false))).unwrap();
        let ticket = state.begin().unwrap();
        state.complete(ticket, Ok(page(vec![3], Some(2), false))).unwrap();

        // Server restarted pagination
        let ticket = state.begin().unwrap();
        let outcome = state.complete(ticket, Ok(page(vec![9], Some(1), false))).unwrap();

        assert_eq!(outcome, LoadOutcome::Replaced { rows: 1 });
        assert_eq!(state.rows(), &[9]);
    }

    #[test]
    fn test_missing_page_number_replaces_and_stops_scroll_trigger() {
        let mut state: LoaderState<u32> = LoaderState::new();

        let ticket = state.begin().unwrap();
        let outcome = state.complete(ticket, Ok(page(vec![1, 2, 3], None, false))).unwrap();

        assert_eq!(outcome, LoadOutcome::Replaced { rows: 3 });
        assert_eq!(state.page(), None);
        assert!(!state.has_more());
    }

    #[test]
    fn test_empty_response_without_page_counts_as_loaded() {
        let mut state: LoaderState<u32> = LoaderState::new();
        assert!(!state.has_loaded());

        let ticket = state.begin().unwrap();
        let outcome = state.complete(ticket, Ok(page(vec![], None, false))).unwrap();

        assert_eq!(outcome, LoadOutcome::Replaced { rows: 0 });
        assert!(state.has_loaded());
        assert!(!state.is_initial());
        assert!(!state.is_loading());

        state.reset();
        assert!(!state.has_loaded());
        assert!(state.is_initial());
    }

    #[test]
    fn test_failed_first_fetch_is_not_loaded() {
        let mut state: LoaderState<u32> = LoaderState::new();

        let ticket = state.begin().unwrap();
        let result = state.complete(ticket, Err(ApiError::Network("offline".to_string())));

        assert!(result.is_err());
        assert!(!state.has_loaded());
        assert!(!state.is_loading());
    }

    #[test]
    fn test_scroll_metrics_threshold() {
        let metrics = ScrollMetrics {
            content_height: 2000.0,
            viewport_height: 800.0,
            scroll_y: 1000.0,
        };
        // position 1800 vs threshold 1800: not past it yet
        assert!(!metrics.is_near_bottom(0.25));

        let metrics = ScrollMetrics { scroll_y: 1001.0, ..metrics };
        assert!(metrics.is_near_bottom(0.25));

        let metrics = ScrollMetrics { scroll_y: 0.0, ..metrics };
        assert!(!metrics.is_near_bottom(0.25));
    }

    #[test]
    fn test_should_load_more_requires_known_page() {
        let bottom = ScrollMetrics {
            content_height: 1000.0,
            viewport_height: 800.0,
            scroll_y: 200.0,
        };
        let mut state: LoaderState<u32> = LoaderState::new();
        assert!(!state.should_load_more(&bottom, 0.25));

        let ticket = state.begin().unwrap();
        assert!(!state.should_load_more(&bottom, 0.25));
        state.complete(ticket, Ok(page(vec![1], Some(1), false))).unwrap();
        assert!(state.should_load_more(&bottom, 0.25));

        let ticket = state.begin().unwrap();
        state.complete(ticket, Ok(page(vec![2], Some(2), true))).unwrap();
        assert!(!state.should_load_more(&bottom, 0.25));
    }

    #[tokio::test]
    async fn test_rows_are_concatenated_in_fetch_order() {
        init_logging();
        let loader = PaginatedLoader::new(three_pages());

        assert_eq!(loader.request_next_page().await, Ok(LoadOutcome::Replaced { rows: 2 }));
        assert_eq!(loader.request_next_page().await, Ok(LoadOutcome::Appended { rows: 2 }));
        assert_eq!(loader.request_next_page().await, Ok(LoadOutcome::Appended { rows: 1 }));

        let state = loader.state();
        assert_eq!(state.rows(), &[1, 2, 3, 4, 5]);
        assert_eq!(state.page(), Some(3));
        assert!(state.is_end());
        assert!(!state.is_loading());

        let requested: Vec<Option<u32>> = loader
            .fetcher()
            .requests
            .borrow()
            .iter()
            .map(|r| r.page)
            .collect();
        assert_eq!(requested, vec![None, Some(2), Some(3)]);
    }

    #[tokio::test]
    async fn test_no_requests_after_end() {
        let loader = PaginatedLoader::new(FakeFetcher::new(vec![(
            None,
            page(vec![1], Some(1), true),
        )]));

        loader.request_next_page().await.unwrap();
        for _ in 0..5 {
            assert_eq!(loader.request_next_page().await, Ok(LoadOutcome::Skipped));
        }
        assert_eq!(loader.fetcher().request_count(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_request_is_dropped() {
        let loader = PaginatedLoader::new(three_pages());

        let (first, second) = tokio::join!(loader.request_next_page(), loader.request_next_page());

        assert_eq!(first, Ok(LoadOutcome::Replaced { rows: 2 }));
        assert_eq!(second, Ok(LoadOutcome::Skipped));
        assert_eq!(loader.fetcher().request_count(), 1);
        assert_eq!(loader.state().rows(), &[1, 2]);
    }

    #[tokio::test]
    async fn test_failure_leaves_state_untouched() {
        let loader = PaginatedLoader::new(three_pages());
        loader.request_next_page().await.unwrap();

        loader.fetcher().fail_next.set(true);
        let result = loader.request_next_page().await;

        assert_eq!(result, Err(ApiError::Network("connection reset".to_string())));
        {
            let state = loader.state();
            assert_eq!(state.rows(), &[1, 2]);
            assert_eq!(state.page(), Some(1));
            assert!(!state.is_end());
            assert!(!state.is_loading());
        }

        // The same page is asked for again on retry
        assert_eq!(loader.request_next_page().await, Ok(LoadOutcome::Appended { rows: 2 }));
        assert_eq!(loader.state().rows(), &[1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn test_reset_discards_in_flight_response() {
        let loader = PaginatedLoader::new(three_pages());

        let (outcome, _) = tokio::join!(loader.request_next_page(), async {
            loader.reset();
        });

        assert_eq!(outcome, Ok(LoadOutcome::Discarded));
        assert!(loader.state().is_initial());
        assert!(loader.state().rows().is_empty());
    }

    #[tokio::test]
    async fn test_stale_response_does_not_clear_new_fetch() {
        let loader = PaginatedLoader::new(three_pages());

        let (stale, fresh) = tokio::join!(loader.request_next_page(), async {
            loader.reset();
            loader.request_next_page().await
        });

        assert_eq!(stale, Ok(LoadOutcome::Discarded));
        assert_eq!(fresh, Ok(LoadOutcome::Replaced { rows: 2 }));
        let state = loader.state();
        assert_eq!(state.rows(), &[1, 2]);
        assert_eq!(state.page(), Some(1));
        assert!(!state.is_loading());
    }

    #[tokio::test]
    async fn test_reset_after_loading_returns_initial_state() {
        let loader = PaginatedLoader::new(three_pages());
        loader.request_next_page().await.unwrap();
        loader.request_next_page().await.unwrap();

        loader.reset();

        let state = loader.state();
        assert!(state.is_initial());
        assert_eq!(state.page(), None);
        assert!(!state.is_end());
        assert!(!state.is_loading());
    }

    #[tokio::test]
    async fn test_change_callback_sees_start_and_finish() {
        let loader = PaginatedLoader::new(three_pages());
        let seen: Rc<RefCell<Vec<bool>>> = Rc::new(RefCell::new(Vec::new()));
        {
            let observer = loader.clone();
            let seen = Rc::clone(&seen);
            loader.set_on_change(move || seen.borrow_mut().push(observer.state().is_loading()));
        }

        loader.request_next_page().await.unwrap();
        assert_eq!(*seen.borrow(), vec![true, false]);

        loader.clear_on_change();
        loader.reset();
        assert_eq!(seen.borrow().len(), 2);
    }

    #[tokio::test]
    async fn test_scroll_trigger_needs_first_page() {
        let loader = PaginatedLoader::new(three_pages());
        let bottom = ScrollMetrics {
            content_height: 1000.0,
            viewport_height: 800.0,
            scroll_y: 400.0,
        };

        assert_eq!(loader.load_more_if_needed(bottom, 0.25).await, Ok(LoadOutcome::Skipped));
        assert_eq!(loader.fetcher().request_count(), 0);

        loader.request_next_page().await.unwrap();
        assert_eq!(
            loader.load_more_if_needed(bottom, 0.25).await,
            Ok(LoadOutcome::Appended { rows: 2 })
        );

        let top = ScrollMetrics { scroll_y: 0.0, ..bottom };
        assert_eq!(loader.load_more_if_needed(top, 0.25).await, Ok(LoadOutcome::Skipped));
        assert_eq!(loader.fetcher().request_count(), 2);
    }
}
