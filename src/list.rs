//! Paginated list state machine: one fetcher per list view, driving
//! `Idle -> Loading -> {Loaded, Errored}` with explicit refreshes.
//!
//! Fetches are pull-based. Changing the page request never fetches by
//! itself; the caller decides when to call [`ListFetcher::refresh`] or
//! [`ListFetcher::load_page`]. Every refresh carries a generation number and
//! a response whose generation is no longer current is dropped, so a late
//! response can never overwrite newer state.

use crate::error::Error;
use crate::pagination::{PageEnvelope, PageRequest};
use log::debug;
use std::future::Future;
use std::sync::Mutex;

/// Where the list currently is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListPhase {
    /// No fetch issued yet
    Idle,
    /// A fetch is in flight
    Loading,
    /// The last fetch succeeded
    Loaded,
    /// The last fetch failed; previous items are kept for display
    Errored,
}

/// Pagination metadata of the most recent successful fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageMeta {
    pub page_number: u32,
    pub page_size: u32,
    pub total_records: u64,
    pub total_pages: u32,
    pub has_previous_page: bool,
    pub has_next_page: bool,
}

impl PageMeta {
    fn from_envelope<T>(envelope: &PageEnvelope<T>) -> Self {
        Self {
            page_number: envelope.page_number,
            page_size: envelope.page_size,
            total_records: envelope.total_records,
            total_pages: envelope.total_pages,
            has_previous_page: envelope.has_previous_page,
            has_next_page: envelope.has_next_page,
        }
    }
}

struct ListState<T> {
    phase: ListPhase,
    items: Vec<T>,
    meta: Option<PageMeta>,
    error: Option<String>,
    action_in_flight: bool,
    generation: u64,
}

/// Consistent copy of the fetcher state for rendering.
#[derive(Debug, Clone)]
pub struct ListSnapshot<T> {
    pub phase: ListPhase,
    pub items: Vec<T>,
    pub meta: Option<PageMeta>,
    pub error: Option<String>,
    pub action_in_flight: bool,
}

/// Drives one server-paginated list through its fetch lifecycle.
///
/// `fetch` is the resource-specific call taking a [`PageRequest`] to a
/// [`PageEnvelope`]. The fetcher owns the current request and the list
/// state; locks are internal and never held across an await.
pub struct ListFetcher<T, F> {
    fetch: F,
    request: Mutex<PageRequest>,
    state: Mutex<ListState<T>>,
}

impl<T, F> ListFetcher<T, F> {
    /// Fetcher starting idle on the default page request.
    pub fn new(fetch: F) -> Self {
        Self::with_request(fetch, PageRequest::default())
    }

    /// Fetcher starting idle on the given page request.
    pub fn with_request(fetch: F, request: PageRequest) -> Self {
        Self {
            fetch,
            request: Mutex::new(request),
            state: Mutex::new(ListState {
                phase: ListPhase::Idle,
                items: Vec::new(),
                meta: None,
                error: None,
                action_in_flight: false,
                generation: 0,
            }),
        }
    }

    /// Current page request
    pub fn request(&self) -> PageRequest {
        *self.request.lock().unwrap()
    }

    /// Replace the page request without fetching.
    pub fn set_request(&self, request: PageRequest) {
        *self.request.lock().unwrap() = request;
    }

    /// Current lifecycle phase
    pub fn phase(&self) -> ListPhase {
        self.state.lock().unwrap().phase
    }

    /// Error message of the last failed fetch or action
    pub fn error(&self) -> Option<String> {
        self.state.lock().unwrap().error.clone()
    }

    /// Metadata of the last successful fetch
    pub fn meta(&self) -> Option<PageMeta> {
        self.state.lock().unwrap().meta
    }

    /// Whether a mutating action is in flight
    pub fn action_in_flight(&self) -> bool {
        self.state.lock().unwrap().action_in_flight
    }

    /// Invalidate any in-flight fetch; its response will be dropped.
    pub fn invalidate(&self) {
        self.state.lock().unwrap().generation += 1;
    }
}

impl<T, F> ListFetcher<T, F>
where
    T: Clone,
{
    /// Rows of the last successful fetch
    pub fn items(&self) -> Vec<T> {
        self.state.lock().unwrap().items.clone()
    }

    /// Copy of the whole state for rendering
    pub fn snapshot(&self) -> ListSnapshot<T> {
        let state = self.state.lock().unwrap();
        ListSnapshot {
            phase: state.phase,
            items: state.items.clone(),
            meta: state.meta,
            error: state.error.clone(),
            action_in_flight: state.action_in_flight,
        }
    }
}

impl<T, F, Fut> ListFetcher<T, F>
where
    F: Fn(PageRequest) -> Fut,
    Fut: Future<Output = Result<PageEnvelope<T>, Error>>,
{
    /// Fetch the current page request.
    ///
    /// Enters `Loading` and clears the previous error before the call. On
    /// success the items and metadata are replaced; on failure the error
    /// message is recorded and the previous items stay untouched. A failure
    /// never propagates out of the fetcher.
    pub async fn refresh(&self) {
        let generation = {
            let mut state = self.state.lock().unwrap();
            state.generation += 1;
            state.phase = ListPhase::Loading;
            state.error = None;
            state.generation
        };
        let request = self.request();

        let result = (self.fetch)(request).await;

        let mut state = self.state.lock().unwrap();
        if state.generation != generation {
            debug!("dropping stale list response for page {}", request.page_number());
            return;
        }
        match result {
            Ok(envelope) => {
                let envelope = envelope.normalized();
                state.meta = Some(PageMeta::from_envelope(&envelope));
                state.items = envelope.items;
                state.phase = ListPhase::Loaded;
            }
            Err(err) => {
                debug!("list fetch failed: {err}");
                state.error = Some(err.user_message());
                state.phase = ListPhase::Errored;
            }
        }
    }

    /// Move to another page and fetch it.
    pub async fn load_page(&self, page_number: u32) {
        let request = self.request().with_page(page_number);
        self.set_request(request);
        self.refresh().await;
    }

    /// Run a mutating action against the listed resource.
    ///
    /// Sets the action-loading flag for the duration of the call. On success
    /// the list is re-fetched once with the current request so server-computed
    /// fields come back authoritative; on failure the error message is
    /// recorded and the items stay as they were. The action result is
    /// returned either way so the caller can raise a notification.
    pub async fn run_action<A, AFut, R>(&self, action: A) -> Result<R, Error>
    where
        A: FnOnce() -> AFut,
        AFut: Future<Output = Result<R, Error>>,
    {
        {
            let mut state = self.state.lock().unwrap();
            state.action_in_flight = true;
            state.error = None;
        }
        let result = action().await;
        match &result {
            Ok(_) => {
                self.state.lock().unwrap().action_in_flight = false;
                self.refresh().await;
            }
            Err(err) => {
                let mut state = self.state.lock().unwrap();
                state.action_in_flight = false;
                state.error = Some(err.user_message());
            }
        }
        result
    }
}
