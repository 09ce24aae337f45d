//! Request state container behind the list and detail views.
//!
//! Tracks loading/error/data per resource, guards against redundant fetches,
//! and discards detail results that arrive after the user moved on.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::debug;

use crate::cache::CacheMode;
use crate::market::MarketService;
use crate::search::SearchFilter;
use crate::{Asset, AssetDetail, AssetId, FetchError};

/// Loading/error/data triple for one resource.
///
/// `error` and a freshly written `data` never coexist: starting a request
/// clears the error and settling writes exactly one of the two.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestState<T> {
    data: Option<T>,
    is_loading: bool,
    error: Option<FetchError>,
}

impl<T> Default for RequestState<T> {
    fn default() -> Self {
        Self {
            data: None,
            is_loading: false,
            error: None,
        }
    }
}

impl<T> RequestState<T> {
    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    pub const fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn error(&self) -> Option<&FetchError> {
        self.error.as_ref()
    }

    pub fn error_message(&self) -> Option<String> {
        self.error.as_ref().map(FetchError::user_message)
    }

    /// Holds data and no error.
    pub fn is_settled_ok(&self) -> bool {
        self.data.is_some() && self.error.is_none()
    }

    fn begin(&mut self) {
        self.is_loading = true;
        self.error = None;
    }

    fn settle(&mut self, outcome: Result<T, FetchError>) {
        match outcome {
            Ok(data) => {
                self.data = Some(data);
                self.error = None;
            }
            Err(error) => {
                self.data = None;
                self.error = Some(error);
            }
        }
        self.is_loading = false;
    }
}

/// Detail request state plus the asset it belongs to.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetailState {
    request: RequestState<Arc<AssetDetail>>,
    active_id: Option<AssetId>,
}

impl DetailState {
    fn loading(id: AssetId) -> Self {
        let mut request = RequestState::default();
        request.begin();
        Self {
            request,
            active_id: Some(id),
        }
    }

    pub fn active_id(&self) -> Option<&AssetId> {
        self.active_id.as_ref()
    }

    pub fn request(&self) -> &RequestState<Arc<AssetDetail>> {
        &self.request
    }

    pub fn data(&self) -> Option<&Arc<AssetDetail>> {
        self.request.data()
    }

    pub const fn is_loading(&self) -> bool {
        self.request.is_loading()
    }

    pub fn error(&self) -> Option<&FetchError> {
        self.request.error()
    }

    fn is_active(&self, id: &AssetId) -> bool {
        self.active_id.as_ref() == Some(id)
    }
}

#[derive(Debug, Default)]
struct StoreState {
    list: RequestState<Arc<Vec<Asset>>>,
    detail: DetailState,
    search: SearchFilter,
}

/// State container shared by the rendering layer.
///
/// Every method takes `&self`; the internal lock is never held across an
/// await, so concurrent loads interleave only at fetch boundaries.
pub struct MarketStore {
    service: Arc<MarketService>,
    state: Mutex<StoreState>,
}

impl MarketStore {
    pub fn new(service: Arc<MarketService>) -> Self {
        Self {
            service,
            state: Mutex::new(StoreState::default()),
        }
    }

    pub fn service(&self) -> &Arc<MarketService> {
        &self.service
    }

    /// Load the listing unless a load is in flight or good data is present.
    pub async fn load_list(&self) {
        {
            let mut state = self.lock();
            if state.list.is_loading() || state.list.is_settled_ok() {
                debug!("list load skipped; already loading or loaded");
                return;
            }
            state.list.begin();
        }

        let in_flight = InFlight::list(self);
        let outcome = self.service.fetch_list().await;
        in_flight.finish();
        self.lock().list.settle(outcome);
    }

    /// Reload the listing from upstream regardless of cached or held data.
    ///
    /// An in-flight load still wins; the call is then a no-op.
    pub async fn force_reload_list(&self) {
        {
            let mut state = self.lock();
            if state.list.is_loading() {
                debug!("forced list reload skipped; load already in flight");
                return;
            }
            state.list.begin();
        }

        let in_flight = InFlight::list(self);
        let outcome = self.service.fetch_list_with(CacheMode::Refresh).await;
        in_flight.finish();
        self.lock().list.settle(outcome);
    }

    /// Load the detail record for `id`.
    ///
    /// No-op while the same id is loading or already loaded without error.
    /// A different id supersedes the current one; the superseded result is
    /// dropped when it settles.
    pub async fn load_detail(&self, id: AssetId) {
        {
            let mut state = self.lock();
            let detail = &state.detail;
            if detail.is_active(&id) && (detail.is_loading() || detail.request.is_settled_ok()) {
                debug!(id = %id, "detail load skipped; already loading or loaded");
                return;
            }
            state.detail = DetailState::loading(id.clone());
        }

        let in_flight = InFlight::detail(self, id.clone());
        let outcome = self.service.fetch_detail(&id).await;
        in_flight.finish();

        let mut state = self.lock();
        if !state.detail.is_active(&id) {
            debug!(id = %id, "discarding detail result for inactive asset");
            return;
        }
        state.detail.request.settle(outcome);
    }

    /// Reset detail state when leaving the detail view.
    pub fn clear_detail(&self) {
        self.lock().detail = DetailState::default();
    }

    pub fn clear_list_error(&self) {
        self.lock().list.error = None;
    }

    pub fn clear_detail_error(&self) {
        self.lock().detail.request.error = None;
    }

    pub fn set_search_term(&self, term: impl Into<String>) {
        self.lock().search.set(term);
    }

    pub fn clear_search(&self) {
        self.lock().search.clear();
    }

    pub fn search_term(&self) -> String {
        self.lock().search.term().to_owned()
    }

    pub fn list_state(&self) -> RequestState<Arc<Vec<Asset>>> {
        self.lock().list.clone()
    }

    pub fn detail_state(&self) -> DetailState {
        self.lock().detail.clone()
    }

    /// Listing projected through the current search term.
    pub fn filtered_list(&self) -> Arc<Vec<Asset>> {
        let state = self.lock();
        match state.list.data() {
            Some(list) => state.search.apply(list),
            None => Arc::new(Vec::new()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

enum Slot {
    List,
    Detail(AssetId),
}

/// Clears the loading flag of a load whose future is dropped before it
/// settles, so a timed-out or aborted caller never leaves the slot busy.
struct InFlight<'a> {
    store: &'a MarketStore,
    slot: Slot,
    finished: bool,
}

impl<'a> InFlight<'a> {
    fn list(store: &'a MarketStore) -> Self {
        Self {
            store,
            slot: Slot::List,
            finished: false,
        }
    }

    fn detail(store: &'a MarketStore, id: AssetId) -> Self {
        Self {
            store,
            slot: Slot::Detail(id),
            finished: false,
        }
    }

    fn finish(mut self) {
        self.finished = true;
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if self.finished {
            return;
        }

        let mut state = self.store.lock();
        match &self.slot {
            Slot::List => {
                debug!("list load abandoned before settling");
                state.list.is_loading = false;
            }
            Slot::Detail(id) if state.detail.is_active(id) => {
                debug!(id = %id, "detail load abandoned before settling");
                state.detail.request.is_loading = false;
            }
            Slot::Detail(_) => {}
        }
    }
}
