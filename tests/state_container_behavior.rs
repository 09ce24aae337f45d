//! Behavior-driven tests for the request state container
//!
//! These tests drive `MarketStore` the way the list and detail views do and
//! check what the views would observe: loading flags, data, errors, and the
//! filtered listing.

use std::sync::Arc;
use std::time::Duration;

use coinpulse_core::{
    AssetId, ClientConfig, FetchErrorKind, HttpClient, HttpError, HttpResponse, MarketService,
    MarketStore, ScriptedHttpClient,
};
use serde_json::json;

fn three_asset_list() -> HttpResponse {
    HttpResponse::ok_json(
        json!([
            { "id": "bitcoin", "symbol": "btc", "name": "Bitcoin", "current_price": 250000.0 },
            { "id": "ethereum", "symbol": "eth", "name": "Ethereum", "current_price": 15000.0 },
            { "id": "wrapped-bitcoin", "symbol": "wbtc", "name": "Wrapped Bitcoin", "current_price": 249000.0 }
        ])
        .to_string(),
    )
}

fn detail(id: &str, name: &str) -> HttpResponse {
    HttpResponse::ok_json(json!({ "id": id, "symbol": id, "name": name }).to_string())
}

fn shared_service(client: &Arc<ScriptedHttpClient>) -> Arc<MarketService> {
    let http: Arc<dyn HttpClient> = client.clone();
    Arc::new(MarketService::with_http_client(ClientConfig::default(), http))
}

fn id(value: &str) -> AssetId {
    AssetId::parse(value).expect("valid asset id")
}

// =============================================================================
// Deduplication
// =============================================================================

#[tokio::test(start_paused = true)]
async fn when_list_load_is_triggered_twice_concurrently_system_fetches_once() {
    // Given: A slow upstream listing
    let client = Arc::new(ScriptedHttpClient::new());
    client.push_delayed(Ok(three_asset_list()), Duration::from_secs(2));
    let store = MarketStore::new(shared_service(&client));

    // When: Two views trigger a list load at the same time
    tokio::join!(store.load_list(), store.load_list());

    // Then: Exactly one upstream call is made and the list is settled
    assert_eq!(client.call_count(), 1);
    let list = store.list_state();
    assert!(!list.is_loading());
    assert_eq!(list.data().map(|assets| assets.len()), Some(3));
}

#[tokio::test(start_paused = true)]
async fn when_list_is_in_flight_system_reports_loading() {
    // Given: A slow upstream listing
    let client = Arc::new(ScriptedHttpClient::new());
    client.push_delayed(Ok(three_asset_list()), Duration::from_secs(5));
    let store = MarketStore::new(shared_service(&client));

    // When: The state is observed halfway through the request
    let (_, observed) = tokio::join!(store.load_list(), async {
        tokio::time::sleep(Duration::from_secs(1)).await;
        store.list_state()
    });

    // Then: Loading is set and no error or data is visible yet
    assert!(observed.is_loading());
    assert!(observed.error().is_none());
    assert!(observed.data().is_none());
    assert!(!store.list_state().is_loading());
}

#[tokio::test(start_paused = true)]
async fn when_caller_gives_up_on_list_load_system_allows_a_fresh_load() {
    // Given: A listing that takes 30s and a caller that waits only 5s
    let client = Arc::new(ScriptedHttpClient::new());
    client
        .push_delayed(Ok(three_asset_list()), Duration::from_secs(30))
        .push_response(three_asset_list());
    let store = MarketStore::new(shared_service(&client));

    // When: The caller times out and drops the load
    let gave_up = tokio::time::timeout(Duration::from_secs(5), store.load_list()).await;

    // Then: The list is idle again and the next load reaches upstream
    assert!(gave_up.is_err());
    assert!(!store.list_state().is_loading());

    store.load_list().await;
    let list = store.list_state();
    assert!(!list.is_loading());
    assert_eq!(list.data().map(|assets| assets.len()), Some(3));
    assert_eq!(client.call_count(), 2);
}

#[tokio::test(start_paused = true)]
async fn when_forced_reload_is_aborted_system_keeps_previous_data_and_recovers() {
    // Given: A loaded list and a slow refresh
    let client = Arc::new(ScriptedHttpClient::new());
    client
        .push_response(three_asset_list())
        .push_delayed(Ok(three_asset_list()), Duration::from_secs(30))
        .push_response(three_asset_list());
    let store = MarketStore::new(shared_service(&client));
    store.load_list().await;

    // When: The refresh is abandoned midway
    let gave_up = tokio::time::timeout(Duration::from_secs(5), store.force_reload_list()).await;

    // Then: Prior data is still shown and another refresh goes through
    assert!(gave_up.is_err());
    let list = store.list_state();
    assert!(!list.is_loading());
    assert_eq!(list.data().map(|assets| assets.len()), Some(3));

    store.force_reload_list().await;
    assert_eq!(client.call_count(), 3);
    assert!(store.list_state().is_settled_ok());
}

// =============================================================================
// End-to-end: loaded list is reused
// =============================================================================

#[tokio::test(start_paused = true)]
async fn when_list_is_loaded_again_within_ttl_system_makes_no_upstream_call() {
    // Given: A list that loaded successfully
    let client = Arc::new(ScriptedHttpClient::new());
    client.push_response(three_asset_list());
    let service = shared_service(&client);
    let store = MarketStore::new(Arc::clone(&service));
    store.load_list().await;
    let first = store.list_state().data().cloned().expect("list data");

    // When: The list is loaded again, and a fresh store asks for it too
    store.load_list().await;
    let other_view = MarketStore::new(service);
    other_view.load_list().await;

    // Then: The transport was hit once and both stores hold the same data
    assert_eq!(client.call_count(), 1);
    let again = store.list_state().data().cloned().expect("list data");
    let cached = other_view.list_state().data().cloned().expect("cached data");
    assert!(Arc::ptr_eq(&first, &again));
    assert!(Arc::ptr_eq(&first, &cached));
}

// =============================================================================
// Stale detail discard
// =============================================================================

#[tokio::test(start_paused = true)]
async fn when_user_switches_asset_mid_flight_system_keeps_latest_detail() {
    // Given: A slow bitcoin detail followed by a fast ethereum detail
    let client = Arc::new(ScriptedHttpClient::new());
    client
        .push_delayed(Ok(detail("bitcoin", "Bitcoin")), Duration::from_secs(10))
        .push_response(detail("ethereum", "Ethereum"));
    let store = MarketStore::new(shared_service(&client));

    // When: The user opens bitcoin, then ethereum before bitcoin arrives
    tokio::join!(store.load_detail(id("bitcoin")), async {
        tokio::time::sleep(Duration::from_secs(1)).await;
        store.load_detail(id("ethereum")).await;
    });

    // Then: The late bitcoin payload never overwrites ethereum
    let state = store.detail_state();
    assert_eq!(client.call_count(), 2);
    assert_eq!(state.active_id(), Some(&id("ethereum")));
    assert_eq!(state.data().map(|detail| detail.name.as_str()), Some("Ethereum"));
    assert!(!state.is_loading());
    assert!(state.error().is_none());
}

#[tokio::test(start_paused = true)]
async fn when_superseded_detail_fails_late_system_ignores_the_error() {
    // Given: A slow failing bitcoin detail followed by a fast ethereum detail
    let client = Arc::new(ScriptedHttpClient::new());
    client
        .push_delayed(Err(HttpError::timeout("request timeout")), Duration::from_secs(10))
        .push_response(detail("ethereum", "Ethereum"));
    let store = MarketStore::new(shared_service(&client));

    // When: The user moves on to ethereum before the failure lands
    tokio::join!(store.load_detail(id("bitcoin")), async {
        tokio::time::sleep(Duration::from_secs(1)).await;
        store.load_detail(id("ethereum")).await;
    });

    // Then: The ethereum view shows data and no error
    let state = store.detail_state();
    assert!(state.error().is_none());
    assert_eq!(state.data().map(|detail| detail.id.clone()), Some(id("ethereum")));
}

#[tokio::test(start_paused = true)]
async fn when_detail_view_is_left_system_resets_detail_state() {
    // Given: A loaded detail
    let client = Arc::new(ScriptedHttpClient::new());
    client
        .push_response(detail("bitcoin", "Bitcoin"))
        .push_response(detail("ethereum", "Ethereum"));
    let store = MarketStore::new(shared_service(&client));
    store.load_detail(id("bitcoin")).await;

    // When: The view is left and another asset is opened
    store.clear_detail();
    let cleared = store.detail_state();
    store.load_detail(id("ethereum")).await;

    // Then: Nothing from bitcoin flashes on the next detail view
    assert!(cleared.data().is_none());
    assert!(cleared.active_id().is_none());
    assert_eq!(
        store.detail_state().data().map(|detail| detail.name.as_str()),
        Some("Ethereum")
    );
}

// =============================================================================
// Filtering
// =============================================================================

#[tokio::test(start_paused = true)]
async fn when_search_term_is_set_system_filters_by_name_or_symbol() {
    // Given: A loaded list of three assets
    let client = Arc::new(ScriptedHttpClient::new());
    client.push_response(three_asset_list());
    let store = MarketStore::new(shared_service(&client));
    store.load_list().await;

    // When: The user searches for "BTC"
    store.set_search_term("BTC");
    let filtered = store.filtered_list();

    // Then: Matching entries keep their listing order
    let names: Vec<_> = filtered.iter().map(|asset| asset.name.as_str()).collect();
    assert_eq!(names, vec!["Bitcoin", "Wrapped Bitcoin"]);
    assert_eq!(client.call_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn when_search_is_cleared_system_returns_full_list_unchanged() {
    // Given: A loaded list with an active search
    let client = Arc::new(ScriptedHttpClient::new());
    client.push_response(three_asset_list());
    let store = MarketStore::new(shared_service(&client));
    store.load_list().await;
    store.set_search_term("ether");
    assert_eq!(store.filtered_list().len(), 1);

    // When: The search is cleared
    store.clear_search();

    // Then: The filtered view is the stored list itself
    let data = store.list_state().data().cloned().expect("list data");
    assert!(Arc::ptr_eq(&store.filtered_list(), &data));
    assert_eq!(data.len(), 3);
}

#[tokio::test(start_paused = true)]
async fn when_nothing_matches_system_returns_empty_without_touching_data() {
    // Given: A loaded list
    let client = Arc::new(ScriptedHttpClient::new());
    client.push_response(three_asset_list());
    let store = MarketStore::new(shared_service(&client));
    store.load_list().await;

    // When: The term matches nothing
    store.set_search_term("dogecoin");

    // Then: The projection is empty and the stored list is intact
    assert!(store.filtered_list().is_empty());
    assert_eq!(store.list_state().data().map(|assets| assets.len()), Some(3));
    assert_eq!(store.search_term(), "dogecoin");
}

// =============================================================================
// Error surfacing
// =============================================================================

#[tokio::test(start_paused = true)]
async fn when_list_is_rate_limited_system_shows_wait_message_without_data() {
    // Given: Upstream answers 429
    let client = Arc::new(ScriptedHttpClient::new());
    client.push_response(HttpResponse::new(429, "Too Many Requests"));
    let store = MarketStore::new(shared_service(&client));

    // When: The list is loaded
    store.load_list().await;

    // Then: The view has the rate-limited message, no data, and is not loading
    let list = store.list_state();
    assert!(list.data().is_none());
    assert!(!list.is_loading());
    let error = list.error().expect("error set");
    assert_eq!(error.kind(), FetchErrorKind::RateLimited);
    assert!(!error.allows_back_navigation());
    assert!(list
        .error_message()
        .expect("message")
        .contains("try again"));
}

#[tokio::test(start_paused = true)]
async fn when_list_failed_system_retries_on_next_load() {
    // Given: A first load that failed with a network error
    let client = Arc::new(ScriptedHttpClient::new());
    client
        .push_error(HttpError::connect("connection refused"))
        .push_response(three_asset_list());
    let store = MarketStore::new(shared_service(&client));
    store.load_list().await;
    assert_eq!(
        store.list_state().error().map(|error| error.kind()),
        Some(FetchErrorKind::Network)
    );

    // When: The view loads again
    store.load_list().await;

    // Then: The error is gone and data is shown
    let list = store.list_state();
    assert!(list.error().is_none());
    assert_eq!(list.data().map(|assets| assets.len()), Some(3));
    assert_eq!(client.call_count(), 2);
}

#[tokio::test(start_paused = true)]
async fn when_detail_error_is_dismissed_system_keeps_active_asset() {
    // Given: A detail load that failed with 403
    let client = Arc::new(ScriptedHttpClient::new());
    client.push_response(HttpResponse::new(403, "Forbidden"));
    let store = MarketStore::new(shared_service(&client));
    store.load_detail(id("bitcoin")).await;
    assert_eq!(
        store.detail_state().error().map(|error| error.kind()),
        Some(FetchErrorKind::Forbidden)
    );

    // When: The error banner is dismissed
    store.clear_detail_error();

    // Then: The error is gone but the view still targets bitcoin
    let state = store.detail_state();
    assert!(state.error().is_none());
    assert_eq!(state.active_id(), Some(&id("bitcoin")));
}
