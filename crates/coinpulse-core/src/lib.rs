//! # Coinpulse Core
//!
//! Data-access layer between the coinpulse views and the upstream market API.
//!
//! ## Overview
//!
//! - **Cache store** keyed by logical resource, with per-entry TTL and expiry on read
//! - **Rate limiter** spacing every outbound call on one process-wide timeline
//! - **Error classifier** turning transport outcomes into user-facing error kinds
//! - **Market service** composing the three into deduplicated list/detail reads
//! - **Market store** tracking loading/error/data per resource for the views
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`cache`] | Resource-keyed TTL cache |
//! | [`classify`] | Transport outcome classification |
//! | [`config`] | Client configuration and environment overrides |
//! | [`domain`] | Market payload models |
//! | [`error`] | Validation, configuration and fetch errors |
//! | [`http_client`] | HTTP transport abstraction |
//! | [`market`] | Fetch orchestration |
//! | [`search`] | Read-time search filter |
//! | [`store`] | Request state container |
//! | [`throttling`] | Minimum-interval rate limiter |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use coinpulse_core::{ClientConfig, MarketService, MarketStore, ReqwestHttpClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig::from_env()?;
//!     let service = MarketService::with_http_client(config, Arc::new(ReqwestHttpClient::new()));
//!     let store = MarketStore::new(Arc::new(service));
//!
//!     store.load_list().await;
//!     store.set_search_term("eth");
//!     for asset in store.filtered_list().iter() {
//!         println!("{} ({})", asset.name, asset.symbol);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Failed fetches surface as a [`FetchError`]; renderers only ever look at
//! its kind and message:
//!
//! ```rust
//! use coinpulse_core::{FetchError, FetchErrorKind};
//!
//! fn render_error(error: &FetchError) {
//!     eprintln!("{}", error.user_message());
//!     if error.allows_back_navigation() {
//!         eprintln!("(press b to go back)");
//!     }
//!     if error.kind() == FetchErrorKind::RateLimited {
//!         // waiting is the remedy
//!     }
//! }
//! ```

pub mod cache;
pub mod classify;
pub mod config;
pub mod domain;
pub mod error;
pub mod http_client;
pub mod market;
pub mod search;
pub mod store;
pub mod throttling;

// Caching
pub use cache::{CacheKey, CacheMode, CacheStore, CachedValue};

// Classification
pub use classify::{classify, classify_status};

// Configuration
pub use config::{ClientConfig, DEFAULT_BASE_URL, PAGE_SIZE};

// Domain models
pub use domain::{
    Asset, AssetDetail, AssetId, AssetImage, AssetLinks, Currency, CurrencyValues,
    DetailMarketData, LocalizedText, RepoLinks, Roi, UtcDateTime,
};

// Error types
pub use error::{ConfigError, FetchError, FetchErrorKind, ValidationError};

// HTTP client types
pub use http_client::{
    HttpClient, HttpError, HttpFuture, HttpRequest, HttpResponse, ReqwestHttpClient,
    ScriptedHttpClient, TransportFailure,
};

// Orchestration and state
pub use market::MarketService;
pub use search::SearchFilter;
pub use store::{DetailState, MarketStore, RequestState};

// Throttling
pub use throttling::RateLimiter;
