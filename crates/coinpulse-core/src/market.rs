//! Fetch orchestration: cache, rate limiter, transport and classifier composed
//! into the two upstream reads.
//!
//! ```text
//! fetch_list / fetch_detail
//!          │
//!          ▼
//!   ┌─────────────┐  hit
//!   │ Cache Store │──────▶ cached value
//!   └──────┬──────┘
//!          │ miss
//!          ▼
//!   ┌──────────────┐     ┌─────────────┐     ┌────────────┐
//!   │ Rate Limiter │────▶│ HTTP Client │────▶│ Classifier │──▶ value (cached) / FetchError
//!   └──────────────┘     └─────────────┘     └────────────┘
//! ```

use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::cache::{CacheKey, CacheMode, CacheStore, CachedValue};
use crate::classify::classify;
use crate::http_client::{HttpClient, HttpError, HttpRequest, HttpResponse};
use crate::throttling::RateLimiter;
use crate::config::PAGE_SIZE;
use crate::{Asset, AssetDetail, AssetId, ClientConfig, FetchError};

/// Entry point for cached, rate-limited market reads.
///
/// The cache and limiter are injected so several services, or tests, can
/// share one process-wide instance of each.
pub struct MarketService {
    config: ClientConfig,
    http_client: Arc<dyn HttpClient>,
    cache: Arc<CacheStore>,
    limiter: Arc<RateLimiter>,
}

impl MarketService {
    pub fn new(
        config: ClientConfig,
        http_client: Arc<dyn HttpClient>,
        cache: Arc<CacheStore>,
        limiter: Arc<RateLimiter>,
    ) -> Self {
        Self {
            config,
            http_client,
            cache,
            limiter,
        }
    }

    /// Service with its own cache and a limiter built from `config.min_interval`.
    pub fn with_http_client(config: ClientConfig, http_client: Arc<dyn HttpClient>) -> Self {
        let limiter = Arc::new(RateLimiter::new(config.min_interval));
        Self::new(config, http_client, Arc::new(CacheStore::new()), limiter)
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn cache(&self) -> &Arc<CacheStore> {
        &self.cache
    }

    pub fn limiter(&self) -> &Arc<RateLimiter> {
        &self.limiter
    }

    /// Top assets by market capitalization in the configured currency.
    pub async fn fetch_list(&self) -> Result<Arc<Vec<Asset>>, FetchError> {
        self.fetch_list_with(CacheMode::Use).await
    }

    pub async fn fetch_list_with(&self, mode: CacheMode) -> Result<Arc<Vec<Asset>>, FetchError> {
        if mode == CacheMode::Use {
            if let Some(list) = self.cache.get_list() {
                return Ok(list);
            }
        }

        let outcome = self.dispatch(self.list_url()).await;
        let list = Arc::new(classify::<Vec<Asset>>(outcome).inspect_err(log_failure)?);

        self.cache.set(
            CacheKey::List,
            CachedValue::AssetList(Arc::clone(&list)),
            self.config.list_ttl,
        );
        Ok(list)
    }

    /// Descriptive record for one asset.
    pub async fn fetch_detail(&self, id: &AssetId) -> Result<Arc<AssetDetail>, FetchError> {
        self.fetch_detail_with(id, CacheMode::Use).await
    }

    pub async fn fetch_detail_with(
        &self,
        id: &AssetId,
        mode: CacheMode,
    ) -> Result<Arc<AssetDetail>, FetchError> {
        if mode == CacheMode::Use {
            if let Some(detail) = self.cache.get_detail(id) {
                return Ok(detail);
            }
        }

        let outcome = self.dispatch(self.detail_url(id)).await;
        let detail = Arc::new(classify::<AssetDetail>(outcome).inspect_err(log_failure)?);

        self.cache.set(
            CacheKey::Detail(id.clone()),
            CachedValue::AssetDetail(Arc::clone(&detail)),
            self.config.detail_ttl,
        );
        Ok(detail)
    }

    pub fn list_url(&self) -> String {
        format!(
            "{}/coins/markets?vs_currency={}&order=market_cap_desc&per_page={}&page=1&sparkline=false",
            self.config.base(),
            self.config.vs_currency.code(),
            PAGE_SIZE,
        )
    }

    pub fn detail_url(&self, id: &AssetId) -> String {
        format!(
            "{}/coins/{}",
            self.config.base(),
            urlencoding::encode(id.as_str())
        )
    }

    fn request(&self, url: String) -> HttpRequest {
        let request = HttpRequest::get(url)
            .with_header("accept", "application/json")
            .with_timeout_ms(self.config.timeout_ms);

        if self.config.proxied {
            request
        } else {
            request.with_header("user-agent", self.config.user_agent.as_str())
        }
    }

    async fn dispatch(&self, url: String) -> Result<HttpResponse, HttpError> {
        let request = self.request(url);
        debug!(url = %request.url, "waiting for rate limiter");
        self.limiter.acquire().await;

        let started = Instant::now();
        let url = request.url.clone();
        let outcome = self.http_client.execute(request).await;
        let elapsed_ms = elapsed_ms(started.elapsed());

        match &outcome {
            Ok(response) => info!(%url, status = response.status, elapsed_ms, "upstream call"),
            Err(error) => info!(%url, error = %error, elapsed_ms, "upstream call failed"),
        }
        outcome
    }
}

fn log_failure(error: &FetchError) {
    warn!(code = error.code(), detail = error.detail().unwrap_or(""), "{error}");
}

fn elapsed_ms(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}
