//! Client configuration with environment overrides.
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `COINPULSE_BASE_URL` | `https://api.coingecko.com/api/v3` | Upstream or proxy base URL |
//! | `COINPULSE_PROXIED` | `false` | Base URL is a proxy; no user-agent is sent |
//! | `COINPULSE_CURRENCY` | `brl` | Listing currency (`usd`, `brl`) |
//! | `COINPULSE_LIST_TTL_SECS` | `600` | Cache lifetime of the listing |
//! | `COINPULSE_DETAIL_TTL_SECS` | `1800` | Cache lifetime of a detail record |
//! | `COINPULSE_MIN_INTERVAL_MS` | `1200` | Minimum spacing of upstream calls |
//! | `COINPULSE_TIMEOUT_MS` | `10000` | Per-request timeout |

use std::time::Duration;

use crate::{ConfigError, Currency};

pub const DEFAULT_BASE_URL: &str = "https://api.coingecko.com/api/v3";
/// Fixed listing page size; not configurable.
pub const PAGE_SIZE: u32 = 20;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub proxied: bool,
    pub vs_currency: Currency,
    pub list_ttl: Duration,
    pub detail_ttl: Duration,
    pub min_interval: Duration,
    pub timeout_ms: u64,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: String::from(DEFAULT_BASE_URL),
            proxied: false,
            vs_currency: Currency::default(),
            list_ttl: Duration::from_secs(10 * 60),
            detail_ttl: Duration::from_secs(30 * 60),
            min_interval: Duration::from_millis(1_200),
            timeout_ms: 10_000,
            user_agent: format!("coinpulse/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ClientConfig {
    /// Defaults overlaid with `COINPULSE_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overlaid with values from `lookup`, then validated.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup("COINPULSE_BASE_URL") {
            config.base_url = value;
        }
        if let Some(value) = lookup("COINPULSE_PROXIED") {
            config.proxied = parse_bool("COINPULSE_PROXIED", &value)?;
        }
        if let Some(value) = lookup("COINPULSE_CURRENCY") {
            config.vs_currency = value.parse()?;
        }
        if let Some(value) = lookup("COINPULSE_LIST_TTL_SECS") {
            config.list_ttl = Duration::from_secs(parse_u64("COINPULSE_LIST_TTL_SECS", &value)?);
        }
        if let Some(value) = lookup("COINPULSE_DETAIL_TTL_SECS") {
            config.detail_ttl =
                Duration::from_secs(parse_u64("COINPULSE_DETAIL_TTL_SECS", &value)?);
        }
        if let Some(value) = lookup("COINPULSE_MIN_INTERVAL_MS") {
            config.min_interval =
                Duration::from_millis(parse_u64("COINPULSE_MIN_INTERVAL_MS", &value)?);
        }
        if let Some(value) = lookup("COINPULSE_TIMEOUT_MS") {
            config.timeout_ms = parse_u64("COINPULSE_TIMEOUT_MS", &value)?;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_proxied(mut self, proxied: bool) -> Self {
        self.proxied = proxied;
        self
    }

    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.vs_currency = currency;
        self
    }

    pub fn with_ttls(mut self, list_ttl: Duration, detail_ttl: Duration) -> Self {
        self.list_ttl = list_ttl;
        self.detail_ttl = detail_ttl;
        self
    }

    pub fn with_min_interval(mut self, min_interval: Duration) -> Self {
        self.min_interval = min_interval;
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.trim().is_empty() {
            return Err(ConfigError::Empty { field: "base_url" });
        }
        if self.list_ttl.is_zero() {
            return Err(ConfigError::Zero { field: "list_ttl" });
        }
        if self.detail_ttl.is_zero() {
            return Err(ConfigError::Zero { field: "detail_ttl" });
        }
        if self.timeout_ms == 0 {
            return Err(ConfigError::Zero {
                field: "timeout_ms",
            });
        }
        if self.detail_ttl < self.list_ttl {
            return Err(ConfigError::TtlOrdering {
                list_secs: self.list_ttl.as_secs(),
                detail_secs: self.detail_ttl.as_secs(),
            });
        }
        Ok(())
    }

    /// Base URL without a trailing slash.
    pub fn base(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

fn parse_u64(key: &'static str, value: &str) -> Result<u64, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue {
            key,
            value: value.to_owned(),
            reason: "expected a non-negative integer",
        })
}

fn parse_bool(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key,
            value: value.to_owned(),
            reason: "expected true or false",
        }),
    }
}
