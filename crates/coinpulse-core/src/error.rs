use thiserror::Error;

/// Validation and contract errors exposed by `coinpulse-core`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("asset id cannot be empty")]
    EmptyAssetId,
    #[error("asset id length {len} exceeds max {max}")]
    AssetIdTooLong { len: usize, max: usize },
    #[error("asset id must start with an ASCII letter or digit: '{ch}'")]
    AssetIdInvalidStart { ch: char },
    #[error("asset id contains invalid character '{ch}' at index {index}")]
    AssetIdInvalidChar { ch: char, index: usize },

    #[error("invalid currency '{value}', expected one of usd, brl")]
    InvalidCurrency { value: String },

    #[error("timestamp is not RFC3339: '{value}'")]
    InvalidTimestamp { value: String },
}

/// Configuration errors raised while assembling a [`crate::ClientConfig`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: '{value}' ({reason})")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: &'static str,
    },

    #[error("{field} must not be empty")]
    Empty { field: &'static str },

    #[error("{field} must be greater than zero")]
    Zero { field: &'static str },

    #[error("detail ttl ({detail_secs}s) must not be shorter than list ttl ({list_secs}s)")]
    TtlOrdering { list_secs: u64, detail_secs: u64 },

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Classified failure kinds surfaced to the state container and renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FetchErrorKind {
    RateLimited,
    Forbidden,
    Upstream,
    Network,
    MalformedResponse,
}

/// Classified upstream failure.
///
/// The display text is the user-facing message; diagnostic detail for
/// transport and decoding failures is kept separately in [`FetchError::detail`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("Too many people are requesting market data right now. Please wait a moment and try again.")]
    RateLimited,

    #[error("The market data service is temporarily unavailable. Please try again later.")]
    Forbidden,

    #[error("The market data service returned an unexpected error (HTTP {status}). Please try again.")]
    Upstream { status: u16 },

    #[error("Could not reach the market data service. Check your internet connection and try again.")]
    Network { detail: String },

    #[error("The market data service sent a response that could not be read. Please try again later.")]
    MalformedResponse { detail: String },
}

impl FetchError {
    pub const fn kind(&self) -> FetchErrorKind {
        match self {
            Self::RateLimited => FetchErrorKind::RateLimited,
            Self::Forbidden => FetchErrorKind::Forbidden,
            Self::Upstream { .. } => FetchErrorKind::Upstream,
            Self::Network { .. } => FetchErrorKind::Network,
            Self::MalformedResponse { .. } => FetchErrorKind::MalformedResponse,
        }
    }

    pub const fn code(&self) -> &'static str {
        match self.kind() {
            FetchErrorKind::RateLimited => "fetch.rate_limited",
            FetchErrorKind::Forbidden => "fetch.forbidden",
            FetchErrorKind::Upstream => "fetch.upstream",
            FetchErrorKind::Network => "fetch.network",
            FetchErrorKind::MalformedResponse => "fetch.malformed_response",
        }
    }

    pub fn user_message(&self) -> String {
        self.to_string()
    }

    /// HTTP status behind the failure, when one was received.
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::RateLimited => Some(429),
            Self::Forbidden => Some(403),
            Self::Upstream { status } => Some(*status),
            Self::Network { .. } | Self::MalformedResponse { .. } => None,
        }
    }

    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Network { detail } | Self::MalformedResponse { detail } => Some(detail),
            _ => None,
        }
    }

    /// Rate limiting is remedied by waiting, so renderers hide "go back" for it.
    pub const fn allows_back_navigation(&self) -> bool {
        !matches!(self, Self::RateLimited)
    }
}
