//! Mapping of transport outcomes to typed payloads or classified errors.

use serde::de::DeserializeOwned;

use crate::http_client::{HttpError, HttpResponse};
use crate::FetchError;

/// Classify a transport outcome, decoding the body on 2xx.
///
/// | Outcome | Result |
/// |---------|--------|
/// | transport error | [`FetchError::Network`] |
/// | 429 | [`FetchError::RateLimited`] |
/// | 403 | [`FetchError::Forbidden`] |
/// | other non-2xx | [`FetchError::Upstream`] |
/// | 2xx, body decodes as `T` | `Ok(T)` |
/// | 2xx, body does not decode | [`FetchError::MalformedResponse`] |
pub fn classify<T>(outcome: Result<HttpResponse, HttpError>) -> Result<T, FetchError>
where
    T: DeserializeOwned,
{
    let response = outcome.map_err(|error| FetchError::Network {
        detail: error.message().to_owned(),
    })?;

    if let Some(error) = classify_status(response.status) {
        return Err(error);
    }

    serde_json::from_str(&response.body).map_err(|error| FetchError::MalformedResponse {
        detail: error.to_string(),
    })
}

/// Error for a non-2xx status, `None` for success codes.
pub fn classify_status(status: u16) -> Option<FetchError> {
    match status {
        200..=299 => None,
        429 => Some(FetchError::RateLimited),
        403 => Some(FetchError::Forbidden),
        status => Some(FetchError::Upstream { status }),
    }
}
