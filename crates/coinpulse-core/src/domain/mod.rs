//! # Domain Models
//!
//! Typed views of the upstream market payloads.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Asset`] | One row of the markets listing |
//! | [`AssetDetail`] | Descriptive record for a single asset |
//! | [`AssetId`] | Validated upstream identifier |
//! | [`Currency`] | Display currency (USD, BRL) |
//! | [`UtcDateTime`] | UTC timestamp |
//!
//! Upstream nullability is carried as `Option`; unknown fields are ignored so
//! additive upstream changes never turn into decode failures.

mod asset_id;
mod currency;
mod models;
mod timestamp;

pub use asset_id::AssetId;
pub use currency::Currency;
pub use models::{
    Asset, AssetDetail, AssetImage, AssetLinks, CurrencyValues, DetailMarketData, LocalizedText,
    RepoLinks, Roi,
};
pub use timestamp::UtcDateTime;
