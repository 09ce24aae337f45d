use serde::{Deserialize, Serialize};

use crate::{AssetId, Currency, UtcDateTime};

/// Return-on-investment block attached to some market entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Roi {
    pub times: f64,
    pub currency: String,
    pub percentage: f64,
}

/// One row of the markets listing, priced in the requested currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    pub id: AssetId,
    pub symbol: String,
    pub name: String,
    pub image: Option<String>,
    pub current_price: Option<f64>,
    pub market_cap: Option<f64>,
    pub market_cap_rank: Option<u32>,
    pub fully_diluted_valuation: Option<f64>,
    pub total_volume: Option<f64>,
    pub high_24h: Option<f64>,
    pub low_24h: Option<f64>,
    pub price_change_24h: Option<f64>,
    pub price_change_percentage_24h: Option<f64>,
    pub market_cap_change_24h: Option<f64>,
    pub market_cap_change_percentage_24h: Option<f64>,
    pub circulating_supply: Option<f64>,
    pub total_supply: Option<f64>,
    pub max_supply: Option<f64>,
    pub ath: Option<f64>,
    pub ath_change_percentage: Option<f64>,
    pub ath_date: Option<String>,
    pub atl: Option<f64>,
    pub atl_change_percentage: Option<f64>,
    pub atl_date: Option<String>,
    pub roi: Option<Roi>,
    pub last_updated: Option<UtcDateTime>,
}

impl Asset {
    /// Minimal entry, mostly useful for fixtures and tests.
    pub fn new(id: AssetId, symbol: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id,
            symbol: symbol.into(),
            name: name.into(),
            image: None,
            current_price: None,
            market_cap: None,
            market_cap_rank: None,
            fully_diluted_valuation: None,
            total_volume: None,
            high_24h: None,
            low_24h: None,
            price_change_24h: None,
            price_change_percentage_24h: None,
            market_cap_change_24h: None,
            market_cap_change_percentage_24h: None,
            circulating_supply: None,
            total_supply: None,
            max_supply: None,
            ath: None,
            ath_change_percentage: None,
            ath_date: None,
            atl: None,
            atl_change_percentage: None,
            atl_date: None,
            roi: None,
            last_updated: None,
        }
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.current_price = Some(price);
        self
    }
}

/// Values keyed by display currency. Other upstream currencies are ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CurrencyValues {
    pub usd: Option<f64>,
    pub brl: Option<f64>,
}

impl CurrencyValues {
    pub const fn in_currency(&self, currency: Currency) -> Option<f64> {
        match currency {
            Currency::Usd => self.usd,
            Currency::Brl => self.brl,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocalizedText {
    pub en: Option<String>,
    pub pt: Option<String>,
}

impl LocalizedText {
    /// Portuguese text when present, English otherwise.
    pub fn preferred(&self) -> Option<&str> {
        [self.pt.as_deref(), self.en.as_deref()]
            .into_iter()
            .flatten()
            .find(|text| !text.trim().is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RepoLinks {
    #[serde(default)]
    pub github: Vec<String>,
    #[serde(default)]
    pub bitbucket: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssetLinks {
    #[serde(default)]
    pub homepage: Vec<String>,
    #[serde(default)]
    pub blockchain_site: Vec<String>,
    pub subreddit_url: Option<String>,
    #[serde(default)]
    pub repos_url: RepoLinks,
}

impl AssetLinks {
    /// First non-blank homepage; upstream pads the list with empty strings.
    pub fn primary_homepage(&self) -> Option<&str> {
        self.homepage
            .iter()
            .map(String::as_str)
            .find(|url| !url.trim().is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssetImage {
    pub thumb: Option<String>,
    pub small: Option<String>,
    pub large: Option<String>,
}

/// Market block of the detail record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DetailMarketData {
    #[serde(default)]
    pub current_price: CurrencyValues,
    #[serde(default)]
    pub market_cap: CurrencyValues,
    #[serde(default)]
    pub total_volume: CurrencyValues,
    #[serde(default)]
    pub high_24h: CurrencyValues,
    #[serde(default)]
    pub low_24h: CurrencyValues,
    #[serde(default)]
    pub ath: CurrencyValues,
    #[serde(default)]
    pub atl: CurrencyValues,
    pub price_change_24h: Option<f64>,
    pub price_change_percentage_24h: Option<f64>,
    pub price_change_percentage_7d: Option<f64>,
    pub price_change_percentage_30d: Option<f64>,
    pub price_change_percentage_1y: Option<f64>,
    pub market_cap_rank: Option<u32>,
    pub circulating_supply: Option<f64>,
    pub total_supply: Option<f64>,
    pub max_supply: Option<f64>,
}

/// Descriptive record for a single asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetDetail {
    pub id: AssetId,
    pub symbol: String,
    pub name: String,
    #[serde(default)]
    pub categories: Vec<String>,
    pub hashing_algorithm: Option<String>,
    pub genesis_date: Option<String>,
    #[serde(default)]
    pub description: LocalizedText,
    #[serde(default)]
    pub links: AssetLinks,
    #[serde(default)]
    pub image: AssetImage,
    pub market_cap_rank: Option<u32>,
    pub sentiment_votes_up_percentage: Option<f64>,
    pub sentiment_votes_down_percentage: Option<f64>,
    #[serde(default)]
    pub market_data: DetailMarketData,
    pub last_updated: Option<UtcDateTime>,
}

impl AssetDetail {
    pub fn price_in(&self, currency: Currency) -> Option<f64> {
        self.market_data.current_price.in_currency(currency)
    }
}
