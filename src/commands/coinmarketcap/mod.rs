//! Module providing functionality to interact with the CoinMarketCap API.
//! Includes the quote data structure, API request logic, and error handling.

use reqwest::{Client, Url};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, error};

/// Submodule defining the `!price` and `!marketcap` commands.
pub mod quote;

/// Base URL for the CoinMarketCap pro API.
pub const API: &str = "https://pro-api.coinmarketcap.com/";

/// Endpoint returning the latest quote for one or more symbols.
const QUOTES_LATEST: &str = "v1/cryptocurrency/quotes/latest";

/// Fiat currency every quote is converted into.
const CONVERT: &str = "USD";

/// Header carrying the API key.
const API_KEY_HEADER: &str = "X-CMC_PRO_API_KEY";

/// Price and market capitalisation of a currency, in USD.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Quote {
    pub price: f64,
    pub market_cap: f64,
}

/// Custom error type for CoinMarketCap API interactions.
#[derive(Error, Debug)]
pub enum CoinMarketCapError {
    /// Error during HTTP request communication.
    #[error("API communication failure: {0}")]
    Api(#[from] reqwest::Error),

    /// The response body was not JSON.
    #[error("Unable to parse text from JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The configured base URL could not be combined with the endpoint path.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// CoinMarketCap reported an error in the response status block.
    #[error("CoinMarketCap error {code}: {message}")]
    Status { code: i64, message: String },

    /// The response carried no entry for the requested symbol.
    #[error("No quote returned for symbol {0}")]
    UnknownSymbol(String),

    /// The entry for the symbol did not carry a usable USD quote.
    #[error("Malformed quote for symbol {symbol}: {source}")]
    Malformed {
        symbol: String,
        source: serde_json::Error,
    },
}

/// Client for the `quotes/latest` endpoint. Cheap to clone.
#[derive(Debug, Clone)]
pub struct CoinMarketCap {
    client: Client,
    base_url: String,
    api_key: String,
}

impl CoinMarketCap {
    /// Creates a client against `base_url`: the pro API, the sandbox API or a test server.
    pub fn with_base_url(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        // Url::join drops the last path segment unless the base ends in a slash.
        if !base_url.ends_with('/') {
            base_url.push('/');
        }

        Self {
            client: Client::new(),
            base_url,
            api_key: api_key.into(),
        }
    }

    /// Fetches the latest USD quote for `symbol`.
    ///
    /// The symbol is sent as given; callers are expected to uppercase it, since the
    /// response is keyed by the literal symbol.
    pub async fn fetch_quote(&self, symbol: &str) -> Result<Quote, CoinMarketCapError> {
        let url = self.endpoint()?;

        debug!("Requesting {CONVERT} quote for {symbol}");

        let body = self
            .client
            .get(url)
            .query(&[("symbol", symbol), ("convert", CONVERT)])
            .header("Accepts", "application/json")
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await
            .inspect_err(|e| error!("Quote request for {symbol} failed: {e}"))?
            .text()
            .await
            .inspect_err(|e| error!("Reading quote response for {symbol} failed: {e}"))?;

        let json: Value = serde_json::from_str(&body)?;

        parse_quote(&json, symbol)
    }

    fn endpoint(&self) -> Result<Url, CoinMarketCapError> {
        let base = Url::parse(&self.base_url).map_err(|e| {
            CoinMarketCapError::BadRequest(format!("Invalid base URL '{}': {}", self.base_url, e))
        })?;

        base.join(QUOTES_LATEST).map_err(|e| {
            CoinMarketCapError::BadRequest(format!(
                "Invalid path '{}' for base URL '{}': {}",
                QUOTES_LATEST, self.base_url, e
            ))
        })
    }
}

/// Extracts `data.<symbol>.quote.USD` from a `quotes/latest` response body.
fn parse_quote(json: &Value, symbol: &str) -> Result<Quote, CoinMarketCapError> {
    let status = &json["status"];
    if let Some(code) = status["error_code"].as_i64().filter(|code| *code != 0) {
        let message = status["error_message"]
            .as_str()
            .unwrap_or("no error message")
            .to_owned();
        return Err(CoinMarketCapError::Status { code, message });
    }

    let entry = match &json["data"][symbol] {
        Value::Null => return Err(CoinMarketCapError::UnknownSymbol(symbol.to_owned())),
        entry => entry,
    };

    Quote::deserialize(&entry["quote"][CONVERT]).map_err(|source| CoinMarketCapError::Malformed {
        symbol: symbol.to_owned(),
        source,
    })
}
