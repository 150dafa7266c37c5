//! Common test utilities and fixtures shared by the integration tests.

#![allow(dead_code)]

use std::sync::Once;

use serde_json::{Map, Value, json};
use tracing::Level;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{header, method, path, query_param},
};

/// API key the mocked endpoints expect.
pub const API_KEY: &str = "test-api-key";

/// Path of the quotes endpoint on the mock server.
pub const QUOTES_PATH: &str = "/v1/cryptocurrency/quotes/latest";

static INIT: Once = Once::new();

/// Initialize tracing once for the whole test binary.
pub fn init() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_max_level(Level::DEBUG)
            .with_test_writer()
            .init();
    });
}

/// A successful `quotes/latest` body for one symbol.
pub fn quote_body(symbol: &str, price: f64, market_cap: f64) -> Value {
    let entry = json!({
        "id": 1,
        "name": "Test Coin",
        "symbol": symbol,
        "quote": {
            "USD": {
                "price": price,
                "volume_24h": 12345.6,
                "percent_change_24h": 1.5,
                "market_cap": market_cap,
                "last_updated": "2026-10-18T08:00:00.000Z"
            }
        }
    });

    let mut data = Map::new();
    data.insert(symbol.to_owned(), entry);

    json!({
        "status": {
            "error_code": 0,
            "error_message": null,
            "credit_count": 1
        },
        "data": data
    })
}

/// The body CoinMarketCap returns (with HTTP 400) for a symbol it does not know.
pub fn invalid_symbol_body(symbol: &str) -> Value {
    json!({
        "status": {
            "error_code": 400,
            "error_message": format!("Invalid value for \"symbol\": \"{symbol}\""),
            "credit_count": 0
        }
    })
}

/// Mounts a quote response for `symbol` that requires the expected query and key.
pub async fn mount_quote(server: &MockServer, symbol: &str, status: u16, body: Value) {
    Mock::given(method("GET"))
        .and(path(QUOTES_PATH))
        .and(query_param("symbol", symbol))
        .and(query_param("convert", "USD"))
        .and(header("X-CMC_PRO_API_KEY", API_KEY))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .mount(server)
        .await;
}
