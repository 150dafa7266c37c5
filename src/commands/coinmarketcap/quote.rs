use thousands::Separable;
use tracing::warn;

use crate::{CommandResult, Context};

use super::*;

/// Quote field a command reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Price,
    MarketCap,
}

impl Metric {
    fn label(self) -> &'static str {
        match self {
            Metric::Price => "price",
            Metric::MarketCap => "market cap",
        }
    }

    fn of(self, quote: &Quote) -> f64 {
        match self {
            Metric::Price => quote.price,
            Metric::MarketCap => quote.market_cap,
        }
    }
}

/// Get the current USD price of a cryptocurrency
#[poise::command(prefix_command, user_cooldown = 3, category = "Crypto")]
pub async fn price(
    ctx: Context<'_>,
    #[description = "Coin symbol, e.g. BTC"] symbol: String,
) -> CommandResult {
    let reply = quote_reply(&ctx.data().quotes, &symbol, Metric::Price).await;
    ctx.say(reply).await?;

    Ok(())
}

/// Get the current USD market cap of a cryptocurrency
#[poise::command(prefix_command, user_cooldown = 3, category = "Crypto")]
pub async fn marketcap(
    ctx: Context<'_>,
    #[description = "Coin symbol, e.g. BTC"] symbol: String,
) -> CommandResult {
    let reply = quote_reply(&ctx.data().quotes, &symbol, Metric::MarketCap).await;
    ctx.say(reply).await?;

    Ok(())
}

/// Looks up `input` and renders the reply text for `metric`.
///
/// Every lookup failure, whether a network error or an unknown symbol, renders the
/// same invalid-symbol message. The underlying reason only goes to the log.
pub async fn quote_reply(quotes: &CoinMarketCap, input: &str, metric: Metric) -> String {
    let symbol = input.to_uppercase();

    match quotes.fetch_quote(&symbol).await {
        Ok(quote) => format!(
            "{symbol} {} is currently: {}$",
            metric.label(),
            format_usd(metric.of(&quote))
        ),
        Err(e) => {
            warn!("Quote lookup for {symbol} failed: {e}");
            format!("{symbol} is not a valid crypto symbol.")
        }
    }
}

/// Rounds to cents, then to whole dollars, and groups thousands with commas.
///
/// Both steps round half away from zero on the scaled value, so a cent value sitting
/// on a binary .5 boundary (2.675) goes up. Only the whole-dollar result is shown.
pub fn format_usd(value: f64) -> String {
    let cents = (value * 100.0).round() / 100.0;
    (cents.round() as i64).separate_with_commas()
}
