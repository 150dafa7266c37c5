//! This module aggregates all the command modules for the bot.

/// Commands backed by the CoinMarketCap API (e.g., price and market cap lookups).
pub mod coinmarketcap;
