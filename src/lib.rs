//! A Discord bot answering `!price` and `!marketcap` with CoinMarketCap quotes.

use poise::serenity_prelude as serenity;

pub mod commands;
pub mod config;
pub mod errors;
pub mod events;

use commands::coinmarketcap::CoinMarketCap;
use events::GuildSummary;

pub type Error = Box<dyn std::error::Error + Send + Sync>;
pub type Context<'a> = poise::Context<'a, Data, Error>;
pub type CommandResult = Result<(), Error>;

/// User data shared by reference with every command invocation.
pub struct Data {
    /// Quote provider client, reused across lookups.
    pub quotes: CoinMarketCap,
    /// Guild the bot resolved when the session became ready.
    pub guild: GuildSummary,
}

/// Show the available commands
#[poise::command(prefix_command, category = "General")]
pub async fn help(
    ctx: Context<'_>,
    #[description = "Specific command to show help about"] command: Option<String>,
) -> CommandResult {
    poise::builtins::help(
        ctx,
        command.as_deref(),
        poise::builtins::HelpConfiguration {
            extra_text_at_bottom: "Prices are quoted in USD by CoinMarketCap.",
            ..Default::default()
        },
    )
    .await
    .map_err(|e| e.into())
}

/// Gateway intents the bot needs to read prefixed commands.
pub fn intents() -> serenity::GatewayIntents {
    serenity::GatewayIntents::non_privileged() | serenity::GatewayIntents::MESSAGE_CONTENT
}
