use ::serenity::all::ClientBuilder;
use dotenv::dotenv;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use cryptobot::{
    Data, Error,
    commands::coinmarketcap::{
        CoinMarketCap,
        quote::{marketcap, price},
    },
    config::Config,
    errors, events, help, intents,
};

#[tokio::main]
async fn main() -> Result<(), Error> {
    FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("cryptobot=debug,warn")),
        )
        .with_thread_ids(true)
        .with_line_number(true)
        .with_file(true)
        .with_target(true)
        .with_ansi(true)
        .pretty()
        .init();

    dotenv().ok();

    let config = Config::from_env()?;

    let quotes = CoinMarketCap::with_base_url(&config.cmc_base_url, &config.cmc_api_key);
    let guild_name = config.guild_name.clone();

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: vec![help(), price(), marketcap()],
            prefix_options: poise::PrefixFrameworkOptions {
                prefix: Some(config.prefix.clone()),
                ..Default::default()
            },
            on_error: |error| Box::pin(errors::on_error(error)),
            ..Default::default()
        })
        .setup(move |ctx, ready, _framework| {
            Box::pin(async move {
                let guild = events::on_ready(ctx, ready, &guild_name).await?;
                Ok(Data { quotes, guild })
            })
        })
        .build();

    info!("Connecting with command prefix {:?}", config.prefix);

    let mut client = ClientBuilder::new(&config.discord_token, intents())
        .framework(framework)
        .await?;

    client.start().await.map_err(Into::into)
}
