use poise::serenity_prelude as serenity;
use serenity::{GuildId, GuildInfo};
use thiserror::Error;
use tracing::info;

/// Errors raised while bringing the gateway session up.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Bot is not a member of a guild named {0:?}")]
    GuildNotFound(String),

    #[error("Discord API failure: {0}")]
    Discord(#[from] serenity::Error),
}

/// Name and id of a guild the bot belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuildSummary {
    pub id: GuildId,
    pub name: String,
}

impl From<&GuildInfo> for GuildSummary {
    fn from(info: &GuildInfo) -> Self {
        Self {
            id: info.id,
            name: info.name.clone(),
        }
    }
}

/// Returns the first guild whose name matches exactly.
pub fn find_guild<'a>(guilds: &'a [GuildSummary], name: &str) -> Option<&'a GuildSummary> {
    guilds.iter().find(|guild| guild.name == name)
}

/// Like [`find_guild`], but a missing guild is an error.
pub fn resolve_guild(guilds: &[GuildSummary], name: &str) -> Result<GuildSummary, SessionError> {
    find_guild(guilds, name)
        .cloned()
        .ok_or_else(|| SessionError::GuildNotFound(name.to_owned()))
}

/// Resolves the configured guild once the session is ready and logs who we are and where.
pub async fn on_ready(
    ctx: &serenity::Context,
    ready: &serenity::Ready,
    guild_name: &str,
) -> Result<GuildSummary, SessionError> {
    let guilds: Vec<GuildSummary> = ctx
        .http
        .get_guilds(None, None)
        .await?
        .iter()
        .map(GuildSummary::from)
        .collect();

    let guild = resolve_guild(&guilds, guild_name)?;

    info!("{} has connected to the following guild:", ready.user.tag());
    info!("{}(id: {})", guild.name, guild.id);

    Ok(guild)
}
