//! Global handler translating framework dispatch failures into short-lived chat replies.

use std::future::Future;
use std::time::Duration;

use poise::FrameworkError;
use poise::serenity_prelude as serenity;
use tracing::{debug, error};

use crate::{Data, Error};

/// How long a failure reply and the message that triggered it stay in the channel.
pub const REPLY_LIFETIME: Duration = Duration::from_secs(5);

/// The user-facing classes a dispatch failure is reduced to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Failure {
    UnknownCommand,
    Cooldown(Duration),
    MissingPermissions,
    BadInput,
    Other,
}

impl Failure {
    /// Maps a framework error to its class. `None` for errors that do not come from
    /// dispatching a command.
    pub fn classify<U, E>(error: &FrameworkError<'_, U, E>) -> Option<Self> {
        let failure = match error {
            FrameworkError::Setup { .. } | FrameworkError::EventHandler { .. } => return None,
            FrameworkError::UnknownCommand { .. } => Self::UnknownCommand,
            FrameworkError::CooldownHit {
                remaining_cooldown, ..
            } => Self::Cooldown(*remaining_cooldown),
            FrameworkError::MissingUserPermissions { .. } => Self::MissingPermissions,
            FrameworkError::ArgumentParse { .. }
            | FrameworkError::CommandStructureMismatch { .. } => Self::BadInput,
            _ => Self::Other,
        };

        Some(failure)
    }

    pub fn message(&self) -> String {
        match self {
            Self::UnknownCommand => "This command doesn't exist.".to_owned(),
            Self::Cooldown(remaining) => format!(
                "This command is on cooldown. Please try again after {:.1} seconds.",
                remaining.as_secs_f64()
            ),
            Self::MissingPermissions => {
                "You are missing the required permissions to run this command!".to_owned()
            }
            Self::BadInput => {
                "Something about your input was wrong, please check your input and try again!"
                    .to_owned()
            }
            Self::Other => "Oh no! Something went wrong while running the command!".to_owned(),
        }
    }
}

/// `FrameworkOptions::on_error` hook.
pub async fn on_error(error: FrameworkError<'_, Data, Error>) {
    match &error {
        FrameworkError::Setup { error, .. } => {
            error!("Failed to start the session: {error}");
            std::process::exit(1);
        }
        FrameworkError::Command { error, ctx, .. } => {
            error!("Command `{}` failed: {error}", ctx.command().name);
        }
        _ => {}
    }

    let Some(failure) = Failure::classify(&error) else {
        if let Err(e) = poise::builtins::on_error(error).await {
            error!("Error while handling error: {e}");
        }
        return;
    };

    if let Err(e) = reply_and_expire(&error, failure).await {
        error!("Unable to send failure reply: {e}");
    }
}

/// Sends the failure text to the originating channel and schedules removal of both
/// the reply and the triggering message.
async fn reply_and_expire(
    error: &FrameworkError<'_, Data, Error>,
    failure: Failure,
) -> Result<(), serenity::Error> {
    let (serenity_ctx, channel_id, trigger) = match error {
        FrameworkError::UnknownCommand { ctx, msg, .. } => (*ctx, msg.channel_id, Some(msg.id)),
        other => match other.ctx() {
            Some(ctx) => {
                let trigger = match ctx {
                    poise::Context::Prefix(prefix) => Some(prefix.msg.id),
                    poise::Context::Application(_) => None,
                };
                (ctx.serenity_context(), ctx.channel_id(), trigger)
            }
            None => return Ok(()),
        },
    };

    let reply = channel_id.say(serenity_ctx, failure.message()).await?;

    let serenity_ctx = serenity_ctx.clone();
    tokio::spawn(expire_messages(reply.id, trigger, move |message_id| {
        let serenity_ctx = serenity_ctx.clone();
        async move { channel_id.delete_message(&serenity_ctx, message_id).await }
    }));

    Ok(())
}

/// Waits [`REPLY_LIFETIME`], then deletes the reply and, if known, the message that
/// triggered it. A failed deletion is logged and does not stop the next one.
pub async fn expire_messages<F, Fut>(
    reply: serenity::MessageId,
    trigger: Option<serenity::MessageId>,
    mut delete: F,
) where
    F: FnMut(serenity::MessageId) -> Fut,
    Fut: Future<Output = Result<(), serenity::Error>>,
{
    tokio::time::sleep(REPLY_LIFETIME).await;
    for message_id in std::iter::once(reply).chain(trigger) {
        if let Err(e) = delete(message_id).await {
            debug!("Could not delete message {message_id}: {e}");
        }
    }
}
