//! Bot layer - Discord-specific interface and command handlers
//!
//! This module wires the framework-agnostic core into poise: shared bot state, the command
//! list, the error hook and the gateway event handler.

/// Channel and role checks used by the command groups
pub mod checks;
/// Discord command implementations (maps, search, records, tournament, general)
pub mod commands;
/// Discord message adapter for the reaction protocols
pub mod discord;
/// Gateway event and autocomplete handlers
pub mod handlers;

use crate::{
    config::settings::Settings,
    core::reactions::ReactionHub,
    errors::{Error, Result},
};
use poise::serenity_prelude as serenity;
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tracing::{error, info, instrument};

/// Shared data available to all bot commands.
/// Built once at startup and handed to every command and event.
pub struct BotData {
    /// Database connection for all database operations
    pub database: DatabaseConnection,
    /// Channel ids, moderator roles and timeouts
    pub settings: Arc<Settings>,
    /// Reaction listeners of running confirmations and pagers
    pub reactions: Arc<ReactionHub>,
}

impl BotData {
    /// Creates a new `BotData` instance with an empty reaction hub.
    #[must_use]
    pub fn new(database: DatabaseConnection, settings: Arc<Settings>) -> Self {
        Self {
            database,
            settings,
            reactions: Arc::new(ReactionHub::new()),
        }
    }
}

/// Poise context used by every command
pub type Context<'a> = poise::Context<'a, BotData, Error>;

/// Every command the bot registers.
#[must_use]
pub fn all_commands() -> Vec<poise::Command<BotData, Error>> {
    vec![
        commands::ping(),
        commands::help(),
        commands::submitmap(),
        commands::deletemap(),
        commands::editdesc(),
        commands::edittypes(),
        commands::editcode(),
        commands::maps(),
        commands::maptypes(),
        commands::search(),
        commands::maptype(),
        commands::framework(),
        commands::creator(),
        commands::mapcode(),
        commands::newest(),
        commands::submitpb(),
        commands::deletepb(),
        commands::pb(),
        commands::scoreboard(),
        commands::leaderboard(),
        commands::worldrecord(),
        commands::levels(),
        commands::tournament(),
    ]
}

async fn on_error(error: poise::FrameworkError<'_, BotData, Error>) {
    match error {
        poise::FrameworkError::Command { error, ctx, .. } => {
            let reply = if error.is_user_facing() {
                error.to_string()
            } else {
                error!("Error in command `{}`: {:?}", ctx.command().name, error);
                "Something went wrong. Please try again later.".to_string()
            };
            if let Err(e) = ctx.say(reply).await {
                error!("Failed to send error message: {}", e);
            }
        }
        // Commands used outside their channel are ignored
        poise::FrameworkError::CommandCheckFailed { error: None, .. } => {}
        poise::FrameworkError::CommandCheckFailed {
            error: Some(error), ctx, ..
        } => {
            error!("Check for `{}` failed: {:?}", ctx.command().name, error);
        }
        error => {
            if let Err(e) = poise::builtins::on_error(error).await {
                error!("Error while handling error: {}", e);
            }
        }
    }
}

/// Starts the Discord client and runs until it shuts down.
#[instrument(skip(token, settings, database))]
pub async fn run_bot(
    token: String,
    settings: Arc<Settings>,
    database: DatabaseConnection,
) -> Result<()> {
    let prefix = settings.prefix.clone();
    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: all_commands(),
            prefix_options: poise::PrefixFrameworkOptions {
                prefix: Some(prefix),
                ..Default::default()
            },
            on_error: |error| Box::pin(on_error(error)),
            event_handler: |ctx, event, framework, data| {
                Box::pin(handlers::event_handler(ctx, event, framework, data))
            },
            ..Default::default()
        })
        .setup(|ctx, ready, framework| {
            Box::pin(async move {
                info!("Logged in as {}", ready.user.name);
                info!("Registering commands globally...");
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                Ok(BotData::new(database, settings))
            })
        })
        .build();

    let intents = serenity::GatewayIntents::GUILDS
        | serenity::GatewayIntents::GUILD_MESSAGES
        | serenity::GatewayIntents::GUILD_MESSAGE_REACTIONS
        | serenity::GatewayIntents::DIRECT_MESSAGES
        | serenity::GatewayIntents::DIRECT_MESSAGE_REACTIONS
        | serenity::GatewayIntents::MESSAGE_CONTENT;

    info!("Setting up Serenity client for Poise framework...");
    let mut client = serenity::ClientBuilder::new(&token, intents)
        .framework(framework)
        .await
        .inspect_err(|e| error!("Error creating client: {:?}", e))?;

    info!("Starting bot client...");
    client
        .start()
        .await
        .inspect_err(|e| error!("Client error: {:?}", e))?;
    Ok(())
}
