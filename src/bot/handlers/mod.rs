//! Discord interaction handlers
//!
//! This module provides the gateway event handler feeding the reaction hub and the
//! verification flow, plus autocomplete for slash command parameters.

/// Autocomplete handlers for map names and map types
pub mod autocomplete;
/// Moderator verification of personal bests
pub mod verification;

use crate::{
    bot::BotData,
    core::reactions::ReactionEvent,
    errors::{Error, Result},
};
use poise::serenity_prelude as serenity;

/// Routes gateway events.
///
/// Reactions first go to the hub; one that a running confirmation or pager consumed is
/// not treated as a verification.
pub async fn event_handler(
    ctx: &serenity::Context,
    event: &serenity::FullEvent,
    framework: poise::FrameworkContext<'_, BotData, Error>,
    data: &BotData,
) -> Result<()> {
    match event {
        serenity::FullEvent::ReactionAdd { add_reaction } => {
            let Some(user_id) = add_reaction.user_id else {
                return Ok(());
            };
            if user_id == framework.bot_id {
                return Ok(());
            }
            let event = ReactionEvent::new(
                add_reaction.message_id.get(),
                user_id.get(),
                emoji_name(&add_reaction.emoji),
            );
            if !data.reactions.dispatch(event) {
                verification::on_reaction(ctx, add_reaction, data).await?;
            }
        }
        serenity::FullEvent::MessageDelete {
            deleted_message_id, ..
        } => {
            verification::on_message_delete(ctx, *deleted_message_id, data).await?;
        }
        _ => {}
    }
    Ok(())
}

/// Unicode emoji as is, custom emoji by name.
fn emoji_name(emoji: &serenity::ReactionType) -> String {
    match emoji {
        serenity::ReactionType::Unicode(unicode) => unicode.clone(),
        serenity::ReactionType::Custom { name, .. } => name.clone().unwrap_or_default(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emoji_name() {
        assert_eq!(emoji_name(&serenity::ReactionType::Unicode("▶".to_string())), "▶");
    }
}
