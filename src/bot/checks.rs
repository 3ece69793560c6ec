//! Command checks binding command groups to their channels.
//!
//! A failing check makes poise skip the command without a reply.

#![allow(clippy::unused_async)]

use super::Context;
use crate::errors::{Error, Result};
use poise::serenity_prelude as serenity;

/// Map submission and editing commands.
pub async fn in_map_submit_channel(ctx: Context<'_>) -> Result<bool> {
    Ok(ctx.channel_id().get() == ctx.data().settings.channels.map_submit)
}

/// Map search commands, also allowed in direct messages.
pub async fn in_map_channel_or_dm(ctx: Context<'_>) -> Result<bool> {
    Ok(ctx.guild_id().is_none() || ctx.channel_id().get() == ctx.data().settings.channels.map)
}

/// Catalog listings, usable where maps are searched or submitted.
pub async fn in_map_or_submit_channel(ctx: Context<'_>) -> Result<bool> {
    let channels = &ctx.data().settings.channels;
    let channel = ctx.channel_id().get();
    Ok(channel == channels.map || channel == channels.map_submit)
}

/// Personal best submission and deletion.
pub async fn in_record_channel(ctx: Context<'_>) -> Result<bool> {
    Ok(ctx.channel_id().get() == ctx.data().settings.channels.record)
}

/// Personal best listings and boards, also allowed in direct messages.
pub async fn in_record_channel_or_dm(ctx: Context<'_>) -> Result<bool> {
    Ok(ctx.guild_id().is_none() || ctx.channel_id().get() == ctx.data().settings.channels.record)
}

/// Whether the author holds a whitelisted role. Always false in direct messages.
pub async fn is_moderator(ctx: Context<'_>) -> bool {
    let Some(member) = ctx.author_member().await else {
        return false;
    };
    ctx.data()
        .settings
        .roles
        .is_moderator(member.roles.iter().copied().map(serenity::RoleId::get))
}

/// Fails with [`Error::PermissionDenied`] unless the author owns the row or moderates.
pub async fn require_owner_or_moderator(
    ctx: Context<'_>,
    owner_id: &str,
    action: &str,
) -> Result<()> {
    let moderator = is_moderator(ctx).await;
    if crate::core::access::may_modify(owner_id, ctx.author().id.get(), moderator) {
        Ok(())
    } else {
        Err(Error::PermissionDenied {
            action: action.to_string(),
        })
    }
}
