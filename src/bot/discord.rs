//! Discord side of the reaction protocols.
//!
//! [`DiscordMessage`] implements the message traits from [`crate::core::reactions`] over
//! serenity HTTP calls, and [`ReplySink`] sends new pages as command replies.

use super::{BotData, Context};
use crate::{
    core::{
        confirmation::{self, Confirmation},
        pagination::{self, Page},
        reactions::{PageDisplay, PageSink, PageView, ReactionTarget, clean_up},
    },
    errors::{Error, Result},
};
use async_trait::async_trait;
use poise::serenity_prelude as serenity;
use std::sync::Arc;

/// Discord API error code for a deleted or unknown message
const UNKNOWN_MESSAGE: isize = 10008;
/// Discord API error code for a reaction that is no longer present
const UNKNOWN_EMOJI: isize = 10014;

/// Maps "already gone" API failures to [`Error::MessageGone`].
pub fn map_discord_error(error: serenity::Error, message_id: u64) -> Error {
    if let serenity::Error::Http(serenity::HttpError::UnsuccessfulRequest(response)) = &error {
        if matches!(response.error.code, UNKNOWN_MESSAGE | UNKNOWN_EMOJI) {
            return Error::MessageGone { message_id };
        }
    }
    Error::from(error)
}

/// Builds the embed for a page. `position` adds the `Page i/n` footer.
#[must_use]
pub fn page_embed(
    title: &str,
    page: &Page,
    position: Option<(usize, usize)>,
) -> serenity::CreateEmbed {
    let mut embed = serenity::CreateEmbed::new().title(title);
    if let Some(description) = &page.description {
        embed = embed.description(description);
    }
    for field in &page.fields {
        embed = embed.field(&field.name, &field.value, false);
    }
    if let Some((index, total)) = position {
        embed = embed.footer(serenity::CreateEmbedFooter::new(format!("Page {index}/{total}")));
    }
    embed
}

fn view_embed(view: PageView<'_>) -> serenity::CreateEmbed {
    page_embed(view.title, view.page, Some((view.index, view.total)))
}

/// A message the bot sent, addressed by channel and message id.
#[derive(Clone)]
pub struct DiscordMessage {
    http: Arc<serenity::Http>,
    channel_id: serenity::ChannelId,
    message_id: serenity::MessageId,
}

impl DiscordMessage {
    /// Wraps an existing message.
    #[must_use]
    pub const fn new(
        http: Arc<serenity::Http>,
        channel_id: serenity::ChannelId,
        message_id: serenity::MessageId,
    ) -> Self {
        Self {
            http,
            channel_id,
            message_id,
        }
    }

    fn map_err(&self, error: serenity::Error) -> Error {
        map_discord_error(error, self.message_id.get())
    }

    /// Replaces the text content, keeping the embed.
    pub async fn set_content(&self, content: impl Into<String> + Send) -> Result<()> {
        self.channel_id
            .edit_message(
                &*self.http,
                self.message_id,
                serenity::EditMessage::new().content(content),
            )
            .await
            .map_err(|e| self.map_err(e))?;
        Ok(())
    }

    /// Reports an outcome on the message. A failure is logged, never returned.
    pub async fn report(&self, content: impl Into<String> + Send) {
        clean_up(self.set_content(content).await, "report outcome");
    }

    /// Deletes the message.
    pub async fn delete(&self) -> Result<()> {
        self.channel_id
            .delete_message(&*self.http, self.message_id)
            .await
            .map_err(|e| self.map_err(e))
    }
}

#[async_trait]
impl ReactionTarget for DiscordMessage {
    fn id(&self) -> u64 {
        self.message_id.get()
    }

    async fn add_reaction(&self, emoji: &str) -> Result<()> {
        self.channel_id
            .create_reaction(
                &*self.http,
                self.message_id,
                serenity::ReactionType::Unicode(emoji.to_string()),
            )
            .await
            .map_err(|e| self.map_err(e))
    }

    async fn remove_reaction(&self, emoji: &str, user_id: u64) -> Result<()> {
        self.channel_id
            .delete_reaction(
                &*self.http,
                self.message_id,
                Some(serenity::UserId::new(user_id)),
                serenity::ReactionType::Unicode(emoji.to_string()),
            )
            .await
            .map_err(|e| self.map_err(e))
    }

    async fn clear_reactions(&self) -> Result<()> {
        self.channel_id
            .delete_reactions(&*self.http, self.message_id)
            .await
            .map_err(|e| self.map_err(e))
    }
}

#[async_trait]
impl PageDisplay for DiscordMessage {
    async fn show(&self, view: PageView<'_>) -> Result<()> {
        self.channel_id
            .edit_message(
                &*self.http,
                self.message_id,
                serenity::EditMessage::new().embed(view_embed(view)),
            )
            .await
            .map_err(|e| self.map_err(e))?;
        Ok(())
    }
}

/// Sends a reply and returns a handle to the message it created.
pub async fn send_reply(ctx: Context<'_>, reply: poise::CreateReply) -> Result<DiscordMessage> {
    let handle = ctx.send(reply).await?;
    let message = handle.message().await?;
    Ok(DiscordMessage::new(
        Arc::clone(&ctx.serenity_context().http),
        message.channel_id,
        message.id,
    ))
}

/// Sends `page` as a single embed without navigation.
pub async fn send_embed(ctx: Context<'_>, title: &str, page: &Page) -> Result<DiscordMessage> {
    send_reply(ctx, poise::CreateReply::default().embed(page_embed(title, page, None))).await
}

/// New pages go out as replies to the invoking command.
pub struct ReplySink<'a> {
    ctx: Context<'a>,
}

impl<'a> ReplySink<'a> {
    /// Creates a sink replying in `ctx`.
    #[must_use]
    pub const fn new(ctx: Context<'a>) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl PageSink for ReplySink<'_> {
    type Message = DiscordMessage;

    async fn send_page(&self, view: PageView<'_>) -> Result<DiscordMessage> {
        send_reply(self.ctx, poise::CreateReply::default().embed(view_embed(view))).await
    }
}

/// Shows `title` with `page` and asks the author to confirm.
///
/// Returns the preview message, so the caller can report the outcome on it.
pub async fn ask_confirmation(
    ctx: Context<'_>,
    title: &str,
    page: &Page,
) -> Result<(DiscordMessage, Confirmation)> {
    let data: &BotData = ctx.data();
    let message = send_embed(ctx, title, page).await?;
    let outcome = confirmation::confirm(
        &data.reactions,
        ctx.author().id.get(),
        &message,
        data.settings.interaction.confirm_timeout(),
    )
    .await?;
    Ok((message, outcome))
}

/// Browses `pages` in a reply, or says `empty_text` when there are none.
pub async fn show_pages(
    ctx: Context<'_>,
    title: &str,
    pages: Vec<Page>,
    empty_text: &str,
) -> Result<()> {
    if pages.is_empty() {
        ctx.say(empty_text).await?;
        return Ok(());
    }
    let data: &BotData = ctx.data();
    let sink = ReplySink::new(ctx);
    pagination::paginate(
        &data.reactions,
        ctx.author().id.get(),
        &sink,
        pages,
        title,
        data.settings.interaction.page_timeout(),
    )
    .await
}
