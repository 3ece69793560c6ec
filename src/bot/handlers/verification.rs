//! Moderator verification of personal best submissions.
//!
//! A submission message gets ✅ and ❌ from the bot. A moderator picking one of them marks
//! the record, removes the entry from the hidden verification channel and lets the player
//! know by DM. Deleting the submission message drops the record.

use crate::{
    bot::{BotData, discord::DiscordMessage},
    constants::{NOT_VERIFIED_EMOJI, VERIFIED_EMOJI},
    core::{
        reactions::{ReactionTarget, clean_up},
        record::{self, NewRecord, VerificationQueue, display_record},
    },
    entities::RecordModel,
    errors::Result,
};
use async_trait::async_trait;
use poise::serenity_prelude as serenity;
use std::sync::Arc;
use tracing::{debug, info};

/// Maps a moderator reaction to the verified flag it sets.
#[must_use]
pub fn verdict(emoji: &str) -> Option<bool> {
    match emoji {
        VERIFIED_EMOJI => Some(true),
        NOT_VERIFIED_EMOJI => Some(false),
        _ => None,
    }
}

/// Entry posted to the hidden verification channel.
#[must_use]
pub fn verification_request(
    name: &str,
    code: &str,
    level: &str,
    seconds: f64,
    url: &str,
) -> String {
    format!(
        "{name} needs verification!\n{code} - Level {level} - {}\n{url}",
        display_record(seconds)
    )
}

/// Direct message telling the player how a moderator decided.
#[must_use]
pub fn verdict_message(moderator: &str, record: &RecordModel, verified: bool) -> String {
    let details = format!(
        "```Map Code: {}\nLevel: {}\nRecord: {}```{}",
        record.code,
        record.level,
        display_record(record.record),
        record.url
    );
    if verified {
        format!("Your submission has been verified by {moderator}!\n{details}")
    } else {
        format!("{moderator} has rejected your submission and is not verified!\n{details}")
    }
}

/// Parses a stored Discord id. Zero is not a valid id.
pub fn parse_id(id: &str) -> Option<u64> {
    id.parse::<u64>().ok().filter(|id| *id != 0)
}

/// The hidden verification channel from the settings. Channel id zero disables it.
pub struct HiddenChannel {
    http: Arc<serenity::Http>,
    channel_id: u64,
}

impl HiddenChannel {
    /// The configured channel, reached through `http`.
    #[must_use]
    pub fn new(http: &Arc<serenity::Http>, data: &BotData) -> Self {
        Self {
            http: Arc::clone(http),
            channel_id: data.settings.channels.hidden_verification,
        }
    }
}

#[async_trait]
impl VerificationQueue for HiddenChannel {
    async fn post(&self, submission: &NewRecord) -> Result<Option<String>> {
        if self.channel_id == 0 {
            return Ok(None);
        }
        let content = verification_request(
            &submission.name,
            &submission.code,
            &submission.level,
            submission.record,
            &submission.url,
        );
        let posted = serenity::ChannelId::new(self.channel_id)
            .send_message(&*self.http, serenity::CreateMessage::new().content(content))
            .await?;
        Ok(Some(posted.id.to_string()))
    }

    async fn remove(&self, entry_id: &str) {
        let Some(entry_id) = parse_id(entry_id) else {
            return;
        };
        if self.channel_id == 0 {
            return;
        }
        let entry = DiscordMessage::new(
            Arc::clone(&self.http),
            serenity::ChannelId::new(self.channel_id),
            serenity::MessageId::new(entry_id),
        );
        clean_up(entry.delete().await, "delete verification entry");
    }
}

/// Deletes the hidden verification entry of a record, if it has one.
pub async fn delete_hidden_entry(
    http: &Arc<serenity::Http>,
    data: &BotData,
    record: &RecordModel,
) {
    if let Some(entry_id) = &record.hidden_id {
        HiddenChannel::new(http, data).remove(entry_id).await;
    }
}

/// Handles a reaction that no running confirmation or pager consumed.
pub async fn on_reaction(
    ctx: &serenity::Context,
    reaction: &serenity::Reaction,
    data: &BotData,
) -> Result<()> {
    let serenity::ReactionType::Unicode(emoji) = &reaction.emoji else {
        return Ok(());
    };
    let Some(verified) = verdict(emoji) else {
        return Ok(());
    };
    let Some(member) = &reaction.member else {
        return Ok(());
    };
    if member.user.bot
        || !data
            .settings
            .roles
            .is_moderator(member.roles.iter().copied().map(serenity::RoleId::get))
    {
        return Ok(());
    }

    let db = &data.database;
    let Some(found) = record::find_by_message_id(db, reaction.message_id.get()).await? else {
        return Ok(());
    };

    delete_hidden_entry(&ctx.http, data, &found).await;
    let updated = record::set_verified(db, found, verified).await?;
    info!(
        code = %updated.code,
        level = %updated.level,
        moderator = %member.user.name,
        verified,
        "Record verification changed"
    );

    if let Some(player) = parse_id(&updated.posted_by) {
        let dm = serenity::CreateMessage::new().content(verdict_message(
            &member.user.name,
            &updated,
            verified,
        ));
        if let Err(e) = serenity::UserId::new(player).direct_message(ctx, dm).await {
            debug!("Could not DM player {player}: {e}");
        }
    }

    let submission = DiscordMessage::new(
        Arc::clone(&ctx.http),
        reaction.channel_id,
        reaction.message_id,
    );
    clean_up(submission.clear_reactions().await, "clear verification reactions");
    Ok(())
}

/// Drops the record of a deleted submission message.
pub async fn on_message_delete(
    ctx: &serenity::Context,
    message_id: serenity::MessageId,
    data: &BotData,
) -> Result<()> {
    let Some(found) = record::find_by_message_id(&data.database, message_id.get()).await? else {
        return Ok(());
    };
    delete_hidden_entry(&ctx.http, data, &found).await;
    info!(code = %found.code, level = %found.level, "Submission deleted, dropping record");
    record::delete_record(&data.database, found).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RecordModel {
        RecordModel {
            id: 1,
            code: "ABC".to_string(),
            name: "runner".to_string(),
            posted_by: "5".to_string(),
            message_id: "500".to_string(),
            url: "https://discord.com/channels/1/2/500".to_string(),
            level: "BONUS".to_string(),
            record: 65.25,
            verified: false,
            hidden_id: Some("900".to_string()),
        }
    }

    #[test]
    fn test_verdict() {
        assert_eq!(verdict("✅"), Some(true));
        assert_eq!(verdict("❌"), Some(false));
        assert_eq!(verdict("🟢"), None);
    }

    #[test]
    fn test_verification_request() {
        assert_eq!(
            verification_request("runner", "ABC", "BONUS", 65.25, "https://x/1"),
            "runner needs verification!\nABC - Level BONUS - 0:01:05.25\nhttps://x/1"
        );
    }

    #[test]
    fn test_verdict_messages() {
        let record = sample();
        let verified = verdict_message("modname", &record, true);
        assert!(verified.starts_with("Your submission has been verified by modname!\n"));
        assert!(verified.contains("```Map Code: ABC\nLevel: BONUS\nRecord: 0:01:05.25```"));
        assert!(verified.ends_with(&record.url));

        let rejected = verdict_message("modname", &record, false);
        assert!(rejected.starts_with("modname has rejected your submission and is not verified!"));
    }

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("900"), Some(900));
        assert_eq!(parse_id("0"), None);
        assert_eq!(parse_id("abc"), None);
    }
}
