//! Personal best commands - submit, delete and browse times on map levels.
//!
//! Submissions are prefix commands because the submission message itself is the proof a
//! moderator verifies later.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{
            Context, checks,
            discord::{self, DiscordMessage},
            handlers::verification,
        },
        constants::{NOT_VERIFIED_EMOJI, VERIFIED_EMOJI},
        core::{
            confirmation::Confirmation,
            map,
            pagination::Page,
            reactions::{ReactionTarget, clean_up},
            record::{self, NewRecord, PersonalBestQuery},
            render,
        },
        entities::RecordModel,
        errors::{Error, Result},
    };
    use std::sync::Arc;
    use tracing::info;

    /// Submit a personal best. Attach a screenshot or video link to the message as proof.
    ///
    /// Times use the format HH:MM:SS.ss, leading hours and minutes are optional.
    #[poise::command(prefix_command, check = "checks::in_record_channel")]
    pub async fn submitpb(
        ctx: Context<'_>,
        #[description = "Map code"] map_code: String,
        #[description = "Level name"] level: String,
        #[description = "Time as HH:MM:SS.ss"] record: String,
    ) -> Result<()> {
        let poise::Context::Prefix(prefix) = ctx else {
            return Ok(());
        };
        let submission = prefix.msg;
        let db = &ctx.data().database;

        let code = map::parse_map_code(&map_code)?;
        let level = level.to_uppercase();
        let seconds = record::parse_time(&record)?;
        let author_id = ctx.author().id.to_string();
        let name = ctx.author().name.clone();

        let levels = record::levels_for_code(db, &code).await?;
        let existing = record::find_personal_best(db, &code, &level, &author_id).await?;
        record::ensure_faster(existing.as_ref(), seconds)?;

        let preview = render::record_preview(
            Page::new().field("Currently submitted level names:", render::level_list(&levels)),
            &name,
            &code,
            &level,
            seconds,
        );
        let (message, outcome) =
            discord::ask_confirmation(ctx, "Is this correct?", &preview).await?;

        match outcome {
            Confirmation::Accepted => {
                let http = &ctx.serenity_context().http;
                let queue = verification::HiddenChannel::new(http, ctx.data());
                let saved = record::submit_personal_best(
                    db,
                    &queue,
                    NewRecord {
                        code,
                        level,
                        name,
                        posted_by: author_id,
                        message_id: submission.id.to_string(),
                        url: submission.link(),
                        record: seconds,
                        hidden_id: None,
                    },
                )
                .await?;
                info!(
                    code = %saved.code,
                    level = %saved.level,
                    author = %ctx.author().name,
                    "Personal best submitted"
                );
                message.report("Submission accepted").await;

                let proof = DiscordMessage::new(
                    Arc::clone(http),
                    submission.channel_id,
                    submission.id,
                );
                clean_up(proof.add_reaction(VERIFIED_EMOJI).await, "add verify reaction");
                clean_up(proof.add_reaction(NOT_VERIFIED_EMOJI).await, "add reject reaction");

                if let Some(rank) = record::scoreboard_rank(db, &saved).await? {
                    ctx.say(format!("Your rank is {rank} on the unverified scoreboard."))
                        .await?;
                }
            }
            Confirmation::Rejected => {
                message.report("Submission has not been accepted.").await;
            }
            Confirmation::TimedOut => {
                message
                    .report("Submission timed out! Submission has not been accepted.")
                    .await;
            }
        }
        Ok(())
    }

    /// Delete a personal best. Only the player and mods can delete it.
    #[poise::command(slash_command, prefix_command, check = "checks::in_record_channel")]
    pub async fn deletepb(
        ctx: Context<'_>,
        #[description = "Map code"] map_code: String,
        #[description = "Level name"] level: String,
        #[description = "Player name, defaults to you"]
        #[rest]
        name: Option<String>,
    ) -> Result<()> {
        let db = &ctx.data().database;
        let name = name.unwrap_or_else(|| ctx.author().name.clone());
        let stored = record::find_by_name(db, &map_code, &level, &name)
            .await?
            .ok_or(Error::RecordNotFound)?;
        checks::require_owner_or_moderator(
            ctx,
            &stored.posted_by,
            "Personal best was not deleted.",
        )
        .await?;

        let preview = render::record_preview(
            Page::new(),
            &stored.name,
            &stored.code,
            &stored.level,
            stored.record,
        );
        let (message, outcome) =
            discord::ask_confirmation(ctx, "Do you want to delete this?", &preview).await?;

        match outcome {
            Confirmation::Accepted => {
                info!(
                    code = %stored.code,
                    level = %stored.level,
                    author = %ctx.author().name,
                    "Personal best deleted"
                );
                record::delete_record(db, stored.clone()).await?;
                let http = &ctx.serenity_context().http;
                verification::delete_hidden_entry(http, ctx.data(), &stored).await;
                message.report("Personal best deleted successfully.").await;
            }
            Confirmation::Rejected => {
                message.report("Personal best was not deleted.").await;
            }
            Confirmation::TimedOut => {
                message
                    .report("Deletion timed out! Personal best has not been deleted.")
                    .await;
            }
        }
        Ok(())
    }

    /// Show personal bests, yours by default or of any player whose name contains the text.
    #[poise::command(slash_command, prefix_command, check = "checks::in_record_channel_or_dm")]
    pub async fn pb(
        ctx: Context<'_>,
        #[description = "Player name"]
        #[rest]
        name: Option<String>,
    ) -> Result<()> {
        let db = &ctx.data().database;
        let (title, query) = match name {
            Some(name) => (name.clone(), PersonalBestQuery::Name(name)),
            None => (
                ctx.author().name.clone(),
                PersonalBestQuery::Own {
                    user_id: ctx.author().id.to_string(),
                    name: ctx.author().name.clone(),
                },
            ),
        };

        let records = record::personal_bests(db, &query).await?;
        let maps = map::maps_by_codes(db, records.iter().map(|r| r.code.clone())).await?;
        discord::show_pages(
            ctx,
            &title,
            render::personal_best_pages(&records, &maps),
            &format!("Nothing exists for {title}!"),
        )
        .await
    }

    async fn show_board(
        ctx: Context<'_>,
        map_code: &str,
        level: &str,
        verified_only: bool,
    ) -> Result<()> {
        let code = map_code.to_ascii_uppercase();
        let level = level.to_uppercase();
        let records: Vec<RecordModel> =
            record::top_records(&ctx.data().database, &code, &level, verified_only).await?;
        if records.is_empty() {
            ctx.say(format!("No scoreboard for {code} level {level}!"))
                .await?;
            return Ok(());
        }
        let kind = if verified_only {
            "VERIFIED"
        } else {
            "VERIFIED/UNVERIFIED"
        };
        let title = format!("{code} - LEVEL {level} - TOP 10 {kind} RECORDS:\n");
        discord::send_embed(ctx, &title, &render::board_page(&records)).await?;
        Ok(())
    }

    /// Top 10 times of a level, verified or not.
    #[poise::command(
        slash_command,
        prefix_command,
        aliases("sb"),
        check = "checks::in_record_channel_or_dm"
    )]
    pub async fn scoreboard(
        ctx: Context<'_>,
        #[description = "Map code"] map_code: String,
        #[description = "Level name"]
        #[rest]
        level: String,
    ) -> Result<()> {
        show_board(ctx, &map_code, &level, false).await
    }

    /// Top 10 verified times of a level.
    #[poise::command(
        slash_command,
        prefix_command,
        aliases("lb"),
        check = "checks::in_record_channel_or_dm"
    )]
    pub async fn leaderboard(
        ctx: Context<'_>,
        #[description = "Map code"] map_code: String,
        #[description = "Level name"]
        #[rest]
        level: String,
    ) -> Result<()> {
        show_board(ctx, &map_code, &level, true).await
    }

    /// Verified world records of a map, or of one of its levels.
    #[poise::command(
        slash_command,
        prefix_command,
        aliases("wr"),
        check = "checks::in_record_channel_or_dm"
    )]
    pub async fn worldrecord(
        ctx: Context<'_>,
        #[description = "Map code"] map_code: String,
        #[description = "Level name"]
        #[rest]
        level: Option<String>,
    ) -> Result<()> {
        let db = &ctx.data().database;
        let code = map_code.to_ascii_uppercase();

        let Some(level) = level else {
            let records = record::world_records(db, &code).await?;
            if records.is_empty() {
                ctx.say(format!("No world record for {code}!")).await?;
                return Ok(());
            }
            let title = format!("{code} - VERIFIED WORLD RECORDS:\n");
            discord::send_embed(ctx, &title, &render::world_records_page(&records)).await?;
            return Ok(());
        };

        let level = level.to_uppercase();
        match record::world_record(db, &code, &level).await? {
            Some(best) => {
                let title = format!("{code} - LEVEL {level} - VERIFIED WORLD RECORD:\n");
                let embed = discord::page_embed(&title, &render::world_record_page(&best), None);
                discord::send_reply(
                    ctx,
                    poise::CreateReply::default().content(&best.url).embed(embed),
                )
                .await?;
            }
            None => {
                ctx.say(format!("No world record for {code} level {level}!"))
                    .await?;
            }
        }
        Ok(())
    }

    /// Level names with submitted times on a map.
    #[poise::command(
        slash_command,
        prefix_command,
        aliases("levelnames"),
        check = "checks::in_record_channel_or_dm"
    )]
    pub async fn levels(
        ctx: Context<'_>,
        #[description = "Map code"] map_code: String,
    ) -> Result<()> {
        let code = map_code.to_ascii_uppercase();
        let levels = record::levels_for_code(&ctx.data().database, &code).await?;
        if levels.is_empty() {
            ctx.say(format!("No level names found for {code}!")).await?;
            return Ok(());
        }
        let page = Page::new().field("Currently submitted levels:", levels.join("\n"));
        discord::send_embed(ctx, &format!("{code} - LEVEL NAMES:\n"), &page).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
