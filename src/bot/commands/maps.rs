//! Map submission commands - submit, edit and delete map codes, plus the catalog listings.
//!
//! Every write is previewed and only committed after the author confirms it.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{
            Context, checks,
            discord::{self, DiscordMessage},
            handlers::autocomplete,
        },
        constants::{ALL_MAP_NAMES, CANCEL_REACTION_EMOJI, CONFIRM_REACTION_EMOJI, TYPES_OF_MAP},
        core::{
            confirmation::Confirmation,
            map::{self, MapEdit, NewMap},
            render,
        },
        errors::Result,
    };
    use tracing::info;

    /// Submit a map code with an optional description.
    ///
    /// Wrap several creators or map types in one set of quotation marks, for example
    /// "name1 & name2" or "pioneer hardcore".
    #[poise::command(slash_command, prefix_command, check = "checks::in_map_submit_channel")]
    pub async fn submitmap(
        ctx: Context<'_>,
        #[description = "Workshop share code"] map_code: String,
        #[description = "Overwatch map"]
        #[autocomplete = "autocomplete::autocomplete_map_name"]
        map_name: String,
        #[description = "Map types separated by spaces"] map_types: String,
        #[description = "Creator name(s)"] creator: String,
        #[description = "Number of levels, checkpoints, etc."]
        #[rest]
        description: Option<String>,
    ) -> Result<()> {
        let db = &ctx.data().database;
        let code = map::parse_map_code(&map_code)?;
        let map_name = map::parse_map_name(&map_name)?;
        let map_types = map::parse_map_types(&map_types)?;
        map::ensure_code_free(db, &code).await?;
        let description = description.unwrap_or_default();

        let types: Vec<&str> = map_types.iter().map(String::as_str).collect();
        let preview = render::map_preview(&code, map_name, &creator, &types, &description);
        let (message, outcome) =
            discord::ask_confirmation(ctx, "Is this submission correct?", &preview).await?;

        match outcome {
            Confirmation::Accepted => {
                map::create_map(
                    db,
                    NewMap {
                        code: code.clone(),
                        creator,
                        map_name: map_name.to_string(),
                        posted_by: ctx.author().id.to_string(),
                        map_types,
                        description,
                    },
                )
                .await?;
                info!(code = %code, author = %ctx.author().name, "Map submitted");
                message
                    .report(format!(
                        "{CONFIRM_REACTION_EMOJI} Confirmed! Map submission accepted."
                    ))
                    .await;
            }
            Confirmation::Rejected => {
                message
                    .report(format!("{CANCEL_REACTION_EMOJI} Map submission rejected."))
                    .await;
            }
            Confirmation::TimedOut => {
                message
                    .report("Submission timed out! Map submission rejected.")
                    .await;
            }
        }
        Ok(())
    }

    /// Delete a map code. Only original posters and mods can delete a map code.
    #[poise::command(slash_command, prefix_command, check = "checks::in_map_submit_channel")]
    pub async fn deletemap(
        ctx: Context<'_>,
        #[description = "Map code to delete"] map_code: String,
    ) -> Result<()> {
        let db = &ctx.data().database;
        let stored = map::require_map(db, &map_code).await?;
        checks::require_owner_or_moderator(ctx, &stored.posted_by, "Map was not deleted.")
            .await?;

        let preview = render::stored_map_preview(&stored);
        let (message, outcome) =
            discord::ask_confirmation(ctx, "Do you want to delete this?", &preview).await?;

        let code = stored.code.clone();
        match outcome {
            Confirmation::Accepted => {
                map::delete_map(db, stored).await?;
                info!(code = %code, author = %ctx.author().name, "Map deleted");
                message.report(format!("{code} has been deleted.")).await;
            }
            Confirmation::Rejected => {
                message.report(format!("{code} has not been deleted.")).await;
            }
            Confirmation::TimedOut => {
                message
                    .report(format!("Submission timed out! {code} has not been deleted."))
                    .await;
            }
        }
        Ok(())
    }

    /// Replace the description of a map code. Only original posters and mods can edit it.
    #[poise::command(slash_command, prefix_command, check = "checks::in_map_submit_channel")]
    pub async fn editdesc(
        ctx: Context<'_>,
        #[description = "Map code to edit"] map_code: String,
        #[description = "New description"]
        #[rest]
        description: String,
    ) -> Result<()> {
        edit_map(ctx, &map_code, MapEdit::Description(description)).await
    }

    /// Replace the map types of a map code. Only original posters and mods can edit it.
    #[poise::command(slash_command, prefix_command, check = "checks::in_map_submit_channel")]
    pub async fn edittypes(
        ctx: Context<'_>,
        #[description = "Map code to edit"] map_code: String,
        #[description = "New map types separated by spaces"]
        #[rest]
        map_types: String,
    ) -> Result<()> {
        let map_types = map::parse_map_types(&map_types)?;
        edit_map(ctx, &map_code, MapEdit::Types(map_types)).await
    }

    /// Move a map to a new map code. Only original posters and mods can edit it.
    #[poise::command(slash_command, prefix_command, check = "checks::in_map_submit_channel")]
    pub async fn editcode(
        ctx: Context<'_>,
        #[description = "Current map code"] map_code: String,
        #[description = "New map code"] new_map_code: String,
    ) -> Result<()> {
        let new_code = map::parse_map_code(&new_map_code)?;
        if !new_code.eq_ignore_ascii_case(&map_code) {
            map::ensure_code_free(&ctx.data().database, &new_code).await?;
        }
        edit_map(ctx, &map_code, MapEdit::Code(new_code)).await
    }

    async fn edit_map(ctx: Context<'_>, map_code: &str, edit: MapEdit) -> Result<()> {
        let db = &ctx.data().database;
        let stored = map::require_map(db, map_code).await?;
        checks::require_owner_or_moderator(ctx, &stored.posted_by, "Map was not edited.")
            .await?;

        let edited = edit.preview(&stored);
        let preview = render::stored_map_preview(&edited);
        let (message, outcome) =
            discord::ask_confirmation(ctx, "Is this submission correct?", &preview).await?;

        report_edit(ctx, &message, outcome, stored, edit, &edited.code).await
    }

    async fn report_edit(
        ctx: Context<'_>,
        message: &DiscordMessage,
        outcome: Confirmation,
        stored: crate::entities::MapModel,
        edit: MapEdit,
        code: &str,
    ) -> Result<()> {
        match outcome {
            Confirmation::Accepted => {
                map::apply_edit(&ctx.data().database, stored, edit).await?;
                info!(code, author = %ctx.author().name, "Map edited");
                message.report(format!("{code} has been edited.")).await;
            }
            Confirmation::Rejected => {
                message.report(format!("{code} has not been edited.")).await;
            }
            Confirmation::TimedOut => {
                message
                    .report(format!("Submission timed out! {code} has not been edited."))
                    .await;
            }
        }
        Ok(())
    }

    /// Shows all acceptable map names for commands.
    #[poise::command(slash_command, prefix_command, check = "checks::in_map_or_submit_channel")]
    pub async fn maps(ctx: Context<'_>) -> Result<()> {
        let names: Vec<String> = ALL_MAP_NAMES
            .iter()
            .map(|map| map.aliases.join(" | "))
            .collect();
        ctx.say(format!("```Acceptable map names:\n{}\n```", names.join("\n")))
            .await?;
        Ok(())
    }

    /// Shows all acceptable map types for commands.
    #[poise::command(
        slash_command,
        prefix_command,
        aliases("types"),
        check = "checks::in_map_or_submit_channel"
    )]
    pub async fn maptypes(ctx: Context<'_>) -> Result<()> {
        ctx.say(format!("Map types:\n```{}```", TYPES_OF_MAP.join("\n")))
            .await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
