//! Tournament commands - the channel decides the category a time counts for.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{Context, discord},
        core::{
            confirmation::Confirmation,
            pagination::Page,
            record, render,
            tournament::{self, Category, NewTournamentTime},
        },
        errors::{Error, Result},
    };
    use tracing::info;

    fn channel_category(ctx: Context<'_>) -> Result<Category> {
        ctx.data()
            .settings
            .channels
            .tournament
            .category_for(ctx.channel_id().get())
            .ok_or(Error::NotTournamentChannel)
    }

    /// Tournament times. Use the subcommands in a tournament channel.
    #[poise::command(
        slash_command,
        prefix_command,
        subcommands("tournament_submit", "tournament_board")
    )]
    pub async fn tournament(ctx: Context<'_>) -> Result<()> {
        ctx.say(
            "Tournament commands. Available subcommands:\n\
            `tournament submit <time>` - Submit a time with a screenshot attached\n\
            `tournament board` - Show the times of this channel's category",
        )
        .await?;
        Ok(())
    }

    /// Submit a tournament time. Attach a screenshot to the message as proof.
    #[poise::command(prefix_command, rename = "submit")]
    pub async fn tournament_submit(
        ctx: Context<'_>,
        #[description = "Time as HH:MM:SS.ss"] record: String,
    ) -> Result<()> {
        let poise::Context::Prefix(prefix) = ctx else {
            return Ok(());
        };
        let category = channel_category(ctx)?;
        let attachment = prefix
            .msg
            .attachments
            .first()
            .ok_or(Error::MissingAttachment)?;
        let seconds = record::parse_time(&record)?;
        let name = ctx.author().name.clone();

        let preview = Page::new().field(
            format!("Name: {name}"),
            format!(
                "> Category: {category}\n> Record: {}\n",
                record::display_record(seconds)
            ),
        );
        let (message, outcome) =
            discord::ask_confirmation(ctx, "Is this correct?", &preview).await?;

        match outcome {
            Confirmation::Accepted => {
                let saved = tournament::submit_time(
                    &ctx.data().database,
                    NewTournamentTime {
                        category,
                        posted_by: ctx.author().id.to_string(),
                        name,
                        record: seconds,
                        attachment_url: attachment.url.clone(),
                    },
                )
                .await?;
                info!(category = %category, author = %saved.name, "Tournament time submitted");
                message.report("Submission accepted").await;
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

    /// Show the times of this channel's tournament category, fastest first.
    #[poise::command(slash_command, prefix_command, rename = "board")]
    pub async fn tournament_board(ctx: Context<'_>) -> Result<()> {
        let category = channel_category(ctx)?;
        let entries = tournament::board(&ctx.data().database, category).await?;
        let title = format!("{} TOURNAMENT", category.to_string().to_uppercase());
        discord::show_pages(
            ctx,
            &title,
            render::tournament_pages(&entries),
            &format!("No times exist for the {category} tournament!"),
        )
        .await
    }
}

// Re-export all commands
pub use inner::*;
