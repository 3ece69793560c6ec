//! General Discord commands - ping and help.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{bot::Context, errors::Result};

    /// Responds with "Pong!" to test bot connectivity.
    ///
    /// This is a simple health check command that doesn't require any database operations.
    #[poise::command(slash_command, prefix_command)]
    pub async fn ping(ctx: Context<'_>) -> Result<()> {
        ctx.say("Pong!").await?;
        Ok(())
    }

    /// Displays help information about available commands.
    #[poise::command(slash_command, prefix_command)]
    pub async fn help(ctx: Context<'_>) -> Result<()> {
        let prefix = &ctx.data().settings.prefix;
        let help_text = format!(
            "**Parkour Bot Help**\n\
        Here is a summary of all available commands.\n\n\
        **Map Search** (map channel or DMs)\n\
        • `{prefix}search <map> [type]` - Maps on an Overwatch map.\n\
        • `{prefix}maptype <type>` / `{prefix}framework` / `{prefix}creator <name>` - Filtered lists.\n\
        • `{prefix}mapcode <code>` / `{prefix}newest [type]` - One code, or the latest submissions.\n\n\
        **Map Submission** (submission channel)\n\
        • `{prefix}submitmap <code> <map> <types> <creator> [description]` - Submit a map code.\n\
        • `{prefix}editdesc` / `{prefix}edittypes` / `{prefix}editcode` / `{prefix}deletemap` - Change your map.\n\
        • `{prefix}maps` / `{prefix}maptypes` - Accepted map names and types.\n\n\
        **Personal Bests** (record channel)\n\
        • `{prefix}submitpb <code> <level> <time>` - Submit a time with proof attached.\n\
        • `{prefix}deletepb <code> <level> [name]` / `{prefix}pb [name]` - Manage and list times.\n\
        • `{prefix}scoreboard` / `{prefix}leaderboard` / `{prefix}worldrecord` / `{prefix}levels` - Boards.\n\n\
        **Tournament** (tournament channels)\n\
        • `{prefix}tournament submit <time>` / `{prefix}tournament board`\n\n\
        **Utility Commands**\n\
        • `/ping` - Checks if the bot is responsive.\n\
        • `/help` - Shows this help message."
        );

        ctx.say(help_text).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
