//! Map search commands - browse maps by name, type, creator or code.

mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{Context, checks, discord, handlers::autocomplete},
        constants::NEWEST_MAPS_LIMIT,
        core::{
            map::{self, MapQuery},
            pagination::Page,
            render,
        },
        errors::Result,
    };

    async fn show_maps(ctx: Context<'_>, title: &str, query: MapQuery) -> Result<()> {
        let maps = map::find_maps(&ctx.data().database, &query).await?;
        discord::show_pages(
            ctx,
            title,
            render::map_pages(&maps),
            &format!("Nothing exists for {title}!"),
        )
        .await
    }

    /// Search maps on an Overwatch map, optionally narrowed to one map type.
    #[poise::command(slash_command, prefix_command, check = "checks::in_map_channel_or_dm")]
    pub async fn search(
        ctx: Context<'_>,
        #[description = "Overwatch map"]
        #[autocomplete = "autocomplete::autocomplete_map_name"]
        map_name: String,
        #[description = "Map type"]
        #[autocomplete = "autocomplete::autocomplete_map_type"]
        map_type: Option<String>,
    ) -> Result<()> {
        let key = map::parse_map_name(&map_name)?;
        let map_type = map_type.as_deref().map(map::parse_map_type).transpose()?;
        let title = map::pretty_name(key).to_string();
        show_maps(
            ctx,
            &title,
            MapQuery::Name {
                map_name: key.to_string(),
                map_type,
            },
        )
        .await
    }

    /// Search maps of one map type.
    #[poise::command(slash_command, prefix_command, check = "checks::in_map_channel_or_dm")]
    pub async fn maptype(
        ctx: Context<'_>,
        #[description = "Map type"]
        #[autocomplete = "autocomplete::autocomplete_map_type"]
        map_type: String,
    ) -> Result<()> {
        let map_type = map::parse_map_type(&map_type)?;
        show_maps(ctx, &map_type.clone(), MapQuery::Type(map_type)).await
    }

    /// Search frameworks.
    #[poise::command(
        slash_command,
        prefix_command,
        aliases("fw"),
        check = "checks::in_map_channel_or_dm"
    )]
    pub async fn framework(ctx: Context<'_>) -> Result<()> {
        show_maps(ctx, "FRAMEWORK", MapQuery::Framework).await
    }

    /// Search maps by creator.
    #[poise::command(slash_command, prefix_command, check = "checks::in_map_channel_or_dm")]
    pub async fn creator(
        ctx: Context<'_>,
        #[description = "Part of the creator's name"] creator: String,
    ) -> Result<()> {
        show_maps(ctx, &creator.clone(), MapQuery::Creator(creator)).await
    }

    /// Show a single map code.
    #[poise::command(
        slash_command,
        prefix_command,
        aliases("code"),
        check = "checks::in_map_channel_or_dm"
    )]
    pub async fn mapcode(
        ctx: Context<'_>,
        #[description = "Map code"] map_code: String,
    ) -> Result<()> {
        let code = map_code.to_ascii_uppercase();
        match map::get_map_by_code(&ctx.data().database, &code).await? {
            Some(found) => {
                let mut page = Page::new();
                render::push_map_field(&mut page, &found);
                discord::send_embed(ctx, &code, &page).await?;
            }
            None => {
                ctx.say(format!("Nothing exists for {code}!")).await?;
            }
        }
        Ok(())
    }

    /// Show the latest submitted maps, optionally of one map type.
    #[poise::command(
        slash_command,
        prefix_command,
        aliases("new", "latest"),
        check = "checks::in_map_channel_or_dm"
    )]
    pub async fn newest(
        ctx: Context<'_>,
        #[description = "Map type"]
        #[autocomplete = "autocomplete::autocomplete_map_type"]
        map_type: Option<String>,
    ) -> Result<()> {
        let map_type = map_type.as_deref().map(map::parse_map_type).transpose()?;
        let maps =
            map::newest_maps(&ctx.data().database, map_type.as_deref(), NEWEST_MAPS_LIMIT).await?;
        if maps.is_empty() {
            ctx.say("No latest maps!").await?;
            return Ok(());
        }
        let mut page = Page::new();
        for found in &maps {
            render::push_map_field(&mut page, found);
        }
        discord::send_embed(ctx, "Latest Maps", &page).await?;
        Ok(())
    }
}

pub use inner::*;
