//! Autocomplete handlers for Discord slash command parameters.
//!
//! Suggestions come from the fixed map name and map type lists, so no database access is
//! needed.

use crate::{
    bot::BotData,
    constants::{ALL_MAP_NAMES, TYPES_OF_MAP},
    errors::Error,
};

/// Discord shows at most this many suggestions
const AUTOCOMPLETE_LIMIT: usize = 25;

/// Map names whose pretty name or any alias contains the partial input.
#[must_use]
pub fn matching_map_names(partial: &str) -> Vec<String> {
    let partial_lower = partial.to_lowercase();
    let partial_key = crate::core::map::normalize_map_name(partial);

    ALL_MAP_NAMES
        .iter()
        .filter(|map| {
            map.pretty.to_lowercase().contains(&partial_lower)
                || map.aliases.iter().any(|alias| alias.contains(&partial_key))
        })
        .map(|map| map.pretty.to_string())
        .take(AUTOCOMPLETE_LIMIT)
        .collect()
}

/// Map types containing the partial input, case-insensitive.
#[must_use]
pub fn matching_map_types(partial: &str) -> Vec<String> {
    let partial_upper = partial.trim().to_uppercase();

    TYPES_OF_MAP
        .iter()
        .filter(|map_type| map_type.contains(&partial_upper))
        .map(|&map_type| map_type.to_string())
        .take(AUTOCOMPLETE_LIMIT)
        .collect()
}

/// Provides autocomplete suggestions for Overwatch map names.
#[allow(clippy::unused_async)]
pub async fn autocomplete_map_name(
    _ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    matching_map_names(partial)
}

/// Provides autocomplete suggestions for map types.
#[allow(clippy::unused_async)]
pub async fn autocomplete_map_type(
    _ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    matching_map_types(partial)
}
