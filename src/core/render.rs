//! Page builders turning stored rows into embed-shaped [`Page`]s.
//!
//! Everything here is plain text; the Discord adapter turns pages into embeds.

use super::map::pretty_name;
use super::pagination::Page;
use super::record::display_record;
use crate::constants::{
    FIELD_VALUE_MAX_LENGTH, NOT_VERIFIED_EMOJI, PAGE_SIZE, PB_MAPS_PER_PAGE, PB_SEPARATOR,
    VERIFIED_EMOJI,
};
use crate::entities::{map, record, tournament_record};
use std::collections::HashMap;

const fn verified_symbol(verified: bool) -> &'static str {
    if verified {
        VERIFIED_EMOJI
    } else {
        NOT_VERIFIED_EMOJI
    }
}

/// Search result field for one map.
pub fn push_map_field(page: &mut Page, map: &map::Model) {
    page.push_field(
        format!("{} - {}", map.code, pretty_name(&map.map_name)),
        format!(
            "> Creator: {}\n> Map Types: {}\n> Description: {}",
            map.creator,
            map.types().join(", "),
            map.description
        ),
    );
}

/// Search results, [`PAGE_SIZE`] maps per page.
#[must_use]
pub fn map_pages(maps: &[map::Model]) -> Vec<Page> {
    maps.chunks(PAGE_SIZE)
        .map(|chunk| {
            let mut page = Page::new();
            for map in chunk {
                push_map_field(&mut page, map);
            }
            page
        })
        .collect()
}

/// Preview of a map shown before a submission, edit or deletion is confirmed.
#[must_use]
pub fn map_preview(
    map_code: &str,
    map_name: &str,
    creator: &str,
    types: &[&str],
    description: &str,
) -> Page {
    Page::new().field(
        map_code,
        format!(
            "> Map: {}\n> Creator: {creator}\n> Map Types: {}\n> Description: {description}",
            pretty_name(map_name),
            types.join(" "),
        ),
    )
}

/// [`map_preview`] for a stored map.
#[must_use]
pub fn stored_map_preview(map: &map::Model) -> Page {
    map_preview(
        &map.code,
        &map.map_name,
        &map.creator,
        &map.types(),
        &map.description,
    )
}

/// Preview of a personal best before it is saved or deleted.
#[must_use]
pub fn record_preview(page: Page, name: &str, code: &str, level: &str, seconds: f64) -> Page {
    page.field(
        format!("Name: {name}"),
        format!(
            "> Code: {code}\n> Level: {}\n> Record: {}\n",
            level.to_uppercase(),
            display_record(seconds)
        ),
    )
}

/// Comma separated level names, `N/A` when there are none.
#[must_use]
pub fn level_list(levels: &[String]) -> String {
    if levels.is_empty() {
        "N/A".to_string()
    } else {
        levels.join(", ")
    }
}

/// Ranked scoreboard or leaderboard.
#[must_use]
pub fn board_page(records: &[record::Model]) -> Page {
    let mut page = Page::new();
    for (rank, entry) in records.iter().enumerate() {
        page.push_field(
            format!("#{} - {}", rank + 1, entry.name),
            format!(
                "> Record: {}\n> Verified: {}",
                display_record(entry.record),
                verified_symbol(entry.verified)
            ),
        );
    }
    page
}

/// Best verified time of every level on a map.
#[must_use]
pub fn world_records_page(records: &[record::Model]) -> Page {
    let mut page = Page::new();
    for entry in records {
        page.push_field(
            format!("Level {} - {}", entry.level, entry.name),
            format!("> Record: {}\n", display_record(entry.record)),
        );
    }
    page
}

/// Fastest verified time on one level.
#[must_use]
pub fn world_record_page(record: &record::Model) -> Page {
    Page::new().field(
        record.name.as_str(),
        format!("> Record: {}\n", display_record(record.record)),
    )
}

/// Tournament board, [`PAGE_SIZE`] entries per page with a continuous rank.
#[must_use]
pub fn tournament_pages(entries: &[tournament_record::Model]) -> Vec<Page> {
    entries
        .chunks(PAGE_SIZE)
        .enumerate()
        .map(|(chunk_index, chunk)| {
            let mut page = Page::new();
            for (offset, entry) in chunk.iter().enumerate() {
                page.push_field(
                    format!("#{} - {}", chunk_index * PAGE_SIZE + offset + 1, entry.name),
                    format!("> Record: {}\n", display_record(entry.record)),
                );
            }
            page
        })
        .collect()
}

struct MapGroup<'a> {
    code: &'a str,
    title: String,
    entries: Vec<String>,
}

/// Personal bests grouped per map code, [`PB_MAPS_PER_PAGE`] maps per page.
///
/// `records` must be ordered by map code. `maps` supplies name and creator per code; codes
/// without a stored map show placeholders. A group whose text exceeds the embed field
/// limit is spread over numbered fields.
#[must_use]
pub fn personal_best_pages(
    records: &[record::Model],
    maps: &HashMap<String, map::Model>,
) -> Vec<Page> {
    let mut groups: Vec<MapGroup<'_>> = Vec::new();
    for entry in records {
        let text = format!(
            "> **Level: {}**\n> Record: {}\n> Verified: {}\n{PB_SEPARATOR}\n",
            entry.level,
            display_record(entry.record),
            verified_symbol(entry.verified)
        );
        match groups.last_mut() {
            Some(group) if group.code == entry.code => {
                group.entries.push(text);
            }
            _ => {
                let title = maps.get(&entry.code).map_or_else(
                    || format!("{} - Needs Map by Needs Author\n", entry.code),
                    |map| {
                        format!(
                            "{} - {} by {}\n",
                            entry.code,
                            pretty_name(&map.map_name),
                            map.creator
                        )
                    },
                );
                groups.push(MapGroup {
                    code: &entry.code,
                    title,
                    entries: vec![text],
                });
            }
        }
    }

    groups
        .chunks(PB_MAPS_PER_PAGE)
        .map(|chunk| {
            let mut page = Page::new();
            for group in chunk {
                let values = pack_entries(&group.entries);
                if values.len() == 1 {
                    page.push_field(group.title.as_str(), values.concat());
                } else {
                    for (part, value) in values.into_iter().enumerate() {
                        page.push_field(format!("{} ({})", group.title, part + 1), value);
                    }
                }
            }
            page
        })
        .collect()
}

/// Joins entries into as few field values as fit [`FIELD_VALUE_MAX_LENGTH`] characters.
///
/// An entry never straddles two values. A single entry over the limit is cut short.
fn pack_entries(entries: &[String]) -> Vec<String> {
    let mut values = Vec::new();
    let mut current = String::new();
    let mut current_chars = 0;
    for entry in entries {
        let entry: String = entry.chars().take(FIELD_VALUE_MAX_LENGTH).collect();
        let entry_chars = entry.chars().count();
        if current_chars > 0 && current_chars + entry_chars > FIELD_VALUE_MAX_LENGTH {
            values.push(std::mem::take(&mut current));
            current_chars = 0;
        }
        current.push_str(&entry);
        current_chars += entry_chars;
    }
    if !current.is_empty() {
        values.push(current);
    }
    values
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::entities::map::encode_types;

    fn map_model(code: &str, map_name: &str) -> map::Model {
        map::Model {
            id: 1,
            code: code.to_string(),
            creator: "Maker".to_string(),
            map_name: map_name.to_string(),
            posted_by: "1".to_string(),
            map_types: encode_types(&["PIONEER", "HARDCORE"]),
            description: "Fun".to_string(),
            created_at: chrono::Utc::now(),
        }
    }

    fn record_model(
        id: i64,
        code: &str,
        level: &str,
        seconds: f64,
        verified: bool,
    ) -> record::Model {
        record::Model {
            id,
            code: code.to_string(),
            name: format!("player{id}"),
            posted_by: id.to_string(),
            message_id: id.to_string(),
            url: String::new(),
            level: level.to_string(),
            record: seconds,
            verified,
            hidden_id: None,
        }
    }

    #[test]
    fn test_map_field_format() {
        let mut page = Page::new();
        push_map_field(&mut page, &map_model("ABC", "kingsrow"));
        assert_eq!(page.fields[0].name, "ABC - King's Row");
        assert_eq!(
            page.fields[0].value,
            "> Creator: Maker\n> Map Types: PIONEER, HARDCORE\n> Description: Fun"
        );
    }

    #[test]
    fn test_map_pages_chunking() {
        let maps: Vec<map::Model> = (0..23).map(|i| map_model(&format!("C{i}"), "busan")).collect();
        let pages = map_pages(&maps);
        let sizes: Vec<usize> = pages.iter().map(Page::len).collect();
        assert_eq!(sizes, vec![10, 10, 3]);
        assert_eq!(pages[2].fields[0].name, "C20 - Busan");
        assert!(map_pages(&[]).is_empty());
    }

    #[test]
    fn test_preview_and_board() {
        let preview = stored_map_preview(&map_model("ABC", "hanamura"));
        assert_eq!(preview.fields[0].name, "ABC");
        assert!(preview.fields[0].value.starts_with("> Map: Hanamura\n"));
        assert!(preview.fields[0].value.contains("> Map Types: PIONEER HARDCORE"));

        let board = board_page(&[
            record_model(1, "ABC", "1", 20.0, true),
            record_model(2, "ABC", "1", 30.5, false),
        ]);
        assert_eq!(board.fields[1].name, "#2 - player2");
        assert_eq!(board.fields[1].value, "> Record: 0:00:30.50\n> Verified: ❌");
    }

    #[test]
    fn test_record_preview() {
        let page = record_preview(Page::new(), "someone", "ABC", "bonus", 65.25);
        assert_eq!(page.fields[0].name, "Name: someone");
        assert_eq!(
            page.fields[0].value,
            "> Code: ABC\n> Level: BONUS\n> Record: 0:01:05.25\n"
        );
        assert_eq!(level_list(&[]), "N/A");
        assert_eq!(level_list(&["1".to_string(), "2".to_string()]), "1, 2");
    }

    #[test]
    fn test_tournament_ranks_continue_across_pages() {
        let entries: Vec<tournament_record::Model> = (1..=12)
            .map(|i| tournament_record::Model {
                id: i,
                category: "BONUS".to_string(),
                posted_by: i.to_string(),
                name: format!("p{i}"),
                record: 10.0,
                attachment_url: String::new(),
                created_at: chrono::Utc::now(),
            })
            .collect();
        let pages = tournament_pages(&entries);
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[1].fields[0].name, "#11 - p11");
    }

    #[test]
    fn test_personal_best_grouping() {
        let mut maps = HashMap::new();
        maps.insert("AAA".to_string(), map_model("AAA", "busan"));
        let records = vec![
            record_model(1, "AAA", "1", 10.0, true),
            record_model(2, "AAA", "2", 11.0, false),
            record_model(3, "BBB", "1", 12.0, false),
            record_model(4, "CCC", "1", 12.0, false),
            record_model(5, "DDD", "1", 12.0, false),
        ];
        let pages = personal_best_pages(&records, &maps);

        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].len(), 3);
        assert_eq!(pages[0].fields[0].name, "AAA - Busan by Maker\n");
        assert!(pages[0].fields[0].value.contains("> **Level: 2**"));
        assert_eq!(pages[0].fields[1].name, "BBB - Needs Map by Needs Author\n");
        assert_eq!(pages[1].fields[0].name, "DDD - Needs Map by Needs Author\n");
    }

    #[test]
    fn test_long_personal_best_group_is_split() {
        let records: Vec<record::Model> = (1..=20)
            .map(|i| record_model(i, "AAA", &format!("LEVEL {i}"), 100.0, true))
            .collect();
        let pages = personal_best_pages(&records, &HashMap::new());

        let page = &pages[0];
        assert_eq!(page.len(), 2);
        assert!(page.fields[0].name.ends_with("(1)"));
        assert!(page.fields[1].name.ends_with("(2)"));
        assert!(page.fields[1].value.contains("LEVEL 20"));
    }

    #[test]
    fn test_large_group_fields_stay_within_limit() {
        let records: Vec<record::Model> = (1..=40)
            .map(|i| record_model(i, "AAA", &format!("LEVEL {i}"), 100.0, i % 2 == 0))
            .collect();
        let pages = personal_best_pages(&records, &HashMap::new());

        let fields = &pages[0].fields;
        assert!(fields.len() > 2);
        for (part, field) in fields.iter().enumerate() {
            assert!(field.value.chars().count() <= FIELD_VALUE_MAX_LENGTH);
            assert!(field.name.ends_with(&format!("({})", part + 1)));
        }
        // Every level is shown exactly once, in order
        let joined: String = fields.iter().map(|f| f.value.as_str()).collect();
        assert_eq!(joined.matches("> **Level: ").count(), 40);
        assert!(joined.find("LEVEL 1**").unwrap() < joined.find("LEVEL 40**").unwrap());
    }

    #[test]
    fn test_pack_entries_counts_chars() {
        // 800 bytes each, but only 400 characters, so two share a field
        let entry = "é".repeat(400);
        let values = pack_entries(&[entry.clone(), entry.clone(), entry]);
        assert_eq!(values.len(), 2);
        assert_eq!(values[0].chars().count(), 800);

        let oversized = pack_entries(&["x".repeat(2000)]);
        assert_eq!(oversized[0].chars().count(), FIELD_VALUE_MAX_LENGTH);
    }
}
