//! Map business logic - catalog lookups, validation and storage of submitted maps.

use crate::{
    constants::{ALL_MAP_NAMES, MapName, TYPES_OF_MAP},
    entities::{
        Map, contains_text,
        map::{self, encode_types, type_pattern},
    },
    errors::{Error, Result},
};
use sea_orm::{Condition, QueryOrder, QuerySelect, Set, prelude::*};
use std::collections::HashMap;

/// Fields of a map submission after validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewMap {
    /// Upper-case map code
    pub code: String,
    /// Creator name(s)
    pub creator: String,
    /// Canonical map key
    pub map_name: String,
    /// Discord user ID of the submitter
    pub posted_by: String,
    /// Canonical map types
    pub map_types: Vec<String>,
    /// Free form description
    pub description: String,
}

/// A change to a stored map.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MapEdit {
    /// Replace the description
    Description(String),
    /// Replace the list of map types
    Types(Vec<String>),
    /// Move the map to a new code
    Code(String),
}

impl MapEdit {
    /// Returns `map` with the edit applied, without touching the database.
    #[must_use]
    pub fn preview(&self, map: &map::Model) -> map::Model {
        let mut edited = map.clone();
        match self {
            Self::Description(description) => edited.description.clone_from(description),
            Self::Types(types) => edited.map_types = encode_types(types),
            Self::Code(code) => edited.code.clone_from(code),
        }
        edited
    }
}

/// Which maps a search returns.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MapQuery {
    /// Maps on one Overwatch map, optionally restricted to a type
    Name {
        /// Canonical map key
        map_name: String,
        /// Canonical map type
        map_type: Option<String>,
    },
    /// Maps carrying a type
    Type(String),
    /// Frameworks: the FRAMEWORK type or the Framework map
    Framework,
    /// Case-insensitive creator substring
    Creator(String),
}

impl MapQuery {
    fn condition(&self) -> Condition {
        match self {
            Self::Name { map_name, map_type } => {
                let mut condition =
                    Condition::all().add(map::Column::MapName.eq(map_name.as_str()));
                if let Some(map_type) = map_type {
                    condition =
                        condition.add(map::Column::MapTypes.contains(type_pattern(map_type)));
                }
                condition
            }
            Self::Type(map_type) => {
                Condition::all().add(map::Column::MapTypes.contains(type_pattern(map_type)))
            }
            Self::Framework => Condition::any()
                .add(map::Column::MapTypes.contains(type_pattern("FRAMEWORK")))
                .add(map::Column::MapName.eq("framework")),
            Self::Creator(creator) => {
                Condition::all().add(map::Column::Creator.like(contains_text(creator)))
            }
        }
    }
}

/// Lower-cases a map name and strips spaces, apostrophes and colons.
#[must_use]
pub fn normalize_map_name(input: &str) -> String {
    input
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '\'' && *c != ':')
        .flat_map(char::to_lowercase)
        .collect()
}

/// Finds the map a user typed, by any of its aliases.
#[must_use]
pub fn find_map_name(input: &str) -> Option<&'static MapName> {
    let normalized = normalize_map_name(input);
    ALL_MAP_NAMES
        .iter()
        .find(|map| map.aliases.contains(&normalized.as_str()))
}

/// Resolves a user supplied map name to its canonical key.
///
/// # Errors
/// Returns [`Error::UnknownMapName`] if no alias matches.
pub fn parse_map_name(input: &str) -> Result<&'static str> {
    find_map_name(input)
        .map(|map| map.key)
        .ok_or_else(|| Error::UnknownMapName {
            name: input.to_string(),
        })
}

/// Human readable name for a stored map key.
#[must_use]
pub fn pretty_name(key: &str) -> &str {
    ALL_MAP_NAMES
        .iter()
        .find(|map| map.key == key)
        .map_or(key, |map| map.pretty)
}

/// Expands short map type names (`PIO`, `HC`, `TA`, ...) to their canonical form.
#[must_use]
pub fn convert_short_type(map_type: &str) -> String {
    let upper = map_type.to_uppercase();
    match upper.as_str() {
        "MULTI" | "MULTILVL" => "MULTILEVEL".to_string(),
        "PIO" => "PIONEER".to_string(),
        "HC" => "HARDCORE".to_string(),
        "MC" => "MILDCORE".to_string(),
        "TA" | "TIMEATTACK" => "TIME-ATTACK".to_string(),
        _ => upper,
    }
}

/// Parses a single map type.
///
/// # Errors
/// Returns [`Error::UnknownMapType`] if the type is not in the catalog.
pub fn parse_map_type(input: &str) -> Result<String> {
    let map_type = convert_short_type(input.trim());
    if TYPES_OF_MAP.contains(&map_type.as_str()) {
        Ok(map_type)
    } else {
        Err(Error::UnknownMapType { map_type })
    }
}

/// Parses a whitespace separated list of map types, keeping the order and dropping repeats.
///
/// # Errors
/// Returns [`Error::UnknownMapType`] for the first unknown type, or for an empty list.
pub fn parse_map_types(input: &str) -> Result<Vec<String>> {
    let mut types: Vec<String> = Vec::new();
    for word in input.split_whitespace() {
        let map_type = parse_map_type(word)?;
        if !types.contains(&map_type) {
            types.push(map_type);
        }
    }
    if types.is_empty() {
        return Err(Error::UnknownMapType {
            map_type: input.to_string(),
        });
    }
    Ok(types)
}

/// Validates a map code and returns it upper-cased.
///
/// # Errors
/// Returns [`Error::InvalidMapCode`] unless the code is non-empty ASCII letters and digits.
pub fn parse_map_code(input: &str) -> Result<String> {
    if input.is_empty() || !input.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(Error::InvalidMapCode {
            code: input.to_string(),
        });
    }
    Ok(input.to_ascii_uppercase())
}

/// Finds a map by its code (case-insensitive input).
pub async fn get_map_by_code(db: &DatabaseConnection, code: &str) -> Result<Option<map::Model>> {
    Map::find()
        .filter(map::Column::Code.eq(code.to_ascii_uppercase()))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Finds a map by its code, failing if it does not exist.
///
/// # Errors
/// Returns [`Error::MapNotFound`] if no map has this code.
pub async fn require_map(db: &DatabaseConnection, code: &str) -> Result<map::Model> {
    get_map_by_code(db, code)
        .await?
        .ok_or_else(|| Error::MapNotFound {
            code: code.to_ascii_uppercase(),
        })
}

/// Stores a new map.
///
/// # Errors
/// Returns [`Error::MapExists`] if the code is already taken.
pub async fn create_map(db: &DatabaseConnection, new_map: NewMap) -> Result<map::Model> {
    if get_map_by_code(db, &new_map.code).await?.is_some() {
        return Err(Error::MapExists { code: new_map.code });
    }

    let map = map::ActiveModel {
        code: Set(new_map.code),
        creator: Set(new_map.creator),
        map_name: Set(new_map.map_name),
        posted_by: Set(new_map.posted_by),
        map_types: Set(encode_types(&new_map.map_types)),
        description: Set(new_map.description),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };
    Ok(map.insert(db).await?)
}

/// Same check as [`create_map`], used before showing a submission preview.
pub async fn ensure_code_free(db: &DatabaseConnection, code: &str) -> Result<()> {
    if get_map_by_code(db, code).await?.is_some() {
        return Err(Error::MapExists {
            code: code.to_ascii_uppercase(),
        });
    }
    Ok(())
}

/// Applies an edit to a stored map.
///
/// # Errors
/// Returns [`Error::MapExists`] when moving to a code used by another map.
pub async fn apply_edit(
    db: &DatabaseConnection,
    map: map::Model,
    edit: MapEdit,
) -> Result<map::Model> {
    if let MapEdit::Code(code) = &edit {
        if *code != map.code {
            ensure_code_free(db, code).await?;
        }
    }

    let mut active: map::ActiveModel = map.into();
    match edit {
        MapEdit::Description(description) => active.description = Set(description),
        MapEdit::Types(types) => active.map_types = Set(encode_types(&types)),
        MapEdit::Code(code) => active.code = Set(code),
    }
    Ok(active.update(db).await?)
}

/// Deletes a stored map.
pub async fn delete_map(db: &DatabaseConnection, map: map::Model) -> Result<()> {
    Map::delete_by_id(map.id).exec(db).await?;
    Ok(())
}

/// Runs a search, ordered by map name then code.
pub async fn find_maps(db: &DatabaseConnection, query: &MapQuery) -> Result<Vec<map::Model>> {
    Map::find()
        .filter(query.condition())
        .order_by_asc(map::Column::MapName)
        .order_by_asc(map::Column::Code)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Stored maps for a set of codes, keyed by code.
pub async fn maps_by_codes<I, S>(
    db: &DatabaseConnection,
    codes: I,
) -> Result<HashMap<String, map::Model>>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let codes: Vec<String> = codes.into_iter().map(Into::into).collect();
    if codes.is_empty() {
        return Ok(HashMap::new());
    }
    let maps = Map::find()
        .filter(map::Column::Code.is_in(codes))
        .all(db)
        .await?;
    Ok(maps.into_iter().map(|m| (m.code.clone(), m)).collect())
}

/// The most recently submitted maps, oldest of them first.
pub async fn newest_maps(
    db: &DatabaseConnection,
    map_type: Option<&str>,
    limit: u64,
) -> Result<Vec<map::Model>> {
    let mut select = Map::find();
    if let Some(map_type) = map_type {
        select = select.filter(map::Column::MapTypes.contains(type_pattern(map_type)));
    }
    let mut maps = select
        .order_by_desc(map::Column::Id)
        .limit(limit)
        .all(db)
        .await?;
    maps.reverse();
    Ok(maps)
}
