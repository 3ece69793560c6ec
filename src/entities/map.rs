//! Map entity - A custom parkour map submitted by its creator.
//!
//! Map types are kept in a single column as a comma delimited list with a leading and a
//! trailing comma (`,PIONEER,HARDCORE,`), so a type filter is a plain `LIKE '%,TYPE,%'`.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Map database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "maps")]
pub struct Model {
    /// Unique identifier for the map
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Workshop share code, upper-case letters and digits
    #[sea_orm(unique)]
    pub code: String,
    /// Creator name(s) as typed by the submitter
    pub creator: String,
    /// Canonical Overwatch map key (see `constants::ALL_MAP_NAMES`)
    pub map_name: String,
    /// Discord user ID of the submitter
    pub posted_by: String,
    /// Encoded list of map types
    pub map_types: String,
    /// Free form description
    pub description: String,
    /// When the map was submitted
    pub created_at: DateTimeUtc,
}

impl Model {
    /// Decoded map types, in submission order.
    #[must_use]
    pub fn types(&self) -> Vec<&str> {
        decode_types(&self.map_types)
    }
}

/// Encodes a list of map types for storage.
#[must_use]
pub fn encode_types<S: AsRef<str>>(types: &[S]) -> String {
    let mut encoded = String::from(",");
    for map_type in types {
        encoded.push_str(map_type.as_ref());
        encoded.push(',');
    }
    encoded
}

/// Decodes a stored list of map types.
#[must_use]
pub fn decode_types(encoded: &str) -> Vec<&str> {
    encoded.split(',').filter(|t| !t.is_empty()).collect()
}

/// Pattern matching a single type inside the encoded column.
#[must_use]
pub fn type_pattern(map_type: &str) -> String {
    format!(",{map_type},")
}

/// Maps have no relations
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
