//! Record entity - A personal best time on one level of a map.
//!
//! `message_id` points at the player's submission message, which carries the proof
//! screenshot and the moderator verification reactions.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Personal best database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "records")]
pub struct Model {
    /// Unique identifier for the record
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Map code the record was set on
    pub code: String,
    /// Player display name at submission time
    pub name: String,
    /// Discord user ID of the player
    pub posted_by: String,
    /// Discord message ID of the submission message
    pub message_id: String,
    /// Jump URL of the submission message
    pub url: String,
    /// Level name, upper-case
    pub level: String,
    /// Time in seconds
    pub record: f64,
    /// Whether a moderator verified the proof
    pub verified: bool,
    /// Message ID of the entry in the hidden verification channel
    pub hidden_id: Option<String>,
}

/// Records have no relations
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
