//! Tournament record entity - One player's time in one tournament category.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Tournament time database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "tournament_records")]
pub struct Model {
    /// Unique identifier for the entry
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Tournament category key (`TIMEATTACK`, `MILDCORE`, `HARDCORE`, `BONUS`)
    pub category: String,
    /// Discord user ID of the player
    pub posted_by: String,
    /// Player display name at submission time
    pub name: String,
    /// Time in seconds
    pub record: f64,
    /// URL of the proof screenshot
    pub attachment_url: String,
    /// When the time was last submitted
    pub created_at: DateTimeUtc,
}

/// Tournament records have no relations
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
