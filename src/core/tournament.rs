//! Tournament business logic - one time per player per category.

use crate::{
    entities::{TournamentRecord, tournament_record},
    errors::Result,
};
use sea_orm::{QueryOrder, Set, prelude::*};
use std::fmt;

/// Tournament category, chosen by the channel a command is used in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Category {
    /// Time attack
    TimeAttack,
    /// Mildcore
    Mildcore,
    /// Hardcore
    Hardcore,
    /// Bonus
    Bonus,
}

impl Category {
    /// Key stored in the database.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::TimeAttack => "TIMEATTACK",
            Self::Mildcore => "MILDCORE",
            Self::Hardcore => "HARDCORE",
            Self::Bonus => "BONUS",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::TimeAttack => "time attack",
            Self::Mildcore => "mildcore",
            Self::Hardcore => "hardcore",
            Self::Bonus => "bonus",
        })
    }
}

/// A tournament time submission.
#[derive(Clone, Debug, PartialEq)]
pub struct NewTournamentTime {
    /// Category the time counts for
    pub category: Category,
    /// Discord user ID of the player
    pub posted_by: String,
    /// Player display name
    pub name: String,
    /// Time in seconds
    pub record: f64,
    /// URL of the proof screenshot
    pub attachment_url: String,
}

/// Stores a player's time in a category, replacing their previous one.
pub async fn submit_time(
    db: &DatabaseConnection,
    submission: NewTournamentTime,
) -> Result<tournament_record::Model> {
    let existing = TournamentRecord::find()
        .filter(tournament_record::Column::Category.eq(submission.category.key()))
        .filter(tournament_record::Column::PostedBy.eq(submission.posted_by.as_str()))
        .one(db)
        .await?;

    let saved = if let Some(model) = existing {
        let mut active: tournament_record::ActiveModel = model.into();
        active.name = Set(submission.name);
        active.record = Set(submission.record);
        active.attachment_url = Set(submission.attachment_url);
        active.created_at = Set(chrono::Utc::now());
        active.update(db).await?
    } else {
        tournament_record::ActiveModel {
            category: Set(submission.category.key().to_string()),
            posted_by: Set(submission.posted_by),
            name: Set(submission.name),
            record: Set(submission.record),
            attachment_url: Set(submission.attachment_url),
            created_at: Set(chrono::Utc::now()),
            ..Default::default()
        }
        .insert(db)
        .await?
    };
    Ok(saved)
}

/// All times in a category, fastest first.
pub async fn board(
    db: &DatabaseConnection,
    category: Category,
) -> Result<Vec<tournament_record::Model>> {
    TournamentRecord::find()
        .filter(tournament_record::Column::Category.eq(category.key()))
        .order_by_asc(tournament_record::Column::Record)
        .order_by_asc(tournament_record::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}
