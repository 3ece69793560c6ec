//! Entity module - Contains all SeaORM entity definitions for the database.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod map;
pub mod record;
pub mod tournament_record;

// Re-export specific types to avoid conflicts
pub use map::{Column as MapColumn, Entity as Map, Model as MapModel};
pub use record::{Column as RecordColumn, Entity as Record, Model as RecordModel};
pub use tournament_record::{
    Column as TournamentRecordColumn, Entity as TournamentRecord,
    Model as TournamentRecordModel,
};

/// `LIKE` pattern matching columns that contain `text` literally.
///
/// `%`, `_` and `\` in the text are escaped, so they match only themselves.
#[must_use]
pub fn contains_text(text: &str) -> sea_orm::sea_query::LikeExpr {
    let mut pattern = String::with_capacity(text.len() + 2);
    pattern.push('%');
    for c in text.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    sea_orm::sea_query::LikeExpr::new(pattern).escape('\\')
}
