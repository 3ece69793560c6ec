//! Personal best business logic - time parsing, display and record storage.

use crate::{
    constants::BOARD_LIMIT,
    entities::{Record, contains_text, record},
    errors::{Error, Result},
};
use ::async_trait::async_trait;
use sea_orm::{Condition, QueryOrder, QuerySelect, Set, prelude::*};
use std::cmp::Ordering;

/// Fields of a personal best submission.
#[derive(Clone, Debug, PartialEq)]
pub struct NewRecord {
    /// Upper-case map code
    pub code: String,
    /// Level name, upper-cased on save
    pub level: String,
    /// Player display name
    pub name: String,
    /// Discord user ID of the player
    pub posted_by: String,
    /// Discord message ID of the submission message
    pub message_id: String,
    /// Jump URL of the submission message
    pub url: String,
    /// Time in seconds
    pub record: f64,
    /// Message ID of the entry in the hidden verification channel
    pub hidden_id: Option<String>,
}

/// Whose personal bests the `pb` command lists.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PersonalBestQuery {
    /// The author's own records, matched by user id or current name
    Own {
        /// Discord user ID
        user_id: String,
        /// Current display name
        name: String,
    },
    /// Anyone whose name contains this text (case-insensitive)
    Name(String),
}

/// Parses `[[HH:]MM:]SS[.ss]` into seconds.
///
/// Hours and minutes are plain digits. Seconds may carry one decimal point. Minutes and
/// seconds must stay below 60 once a larger unit is given.
///
/// # Errors
/// Returns [`Error::InvalidTime`] for malformed input and for a zero total.
pub fn parse_time(input: &str) -> Result<f64> {
    let invalid = || Error::InvalidTime {
        input: input.to_string(),
    };

    let parts: Vec<&str> = input.trim().split(':').collect();
    let (seconds, larger) = match parts.split_last() {
        Some((seconds, larger)) if larger.len() <= 2 => (*seconds, larger),
        _ => return Err(invalid()),
    };

    let seconds = parse_seconds(seconds).ok_or_else(invalid)?;
    if !larger.is_empty() && seconds >= 60.0 {
        return Err(invalid());
    }

    let mut total = seconds;
    let mut factor = 60;
    for (position, part) in larger.iter().rev().enumerate() {
        let value = parse_whole(part).ok_or_else(invalid)?;
        // Minutes are capped when hours are also given
        if position == 0 && larger.len() == 2 && value >= 60 {
            return Err(invalid());
        }
        total += f64::from(value) * f64::from(factor);
        factor *= 60;
    }

    if !total.is_finite() || total <= 0.0 {
        return Err(invalid());
    }
    Ok(total)
}

fn parse_whole(part: &str) -> Option<u32> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

fn parse_seconds(part: &str) -> Option<f64> {
    let (whole, fraction) = part.split_once('.').unwrap_or((part, "0"));
    let digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    if !digits(whole) || !digits(fraction) {
        return None;
    }
    part.parse().ok()
}

/// Formats seconds as `H:MM:SS.ss`, truncated to hundredths.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn display_record(seconds: f64) -> String {
    if seconds < 0.0 {
        return format!("-{}", display_record(-seconds));
    }
    // Whole microseconds first so binary float noise does not drop a hundredth
    let micros = (seconds * 1_000_000.0).round() as u64;
    let hundredths = micros / 10_000;
    let fraction = hundredths % 100;
    let total_seconds = hundredths / 100;
    format!(
        "{}:{:02}:{:02}.{:02}",
        total_seconds / 3600,
        (total_seconds / 60) % 60,
        total_seconds % 60,
        fraction
    )
}

/// Orders level names with embedded numbers numerically (`2` before `10`).
#[must_use]
pub fn level_cmp(a: &str, b: &str) -> Ordering {
    let mut left = a.chars().peekable();
    let mut right = b.chars().peekable();
    loop {
        match (left.peek().copied(), right.peek().copied()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(l), Some(r)) if l.is_ascii_digit() && r.is_ascii_digit() => {
                let l_num = take_number(&mut left);
                let r_num = take_number(&mut right);
                let ord = l_num
                    .trim_start_matches('0')
                    .len()
                    .cmp(&r_num.trim_start_matches('0').len())
                    .then_with(|| {
                        l_num
                            .trim_start_matches('0')
                            .cmp(r_num.trim_start_matches('0'))
                    });
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            (Some(l), Some(r)) => {
                let ord = l.to_ascii_uppercase().cmp(&r.to_ascii_uppercase());
                if ord != Ordering::Equal {
                    return ord;
                }
                left.next();
                right.next();
            }
        }
    }
}

fn take_number(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> String {
    let mut number = String::new();
    while let Some(c) = chars.peek().copied() {
        if !c.is_ascii_digit() {
            break;
        }
        number.push(c);
        chars.next();
    }
    number
}

/// Rejects a time that does not beat the stored personal best.
///
/// # Errors
/// Returns [`Error::NotFaster`] when `seconds` is not strictly faster than `existing`.
pub fn ensure_faster(existing: Option<&record::Model>, seconds: f64) -> Result<()> {
    match existing {
        Some(current) if seconds >= current.record => Err(Error::NotFaster {
            current: current.record,
        }),
        _ => Ok(()),
    }
}

/// Finds one player's record on a level.
pub async fn find_personal_best(
    db: &DatabaseConnection,
    code: &str,
    level: &str,
    posted_by: &str,
) -> Result<Option<record::Model>> {
    Record::find()
        .filter(record::Column::Code.eq(code.to_ascii_uppercase()))
        .filter(record::Column::Level.eq(level.to_uppercase()))
        .filter(record::Column::PostedBy.eq(posted_by))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Finds a record on a level by the player's name.
pub async fn find_by_name(
    db: &DatabaseConnection,
    code: &str,
    level: &str,
    name: &str,
) -> Result<Option<record::Model>> {
    Record::find()
        .filter(record::Column::Code.eq(code.to_ascii_uppercase()))
        .filter(record::Column::Level.eq(level.to_uppercase()))
        .filter(record::Column::Name.eq(name))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Finds the record belonging to a submission message.
pub async fn find_by_message_id(
    db: &DatabaseConnection,
    message_id: u64,
) -> Result<Option<record::Model>> {
    Record::find()
        .filter(record::Column::MessageId.eq(message_id.to_string()))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Inserts a personal best, or replaces the player's previous one on the same level.
///
/// The saved record is always unverified.
pub async fn save_record(db: &DatabaseConnection, new_record: NewRecord) -> Result<record::Model> {
    let level = new_record.level.to_uppercase();
    let existing =
        find_personal_best(db, &new_record.code, &level, &new_record.posted_by).await?;

    let is_update = existing.is_some();
    let mut active: record::ActiveModel = match existing {
        Some(model) => model.into(),
        None => record::ActiveModel {
            code: Set(new_record.code.to_ascii_uppercase()),
            level: Set(level),
            posted_by: Set(new_record.posted_by),
            ..Default::default()
        },
    };
    active.name = Set(new_record.name);
    active.message_id = Set(new_record.message_id);
    active.url = Set(new_record.url);
    active.record = Set(new_record.record);
    active.verified = Set(false);
    active.hidden_id = Set(new_record.hidden_id);

    let saved = if is_update {
        active.update(db).await?
    } else {
        active.insert(db).await?
    };
    Ok(saved)
}

/// Moderator channel listing submissions that wait for verification.
#[async_trait]
pub trait VerificationQueue: Send + Sync {
    /// Posts an entry for `submission`. Returns the entry id, or `None` when no queue is
    /// configured.
    async fn post(&self, submission: &NewRecord) -> Result<Option<String>>;

    /// Removes an entry. Failures are logged, never returned.
    async fn remove(&self, entry_id: &str);
}

/// Stores a confirmed personal best and moves its verification entry.
///
/// The new entry is posted before the record is saved, and the entry of the replaced
/// record is removed only once both succeeded. A failed save takes the new entry down
/// again, so the stored record always points at a live entry.
pub async fn submit_personal_best<Q>(
    db: &DatabaseConnection,
    queue: &Q,
    mut submission: NewRecord,
) -> Result<record::Model>
where
    Q: VerificationQueue + ?Sized,
{
    let previous = find_personal_best(
        db,
        &submission.code,
        &submission.level.to_uppercase(),
        &submission.posted_by,
    )
    .await?;

    let new_entry = queue.post(&submission).await?;
    submission.hidden_id.clone_from(&new_entry);

    let saved = match save_record(db, submission).await {
        Ok(saved) => saved,
        Err(e) => {
            if let Some(entry) = &new_entry {
                queue.remove(entry).await;
            }
            return Err(e);
        }
    };

    if let Some(old_entry) = previous.and_then(|p| p.hidden_id) {
        if new_entry.as_ref() != Some(&old_entry) {
            queue.remove(&old_entry).await;
        }
    }
    Ok(saved)
}

/// Marks a record verified or not verified.
pub async fn set_verified(
    db: &DatabaseConnection,
    record: record::Model,
    verified: bool,
) -> Result<record::Model> {
    let mut active: record::ActiveModel = record.into();
    active.verified = Set(verified);
    Ok(active.update(db).await?)
}

/// Deletes a record.
pub async fn delete_record(db: &DatabaseConnection, record: record::Model) -> Result<()> {
    Record::delete_by_id(record.id).exec(db).await?;
    Ok(())
}

/// Distinct level names submitted for a map, in natural order.
pub async fn levels_for_code(db: &DatabaseConnection, code: &str) -> Result<Vec<String>> {
    let mut levels: Vec<String> = Record::find()
        .select_only()
        .column(record::Column::Level)
        .distinct()
        .filter(record::Column::Code.eq(code.to_ascii_uppercase()))
        .into_tuple()
        .all(db)
        .await?;
    levels.sort_by(|a, b| level_cmp(a, b));
    levels.dedup();
    Ok(levels)
}

/// Fastest records on a level, verified only when `verified_only` is set.
pub async fn top_records(
    db: &DatabaseConnection,
    code: &str,
    level: &str,
    verified_only: bool,
) -> Result<Vec<record::Model>> {
    let mut condition = Condition::all()
        .add(record::Column::Code.eq(code.to_ascii_uppercase()))
        .add(record::Column::Level.eq(level.to_uppercase()));
    if verified_only {
        condition = condition.add(record::Column::Verified.eq(true));
    }
    Record::find()
        .filter(condition)
        .order_by_asc(record::Column::Record)
        .order_by_asc(record::Column::Id)
        .limit(BOARD_LIMIT)
        .all(db)
        .await
        .map_err(Into::into)
}

/// 1-based rank of `record` within the top of its level's unverified scoreboard.
pub async fn scoreboard_rank(
    db: &DatabaseConnection,
    record: &record::Model,
) -> Result<Option<usize>> {
    let top = top_records(db, &record.code, &record.level, false).await?;
    Ok(top.iter().position(|r| r.id == record.id).map(|i| i + 1))
}

/// Fastest verified record on one level.
pub async fn world_record(
    db: &DatabaseConnection,
    code: &str,
    level: &str,
) -> Result<Option<record::Model>> {
    Ok(top_records(db, code, level, true).await?.into_iter().next())
}

/// Fastest verified record of every level on a map, in natural level order.
pub async fn world_records(db: &DatabaseConnection, code: &str) -> Result<Vec<record::Model>> {
    let verified = Record::find()
        .filter(record::Column::Code.eq(code.to_ascii_uppercase()))
        .filter(record::Column::Verified.eq(true))
        .order_by_asc(record::Column::Record)
        .order_by_asc(record::Column::Id)
        .all(db)
        .await?;

    let mut best: Vec<record::Model> = Vec::new();
    for entry in verified {
        if !best.iter().any(|r| r.level == entry.level) {
            best.push(entry);
        }
    }
    best.sort_by(|a, b| level_cmp(&a.level, &b.level));
    Ok(best)
}

/// Records for the `pb` listing, ordered by map code then level.
pub async fn personal_bests(
    db: &DatabaseConnection,
    query: &PersonalBestQuery,
) -> Result<Vec<record::Model>> {
    let condition = match query {
        PersonalBestQuery::Own { user_id, name } => Condition::any()
            .add(record::Column::PostedBy.eq(user_id.as_str()))
            .add(record::Column::Name.eq(name.as_str())),
        PersonalBestQuery::Name(name) => {
            Condition::all().add(record::Column::Name.like(contains_text(name)))
        }
    };
    let mut records = Record::find().filter(condition).all(db).await?;
    records.sort_by(|a, b| a.code.cmp(&b.code).then_with(|| level_cmp(&a.level, &b.level)));
    Ok(records)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::float_cmp)]
    use super::*;
    use crate::test_utils::*;

    #[test]
    fn test_parse_time() {
        assert_eq!(parse_time("45.5").unwrap(), 45.5);
        assert_eq!(parse_time("1:05.25").unwrap(), 65.25);
        assert_eq!(parse_time("1:00:00").unwrap(), 3600.0);
        assert_eq!(parse_time("2:03:04.5").unwrap(), 7384.5);
        // Bare seconds have no upper bound
        assert_eq!(parse_time("100").unwrap(), 100.0);
        assert_eq!(parse_time("90:00").unwrap(), 5400.0);
    }

    #[test]
    fn test_parse_time_rejects_bad_input() {
        for input in [
            "", "abc", "0", "0:00", "1:2:3:4", "1.5:00", "-3", "1::2", "1:-5", "1e2", "1:99",
            "1:60:00", "+5", "5.", ".5", "1.2.3", "inf", "NaN",
        ] {
            assert!(
                matches!(parse_time(input), Err(Error::InvalidTime { .. })),
                "{input} should be rejected"
            );
        }
    }

    #[test]
    fn test_display_record() {
        assert_eq!(display_record(45.5), "0:00:45.50");
        assert_eq!(display_record(65.25), "0:01:05.25");
        assert_eq!(display_record(3600.0), "1:00:00.00");
        assert_eq!(display_record(12.3456), "0:00:12.34");
        assert_eq!(display_record(-5.5), "-0:00:05.50");
    }

    #[test]
    fn test_parse_then_display() {
        for (input, shown) in [("1:05.25", "0:01:05.25"), ("10:00:01.01", "10:00:01.01")] {
            assert_eq!(display_record(parse_time(input).unwrap()), shown);
        }
    }

    #[test]
    fn test_level_order() {
        let mut levels = vec!["10", "2", "BONUS", "1", "LEVEL 10", "LEVEL 9"];
        levels.sort_by(|a, b| level_cmp(a, b));
        assert_eq!(levels, vec!["1", "2", "10", "BONUS", "LEVEL 9", "LEVEL 10"]);
        assert_eq!(level_cmp("02", "2"), Ordering::Equal);
    }

    #[tokio::test]
    async fn test_ensure_faster() -> Result<()> {
        let db = setup_test_db().await?;
        let existing = create_test_record(&db, "ABC", "1", 5, 30.0).await?;

        assert!(ensure_faster(None, 99.0).is_ok());
        assert!(ensure_faster(Some(&existing), 29.99).is_ok());
        assert!(matches!(
            ensure_faster(Some(&existing), 30.0),
            Err(Error::NotFaster { current }) if current == 30.0
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_save_record_replaces_previous() -> Result<()> {
        let db = setup_test_db().await?;
        let first = create_test_record(&db, "ABC", "bonus", 5, 30.0).await?;
        assert_eq!(first.level, "BONUS");
        let first = set_verified(&db, first, true).await?;
        assert!(first.verified);

        let second = create_test_record(&db, "ABC", "BONUS", 5, 25.0).await?;
        assert_eq!(second.id, first.id);
        assert_eq!(second.record, 25.0);
        assert!(!second.verified);

        assert_eq!(Record::find().count(&db).await?, 1);
        Ok(())
    }

    #[derive(Default)]
    struct FakeQueue {
        fail_post: bool,
        posted: std::sync::Mutex<Vec<String>>,
        removed: std::sync::Mutex<Vec<String>>,
    }

    impl FakeQueue {
        fn posted(&self) -> Vec<String> {
            self.posted.lock().unwrap().clone()
        }

        fn removed(&self) -> Vec<String> {
            self.removed.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl VerificationQueue for FakeQueue {
        async fn post(&self, _submission: &NewRecord) -> Result<Option<String>> {
            if self.fail_post {
                return Err(Error::Io(std::io::Error::other("missing access")));
            }
            let mut posted = self.posted.lock().unwrap();
            let entry = (900 + posted.len()).to_string();
            posted.push(entry.clone());
            Ok(Some(entry))
        }

        async fn remove(&self, entry_id: &str) {
            self.removed.lock().unwrap().push(entry_id.to_string());
        }
    }

    fn submission(seconds: f64) -> NewRecord {
        NewRecord {
            code: "ABC".to_string(),
            level: "bonus".to_string(),
            name: "player5".to_string(),
            posted_by: "5".to_string(),
            message_id: "500".to_string(),
            url: "https://discord.com/channels/1/2/500".to_string(),
            record: seconds,
            hidden_id: None,
        }
    }

    #[tokio::test]
    async fn test_submit_removes_old_entry_after_save() -> Result<()> {
        let db = setup_test_db().await?;
        let queue = FakeQueue::default();

        let first = submit_personal_best(&db, &queue, submission(30.0)).await?;
        assert_eq!(first.hidden_id.as_deref(), Some("900"));
        assert!(queue.removed().is_empty());

        let second = submit_personal_best(&db, &queue, submission(25.0)).await?;
        assert_eq!(second.hidden_id.as_deref(), Some("901"));
        assert_eq!(queue.posted(), vec!["900", "901"]);
        assert_eq!(queue.removed(), vec!["900"]);

        let stored = find_personal_best(&db, "ABC", "BONUS", "5").await?;
        assert_eq!(stored.map(|r| r.record), Some(25.0));
        Ok(())
    }

    #[tokio::test]
    async fn test_failed_post_keeps_previous_record() -> Result<()> {
        let db = setup_test_db().await?;
        let queue = FakeQueue::default();
        submit_personal_best(&db, &queue, submission(30.0)).await?;

        let failing = FakeQueue {
            fail_post: true,
            ..FakeQueue::default()
        };
        let result = submit_personal_best(&db, &failing, submission(25.0)).await;
        assert!(matches!(result, Err(Error::Io(_))));
        assert!(failing.removed().is_empty());

        let stored = find_personal_best(&db, "ABC", "BONUS", "5")
            .await?
            .expect("previous record kept");
        assert_eq!(stored.record, 30.0);
        assert_eq!(stored.hidden_id.as_deref(), Some("900"));
        Ok(())
    }

    #[tokio::test]
    async fn test_failed_save_removes_new_entry() -> Result<()> {
        let db = setup_test_db().await?;
        db.execute_unprepared(
            "CREATE TRIGGER reject_records BEFORE INSERT ON records \
             BEGIN SELECT RAISE(ABORT, 'disk full'); END;",
        )
        .await?;
        let queue = FakeQueue::default();

        let result = submit_personal_best(&db, &queue, submission(30.0)).await;
        assert!(matches!(result, Err(Error::Database(_))));
        assert_eq!(queue.posted(), vec!["900"]);
        assert_eq!(queue.removed(), vec!["900"]);
        assert_eq!(Record::find().count(&db).await?, 0);
        Ok(())
    }

    #[tokio::test]
    async fn test_find_helpers() -> Result<()> {
        let db = setup_test_db().await?;
        let saved = create_test_record(&db, "ABC", "1", 5, 30.0).await?;

        assert_eq!(
            find_personal_best(&db, "abc", "1", "5").await?,
            Some(saved.clone())
        );
        assert_eq!(find_by_name(&db, "ABC", "1", "player5").await?, Some(saved.clone()));
        assert_eq!(find_by_message_id(&db, 500).await?, Some(saved.clone()));
        assert!(find_by_message_id(&db, 501).await?.is_none());

        delete_record(&db, saved).await?;
        assert!(find_personal_best(&db, "ABC", "1", "5").await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_boards_and_rank() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_record(&db, "ABC", "1", 1, 40.0).await?;
        let fast = create_test_record(&db, "ABC", "1", 2, 20.0).await?;
        let mid = create_test_record(&db, "ABC", "1", 3, 30.0).await?;
        create_test_record(&db, "ABC", "2", 4, 10.0).await?;
        set_verified(&db, mid.clone(), true).await?;

        let scoreboard = top_records(&db, "ABC", "1", false).await?;
        let times: Vec<f64> = scoreboard.iter().map(|r| r.record).collect();
        assert_eq!(times, vec![20.0, 30.0, 40.0]);

        let leaderboard = top_records(&db, "ABC", "1", true).await?;
        assert_eq!(leaderboard.len(), 1);
        assert_eq!(leaderboard[0].posted_by, "3");

        assert_eq!(scoreboard_rank(&db, &fast).await?, Some(1));
        assert_eq!(scoreboard_rank(&db, &mid).await?, Some(2));
        Ok(())
    }

    #[tokio::test]
    async fn test_scoreboard_is_limited() -> Result<()> {
        let db = setup_test_db().await?;
        for player in 1..=12_u32 {
            create_test_record(&db, "ABC", "1", u64::from(player), f64::from(player)).await?;
        }
        let board = top_records(&db, "ABC", "1", false).await?;
        assert_eq!(board.len(), 10);

        let slowest = find_personal_best(&db, "ABC", "1", "12").await?.unwrap();
        assert_eq!(scoreboard_rank(&db, &slowest).await?, None);
        Ok(())
    }

    #[tokio::test]
    async fn test_world_records() -> Result<()> {
        let db = setup_test_db().await?;
        let times = [(1, "10", 50.0), (2, "10", 45.0), (3, "2", 12.0), (4, "2", 8.0)];
        for (player, level, time) in times {
            let saved = create_test_record(&db, "ABC", level, player, time).await?;
            if player != 4 {
                set_verified(&db, saved, true).await?;
            }
        }

        let records = world_records(&db, "abc").await?;
        let summary: Vec<(&str, f64)> =
            records.iter().map(|r| (r.level.as_str(), r.record)).collect();
        // Unverified 8.0 on level 2 is skipped
        assert_eq!(summary, vec![("2", 12.0), ("10", 45.0)]);

        assert_eq!(world_record(&db, "ABC", "10").await?.unwrap().record, 45.0);
        assert!(world_record(&db, "ABC", "3").await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_levels_for_code() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_record(&db, "ABC", "10", 1, 1.0).await?;
        create_test_record(&db, "ABC", "2", 1, 1.0).await?;
        create_test_record(&db, "ABC", "2", 2, 1.0).await?;
        create_test_record(&db, "XYZ", "1", 1, 1.0).await?;

        assert_eq!(levels_for_code(&db, "abc").await?, vec!["2", "10"]);
        assert!(levels_for_code(&db, "NONE").await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_personal_bests() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_record(&db, "BBB", "1", 7, 1.0).await?;
        create_test_record(&db, "AAA", "10", 7, 1.0).await?;
        create_test_record(&db, "AAA", "2", 7, 1.0).await?;
        create_test_record(&db, "AAA", "2", 8, 1.0).await?;

        let own = personal_bests(
            &db,
            &PersonalBestQuery::Own {
                user_id: "7".to_string(),
                name: "renamed".to_string(),
            },
        )
        .await?;
        let keys: Vec<(&str, &str)> =
            own.iter().map(|r| (r.code.as_str(), r.level.as_str())).collect();
        assert_eq!(keys, vec![("AAA", "2"), ("AAA", "10"), ("BBB", "1")]);

        let by_name = personal_bests(&db, &PersonalBestQuery::Name("PLAYER8".to_string())).await?;
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].posted_by, "8");
        Ok(())
    }

    #[tokio::test]
    async fn test_personal_bests_name_matches_wildcards_literally() -> Result<()> {
        let db = setup_test_db().await?;
        for (player, name) in [(1, "a_b"), (2, "axb"), (3, "100%")] {
            save_record(
                &db,
                NewRecord {
                    name: name.to_string(),
                    posted_by: player.to_string(),
                    ..submission(30.0)
                },
            )
            .await?;
        }

        let found = personal_bests(&db, &PersonalBestQuery::Name("a_b".to_string())).await?;
        let names: Vec<&str> = found.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["a_b"]);

        let found = personal_bests(&db, &PersonalBestQuery::Name("%".to_string())).await?;
        let names: Vec<&str> = found.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["100%"]);
        Ok(())
    }
}
