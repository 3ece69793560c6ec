//! Shared test utilities.
//!
//! Database helpers set up an in-memory `SQLite` database and insert rows with sensible
//! defaults. The fake message types stand in for Discord messages in protocol tests and
//! record every call made on them.

use crate::{
    core::{
        map::{self, NewMap},
        reactions::{PageDisplay, PageSink, PageView, ReactionTarget},
        record::{self, NewRecord},
    },
    entities,
    errors::{Error, Result},
};
use async_trait::async_trait;
use sea_orm::DatabaseConnection;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Creates an in-memory `SQLite` database with all tables initialized.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Inserts a map with sensible defaults.
///
/// # Defaults
/// * `creator`: `"Tester"`
/// * `posted_by`: `"1"`
/// * `description`: empty
pub async fn create_test_map(
    db: &DatabaseConnection,
    code: &str,
    map_name: &str,
    types: &[&str],
) -> Result<entities::map::Model> {
    map::create_map(
        db,
        NewMap {
            code: code.to_string(),
            creator: "Tester".to_string(),
            map_name: map_name.to_string(),
            posted_by: "1".to_string(),
            map_types: types.iter().map(ToString::to_string).collect(),
            description: String::new(),
        },
    )
    .await
}

/// Inserts or replaces a personal best.
///
/// `posted_by` doubles as the player name (`"player{posted_by}"`) and the submission
/// message id, so every player gets distinct values.
pub async fn create_test_record(
    db: &DatabaseConnection,
    code: &str,
    level: &str,
    posted_by: u64,
    seconds: f64,
) -> Result<entities::record::Model> {
    record::save_record(
        db,
        NewRecord {
            code: code.to_string(),
            level: level.to_string(),
            name: format!("player{posted_by}"),
            posted_by: posted_by.to_string(),
            message_id: (posted_by * 100).to_string(),
            url: format!("https://discord.com/channels/1/2/{}", posted_by * 100),
            record: seconds,
            hidden_id: None,
        },
    )
    .await
}

/// Lets other futures in a `join!` run; with a paused clock this costs no real time.
pub async fn settle() {
    tokio::time::sleep(Duration::from_millis(1)).await;
}

/// A call made on a fake message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MessageOp {
    /// New message sent showing this page index
    Sent(usize),
    /// Content replaced by this page index
    Show(usize),
    /// Bot reaction added
    AddReaction(String),
    /// User reaction removed
    RemoveReaction(String, u64),
    /// All reactions removed
    ClearReactions,
}

/// How reaction removal should fail.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CleanupFailure {
    /// Removal succeeds
    None,
    /// The message is already deleted
    Gone,
    /// An unexpected API failure
    Unexpected,
}

/// In-memory stand-in for a Discord message.
#[derive(Clone)]
pub struct FakeMessage {
    id: u64,
    ops: Arc<Mutex<Vec<MessageOp>>>,
    cleanup_failure: CleanupFailure,
}

impl FakeMessage {
    /// A message whose calls all succeed.
    #[must_use]
    pub fn new(id: u64) -> Self {
        Self::with_cleanup_failure(id, CleanupFailure::None)
    }

    /// A message whose reaction removals fail with `failure`.
    #[must_use]
    pub fn with_cleanup_failure(id: u64, failure: CleanupFailure) -> Self {
        Self {
            id,
            ops: Arc::default(),
            cleanup_failure: failure,
        }
    }

    /// Every call made so far, oldest first.
    #[allow(clippy::unwrap_used)]
    #[must_use]
    pub fn ops(&self) -> Vec<MessageOp> {
        self.ops.lock().unwrap().clone()
    }

    #[allow(clippy::unwrap_used)]
    fn record(&self, op: MessageOp) {
        self.ops.lock().unwrap().push(op);
    }

    fn cleanup_result(&self) -> Result<()> {
        match self.cleanup_failure {
            CleanupFailure::None => Ok(()),
            CleanupFailure::Gone => Err(Error::MessageGone {
                message_id: self.id,
            }),
            CleanupFailure::Unexpected => Err(Error::Io(std::io::Error::other(
                "connection reset",
            ))),
        }
    }
}

#[async_trait]
impl ReactionTarget for FakeMessage {
    fn id(&self) -> u64 {
        self.id
    }

    async fn add_reaction(&self, emoji: &str) -> Result<()> {
        self.record(MessageOp::AddReaction(emoji.to_string()));
        Ok(())
    }

    async fn remove_reaction(&self, emoji: &str, user_id: u64) -> Result<()> {
        self.record(MessageOp::RemoveReaction(emoji.to_string(), user_id));
        self.cleanup_result()
    }

    async fn clear_reactions(&self) -> Result<()> {
        self.record(MessageOp::ClearReactions);
        self.cleanup_result()
    }
}

#[async_trait]
impl PageDisplay for FakeMessage {
    async fn show(&self, view: PageView<'_>) -> Result<()> {
        self.record(MessageOp::Show(view.index));
        Ok(())
    }
}

/// In-memory channel producing [`FakeMessage`]s that share one call log.
pub struct FakeSink {
    next_id: AtomicU64,
    ops: Arc<Mutex<Vec<MessageOp>>>,
    cleanup_failure: CleanupFailure,
}

impl FakeSink {
    /// A sink whose messages never fail.
    #[must_use]
    pub fn new() -> Self {
        Self::with_cleanup_failure(CleanupFailure::None)
    }

    /// A sink whose messages fail reaction removal with `failure`.
    #[must_use]
    pub fn with_cleanup_failure(failure: CleanupFailure) -> Self {
        Self {
            next_id: AtomicU64::new(1000),
            ops: Arc::default(),
            cleanup_failure: failure,
        }
    }

    /// Id the next sent message will get.
    #[must_use]
    pub fn next_message_id(&self) -> u64 {
        self.next_id.load(Ordering::SeqCst)
    }

    /// Every call made on the sink and its messages, oldest first.
    #[allow(clippy::unwrap_used)]
    #[must_use]
    pub fn ops(&self) -> Vec<MessageOp> {
        self.ops.lock().unwrap().clone()
    }

    /// Index of the last page shown through an edit, if any.
    #[must_use]
    pub fn last_shown(&self) -> Option<usize> {
        self.ops().into_iter().rev().find_map(|op| match op {
            MessageOp::Show(index) => Some(index),
            _ => None,
        })
    }
}

impl Default for FakeSink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PageSink for FakeSink {
    type Message = FakeMessage;

    #[allow(clippy::unwrap_used)]
    async fn send_page(&self, view: PageView<'_>) -> Result<FakeMessage> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.ops.lock().unwrap().push(MessageOp::Sent(view.index));
        Ok(FakeMessage {
            id,
            ops: Arc::clone(&self.ops),
            cleanup_failure: self.cleanup_failure,
        })
    }
}
