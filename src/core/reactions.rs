//! Reaction listener plumbing shared by the confirmation and pagination protocols.
//!
//! The gateway event handler pushes every reaction-add event into a [`ReactionHub`].
//! A protocol instance subscribes for the one message it owns, together with a predicate
//! selecting the reactions it cares about. Matching events are forwarded synchronously,
//! in arrival order, into the subscription's channel; everything else is dropped at the
//! hub, so it can neither resolve an interaction nor reset its deadline.

use crate::errors::{Error, Result};
use async_trait::async_trait;
use dashmap::{DashMap, mapref::entry::Entry};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::{debug, warn};

/// A reaction added to a message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReactionEvent {
    /// Message the reaction was added to
    pub message_id: u64,
    /// User who reacted
    pub user_id: u64,
    /// Unicode emoji (or custom emoji name)
    pub emoji: String,
}

impl ReactionEvent {
    /// Creates a new reaction event.
    pub fn new(message_id: u64, user_id: u64, emoji: impl Into<String>) -> Self {
        Self {
            message_id,
            user_id,
            emoji: emoji.into(),
        }
    }
}

type Predicate = Box<dyn Fn(&ReactionEvent) -> bool + Send + Sync>;

struct Listener {
    predicate: Predicate,
    sender: mpsc::UnboundedSender<ReactionEvent>,
}

/// Registry of active reaction subscriptions, keyed by message id.
#[derive(Default)]
pub struct ReactionHub {
    listeners: DashMap<u64, Listener>,
}

impl std::fmt::Debug for ReactionHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReactionHub")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl ReactionHub {
    /// Creates an empty hub.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a listener for reactions on `message_id` accepted by `predicate`.
    ///
    /// A message can only have one active listener; the listener is removed when the
    /// returned [`Subscription`] is dropped.
    ///
    /// # Errors
    /// Returns [`Error::AlreadyAwaiting`] if the message already has a listener.
    pub fn subscribe<F>(&self, message_id: u64, predicate: F) -> Result<Subscription<'_>>
    where
        F: Fn(&ReactionEvent) -> bool + Send + Sync + 'static,
    {
        let (sender, receiver) = mpsc::unbounded_channel();
        match self.listeners.entry(message_id) {
            Entry::Occupied(_) => return Err(Error::AlreadyAwaiting { message_id }),
            Entry::Vacant(entry) => {
                entry.insert(Listener {
                    predicate: Box::new(predicate),
                    sender,
                });
            }
        }
        debug!(message_id, "Reaction listener registered");
        Ok(Subscription {
            hub: self,
            message_id,
            receiver,
        })
    }

    /// Hands an event to the listener of its message if the listener's predicate accepts it.
    ///
    /// Returns true when the event was delivered.
    pub fn dispatch(&self, event: ReactionEvent) -> bool {
        let Some(listener) = self.listeners.get(&event.message_id) else {
            return false;
        };
        if !(listener.predicate)(&event) {
            return false;
        }
        listener.sender.send(event).is_ok()
    }

    /// Whether a message currently has an active listener.
    #[must_use]
    pub fn is_listening(&self, message_id: u64) -> bool {
        self.listeners.contains_key(&message_id)
    }

    fn unsubscribe(&self, message_id: u64) {
        self.listeners.remove(&message_id);
        debug!(message_id, "Reaction listener removed");
    }
}

/// Receiving side of a hub listener. Unregisters itself on drop.
pub struct Subscription<'a> {
    hub: &'a ReactionHub,
    message_id: u64,
    receiver: mpsc::UnboundedReceiver<ReactionEvent>,
}

impl Subscription<'_> {
    /// Waits for the next accepted event, or `None` once `timeout` elapses.
    pub async fn next_within(&mut self, timeout: Duration) -> Option<ReactionEvent> {
        self.next_before(Instant::now() + timeout).await
    }

    /// Waits for the next accepted event, or `None` once `deadline` passes.
    pub async fn next_before(&mut self, deadline: Instant) -> Option<ReactionEvent> {
        tokio::time::timeout_at(deadline, self.receiver.recv())
            .await
            .ok()
            .flatten()
    }
}

impl Drop for Subscription<'_> {
    fn drop(&mut self) {
        self.hub.unsubscribe(self.message_id);
    }
}

/// A message the bot sent and may put reactions on.
#[async_trait]
pub trait ReactionTarget: Send + Sync {
    /// Discord message id
    fn id(&self) -> u64;

    /// Adds a reaction as the bot.
    async fn add_reaction(&self, emoji: &str) -> Result<()>;

    /// Removes one user's reaction.
    async fn remove_reaction(&self, emoji: &str, user_id: u64) -> Result<()>;

    /// Removes every reaction from the message.
    async fn clear_reactions(&self) -> Result<()>;
}

/// One page as it is displayed: the page itself plus its position.
#[derive(Clone, Copy, Debug)]
pub struct PageView<'a> {
    /// Title shown with every page
    pub title: &'a str,
    /// The page content
    pub page: &'a super::pagination::Page,
    /// 1-based position
    pub index: usize,
    /// Number of pages
    pub total: usize,
}

/// A message whose content can be replaced by another page.
#[async_trait]
pub trait PageDisplay: ReactionTarget {
    /// Replaces the message content with `view`.
    async fn show(&self, view: PageView<'_>) -> Result<()>;
}

/// Where new page messages are sent.
#[async_trait]
pub trait PageSink: Send + Sync {
    /// Message type produced by [`PageSink::send_page`]
    type Message: PageDisplay;

    /// Sends `view` as a new message.
    async fn send_page(&self, view: PageView<'_>) -> Result<Self::Message>;
}

/// Discards the outcome of a cleanup step.
///
/// Messages or reactions that are already gone are expected and only logged at debug
/// level. Anything else is logged as a warning, but never returned to the caller.
pub fn clean_up(result: Result<()>, step: &str) {
    match result {
        Ok(()) => {}
        Err(e) if e.is_message_gone() => debug!("Skipped {step}: {e}"),
        Err(e) => warn!("Failed to {step}: {e}"),
    }
}
