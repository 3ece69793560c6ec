//! Pagination protocol - browse pre-rendered pages with ◀ ▶ reactions.
//!
//! Page 1 is sent as a new message. Only the requester's navigation reactions are observed.
//! Navigation wraps at both ends, and every accepted reaction is removed again after the
//! page is swapped so the same symbol can be pressed repeatedly. After an idle period
//! without navigation the reactions are cleared and the message stays on its last page.

use super::reactions::{PageDisplay, PageSink, PageView, ReactionHub, ReactionTarget, clean_up};
use crate::constants::{LEFT_REACTION_EMOJI, RIGHT_REACTION_EMOJI};
use crate::errors::{Error, Result};
use std::time::Duration;
use tracing::debug;

/// A single embed field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageField {
    /// Field title
    pub name: String,
    /// Field body
    pub value: String,
}

/// Pre-rendered content of one page.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Page {
    /// Optional text shown above the fields
    pub description: Option<String>,
    /// Embed fields, in display order
    pub fields: Vec<PageField>,
}

impl Page {
    /// Creates an empty page.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the page description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Appends a field.
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.push_field(name, value);
        self
    }

    /// Appends a field in place.
    pub fn push_field(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.push(PageField {
            name: name.into(),
            value: value.into(),
        });
    }

    /// Number of fields on the page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True when the page has neither fields nor a description.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.description.is_none()
    }
}

/// Direction of a navigation reaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Navigation {
    /// Previous page
    Back,
    /// Next page
    Forward,
}

impl Navigation {
    /// Maps a reaction emoji to a navigation direction.
    #[must_use]
    pub fn from_emoji(emoji: &str) -> Option<Self> {
        match emoji {
            LEFT_REACTION_EMOJI => Some(Self::Back),
            RIGHT_REACTION_EMOJI => Some(Self::Forward),
            _ => None,
        }
    }
}

/// Page sequence with a wrapping 1-based cursor.
#[derive(Clone, Debug)]
pub struct Pager {
    pages: Vec<Page>,
    index: usize,
}

impl Pager {
    /// Creates a pager positioned on page 1.
    ///
    /// # Errors
    /// Returns [`Error::EmptyPages`] if `pages` is empty.
    pub fn new(pages: Vec<Page>) -> Result<Self> {
        if pages.is_empty() {
            return Err(Error::EmptyPages);
        }
        Ok(Self { pages, index: 1 })
    }

    /// Current 1-based page index.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Number of pages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Always false; a pager holds at least one page.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Moves one page in `direction`, wrapping around at either end.
    pub fn navigate(&mut self, direction: Navigation) {
        let total = self.len();
        self.index = match direction {
            Navigation::Forward if self.index == total => 1,
            Navigation::Forward => self.index + 1,
            Navigation::Back if self.index == 1 => total,
            Navigation::Back => self.index - 1,
        };
    }

    /// View of the current page.
    #[must_use]
    pub fn view<'a>(&'a self, title: &'a str) -> PageView<'a> {
        PageView {
            title,
            page: &self.pages[self.index - 1],
            index: self.index,
            total: self.len(),
        }
    }
}

/// Shows `pages` to `requester` and lets them browse until the pager goes idle.
///
/// A single page is sent as a static message without navigation reactions.
///
/// # Errors
/// Returns [`Error::EmptyPages`] for an empty page list, and propagates failures to send
/// the first page, to attach the navigation reactions, or to swap the page content.
/// Failures while cleaning up reactions are never returned.
pub async fn paginate<S>(
    hub: &ReactionHub,
    requester: u64,
    sink: &S,
    pages: Vec<Page>,
    title: &str,
    idle_timeout: Duration,
) -> Result<()>
where
    S: PageSink + ?Sized,
{
    let mut pager = Pager::new(pages)?;
    let message = sink.send_page(pager.view(title)).await?;
    if pager.len() == 1 {
        return Ok(());
    }

    let mut subscription = hub.subscribe(message.id(), move |event| {
        event.user_id == requester && Navigation::from_emoji(&event.emoji).is_some()
    })?;

    if let Err(e) = attach_navigation(&message).await {
        drop(subscription);
        clean_up(message.clear_reactions().await, "clear page reactions");
        return Err(e);
    }

    while let Some(event) = subscription.next_within(idle_timeout).await {
        let Some(direction) = Navigation::from_emoji(&event.emoji) else {
            continue;
        };
        pager.navigate(direction);

        match message.show(pager.view(title)).await {
            Ok(()) => {}
            Err(e) if e.is_message_gone() => {
                debug!(message_id = message.id(), "Paged message disappeared");
                return Ok(());
            }
            Err(e) => {
                drop(subscription);
                clean_up(message.clear_reactions().await, "clear page reactions");
                return Err(e);
            }
        }
        clean_up(
            message.remove_reaction(&event.emoji, event.user_id).await,
            "remove page reaction",
        );
    }

    drop(subscription);
    debug!(message_id = message.id(), page = pager.index(), "Pager went idle");
    clean_up(message.clear_reactions().await, "clear page reactions");
    Ok(())
}

async fn attach_navigation<M: PageDisplay>(message: &M) -> Result<()> {
    message.add_reaction(LEFT_REACTION_EMOJI).await?;
    message.add_reaction(RIGHT_REACTION_EMOJI).await
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::reactions::ReactionEvent;
    use crate::test_utils::{CleanupFailure, FakeSink, MessageOp, settle};

    const REQUESTER: u64 = 42;
    const TIMEOUT: Duration = Duration::from_secs(60);

    fn pages(n: usize) -> Vec<Page> {
        (1..=n)
            .map(|i| Page::new().field(format!("entry {i}"), "value"))
            .collect()
    }

    #[test]
    fn test_forward_wraps_to_first() {
        let mut pager = Pager::new(pages(3)).unwrap();
        pager.navigate(Navigation::Forward);
        pager.navigate(Navigation::Forward);
        assert_eq!(pager.index(), 3);
        pager.navigate(Navigation::Forward);
        assert_eq!(pager.index(), 1);
    }

    #[test]
    fn test_back_wraps_to_last() {
        let mut pager = Pager::new(pages(4)).unwrap();
        pager.navigate(Navigation::Back);
        assert_eq!(pager.index(), 4);
        pager.navigate(Navigation::Back);
        assert_eq!(pager.index(), 3);
    }

    #[test]
    fn test_n_minus_one_forward_lands_on_last() {
        for n in 1..=6 {
            let mut pager = Pager::new(pages(n)).unwrap();
            for _ in 1..n {
                pager.navigate(Navigation::Forward);
            }
            assert_eq!(pager.index(), n);
            pager.navigate(Navigation::Forward);
            assert_eq!(pager.index(), 1);
        }
    }

    #[test]
    fn test_single_page_navigation_is_noop() {
        let mut pager = Pager::new(pages(1)).unwrap();
        pager.navigate(Navigation::Forward);
        assert_eq!(pager.index(), 1);
        pager.navigate(Navigation::Back);
        assert_eq!(pager.index(), 1);
    }

    #[test]
    fn test_empty_pages_rejected() {
        assert!(matches!(Pager::new(Vec::new()), Err(Error::EmptyPages)));
    }

    #[test]
    fn test_navigation_from_emoji() {
        assert_eq!(Navigation::from_emoji("◀"), Some(Navigation::Back));
        assert_eq!(Navigation::from_emoji("▶"), Some(Navigation::Forward));
        assert_eq!(Navigation::from_emoji("🟢"), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_three_pages_forward_wraps() {
        let hub = ReactionHub::new();
        let sink = FakeSink::new();
        let id = sink.next_message_id();

        let driver = async {
            for _ in 0..3 {
                settle().await;
                assert!(hub.dispatch(ReactionEvent::new(id, REQUESTER, "▶")));
            }
            settle().await;
        };
        let (result, ()) = tokio::join!(
            paginate(&hub, REQUESTER, &sink, pages(3), "Maps", TIMEOUT),
            driver
        );
        result.unwrap();

        assert_eq!(
            sink.ops(),
            vec![
                MessageOp::Sent(1),
                MessageOp::AddReaction("◀".to_string()),
                MessageOp::AddReaction("▶".to_string()),
                MessageOp::Show(2),
                MessageOp::RemoveReaction("▶".to_string(), REQUESTER),
                MessageOp::Show(3),
                MessageOp::RemoveReaction("▶".to_string(), REQUESTER),
                MessageOp::Show(1),
                MessageOp::RemoveReaction("▶".to_string(), REQUESTER),
                MessageOp::ClearReactions,
            ]
        );
        assert!(!hub.is_listening(id));
    }

    #[tokio::test(start_paused = true)]
    async fn test_back_from_first_wraps_to_last() {
        let hub = ReactionHub::new();
        let sink = FakeSink::new();
        let id = sink.next_message_id();

        let driver = async {
            settle().await;
            hub.dispatch(ReactionEvent::new(id, REQUESTER, "◀"));
            settle().await;
        };
        let (result, ()) = tokio::join!(
            paginate(&hub, REQUESTER, &sink, pages(5), "Maps", TIMEOUT),
            driver
        );
        result.unwrap();

        assert!(sink.ops().contains(&MessageOp::Show(5)));
        assert_eq!(sink.last_shown(), Some(5));
    }

    #[tokio::test(start_paused = true)]
    async fn test_other_users_and_symbols_are_ignored() {
        let hub = ReactionHub::new();
        let sink = FakeSink::new();
        let id = sink.next_message_id();

        let driver = async {
            settle().await;
            assert!(!hub.dispatch(ReactionEvent::new(id, 7, "▶")));
            assert!(!hub.dispatch(ReactionEvent::new(id, REQUESTER, "🟢")));
            settle().await;
        };
        let (result, ()) = tokio::join!(
            paginate(&hub, REQUESTER, &sink, pages(2), "Maps", TIMEOUT),
            driver
        );
        result.unwrap();

        assert_eq!(sink.last_shown(), None);
        assert_eq!(sink.ops().last(), Some(&MessageOp::ClearReactions));
    }

    #[tokio::test(start_paused = true)]
    async fn test_idle_timeout_resets_on_navigation() {
        let hub = ReactionHub::new();
        let sink = FakeSink::new();
        let id = sink.next_message_id();
        let started = tokio::time::Instant::now();

        let driver = async {
            tokio::time::sleep(Duration::from_secs(50)).await;
            hub.dispatch(ReactionEvent::new(id, REQUESTER, "▶"));
        };
        let (result, ()) = tokio::join!(
            paginate(&hub, REQUESTER, &sink, pages(2), "Maps", TIMEOUT),
            driver
        );
        result.unwrap();

        // 50s until the reaction, then a fresh 60s idle window
        assert!(started.elapsed() >= Duration::from_secs(110));
        assert_eq!(sink.last_shown(), Some(2));
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_edits_after_idle_timeout() {
        let hub = ReactionHub::new();
        let sink = FakeSink::new();
        let id = sink.next_message_id();

        paginate(&hub, REQUESTER, &sink, pages(3), "Maps", TIMEOUT)
            .await
            .unwrap();
        // The pager is gone, late reactions reach nobody
        assert!(!hub.dispatch(ReactionEvent::new(id, REQUESTER, "▶")));

        assert_eq!(sink.last_shown(), None);
        assert_eq!(sink.ops().last(), Some(&MessageOp::ClearReactions));
    }

    #[tokio::test(start_paused = true)]
    async fn test_single_page_has_no_navigation() {
        let hub = ReactionHub::new();
        let sink = FakeSink::new();

        paginate(&hub, REQUESTER, &sink, pages(1), "Maps", TIMEOUT)
            .await
            .unwrap();

        assert_eq!(sink.ops(), vec![MessageOp::Sent(1)]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_pages_send_nothing() {
        let hub = ReactionHub::new();
        let sink = FakeSink::new();

        let result = paginate(&hub, REQUESTER, &sink, Vec::new(), "Maps", TIMEOUT).await;
        assert!(matches!(result, Err(Error::EmptyPages)));
        assert!(sink.ops().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cleanup_failure_is_swallowed() {
        let hub = ReactionHub::new();
        let sink = FakeSink::with_cleanup_failure(CleanupFailure::Unexpected);

        let result = paginate(&hub, REQUESTER, &sink, pages(2), "Maps", TIMEOUT).await;
        assert!(result.is_ok());
    }
}
