//! Confirmation protocol - gate a write behind a 🟢 / 🟥 reaction from the requester.

use super::reactions::{ReactionHub, ReactionTarget, clean_up};
use crate::constants::{CANCEL_REACTION_EMOJI, CONFIRM_REACTION_EMOJI};
use crate::errors::Result;
use std::fmt;
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

/// How a confirmation was resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Confirmation {
    /// The requester reacted with the accept symbol
    Accepted,
    /// The requester reacted with the cancel symbol
    Rejected,
    /// Nobody answered before the deadline
    TimedOut,
}

impl fmt::Display for Confirmation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
            Self::TimedOut => "timed out",
        })
    }
}

fn is_choice(emoji: &str) -> bool {
    emoji == CONFIRM_REACTION_EMOJI || emoji == CANCEL_REACTION_EMOJI
}

/// Asks `requester` to accept or cancel by reacting on `message`.
///
/// Only the requester's 🟢 or 🟥 on this exact message is observed; anything else is
/// dropped before it reaches this call and does not move the deadline. Both reactions are
/// removed from the message on every outcome. The timeout starts once both symbols are
/// attached.
///
/// # Errors
/// Only arming can fail: the message already has an active interaction, or the reaction
/// symbols cannot be attached. Cleanup failures never replace the outcome.
pub async fn confirm<M>(
    hub: &ReactionHub,
    requester: u64,
    message: &M,
    timeout: Duration,
) -> Result<Confirmation>
where
    M: ReactionTarget + ?Sized,
{
    let mut subscription = hub.subscribe(message.id(), move |event| {
        event.user_id == requester && is_choice(&event.emoji)
    })?;

    if let Err(e) = attach_choices(message).await {
        drop(subscription);
        clean_up(message.clear_reactions().await, "clear confirmation reactions");
        return Err(e);
    }

    let deadline = Instant::now() + timeout;
    let outcome = match subscription.next_before(deadline).await {
        Some(event) if event.emoji == CONFIRM_REACTION_EMOJI => Confirmation::Accepted,
        Some(_) => Confirmation::Rejected,
        None => Confirmation::TimedOut,
    };
    drop(subscription);

    debug!(message_id = message.id(), requester, %outcome, "Confirmation resolved");
    clean_up(message.clear_reactions().await, "clear confirmation reactions");
    Ok(outcome)
}

async fn attach_choices<M: ReactionTarget + ?Sized>(message: &M) -> Result<()> {
    message.add_reaction(CONFIRM_REACTION_EMOJI).await?;
    message.add_reaction(CANCEL_REACTION_EMOJI).await
}
