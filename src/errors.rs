//! Unified error type for the bot.
//!
//! Validation variants carry the exact text shown to the user, so command handlers can
//! simply return them and let the framework error hook reply.

use thiserror::Error;

/// All errors produced by the bot.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be read or parsed
    #[error("Configuration error: {message}")]
    Config {
        /// Details about the failure
        message: String,
    },

    /// Database operation failed
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Missing or malformed environment variable
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    /// Formatting into a string buffer failed
    #[error("Formatting error: {0}")]
    Fmt(#[from] std::fmt::Error),

    /// Serenity/Poise framework error
    #[error("Serenity/Poise framework error: {0}")]
    Framework(Box<poise::serenity_prelude::Error>),

    /// The message (or the reaction on it) no longer exists on Discord
    #[error("Message {message_id} no longer exists")]
    MessageGone {
        /// Discord message id
        message_id: u64,
    },

    /// Another confirmation or pager is already running on this message
    #[error("Message {message_id} already has an active interaction")]
    AlreadyAwaiting {
        /// Discord message id
        message_id: u64,
    },

    /// A pager was started without any page
    #[error("Nothing to display")]
    EmptyPages,

    /// Map code contains something other than ASCII letters and digits
    #[error("Only letters A-Z and numbers 0-9 allowed in <map_code>. Map submission rejected.")]
    InvalidMapCode {
        /// The rejected code
        code: String,
    },

    /// Map name does not match any known map or alias
    #[error(
        "<map_name> doesn't exist! Map submission rejected. Use `/maps` for a list of acceptable maps."
    )]
    UnknownMapName {
        /// The rejected name
        name: String,
    },

    /// Map type is not in the catalog
    #[error(
        "{map_type} not in map types. Use `/maptypes` for a list of acceptable map types."
    )]
    UnknownMapType {
        /// The rejected type
        map_type: String,
    },

    /// A map with this code is already stored
    #[error("{code} already exists! Map submission rejected.")]
    MapExists {
        /// Duplicate code
        code: String,
    },

    /// No map with this code
    #[error("{code} does not exist.")]
    MapNotFound {
        /// Requested code
        code: String,
    },

    /// Time string could not be parsed
    #[error("Invalid time. Submission rejected.")]
    InvalidTime {
        /// The rejected input
        input: String,
    },

    /// A stored personal best is already as fast or faster
    #[error("Personal best needs to be faster to update.")]
    NotFaster {
        /// Currently stored time in seconds
        current: f64,
    },

    /// No personal best matched the arguments
    #[error("Provided arguments might not exist. Personal best deletion was unsuccessful.")]
    RecordNotFound,

    /// Author is neither the original poster nor a moderator
    #[error("You do not have sufficient permissions. {action}")]
    PermissionDenied {
        /// Sentence describing what did not happen
        action: String,
    },

    /// Tournament command used outside a tournament channel
    #[error("This channel is not a tournament channel.")]
    NotTournamentChannel,

    /// Submission needs a screenshot attachment
    #[error("Upload a screenshot with your submission for proof!")]
    MissingAttachment,
}

impl Error {
    /// Returns true when the error message is meant to be shown to the user as is.
    #[must_use]
    pub const fn is_user_facing(&self) -> bool {
        matches!(
            self,
            Self::InvalidMapCode { .. }
                | Self::UnknownMapName { .. }
                | Self::UnknownMapType { .. }
                | Self::MapExists { .. }
                | Self::MapNotFound { .. }
                | Self::InvalidTime { .. }
                | Self::NotFaster { .. }
                | Self::RecordNotFound
                | Self::PermissionDenied { .. }
                | Self::NotTournamentChannel
                | Self::MissingAttachment
        )
    }

    /// Returns true for the expected "already gone" Discord failures.
    #[must_use]
    pub const fn is_message_gone(&self) -> bool {
        matches!(self, Self::MessageGone { .. })
    }
}

impl From<poise::serenity_prelude::Error> for Error {
    fn from(value: poise::serenity_prelude::Error) -> Self {
        Self::Framework(Box::new(value))
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
