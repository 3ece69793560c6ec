//! Bot settings loaded from config.toml.
//!
//! Channel and role ids differ between the live and the test server, so they live in the
//! config file rather than in [`crate::constants`].

use crate::core::tournament::Category;
use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Top level structure of config.toml
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Prefix for text commands
    #[serde(default = "default_prefix")]
    pub prefix: String,
    /// Channels the command groups are bound to
    pub channels: ChannelConfig,
    /// Roles allowed to moderate maps and records
    #[serde(default)]
    pub roles: RoleConfig,
    /// Confirmation and pagination timeouts
    #[serde(default)]
    pub interaction: InteractionConfig,
}

/// Channel ids used by the channel checks.
#[derive(Debug, Clone, Deserialize)]
pub struct ChannelConfig {
    /// Channel for map search commands
    pub map: u64,
    /// Channel for map submission and editing
    pub map_submit: u64,
    /// Channel for personal best commands
    pub record: u64,
    /// Moderator-only channel listing submissions awaiting verification
    pub hidden_verification: u64,
    /// Tournament submission channels
    #[serde(default)]
    pub tournament: TournamentChannels,
}

/// One channel per tournament category. Zero disables a category.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TournamentChannels {
    /// Time attack channel
    #[serde(default)]
    pub time_attack: u64,
    /// Mildcore channel
    #[serde(default)]
    pub mildcore: u64,
    /// Hardcore channel
    #[serde(default)]
    pub hardcore: u64,
    /// Bonus channel
    #[serde(default)]
    pub bonus: u64,
}

impl TournamentChannels {
    /// Maps a channel id to the tournament category submitted in it.
    #[must_use]
    pub fn category_for(&self, channel_id: u64) -> Option<Category> {
        if channel_id == 0 {
            return None;
        }
        [
            (self.time_attack, Category::TimeAttack),
            (self.mildcore, Category::Mildcore),
            (self.hardcore, Category::Hardcore),
            (self.bonus, Category::Bonus),
        ]
        .into_iter()
        .find_map(|(id, category)| (id == channel_id).then_some(category))
    }
}

/// Moderator roles.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RoleConfig {
    /// Role ids allowed to edit or delete anyone's maps and records, and to verify records
    #[serde(default)]
    pub whitelist: Vec<u64>,
}

impl RoleConfig {
    /// Returns true if any of the given roles is whitelisted.
    pub fn is_moderator(&self, roles: impl IntoIterator<Item = u64>) -> bool {
        roles.into_iter().any(|role| self.whitelist.contains(&role))
    }
}

/// Timeouts for the reaction driven interactions.
#[derive(Debug, Clone, Deserialize)]
pub struct InteractionConfig {
    /// Seconds a confirmation waits for the requester
    #[serde(default = "default_confirm_timeout")]
    pub confirm_timeout_secs: u64,
    /// Seconds of inactivity after which a pager stops listening
    #[serde(default = "default_page_timeout")]
    pub page_timeout_secs: u64,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            confirm_timeout_secs: default_confirm_timeout(),
            page_timeout_secs: default_page_timeout(),
        }
    }
}

impl InteractionConfig {
    /// Fixed confirmation deadline
    #[must_use]
    pub const fn confirm_timeout(&self) -> Duration {
        Duration::from_secs(self.confirm_timeout_secs)
    }

    /// Pager idle timeout
    #[must_use]
    pub const fn page_timeout(&self) -> Duration {
        Duration::from_secs(self.page_timeout_secs)
    }
}

fn default_prefix() -> String {
    "/".to_string()
}

const fn default_confirm_timeout() -> u64 {
    30
}

const fn default_page_timeout() -> u64 {
    60
}

/// Parses settings from a TOML string.
pub fn parse_settings(contents: &str) -> Result<Settings> {
    toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads settings from a TOML file.
///
/// # Errors
/// Returns an error if the file cannot be read or does not contain valid settings.
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let path_ref = path.as_ref();
    tracing::debug!("Attempting to load configuration from: {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read config file {}: {e}", path_ref.display()),
    })?;
    parse_settings(&contents)
}

/// Loads settings from `BOT_CONFIG`, falling back to ./config.toml
pub fn load_default_settings() -> Result<Settings> {
    let path = std::env::var("BOT_CONFIG").unwrap_or_else(|_| "config.toml".to_string());
    load_settings(path)
}
