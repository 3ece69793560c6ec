//! Core business logic - framework-agnostic map, record and tournament operations, and the
//! reaction driven confirmation and pagination protocols.

/// Who may change a stored map or record
pub mod access;
/// Accept/cancel gate in front of every write
pub mod confirmation;
/// Map catalog, validation and storage
pub mod map;
/// Reaction driven page browsing
pub mod pagination;
/// Reaction listener registry and message traits
pub mod reactions;
/// Personal best times and boards
pub mod record;
/// Page builders for embeds
pub mod render;
/// Tournament categories and times
pub mod tournament;
