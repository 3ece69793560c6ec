//! Discord command implementations organized by category.

#![allow(clippy::too_long_first_doc_paragraph)]

/// General utility commands
pub mod general;

/// Map submission and editing commands
pub mod maps;

/// Personal best commands
pub mod records;

/// Map search commands
pub mod search;

/// Tournament commands
pub mod tournament;

// Export commands
pub use general::*;
pub use maps::*;
pub use records::*;
pub use search::*;
pub use tournament::*;
