// Battle Turn Order Schema - Shared type definitions
// This crate contains the static enums and identifiers shared between the
// turn-order runtime, its demo binary and the RON data files it loads.

// Re-export the main types
pub use battle_data::*;
pub use identifiers::*;
pub use stat_types::*;

pub mod battle_data;
pub mod identifiers;
pub mod stat_types;
