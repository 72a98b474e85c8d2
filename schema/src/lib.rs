// Pokemon Quest Schema - Shared type definitions
// This crate contains the static data definitions (element types, creature and
// trainer templates) that the game crate loads from its embedded RON data.

// Re-export the main types
pub use pokemon_types::*;
pub use templates::*;

pub mod pokemon_types;
pub mod templates;
