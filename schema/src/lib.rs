// Pokedex Catalog Schema - Shared type definitions
// This crate contains the data shapes shared between the catalog library,
// the interactive browser binary, and the offline summary generator: the
// canonical type enum, the flattened summary record, and the wire shapes
// of the remote API representations.

// Re-export the main types
pub use api_data::*;
pub use pokemon_types::*;
pub use summary_data::*;

pub mod api_data;
pub mod pokemon_types;
pub mod summary_data;
