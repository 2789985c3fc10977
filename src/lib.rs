//! Pokedex Catalog
//!
//! A catalog viewer over the PokeAPI: a pre-built summary file drives a
//! searchable/filterable/paginated grid, and per-entity detail (stats,
//! description, evolution chain, type effectiveness) is aggregated on
//! demand from the remote API with per-URL memoization. A small favorites
//! set persists across runs, and search can optionally be augmented by an
//! LLM-based keyword/type extraction call.

// --- MODULE DECLARATIONS ---
pub mod assist;
pub mod catalog;
pub mod client;
pub mod config;
pub mod detail;
pub mod display;
pub mod effectiveness;
pub mod errors;
pub mod favorites;
pub mod session;
pub mod summary;

// --- PUBLIC API RE-EXPORTS ---

// --- From the `schema` crate ---
// Re-export the shared data definitions.
pub use schema::{
    DamageRelations,
    EvolutionChainData,
    EvolutionNode,
    FlavorTextEntry,
    NamedResource,
    PokemonData,
    PokemonSummary,
    PokemonType,
    SpeciesData,
    TypeData,
};

// --- From this crate's modules (`src/`) ---

// The session controller and the state it drives.
pub use catalog::{FilterState, GenerationFilter, Page, SortKey, TypeFilter};
pub use session::CatalogSession;

// Component entry points.
pub use assist::{parse_extraction, AssistClient, AssistExtraction};
pub use client::ApiClient;
pub use config::Config;
pub use detail::{load_detail, DetailView, EvolutionStage, StatLine};
pub use effectiveness::{compute_effectiveness, TypeEffectiveness};
pub use favorites::FavoritesStore;
pub use summary::load_summaries;

// Crate-specific error and result types.
pub use errors::{
    CatalogError, CatalogResult, DetailError, DetailResult, SummaryDataError, SummaryDataResult,
};
