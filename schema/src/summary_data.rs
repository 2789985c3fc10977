use crate::PokemonType;
use serde::{Deserialize, Serialize};

/// One flattened record of the pre-built summary file. This is the bulk
/// projection the grid is driven by; the full per-entity record is fetched
/// lazily from the API when a card is opened.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PokemonSummary {
    pub id: u32,
    /// Lowercase canonical name, unique across the catalog.
    pub name: String,
    /// Default front sprite URL; some forms have none.
    pub sprite: Option<String>,
    /// 1-2 types in game-defined primary/secondary order.
    pub types: Vec<PokemonType>,
    /// Generation label, e.g. "generation-i".
    pub generation: String,
    /// Height in decimeters.
    #[serde(default)]
    pub height: u32,
    /// Weight in hectograms.
    #[serde(default)]
    pub weight: u32,
}

impl PokemonSummary {
    pub fn has_type(&self, type_: PokemonType) -> bool {
        self.types.contains(&type_)
    }
}
