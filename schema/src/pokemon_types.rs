use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

/// The canonical 18-type list used by the type-effectiveness calculator and
/// the type filter. Names serialize to their lowercase API form ("fire").
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PokemonType {
    Normal,
    Fire,
    Water,
    Electric,
    Grass,
    Ice,
    Fighting,
    Poison,
    Ground,
    Flying,
    Psychic,
    Bug,
    Rock,
    Ghost,
    Dragon,
    Dark,
    Steel,
    Fairy,
}

impl PokemonType {
    /// All known types, in canonical order.
    pub fn all() -> impl Iterator<Item = PokemonType> {
        Self::iter()
    }

    /// Parse a lowercase API type name. Unknown names (e.g. "stellar")
    /// return None rather than an error so callers can skip them.
    pub fn from_api_name(name: &str) -> Option<PokemonType> {
        name.parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn canonical_list_has_eighteen_types() {
        assert_eq!(PokemonType::all().count(), 18);
    }

    #[test]
    fn api_names_round_trip_lowercase() {
        assert_eq!(PokemonType::from_api_name("fire"), Some(PokemonType::Fire));
        assert_eq!(PokemonType::Fairy.to_string(), "fairy");
        assert_eq!(PokemonType::from_api_name("stellar"), None);
    }

    #[test]
    fn serde_uses_lowercase_names() {
        let json = serde_json::to_string(&PokemonType::Dragon).unwrap();
        assert_eq!(json, "\"dragon\"");
        let back: PokemonType = serde_json::from_str("\"steel\"").unwrap();
        assert_eq!(back, PokemonType::Steel);
    }
}
