//! Detail aggregator.
//!
//! For one selected entity, fetches the full record plus species,
//! evolution chain, and type matchups, and merges them into a
//! display-ready view. Only the primary fetch is a hard error; every
//! other sub-fetch degrades to a fallback section.

use crate::client::ApiClient;
use crate::effectiveness::{compute_effectiveness, TypeEffectiveness};
use crate::errors::{DetailError, DetailResult};
use schema::{EvolutionNode, FlavorTextEntry, PokemonType, SpeciesData, TypeData};

/// Fixed fallback shown when no usable flavor text exists.
pub const NO_DESCRIPTION_FALLBACK: &str = "No description available.";

/// Source versions whose English flavor text is preferred, in order.
const PREFERRED_VERSIONS: [&str; 5] = ["red", "blue", "yellow", "firered", "leafgreen"];

#[derive(Debug, Clone, PartialEq)]
pub struct StatLine {
    pub name: String,
    pub base_value: u16,
}

/// One node of the displayed evolution sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct EvolutionStage {
    pub name: String,
    pub sprite: Option<String>,
}

/// The merged, display-ready detail model.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailView {
    pub id: u32,
    pub name: String,
    pub sprite: Option<String>,
    pub sprite_shiny: Option<String>,
    pub types: Vec<PokemonType>,
    /// Decimeters.
    pub height: u32,
    /// Hectograms.
    pub weight: u32,
    pub stats: Vec<StatLine>,
    pub description: String,
    /// `None` means "no evolution data"; a populated list is the primary
    /// branch of the chain, first stage first.
    pub evolution: Option<Vec<EvolutionStage>>,
    pub effectiveness: TypeEffectiveness,
}

/// Load and merge everything the detail view needs.
///
/// The primary record is fetched first; if it is unavailable the whole
/// operation reports an error and no further sub-fetches are attempted.
/// The species record and the per-type matchup fetches then run
/// concurrently and are joined before the derived views are computed.
pub async fn load_detail(client: &ApiClient, id: u32) -> DetailResult<DetailView> {
    let key = id.to_string();
    let pokemon = client
        .fetch_pokemon(&key)
        .await
        .ok_or(DetailError::PokemonUnavailable(id))?;

    let types: Vec<PokemonType> = pokemon
        .types
        .iter()
        .filter_map(|slot| PokemonType::from_api_name(&slot.type_.name))
        .collect();

    let (species, relations) = tokio::join!(
        client.fetch_species(&key),
        fetch_type_relations(client, &types)
    );

    let (description, chain_id) = species_sections(species.as_ref());
    let evolution = match chain_id {
        Some(chain_id) => load_evolution_stages(client, chain_id).await,
        None => None,
    };

    let stats = pokemon
        .stats
        .iter()
        .map(|entry| StatLine {
            name: entry.stat.name.clone(),
            base_value: entry.base_stat,
        })
        .collect();

    Ok(DetailView {
        id: pokemon.id,
        name: pokemon.name,
        sprite: pokemon.sprites.front_default,
        sprite_shiny: pokemon.sprites.front_shiny,
        types,
        height: pokemon.height,
        weight: pokemon.weight,
        stats,
        description,
        evolution,
        effectiveness: compute_effectiveness(&relations),
    })
}

/// Derive the species-dependent sections of the view: the description
/// text and the evolution-chain id to follow. A missing species record
/// yields the fixed fallback description and no chain, so the rest of the
/// view still populates.
fn species_sections(species: Option<&SpeciesData>) -> (String, Option<u32>) {
    match species {
        Some(species) => (
            select_description(&species.flavor_text_entries),
            species
                .evolution_chain
                .as_ref()
                .and_then(|chain| evolution_chain_id(&chain.url)),
        ),
        None => (NO_DESCRIPTION_FALLBACK.to_string(), None),
    }
}

/// Fetch the matchup record for each of the defender's 1-2 types,
/// concurrently. Individual failures stay as `None` (neutral).
async fn fetch_type_relations(
    client: &ApiClient,
    types: &[PokemonType],
) -> Vec<Option<TypeData>> {
    match *types {
        [] => Vec::new(),
        [only] => vec![client.fetch_type(only).await],
        [primary, secondary, ..] => {
            let (a, b) = tokio::join!(client.fetch_type(primary), client.fetch_type(secondary));
            vec![a, b]
        }
    }
}

/// Fetch the chain and resolve each stage's sprite. Returns `None` when
/// the chain itself is unavailable; a stage whose sprite fetch fails keeps
/// its name with no sprite.
async fn load_evolution_stages(client: &ApiClient, chain_id: u32) -> Option<Vec<EvolutionStage>> {
    let chain = client.fetch_evolution_chain(chain_id).await?;
    let mut stages = Vec::new();
    for name in primary_evolution_path(&chain.chain) {
        let sprite = client
            .fetch_pokemon(&name)
            .await
            .and_then(|p| p.sprites.front_default);
        stages.push(EvolutionStage { name, sprite });
    }
    Some(stages)
}

/// Walk the chain by always descending into the first child, collecting
/// species names until a node has no children. Branching evolutions are
/// deliberately truncated to the primary branch.
pub fn primary_evolution_path(root: &EvolutionNode) -> Vec<String> {
    let mut names = Vec::new();
    let mut current = Some(root);
    while let Some(node) = current {
        names.push(node.species.name.clone());
        current = node.evolves_to.first();
    }
    names
}

/// Extract the trailing numeric identifier from an evolution-chain URL,
/// e.g. ".../evolution-chain/67/" -> 67.
pub fn evolution_chain_id(url: &str) -> Option<u32> {
    url.trim_end_matches('/')
        .rsplit('/')
        .next()
        .and_then(|segment| segment.parse().ok())
}

/// Pick the description: the first English entry whose version is in the
/// preference list, else the first English entry in encountered order.
/// Embedded line and form-feed control characters become single spaces.
pub fn select_description(entries: &[FlavorTextEntry]) -> String {
    let english: Vec<&FlavorTextEntry> = entries
        .iter()
        .filter(|entry| entry.language.name == "en")
        .collect();

    let chosen = PREFERRED_VERSIONS
        .iter()
        .find_map(|version| {
            english
                .iter()
                .find(|entry| entry.version.name == *version)
        })
        .or_else(|| english.first());

    match chosen {
        Some(entry) => normalize_flavor_text(&entry.flavor_text),
        None => NO_DESCRIPTION_FALLBACK.to_string(),
    }
}

fn normalize_flavor_text(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\n' | '\r' | '\u{c}' => ' ',
            other => other,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use schema::{ApiResource, NamedResource};

    fn entry(language: &str, version: &str, text: &str) -> FlavorTextEntry {
        FlavorTextEntry {
            flavor_text: text.to_string(),
            language: NamedResource {
                name: language.to_string(),
                url: String::new(),
            },
            version: NamedResource {
                name: version.to_string(),
                url: String::new(),
            },
        }
    }

    fn node(name: &str, children: Vec<EvolutionNode>) -> EvolutionNode {
        EvolutionNode {
            species: NamedResource {
                name: name.to_string(),
                url: String::new(),
            },
            evolves_to: children,
        }
    }

    #[test]
    fn preferred_version_wins_over_encounter_order() {
        let entries = vec![
            entry("en", "sword", "Sword text."),
            entry("en", "red", "Red text."),
        ];
        assert_eq!(select_description(&entries), "Red text.");
    }

    #[test]
    fn falls_back_to_first_english_entry() {
        let entries = vec![
            entry("fr", "red", "Texte francais."),
            entry("en", "sword", "Sword text."),
            entry("en", "shield", "Shield text."),
        ];
        assert_eq!(select_description(&entries), "Sword text.");
    }

    #[test]
    fn no_english_entry_yields_fallback() {
        let entries = vec![entry("ja", "red", "Japanese text.")];
        assert_eq!(select_description(&entries), NO_DESCRIPTION_FALLBACK);
        assert_eq!(select_description(&[]), NO_DESCRIPTION_FALLBACK);
    }

    #[test]
    fn control_characters_become_single_spaces() {
        let entries = vec![entry("en", "red", "A strange seed was\nplanted\u{c}on its\rback.")];
        assert_eq!(
            select_description(&entries),
            "A strange seed was planted on its back."
        );
    }

    #[test]
    fn evolution_walk_follows_first_child_only() {
        // gloom branches into vileplume and bellossom; only the first
        // branch is collected.
        let chain = node(
            "oddish",
            vec![node(
                "gloom",
                vec![node("vileplume", vec![]), node("bellossom", vec![])],
            )],
        );
        assert_eq!(
            primary_evolution_path(&chain),
            vec!["oddish", "gloom", "vileplume"]
        );
    }

    #[test]
    fn root_with_branching_children_takes_the_first() {
        let chain = node(
            "tyrogue",
            vec![node("hitmonlee", vec![]), node("hitmonchan", vec![])],
        );
        assert_eq!(primary_evolution_path(&chain), vec!["tyrogue", "hitmonlee"]);
    }

    #[test]
    fn single_node_chain_is_just_the_root() {
        let chain = node("farfetchd", vec![]);
        assert_eq!(primary_evolution_path(&chain), vec!["farfetchd"]);
    }

    #[test]
    fn missing_species_yields_fallback_description_and_no_chain() {
        let (description, chain_id) = species_sections(None);
        assert_eq!(description, NO_DESCRIPTION_FALLBACK);
        assert_eq!(chain_id, None);
    }

    #[test]
    fn species_without_a_chain_keeps_its_description() {
        let species = SpeciesData {
            flavor_text_entries: vec![entry("en", "red", "Red text.")],
            evolution_chain: None,
            generation: None,
        };
        let (description, chain_id) = species_sections(Some(&species));
        assert_eq!(description, "Red text.");
        assert_eq!(chain_id, None);
    }

    #[test]
    fn species_chain_url_resolves_to_a_chain_id() {
        let species = SpeciesData {
            flavor_text_entries: Vec::new(),
            evolution_chain: Some(ApiResource {
                url: "https://example.test/api/v2/evolution-chain/67/".to_string(),
            }),
            generation: None,
        };
        let (description, chain_id) = species_sections(Some(&species));
        assert_eq!(description, NO_DESCRIPTION_FALLBACK);
        assert_eq!(chain_id, Some(67));
    }

    #[test]
    fn chain_id_comes_from_the_trailing_url_segment() {
        assert_eq!(
            evolution_chain_id("https://example.test/api/v2/evolution-chain/67/"),
            Some(67)
        );
        assert_eq!(
            evolution_chain_id("https://example.test/api/v2/evolution-chain/1"),
            Some(1)
        );
        assert_eq!(evolution_chain_id("https://example.test/api/v2/"), None);
    }

    #[tokio::test]
    async fn primary_fetch_failure_is_the_only_hard_error() {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 1024];
            let _ = socket.read(&mut buf).await;
            let _ = socket
                .write_all(b"HTTP/1.1 404 Not Found\r\ncontent-length: 0\r\n\r\n")
                .await;
        });

        let client = ApiClient::new(format!("http://{}/api/v2", addr));
        let err = load_detail(&client, 151).await.unwrap_err();
        assert_eq!(err, DetailError::PokemonUnavailable(151));
        server.await.unwrap();
    }
}
