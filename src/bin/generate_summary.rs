//! One-shot offline tool that pre-fetches and flattens PokeAPI data into
//! the static summary file the catalog loads at startup.
//!
//! Fetches by id, one at a time with a small politeness delay; ids whose
//! fetch fails are skipped with a log entry rather than aborting the run.

use pokedex_catalog::{ApiClient, Config, PokemonSummary, PokemonType};
use std::fs;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

const DEFAULT_MAX_ID: u32 = 151;
const FETCH_DELAY: Duration = Duration::from_millis(50);

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = Config::from_env();
    let max_id = std::env::var("POKEDEX_MAX_ID")
        .ok()
        .and_then(|raw| raw.parse::<u32>().ok())
        .unwrap_or(DEFAULT_MAX_ID);

    let client = ApiClient::new(config.api_base_url.clone());
    let mut summaries: Vec<PokemonSummary> = Vec::new();

    println!("Fetching summaries for ids 1..={}...", max_id);
    for id in 1..=max_id {
        match build_summary(&client, id).await {
            Some(summary) => summaries.push(summary),
            None => tracing::warn!(id, "skipping id, fetch failed"),
        }
        if id % 25 == 0 {
            println!("  {}/{} processed ({} collected)", id, max_id, summaries.len());
        }
        tokio::time::sleep(FETCH_DELAY).await;
    }

    if summaries.is_empty() {
        eprintln!("No summaries could be fetched; not writing {}.", config.summary_path.display());
        std::process::exit(1);
    }

    if let Some(parent) = config.summary_path.parent() {
        if !parent.as_os_str().is_empty() {
            if let Err(e) = fs::create_dir_all(parent) {
                eprintln!("Could not create {}: {}", parent.display(), e);
                std::process::exit(1);
            }
        }
    }

    let json = match serde_json::to_string_pretty(&summaries) {
        Ok(json) => json,
        Err(e) => {
            eprintln!("Could not serialize summaries: {}", e);
            std::process::exit(1);
        }
    };
    if let Err(e) = fs::write(&config.summary_path, json) {
        eprintln!("Could not write {}: {}", config.summary_path.display(), e);
        std::process::exit(1);
    }

    println!(
        "Wrote {} summaries to {}.",
        summaries.len(),
        config.summary_path.display()
    );
}

/// Fetch the entity and species records for one id and flatten them into
/// a summary record. Unknown type names are dropped so the summary file
/// always parses back.
async fn build_summary(client: &ApiClient, id: u32) -> Option<PokemonSummary> {
    let key = id.to_string();
    let pokemon = client.fetch_pokemon(&key).await?;
    let species = client.fetch_species(&key).await;

    let generation = species
        .and_then(|s| s.generation.map(|g| g.name))
        .unwrap_or_else(|| "unknown-generation".to_string());

    let types: Vec<PokemonType> = pokemon
        .types
        .iter()
        .filter_map(|slot| PokemonType::from_api_name(&slot.type_.name))
        .collect();

    Some(PokemonSummary {
        id: pokemon.id,
        name: pokemon.name,
        sprite: pokemon.sprites.front_default,
        types,
        generation,
        height: pokemon.height,
        weight: pokemon.weight,
    })
}
