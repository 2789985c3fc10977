use std::env;
use std::path::PathBuf;

pub const DEFAULT_API_BASE_URL: &str = "https://pokeapi.co/api/v2";
pub const DEFAULT_SUMMARY_PATH: &str = "data/all_pokemon_summary.json";
pub const DEFAULT_FAVORITES_PATH: &str = "data/kanto_favorites.json";
pub const DEFAULT_ITEMS_PER_PAGE: usize = 20;

/// Runtime configuration, read once at startup. Every knob has a default;
/// environment variables with the POKEDEX_ prefix override them.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the remote entity API.
    pub api_base_url: String,
    /// Path of the pre-built summary file.
    pub summary_path: PathBuf,
    /// Path of the persisted favorites list.
    pub favorites_path: PathBuf,
    /// Fixed page size for the grid.
    pub items_per_page: usize,
    /// Generation endpoint for the semantic search assist; assist is
    /// disabled when unset.
    pub assist_endpoint: Option<String>,
    /// API key for the assist endpoint; assist is disabled when unset.
    pub assist_api_key: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        let items_per_page = env::var("POKEDEX_ITEMS_PER_PAGE")
            .ok()
            .and_then(|raw| raw.parse::<usize>().ok())
            .filter(|n| *n > 0)
            .unwrap_or(DEFAULT_ITEMS_PER_PAGE);

        Config {
            api_base_url: env::var("POKEDEX_API_URL")
                .unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string()),
            summary_path: env::var("POKEDEX_SUMMARY_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_SUMMARY_PATH)),
            favorites_path: env::var("POKEDEX_FAVORITES_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_FAVORITES_PATH)),
            items_per_page,
            assist_endpoint: env::var("POKEDEX_ASSIST_URL").ok(),
            assist_api_key: env::var("POKEDEX_ASSIST_KEY").ok(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            summary_path: PathBuf::from(DEFAULT_SUMMARY_PATH),
            favorites_path: PathBuf::from(DEFAULT_FAVORITES_PATH),
            items_per_page: DEFAULT_ITEMS_PER_PAGE,
            assist_endpoint: None,
            assist_api_key: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_config_points_at_public_api() {
        let config = Config::default();
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.items_per_page, 20);
        assert_eq!(config.assist_endpoint, None);
    }
}
