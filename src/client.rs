//! Remote fetch layer with per-URL memoization.
//!
//! Every external data pull goes through `ApiClient`: entity detail,
//! species detail, evolution chains, and type matchup records each have
//! their own cache, keyed by the exact request URL and never invalidated
//! within a session. All failures degrade to `None` plus a log entry;
//! callers treat `None` as "unavailable" and render a fallback.

use schema::{EvolutionChainData, PokemonData, PokemonType, SpeciesData, TypeData};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::sync::Mutex;

/// Append-only map of URL -> decoded payload. Locks are scoped to the
/// lookup or insert and never held across an await point.
struct UrlCache<T> {
    entries: Mutex<HashMap<String, T>>,
}

impl<T: Clone> UrlCache<T> {
    fn new() -> Self {
        UrlCache {
            entries: Mutex::new(HashMap::new()),
        }
    }

    fn get(&self, url: &str) -> Option<T> {
        self.entries
            .lock()
            .ok()
            .and_then(|entries| entries.get(url).cloned())
    }

    fn insert(&self, url: String, value: T) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(url, value);
        }
    }
}

/// HTTP client over the remote entity API, with one memoizing cache per
/// resource kind.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    pokemon: UrlCache<PokemonData>,
    species: UrlCache<SpeciesData>,
    evolution: UrlCache<EvolutionChainData>,
    type_data: UrlCache<TypeData>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        ApiClient {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            pokemon: UrlCache::new(),
            species: UrlCache::new(),
            evolution: UrlCache::new(),
            type_data: UrlCache::new(),
        }
    }

    /// Fetch an entity record by numeric id or lowercase name.
    pub async fn fetch_pokemon(&self, id_or_name: &str) -> Option<PokemonData> {
        let url = format!("{}/pokemon/{}", self.base_url, id_or_name.to_lowercase());
        self.fetch_cached(url, &self.pokemon).await
    }

    /// Fetch a species record by numeric id or lowercase name.
    pub async fn fetch_species(&self, id_or_name: &str) -> Option<SpeciesData> {
        let url = format!(
            "{}/pokemon-species/{}",
            self.base_url,
            id_or_name.to_lowercase()
        );
        self.fetch_cached(url, &self.species).await
    }

    /// Fetch an evolution chain by its numeric id.
    pub async fn fetch_evolution_chain(&self, chain_id: u32) -> Option<EvolutionChainData> {
        let url = format!("{}/evolution-chain/{}", self.base_url, chain_id);
        self.fetch_cached(url, &self.evolution).await
    }

    /// Fetch the matchup record for one type.
    pub async fn fetch_type(&self, type_: PokemonType) -> Option<TypeData> {
        let url = format!("{}/type/{}", self.base_url, type_);
        self.fetch_cached(url, &self.type_data).await
    }

    /// Generic fetch-with-memoization. On a cache hit the network is never
    /// touched; on a miss the response is decoded and stored under the
    /// exact URL. Bad status, transport failure, and decode failure all
    /// resolve to `None` with a diagnostic log entry.
    async fn fetch_cached<T>(&self, url: String, cache: &UrlCache<T>) -> Option<T>
    where
        T: DeserializeOwned + Clone,
    {
        if let Some(hit) = cache.get(&url) {
            tracing::debug!(url = %url, "cache hit");
            return Some(hit);
        }

        let response = match self.http.get(&url).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(url = %url, error = %e, "request failed");
                return None;
            }
        };

        if !response.status().is_success() {
            tracing::warn!(url = %url, status = %response.status(), "non-success response");
            return None;
        }

        match response.json::<T>().await {
            Ok(data) => {
                cache.insert(url, data.clone());
                Some(data)
            }
            Err(e) => {
                tracing::warn!(url = %url, error = %e, "could not decode response body");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use schema::{DamageRelations, NamedResource};

    fn grass_type_data() -> TypeData {
        TypeData {
            name: "grass".to_string(),
            damage_relations: DamageRelations {
                double_damage_from: vec![NamedResource {
                    name: "fire".to_string(),
                    url: String::new(),
                }],
                half_damage_from: vec![],
                no_damage_from: vec![],
            },
        }
    }

    #[test]
    fn cache_returns_stored_value_for_exact_url() {
        let cache: UrlCache<TypeData> = UrlCache::new();
        let url = "https://example.test/type/grass";

        assert_eq!(cache.get(url), None);
        cache.insert(url.to_string(), grass_type_data());
        assert_eq!(cache.get(url), Some(grass_type_data()));
        // A different URL is a miss even for the same resource kind.
        assert_eq!(cache.get("https://example.test/type/fire"), None);
    }

    /// Serve exactly one connection on a loopback port with a canned
    /// HTTP response, returning the bound address.
    async fn one_shot_server(
        response: &'static [u8],
    ) -> (std::net::SocketAddr, tokio::task::JoinHandle<()>) {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 1024];
            let _ = socket.read(&mut buf).await;
            let _ = socket.write_all(response).await;
        });
        (addr, handle)
    }

    #[tokio::test]
    async fn non_success_status_degrades_to_none() {
        let (addr, server) =
            one_shot_server(b"HTTP/1.1 404 Not Found\r\ncontent-length: 0\r\n\r\n").await;
        let client = ApiClient::new(format!("http://{}/api/v2", addr));
        assert_eq!(client.fetch_pokemon("1").await, None);
        server.await.unwrap();
    }

    #[tokio::test]
    async fn undecodable_body_degrades_to_none() {
        let (addr, server) =
            one_shot_server(b"HTTP/1.1 200 OK\r\ncontent-length: 8\r\n\r\nnot json").await;
        let client = ApiClient::new(format!("http://{}/api/v2", addr));
        assert_eq!(client.fetch_type(PokemonType::Fire).await, None);
        server.await.unwrap();
    }

    #[tokio::test]
    async fn refused_connection_degrades_to_none() {
        // Bind to learn a free loopback port, then drop the listener so
        // the connection is refused at the transport level.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = ApiClient::new(format!("http://{}/api/v2", addr));
        assert_eq!(client.fetch_pokemon("1").await, None);
    }

    #[test]
    fn base_url_trailing_slash_is_normalized() {
        let client = ApiClient::new("https://example.test/api/v2/");
        assert_eq!(client.base_url, "https://example.test/api/v2");
    }
}
