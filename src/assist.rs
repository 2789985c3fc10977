//! Optional semantic search assist.
//!
//! A free-text query goes to an external text-generation service, which is
//! asked to answer in a fixed two-line format. The parser is tolerant and
//! isolated from the network call so it can be tested against malformed
//! output on its own. Any failure (unconfigured, unreachable, unparseable)
//! degrades to an empty extraction; the assist never blocks search.

use crate::config::Config;
use schema::PokemonType;
use serde::Deserialize;
use serde_json::json;

pub const MAX_EXTRACTED_TYPES: usize = 2;
pub const MAX_EXTRACTED_KEYWORDS: usize = 5;

/// Structured extraction pulled out of the service's free-text reply.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AssistExtraction {
    pub types: Vec<PokemonType>,
    pub keywords: Vec<String>,
}

/// Parse the `FIELD: v1, v2, ...` reply format. Field names are matched
/// case-insensitively, the literal value "none" means empty, unknown type
/// names are dropped, and unrecognized lines are ignored.
pub fn parse_extraction(text: &str) -> AssistExtraction {
    let mut extraction = AssistExtraction::default();

    for line in text.lines() {
        let Some((field, rest)) = line.split_once(':') else {
            continue;
        };
        let values = split_values(rest);
        match field.trim().to_lowercase().as_str() {
            "types" => {
                extraction.types = values
                    .iter()
                    .filter_map(|v| PokemonType::from_api_name(v))
                    .take(MAX_EXTRACTED_TYPES)
                    .collect();
            }
            "keywords" => {
                extraction.keywords = values.into_iter().take(MAX_EXTRACTED_KEYWORDS).collect();
            }
            _ => {}
        }
    }

    extraction
}

fn split_values(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|v| v.trim().to_lowercase())
        .filter(|v| !v.is_empty() && v != "none")
        .collect()
}

// Reply shape of the generation endpoint; only the first candidate's text
// is read.
#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

/// Client for the generation endpoint. Constructed only when both the
/// endpoint and the key are configured.
pub struct AssistClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl AssistClient {
    pub fn from_config(config: &Config) -> Option<Self> {
        match (&config.assist_endpoint, &config.assist_api_key) {
            (Some(endpoint), Some(api_key)) => Some(AssistClient {
                http: reqwest::Client::new(),
                endpoint: endpoint.clone(),
                api_key: api_key.clone(),
            }),
            _ => None,
        }
    }

    /// Ask the service to translate a natural-language query into type
    /// names and keywords. Every failure path returns an empty extraction.
    pub async fn extract(&self, query: &str) -> AssistExtraction {
        let prompt = format!(
            "You translate Pokedex search queries into filters. Respond with \
             exactly two lines and nothing else:\n\
             TYPES: up to two Pokemon type names, comma separated, or none\n\
             KEYWORDS: up to five keywords (such as small, large, light, heavy, \
             or a name fragment), comma separated, or none\n\n\
             Query: {}",
            query
        );
        let body = json!({
            "contents": [{"parts": [{"text": prompt}]}]
        });

        let response = match self
            .http
            .post(&self.endpoint)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(error = %e, "assist request failed");
                return AssistExtraction::default();
            }
        };

        if !response.status().is_success() {
            tracing::warn!(status = %response.status(), "assist request rejected");
            return AssistExtraction::default();
        }

        match response.json::<GenerateResponse>().await {
            Ok(reply) => {
                let text = reply
                    .candidates
                    .first()
                    .and_then(|c| c.content.parts.first())
                    .map(|p| p.text.as_str())
                    .unwrap_or("");
                parse_extraction(text)
            }
            Err(e) => {
                tracing::warn!(error = %e, "could not decode assist reply");
                AssistExtraction::default()
            }
        }
    }
}
