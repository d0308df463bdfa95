//! Web search providers.
//!
//! The relay talks to Google Programmable Search when a credential is
//! configured and otherwise falls back to a deterministic offline
//! simulation, so development and tests never need network access.

use async_trait::async_trait;
use learnflow_config::SearchConfig;
use learnflow_protocol::{AdapterError, SearchHit};
use log::{debug, info};
use serde::Deserialize;
use std::sync::Arc;

/// Default number of search hits requested per query.
pub const DEFAULT_SEARCH_LIMIT: usize = 3;

/// Google Programmable Search JSON API endpoint.
const SEARCH_URL: &str = "https://www.googleapis.com/customsearch/v1";

/// Web search interface for the relay.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Perform a search and return up to `limit` ranked hits.
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchHit>, AdapterError>;
}

/// Pick a provider for the configured credentials.
pub fn provider_from_config(config: &SearchConfig) -> Arc<dyn SearchProvider> {
    if let (Some(api_key), Some(engine_id)) = (config.api_key.clone(), config.engine_id.clone()) {
        info!("using Google search provider");
        Arc::new(GoogleSearchProvider::new(api_key, engine_id))
    } else {
        info!("no search credential configured; using simulated search provider");
        Arc::new(SimulatedSearchProvider)
    }
}

/// Provider backed by the Google Programmable Search JSON API.
#[derive(Clone)]
pub struct GoogleSearchProvider {
    client: reqwest::Client,
    api_key: String,
    engine_id: String,
}

impl GoogleSearchProvider {
    /// Create a provider with the given credential and engine id.
    pub fn new(api_key: impl Into<String>, engine_id: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            engine_id: engine_id.into(),
        }
    }
}

#[async_trait]
impl SearchProvider for GoogleSearchProvider {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchHit>, AdapterError> {
        debug!("web search (query_len={}, limit={})", query.len(), limit);
        let num = limit.to_string();
        let response = self
            .client
            .get(SEARCH_URL)
            .query(&[
                ("key", self.api_key.as_str()),
                ("cx", self.engine_id.as_str()),
                ("q", query),
                ("num", num.as_str()),
            ])
            .send()
            .await
            .map_err(|err| AdapterError::SearchFailed(format!("request failed: {err}")))?;

        if !response.status().is_success() {
            return Err(AdapterError::SearchFailed(format!(
                "search returned status {}",
                response.status()
            )));
        }

        let payload: GoogleSearchResponse = response
            .json()
            .await
            .map_err(|err| AdapterError::SearchFailed(format!("bad payload: {err}")))?;

        let hits = payload
            .items
            .unwrap_or_default()
            .into_iter()
            .take(limit)
            .map(|item| SearchHit {
                title: item.title,
                url: item.link,
                snippet: item.snippet.unwrap_or_default(),
            })
            .collect();
        Ok(hits)
    }
}

#[derive(Deserialize)]
struct GoogleSearchResponse {
    items: Option<Vec<GoogleSearchItem>>,
}

#[derive(Deserialize)]
struct GoogleSearchItem {
    title: String,
    link: String,
    snippet: Option<String>,
}

/// Deterministic offline provider keyed by topic keywords.
#[derive(Debug, Default, Clone, Copy)]
pub struct SimulatedSearchProvider;

/// Topic buckets for the simulation: (trigger keywords, topic label, site).
const TOPIC_BUCKETS: &[(&[&str], &str, &str)] = &[
    (
        &["chemistry", "chemical", "polymer", "electrochem"],
        "Chemistry",
        "chemlibretexts.org",
    ),
    (
        &["programming", "code", "python", "rust", "java", "algorithm"],
        "Programming",
        "developer.mozilla.org",
    ),
    (
        &["engineering", "mechanical", "electrical", "circuit"],
        "Engineering",
        "engineeringtoolbox.com",
    ),
    (
        &["math", "calculus", "algebra", "matrix"],
        "Mathematics",
        "khanacademy.org",
    ),
];

#[async_trait]
impl SearchProvider for SimulatedSearchProvider {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchHit>, AdapterError> {
        let lowered = query.to_lowercase();
        let (topic, site) = TOPIC_BUCKETS
            .iter()
            .find(|(keywords, _, _)| keywords.iter().any(|keyword| lowered.contains(keyword)))
            .map(|(_, topic, site)| (*topic, *site))
            .unwrap_or(("Reference", "en.wikipedia.org"));

        let slug: String = lowered
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("-")
            .chars()
            .filter(|ch| ch.is_ascii_alphanumeric() || *ch == '-')
            .collect();

        let hits = (1..=limit)
            .map(|rank| SearchHit {
                title: format!("{topic} overview ({rank}): {query}"),
                url: format!("https://{site}/search/{slug}?r={rank}"),
                snippet: format!(
                    "Simulated result {rank} for \"{query}\" from the offline {topic} index."
                ),
            })
            .collect();
        Ok(hits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn simulated_search_is_deterministic() {
        let provider = SimulatedSearchProvider;
        let first = provider.search("polymer basics", 3).await.expect("search");
        let second = provider.search("polymer basics", 3).await.expect("search");
        assert_eq!(first, second);
        assert_eq!(first.len(), 3);
        assert!(first[0].title.contains("Chemistry"));
    }

    #[tokio::test]
    async fn simulated_search_falls_back_to_generic_topic() {
        let provider = SimulatedSearchProvider;
        let hits = provider.search("history of rome", 2).await.expect("search");
        assert_eq!(hits.len(), 2);
        assert!(hits[0].url.contains("en.wikipedia.org"));
    }

    #[test]
    fn provider_selection_prefers_configured_credentials() {
        let configured = SearchConfig {
            api_key: Some("k".to_string()),
            engine_id: Some("cx".to_string()),
        };
        assert!(configured.is_configured());
        // Selection itself is covered by is_configured; both branches build.
        let _ = provider_from_config(&configured);
        let _ = provider_from_config(&SearchConfig::default());
    }
}
