use async_trait::async_trait;
use learnflow_protocol::{AdapterError, SearchHit};
use learnflow_tools::SearchProvider;
use parking_lot::Mutex;
use std::sync::Arc;

#[derive(Default)]
pub struct StubSearchProvider {
    hits: Vec<SearchHit>,
    pub last_query: Arc<Mutex<Option<(String, usize)>>>,
}

impl StubSearchProvider {
    pub fn new(hits: Vec<SearchHit>) -> Self {
        Self {
            hits,
            last_query: Arc::new(Mutex::new(None)),
        }
    }

    pub fn with_hit(title: &str, url: &str, snippet: &str) -> Self {
        Self::new(vec![SearchHit {
            title: title.to_string(),
            url: url.to_string(),
            snippet: snippet.to_string(),
        }])
    }
}

#[async_trait]
impl SearchProvider for StubSearchProvider {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchHit>, AdapterError> {
        *self.last_query.lock() = Some((query.to_string(), limit));
        Ok(self.hits.clone())
    }
}

#[derive(Default)]
pub struct FailingSearchProvider;

#[async_trait]
impl SearchProvider for FailingSearchProvider {
    async fn search(&self, _query: &str, _limit: usize) -> Result<Vec<SearchHit>, AdapterError> {
        Err(AdapterError::SearchFailed("stubbed failure".to_string()))
    }
}
