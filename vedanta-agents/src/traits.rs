//! Collaborator traits

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

use vedanta_core::{SearchOptions, SearchResponse};

/// Errors from article retrieval
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

/// An external news search provider (NewsAPI, NewsData.io, RSS, ...)
#[async_trait]
pub trait NewsSource: Send + Sync {
    /// Provider name, for logs
    fn name(&self) -> &str;

    /// Search articles matching a keyword query
    async fn search(
        &self,
        query: &str,
        options: &SearchOptions,
    ) -> Result<SearchResponse, SourceError>;
}

/// Thread-safe reference to a news source
pub type SharedNewsSource = Arc<dyn NewsSource>;
