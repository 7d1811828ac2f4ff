//! Evidence gathering
//!
//! Queries every configured news source concurrently for a claim. A source
//! that fails contributes no articles; the others still count.

use futures::future::join_all;
use tracing::{debug, info, warn};

use vedanta_core::{build_search_query, Article, SearchOptions};

use crate::SharedNewsSource;

/// Search all sources for articles about a claim
pub async fn gather_evidence(
    sources: &[SharedNewsSource],
    claim: &str,
    options: &SearchOptions,
) -> Vec<Article> {
    let query = build_search_query(claim);
    if query.is_empty() || sources.is_empty() {
        debug!("No query terms or no sources for claim, skipping search");
        return Vec::new();
    }

    info!("Searching {} sources for: {}", sources.len(), query);

    let futures: Vec<_> = sources
        .iter()
        .map(|source| source.search(&query, options))
        .collect();

    let results = join_all(futures).await;

    let mut articles = Vec::new();
    for (source, result) in sources.iter().zip(results) {
        match result {
            Ok(response) => {
                debug!(
                    "{}: {} articles ({} total results)",
                    source.name(),
                    response.articles.len(),
                    response.total_results
                );
                articles.extend(response.articles);
            }
            Err(e) => warn!("{} search failed: {}", source.name(), e),
        }
    }

    articles
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{NewsSource, SourceError};
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use std::sync::Arc;
    use vedanta_core::SearchResponse;

    struct FixedSource {
        name: String,
        articles: Vec<Article>,
        queries: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl NewsSource for FixedSource {
        fn name(&self) -> &str {
            &self.name
        }

        async fn search(
            &self,
            query: &str,
            _options: &SearchOptions,
        ) -> Result<SearchResponse, SourceError> {
            self.queries.lock().push(query.to_string());
            Ok(SearchResponse {
                articles: self.articles.clone(),
                total_results: self.articles.len(),
            })
        }
    }

    struct BrokenSource;

    #[async_trait]
    impl NewsSource for BrokenSource {
        fn name(&self) -> &str {
            "broken"
        }

        async fn search(
            &self,
            _query: &str,
            _options: &SearchOptions,
        ) -> Result<SearchResponse, SourceError> {
            Err(SourceError::Network("connection refused".to_string()))
        }
    }

    #[tokio::test]
    async fn test_failures_contribute_nothing() {
        let fixed = Arc::new(FixedSource {
            name: "fixed".to_string(),
            articles: vec![Article::new("Kerala floods", "NDTV")],
            queries: Mutex::new(Vec::new()),
        });
        let sources: Vec<SharedNewsSource> = vec![fixed.clone(), Arc::new(BrokenSource)];

        let articles = gather_evidence(
            &sources,
            "Massive floods in Kerala have killed hundreds",
            &SearchOptions::for_claim(),
        )
        .await;

        assert_eq!(articles.len(), 1);
        assert_eq!(fixed.queries.lock().as_slice(), ["massive floods kerala killed"]);
    }

    #[tokio::test]
    async fn test_no_query_terms() {
        let sources: Vec<SharedNewsSource> = vec![Arc::new(BrokenSource)];
        assert!(gather_evidence(&sources, "is it", &SearchOptions::default()).await.is_empty());
    }
}
