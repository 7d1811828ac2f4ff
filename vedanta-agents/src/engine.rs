//! Credibility Engine
//!
//! Entry point for claim verification. Evidence comes either from the caller
//! or from the configured news sources; scoring is remote when an analyzer
//! is attached and heuristic otherwise.

use chrono::Utc;
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

use vedanta_core::{
    fallback_analysis, validate_claim, verify_search, AnalysisError, Article,
    ClaimAnalysisResult, SearchOptions, SearchVerification,
};

use crate::{gather_evidence, RemoteAnalyzer, SharedNewsSource};

pub struct CredibilityEngine {
    remote: Option<RemoteAnalyzer>,
    sources: Vec<SharedNewsSource>,
    search_options: SearchOptions,
}

impl CredibilityEngine {
    /// Heuristic scoring only, no news sources
    pub fn offline() -> Self {
        Self {
            remote: None,
            sources: Vec::new(),
            search_options: SearchOptions::for_claim(),
        }
    }

    pub fn with_remote(mut self, analyzer: RemoteAnalyzer) -> Self {
        self.remote = Some(analyzer);
        self
    }

    pub fn with_source(mut self, source: SharedNewsSource) -> Self {
        self.sources.push(source);
        self
    }

    pub fn with_search_options(mut self, options: SearchOptions) -> Self {
        self.search_options = options;
        self
    }

    pub fn is_offline(&self) -> bool {
        self.remote.is_none()
    }

    /// Assess a claim against the given articles
    pub async fn analyze(
        &self,
        claim: &str,
        articles: &[Article],
    ) -> Result<ClaimAnalysisResult, AnalysisError> {
        let span = info_span!("verify", request_id = %Uuid::new_v4());

        async {
            let claim = validate_claim(claim)?;
            info!("Analyzing claim against {} articles", articles.len());

            let result = match &self.remote {
                Some(analyzer) => analyzer.analyze(claim, articles).await?,
                None => fallback_analysis(claim, articles),
            };

            info!(
                "Score {} ({}) from {:?} analysis",
                result.overall_score, result.overall_status, result.origin
            );
            Ok::<_, AnalysisError>(result)
        }
        .instrument(span)
        .await
    }

    /// Gather evidence from the news sources, then assess the claim
    pub async fn verify_claim(&self, claim: &str) -> Result<ClaimAnalysisResult, AnalysisError> {
        let claim = validate_claim(claim)?;
        let articles = gather_evidence(&self.sources, claim, &self.search_options).await;
        self.analyze(claim, &articles).await
    }

    /// Keyword-search scoring report for a claim
    pub async fn search_report(&self, claim: &str) -> Result<SearchVerification, AnalysisError> {
        let claim = validate_claim(claim)?;
        let articles = gather_evidence(&self.sources, claim, &self.search_options).await;
        Ok(verify_search(claim, &articles, Utc::now()))
    }
}

impl Default for CredibilityEngine {
    fn default() -> Self {
        Self::offline()
    }
}
