//! Remote Claim Analyzer
//!
//! Sends a claim and its evidence articles to a language model and converts
//! the JSON reply into a [`ClaimAnalysisResult`]. Every failure short of
//! invalid input degrades to [`fallback_analysis`].

use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use vedanta_core::{
    baseline_credibility, extract_keywords, fallback_analysis, reputation_summary, source_type,
    validate_claim, AnalysisError, AnalysisOrigin, Article, ClaimAnalysisResult,
    CredibilityScore, RedFlag, RelevanceReport, SourceAnalysis, StatusThresholds, SubClaim,
    VerificationStatus, RELEVANCE_KEYWORDS,
};

use crate::{LlmError, Persona, RateLimiter, SharedBackend};

/// Remote analysis settings
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    /// Articles included in the prompt
    pub max_articles: usize,
    /// Upper bound on a single model call
    pub timeout: Duration,
    /// Keyword overlap below which a response is flagged as off-topic
    pub relevance_threshold: f64,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            max_articles: 10,
            timeout: Duration::from_secs(30),
            relevance_threshold: 0.3,
        }
    }
}

// Every leaf tolerates null or absence; only the score and claim list are required.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RemotePayload {
    overall_credibility: Option<f64>,
    overall_status: Option<String>,
    reasoning: Option<String>,
    claims: Option<Vec<RemoteClaim>>,
    source_analysis: Option<Vec<RemoteSource>>,
    red_flags: Option<Vec<Option<String>>>,
    contextual_info: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RemoteClaim {
    claim_text: Option<String>,
    status: Option<String>,
    credibility: Option<f64>,
    evidence: Option<String>,
    sources: Option<Vec<Option<String>>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RemoteSource {
    name: Option<String>,
    credibility_score: Option<f64>,
    reputation: Option<String>,
    coverage: Option<String>,
}

/// Model-backed claim analyzer
pub struct RemoteAnalyzer {
    backend: SharedBackend,
    persona: Persona,
    limiter: Arc<RateLimiter>,
    config: AnalyzerConfig,
}

impl RemoteAnalyzer {
    pub fn new(backend: SharedBackend, persona: Persona, limiter: Arc<RateLimiter>) -> Self {
        Self {
            backend,
            persona,
            limiter,
            config: AnalyzerConfig::default(),
        }
    }

    pub fn with_config(mut self, config: AnalyzerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn model_name(&self) -> &str {
        self.backend.model_name()
    }

    /// Analyze a claim, falling back to heuristics on any remote failure
    ///
    /// Only an empty claim is reported as an error.
    pub async fn analyze(
        &self,
        claim: &str,
        articles: &[Article],
    ) -> Result<ClaimAnalysisResult, AnalysisError> {
        let claim = validate_claim(claim)?;

        match self.try_remote(claim, articles).await {
            Ok(result) => Ok(result),
            Err(e) => {
                match e {
                    AnalysisError::NoEvidence => debug!("No evidence, using heuristic analysis"),
                    _ => warn!("Remote analysis failed, using heuristic analysis: {}", e),
                }
                Ok(fallback_analysis(claim, articles))
            }
        }
    }

    /// Remote analysis alone, without the heuristic fallback
    pub async fn try_remote(
        &self,
        claim: &str,
        articles: &[Article],
    ) -> Result<ClaimAnalysisResult, AnalysisError> {
        if articles.is_empty() {
            return Err(AnalysisError::NoEvidence);
        }

        if !self.limiter.try_acquire() {
            return Err(AnalysisError::RemoteUnavailable(format!(
                "rate limit of {} requests exhausted",
                self.limiter.max_requests()
            )));
        }

        let user = self.persona.render_user(
            claim,
            &self.limiter.now().format("%Y-%m-%d").to_string(),
            articles.len(),
            &format_sources(articles, self.config.max_articles),
        );

        info!(
            "Requesting remote analysis from {} ({} articles)",
            self.backend.model_name(),
            articles.len()
        );

        let response = tokio::time::timeout(
            self.config.timeout,
            self.backend.generate(self.persona.system_prompt(), &user),
        )
        .await
        .map_err(|_| {
            AnalysisError::RemoteUnavailable(format!(
                "no response within {}s",
                self.config.timeout.as_secs_f64()
            ))
        })?
        .map_err(|e| backend_failure(e, self.backend.model_name()))?;

        let json = extract_json(&response)?;
        let payload = parse_payload(json)?;

        let relevance = check_relevance(claim, json, self.config.relevance_threshold);
        if relevance.low_overlap {
            warn!(
                "Remote analysis may be off-topic: {}/{} claim keywords present",
                relevance.matched,
                relevance.keywords.len()
            );
        }

        Ok(into_result(payload, relevance))
    }
}

/// Prompt block describing up to `limit` articles
fn format_sources(articles: &[Article], limit: usize) -> String {
    articles
        .iter()
        .take(limit)
        .enumerate()
        .map(|(i, article)| {
            format!(
                "Source {}: {}\nTitle: {}\nPublished: {}\nDescription: {}\n",
                i + 1,
                article.source_name(),
                article.title,
                article.published_at.as_deref().unwrap_or("Unknown"),
                article.description.as_deref().unwrap_or("No description"),
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Slice out the JSON object, dropping code fences or surrounding prose
fn extract_json(response: &str) -> Result<&str, AnalysisError> {
    match (response.find('{'), response.rfind('}')) {
        (Some(start), Some(end)) if start < end => Ok(&response[start..=end]),
        _ => Err(AnalysisError::MalformedRemoteResponse(
            "no JSON object in response".to_string(),
        )),
    }
}

fn parse_payload(json: &str) -> Result<RemotePayload, AnalysisError> {
    let payload: RemotePayload = serde_json::from_str(json)
        .map_err(|e| AnalysisError::MalformedRemoteResponse(e.to_string()))?;

    if payload.overall_credibility.is_none() {
        return Err(AnalysisError::MalformedRemoteResponse(
            "missing overallCredibility".to_string(),
        ));
    }
    if !payload.claims.as_ref().is_some_and(|claims| !claims.is_empty()) {
        return Err(AnalysisError::MalformedRemoteResponse(
            "no claims in response".to_string(),
        ));
    }

    Ok(payload)
}

/// Share of the claim's keywords that appear in the response text
pub fn check_relevance(claim: &str, response: &str, threshold: f64) -> RelevanceReport {
    let keywords = extract_keywords(claim, RELEVANCE_KEYWORDS);
    let haystack = response.to_lowercase();
    let matched = keywords.iter().filter(|k| haystack.contains(k.as_str())).count();

    let ratio = if keywords.is_empty() {
        1.0
    } else {
        matched as f64 / keywords.len() as f64
    };

    RelevanceReport {
        keywords,
        matched,
        ratio,
        low_overlap: ratio < threshold,
    }
}

fn status_or_derived(raw: Option<&str>, score: CredibilityScore) -> VerificationStatus {
    raw.and_then(VerificationStatus::parse)
        .unwrap_or_else(|| VerificationStatus::from_score(score, StatusThresholds::REMOTE))
}

fn into_result(payload: RemotePayload, relevance: RelevanceReport) -> ClaimAnalysisResult {
    let overall_score = CredibilityScore::from(payload.overall_credibility.unwrap_or_default());
    let overall_status = status_or_derived(payload.overall_status.as_deref(), overall_score);

    let sub_claims = payload
        .claims
        .unwrap_or_default()
        .into_iter()
        .map(|claim| {
            let credibility = claim
                .credibility
                .map(CredibilityScore::from)
                .unwrap_or(overall_score);
            SubClaim {
                claim_text: claim.claim_text.unwrap_or_default(),
                status: status_or_derived(claim.status.as_deref(), credibility),
                credibility,
                evidence: claim.evidence.unwrap_or_default(),
                sources: claim.sources.unwrap_or_default().into_iter().flatten().collect(),
            }
        })
        .collect();

    // entries without an outlet name cannot be attributed, drop them
    let source_analyses = payload
        .source_analysis
        .unwrap_or_default()
        .into_iter()
        .filter_map(|source| {
            let name = source.name.filter(|n| !n.trim().is_empty())?;
            Some(SourceAnalysis {
                baseline_credibility: source
                    .credibility_score
                    .map(CredibilityScore::from)
                    .unwrap_or_else(|| baseline_credibility(&name)),
                category: source_type(&name),
                reputation: source
                    .reputation
                    .unwrap_or_else(|| reputation_summary(&name).to_string()),
                evidence_summary: source.coverage.unwrap_or_default(),
                name,
            })
        })
        .collect();

    let red_flags = payload
        .red_flags
        .unwrap_or_default()
        .into_iter()
        .flatten()
        .map(|flag| RedFlag::new(&flag))
        .collect();

    ClaimAnalysisResult {
        overall_score,
        overall_status,
        reasoning: payload.reasoning.unwrap_or_default(),
        sub_claims,
        source_analyses,
        red_flags,
        contextual_note: payload.contextual_info.unwrap_or_default(),
        origin: AnalysisOrigin::Remote,
        relevance: Some(relevance),
    }
}

/// Map a backend failure, calling out provider-side throttling
fn backend_failure(error: LlmError, model: &str) -> AnalysisError {
    match error {
        LlmError::RateLimited => {
            warn!("{} rejected the request with a provider rate limit", model);
            AnalysisError::RemoteUnavailable("provider rate limit reached".to_string())
        }
        other => AnalysisError::RemoteUnavailable(other.to_string()),
    }
}
