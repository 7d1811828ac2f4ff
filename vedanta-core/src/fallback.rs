//! Heuristic claim analysis, used whenever remote analysis is unavailable

use crate::{
    baseline_credibility, detect_red_flags, extract_main_claim, fallback_credibility,
    reputation_summary, source_type, AnalysisOrigin, Article, ClaimAnalysisResult,
    SourceAnalysis, StatusThresholds, SubClaim, VerificationStatus, FALLBACK_TOP_SOURCES,
};

const FALLBACK_CONTEXT: &str = "Analysis performed with available information. \
For complete verification, consult multiple independent sources.";

/// Build a complete analysis from the fallback scoring policy
pub fn fallback_analysis(claim: &str, articles: &[Article]) -> ClaimAnalysisResult {
    let top: Vec<&Article> = articles.iter().take(FALLBACK_TOP_SOURCES).collect();
    let red_flags = detect_red_flags(claim);

    let score = fallback_credibility(articles.len(), red_flags.len());
    let status = VerificationStatus::from_score(score, StatusThresholds::FALLBACK);

    let reasoning = if top.is_empty() {
        "Analysis based on available sources. Limited source coverage found.".to_string()
    } else {
        format!(
            "Analysis based on available sources. Found {} sources covering this claim.",
            top.len()
        )
    };

    let source_names: Vec<String> = top.iter().map(|a| a.source_name().to_string()).collect();

    let evidence = if source_names.is_empty() {
        "Limited coverage in major news sources".to_string()
    } else {
        format!("Covered by {}", source_names.join(", "))
    };

    let sub_claims = vec![SubClaim {
        claim_text: extract_main_claim(claim),
        status,
        credibility: score,
        evidence,
        sources: source_names,
    }];

    let source_analyses = top
        .iter()
        .map(|article| {
            let name = article.source_name();
            SourceAnalysis {
                name: name.to_string(),
                baseline_credibility: baseline_credibility(name),
                category: source_type(name),
                reputation: reputation_summary(name).to_string(),
                evidence_summary: article.title.clone(),
            }
        })
        .collect();

    ClaimAnalysisResult {
        overall_score: score,
        overall_status: status,
        reasoning,
        sub_claims,
        source_analyses,
        red_flags,
        contextual_note: FALLBACK_CONTEXT.to_string(),
        origin: AnalysisOrigin::Heuristic,
        relevance: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RedFlagRule;

    #[test]
    fn test_no_articles() {
        let result = fallback_analysis("Breaking!!! 500 people reportedly dead in cover-up!!!", &[]);

        assert_eq!(result.overall_score.value(), 25);
        assert_eq!(result.overall_status, VerificationStatus::Unverified);
        assert_eq!(result.red_flags.len(), 4);
        assert!(result.source_analyses.is_empty());
        assert_eq!(result.sub_claims.len(), 1);
        assert_eq!(result.sub_claims[0].claim_text, "Breaking");
        assert_eq!(result.sub_claims[0].evidence, "Limited coverage in major news sources");
        assert!(result.reasoning.ends_with("Limited source coverage found."));
        assert!(result.is_fallback());
    }

    #[test]
    fn test_with_articles() {
        let articles: Vec<Article> = ["Reuters", "NDTV", "Blog A", "Blog B", "PTI", "Blog C"]
            .iter()
            .map(|source| Article::new(&format!("Kerala floods via {}", source), source))
            .collect();

        let result = fallback_analysis("Floods in Kerala. Shocking scenes.", &articles);

        // 40 + min(30, 30) - 10 = 60
        assert_eq!(result.overall_score.value(), 60);
        assert_eq!(result.overall_status, VerificationStatus::Disputed);
        assert_eq!(result.source_analyses.len(), 5);
        assert_eq!(result.source_analyses[0].baseline_credibility.value(), 93);
        assert_eq!(result.source_analyses[2].reputation, "News outlet");
        assert_eq!(result.sub_claims[0].claim_text, "Floods in Kerala");
        assert_eq!(
            result.sub_claims[0].evidence,
            "Covered by Reuters, NDTV, Blog A, Blog B, PTI"
        );
        assert_eq!(result.red_flags[0].rule(), Some(RedFlagRule::SensationalLanguage));
        assert!(result.reasoning.contains("Found 5 sources"));
    }
}
