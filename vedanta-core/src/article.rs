//! News articles used as evidence for or against a claim
//!
//! Articles come from an external retrieval collaborator (NewsAPI,
//! NewsData.io, RSS, ...) and are read-only input to scoring.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Outlet that published an article
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleSource {
    #[serde(default)]
    pub name: String,
}

/// A retrieved news item
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub source: ArticleSource,
    /// Raw publication timestamp as reported by the provider
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

impl Article {
    pub fn new(title: &str, source_name: &str) -> Self {
        Self {
            title: title.to_string(),
            source: ArticleSource {
                name: source_name.to_string(),
            },
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn with_published_at(mut self, published_at: &str) -> Self {
        self.published_at = Some(published_at.to_string());
        self
    }

    pub fn with_url(mut self, url: &str) -> Self {
        self.url = Some(url.to_string());
        self
    }

    /// Outlet name, `"Unknown"` when the provider left it blank
    pub fn source_name(&self) -> &str {
        if self.source.name.trim().is_empty() {
            "Unknown"
        } else {
            &self.source.name
        }
    }

    /// Lower-cased `title + " " + description`, the text keyword rules scan
    pub fn searchable_text(&self) -> String {
        format!(
            "{} {}",
            self.title,
            self.description.as_deref().unwrap_or_default()
        )
        .to_lowercase()
    }

    /// Publication time, accepting RFC 3339 (NewsAPI) and RFC 2822 (RSS)
    pub fn published_time(&self) -> Option<DateTime<Utc>> {
        let raw = self.published_at.as_deref()?.trim();
        DateTime::parse_from_rfc3339(raw)
            .or_else(|_| DateTime::parse_from_rfc2822(raw))
            .map(|t| t.with_timezone(&Utc))
            .ok()
    }
}

/// Options forwarded to an article retrieval collaborator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOptions {
    pub language: String,
    pub sort_by: String,
    pub page_size: usize,
    pub from: Option<String>,
    pub to: Option<String>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            language: "en".to_string(),
            sort_by: "publishedAt".to_string(),
            page_size: 20,
            from: None,
            to: None,
        }
    }
}

impl SearchOptions {
    /// Options used when searching evidence for a single claim
    pub fn for_claim() -> Self {
        Self {
            sort_by: "relevancy".to_string(),
            page_size: 10,
            ..Default::default()
        }
    }
}

/// Result of an article search
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    #[serde(default)]
    pub articles: Vec<Article>,
    #[serde(default)]
    pub total_results: usize,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ArticleDocument {
    List(Vec<Article>),
    Envelope(SearchResponse),
}

/// Parse a JSON article list or a NewsAPI-style `{ "articles": [...] }` envelope
pub fn parse_articles(json: &str) -> Result<Vec<Article>, serde_json::Error> {
    Ok(match serde_json::from_str::<ArticleDocument>(json)? {
        ArticleDocument::List(articles) => articles,
        ArticleDocument::Envelope(response) => response.articles,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_newsapi_envelope() {
        let json = r#"{
            "status": "ok",
            "totalResults": 1,
            "articles": [{
                "source": {"id": null, "name": "Reuters"},
                "title": "Floods hit Kerala",
                "description": "Heavy rain across districts",
                "url": "https://example.com/a",
                "publishedAt": "2024-08-01T10:00:00Z"
            }]
        }"#;

        let articles = parse_articles(json).unwrap();
        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].source_name(), "Reuters");
        assert!(articles[0].published_time().is_some());
    }

    #[test]
    fn test_parse_bare_list() {
        let json = r#"[{"title": "Cyclone alert", "source": {"name": "PTI"}}]"#;
        let articles = parse_articles(json).unwrap();
        assert_eq!(articles[0].title, "Cyclone alert");
        assert!(articles[0].description.is_none());
    }

    #[test]
    fn test_rss_timestamp() {
        let article = Article::new("t", "Google News")
            .with_published_at("Thu, 01 Aug 2024 10:00:00 GMT");
        assert!(article.published_time().is_some());
    }

    #[test]
    fn test_blank_source_name() {
        let article = Article::new("t", "  ");
        assert_eq!(article.source_name(), "Unknown");
        assert_eq!(Article::new("A B", "x").with_description("C").searchable_text(), "a b c");
    }
}
