//! Prompt personas for remote analysis
//!
//! Loads persona definitions from TOML files so the fact-checking prompt
//! can be tuned without recompiling. The default persona is embedded.

use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;
use tracing::warn;

/// Id of the persona used for claim analysis
pub const FACT_CHECKER_PERSONA: &str = "fact_checker";

const EMBEDDED_PERSONAS: &[&str] = &[include_str!("../prompts/fact_checker.toml")];

#[derive(Debug, Error)]
pub enum PersonaError {
    #[error("Failed to read persona file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid persona definition: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Persona not found: {0}")]
    NotFound(String),
}

/// A persona definition loaded from TOML
#[derive(Debug, Clone, Deserialize)]
pub struct Persona {
    pub persona: PersonaMetadata,
    pub prompt: PromptConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PersonaMetadata {
    pub id: String,
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub enabled: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PromptConfig {
    pub system: String,
    /// User message with `{claim}`, `{date}`, `{article_count}` and `{sources}` placeholders
    pub user_template: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_format")]
    pub format: String,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
        }
    }
}

fn default_format() -> String {
    "json".to_string()
}

fn default_max_tokens() -> u32 {
    3000
}

fn default_temperature() -> f32 {
    0.3
}

impl Persona {
    pub fn from_toml(source: &str) -> Result<Self, PersonaError> {
        Ok(toml::from_str(source)?)
    }

    /// The embedded fact-checker persona
    pub fn fact_checker() -> Self {
        PersonaRegistry::load_embedded()
            .get(FACT_CHECKER_PERSONA)
            .cloned()
            .unwrap_or_else(|| Self {
                persona: PersonaMetadata {
                    id: FACT_CHECKER_PERSONA.to_string(),
                    name: "Fact-Checking Analyst".to_string(),
                    category: "analysis".to_string(),
                    enabled: true,
                },
                prompt: PromptConfig {
                    system: "You are an expert fact-checker. Respond only with JSON.".to_string(),
                    user_template: "Claim: \"{claim}\"\nDate: {date}\nSources ({article_count}):\n{sources}"
                        .to_string(),
                },
                output: OutputConfig::default(),
            })
    }

    /// Get the system prompt
    pub fn system_prompt(&self) -> &str {
        &self.prompt.system
    }

    /// Fill the user template
    pub fn render_user(&self, claim: &str, date: &str, article_count: usize, sources: &str) -> String {
        self.prompt
            .user_template
            .replace("{claim}", claim)
            .replace("{date}", date)
            .replace("{article_count}", &article_count.to_string())
            .replace("{sources}", sources)
    }
}

/// Registry of all loaded personas
#[derive(Debug, Default)]
pub struct PersonaRegistry {
    personas: HashMap<String, Persona>,
}

impl PersonaRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Load all embedded personas
    pub fn load_embedded() -> Self {
        let mut registry = Self::new();

        for toml_str in EMBEDDED_PERSONAS {
            match Persona::from_toml(toml_str) {
                Ok(persona) if persona.persona.enabled => registry.register(persona),
                Ok(_) => {}
                Err(e) => warn!("Skipping embedded persona: {}", e),
            }
        }

        registry
    }

    /// Load personas from a directory, on top of the embedded ones
    pub fn load_from_dir<P: AsRef<Path>>(dir: P) -> Result<Self, PersonaError> {
        let mut registry = Self::load_embedded();

        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();

            if path.extension().is_some_and(|ext| ext == "toml") {
                let content = std::fs::read_to_string(&path)?;
                match Persona::from_toml(&content) {
                    Ok(persona) if persona.persona.enabled => registry.register(persona),
                    Ok(_) => {}
                    Err(e) => warn!("Skipping persona {}: {}", path.display(), e),
                }
            }
        }

        Ok(registry)
    }

    /// Register a persona, replacing any with the same id
    pub fn register(&mut self, persona: Persona) {
        self.personas.insert(persona.persona.id.clone(), persona);
    }

    /// Get a persona by ID
    pub fn get(&self, id: &str) -> Option<&Persona> {
        self.personas.get(id)
    }

    /// Get a persona by ID or fail
    pub fn require(&self, id: &str) -> Result<&Persona, PersonaError> {
        self.get(id).ok_or_else(|| PersonaError::NotFound(id.to_string()))
    }

    /// Count of loaded personas
    pub fn len(&self) -> usize {
        self.personas.len()
    }

    /// Check if registry is empty
    pub fn is_empty(&self) -> bool {
        self.personas.is_empty()
    }
}
