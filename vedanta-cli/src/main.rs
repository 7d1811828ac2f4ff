//! Vedanta CLI
//!
//! Claim credibility scoring for news misinformation verification.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{warn, Level};
use tracing_subscriber::FmtSubscriber;

use vedanta_agents::{
    create_anthropic_backend, create_backend, AnalyzerConfig, AnthropicConfig,
    CredibilityEngine, OpenAIBackendConfig, OutputConfig, Persona, PersonaRegistry, RateLimiter,
    RemoteAnalyzer, SharedBackend, FACT_CHECKER_PERSONA,
};
use vedanta_core::{
    build_search_query, detect_red_flags, extract_keywords, extract_main_claim, parse_articles,
    time_ago, triage, verify_search, Article, RELEVANCE_KEYWORDS,
};

#[derive(Parser)]
#[command(name = "vedanta")]
#[command(author, version, about = "Vedanta: claim credibility scoring", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbosity level (0-3)
    #[arg(short, long, default_value = "1")]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Score a claim against evidence articles
    Verify {
        /// The claim to verify
        #[arg(short, long)]
        claim: String,

        /// JSON file of evidence articles
        #[arg(short, long)]
        articles: Option<PathBuf>,

        /// LLM model to use (default depends on the provider)
        #[arg(short, long)]
        model: Option<String>,

        /// OpenRouter API key (or set OPENROUTER_API_KEY env var)
        #[arg(long, env = "OPENROUTER_API_KEY")]
        openrouter_key: Option<String>,

        /// OpenAI API key (or set OPENAI_API_KEY env var)
        #[arg(long, env = "OPENAI_API_KEY")]
        api_key: Option<String>,

        /// Anthropic API key (or set ANTHROPIC_API_KEY env var)
        #[arg(long, env = "ANTHROPIC_API_KEY")]
        anthropic_key: Option<String>,

        /// Use OpenAI instead of OpenRouter
        #[arg(long)]
        openai: bool,

        /// Use Anthropic instead of OpenRouter
        #[arg(long)]
        anthropic: bool,

        /// Use a local OpenAI-compatible server (e.g. http://localhost:11434/v1)
        #[arg(long)]
        local_url: Option<String>,

        /// Skip remote analysis and score heuristically
        #[arg(long)]
        offline: bool,

        /// Directory of persona TOML files overriding the embedded prompt
        #[arg(long)]
        prompts: Option<PathBuf>,

        /// Remote analyses allowed per hour
        #[arg(long, default_value = "100")]
        rate_limit: usize,

        /// Remote analysis timeout in seconds
        #[arg(long, default_value = "30")]
        timeout: u64,

        /// Output file for the JSON result
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Keyword-search credibility report for a claim
    SearchScore {
        /// The claim to score
        #[arg(short, long)]
        claim: String,

        /// JSON file of search results
        #[arg(short, long)]
        articles: PathBuf,

        /// Output file for the JSON report
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Rank crisis feed articles by urgency
    Triage {
        /// JSON file of feed articles
        #[arg(short, long)]
        articles: PathBuf,

        /// Number of items to keep
        #[arg(long, default_value = "6")]
        top: usize,
    },

    /// Show red flags and keywords for a claim
    Flags {
        /// The claim to inspect
        #[arg(short, long)]
        claim: String,
    },
}

/// Remote analysis options for the verify command
struct RemoteOptions {
    model: Option<String>,
    openrouter_key: Option<String>,
    api_key: Option<String>,
    anthropic_key: Option<String>,
    use_openai: bool,
    use_anthropic: bool,
    local_url: Option<String>,
    prompts: Option<PathBuf>,
    rate_limit: usize,
    timeout: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    let log_level = match cli.verbose {
        0 => Level::ERROR,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_thread_ids(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    match cli.command {
        Commands::Verify {
            claim,
            articles,
            model,
            openrouter_key,
            api_key,
            anthropic_key,
            openai,
            anthropic,
            local_url,
            offline,
            prompts,
            rate_limit,
            timeout,
            output,
        } => {
            let remote = (!offline).then_some(RemoteOptions {
                model,
                openrouter_key,
                api_key,
                anthropic_key,
                use_openai: openai,
                use_anthropic: anthropic,
                local_url,
                prompts,
                rate_limit,
                timeout,
            });
            run_verify(&claim, articles.as_deref(), remote, output.as_deref()).await?;
        }
        Commands::SearchScore {
            claim,
            articles,
            output,
        } => {
            let articles = read_articles(&articles)?;
            let report = verify_search(&claim, &articles, Utc::now());
            write_json(&report, output.as_deref())?;
        }
        Commands::Triage { articles, top } => {
            run_triage(&read_articles(&articles)?, top);
        }
        Commands::Flags { claim } => {
            show_flags(&claim)?;
        }
    }

    Ok(())
}

async fn run_verify(
    claim: &str,
    articles: Option<&Path>,
    remote: Option<RemoteOptions>,
    output: Option<&Path>,
) -> Result<()> {
    let articles = match articles {
        Some(path) => read_articles(path)?,
        None => Vec::new(),
    };

    let mut engine = CredibilityEngine::offline();
    if let Some(options) = remote {
        match build_analyzer(options)? {
            Some(analyzer) => {
                eprintln!("📡 Remote model: {}", analyzer.model_name());
                engine = engine.with_remote(analyzer);
            }
            None => warn!("No API key for the selected provider, scoring heuristically"),
        }
    }

    let result = engine.analyze(claim, &articles).await?;
    write_json(&result, output)
}

/// Backend selection: local, then Anthropic, then OpenAI, OpenRouter by default
fn build_backend(options: &RemoteOptions, output: &OutputConfig) -> Result<Option<SharedBackend>> {
    let max_tokens = u16::try_from(output.max_tokens).unwrap_or(u16::MAX);
    let openai_compatible = |config: OpenAIBackendConfig| {
        create_backend(config.with_sampling(output.temperature, max_tokens))
    };

    let backend = if let Some(url) = &options.local_url {
        let model = options.model.as_deref().unwrap_or("llama3.1");
        Some(openai_compatible(OpenAIBackendConfig::local(url, model))?)
    } else if options.use_anthropic {
        let model = options.model.as_deref().unwrap_or("claude-sonnet-4-20250514");
        match &options.anthropic_key {
            Some(key) => {
                let mut config = AnthropicConfig::new(key, model);
                config.max_tokens = output.max_tokens;
                config.temperature = output.temperature;
                Some(create_anthropic_backend(config)?)
            }
            None => None,
        }
    } else if options.use_openai {
        let model = options.model.as_deref().unwrap_or("gpt-4o-mini");
        match &options.api_key {
            Some(key) => Some(openai_compatible(OpenAIBackendConfig::openai(key, model))?),
            None => None,
        }
    } else {
        let model = options.model.as_deref().unwrap_or("openai/gpt-4o-mini");
        match &options.openrouter_key {
            Some(key) => Some(openai_compatible(OpenAIBackendConfig::openrouter(key, model))?),
            None => None,
        }
    };

    Ok(backend)
}

fn load_persona(prompts: Option<&Path>) -> Result<Persona> {
    match prompts {
        Some(dir) => {
            let registry = PersonaRegistry::load_from_dir(dir)
                .with_context(|| format!("loading personas from {}", dir.display()))?;
            Ok(registry.require(FACT_CHECKER_PERSONA)?.clone())
        }
        None => Ok(Persona::fact_checker()),
    }
}

fn build_analyzer(options: RemoteOptions) -> Result<Option<RemoteAnalyzer>> {
    let persona = load_persona(options.prompts.as_deref())?;
    let Some(backend) = build_backend(&options, &persona.output)? else {
        return Ok(None);
    };

    let limiter = Arc::new(RateLimiter::hourly(options.rate_limit));
    let config = AnalyzerConfig {
        timeout: Duration::from_secs(options.timeout),
        ..AnalyzerConfig::default()
    };

    Ok(Some(
        RemoteAnalyzer::new(backend, persona, limiter).with_config(config),
    ))
}

fn read_articles(path: &Path) -> Result<Vec<Article>> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("reading articles from {}", path.display()))?;
    parse_articles(&json).with_context(|| format!("parsing articles in {}", path.display()))
}

fn write_json<T: Serialize>(value: &T, output: Option<&Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;

    match output {
        Some(path) => {
            fs::write(path, &json)?;
            eprintln!("📄 Result saved to: {}", path.display());
        }
        None => println!("{}", json),
    }

    Ok(())
}

fn run_triage(articles: &[Article], top: usize) {
    let now = Utc::now();
    let items = triage(articles, now, top);

    if items.is_empty() {
        println!("No crisis items found.");
        return;
    }

    for item in &items {
        let marker = if item.is_breaking() { "🚨" } else { "  " };
        let age = item
            .article
            .published_time()
            .map(|published| time_ago(published, now))
            .unwrap_or_else(|| "unknown".to_string());

        println!(
            "{} [{:>3}] {:?} | {} | {} ({:?}, {:?}) | {}",
            marker,
            item.urgency,
            item.category,
            item.location,
            item.article.source_name(),
            item.status,
            item.confidence,
            age
        );
        println!("        {}", item.article.title);
    }
}

fn show_flags(claim: &str) -> Result<()> {
    let report = serde_json::json!({
        "claim": claim,
        "mainClaim": extract_main_claim(claim),
        "searchQuery": build_search_query(claim),
        "keywords": extract_keywords(claim, RELEVANCE_KEYWORDS),
        "redFlags": detect_red_flags(claim),
    });

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
