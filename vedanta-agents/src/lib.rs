//! Vedanta Agents
//!
//! Remote and local claim analysis:
//! - **Backend**: OpenAI-compatible and Anthropic language-model clients
//! - **Persona**: fact-checker prompt definitions loaded from TOML
//! - **Limiter**: sliding-window request budget with an injectable clock
//! - **Remote**: model-backed analysis that always falls back to heuristics
//! - **Evidence**: concurrent article gathering from news collaborators
//! - **Engine**: the verification entry point tying it all together
//!
//! ## Prompt Personas
//!
//! The fact-checker prompt is defined in `prompts/fact_checker.toml` and
//! embedded at build time. See [`persona::PersonaRegistry`] for overrides.

pub mod backend;
pub mod engine;
pub mod evidence;
pub mod limiter;
pub mod persona;
pub mod remote;
pub mod traits;

pub use backend::*;
pub use engine::*;
pub use evidence::*;
pub use limiter::*;
pub use persona::*;
pub use remote::*;
pub use traits::*;
