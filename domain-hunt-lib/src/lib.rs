//! # Domain Hunt Library
//!
//! Search-orchestration engine for discovering an available short domain
//! name across a configurable set of TLD extensions and registrar
//! availability providers.
//!
//! Given a manually typed candidate or an auto-generated stream of random
//! candidates, the engine queries every usable provider for every selected
//! extension, aggregates results, and stops at the first available match —
//! while the caller can pause, resume, or cancel mid-run.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use domain_hunt_lib::{
//!     default_checker, ExtensionSet, ProviderRegistry, SearchOrchestrator,
//!     SearchRequest, ThreadRandom,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let extensions = ExtensionSet::with_defaults();
//!     let mut registry = ProviderRegistry::with_defaults();
//!     registry.apply_env_overrides();
//!
//!     let orchestrator = SearchOrchestrator::new(default_checker()?);
//!     orchestrator.start(
//!         &SearchRequest::lowercase(3, 100),
//!         &extensions,
//!         &registry,
//!         &mut ThreadRandom,
//!     )?;
//!     let reason = orchestrator.run().await?;
//!
//!     println!("search stopped: {}", reason);
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Candidate generation**: distinct random base names with a capacity
//!   guard and injectable randomness
//! - **Provider fan-out**: concurrent probes per candidate across every
//!   (extension, provider) pair, failures captured per result
//! - **State machine**: pause/resume/cancel with exact continuation
//! - **Observer events**: state transitions and result batches over channels

// Re-export main public API types and functions
pub use checker::{AvailabilityChecker, ProviderProbe};
pub use error::DomainHuntError;
pub use extensions::{ExtensionSet, DEFAULT_EXTENSIONS};
pub use generate::{generate_candidates, generation_capacity, RandomSource, SeededRandom, ThreadRandom};
pub use orchestrator::SearchOrchestrator;
pub use probes::{default_checker, GoDaddyProbe, NamecheapProbe, WhoisXmlProbe};
pub use registry::{Provider, ProviderRegistry};
pub use store::{
    load_extensions, load_providers, save_extensions, save_providers, ConfigStore, FileStore,
    EXTENSIONS_KEY, PROVIDERS_KEY,
};
pub use types::{
    CheckResult, ProbeOutcome, SearchEvent, SearchRequest, SearchState, SearchSummary, StopReason,
};
pub use utils::{join_domain, validate_candidate};

// Public modules
pub mod checker;
pub mod extensions;
pub mod generate;
pub mod orchestrator;
pub mod probes;
pub mod registry;
pub mod store;
pub mod types;

// Internal modules
mod error;
mod utils;

// Type alias for convenience
pub type Result<T> = std::result::Result<T, DomainHuntError>;

// Library version metadata
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
