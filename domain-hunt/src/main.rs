//! Domain Hunt CLI Application
//!
//! A command-line interface for hunting down an available short domain name.
//! This CLI application provides a user-friendly interface to the
//! domain-hunt-lib library: manual candidate checks, automatic random
//! search runs, and TLD/provider configuration management.

mod ui;

use clap::builder::styling::{AnsiColor, Effects, Styles};
use clap::Parser;
use domain_hunt_lib::{
    default_checker, generate_candidates, load_extensions, load_providers, save_extensions,
    ExtensionSet, FileStore, ProviderRegistry, RandomSource, SearchEvent, SearchOrchestrator,
    SearchRequest, SearchState, SeededRandom, ThreadRandom,
};
use std::process;
use tracing_subscriber::EnvFilter;

const STYLES: Styles = Styles::styled()
    .header(AnsiColor::Yellow.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Yellow.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

const DEFAULT_ALPHABET: &str = "abcdefghijklmnopqrstuvwxyz";

/// CLI arguments for domain-hunt
#[derive(Parser, Debug)]
#[command(name = "domain-hunt")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Hunt down an available short domain name across registrar APIs")]
#[command(
    long_about = "Hunt down an available short domain name across registrar availability APIs.\n\nChecks manually typed candidates or streams randomly generated ones, fanning every candidate out over the selected TLDs and all usable providers, and stops at the first available match."
)]
#[command(styles = STYLES)]
pub struct Args {
    /// Candidate base names to check (no TLD, e.g. "abc")
    #[arg(value_name = "CANDIDATES", help_heading = "Search")]
    pub candidates: Vec<String>,

    /// Run an automatic search over randomly generated candidates
    #[arg(short = 'a', long = "auto", help_heading = "Search")]
    pub auto: bool,

    /// Length of generated candidates
    #[arg(
        short = 'l',
        long = "length",
        value_name = "N",
        default_value = "3",
        help_heading = "Search"
    )]
    pub length: usize,

    /// How many candidates to generate and try
    #[arg(
        short = 'n',
        long = "count",
        value_name = "N",
        default_value = "100",
        help_heading = "Search"
    )]
    pub count: usize,

    /// Alphabet to draw candidate characters from
    #[arg(
        long = "alphabet",
        value_name = "CHARS",
        default_value = DEFAULT_ALPHABET,
        help_heading = "Search"
    )]
    pub alphabet: String,

    /// Seed for deterministic candidate generation
    #[arg(long = "seed", value_name = "SEED", help_heading = "Search")]
    pub seed: Option<u64>,

    /// Preview generated candidates without checking availability
    #[arg(long = "dry-run", help_heading = "Search")]
    pub dry_run: bool,

    /// TLDs to check (comma-separated or multiple -t flags)
    #[arg(short = 't', long = "tld", value_name = "TLD", value_delimiter = ',', action = clap::ArgAction::Append, help_heading = "TLD Selection")]
    pub tlds: Option<Vec<String>>,

    /// Check against every configured TLD
    #[arg(long = "all", help_heading = "TLD Selection")]
    pub all_tlds: bool,

    /// Add TLDs to the configured list and exit
    #[arg(
        long = "add-tld",
        value_name = "TLD",
        value_delimiter = ',',
        help_heading = "Configuration"
    )]
    pub add_tlds: Option<Vec<String>>,

    /// List configured TLDs and exit
    #[arg(long = "list-tlds", help_heading = "Configuration")]
    pub list_tlds: bool,

    /// List providers and their credential status, then exit
    #[arg(long = "list-providers", help_heading = "Configuration")]
    pub list_providers: bool,

    /// Use a specific config directory instead of automatic discovery
    #[arg(long = "config-dir", value_name = "DIR", help_heading = "Configuration")]
    pub config_dir: Option<String>,

    /// Output results in JSON format
    #[arg(short = 'j', long = "json", help_heading = "Output Format")]
    pub json: bool,

    /// Verbose logging to stderr
    #[arg(short = 'v', long = "verbose", help_heading = "Output Format")]
    pub verbose: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    init_tracing(args.verbose);

    // Validate arguments
    if let Err(e) = validate_args(&args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }

    if let Err(e) = run(args).await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Set up the tracing subscriber writing to stderr.
///
/// `--verbose` forces debug-level output for our crates; otherwise
/// `RUST_LOG` decides, defaulting to warnings only.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("domain_hunt=debug,domain_hunt_lib=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Validate command line arguments
fn validate_args(args: &Args) -> Result<(), String> {
    // Configuration commands are self-contained
    if args.list_tlds || args.list_providers || args.add_tlds.is_some() {
        return Ok(());
    }

    // Must have either candidates or --auto
    if args.candidates.is_empty() && !args.auto {
        return Err(
            "You must specify candidate names, or --auto for a generated search".to_string(),
        );
    }

    // Manual candidates and automatic generation are separate modes
    if !args.candidates.is_empty() && args.auto {
        return Err("Cannot combine candidate names with --auto".to_string());
    }

    if args.dry_run && !args.auto {
        return Err("--dry-run only applies to --auto searches".to_string());
    }

    // Can't have conflicting TLD selections
    if args.tlds.is_some() && args.all_tlds {
        return Err("Cannot specify both -t/--tld and --all".to_string());
    }

    if args.auto {
        if args.length == 0 {
            return Err("--length must be at least 1".to_string());
        }
        if args.count == 0 {
            return Err("--count must be at least 1".to_string());
        }
        if args.alphabet.is_empty() {
            return Err("--alphabet must not be empty".to_string());
        }
    }

    Ok(())
}

/// Open the config store, honoring --config-dir.
fn open_store(args: &Args) -> Result<FileStore, Box<dyn std::error::Error>> {
    match &args.config_dir {
        Some(dir) => Ok(FileStore::new(dir)),
        None => Ok(FileStore::discover()?),
    }
}

/// Load the persisted extension set, falling back to the defaults.
fn load_extension_config(store: &FileStore) -> Result<ExtensionSet, Box<dyn std::error::Error>> {
    Ok(load_extensions(store)?.unwrap_or_else(ExtensionSet::with_defaults))
}

/// Load the persisted provider registry, falling back to the defaults,
/// and apply DOMAIN_HUNT_* environment overrides on top.
fn load_provider_config(store: &FileStore) -> Result<ProviderRegistry, Box<dyn std::error::Error>> {
    let mut registry = load_providers(store)?.unwrap_or_else(ProviderRegistry::with_defaults);
    registry.apply_env_overrides();
    Ok(registry)
}

/// Main CLI logic
async fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let store = open_store(&args)?;

    // Configuration commands first: they read, maybe write, and exit
    if let Some(new_tlds) = &args.add_tlds {
        let mut extensions = load_extension_config(&store)?;
        for tld in new_tlds {
            extensions.add(tld)?;
            println!("Added {}", tld);
        }
        save_extensions(&store, &extensions)?;
        return Ok(());
    }

    if args.list_tlds {
        let extensions = load_extension_config(&store)?;
        if args.json {
            println!("{}", serde_json::to_string_pretty(&extensions)?);
        } else {
            ui::print_tlds(&extensions);
        }
        return Ok(());
    }

    if args.list_providers {
        let registry = load_provider_config(&store)?;
        if args.json {
            println!("{}", serde_json::to_string_pretty(&registry)?);
        } else {
            ui::print_providers(registry.list());
        }
        return Ok(());
    }

    // Search modes
    let mut extensions = load_extension_config(&store)?;
    apply_tld_selection(&mut extensions, &args)?;

    if extensions.selected().is_empty() {
        return Err("No TLDs selected. Use -t/--tld or --all, or select some with the config".into());
    }

    // Dry-run needs no providers and no network
    if args.dry_run {
        return run_dry_run(&args);
    }

    let registry = load_provider_config(&store)?;
    if registry.list_usable().is_empty() {
        return Err(
            "No usable providers: enable one and supply its credentials \
             (see --list-providers)"
                .into(),
        );
    }

    let orchestrator = SearchOrchestrator::new(default_checker()?);

    if args.auto {
        run_auto_search(&orchestrator, &extensions, &registry, &args).await
    } else {
        run_manual_check(&orchestrator, &extensions, &registry, &args).await
    }
}

/// Apply -t/--tld and --all to the loaded extension set.
///
/// An explicit -t list replaces the persisted selection for this run;
/// TLDs not yet configured are added in memory (not persisted).
fn apply_tld_selection(
    extensions: &mut ExtensionSet,
    args: &Args,
) -> Result<(), Box<dyn std::error::Error>> {
    if args.all_tlds {
        extensions.select_all();
        return Ok(());
    }

    if let Some(tlds) = &args.tlds {
        extensions.select_none();
        for tld in tlds {
            let normalized = if tld.starts_with('.') {
                tld.clone()
            } else {
                format!(".{}", tld)
            };
            if !extensions.configured().contains(&normalized) {
                extensions.add(&normalized)?;
            }
            extensions.select(&normalized)?;
        }
    }

    Ok(())
}

/// Print the candidates an --auto run would try, without checking any.
fn run_dry_run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let alphabet: Vec<char> = args.alphabet.chars().collect();
    let mut random = make_random(args.seed);
    let candidates = generate_candidates(args.length, args.count, &alphabet, random.as_mut())?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&candidates)?);
    } else {
        for candidate in &candidates {
            println!("{}", candidate);
        }
    }
    eprintln!("{} candidates would be checked", candidates.len());
    Ok(())
}

fn make_random(seed: Option<u64>) -> Box<dyn RandomSource> {
    match seed {
        Some(seed) => Box::new(SeededRandom::new(seed)),
        None => Box::new(ThreadRandom),
    }
}

/// Check manually typed candidates, one at a time.
async fn run_manual_check(
    orchestrator: &SearchOrchestrator,
    extensions: &ExtensionSet,
    registry: &ProviderRegistry,
    args: &Args,
) -> Result<(), Box<dyn std::error::Error>> {
    let start_time = std::time::Instant::now();

    for candidate in &args.candidates {
        let results = orchestrator
            .search_once(candidate, extensions, registry)
            .await?;
        if !args.json {
            for result in &results {
                ui::print_result(result);
            }
        }
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&orchestrator.results())?);
    } else {
        let summary = orchestrator.summary();
        println!();
        println!(
            "{} available, {} unavailable in {:.1}s",
            summary.available,
            summary.unavailable,
            start_time.elapsed().as_secs_f64(),
        );
    }

    Ok(())
}

/// Run an automatic search, streaming results as they arrive.
async fn run_auto_search(
    orchestrator: &SearchOrchestrator,
    extensions: &ExtensionSet,
    registry: &ProviderRegistry,
    args: &Args,
) -> Result<(), Box<dyn std::error::Error>> {
    let alphabet: Vec<char> = args.alphabet.chars().collect();
    let request = SearchRequest {
        length: args.length,
        count: args.count,
        alphabet,
    };

    let mut events = orchestrator.subscribe();
    let mut random = make_random(args.seed);
    orchestrator.start(&request, extensions, registry, random.as_mut())?;

    let total = args.count;
    let streaming = !args.json;

    // Print events as they arrive; the run itself drives the checks
    let printer = tokio::spawn(async move {
        let mut current = 0usize;
        while let Some(event) = events.recv().await {
            match event {
                SearchEvent::CandidateStarted(candidate) => {
                    current += 1;
                    if streaming {
                        ui::print_candidate(&candidate, current, total);
                    }
                }
                SearchEvent::ResultsAppended(batch) => {
                    if streaming {
                        for result in &batch {
                            ui::print_result(result);
                        }
                    }
                }
                SearchEvent::StateChanged(SearchState::Stopped { .. }) => break,
                SearchEvent::StateChanged(_) => {}
            }
        }
    });

    let start_time = std::time::Instant::now();
    let reason = orchestrator.run().await?;
    let _ = printer.await;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&orchestrator.results())?);
        eprintln!("search stopped: {}", reason);
    } else {
        ui::print_summary(&orchestrator.summary(), reason, start_time.elapsed());
    }

    Ok(())
}

// domain-hunt/src/main.rs tests module

#[cfg(test)]
mod tests {
    use super::*;

    // Helper function with all required fields
    fn create_test_args() -> Args {
        Args {
            candidates: vec![],
            auto: false,
            length: 3,
            count: 100,
            alphabet: DEFAULT_ALPHABET.to_string(),
            seed: None,
            dry_run: false,
            tlds: None,
            all_tlds: false,
            add_tlds: None,
            list_tlds: false,
            list_providers: false,
            config_dir: None,
            json: false,
            verbose: false,
        }
    }

    #[test]
    fn test_validate_args_requires_candidates_or_auto() {
        let args = create_test_args();
        let result = validate_args(&args);
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("--auto"));
    }

    #[test]
    fn test_validate_args_candidates_and_auto_conflict() {
        let mut args = create_test_args();
        args.candidates = vec!["abc".to_string()];
        args.auto = true;
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_dry_run_needs_auto() {
        let mut args = create_test_args();
        args.candidates = vec!["abc".to_string()];
        args.dry_run = true;
        let result = validate_args(&args);
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("--dry-run"));
    }

    #[test]
    fn test_validate_args_tld_and_all_conflict() {
        let mut args = create_test_args();
        args.candidates = vec!["abc".to_string()];
        args.tlds = Some(vec![".com".to_string()]);
        args.all_tlds = true;
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_auto_rejects_zero_count() {
        let mut args = create_test_args();
        args.auto = true;
        args.count = 0;
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_config_commands_are_self_contained() {
        let mut args = create_test_args();
        args.list_providers = true;
        assert!(validate_args(&args).is_ok());

        let mut args = create_test_args();
        args.add_tlds = Some(vec![".dev".to_string()]);
        assert!(validate_args(&args).is_ok());
    }

    #[test]
    fn test_apply_tld_selection_replaces_persisted_selection() {
        let mut extensions = ExtensionSet::with_defaults();
        let mut args = create_test_args();
        args.tlds = Some(vec!["com".to_string(), ".dev".to_string()]);

        apply_tld_selection(&mut extensions, &args).unwrap();

        let selected = extensions.selected();
        assert_eq!(selected, vec![".com".to_string(), ".dev".to_string()]);
        // .dev was added in memory for this run
        assert!(extensions.configured().contains(&".dev".to_string()));
    }

    #[test]
    fn test_apply_tld_selection_all() {
        let mut extensions = ExtensionSet::with_defaults();
        extensions.deselect(".com").unwrap();
        let mut args = create_test_args();
        args.all_tlds = true;

        apply_tld_selection(&mut extensions, &args).unwrap();
        assert_eq!(extensions.selected().len(), extensions.configured().len());
    }
}
