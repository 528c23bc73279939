//! Display logic for the domain-hunt CLI.
//!
//! Colored result lines, run summaries, and the TLD/provider listings.
//! Uses only the `console` crate (already a dependency).

use console::{pad_str, style, Alignment};
use domain_hunt_lib::{CheckResult, Provider, SearchSummary, StopReason};
use std::time::Duration;

/// Format and print a single check result with colors and alignment.
pub fn print_result(result: &CheckResult) {
    let domain_width = 28;
    let padded_domain = pad_str(&result.domain, domain_width, Alignment::Left, Some(".."));
    let provider = style(format!("[{}]", result.provider)).dim();

    match result.available {
        Some(true) => {
            let price = result
                .price
                .map(|p| format!("  {}", style(format!("${:.2}", p)).dim()))
                .unwrap_or_default();
            println!(
                "  {}  {}  {}{}",
                style(&padded_domain).white(),
                style("AVAILABLE").green().bold(),
                provider,
                price,
            );
        }
        Some(false) => {
            println!(
                "  {}  {}  {}",
                style(&padded_domain).white(),
                style("TAKEN").red().bold(),
                provider,
            );
        }
        None => {
            let reason = result.error.as_deref().unwrap_or("unknown error");
            println!(
                "  {}  {}  {}  {}",
                style(&padded_domain).white(),
                style("ERROR").yellow(),
                provider,
                style(reason).dim(),
            );
        }
    }
}

/// Print the progress line for a candidate about to be checked.
pub fn print_candidate(candidate: &str, current: usize, total: usize) {
    println!(
        "{} {}",
        style(format!("[{}/{}]", current, total)).dim(),
        style(candidate).bold(),
    );
}

/// Print the end-of-run summary line.
pub fn print_summary(summary: &SearchSummary, reason: StopReason, duration: Duration) {
    let outcome = match reason {
        StopReason::FoundAvailable => style("found an available name").green().bold(),
        StopReason::Exhausted => style("exhausted all candidates").yellow(),
        StopReason::Cancelled => style("cancelled").yellow(),
        StopReason::CapacityExceeded => style("capacity exceeded").red(),
    };

    println!();
    println!(
        "{} {} — {} available, {} unavailable in {:.1}s",
        style("Search stopped:").bold(),
        outcome,
        style(summary.available).green(),
        style(summary.unavailable).red(),
        duration.as_secs_f64(),
    );
}

/// Print the configured TLD list with selection markers.
pub fn print_tlds(extensions: &domain_hunt_lib::ExtensionSet) {
    println!();
    println!("{}", style("Configured TLDs:").yellow().bold());
    println!();
    for extension in extensions.configured() {
        let marker = if extensions.is_selected(extension) {
            style("*").green().bold()
        } else {
            style(" ").dim()
        };
        println!("  {} {}", marker, extension);
    }
    println!();
    println!("(* = selected for searches)");
}

/// Print the provider registry with status and masked credentials.
pub fn print_providers(providers: &[Provider]) {
    println!();
    println!("{}", style("Providers:").yellow().bold());
    println!();
    for provider in providers {
        let status = if provider.is_usable() {
            style("ready").green().bold()
        } else if !provider.enabled {
            style("disabled").dim()
        } else {
            style("missing credentials").yellow()
        };

        let fields: Vec<String> = provider
            .required_fields
            .iter()
            .map(|field| {
                if provider
                    .credentials
                    .get(field)
                    .map(|v| !v.is_empty())
                    .unwrap_or(false)
                {
                    format!("{}=****", field)
                } else {
                    format!("{}=unset", field)
                }
            })
            .collect();

        println!(
            "  {} {}  {}",
            style(format!("{:<12}", provider.name)).bold(),
            status,
            style(fields.join(" ")).dim(),
        );
    }
    println!();
    println!("Credentials come from the providers config file or DOMAIN_HUNT_* env vars.");
}
