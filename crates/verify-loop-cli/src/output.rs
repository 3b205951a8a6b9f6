use colored::Colorize;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;
use verify_loop_config::{LoadedConfig, RawValue, VerifyLoopConfig};

/// JSON shape printed by `show --json`
#[derive(Debug, Serialize)]
pub struct ConfigReport<'a> {
    pub path: &'a Path,
    pub config: &'a VerifyLoopConfig,
    pub total_weight: u64,
    pub active_weight: u64,
    pub unrecognized: BTreeMap<&'a str, &'a RawValue>,
}

impl<'a> ConfigReport<'a> {
    pub fn new(loaded: &'a LoadedConfig) -> Self {
        let unrecognized = loaded
            .unrecognized_keys()
            .filter_map(|key| loaded.raw.get(key).map(|value| (key, value)))
            .collect();

        Self {
            path: &loaded.path,
            config: &loaded.config,
            total_weight: loaded.config.total_weight(),
            active_weight: loaded.config.active_weight(),
            unrecognized,
        }
    }
}

pub fn print_summary(loaded: &LoadedConfig) {
    let config = &loaded.config;
    let active = config.checks().filter(|spec| !spec.is_skipped()).count();

    println!(
        "{} {} is valid",
        "✓".bright_green(),
        loaded.path.display().to_string().bright_white()
    );
    println!(
        "  language: {}, checks: {}/{} active, weight: {}, threshold: {}%",
        config.language.as_deref().unwrap_or("unset"),
        active,
        config.checks().count(),
        config.total_weight(),
        config.threshold
    );
}

pub fn print_config(loaded: &LoadedConfig) {
    let config = &loaded.config;

    println!("{}", "─".repeat(60).dimmed());
    println!(
        "{}: {}",
        "Config".cyan(),
        loaded.path.display().to_string().yellow()
    );
    match &config.language {
        Some(language) => println!("{}: {}", "Language".cyan(), language.yellow()),
        None => println!("{}: {}", "Language".cyan(), "unset".dimmed()),
    }
    println!(
        "{}: {}",
        "Threshold".cyan(),
        format!("{}%", config.threshold).yellow()
    );
    println!("{}", "─".repeat(60).dimmed());

    for spec in config.checks() {
        let name = format!("{:<8}", spec.check.name());
        if spec.is_skipped() {
            println!(
                "  {} {} {:>3}  {}",
                "•".bright_black(),
                name.dimmed(),
                spec.weight,
                "skipped".dimmed()
            );
        } else {
            println!(
                "  {} {} {:>3}  {}",
                "→".bright_blue(),
                name.bright_white(),
                spec.weight,
                spec.command
            );
        }
    }

    println!("{}", "─".repeat(60).dimmed());
    println!(
        "{}: {} ({} active)",
        "Total weight".cyan(),
        config.total_weight(),
        config.active_weight()
    );

    let protected = config.custom_protected_files.patterns();
    if !protected.is_empty() {
        println!("{}: {}", "Protected files".cyan(), protected.join(", "));
    }

    let unrecognized: Vec<&str> = loaded.unrecognized_keys().collect();
    if !unrecognized.is_empty() {
        println!(
            "{}: {}",
            "Unrecognized keys".cyan(),
            unrecognized.join(", ").dimmed()
        );
    }
}
