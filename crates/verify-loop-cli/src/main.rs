//! verify-loop - quality gate configuration tool

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use colored::Colorize;
use std::path::Path;
use tracing::debug;
use verify_loop_config::{
    available_languages, keys, load_config_from_file, template_for, LoadedConfig,
};
use verify_loop_telemetry::{init_subscriber, TelemetryConfig};

mod commands;
mod output;

use commands::{Cli, Commands};
use output::ConfigReport;

fn main() {
    let cli = Cli::parse();

    init_subscriber(&TelemetryConfig {
        json_output: cli.json_logs,
        ..TelemetryConfig::with_level(cli.log_level.clone())
    });

    let result = match &cli.command {
        Commands::Check { path } => run_check(path),
        Commands::Show { path, json } => run_show(path, *json),
        Commands::Get { path, key } => run_get(path, key),
        Commands::Template { language } => run_template(language),
    };

    if let Err(e) = result {
        eprintln!("{}: {:#}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn load(path: &Path) -> Result<LoadedConfig> {
    debug!(path = %path.display(), "Loading config");
    load_config_from_file(path).with_context(|| format!("Invalid config {}", path.display()))
}

fn run_check(path: &Path) -> Result<()> {
    let loaded = load(path)?;
    output::print_summary(&loaded);
    Ok(())
}

fn run_show(path: &Path, json: bool) -> Result<()> {
    let loaded = load(path)?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&ConfigReport::new(&loaded))?
        );
    } else {
        output::print_config(&loaded);
    }

    Ok(())
}

fn run_get(path: &Path, key: &str) -> Result<()> {
    let loaded = load(path)?;

    let value = if keys::is_recognized(key) {
        loaded
            .config
            .value_of(key)
            .ok_or_else(|| anyhow!("{} is not set", key))?
    } else {
        loaded
            .raw
            .get(key)
            .map(ToString::to_string)
            .ok_or_else(|| anyhow!("Unknown key: {}", key))?
    };

    println!("{}", value);
    Ok(())
}

fn run_template(language: &str) -> Result<()> {
    let Some(template) = template_for(language) else {
        let available: Vec<&str> = available_languages().collect();
        bail!(
            "No template for language '{}' (available: {})",
            language,
            available.join(", ")
        );
    };

    print!("{}", template);
    Ok(())
}
