//! CLI commands

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// verify-loop - quality gate configuration tool
#[derive(Parser, Debug)]
#[command(name = "verify-loop")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Log level filter (RUST_LOG takes precedence)
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate a config file
    Check {
        /// Path to the config file
        path: PathBuf,
    },

    /// Show the resolved configuration
    Show {
        /// Path to the config file
        path: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the resolved value of a single key
    Get {
        /// Path to the config file
        path: PathBuf,

        /// Key name (e.g. BUILD_WEIGHT)
        key: String,
    },

    /// Print the reference config for a language
    Template {
        /// Language tag (go, rust)
        #[arg(default_value = "go")]
        language: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_show_json() {
        let cli = Cli::parse_from(["verify-loop", "show", "hooks.config", "--json"]);
        assert_eq!(cli.log_level, "warn");
        match cli.command {
            Commands::Show { path, json } => {
                assert_eq!(path, PathBuf::from("hooks.config"));
                assert!(json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_template_defaults_to_go() {
        let cli = Cli::parse_from(["verify-loop", "--log-level", "debug", "template"]);
        assert_eq!(cli.log_level, "debug");
        assert!(matches!(cli.command, Commands::Template { ref language } if language == "go"));
    }
}
