//! Command-line interface for kilomoco.
//!
//! This module handles CLI argument parsing and the non-interactive paths
//! (`--list`, `--profile`); with no flags the caller continues into the
//! interactive TUI.

use clap::Parser;
use kilomoco_config::{Profile, resolve_profiles};
use std::path::Path;

/// kilomoco - manage Kilo Code VS Code extension mode configurations
#[derive(Parser)]
#[command(name = "kilomoco")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// List available profiles
    #[arg(long)]
    pub list: bool,

    /// Id of the profile to apply and launch VS Code with
    #[arg(long, value_name = "ID")]
    pub profile: Option<String>,

    /// Path to the workspace to open (optional)
    #[arg(long, value_name = "PATH")]
    pub workspace: Option<String>,
}

/// Result of CLI processing
pub enum CliResult {
    /// Continue into the interactive TUI
    Continue,
    /// Exit with the given code (non-interactive path completed)
    Exit(i32),
}

/// Process CLI arguments and handle the non-interactive paths
pub fn process_cli() -> CliResult {
    run(Cli::parse())
}

/// Dispatch parsed arguments (separated from `process_cli` for testing)
pub fn run(cli: Cli) -> CliResult {
    if cli.list {
        list_profiles();
        return CliResult::Exit(0);
    }

    if let Some(profile_id) = &cli.profile {
        let workspace = cli.workspace.as_deref().map(Path::new);
        return match crate::launcher::prepare_and_launch(profile_id, workspace) {
            Ok(exit_code) => CliResult::Exit(exit_code),
            Err(e) => {
                eprintln!("Error: {e}");
                CliResult::Exit(1)
            }
        };
    }

    CliResult::Continue
}

fn list_profiles() {
    let registry = resolve_profiles();
    let mut profiles: Vec<&Profile> = registry.iter().collect();
    profiles.sort_by(|a, b| a.id.cmp(&b.id));

    for profile in profiles {
        println!("{}: {} - {}", profile.id, profile.name, profile.description);
    }
}
