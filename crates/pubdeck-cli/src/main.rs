//! pubdeck - a dependency-management panel for Dart/Flutter projects.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod add;
mod config;
mod exec;
mod install;
mod panel;
mod prune;
mod remove;
mod reveal;
mod script;
mod search;
mod upgrade;

use config::PubdeckConfig;
use pubdeck_core::Project;

#[derive(Parser)]
#[command(name = "pubdeck")]
#[command(version)]
#[command(about = "Dependency panel for Dart/Flutter projects", long_about = None)]
struct Cli {
    /// Project directory (defaults to searching upward from the current directory)
    #[arg(long, global = true)]
    project: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the panel tree: scripts, actions, and dependency sections
    Panel,

    /// Install all dependencies (pub get)
    Install,

    /// Add dependencies to pubspec.yaml
    Add {
        /// Package names, optionally with a version suffix the tool understands
        #[arg(required = true)]
        packages: Vec<String>,

        /// Add as development dependencies
        #[arg(long)]
        dev: bool,
    },

    /// Remove a dependency from pubspec.yaml
    Remove {
        /// Package name to remove
        package: String,
    },

    /// Upgrade a dependency to the latest compatible version
    Upgrade {
        /// Package name to upgrade
        package: String,
    },

    /// Sort dependencies and dev_dependencies alphabetically
    Sort,

    /// Remove dependencies no source file imports
    Prune {
        /// Report what would be removed without rewriting the manifest
        #[arg(long)]
        dry_run: bool,
    },

    /// Print the manifest location of a dependency
    Reveal {
        /// Package name to locate
        package: String,
    },

    /// Run a script command line in the project root
    Run {
        /// The command and its arguments
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        command: Vec<String>,
    },

    /// Search the package registry
    Search {
        /// Search query
        query: String,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        tracing::error!("command failed: {err:#}");
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = PubdeckConfig::load();

    match cli.command {
        // search has no project context
        Commands::Search { query } => search::search_packages(&query),
        command => {
            let project = Project::locate(cli.project.as_deref())?;
            run_in_project(&project, &config, command)
        }
    }
}

fn run_in_project(project: &Project, config: &PubdeckConfig, command: Commands) -> Result<()> {
    match command {
        Commands::Panel => panel::show(project, config),
        Commands::Install => install::install_all(project, config),
        Commands::Add { packages, dev } => {
            add::add_dependencies(project, config, add::AddOptions { packages, dev })
        }
        Commands::Remove { package } => remove::remove_dependency(project, config, &package),
        Commands::Upgrade { package } => upgrade::upgrade_dependency(project, config, &package),
        Commands::Sort => {
            if pubdeck_core::sort_manifest(project)? {
                println!("Sorted dependency sections in pubspec.yaml");
            } else {
                println!("Dependency sections already sorted");
            }
            Ok(())
        }
        Commands::Prune { dry_run } => prune::prune(project, config, dry_run),
        Commands::Reveal { package } => reveal::reveal(project, &package),
        Commands::Run { command } => script::run(project, &command.join(" ")),
        // handled before project resolution
        Commands::Search { .. } => Ok(()),
    }
}
