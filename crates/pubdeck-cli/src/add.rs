//! Implementation of the `pubdeck add` command.

use anyhow::{Context, Result};
use pubdeck_core::{sort_manifest, validate_package_name, Project, PubCommand, Pubspec};

use crate::config::PubdeckConfig;
use crate::exec;

/// Options for adding dependencies.
#[derive(Debug)]
pub struct AddOptions {
    /// Package names, optionally with a version suffix the tool
    /// understands (`http:^1.0.0`).
    pub packages: Vec<String>,

    /// Add to `dev_dependencies` instead of `dependencies`.
    pub dev: bool,
}

/// Add dependencies through the tool, then sort the manifest.
pub fn add_dependencies(
    project: &Project,
    config: &PubdeckConfig,
    options: AddOptions,
) -> Result<()> {
    for spec in &options.packages {
        validate_package_name(bare_name(spec))?;
    }

    // surfaces a malformed manifest before the tool touches anything
    Pubspec::from_path(&project.manifest_path)?;

    let command = PubCommand::Add {
        packages: options.packages.clone(),
        dev: options.dev,
    };
    exec::run_pub(project, config, &command).context("Failed to add dependencies")?;

    // the tool rewrote the manifest; sorting happens after its success
    sort_manifest(project).context("Failed to sort manifest after add")?;

    let section = if options.dev {
        "dev_dependencies"
    } else {
        "dependencies"
    };
    println!(
        "Successfully added to {section}: {}",
        options.packages.join(", ")
    );
    Ok(())
}

/// Strip a version suffix like `http:^1.0.0` or `http@1.0.0` before
/// validating the name.
fn bare_name(spec: &str) -> &str {
    spec.split([':', '@']).next().unwrap_or(spec)
}
