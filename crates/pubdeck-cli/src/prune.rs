//! Implementation of the `pubdeck prune` command.

use anyhow::{Context, Result};
use pubdeck_core::{prune_unused, scan_usage, sort_manifest, Project};

use crate::config::PubdeckConfig;

/// Scan the source tree and remove dependencies nothing imports.
pub fn prune(project: &Project, config: &PubdeckConfig, dry_run: bool) -> Result<()> {
    let used = scan_usage(&project.root, &config.ignore_globs())
        .context("Failed to scan source files")?;

    let report =
        prune_unused(project, &used, dry_run).context("Failed to remove unused dependencies")?;

    if report.is_empty() {
        println!("No unused dependencies found");
        return Ok(());
    }

    if dry_run {
        println!("Would remove unused dependencies: {}", report.all().join(", "));
    } else {
        sort_manifest(project).context("Failed to sort manifest after prune")?;
        println!("Removed unused dependencies: {}", report.all().join(", "));
    }
    Ok(())
}
