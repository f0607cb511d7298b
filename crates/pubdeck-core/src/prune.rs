//! Removal of declared dependencies that no source file references.

use crate::document::{Document, DocumentError};
use crate::project::Project;
use crate::pubspec::{Pubspec, PubspecError, DEPENDENCIES_KEY, DEV_DEPENDENCIES_KEY};
use std::collections::HashSet;
use thiserror::Error;

/// Errors that can occur while pruning.
#[derive(Error, Debug)]
pub enum PruneError {
    #[error("document error: {0}")]
    Document(#[from] DocumentError),

    #[error("manifest error: {0}")]
    Pubspec(#[from] PubspecError),
}

/// Names removed by a prune, per section.
#[derive(Debug, Default)]
pub struct PruneReport {
    /// Removed from `dependencies`.
    pub removed: Vec<String>,

    /// Removed from `dev_dependencies`.
    pub removed_dev: Vec<String>,
}

impl PruneReport {
    /// Returns true if nothing was removed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.removed.is_empty() && self.removed_dev.is_empty()
    }

    /// All removed names across both sections.
    #[must_use]
    pub fn all(&self) -> Vec<&str> {
        self.removed
            .iter()
            .chain(self.removed_dev.iter())
            .map(String::as_str)
            .collect()
    }
}

/// Delete every declared dependency whose identifier is not in `used`.
///
/// The set difference runs over both dependency mappings. The manifest is
/// rewritten only when something was removed and `dry_run` is false; the
/// write is a single file replace. The scan result and the file state are
/// not re-checked against each other at write time.
///
/// # Errors
///
/// Returns an error if the manifest is missing, malformed, or cannot be
/// rewritten.
pub fn prune_unused(
    project: &Project,
    used: &HashSet<String>,
    dry_run: bool,
) -> Result<PruneReport, PruneError> {
    let pubspec = Pubspec::from_path(&project.manifest_path)?;
    let mut doc = Document::load(&project.manifest_path)?;
    let mut report = PruneReport::default();

    for (dev, key) in [(false, DEPENDENCIES_KEY), (true, DEV_DEPENDENCIES_KEY)] {
        for name in pubspec.declared_names(dev) {
            if used.contains(&name) {
                continue;
            }
            if doc.remove_entry(key, &name) {
                if dev {
                    report.removed_dev.push(name);
                } else {
                    report.removed.push(name);
                }
            }
        }
    }

    if !report.is_empty() && !dry_run {
        doc.write(&project.manifest_path)?;
        tracing::info!(removed = report.all().len(), "pruned unused dependencies");
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn project_with(manifest: &str) -> (TempDir, Project) {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("pubspec.yaml"), manifest).unwrap();
        let project = Project::discover(tmp.path()).unwrap();
        (tmp, project)
    }

    fn used(names: &[&str]) -> HashSet<String> {
        names.iter().map(|n| (*n).to_string()).collect()
    }

    #[test]
    fn prune_removes_exactly_the_unused() {
        let (_tmp, project) = project_with(
            "name: demo\ndependencies:\n  a: ^1.0.0\n  b: ^2.0.0\n  c: ^3.0.0\n",
        );

        let report = prune_unused(&project, &used(&["a", "c"]), false).unwrap();
        assert_eq!(report.removed, vec!["b"]);
        assert!(report.removed_dev.is_empty());

        let pubspec = Pubspec::from_path(&project.manifest_path).unwrap();
        assert_eq!(pubspec.declared_names(false), vec!["a", "c"]);
    }

    #[test]
    fn prune_covers_dev_dependencies() {
        let (_tmp, project) = project_with(
            "name: demo\ndependencies:\n  a: ^1.0.0\ndev_dependencies:\n  unused_tool: ^1.0.0\n  lints: ^3.0.0\n",
        );

        let report = prune_unused(&project, &used(&["a", "lints"]), false).unwrap();
        assert!(report.removed.is_empty());
        assert_eq!(report.removed_dev, vec!["unused_tool"]);
        assert_eq!(report.all(), vec!["unused_tool"]);
    }

    #[test]
    fn prune_with_nothing_unused_leaves_file_alone() {
        let manifest = "name: demo\ndependencies:\n  a: ^1.0.0\n";
        let (_tmp, project) = project_with(manifest);

        let report = prune_unused(&project, &used(&["a"]), false).unwrap();
        assert!(report.is_empty());
        assert_eq!(
            fs::read_to_string(&project.manifest_path).unwrap(),
            manifest
        );
    }

    #[test]
    fn prune_dry_run_reports_without_writing() {
        let manifest = "name: demo\ndependencies:\n  a: ^1.0.0\n  b: ^2.0.0\n";
        let (_tmp, project) = project_with(manifest);

        let report = prune_unused(&project, &used(&["a"]), true).unwrap();
        assert_eq!(report.removed, vec!["b"]);
        assert_eq!(
            fs::read_to_string(&project.manifest_path).unwrap(),
            manifest
        );
    }

    #[test]
    fn prune_preserves_comments_elsewhere() {
        let (_tmp, project) = project_with(
            "name: demo\n# deps below\ndependencies:\n  a: ^1.0.0\n  b: ^2.0.0\n",
        );

        prune_unused(&project, &used(&["a"]), false).unwrap();
        let text = fs::read_to_string(&project.manifest_path).unwrap();
        assert_eq!(text, "name: demo\n# deps below\ndependencies:\n  a: ^1.0.0\n");
    }

    #[test]
    fn prune_rejects_malformed_manifest() {
        let manifest = "dependencies: [broken\n";
        let (_tmp, project) = project_with(manifest);

        let err = prune_unused(&project, &used(&[]), false).unwrap_err();
        assert!(matches!(err, PruneError::Pubspec(_)));
        assert_eq!(
            fs::read_to_string(&project.manifest_path).unwrap(),
            manifest
        );
    }
}
