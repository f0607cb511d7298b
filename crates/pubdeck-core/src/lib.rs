//! Manifest synchronization engine for the pubdeck dependency panel.
//!
//! This crate provides:
//! - Format-preserving parsing and editing of `pubspec.yaml`
//! - Deterministic sorting of the dependency mappings
//! - Source-tree scanning for referenced package identifiers
//! - Pruning of dependencies no source file imports
//! - The tree projection rendered by the panel surface
//! - Invocation of the external `pub` tool and registry search

mod document;
mod project;
mod prune;
mod pubspec;
mod registry;
mod runner;
mod scan;
mod sort;
mod tree;

pub use document::{Document, DocumentError, Entry, Location, Mapping};
pub use project::{Project, ProjectError, MANIFEST_FILE};
pub use prune::{prune_unused, PruneError, PruneReport};
pub use pubspec::{
    validate_package_name, Constraint, DependencyEntry, Pubspec, PubspecError, DEPENDENCIES_KEY,
    DEV_DEPENDENCIES_KEY,
};
pub use registry::{RegistryClient, RegistryError, SEARCH_URL};
pub use runner::{run_script, CommandOutput, PubCommand, PubRunner, RunnerError};
pub use scan::{scan_text, scan_usage, ScanError, DEFAULT_IGNORE};
pub use sort::{sort_entries, sort_manifest};
pub use tree::{default_scripts, Leaf, LeafAction, Script, Section, SectionNode, TreeProjection};
