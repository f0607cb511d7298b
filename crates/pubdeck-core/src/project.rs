//! Project root and manifest resolution.

use std::env;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// The manifest filename.
pub const MANIFEST_FILE: &str = "pubspec.yaml";

/// Errors that can occur when resolving the project context.
#[derive(Error, Debug)]
pub enum ProjectError {
    #[error("no project root found at: {0}")]
    NoProjectRoot(PathBuf),

    #[error("pubspec.yaml not found under: {0}")]
    ManifestNotFound(PathBuf),
}

/// Resolved project context.
///
/// Constructed once per command and passed by reference to every component;
/// nothing else in the crate holds workspace state.
#[derive(Debug, Clone)]
pub struct Project {
    /// Root directory of the project.
    pub root: PathBuf,

    /// Path to the manifest file.
    pub manifest_path: PathBuf,
}

impl Project {
    /// Resolve the project from an explicit directory, or by searching
    /// upward from the current directory.
    ///
    /// An explicit directory that does not exist fails with
    /// [`ProjectError::NoProjectRoot`] before any manifest access.
    ///
    /// # Errors
    ///
    /// Returns an error if no project root or manifest can be resolved.
    pub fn locate(explicit: Option<&Path>) -> Result<Self, ProjectError> {
        match explicit {
            Some(dir) => {
                if !dir.is_dir() {
                    return Err(ProjectError::NoProjectRoot(dir.to_path_buf()));
                }
                Self::discover(dir)
            }
            None => {
                let cwd = env::current_dir()
                    .map_err(|_| ProjectError::NoProjectRoot(PathBuf::from(".")))?;
                Self::find_root(&cwd)
            }
        }
    }

    /// Use a directory as the project root; its manifest must exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory has no manifest.
    pub fn discover(root: impl AsRef<Path>) -> Result<Self, ProjectError> {
        let root = root.as_ref().to_path_buf();
        let manifest_path = root.join(MANIFEST_FILE);
        if !manifest_path.exists() {
            return Err(ProjectError::ManifestNotFound(root));
        }
        Ok(Self {
            root,
            manifest_path,
        })
    }

    /// Find a project by searching upward for a manifest.
    ///
    /// # Errors
    ///
    /// Returns an error if no manifest is found in the directory tree.
    pub fn find_root(start: impl AsRef<Path>) -> Result<Self, ProjectError> {
        let mut current = start.as_ref().to_path_buf();

        loop {
            if current.join(MANIFEST_FILE).exists() {
                return Self::discover(&current);
            }

            match current.parent() {
                Some(parent) => current = parent.to_path_buf(),
                None => {
                    return Err(ProjectError::ManifestNotFound(
                        start.as_ref().to_path_buf(),
                    ))
                }
            }
        }
    }
}
