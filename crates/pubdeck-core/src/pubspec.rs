//! Typed read-only view of `pubspec.yaml`.
//!
//! Loaded at the start of every command; a parse failure here aborts the
//! command before any mutation touches the file. Mutations themselves go
//! through [`crate::Document`], which preserves formatting.

use serde::Deserialize;
use serde_yaml::{Mapping as YamlMapping, Value};
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Top-level key of the runtime dependency mapping.
pub const DEPENDENCIES_KEY: &str = "dependencies";

/// Top-level key of the development dependency mapping.
pub const DEV_DEPENDENCIES_KEY: &str = "dev_dependencies";

/// Errors that can occur when working with the typed manifest view.
#[derive(Error, Debug)]
pub enum PubspecError {
    #[error("manifest not found at: {0}")]
    NotFound(PathBuf),

    #[error("failed to read manifest file: {0}")]
    Io(#[from] io::Error),

    #[error("malformed manifest: {0}")]
    Malformed(#[from] serde_yaml::Error),

    #[error("invalid package selection '{0}'")]
    InvalidSelection(String),
}

/// The recognized parts of a pubspec manifest.
///
/// Everything this tool does not manage (environment, flutter assets,
/// executables, …) is ignored on read and never rewritten.
#[derive(Debug, Clone, Deserialize)]
pub struct Pubspec {
    /// Package name declared by the manifest.
    #[serde(default)]
    pub name: Option<String>,

    /// Runtime dependencies, in document order.
    #[serde(default, deserialize_with = "nullable_mapping")]
    pub dependencies: YamlMapping,

    /// Development-only dependencies, in document order.
    #[serde(default, deserialize_with = "nullable_mapping")]
    pub dev_dependencies: YamlMapping,
}

/// A declared-but-empty section (`dependencies:` with no entries) parses
/// as null; treat it as an empty mapping.
fn nullable_mapping<'de, D>(deserializer: D) -> Result<YamlMapping, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let mapping = Option::<YamlMapping>::deserialize(deserializer)?;
    Ok(mapping.unwrap_or_default())
}

impl Pubspec {
    /// Load a manifest from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing, unreadable, or malformed.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, PubspecError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(PubspecError::NotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse a manifest from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is invalid.
    pub fn parse(content: &str) -> Result<Self, PubspecError> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// The requested dependency mapping.
    #[must_use]
    pub fn section(&self, dev: bool) -> &YamlMapping {
        if dev {
            &self.dev_dependencies
        } else {
            &self.dependencies
        }
    }

    /// Number of entries in a dependency mapping.
    #[must_use]
    pub fn count(&self, dev: bool) -> usize {
        self.section(dev).len()
    }

    /// Declared dependency names, in document order.
    #[must_use]
    pub fn declared_names(&self, dev: bool) -> Vec<String> {
        self.section(dev)
            .keys()
            .filter_map(Value::as_str)
            .map(String::from)
            .collect()
    }

    /// Dependency entries paired with their classified constraints.
    #[must_use]
    pub fn entries(&self, dev: bool) -> Vec<DependencyEntry> {
        self.section(dev)
            .iter()
            .filter_map(|(key, value)| {
                key.as_str().map(|name| DependencyEntry {
                    name: name.to_string(),
                    constraint: Constraint::from_value(value),
                })
            })
            .collect()
    }
}

/// A named dependency paired with its constraint.
///
/// Always a view derived from the manifest, never stored separately.
#[derive(Debug, Clone)]
pub struct DependencyEntry {
    pub name: String,
    pub constraint: Constraint,
}

impl fmt::Display for DependencyEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = self.constraint.to_string();
        if rendered.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{} {}", self.name, rendered)
        }
    }
}

/// A dependency's version or source specifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Constraint {
    /// Plain semver range, e.g. `^1.2.0`.
    Version(String),

    /// Git source with an optional ref.
    Git {
        url: String,
        reference: Option<String>,
    },

    /// Local path dependency.
    Path(String),

    /// Platform SDK dependency, e.g. `sdk: flutter`.
    Sdk(String),

    /// Anything else the manifest may carry, rendered verbatim.
    Other(String),
}

impl Constraint {
    /// Classify a raw manifest value.
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::String(version) => Self::Version(version.clone()),
            Value::Null => Self::Other(String::new()),
            Value::Mapping(map) => {
                if let Some(git) = field(map, "git") {
                    return Self::from_git(git);
                }
                if let Some(Value::String(path)) = field(map, "path") {
                    return Self::Path(path.clone());
                }
                if let Some(Value::String(sdk)) = field(map, "sdk") {
                    return Self::Sdk(sdk.clone());
                }
                Self::Other(render_raw(value))
            }
            other => Self::Other(render_raw(other)),
        }
    }

    /// Git dependencies come as a bare URL or as a `{url, ref}` record.
    fn from_git(git: &Value) -> Self {
        match git {
            Value::String(url) => Self::Git {
                url: url.clone(),
                reference: None,
            },
            Value::Mapping(map) => Self::Git {
                url: field(map, "url")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
                reference: field(map, "ref")
                    .and_then(Value::as_str)
                    .map(String::from),
            },
            other => Self::Other(render_raw(other)),
        }
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Version(version) => write!(f, "{version}"),
            Self::Git {
                url,
                reference: Some(reference),
            } => write!(f, "[git {url}#{reference}]"),
            Self::Git {
                url,
                reference: None,
            } => write!(f, "[git {url}]"),
            Self::Path(path) => write!(f, "[path {path}]"),
            Self::Sdk(sdk) => write!(f, "[sdk {sdk}]"),
            Self::Other(raw) => write!(f, "{raw}"),
        }
    }
}

fn field<'a>(map: &'a YamlMapping, key: &str) -> Option<&'a Value> {
    map.get(&Value::String(key.to_string()))
}

fn render_raw(value: &Value) -> String {
    serde_json::to_string(value).unwrap_or_default()
}

/// Validate a package name supplied to a command.
///
/// A blank or non-identifier name cannot be resolved to a manifest entry
/// and is rejected before any subprocess or file work happens.
///
/// # Errors
///
/// Returns [`PubspecError::InvalidSelection`] for unusable names.
pub fn validate_package_name(name: &str) -> Result<(), PubspecError> {
    let invalid = || PubspecError::InvalidSelection(name.to_string());

    if name.trim().is_empty() {
        return Err(invalid());
    }
    if !name
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_lowercase() || c == '_')
    {
        return Err(invalid());
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
    {
        return Err(invalid());
    }
    Ok(())
}
