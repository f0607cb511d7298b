//! Source-tree scanning for referenced package identifiers.

use glob::Pattern;
use regex::Regex;
use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use thiserror::Error;

/// Globs skipped by default: tool output and dependency caches.
pub const DEFAULT_IGNORE: &[&str] = &[".dart_tool/**", "build/**", ".git/**"];

/// Errors that can occur while scanning the source tree.
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("failed to read source file {path}: {source}")]
    Io {
        path: PathBuf,
        source: io::Error,
    },

    #[error("glob pattern error: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("failed to walk source tree: {0}")]
    Walk(#[from] glob::GlobError),
}

fn import_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?m)^\s*(?:import|export)\s+['"]package:([^/'"]+)/"#)
            .expect("import pattern is valid")
    })
}

/// Extract the package identifiers referenced by import/export statements.
///
/// The identifier is the path segment immediately following the `package:`
/// scheme prefix; duplicates collapse into the set.
#[must_use]
pub fn scan_text(src: &str) -> HashSet<String> {
    import_pattern()
        .captures_iter(src)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str().to_string()))
        .collect()
}

/// Collect every package identifier referenced by `.dart` files under
/// `root`, skipping paths matched by `ignore` globs (relative to `root`).
///
/// A file that cannot be read aborts the whole scan; the pruner must never
/// run against a partial usage set.
///
/// # Errors
///
/// Returns an error on an invalid ignore pattern or any unreadable file.
pub fn scan_usage(root: &Path, ignore: &[String]) -> Result<HashSet<String>, ScanError> {
    let ignore: Vec<Pattern> = ignore
        .iter()
        .map(|raw| Pattern::new(raw))
        .collect::<Result<_, _>>()?;

    let pattern = root.join("**").join("*.dart");
    let mut used = HashSet::new();

    for entry in glob::glob(&pattern.to_string_lossy())? {
        let path = entry?;
        let relative = path.strip_prefix(root).unwrap_or(&path);
        if ignore.iter().any(|p| p.matches_path(relative)) {
            continue;
        }

        let text = fs::read_to_string(&path).map_err(|source| ScanError::Io {
            path: path.clone(),
            source,
        })?;
        used.extend(scan_text(&text));
    }

    tracing::debug!(root = %root.display(), packages = used.len(), "scanned source tree");
    Ok(used)
}
