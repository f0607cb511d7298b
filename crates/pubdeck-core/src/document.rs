//! Format-preserving model of the `pubspec.yaml` document.
//!
//! Users keep comments and hand formatting in their manifest, so mutations
//! operate on the raw lines of the file: the text is validated as YAML up
//! front, but edits splice whole entry line-groups in and out of a block
//! mapping. Every line outside the edited block survives byte-for-byte.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur when loading or editing the manifest document.
#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("manifest not found at: {0}")]
    NotFound(PathBuf),

    #[error("failed to read manifest file: {0}")]
    Io(#[from] io::Error),

    #[error("malformed manifest: {0}")]
    Malformed(#[from] serde_yaml::Error),
}

/// A single entry of a block mapping together with the lines it owns.
///
/// An entry owns the comment and blank lines directly above it, its own
/// `name:` line, and every following line indented deeper than the entry
/// key (nested constraint blocks). Reordering or deleting an entry moves
/// those lines as a unit.
#[derive(Debug, Clone)]
pub struct Entry {
    name: String,
    lines: Vec<String>,
}

impl Entry {
    /// The entry's key.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// A snapshot of one top-level block mapping.
///
/// Taken from a [`Document`] and spliced back with
/// [`Document::replace_mapping`]; stale snapshots must not be spliced into
/// a document that was edited in between.
#[derive(Debug, Clone)]
pub struct Mapping {
    key: String,
    pub(crate) entries: Vec<Entry>,
}

impl Mapping {
    /// The top-level key this mapping was taken from.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Entry names in their current order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(Entry::name).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check whether an entry with the given name exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|e| e.name == name)
    }
}

/// Position of a key in the document, 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    pub line: usize,
    pub column: usize,
}

/// The manifest as an editable sequence of raw lines.
#[derive(Debug, Clone)]
pub struct Document {
    lines: Vec<String>,
}

struct BlockSpan {
    start: usize,
    end: usize,
    entries: Vec<Entry>,
}

impl Document {
    /// Parse a manifest from text.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::Malformed`] if the text is not valid YAML.
    pub fn parse(text: &str) -> Result<Self, DocumentError> {
        serde_yaml::from_str::<serde_yaml::Value>(text)?;
        Ok(Self {
            lines: text.split('\n').map(String::from).collect(),
        })
    }

    /// Load a manifest from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing, unreadable, or malformed.
    pub fn load(path: &Path) -> Result<Self, DocumentError> {
        if !path.exists() {
            return Err(DocumentError::NotFound(path.to_path_buf()));
        }
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text)
    }

    /// Serialize the document back to text.
    ///
    /// An unmodified document reproduces its input byte-for-byte.
    #[must_use]
    pub fn serialize(&self) -> String {
        self.lines.join("\n")
    }

    /// Write the document to a file as a single replace.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn write(&self, path: &Path) -> Result<(), DocumentError> {
        std::fs::write(path, self.serialize())?;
        Ok(())
    }

    /// Extract the entries of a top-level block mapping.
    ///
    /// Returns `None` when the key is absent, the mapping has no entries,
    /// or its value is not an indented block (flow-style mappings are left
    /// alone).
    #[must_use]
    pub fn mapping(&self, key: &str) -> Option<Mapping> {
        let block = self.block(key)?;
        if block.entries.is_empty() {
            return None;
        }
        Some(Mapping {
            key: key.to_string(),
            entries: block.entries,
        })
    }

    /// Splice a (possibly reordered) mapping back into the document.
    pub fn replace_mapping(&mut self, mapping: &Mapping) {
        if let Some(block) = self.block(&mapping.key) {
            let new_lines: Vec<String> = mapping
                .entries
                .iter()
                .flat_map(|e| e.lines.iter().cloned())
                .collect();
            self.lines.splice(block.start..block.end, new_lines);
        }
    }

    /// Delete one entry (with its attached lines) from a block mapping.
    ///
    /// Returns whether the entry existed.
    pub fn remove_entry(&mut self, key: &str, name: &str) -> bool {
        let Some(mut mapping) = self.mapping(key) else {
            return false;
        };
        let before = mapping.entries.len();
        mapping.entries.retain(|e| e.name != name);
        if mapping.entries.len() == before {
            return false;
        }
        self.replace_mapping(&mapping);
        true
    }

    /// Locate the `name:` key line of a dependency for editor reveal.
    #[must_use]
    pub fn locate(&self, name: &str) -> Option<Location> {
        for (idx, line) in self.lines.iter().enumerate() {
            let trimmed = line.trim_start();
            let indent = line.len() - trimmed.len();
            if let Some(rest) = trimmed.strip_prefix(name) {
                if rest.starts_with(':') {
                    return Some(Location {
                        line: idx + 1,
                        column: indent + 1,
                    });
                }
            }
        }
        None
    }

    /// Walk the lines of one top-level block mapping, grouping each entry
    /// with its attached comment/blank and continuation lines. Trailing
    /// comments and blanks not followed by another entry stay outside the
    /// span so edits never disturb them.
    fn block(&self, key: &str) -> Option<BlockSpan> {
        let header = self.lines.iter().position(|l| is_top_level_key(l, key))?;

        let mut entries: Vec<Entry> = Vec::new();
        let mut pending: Vec<String> = Vec::new();
        let mut current: Option<Entry> = None;
        let mut item_indent: Option<usize> = None;
        let mut end = header + 1;

        for idx in header + 1..self.lines.len() {
            let line = &self.lines[idx];
            let trimmed = line.trim_start();

            if trimmed.is_empty() || trimmed.starts_with('#') {
                pending.push(line.clone());
                continue;
            }

            let indent = line.len() - trimmed.len();
            if indent == 0 {
                // next top-level construct
                break;
            }

            let expected = *item_indent.get_or_insert(indent);
            if indent == expected {
                if let Some(name) = entry_key(trimmed) {
                    if let Some(entry) = current.take() {
                        entries.push(entry);
                    }
                    let mut lines = std::mem::take(&mut pending);
                    lines.push(line.clone());
                    current = Some(Entry { name, lines });
                } else {
                    // scalar content at the item indent; not a block
                    // mapping this model can edit
                    return None;
                }
            } else if indent > expected {
                let entry = current.as_mut()?;
                entry.lines.append(&mut pending);
                entry.lines.push(line.clone());
            } else {
                return None;
            }
            end = idx + 1;
        }

        if let Some(entry) = current.take() {
            entries.push(entry);
        }

        Some(BlockSpan {
            start: header + 1,
            end,
            entries,
        })
    }
}

/// Match a `key:` line at column zero whose value is an indented block.
fn is_top_level_key(line: &str, key: &str) -> bool {
    let Some(rest) = line.strip_prefix(key) else {
        return false;
    };
    let Some(rest) = rest.strip_prefix(':') else {
        return false;
    };
    let rest = rest.trim_start();
    rest.is_empty() || rest.starts_with('#')
}

/// Extract the key of a `name:` or `name: value` line.
fn entry_key(trimmed: &str) -> Option<String> {
    let colon = trimmed.find(':')?;
    let raw = trimmed[..colon].trim_end();
    if raw.is_empty() || raw.starts_with('-') {
        return None;
    }
    // a colon inside a scalar (e.g. a URL) is not a key separator
    let after = &trimmed[colon + 1..];
    if !(after.is_empty() || after.starts_with(' ')) {
        return None;
    }
    let name = raw.trim_matches(|c| c == '"' || c == '\'');
    Some(name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const MANIFEST: &str = "\
name: demo_app
description: A demo.

# Runtime packages.
dependencies:
  flutter:
    sdk: flutter
  # pinned until the v2 migration lands
  http: ^1.0.0
  collection: ^1.18.0

dev_dependencies:
  flutter_test:
    sdk: flutter
  lints: ^3.0.0
";

    #[test]
    fn round_trip_is_byte_identical() {
        let doc = Document::parse(MANIFEST).unwrap();
        assert_eq!(doc.serialize(), MANIFEST);
    }

    #[test]
    fn parse_rejects_invalid_yaml() {
        let err = Document::parse("dependencies:\n  http: [unclosed\n").unwrap_err();
        assert!(matches!(err, DocumentError::Malformed(_)));
    }

    #[test]
    fn load_missing_file() {
        let tmp = TempDir::new().unwrap();
        let err = Document::load(&tmp.path().join("pubspec.yaml")).unwrap_err();
        assert!(matches!(err, DocumentError::NotFound(_)));
    }

    #[test]
    fn mapping_lists_entries_in_order() {
        let doc = Document::parse(MANIFEST).unwrap();
        let deps = doc.mapping("dependencies").unwrap();
        assert_eq!(deps.names(), vec!["flutter", "http", "collection"]);

        let dev = doc.mapping("dev_dependencies").unwrap();
        assert_eq!(dev.names(), vec!["flutter_test", "lints"]);
    }

    #[test]
    fn mapping_absent_key() {
        let doc = Document::parse(MANIFEST).unwrap();
        assert!(doc.mapping("dependency_overrides").is_none());
    }

    #[test]
    fn mapping_ignores_flow_style() {
        let doc = Document::parse("dependencies: {http: ^1.0.0}\n").unwrap();
        assert!(doc.mapping("dependencies").is_none());
    }

    #[test]
    fn remove_entry_deletes_nested_block() {
        let mut doc = Document::parse(MANIFEST).unwrap();
        assert!(doc.remove_entry("dependencies", "flutter"));

        let text = doc.serialize();
        assert!(!text.contains("sdk: flutter\n  # pinned"));
        assert!(text.contains("http: ^1.0.0"));
        // the dev_dependencies flutter_test block is untouched
        assert!(text.contains("flutter_test:\n    sdk: flutter"));
    }

    #[test]
    fn remove_entry_takes_attached_comment() {
        let mut doc = Document::parse(MANIFEST).unwrap();
        assert!(doc.remove_entry("dependencies", "http"));

        let text = doc.serialize();
        assert!(!text.contains("pinned until"));
        // the section comment above the block header stays
        assert!(text.contains("# Runtime packages."));
    }

    #[test]
    fn remove_entry_missing_name() {
        let mut doc = Document::parse(MANIFEST).unwrap();
        assert!(!doc.remove_entry("dependencies", "nonexistent"));
        assert_eq!(doc.serialize(), MANIFEST);
    }

    #[test]
    fn replace_mapping_preserves_surroundings() {
        let mut doc = Document::parse(MANIFEST).unwrap();
        let mut deps = doc.mapping("dependencies").unwrap();
        deps.entries.reverse();
        doc.replace_mapping(&deps);

        let text = doc.serialize();
        // reordered entries keep their attached lines
        let collection = text.find("collection:").unwrap();
        let http = text.find("http:").unwrap();
        let flutter = text.find("flutter:").unwrap();
        assert!(collection < http && http < flutter);
        // the comment moved with its entry
        let comment = text.find("# pinned until").unwrap();
        assert!(comment < http && comment > collection);
        // untouched regions are intact
        assert!(text.starts_with("name: demo_app\ndescription: A demo.\n\n# Runtime packages.\ndependencies:\n"));
        assert!(text.contains("\ndev_dependencies:\n  flutter_test:\n"));
    }

    #[test]
    fn blank_line_between_blocks_survives_edits() {
        let mut doc = Document::parse(MANIFEST).unwrap();
        let mut deps = doc.mapping("dependencies").unwrap();
        deps.entries.reverse();
        doc.replace_mapping(&deps);

        // dependencies now end with the flutter entry; the separating blank
        // line stayed where it was
        assert!(doc
            .serialize()
            .contains("    sdk: flutter\n\ndev_dependencies:"));
    }

    #[test]
    fn locate_finds_key_position() {
        let doc = Document::parse(MANIFEST).unwrap();
        let loc = doc.locate("http").unwrap();
        assert_eq!(loc.line, 9);
        assert_eq!(loc.column, 3);
        assert!(doc.locate("nonexistent").is_none());
    }

    #[test]
    fn write_and_reload() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("pubspec.yaml");
        fs::write(&path, MANIFEST).unwrap();

        let mut doc = Document::load(&path).unwrap();
        doc.remove_entry("dev_dependencies", "lints");
        doc.write(&path).unwrap();

        let reloaded = Document::load(&path).unwrap();
        assert!(!reloaded.mapping("dev_dependencies").unwrap().contains("lints"));
    }
}
