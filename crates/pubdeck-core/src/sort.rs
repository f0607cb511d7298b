//! Deterministic ordering of the dependency mappings.

use crate::document::{Document, DocumentError, Mapping};
use crate::project::Project;
use crate::pubspec::{DEPENDENCIES_KEY, DEV_DEPENDENCIES_KEY};

/// Sort a mapping's entries into ascending lexicographic order.
///
/// Pure over the in-memory mapping; returns whether the order changed.
/// The sort is stable, and keys are unique in a valid manifest, so a
/// sorted mapping is always reproduced exactly.
pub fn sort_entries(mapping: &mut Mapping) -> bool {
    let already_sorted = mapping
        .entries
        .windows(2)
        .all(|pair| pair[0].name() <= pair[1].name());
    if already_sorted {
        return false;
    }
    mapping.entries.sort_by(|a, b| a.name().cmp(b.name()));
    true
}

/// Sort both dependency mappings of the project manifest in place.
///
/// An absent mapping is skipped, not an error. The file is rewritten only
/// when at least one mapping changed order; returns whether a write
/// happened.
///
/// # Errors
///
/// Returns an error if the manifest is missing, malformed, or cannot be
/// rewritten.
pub fn sort_manifest(project: &Project) -> Result<bool, DocumentError> {
    let mut doc = Document::load(&project.manifest_path)?;

    let mut changed = false;
    for key in [DEPENDENCIES_KEY, DEV_DEPENDENCIES_KEY] {
        if let Some(mut mapping) = doc.mapping(key) {
            if sort_entries(&mut mapping) {
                doc.replace_mapping(&mapping);
                changed = true;
            }
        }
    }

    if changed {
        doc.write(&project.manifest_path)?;
        tracing::debug!(path = %project.manifest_path.display(), "sorted dependency mappings");
    }
    Ok(changed)
}
