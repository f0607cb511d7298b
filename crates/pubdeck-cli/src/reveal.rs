//! Implementation of the `pubdeck reveal` command.

use anyhow::Result;
use pubdeck_core::{validate_package_name, Document, Project};

/// Print the manifest location of a dependency as `path:line:column`.
pub fn reveal(project: &Project, package: &str) -> Result<()> {
    validate_package_name(package)?;

    let doc = Document::load(&project.manifest_path)?;
    match doc.locate(package) {
        Some(location) => {
            println!(
                "{}:{}:{}",
                project.manifest_path.display(),
                location.line,
                location.column
            );
            Ok(())
        }
        None => Err(anyhow::anyhow!(
            "Dependency `{package}` not found in pubspec.yaml"
        )),
    }
}
