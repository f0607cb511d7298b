//! Implementation of the `pubdeck remove` command.

use anyhow::{Context, Result};
use pubdeck_core::{sort_manifest, validate_package_name, Project, PubCommand, Pubspec};

use crate::config::PubdeckConfig;
use crate::exec;

/// Remove a dependency through the tool, then sort the manifest.
pub fn remove_dependency(
    project: &Project,
    config: &PubdeckConfig,
    package: &str,
) -> Result<()> {
    validate_package_name(package)?;
    Pubspec::from_path(&project.manifest_path)?;

    let command = PubCommand::Remove {
        package: package.to_string(),
    };
    exec::run_pub(project, config, &command)
        .with_context(|| format!("Failed to remove dependency `{package}`"))?;

    sort_manifest(project).context("Failed to sort manifest after remove")?;

    println!("Successfully removed dependency: {package}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[cfg(unix)]
    fn setup(manifest: &str, tool_script: &str) -> (TempDir, Project, PubdeckConfig) {
        use std::os::unix::fs::PermissionsExt;

        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("pubspec.yaml"), manifest).unwrap();

        let tool = tmp.path().join("fake-flutter");
        fs::write(&tool, format!("#!/bin/sh\n{tool_script}\n")).unwrap();
        fs::set_permissions(&tool, fs::Permissions::from_mode(0o755)).unwrap();

        let project = Project::discover(tmp.path()).unwrap();
        let config = PubdeckConfig {
            tool: tool.to_string_lossy().into_owned(),
            ..PubdeckConfig::default()
        };
        (tmp, project, config)
    }

    #[cfg(unix)]
    #[test]
    fn remove_drops_the_entry() {
        // the fake tool mimics `pub remove` by filtering the entry out
        let (_tmp, project, config) = setup(
            "name: demo\ndependencies:\n  a: ^1.0.0\n  b: ^2.0.0\n",
            r#"grep -v "^  $3:" pubspec.yaml > pubspec.tmp && mv pubspec.tmp pubspec.yaml"#,
        );

        remove_dependency(&project, &config, "b").unwrap();

        let text = fs::read_to_string(&project.manifest_path).unwrap();
        assert_eq!(text, "name: demo\ndependencies:\n  a: ^1.0.0\n");
    }

    #[cfg(unix)]
    #[test]
    fn remove_failure_leaves_manifest_alone() {
        let manifest = "name: demo\ndependencies:\n  a: ^1.0.0\n";
        let (_tmp, project, config) = setup(manifest, "echo 'not a dependency' >&2; exit 1");

        let err = remove_dependency(&project, &config, "ghost").unwrap_err();
        assert!(format!("{err:#}").contains("not a dependency"));
        assert_eq!(fs::read_to_string(&project.manifest_path).unwrap(), manifest);
    }

    #[cfg(unix)]
    #[test]
    fn remove_rejects_blank_selection() {
        let (_tmp, project, config) = setup("name: demo\n", "true");

        let err = remove_dependency(&project, &config, "  ").unwrap_err();
        assert!(err.to_string().contains("invalid package selection"));
    }
}
