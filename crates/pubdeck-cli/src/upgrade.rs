//! Implementation of the `pubdeck upgrade` command.

use anyhow::{Context, Result};
use pubdeck_core::{sort_manifest, validate_package_name, Project, PubCommand, Pubspec};

use crate::config::PubdeckConfig;
use crate::exec;

/// Upgrade one dependency through the tool, then sort the manifest.
pub fn upgrade_dependency(
    project: &Project,
    config: &PubdeckConfig,
    package: &str,
) -> Result<()> {
    validate_package_name(package)?;
    Pubspec::from_path(&project.manifest_path)?;

    let command = PubCommand::Upgrade {
        package: package.to_string(),
    };
    exec::run_pub(project, config, &command)
        .with_context(|| format!("Failed to update dependency `{package}`"))?;

    sort_manifest(project).context("Failed to sort manifest after upgrade")?;

    println!("Successfully updated dependency: {package}");
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
    fn upgrade_passes_the_package_through() {
        let (_tmp, project, config) = setup(
            "name: demo\ndependencies:\n  http: ^1.0.0\n",
            r#"echo "$@" > args.txt"#,
        );

        upgrade_dependency(&project, &config, "http").unwrap();

        let args = fs::read_to_string(project.root.join("args.txt")).unwrap();
        assert_eq!(args.trim(), "pub upgrade http");
    }

    #[cfg(unix)]
    #[test]
    fn upgrade_failure_is_reported() {
        let manifest = "name: demo\ndependencies:\n  http: ^1.0.0\n";
        let (_tmp, project, config) = setup(manifest, "echo 'no versions available' >&2; exit 66");

        let err = upgrade_dependency(&project, &config, "http").unwrap_err();
        assert!(format!("{err:#}").contains("no versions available"));
        assert_eq!(fs::read_to_string(&project.manifest_path).unwrap(), manifest);
    }
}
