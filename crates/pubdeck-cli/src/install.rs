//! Implementation of the `pubdeck install` command (`pub get`).

use anyhow::{Context, Result};
use pubdeck_core::{Project, PubCommand, Pubspec};

use crate::config::PubdeckConfig;
use crate::exec;

/// Install everything declared in the manifest.
pub fn install_all(project: &Project, config: &PubdeckConfig) -> Result<()> {
    Pubspec::from_path(&project.manifest_path)?;

    exec::run_pub(project, config, &PubCommand::Get)
        .context("Failed to install dependencies")?;

    println!("Dependencies installed");
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
    fn install_runs_pub_get() {
        let (_tmp, project, config) = setup("name: demo\n", r#"echo "$@" > args.txt"#);

        install_all(&project, &config).unwrap();

        let args = fs::read_to_string(project.root.join("args.txt")).unwrap();
        assert_eq!(args.trim(), "pub get");
    }

    #[cfg(unix)]
    #[test]
    fn install_rejects_malformed_manifest() {
        let (_tmp, project, config) = setup("dependencies: [broken\n", "echo ran > ran.txt");

        let err = install_all(&project, &config).unwrap_err();
        assert!(err.to_string().contains("malformed manifest"));
        assert!(!project.root.join("ran.txt").exists());
    }
}
