//! User configuration, stored in the platform config directory.

use pubdeck_core::{default_scripts, Script, DEFAULT_IGNORE};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// User-tunable settings.
///
/// Missing file or unreadable content falls back to defaults; a broken
/// config never blocks a command.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PubdeckConfig {
    /// Tool binary used for pub commands.
    pub tool: String,

    /// Extra ignore globs for the usage scanner, relative to the project
    /// root.
    pub scan_ignore: Vec<String>,

    /// User scripts appended to the built-in script list.
    pub scripts: Vec<ScriptEntry>,
}

/// One configured script.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptEntry {
    pub label: String,
    pub command: String,
}

impl Default for PubdeckConfig {
    fn default() -> Self {
        Self {
            tool: "flutter".to_string(),
            scan_ignore: Vec::new(),
            scripts: Vec::new(),
        }
    }
}

impl PubdeckConfig {
    /// Get the config file path.
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("pubdeck").join("config.toml"))
    }

    /// Load configuration from disk, falling back to defaults.
    pub fn load() -> Self {
        Self::config_path()
            .and_then(|path| std::fs::read_to_string(&path).ok())
            .and_then(|content| toml::from_str(&content).ok())
            .unwrap_or_default()
    }

    /// The full script list: built-ins followed by user scripts.
    pub fn script_list(&self) -> Vec<Script> {
        let mut scripts = default_scripts();
        scripts.extend(
            self.scripts
                .iter()
                .map(|entry| Script::new(entry.label.clone(), entry.command.clone())),
        );
        scripts
    }

    /// Scanner ignore globs: defaults plus configured extras.
    pub fn ignore_globs(&self) -> Vec<String> {
        DEFAULT_IGNORE
            .iter()
            .map(|glob| (*glob).to_string())
            .chain(self.scan_ignore.iter().cloned())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = PubdeckConfig::default();
        assert_eq!(config.tool, "flutter");
        assert!(config.scan_ignore.is_empty());
        assert_eq!(config.script_list().len(), default_scripts().len());
    }

    #[test]
    fn parse_partial_config() {
        let config: PubdeckConfig = toml::from_str(
            r#"
tool = "fvm"

[[scripts]]
label = "Build runner"
command = "dart run build_runner build"
"#,
        )
        .unwrap();

        assert_eq!(config.tool, "fvm");
        let scripts = config.script_list();
        assert_eq!(scripts.last().unwrap().command, "dart run build_runner build");
        assert_eq!(scripts.len(), default_scripts().len() + 1);
    }

    #[test]
    fn ignore_globs_extend_defaults() {
        let config = PubdeckConfig {
            scan_ignore: vec!["generated/**".to_string()],
            ..PubdeckConfig::default()
        };

        let globs = config.ignore_globs();
        assert!(globs.contains(&".dart_tool/**".to_string()));
        assert!(globs.contains(&"generated/**".to_string()));
    }
}
