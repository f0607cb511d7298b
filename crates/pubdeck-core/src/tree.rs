//! Tree projection of the manifest for the panel surface.
//!
//! Two levels only: a fixed section list at the root, and per-section
//! children recomputed from the manifest on every call. Nothing is cached
//! between calls, so a host refresh is simply the next call.

use crate::project::Project;
use crate::pubspec::{Pubspec, PubspecError};

/// Top-level sections, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Scripts,
    Actions,
    Dependencies,
    DevDependencies,
}

impl Section {
    /// Every section, in display order.
    pub const ALL: [Self; 4] = [
        Self::Scripts,
        Self::Actions,
        Self::Dependencies,
        Self::DevDependencies,
    ];
}

/// A runnable command shown under the Scripts section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Script {
    pub label: String,
    pub command: String,
}

impl Script {
    #[must_use]
    pub fn new(label: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            command: command.into(),
        }
    }
}

/// The built-in script list.
#[must_use]
pub fn default_scripts() -> Vec<Script> {
    vec![
        Script::new("Flutter clean", "flutter clean"),
        Script::new("Upgrade dependencies", "flutter pub upgrade --major-versions"),
        Script::new("Static analysis", "dart analyze ."),
        Script::new("View available dart fixes", "dart fix --dry-run"),
        Script::new("Apply available dart fixes", "dart fix --apply"),
        Script::new("Format dart files", "dart format ."),
    ]
}

/// What a leaf does when the host triggers it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeafAction {
    /// Run a script command line in the project root.
    RunScript { command: String },

    /// Install everything in the manifest.
    InstallAll,

    /// Prompt for and add new dependencies.
    AddDependency { dev: bool },

    /// Jump to the dependency's manifest line.
    Reveal { package: String },
}

/// A terminal node: a plain-string label plus an optional action.
#[derive(Debug, Clone)]
pub struct Leaf {
    pub label: String,
    pub action: Option<LeafAction>,
}

/// A section with its display label.
#[derive(Debug, Clone)]
pub struct SectionNode {
    pub section: Section,
    pub label: String,
}

/// Recomputes the section list and children from the manifest on demand.
pub struct TreeProjection<'a> {
    project: &'a Project,
    scripts: Vec<Script>,
}

impl<'a> TreeProjection<'a> {
    #[must_use]
    pub fn new(project: &'a Project, scripts: Vec<Script>) -> Self {
        Self { project, scripts }
    }

    /// The fixed root section list. Dependency counts re-read the manifest
    /// and fall back to zero when it cannot be loaded; the load error
    /// surfaces when the section is expanded.
    #[must_use]
    pub fn sections(&self) -> Vec<SectionNode> {
        Section::ALL
            .into_iter()
            .map(|section| SectionNode {
                section,
                label: self.section_label(section),
            })
            .collect()
    }

    /// Children of one section, recomputed from the current manifest.
    ///
    /// # Errors
    ///
    /// Returns an error if a dependency section is expanded and the
    /// manifest cannot be loaded.
    pub fn expand(&self, section: Section) -> Result<Vec<Leaf>, PubspecError> {
        match section {
            Section::Scripts => Ok(self
                .scripts
                .iter()
                .map(|script| Leaf {
                    label: script.label.clone(),
                    action: Some(LeafAction::RunScript {
                        command: script.command.clone(),
                    }),
                })
                .collect()),
            Section::Actions => Ok(vec![
                Leaf {
                    label: "Install All Dependencies".to_string(),
                    action: Some(LeafAction::InstallAll),
                },
                Leaf {
                    label: "Add Dependency".to_string(),
                    action: Some(LeafAction::AddDependency { dev: false }),
                },
                Leaf {
                    label: "Add Dev Dependency".to_string(),
                    action: Some(LeafAction::AddDependency { dev: true }),
                },
            ]),
            Section::Dependencies => self.dependency_leaves(false),
            Section::DevDependencies => self.dependency_leaves(true),
        }
    }

    /// Render the whole projection as an ASCII tree.
    ///
    /// # Errors
    ///
    /// Returns an error if the manifest cannot be loaded.
    pub fn render(&self) -> Result<String, PubspecError> {
        let mut output = String::new();
        for node in self.sections() {
            output.push_str(&node.label);
            output.push('\n');

            let children = self.expand(node.section)?;
            for (idx, leaf) in children.iter().enumerate() {
                let branch = if idx == children.len() - 1 {
                    "└── "
                } else {
                    "├── "
                };
                output.push_str(branch);
                output.push_str(&leaf.label);
                output.push('\n');
            }
        }
        Ok(output)
    }

    fn section_label(&self, section: Section) -> String {
        match section {
            Section::Scripts => "Scripts".to_string(),
            Section::Actions => "Actions".to_string(),
            Section::Dependencies => format!("Dependencies ({})", self.count(false)),
            Section::DevDependencies => format!("Dev Dependencies ({})", self.count(true)),
        }
    }

    fn count(&self, dev: bool) -> usize {
        Pubspec::from_path(&self.project.manifest_path)
            .map(|pubspec| pubspec.count(dev))
            .unwrap_or(0)
    }

    fn dependency_leaves(&self, dev: bool) -> Result<Vec<Leaf>, PubspecError> {
        let pubspec = Pubspec::from_path(&self.project.manifest_path)?;
        Ok(pubspec
            .entries(dev)
            .into_iter()
            .map(|entry| Leaf {
                label: entry.to_string(),
                action: Some(LeafAction::Reveal {
                    package: entry.name,
                }),
            })
            .collect())
    }
}
