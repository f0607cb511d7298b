//! Implementation of the `pubdeck panel` command.

use anyhow::Result;
use pubdeck_core::{Project, TreeProjection};

use crate::config::PubdeckConfig;

/// Render the panel tree for the project.
pub fn show(project: &Project, config: &PubdeckConfig) -> Result<()> {
    let projection = TreeProjection::new(project, config.script_list());
    print!("{}", projection.render()?);
    Ok(())
}
