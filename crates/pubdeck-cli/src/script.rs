//! Implementation of the `pubdeck run` command.

use anyhow::{Context, Result};
use pubdeck_core::Project;

use crate::exec;

/// Run a script command line in the project root.
pub fn run(project: &Project, command_line: &str) -> Result<()> {
    exec::run_script_line(project, command_line)
        .with_context(|| format!("Failed to run `{command_line}`"))?;
    Ok(())
}
