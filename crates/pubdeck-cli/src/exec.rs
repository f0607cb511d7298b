//! Shared subprocess execution for command handlers.

use anyhow::Result;
use pubdeck_core::{run_script, CommandOutput, Project, PubCommand, PubRunner};

use crate::config::PubdeckConfig;

/// Run a pub command with ctrl-c cancellation, echoing the tool's output.
pub fn run_pub(
    project: &Project,
    config: &PubdeckConfig,
    command: &PubCommand,
) -> Result<CommandOutput> {
    let runner = PubRunner::new(&config.tool);
    let output = block_on(runner.run_cancellable(project, command, ctrl_c()))?;
    echo(&output);
    Ok(output)
}

/// Run an arbitrary script command line with ctrl-c cancellation.
pub fn run_script_line(project: &Project, line: &str) -> Result<CommandOutput> {
    let output = block_on(run_script(project, line, ctrl_c()))?;
    echo(&output);
    Ok(output)
}

fn block_on<F, T, E>(future: F) -> Result<T>
where
    F: std::future::Future<Output = Result<T, E>>,
    E: std::error::Error + Send + Sync + 'static,
{
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    Ok(runtime.block_on(future)?)
}

async fn ctrl_c() {
    // if the signal handler cannot be installed, run uncancellable
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
}

fn echo(output: &CommandOutput) {
    let stdout = output.stdout.trim_end();
    if !stdout.is_empty() {
        println!("{stdout}");
    }
}
