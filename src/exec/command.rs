// src/exec/command.rs

use std::process::Command;

use anyhow::{Context, bail};
use tracing::{debug, info};

/// Adapt a shell command string into task work.
///
/// The returned closure runs the command through the platform shell and
/// succeeds iff the process exits with a success status. It blocks until the
/// process finishes — tasks execute sequentially within a job cycle, and a
/// long-running command stalls the heartbeat until it returns.
pub fn command_work(
    task: &str,
    cmd: &str,
) -> impl FnMut() -> anyhow::Result<()> + Send + 'static {
    let task = task.to_string();
    let cmd = cmd.to_string();

    move || {
        info!(task = %task, cmd = %cmd, "starting task process");

        let mut shell = if cfg!(windows) {
            let mut c = Command::new("cmd");
            c.arg("/C").arg(&cmd);
            c
        } else {
            let mut c = Command::new("sh");
            c.arg("-c").arg(&cmd);
            c
        };

        let status = shell
            .status()
            .with_context(|| format!("spawning process for task '{task}'"))?;

        if !status.success() {
            bail!("command for task '{task}' exited with {status}");
        }

        debug!(task = %task, "task process finished");
        Ok(())
    }
}
