//! External static file server spawn.
//!
//! Presentation is delegated to whatever command the config names
//! (default `npx live-server`). The child inherits stdio and this process
//! blocks until it exits; ctrl-C reaches the child via signal inheritance.

use std::path::Path;
use std::process::{Command, Stdio};

use artifactview_shared::{ArtifactViewError, Result};
use tracing::{info, instrument};

/// Probe the server command, spawn it rooted at `root`, and block until exit.
#[instrument(skip_all, fields(command, root = %root.display()))]
pub fn serve_directory(command: &str, args: &[String], root: &Path) -> Result<()> {
    probe_command(command)?;

    info!(command, root = %root.display(), "starting file server");

    spawn_and_wait(command, args, root)
}

/// Run `<command> --version` to confirm the server runtime exists.
fn probe_command(command: &str) -> Result<()> {
    let check = Command::new(command).arg("--version").output();

    match check {
        Ok(output) if output.status.success() => {
            let version = String::from_utf8_lossy(&output.stdout);
            info!(command, version = %version.trim(), "file server runtime found");
            Ok(())
        }
        _ => Err(ArtifactViewError::Server(format!(
            "'{command}' not found. Install it or change [server] command in the config file."
        ))),
    }
}

/// Spawn the server with stdio inherited and wait for it to finish.
fn spawn_and_wait(command: &str, args: &[String], root: &Path) -> Result<()> {
    let mut child = Command::new(command)
        .args(args)
        .arg(root)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .map_err(|e| ArtifactViewError::Server(format!("failed to spawn {command}: {e}")))?;

    let status = child
        .wait()
        .map_err(|e| ArtifactViewError::Server(format!("failed to wait for {command}: {e}")))?;

    if !status.success() {
        return Err(ArtifactViewError::Server(format!(
            "{command} exited with status: {}",
            status.code().unwrap_or(-1)
        )));
    }

    Ok(())
}
