//! Child process launch with inherited standard streams.
//!
//! The child writes straight to the caller's terminal; nothing is captured.
//! The thread count is passed as a per-child environment override, so the
//! calling process's own environment is never modified.

use std::io;
use std::process::Stdio;

use tokio::process::Command;

use crate::command::Invocation;
use crate::error::ShimError;

/// Spawn `invocation`, wait for it, and return its exit code.
///
/// `env` entries are added to the child's inherited environment. A child
/// terminated by a signal reports `-1`. A non-zero exit code is returned,
/// not treated as an error.
pub async fn run_inherited(
    invocation: &Invocation,
    env: &[(&str, &str)],
) -> Result<i32, ShimError> {
    let mut cmd = Command::new(invocation.program());
    cmd.args(invocation.args())
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .kill_on_drop(true);

    for (key, value) in env {
        cmd.env(key, value);
    }

    let mut child = cmd.spawn().map_err(|e| spawn_error(invocation.program(), e))?;
    tracing::debug!(pid = ?child.id(), program = %invocation.program(), "Child process started");

    let status = child.wait().await.map_err(ShimError::Wait)?;
    Ok(status.code().unwrap_or(-1))
}

fn spawn_error(program: &str, source: io::Error) -> ShimError {
    if source.kind() == io::ErrorKind::NotFound {
        ShimError::ToolNotFound {
            program: program.to_string(),
        }
    } else {
        ShimError::Spawn {
            program: program.to_string(),
            source,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
