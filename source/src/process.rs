//! Child process plumbing shared by the command-backed sources.

use std::io;
use std::process::{ExitStatus, Stdio};
use std::time::Duration;

use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::SourceError;

pub(crate) struct ProcessOutput {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

/// Run `command args..`, feed `input` on stdin, and collect its output.
///
/// The child is killed if the returned future is dropped (including on
/// timeout).
pub(crate) async fn run_with_input(
    command: &str,
    args: &[String],
    input: &str,
    timeout: Option<Duration>,
) -> Result<ProcessOutput, SourceError> {
    let resolved_cmd = which::which(command).map_err(|source| SourceError::NotFound {
        command: command.to_string(),
        source,
    })?;

    let mut cmd = Command::new(&resolved_cmd);
    cmd.args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let mut child = cmd.spawn().map_err(|source| SourceError::Spawn {
        command: command.to_string(),
        source,
    })?;

    let Some(mut stdin) = child.stdin.take() else {
        return Err(SourceError::Io {
            command: command.to_string(),
            source: io::Error::other("no stdin from child"),
        });
    };

    let exchange = async move {
        let write = async move {
            stdin.write_all(input.as_bytes()).await?;
            stdin.shutdown().await
        };
        let (written, output) = tokio::join!(write, child.wait_with_output());
        match written {
            // The child may exit without reading everything; its exit status tells the story.
            Err(e) if e.kind() != io::ErrorKind::BrokenPipe => return Err(e),
            _ => {}
        }
        output
    };

    let output = match timeout {
        Some(limit) => tokio::time::timeout(limit, exchange)
            .await
            .map_err(|_| SourceError::Timeout {
                command: command.to_string(),
                timeout: limit,
            })?,
        None => exchange.await,
    }
    .map_err(|source| SourceError::Io {
        command: command.to_string(),
        source,
    })?;

    tracing::debug!(
        command,
        status = %output.status,
        stdout_bytes = output.stdout.len(),
        "Typo source process finished"
    );

    Ok(ProcessOutput {
        status: output.status,
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    })
}
