//! Infrastructure implementation of the `CommandRunner` port.
//!
//! `TokioCommandRunner` is the production implementation that uses tokio
//! for async process execution with an optional timeout and guaranteed kill.

use std::process::{Output, Stdio};
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::io::AsyncReadExt;
use tracing::debug;

use crate::application::ports::CommandRunner;

/// Production `CommandRunner`: uses tokio for async process execution.
///
/// With no timeout configured the child is awaited indefinitely; long
/// applies and destroys are bounded by the engine, not by us. When a timeout
/// fires, `tokio::select!` kills the child explicitly instead of relying on
/// dropping the future.
#[derive(Debug, Clone, Default)]
pub struct TokioCommandRunner {
    timeout: Option<Duration>,
}

impl TokioCommandRunner {
    #[must_use]
    pub fn new(timeout: Option<Duration>) -> Self {
        Self { timeout }
    }

    /// Run a program with an explicit timeout. `None` waits indefinitely.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned or exceeds `timeout`.
    /// On timeout the child is killed, not left orphaned.
    pub async fn run_with_timeout(
        &self,
        program: &str,
        args: &[&str],
        env: &[(String, String)],
        timeout: Option<Duration>,
    ) -> Result<Output> {
        debug!(program, ?args, "spawning");
        let mut child = tokio::process::Command::new(program)
            .args(args)
            .envs(env.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .with_context(|| format!("failed to spawn {program}"))?;

        let mut stdout_handle = child.stdout.take();
        let mut stderr_handle = child.stderr.take();

        // Read stdout/stderr CONCURRENTLY with wait() to avoid pipe deadlock.
        // A chatty child blocks on a full pipe and wait() never resolves.
        let collect = async {
            let (status, stdout, stderr) = tokio::join!(
                child.wait(),
                async {
                    let mut buf = Vec::new();
                    if let Some(ref mut h) = stdout_handle {
                        let _ = h.read_to_end(&mut buf).await;
                    }
                    buf
                },
                async {
                    let mut buf = Vec::new();
                    if let Some(ref mut h) = stderr_handle {
                        let _ = h.read_to_end(&mut buf).await;
                    }
                    buf
                },
            );
            Ok::<_, anyhow::Error>(Output {
                status: status.with_context(|| format!("waiting for {program}"))?,
                stdout,
                stderr,
            })
        };

        let output = match timeout {
            None => collect.await?,
            Some(limit) => {
                tokio::select! {
                    result = collect => result?,
                    () = tokio::time::sleep(limit) => {
                        let _ = child.kill().await;
                        anyhow::bail!("{program} timed out after {}s", limit.as_secs())
                    }
                }
            }
        };
        debug!(program, status = %output.status, "finished");
        Ok(output)
    }
}

impl CommandRunner for TokioCommandRunner {
    async fn run(
        &self,
        program: &str,
        args: &[&str],
        env: &[(String, String)],
    ) -> Result<Output> {
        self.run_with_timeout(program, args, env, self.timeout).await
    }
}
