use super::{DRY_RUN_ENV, Handoff, HandoffMode, HandoffReport};
use crate::config::HandoffConfig;
use crate::error::HandoffError;
use std::future::Future;
use std::pin::Pin;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(600);

#[cfg(windows)]
const CREATE_NEW_CONSOLE: u32 = 0x0000_0010;

/// Runs the configured command lines as child processes.
pub struct ProcessHandoff {
    command: Vec<String>,
    watchdog: Vec<String>,
    timeout: Duration,
}

impl ProcessHandoff {
    pub fn new(command: &str, watchdog_command: &str) -> Self {
        Self {
            command: split_command(command),
            watchdog: split_command(watchdog_command),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// The transfer program is killed once it outlives `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn from_config(config: &HandoffConfig) -> Self {
        Self::new(&config.command, &config.watchdog_command).with_timeout(config.timeout())
    }
}

fn split_command(line: &str) -> Vec<String> {
    line.split_whitespace().map(String::from).collect()
}

fn build_command(parts: &[String]) -> Result<Command, HandoffError> {
    let (program, args) = parts.split_first().ok_or(HandoffError::EmptyCommand)?;
    let mut cmd = Command::new(program);
    cmd.args(args);
    Ok(cmd)
}

fn spawn_error(parts: &[String], source: std::io::Error) -> HandoffError {
    HandoffError::Spawn {
        program: parts.first().cloned().unwrap_or_default(),
        source,
    }
}

impl Handoff for ProcessHandoff {
    fn run(
        &self,
        mode: HandoffMode,
    ) -> Pin<Box<dyn Future<Output = Result<HandoffReport, HandoffError>> + Send + '_>> {
        Box::pin(async move {
            let mut cmd = build_command(&self.command)?;
            match mode {
                HandoffMode::DryRun => {
                    cmd.env(DRY_RUN_ENV, "1");
                }
                HandoffMode::Live => {
                    cmd.env_remove(DRY_RUN_ENV);
                }
            }

            cmd.stdin(Stdio::null()).kill_on_drop(true);
            let output = tokio::time::timeout(self.timeout, cmd.output())
                .await
                .map_err(|_| HandoffError::Timeout {
                    program: self.command.first().cloned().unwrap_or_default(),
                    secs: self.timeout.as_secs(),
                })?
                .map_err(|e| spawn_error(&self.command, e))?;

            Ok(HandoffReport {
                exit_code: output.status.code(),
                stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            })
        })
    }

    fn launch_watchdog(&self) -> Result<(), HandoffError> {
        let mut cmd = build_command(&self.watchdog)?;
        cmd.stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(false);

        #[cfg(unix)]
        cmd.process_group(0);
        #[cfg(windows)]
        cmd.creation_flags(CREATE_NEW_CONSOLE);

        let child = cmd.spawn().map_err(|e| spawn_error(&self.watchdog, e))?;
        tracing::info!(pid = child.id(), "watchdog launched");
        Ok(())
    }
}
