//! Launching the external transfer program and its companion watchdog.

mod process;

pub use process::ProcessHandoff;

use crate::error::HandoffError;
use std::future::Future;
use std::pin::Pin;

/// Environment flag the transfer program honours by only listing what it
/// would move.
pub const DRY_RUN_ENV: &str = "BANSHIELD_DRY_RUN";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandoffMode {
    Live,
    DryRun,
}

/// Captured result of one hand-off run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HandoffReport {
    /// `None` when the process was killed by a signal.
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl HandoffReport {
    pub fn succeeded(&self) -> bool {
        self.exit_code == Some(0)
    }
}

pub trait Handoff: Send + Sync {
    /// Run the transfer program to completion.
    fn run(
        &self,
        mode: HandoffMode,
    ) -> Pin<Box<dyn Future<Output = Result<HandoffReport, HandoffError>> + Send + '_>>;

    /// Start the watchdog detached. Never awaited.
    fn launch_watchdog(&self) -> Result<(), HandoffError>;
}
