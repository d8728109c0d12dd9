//! Detection and confirmation engine.

mod classifier;
mod fetcher;
mod orchestrator;
mod sampler;
mod shutdown;
mod simulation;
mod target;

pub use classifier::{BAN_AGE_PHRASE, BanClassifier, TextPatternClassifier, Verdict};
pub use fetcher::{HttpPageFetcher, PageFetcher};
pub use orchestrator::{Collaborators, Orchestrator, RunMode, RunOutcome};
pub use sampler::{ConfirmationOutcome, ConfirmationSampler, TimedSample};
pub use shutdown::Shutdown;
pub use simulation::{BanKind, FiredEvent, SimulationPlan, TRIGGER_RANGE};
pub use target::Target;

use crate::error::ShieldError;
use std::fmt;

/// One observation of the profile page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SampleResult {
    Fresh(String),
    Stale(String),
    Clean,
    Error(String),
}

impl SampleResult {
    pub fn is_fresh(&self) -> bool {
        matches!(self, Self::Fresh(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}

impl From<Verdict> for SampleResult {
    fn from(verdict: Verdict) -> Self {
        match verdict {
            Verdict::Fresh(text) => Self::Fresh(text),
            Verdict::Stale(text) => Self::Stale(text),
            Verdict::Clean => Self::Clean,
        }
    }
}

impl fmt::Display for SampleResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fresh(text) => write!(f, "[ALERT] BAN DETECTED: {text}"),
            Self::Stale(text) => write!(f, "[OK] NO BAN (old ban found: {text})"),
            Self::Clean => f.write_str("[OK] NO BAN"),
            Self::Error(detail) => write!(f, "[ERROR] {detail}"),
        }
    }
}

/// One fetch followed by one classification. Failures of either step come
/// back as [`SampleResult::Error`].
pub async fn observe(
    fetcher: &dyn PageFetcher,
    classifier: &dyn BanClassifier,
    target: &Target,
) -> SampleResult {
    let markup = match fetcher.fetch(target).await {
        Ok(markup) => markup,
        Err(error) => return SampleResult::Error(ShieldError::from(error).to_string()),
    };
    match classifier.classify(&markup) {
        Ok(verdict) => verdict.into(),
        Err(error) => SampleResult::Error(error.to_string()),
    }
}
