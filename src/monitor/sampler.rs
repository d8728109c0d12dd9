use super::{BanClassifier, PageFetcher, SampleResult, Shutdown, Target, observe};
use crate::config::ConfirmationConfig;
use chrono::{DateTime, Utc};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimedSample {
    pub at: DateTime<Utc>,
    pub result: SampleResult,
}

/// Result of one confirmation pass. Logged, then dropped.
#[derive(Debug, Clone)]
pub struct ConfirmationOutcome {
    pub confirmed: bool,
    pub samples: Vec<TimedSample>,
    pub fresh_count: u32,
    pub error_count: u32,
    /// A stop was requested before every sample was drawn.
    pub interrupted: bool,
}

/// Re-reads the page several times before a fresh ban is trusted.
///
/// Every pass draws the full sample count even once the quorum is reached,
/// so the log always holds the complete audit trail.
#[derive(Debug, Clone, Copy)]
pub struct ConfirmationSampler {
    total_samples: u32,
    delay: Duration,
    quorum: u32,
}

impl ConfirmationSampler {
    pub fn new(total_samples: u32, delay: Duration, quorum: u32) -> Self {
        Self {
            total_samples: total_samples.max(1),
            delay,
            quorum: quorum.max(1),
        }
    }

    pub fn from_config(config: &ConfirmationConfig) -> Self {
        Self::new(
            config.samples,
            Duration::from_secs(config.sample_delay_secs),
            config.quorum,
        )
    }

    pub fn total_samples(&self) -> u32 {
        self.total_samples
    }

    pub fn quorum(&self) -> u32 {
        self.quorum
    }

    pub async fn confirm(
        &self,
        fetcher: &dyn PageFetcher,
        classifier: &dyn BanClassifier,
        target: &Target,
        shutdown: &mut Shutdown,
    ) -> ConfirmationOutcome {
        let mut samples = Vec::with_capacity(self.total_samples as usize);
        let mut fresh_count = 0u32;
        let mut error_count = 0u32;
        let mut interrupted = false;

        for i in 1..=self.total_samples {
            if i > 1 && !shutdown.sleep(self.delay).await {
                interrupted = true;
                break;
            }

            let result = observe(fetcher, classifier, target).await;
            let at = Utc::now();
            tracing::info!(
                "sample {i}/{} at {} -> {result}",
                self.total_samples,
                at.to_rfc3339()
            );

            if result.is_fresh() {
                fresh_count += 1;
            } else if result.is_error() {
                error_count += 1;
            }
            samples.push(TimedSample { at, result });
        }

        tracing::info!(
            fresh = fresh_count,
            errors = error_count,
            drawn = samples.len(),
            "ban seen in {fresh_count} of {} samples",
            self.total_samples
        );

        ConfirmationOutcome {
            confirmed: !interrupted && fresh_count >= self.quorum,
            samples,
            fresh_count,
            error_count,
            interrupted,
        }
    }
}
