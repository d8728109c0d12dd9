use super::{
    BanClassifier, BanKind, ConfirmationSampler, FiredEvent, PageFetcher, SampleResult, Shutdown,
    SimulationPlan, Target, observe,
};
use crate::channels::{NotificationChannel, Notice};
use crate::config::Config;
use crate::error::ConfigError;
use crate::handoff::{Handoff, HandoffMode};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    Live,
    /// Rehearsal: one fabricated detection, hand-off in no-effect mode.
    Rehearsal,
}

/// How a run ended. Every variant maps to a clean process exit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// A fresh ban was confirmed and the transfer program ran.
    HandedOff {
        mode: HandoffMode,
        exit_code: Option<i32>,
        check: u64,
    },
    /// The rehearsal trigger fired and the dry-run hand-off ran.
    Rehearsed {
        kind: BanKind,
        exit_code: Option<i32>,
        check: u64,
    },
    /// A stop was requested at a wait point.
    Stopped { check: u64 },
}

/// Everything the orchestrator talks to besides the clock.
pub struct Collaborators {
    pub fetcher: Box<dyn PageFetcher>,
    pub classifier: Box<dyn BanClassifier>,
    pub channel: NotificationChannel,
    pub handoff: Box<dyn Handoff>,
}

enum Step {
    Continue,
    Done(RunOutcome),
}

/// The poll loop. Strictly sequential: fetch, classify, maybe confirm,
/// notify, maybe hand off, sleep.
pub struct Orchestrator {
    target: Target,
    mode: RunMode,
    poll_interval: Duration,
    sampler: ConfirmationSampler,
    simulation: Option<SimulationPlan>,
    fetcher: Box<dyn PageFetcher>,
    classifier: Box<dyn BanClassifier>,
    channel: NotificationChannel,
    handoff: Box<dyn Handoff>,
    shutdown: Shutdown,
    check_count: u64,
}

impl Orchestrator {
    /// Fails only when no usable target is configured.
    pub fn new(
        config: &Config,
        collaborators: Collaborators,
        shutdown: Shutdown,
    ) -> Result<Self, ConfigError> {
        let target = config.target()?;
        let mode = if config.dry_run {
            RunMode::Rehearsal
        } else {
            RunMode::Live
        };
        let simulation = (mode == RunMode::Rehearsal).then(SimulationPlan::draw);

        let Collaborators {
            fetcher,
            classifier,
            channel,
            handoff,
        } = collaborators;

        Ok(Self {
            target,
            mode,
            poll_interval: config.poll_interval(),
            sampler: ConfirmationSampler::from_config(&config.confirmation),
            simulation,
            fetcher,
            classifier,
            channel,
            handoff,
            shutdown,
            check_count: 0,
        })
    }

    /// Replace the drawn rehearsal plan. Has no effect in live mode.
    pub fn with_simulation_plan(mut self, plan: SimulationPlan) -> Self {
        if self.mode == RunMode::Rehearsal {
            self.simulation = Some(plan);
        }
        self
    }

    pub fn mode(&self) -> RunMode {
        self.mode
    }

    pub fn simulation_plan(&self) -> Option<&SimulationPlan> {
        self.simulation.as_ref()
    }

    pub async fn run(mut self) -> RunOutcome {
        match self.simulation.as_ref() {
            Some(plan) => tracing::info!(
                trigger = plan.trigger_index(),
                kind = %plan.kind(),
                "rehearsal mode: a simulated ban will fire at check #{}",
                plan.trigger_index()
            ),
            None => tracing::info!("live mode: ban monitoring active"),
        }

        if let Err(error) = self.channel.reset().await {
            tracing::warn!(%error, "channel reset failed");
        }

        loop {
            match self.poll_once().await {
                Step::Done(outcome) => return outcome,
                Step::Continue => {
                    if !self.shutdown.sleep(self.poll_interval).await {
                        tracing::info!(check = self.check_count, "stop requested, leaving poll loop");
                        return RunOutcome::Stopped {
                            check: self.check_count,
                        };
                    }
                }
            }
        }
    }

    async fn poll_once(&mut self) -> Step {
        self.check_count += 1;
        let check = self.check_count;
        tracing::info!(check, target = %self.target, "checking profile");

        let fired = self
            .simulation
            .as_mut()
            .and_then(|plan| plan.maybe_fire(check));
        if let Some(event) = fired {
            return Step::Done(self.rehearse(event).await);
        }

        match observe(&*self.fetcher, &*self.classifier, &self.target).await {
            SampleResult::Error(detail) => {
                tracing::warn!(check, "check failed: {detail}");
                self.publish(Notice::Error { detail }).await;
                Step::Continue
            }
            SampleResult::Fresh(text) => self.confirm_and_hand_off(text).await,
            SampleResult::Stale(text) => {
                tracing::info!(check, "no new ban (old ban on record: {text})");
                self.publish(Notice::StaleSanction { check, text }).await;
                Step::Continue
            }
            SampleResult::Clean => {
                tracing::info!(check, "no ban");
                self.publish(Notice::NoSanction { check }).await;
                Step::Continue
            }
        }
    }

    async fn confirm_and_hand_off(&mut self, text: String) -> Step {
        let check = self.check_count;
        tracing::warn!(check, "fresh ban reported ({text}), starting confirmation pass");

        let outcome = self
            .sampler
            .confirm(
                &*self.fetcher,
                &*self.classifier,
                &self.target,
                &mut self.shutdown,
            )
            .await;

        if outcome.interrupted {
            tracing::info!(check, "stop requested during confirmation");
            return Step::Done(RunOutcome::Stopped { check });
        }

        if !outcome.confirmed {
            tracing::info!(
                check,
                fresh = outcome.fresh_count,
                quorum = self.sampler.quorum(),
                "confirmation failed, false positive suppressed"
            );
            self.publish(Notice::Safeguard).await;
            return Step::Continue;
        }

        self.publish(Notice::Alert { text }).await;

        // A rehearsal never performs the real action, even on a real detection.
        let mode = match self.mode {
            RunMode::Live => HandoffMode::Live,
            RunMode::Rehearsal => HandoffMode::DryRun,
        };
        tracing::warn!(check, ?mode, "ban confirmed, starting hand-off");
        let exit_code = self.hand_off(mode).await;

        if mode == HandoffMode::Live
            && let Err(error) = self.handoff.launch_watchdog()
        {
            tracing::error!(%error, "failed to launch watchdog");
        }

        tracing::info!(check, "hand-off finished, shutting down");
        Step::Done(RunOutcome::HandedOff {
            mode,
            exit_code,
            check,
        })
    }

    async fn rehearse(&mut self, event: FiredEvent) -> RunOutcome {
        tracing::warn!(
            check = event.check,
            kind = %event.kind,
            "[DRY-RUN] simulated {} ban fired",
            event.kind
        );
        self.publish(Notice::Simulated {
            kind: event.kind,
            check: event.check,
        })
        .await;

        let exit_code = self.hand_off(HandoffMode::DryRun).await;
        tracing::info!("[DRY-RUN] simulation finished, shutting down");
        RunOutcome::Rehearsed {
            kind: event.kind,
            exit_code,
            check: event.check,
        }
    }

    async fn hand_off(&self, mode: HandoffMode) -> Option<i32> {
        match self.handoff.run(mode).await {
            Ok(report) if report.succeeded() => {
                tracing::info!(?mode, "hand-off completed: {}", report.stdout.trim());
                report.exit_code
            }
            Ok(report) => {
                tracing::error!(
                    ?mode,
                    exit_code = ?report.exit_code,
                    "hand-off failed: {}",
                    report.stderr.trim()
                );
                report.exit_code
            }
            Err(error) => {
                tracing::error!(%error, ?mode, "hand-off could not start");
                None
            }
        }
    }

    async fn publish(&self, notice: Notice) {
        if let Err(error) = self.channel.notify(&notice).await {
            tracing::warn!(%error, "status notification failed");
        }
    }
}
