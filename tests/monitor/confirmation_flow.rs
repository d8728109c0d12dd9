use tempfile::TempDir;

use super::harness::{self, FRESH_PAGE, RecordingChat, RecordingHandoff, ScriptedFetcher};
use banshield::app::{self, EXIT_OK};
use banshield::handoff::HandoffMode;
use banshield::monitor::{Orchestrator, RunOutcome, Shutdown};

#[tokio::test(start_paused = true)]
async fn confirmed_ban_hands_off_once_and_launches_watchdog() {
    let dir = TempDir::new().unwrap();
    let config = harness::config_in(dir.path());

    let fetcher = ScriptedFetcher::new(
        &[FRESH_PAGE, FRESH_PAGE, FRESH_PAGE, harness::CLEAN_PAGE, FRESH_PAGE],
        harness::CLEAN_PAGE,
    );
    let chat = RecordingChat::default();
    let handoff = RecordingHandoff::default();

    let code = app::launch(
        &config,
        harness::collaborators(&fetcher, &chat, &handoff, dir.path()),
        Shutdown::never(),
    )
    .await;

    assert_eq!(code, EXIT_OK);
    // Initial check plus the full ten-sample pass.
    assert_eq!(fetcher.calls(), 11);
    assert_eq!(handoff.runs(), vec![HandoffMode::Live]);
    assert_eq!(handoff.watchdog_launches(), 1);

    let texts = chat.status_texts();
    assert_eq!(texts.len(), 1);
    assert!(texts[0].starts_with("[ALERT]"));
    assert!(texts[0].contains("0 day(s) since last ban"));
}

#[tokio::test(start_paused = true)]
async fn confirmation_pass_spaces_samples_by_delay() {
    let dir = TempDir::new().unwrap();
    let config = harness::config_in(dir.path());

    let fetcher = ScriptedFetcher::always(FRESH_PAGE);
    let chat = RecordingChat::default();
    let handoff = RecordingHandoff::default();

    let started = tokio::time::Instant::now();
    let outcome = Orchestrator::new(
        &config,
        harness::collaborators(&fetcher, &chat, &handoff, dir.path()),
        Shutdown::never(),
    )
    .unwrap()
    .run()
    .await;

    assert_eq!(
        outcome,
        RunOutcome::HandedOff {
            mode: HandoffMode::Live,
            exit_code: Some(0),
            check: 1,
        }
    );
    // Nine gaps of five seconds; no poll sleep before a terminal cycle.
    assert_eq!(started.elapsed().as_secs(), 45);
}

#[tokio::test(start_paused = true)]
async fn lone_fresh_reading_is_suppressed_and_polling_resumes() {
    let dir = TempDir::new().unwrap();
    let config = harness::config_in(dir.path());
    let (tx, shutdown) = Shutdown::channel();

    // Cycle 1 + one fresh sample out of ten, then cycle 2 clean.
    let fetcher =
        ScriptedFetcher::new(&[FRESH_PAGE, FRESH_PAGE], harness::CLEAN_PAGE).stop_after(12, tx);
    let chat = RecordingChat::default();
    let handoff = RecordingHandoff::default();

    let outcome = Orchestrator::new(
        &config,
        harness::collaborators(&fetcher, &chat, &handoff, dir.path()),
        shutdown,
    )
    .unwrap()
    .run()
    .await;

    assert_eq!(outcome, RunOutcome::Stopped { check: 2 });
    assert!(handoff.runs().is_empty());
    assert_eq!(handoff.watchdog_launches(), 0);

    let texts = chat.status_texts();
    assert!(texts[0].starts_with("[SAFEGUARD]"));
    assert_eq!(texts[1], "[OK] NO BAN (check #2)");
}

#[tokio::test(start_paused = true)]
async fn stop_during_confirmation_skips_hand_off() {
    let dir = TempDir::new().unwrap();
    let config = harness::config_in(dir.path());
    let (tx, shutdown) = Shutdown::channel();

    let fetcher = ScriptedFetcher::always(FRESH_PAGE).stop_after(3, tx);
    let chat = RecordingChat::default();
    let handoff = RecordingHandoff::default();

    let outcome = Orchestrator::new(
        &config,
        harness::collaborators(&fetcher, &chat, &handoff, dir.path()),
        shutdown,
    )
    .unwrap()
    .run()
    .await;

    assert_eq!(outcome, RunOutcome::Stopped { check: 1 });
    assert_eq!(fetcher.calls(), 3);
    assert!(handoff.runs().is_empty());
}

#[tokio::test(start_paused = true)]
async fn failing_hand_off_still_ends_the_run_cleanly() {
    let dir = TempDir::new().unwrap();
    let config = harness::config_in(dir.path());

    let fetcher = ScriptedFetcher::always(FRESH_PAGE);
    let chat = RecordingChat::default();
    let handoff = RecordingHandoff::exiting_with(2);

    let code = app::launch(
        &config,
        harness::collaborators(&fetcher, &chat, &handoff, dir.path()),
        Shutdown::never(),
    )
    .await;

    assert_eq!(code, EXIT_OK);
    assert_eq!(handoff.runs().len(), 1);
    assert_eq!(handoff.watchdog_launches(), 1);
}

#[tokio::test(start_paused = true)]
async fn unstartable_hand_off_and_watchdog_still_end_the_run() {
    let dir = TempDir::new().unwrap();
    let config = harness::config_in(dir.path());

    let fetcher = ScriptedFetcher::always(FRESH_PAGE);
    let chat = RecordingChat::default();
    let handoff = RecordingHandoff::unstartable();

    let outcome = Orchestrator::new(
        &config,
        harness::collaborators(&fetcher, &chat, &handoff, dir.path()),
        Shutdown::never(),
    )
    .unwrap()
    .run()
    .await;

    assert_eq!(
        outcome,
        RunOutcome::HandedOff {
            mode: HandoffMode::Live,
            exit_code: None,
            check: 1,
        }
    );
    assert_eq!(handoff.runs(), vec![HandoffMode::Live]);
    assert_eq!(handoff.watchdog_launches(), 1);
}

#[tokio::test(start_paused = true)]
async fn unstartable_hand_off_exits_cleanly() {
    let dir = TempDir::new().unwrap();
    let config = harness::config_in(dir.path());

    let fetcher = ScriptedFetcher::always(FRESH_PAGE);
    let chat = RecordingChat::default();
    let handoff = RecordingHandoff::unstartable();

    let code = app::launch(
        &config,
        harness::collaborators(&fetcher, &chat, &handoff, dir.path()),
        Shutdown::never(),
    )
    .await;

    assert_eq!(code, EXIT_OK);
    assert_eq!(handoff.watchdog_launches(), 1);
}
