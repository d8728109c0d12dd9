use tempfile::TempDir;

use super::harness::{self, RecordingChat, RecordingHandoff, ScriptedFetcher};
use banshield::error::TransportError;
use banshield::monitor::{Orchestrator, RunOutcome, Shutdown};

#[tokio::test(start_paused = true)]
async fn clean_profile_reports_every_cycle_until_stopped() {
    let dir = TempDir::new().unwrap();
    let config = harness::config_in(dir.path());
    let (tx, shutdown) = Shutdown::channel();

    let fetcher = ScriptedFetcher::always(harness::CLEAN_PAGE).stop_after(10, tx);
    let chat = RecordingChat::default();
    let handoff = RecordingHandoff::default();

    let orchestrator = Orchestrator::new(
        &config,
        harness::collaborators(&fetcher, &chat, &handoff, dir.path()),
        shutdown,
    )
    .unwrap();
    let outcome = orchestrator.run().await;

    assert_eq!(outcome, RunOutcome::Stopped { check: 10 });
    assert_eq!(fetcher.calls(), 10);

    let texts = chat.status_texts();
    assert_eq!(texts.len(), 10);
    assert_eq!(texts[0], "[OK] NO BAN (check #1)");
    assert_eq!(texts[9], "[OK] NO BAN (check #10)");
    assert!(handoff.runs().is_empty());
    assert_eq!(handoff.watchdog_launches(), 0);
}

#[tokio::test(start_paused = true)]
async fn old_ban_is_reported_but_never_confirmed() {
    let dir = TempDir::new().unwrap();
    let config = harness::config_in(dir.path());
    let (tx, shutdown) = Shutdown::channel();

    let fetcher = ScriptedFetcher::always(harness::STALE_PAGE).stop_after(3, tx);
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

    assert_eq!(outcome, RunOutcome::Stopped { check: 3 });
    // No confirmation pass: one fetch per cycle.
    assert_eq!(fetcher.calls(), 3);
    let texts = chat.status_texts();
    assert!(texts.iter().all(|t| t.starts_with("[OK] NO NEW BAN")));
    assert!(texts[0].contains("372 day(s) since last ban"));
    assert!(handoff.runs().is_empty());
}

#[tokio::test(start_paused = true)]
async fn fetch_errors_are_reported_and_polling_continues() {
    let dir = TempDir::new().unwrap();
    let config = harness::config_in(dir.path());
    let (tx, shutdown) = Shutdown::channel();

    let fetcher = ScriptedFetcher::with_results(
        vec![
            Err(TransportError::Status(503)),
            Err(TransportError::Request("connection reset".into())),
        ],
        harness::CLEAN_PAGE,
    )
    .stop_after(3, tx);
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

    assert_eq!(outcome, RunOutcome::Stopped { check: 3 });
    let texts = chat.status_texts();
    assert!(texts[0].starts_with("[ERROR]"));
    assert!(texts[0].contains("503"));
    assert!(texts[1].contains("connection reset"));
    assert_eq!(texts[2], "[OK] NO BAN (check #3)");
}

#[tokio::test(start_paused = true)]
async fn only_latest_status_message_survives() {
    let dir = TempDir::new().unwrap();
    let config = harness::config_in(dir.path());
    let (tx, shutdown) = Shutdown::channel();

    let fetcher = ScriptedFetcher::always(harness::CLEAN_PAGE).stop_after(3, tx);
    let chat = RecordingChat::default();
    let handoff = RecordingHandoff::default();

    Orchestrator::new(
        &config,
        harness::collaborators(&fetcher, &chat, &handoff, dir.path()),
        shutdown,
    )
    .unwrap()
    .run()
    .await;

    // Probe is id 1; statuses are ids 2, 3, 4. Each send removes the previous one.
    let calls = chat.calls();
    let deletes: Vec<_> = calls
        .iter()
        .filter_map(|c| match c {
            harness::ChatCall::Delete(id) => Some(*id),
            harness::ChatCall::Send(_) => None,
        })
        .collect();
    assert_eq!(deletes, vec![1, 2, 3]);

    let cursor = std::fs::read_to_string(dir.path().join(".telegram_last_message_id")).unwrap();
    assert_eq!(cursor.trim(), "4");
}
