use tempfile::TempDir;

use super::harness::{self, ChatCall, RecordingChat, RecordingHandoff, ScriptedFetcher};
use banshield::app::{self, EXIT_CONFIG_ERROR};
use banshield::channels::RESET_PROBE_TEXT;
use banshield::monitor::Shutdown;

#[tokio::test(start_paused = true)]
async fn missing_target_exits_with_config_error_and_touches_nothing() {
    let dir = TempDir::new().unwrap();
    let mut config = harness::config_in(dir.path());
    config.profile_to_watch = String::new();

    let fetcher = ScriptedFetcher::always(harness::CLEAN_PAGE);
    let chat = RecordingChat::default();
    let handoff = RecordingHandoff::default();

    let code = app::launch(
        &config,
        harness::collaborators(&fetcher, &chat, &handoff, dir.path()),
        Shutdown::never(),
    )
    .await;

    assert_eq!(code, EXIT_CONFIG_ERROR);
    assert_eq!(fetcher.calls(), 0);
    assert!(chat.calls().is_empty());
    assert!(handoff.runs().is_empty());
}

#[tokio::test(start_paused = true)]
async fn unparseable_target_exits_with_config_error() {
    let dir = TempDir::new().unwrap();
    let mut config = harness::config_in(dir.path());
    config.profile_to_watch = "not a url".into();

    let fetcher = ScriptedFetcher::always(harness::CLEAN_PAGE);
    let chat = RecordingChat::default();
    let handoff = RecordingHandoff::default();

    let code = app::launch(
        &config,
        harness::collaborators(&fetcher, &chat, &handoff, dir.path()),
        Shutdown::never(),
    )
    .await;

    assert_eq!(code, EXIT_CONFIG_ERROR);
    assert_eq!(fetcher.calls(), 0);
}

#[tokio::test(start_paused = true)]
async fn startup_resets_channel_before_first_check() {
    let dir = TempDir::new().unwrap();
    let config = harness::config_in(dir.path());
    let (tx, shutdown) = Shutdown::channel();

    let fetcher = ScriptedFetcher::always(harness::CLEAN_PAGE).stop_after(1, tx);
    let chat = RecordingChat::default();
    let handoff = RecordingHandoff::default();

    app::launch(
        &config,
        harness::collaborators(&fetcher, &chat, &handoff, dir.path()),
        shutdown,
    )
    .await;

    let calls = chat.calls();
    assert_eq!(calls[0], ChatCall::Send(RESET_PROBE_TEXT.into()));
    assert_eq!(calls[1], ChatCall::Delete(1));
    assert!(matches!(&calls[2], ChatCall::Send(text) if text.starts_with("[OK] NO BAN")));
}
