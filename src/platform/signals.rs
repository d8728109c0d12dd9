use tokio::sync::watch;

/// Flip `tx` to `true` on Ctrl-C or, on unix, SIGTERM.
pub fn spawn_stop_listener(tx: watch::Sender<bool>) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        wait_for_stop_signal().await;
        tracing::info!("stop signal received");
        let _ = tx.send(true);
    })
}

#[cfg(unix)]
async fn wait_for_stop_signal() {
    use tokio::signal::unix::{SignalKind, signal};

    match signal(SignalKind::terminate()) {
        Ok(mut term) => {
            tokio::select! {
                Ok(()) = tokio::signal::ctrl_c() => {}
                _ = term.recv() => {}
            }
        }
        Err(error) => {
            tracing::warn!(%error, "SIGTERM handler unavailable, listening for Ctrl-C only");
            ctrl_c_or_never().await;
        }
    }
}

#[cfg(not(unix))]
async fn wait_for_stop_signal() {
    ctrl_c_or_never().await;
}

/// A failed Ctrl-C registration must not look like a stop request.
async fn ctrl_c_or_never() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::warn!(%error, "Ctrl-C handler unavailable");
        std::future::pending::<()>().await;
    }
}
