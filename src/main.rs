use std::sync::Arc;

use lingoflow_core::config::Config;
use lingoflow_core::logging::{init_tracing, LogConfig};
use lingoflow_core::session::UserSession;
use lingoflow_core::store::Store;
use lingoflow_core::sync::reconcile::reconcile;
use lingoflow_core::sync::relay::spawn_relay;
use lingoflow_core::sync::remote::HttpRemote;
use tokio::sync::broadcast;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let config = Config::from_env();

    init_tracing(&LogConfig {
        log_level: config.log_level.clone(),
        enable_file_logs: config.enable_file_logs,
        log_dir: config.log_dir.clone(),
    });
    tracing::info!("Starting lingoflow-core");

    let store = Arc::new(Store::open(&config.sled_path).expect("Failed to open sled database"));
    tracing::info!(
        decks = store.decks().len(),
        words = store.words().len(),
        "Loaded local state"
    );

    let (shutdown_tx, _) = broadcast::channel::<()>(8);

    let relay_handle = if config.remote.enabled {
        let remote = Arc::new(HttpRemote::new(&config.remote));

        if config.remote.user_id.trim().is_empty() {
            tracing::warn!("Remote sync enabled without REMOTE_USER_ID, staying offline");
            None
        } else {
            store.set_session(Some(UserSession::new(&config.remote.user_id)));

            let (relay_tx, relay_handle) =
                spawn_relay(remote.clone(), shutdown_tx.subscribe());
            store.attach_relay(relay_tx);

            match reconcile(&store, remote.as_ref()).await {
                Ok(report) => tracing::info!(
                    pushed_decks = report.pushed_decks,
                    pushed_words = report.pushed_words,
                    pulled_decks = report.pulled_decks,
                    pulled_words = report.pulled_words,
                    "Reconciliation finished"
                ),
                Err(e) => tracing::error!(error = %e, "Reconciliation aborted"),
            }

            Some(relay_handle)
        }
    } else {
        None
    };

    shutdown_signal().await;
    let _ = shutdown_tx.send(());

    if let Some(handle) = relay_handle {
        // The relay drains its queue before exiting.
        if let Err(e) = handle.await {
            tracing::error!(error = %e, "Relay task panicked");
        }
    }

    tracing::info!("Flushing store before exit");
    if let Err(e) = store.flush() {
        tracing::error!(error = %e, "Failed to flush store before exit");
    }
    tracing::info!("Shutdown complete");
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        let mut sigterm = tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler");
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {},
            _ = sigterm.recv() => {},
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }

    tracing::info!("Shutdown signal received");
}
