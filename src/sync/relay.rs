use std::sync::Arc;

use tokio::sync::broadcast;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;

use crate::sync::remote::{DeckRow, DeckRowPatch, RemoteBackend, WordRow, WordRowPatch};

/// One outbound write, scoped to a single entity and already translated to
/// remote field names. Ops are independent: no batching, no ordering
/// guarantee across in-flight calls, no retry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayOp {
    InsertWords(Vec<WordRow>),
    UpdateWord { id: String, changes: WordRowPatch },
    DeleteWord { id: String },
    InsertDeck(DeckRow),
    UpdateDeck { id: String, changes: DeckRowPatch },
    DeleteDeck { id: String },
}

impl RelayOp {
    fn kind(&self) -> &'static str {
        match self {
            Self::InsertWords(_) => "insert_words",
            Self::UpdateWord { .. } => "update_word",
            Self::DeleteWord { .. } => "delete_word",
            Self::InsertDeck(_) => "insert_deck",
            Self::UpdateDeck { .. } => "update_deck",
            Self::DeleteDeck { .. } => "delete_deck",
        }
    }
}

/// Spawns the relay worker: an unbounded queue consumed by a single task
/// that forwards each operation to the remote backend. Failures are logged
/// and dropped; the local mutation that produced the op is never rolled
/// back. On shutdown the worker drains whatever is already queued, then
/// exits.
pub fn spawn_relay(
    remote: Arc<dyn RemoteBackend>,
    mut shutdown_rx: broadcast::Receiver<()>,
) -> (UnboundedSender<RelayOp>, JoinHandle<()>) {
    let (tx, mut rx) = mpsc::unbounded_channel::<RelayOp>();

    let handle = tokio::spawn(async move {
        loop {
            tokio::select! {
                op = rx.recv() => {
                    match op {
                        Some(op) => apply(remote.as_ref(), op).await,
                        None => break,
                    }
                }
                _ = shutdown_rx.recv() => {
                    rx.close();
                    while let Some(op) = rx.recv().await {
                        apply(remote.as_ref(), op).await;
                    }
                    break;
                }
            }
        }
        tracing::info!("Relay worker exited");
    });

    (tx, handle)
}

async fn apply(remote: &dyn RemoteBackend, op: RelayOp) {
    let kind = op.kind();
    let result = match &op {
        RelayOp::InsertWords(rows) => remote.insert_words(rows).await,
        RelayOp::UpdateWord { id, changes } => remote.update_word(id, changes).await,
        RelayOp::DeleteWord { id } => remote.delete_word(id).await,
        RelayOp::InsertDeck(row) => remote.insert_decks(std::slice::from_ref(row)).await,
        RelayOp::UpdateDeck { id, changes } => remote.update_deck(id, changes).await,
        RelayOp::DeleteDeck { id } => remote.delete_deck(id).await,
    };

    if let Err(e) = result {
        // Best effort only: the next full reconciliation is the recovery path.
        tracing::warn!(op = kind, error = %e, "Relay write failed, dropping operation");
    }
}
