use crate::store::Store;
use crate::sync::remote::{
    deck_from_row, deck_insert_row, word_from_row, word_insert_row, RemoteBackend, RemoteError,
};

/// What a reconciliation pass did, for logging and user-facing summaries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    pub pushed_decks: usize,
    pub pushed_words: usize,
    pub pulled_decks: usize,
    pub pulled_words: usize,
}

/// One-shot reconciliation, run once per authenticated session start.
///
/// Per collection, whichever side is non-empty wins, remote over local:
/// an empty remote collection receives the local one as a single bulk
/// insert; a non-empty remote collection overwrites the local one
/// wholesale. There is no merging, versioning, or conflict detection, and
/// local-only entities are silently lost on pull. This is the documented
/// behavior; smarter strategies belong behind `RemoteBackend`, not here.
///
/// Any fetch error aborts the whole pass. A push error abandons that
/// collection's push only; the pass still proceeds to the pull phase.
pub async fn reconcile(
    store: &Store,
    remote: &dyn RemoteBackend,
) -> Result<ReconcileReport, RemoteError> {
    let Some(user) = store.session() else {
        return Ok(ReconcileReport::default());
    };

    let remote_decks = remote.fetch_decks().await?;
    let remote_words = remote.fetch_words().await?;

    let local_decks = store.decks();
    let local_words = store.words();

    let mut report = ReconcileReport::default();

    if remote_decks.is_empty() && !local_decks.is_empty() {
        let rows: Vec<_> = local_decks
            .iter()
            .map(|d| deck_insert_row(d, &user.user_id))
            .collect();
        match remote.insert_decks(&rows).await {
            Ok(()) => {
                report.pushed_decks = rows.len();
                tracing::info!(count = rows.len(), "Pushed local decks to empty remote");
            }
            Err(e) => tracing::warn!(error = %e, "Deck push failed, abandoning this collection"),
        }
    }

    if remote_words.is_empty() && !local_words.is_empty() {
        let rows: Vec<_> = local_words
            .iter()
            .map(|w| word_insert_row(w, &user.user_id))
            .collect();
        match remote.insert_words(&rows).await {
            Ok(()) => {
                report.pushed_words = rows.len();
                tracing::info!(count = rows.len(), "Pushed local words to empty remote");
            }
            Err(e) => tracing::warn!(error = %e, "Word push failed, abandoning this collection"),
        }
    }

    if !remote_decks.is_empty() {
        let decks: Vec<_> = remote_decks.iter().map(deck_from_row).collect();
        report.pulled_decks = decks.len();
        tracing::info!(count = decks.len(), "Pulling decks, overwriting local state");
        store.replace_decks(decks);
    }

    if !remote_words.is_empty() {
        let words: Vec<_> = remote_words
            .iter()
            .map(|row| word_from_row(row, &local_words))
            .collect();
        report.pulled_words = words.len();
        tracing::info!(count = words.len(), "Pulling words, overwriting local state");
        store.replace_words(words);
    }

    Ok(report)
}
