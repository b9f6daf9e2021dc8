use serde::{Deserialize, Serialize};

use crate::store::operations::decks::Deck;
use crate::store::operations::filters::LanguageFilter;
use crate::store::operations::history::HistoryEntry;
use crate::store::operations::words::Word;
use crate::store::StoreError;

/// Single versionless key the whole snapshot is persisted under.
pub const SNAPSHOT_KEY: &str = "lingoflow-storage";

/// The entire persisted application state: one JSON blob, written in full on
/// every mutation. The authenticated user is deliberately excluded; sessions
/// live outside the snapshot.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AppSnapshot {
    pub words: Vec<Word>,
    pub decks: Vec<Deck>,
    pub language_filters: Vec<LanguageFilter>,
    pub history: Vec<HistoryEntry>,
    pub is_dark_mode: bool,
    pub xp: u64,
}

/// Persistence port: load the snapshot at startup, save it after every
/// mutation. Production uses sled; tests may substitute anything.
pub trait SnapshotPort: Send + Sync {
    fn load(&self) -> Result<Option<AppSnapshot>, StoreError>;
    fn save(&self, snapshot: &AppSnapshot) -> Result<(), StoreError>;

    /// Force buffered writes to durable storage. No-op for ports without a
    /// write buffer.
    fn flush(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

pub struct SledSnapshotPort {
    db: sled::Db,
}

impl SledSnapshotPort {
    pub fn open(path: &str) -> Result<Self, StoreError> {
        Ok(Self {
            db: sled::open(path)?,
        })
    }
}

impl SnapshotPort for SledSnapshotPort {
    fn load(&self) -> Result<Option<AppSnapshot>, StoreError> {
        match self.db.get(SNAPSHOT_KEY.as_bytes())? {
            Some(raw) => Ok(Some(serde_json::from_slice(&raw)?)),
            None => Ok(None),
        }
    }

    fn save(&self, snapshot: &AppSnapshot) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec(snapshot)?;
        self.db.insert(SNAPSHOT_KEY.as_bytes(), bytes)?;
        Ok(())
    }

    fn flush(&self) -> Result<(), StoreError> {
        self.db.flush()?;
        Ok(())
    }
}
