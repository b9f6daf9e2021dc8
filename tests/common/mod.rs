#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use tempfile::TempDir;

use lingoflow_core::store::operations::decks::Deck;
use lingoflow_core::store::operations::words::Word;
use lingoflow_core::store::Store;
use lingoflow_core::sync::remote::{
    DeckRow, DeckRowPatch, RemoteBackend, RemoteError, WordRow, WordRowPatch,
};

/// Store on a throwaway sled path with the sample seed cleared out. The
/// TempDir must outlive the store.
pub fn empty_store() -> (TempDir, Store) {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = Store::open(dir.path().join("test.sled").to_str().expect("utf-8 path"))
        .expect("open store");
    store.replace_words(Vec::new());
    store.replace_decks(Vec::new());
    (dir, store)
}

pub fn word(id: &str, deck_id: &str, original: &str, translated: &str) -> Word {
    Word {
        id: id.to_string(),
        deck_id: deck_id.to_string(),
        original: original.to_string(),
        translated: translated.to_string(),
        word_type: "Noun".to_string(),
        from_lang: None,
        to_lang: None,
        audio: Some(true),
        proficiency: Some(0),
    }
}

pub fn deck(id: &str, title: &str) -> Deck {
    Deck {
        id: id.to_string(),
        title: title.to_string(),
        subtitle: format!("{title} subtitle"),
        count: 0,
        progress: 0,
        from_lang: "German".to_string(),
        to_lang: "English".to_string(),
        color_class: "bg-sky-500".to_string(),
        icon: "folder".to_string(),
        is_new: None,
        is_review: None,
    }
}

pub fn word_row(id: &str, deck_id: &str, original: &str, translated: &str) -> WordRow {
    WordRow {
        id: id.to_string(),
        deck_id: deck_id.to_string(),
        original: original.to_string(),
        translated: translated.to_string(),
        word_type: Some("Noun".to_string()),
        user_id: Some("u1".to_string()),
        proficiency: None,
    }
}

pub fn deck_row(id: &str, title: &str) -> DeckRow {
    DeckRow {
        id: id.to_string(),
        title: title.to_string(),
        subtitle: Some(format!("{title} subtitle")),
        icon: Some("folder".to_string()),
        user_id: Some("u1".to_string()),
    }
}

/// In-memory remote double. Failure flags flip individual call families so
/// tests can exercise the abort and abandon paths deterministically.
#[derive(Default)]
pub struct MemoryRemote {
    pub decks: Mutex<Vec<DeckRow>>,
    pub words: Mutex<Vec<WordRow>>,
    pub fail_fetch: AtomicBool,
    pub fail_inserts: AtomicBool,
    pub fail_updates: AtomicBool,
    pub fail_deletes: AtomicBool,
}

impl MemoryRemote {
    pub fn with_remote_state(decks: Vec<DeckRow>, words: Vec<WordRow>) -> Self {
        Self {
            decks: Mutex::new(decks),
            words: Mutex::new(words),
            ..Self::default()
        }
    }

    pub fn deck_ids(&self) -> Vec<String> {
        self.decks.lock().unwrap().iter().map(|d| d.id.clone()).collect()
    }

    pub fn word_ids(&self) -> Vec<String> {
        self.words.lock().unwrap().iter().map(|w| w.id.clone()).collect()
    }

    fn fail(flag: &AtomicBool) -> Result<(), RemoteError> {
        if flag.load(Ordering::SeqCst) {
            Err(RemoteError::Network("simulated failure".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl RemoteBackend for MemoryRemote {
    async fn fetch_decks(&self) -> Result<Vec<DeckRow>, RemoteError> {
        Self::fail(&self.fail_fetch)?;
        Ok(self.decks.lock().unwrap().clone())
    }

    async fn fetch_words(&self) -> Result<Vec<WordRow>, RemoteError> {
        Self::fail(&self.fail_fetch)?;
        Ok(self.words.lock().unwrap().clone())
    }

    async fn insert_decks(&self, rows: &[DeckRow]) -> Result<(), RemoteError> {
        Self::fail(&self.fail_inserts)?;
        self.decks.lock().unwrap().extend_from_slice(rows);
        Ok(())
    }

    async fn insert_words(&self, rows: &[WordRow]) -> Result<(), RemoteError> {
        Self::fail(&self.fail_inserts)?;
        self.words.lock().unwrap().extend_from_slice(rows);
        Ok(())
    }

    async fn update_word(&self, id: &str, changes: &WordRowPatch) -> Result<(), RemoteError> {
        Self::fail(&self.fail_updates)?;
        let mut words = self.words.lock().unwrap();
        if let Some(row) = words.iter_mut().find(|w| w.id == id) {
            if let Some(deck_id) = &changes.deck_id {
                row.deck_id = deck_id.clone();
            }
            if let Some(original) = &changes.original {
                row.original = original.clone();
            }
            if let Some(translated) = &changes.translated {
                row.translated = translated.clone();
            }
            if let Some(word_type) = &changes.word_type {
                row.word_type = Some(word_type.clone());
            }
            if let Some(proficiency) = changes.proficiency {
                row.proficiency = Some(proficiency);
            }
        }
        Ok(())
    }

    async fn delete_word(&self, id: &str) -> Result<(), RemoteError> {
        Self::fail(&self.fail_deletes)?;
        self.words.lock().unwrap().retain(|w| w.id != id);
        Ok(())
    }

    async fn update_deck(&self, id: &str, changes: &DeckRowPatch) -> Result<(), RemoteError> {
        Self::fail(&self.fail_updates)?;
        let mut decks = self.decks.lock().unwrap();
        if let Some(row) = decks.iter_mut().find(|d| d.id == id) {
            if let Some(title) = &changes.title {
                row.title = title.clone();
            }
            if let Some(subtitle) = &changes.subtitle {
                row.subtitle = Some(subtitle.clone());
            }
            if let Some(icon) = &changes.icon {
                row.icon = Some(icon.clone());
            }
        }
        Ok(())
    }

    async fn delete_deck(&self, id: &str) -> Result<(), RemoteError> {
        Self::fail(&self.fail_deletes)?;
        self.decks.lock().unwrap().retain(|d| d.id != id);
        Ok(())
    }
}
