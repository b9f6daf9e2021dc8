use serde::{Deserialize, Serialize};

use crate::store::Store;
use crate::sync::relay::RelayOp;
use crate::sync::remote::{word_insert_row, word_patch_row};

/// A single vocabulary entry. `deck_id` should reference an existing deck,
/// but referential integrity is not enforced; orphaned words are tolerated
/// and presented as belonging to an unknown deck.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Word {
    pub id: String,
    pub deck_id: String,
    pub original: String,
    pub translated: String,
    #[serde(rename = "type")]
    pub word_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_lang: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_lang: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proficiency: Option<u8>,
}

/// Partial update for a word. Unset fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WordPatch {
    pub deck_id: Option<String>,
    pub original: Option<String>,
    pub translated: Option<String>,
    #[serde(rename = "type")]
    pub word_type: Option<String>,
    pub from_lang: Option<String>,
    pub to_lang: Option<String>,
    pub audio: Option<bool>,
    pub proficiency: Option<u8>,
}

impl WordPatch {
    pub fn proficiency(value: u8) -> Self {
        Self {
            proficiency: Some(value),
            ..Self::default()
        }
    }

    pub fn apply(&self, word: &mut Word) {
        if let Some(deck_id) = &self.deck_id {
            word.deck_id = deck_id.clone();
        }
        if let Some(original) = &self.original {
            word.original = original.clone();
        }
        if let Some(translated) = &self.translated {
            word.translated = translated.clone();
        }
        if let Some(word_type) = &self.word_type {
            word.word_type = word_type.clone();
        }
        if let Some(from_lang) = &self.from_lang {
            word.from_lang = Some(from_lang.clone());
        }
        if let Some(to_lang) = &self.to_lang {
            word.to_lang = Some(to_lang.clone());
        }
        if let Some(audio) = self.audio {
            word.audio = Some(audio);
        }
        if let Some(proficiency) = self.proficiency {
            word.proficiency = Some(proficiency);
        }
    }
}

impl Store {
    /// Appends words as-is. Deduplication is the importer's responsibility,
    /// not the store's.
    pub fn add_words(&self, words: Vec<Word>) {
        if words.is_empty() {
            return;
        }
        self.mutate(|state| state.words.extend(words.iter().cloned()));
        self.relay_with_user(|user| {
            RelayOp::InsertWords(
                words
                    .iter()
                    .map(|w| word_insert_row(w, &user.user_id))
                    .collect(),
            )
        });
    }

    /// Merges `patch` onto the matching word. Unknown ids are silent no-ops.
    pub fn update_word(&self, id: &str, patch: WordPatch) {
        self.mutate(|state| {
            if let Some(word) = state.words.iter_mut().find(|w| w.id == id) {
                patch.apply(word);
            }
        });
        self.relay_with_user(|_| RelayOp::UpdateWord {
            id: id.to_string(),
            changes: word_patch_row(&patch),
        });
    }

    /// Removes the matching word. Unknown ids are silent no-ops.
    pub fn delete_word(&self, id: &str) {
        self.mutate(|state| state.words.retain(|w| w.id != id));
        self.relay_with_user(|_| RelayOp::DeleteWord { id: id.to_string() });
    }

    pub fn words(&self) -> Vec<Word> {
        self.read(|state| state.words.clone())
    }

    pub fn words_in_deck(&self, deck_id: &str) -> Vec<Word> {
        self.read(|state| {
            state
                .words
                .iter()
                .filter(|w| w.deck_id == deck_id)
                .cloned()
                .collect()
        })
    }

    /// Wholesale overwrite used by reconciliation pulls. Persists the new
    /// snapshot but never relays: the data just came from the remote side.
    pub fn replace_words(&self, words: Vec<Word>) {
        self.mutate(|state| state.words = words);
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use tempfile::tempdir;

    use super::*;

    pub(crate) fn sample_word(id: &str, deck_id: &str, original: &str) -> Word {
        Word {
            id: id.to_string(),
            deck_id: deck_id.to_string(),
            original: original.to_string(),
            translated: format!("{original} (en)"),
            word_type: "Noun".to_string(),
            from_lang: None,
            to_lang: None,
            audio: Some(true),
            proficiency: Some(0),
        }
    }

    fn empty_store(dir: &tempfile::TempDir) -> Store {
        let store = Store::open(dir.path().join("words.sled").to_str().unwrap()).unwrap();
        store.replace_words(Vec::new());
        store.replace_decks(Vec::new());
        store
    }

    #[test]
    fn add_and_list_words() {
        let dir = tempdir().unwrap();
        let store = empty_store(&dir);

        store.add_words(vec![
            sample_word("w1", "d1", "Apfel"),
            sample_word("w2", "d1", "Haus"),
        ]);

        let words = store.words();
        assert_eq!(words.len(), 2);
        assert_eq!(words[0].original, "Apfel");
    }

    #[test]
    fn update_merges_only_set_fields() {
        let dir = tempdir().unwrap();
        let store = empty_store(&dir);
        store.add_words(vec![sample_word("w1", "d1", "Apfel")]);

        store.update_word("w1", WordPatch::proficiency(55));

        let word = store.words().into_iter().next().unwrap();
        assert_eq!(word.proficiency, Some(55));
        assert_eq!(word.original, "Apfel");
        assert_eq!(word.deck_id, "d1");
    }

    #[test]
    fn update_unknown_id_is_a_noop() {
        let dir = tempdir().unwrap();
        let store = empty_store(&dir);
        store.add_words(vec![sample_word("w1", "d1", "Apfel")]);

        store.update_word("missing", WordPatch::proficiency(99));

        assert_eq!(store.words()[0].proficiency, Some(0));
    }

    #[test]
    fn delete_unknown_id_is_a_noop() {
        let dir = tempdir().unwrap();
        let store = empty_store(&dir);
        store.add_words(vec![sample_word("w1", "d1", "Apfel")]);

        store.delete_word("missing");
        assert_eq!(store.words().len(), 1);

        store.delete_word("w1");
        assert!(store.words().is_empty());
    }

    #[test]
    fn words_in_deck_filters_by_deck_id() {
        let dir = tempdir().unwrap();
        let store = empty_store(&dir);
        store.add_words(vec![
            sample_word("w1", "d1", "Apfel"),
            sample_word("w2", "d2", "Haus"),
            sample_word("w3", "d1", "Baum"),
        ]);

        let in_d1 = store.words_in_deck("d1");
        assert_eq!(in_d1.len(), 2);
        assert!(in_d1.iter().all(|w| w.deck_id == "d1"));
    }
}
