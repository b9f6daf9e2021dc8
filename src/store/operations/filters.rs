use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::store::Store;

/// User-visible language filter. Auto-derived from deck languages on demand
/// but user-editable afterwards; deliberately not re-synced with decks, so
/// the two can drift.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LanguageFilter {
    pub id: String,
    pub name: String,
}

fn filter_id() -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    let suffix: u32 = rand::thread_rng().gen_range(0..36_u32.pow(5));
    format!("lang-{millis}-{suffix:05x}")
}

impl Store {
    pub fn add_language_filter(&self, filter: LanguageFilter) {
        self.mutate(|state| state.language_filters.push(filter));
    }

    pub fn update_language_filter(&self, id: &str, name: &str) {
        self.mutate(|state| {
            if let Some(filter) = state.language_filters.iter_mut().find(|f| f.id == id) {
                filter.name = name.to_string();
            }
        });
    }

    pub fn delete_language_filter(&self, id: &str) {
        self.mutate(|state| state.language_filters.retain(|f| f.id != id));
    }

    pub fn language_filters(&self) -> Vec<LanguageFilter> {
        self.read(|state| state.language_filters.clone())
    }

    /// Scans distinct deck languages and adds a filter for each one not
    /// already present (case-insensitive on the display name).
    pub fn auto_generate_filters(&self) {
        self.mutate(|state| {
            let mut existing: Vec<String> = state
                .language_filters
                .iter()
                .map(|f| f.name.to_lowercase())
                .collect();

            let mut languages: Vec<String> = Vec::new();
            for deck in &state.decks {
                for lang in [&deck.from_lang, &deck.to_lang] {
                    if !lang.is_empty() && !languages.contains(lang) {
                        languages.push(lang.clone());
                    }
                }
            }

            for lang in languages {
                if existing.contains(&lang.to_lowercase()) {
                    continue;
                }
                existing.push(lang.to_lowercase());
                state.language_filters.push(LanguageFilter {
                    id: filter_id(),
                    name: lang,
                });
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use crate::store::operations::decks::tests::sample_deck;

    use super::*;

    fn empty_store(dir: &tempfile::TempDir) -> Store {
        let store = Store::open(dir.path().join("filters.sled").to_str().unwrap()).unwrap();
        store.replace_decks(Vec::new());
        store
    }

    #[test]
    fn crud_roundtrip() {
        let dir = tempdir().unwrap();
        let store = empty_store(&dir);

        store.add_language_filter(LanguageFilter {
            id: "f1".to_string(),
            name: "German".to_string(),
        });
        store.update_language_filter("f1", "Deutsch");
        assert_eq!(store.language_filters()[0].name, "Deutsch");

        store.update_language_filter("missing", "Nope");
        assert_eq!(store.language_filters().len(), 1);

        store.delete_language_filter("f1");
        assert!(store.language_filters().is_empty());
    }

    #[test]
    fn auto_generate_derives_from_deck_languages() {
        let dir = tempdir().unwrap();
        let store = empty_store(&dir);
        store.create_deck(sample_deck("d1", "Verbs")); // German -> English
        let mut spanish = sample_deck("d2", "Travel");
        spanish.from_lang = "Spanish".to_string();
        store.create_deck(spanish);

        store.auto_generate_filters();

        let names: Vec<String> = store
            .language_filters()
            .into_iter()
            .map(|f| f.name)
            .collect();
        assert_eq!(names.len(), 3);
        assert!(names.contains(&"German".to_string()));
        assert!(names.contains(&"English".to_string()));
        assert!(names.contains(&"Spanish".to_string()));
    }

    #[test]
    fn auto_generate_is_case_insensitive_against_existing() {
        let dir = tempdir().unwrap();
        let store = empty_store(&dir);
        store.create_deck(sample_deck("d1", "Verbs"));
        store.add_language_filter(LanguageFilter {
            id: "f1".to_string(),
            name: "german".to_string(),
        });

        store.auto_generate_filters();

        let names: Vec<String> = store
            .language_filters()
            .into_iter()
            .map(|f| f.name)
            .collect();
        // "german" already covers German; only English is added.
        assert_eq!(names.len(), 2);
        assert!(names.contains(&"English".to_string()));
    }
}
