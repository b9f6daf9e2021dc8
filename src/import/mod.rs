pub mod csv;

use crate::constants::DEFAULT_WORD_TYPE;
use crate::store::operations::words::Word;
use crate::store::Store;

/// Which columns of the parsed file feed each word field. Chosen
/// interactively per import; there is no fixed schema.
#[derive(Debug, Clone)]
pub struct ColumnMapping {
    pub term_col: usize,
    pub translation_col: usize,
    /// Inverts term/translation, for files exported in the other direction.
    pub swap_languages: bool,
    /// Column supplying the part-of-speech tag; `None` uses `default_type`.
    pub type_col: Option<usize>,
    pub default_type: String,
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self {
            term_col: 0,
            translation_col: 1,
            swap_languages: false,
            type_col: None,
            default_type: DEFAULT_WORD_TYPE.to_string(),
        }
    }
}

impl ColumnMapping {
    /// Resolves one row to `(original, translated, type)`, trimmed. Missing
    /// columns read as empty.
    fn resolve(&self, row: &[String]) -> (String, String, String) {
        let (orig_col, trans_col) = if self.swap_languages {
            (self.translation_col, self.term_col)
        } else {
            (self.term_col, self.translation_col)
        };

        let cell = |col: usize| row.get(col).map(|c| c.trim()).unwrap_or("");

        let word_type = match self.type_col {
            Some(col) if !cell(col).is_empty() => cell(col).to_string(),
            _ => self.default_type.clone(),
        };
        let word_type = if word_type.trim().is_empty() {
            DEFAULT_WORD_TYPE.to_string()
        } else {
            word_type.trim().to_string()
        };

        (
            cell(orig_col).to_string(),
            cell(trans_col).to_string(),
            word_type,
        )
    }
}

/// Where the duplicate check looks: the whole vocabulary, or only the deck
/// being imported into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DedupScope {
    Global,
    TargetDeck,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub imported: usize,
    pub skipped: usize,
}

impl ImportReport {
    /// Zero survivors is an informational outcome ("nothing new found"),
    /// not an error.
    pub fn nothing_new(&self) -> bool {
        self.imported == 0
    }
}

/// Case-insensitive, trimmed `original|translated` duplicate key.
pub fn dedup_key(original: &str, translated: &str) -> String {
    format!(
        "{}|{}",
        original.trim().to_lowercase(),
        translated.trim().to_lowercase()
    )
}

/// Time-based id; unique enough for client-generated entities, not
/// guaranteed globally unique.
pub fn timestamp_id(index: usize) -> String {
    format!("{}{}", chrono::Utc::now().timestamp_millis(), index)
}

/// Turns parsed rows into new words for `target_deck_id`, skipping rows
/// already present in `existing` and rows duplicated earlier in the same
/// file. Rows empty on both sides are dropped without counting as skips.
pub fn plan_import(
    rows: &[Vec<String>],
    mapping: &ColumnMapping,
    existing: &[Word],
    target_deck_id: &str,
) -> (Vec<Word>, ImportReport) {
    let mut seen: Vec<String> = existing
        .iter()
        .map(|w| dedup_key(&w.original, &w.translated))
        .collect();

    let mut imported = Vec::new();
    let mut report = ImportReport::default();

    for (index, row) in rows.iter().enumerate() {
        let (original, translated, word_type) = mapping.resolve(row);
        if original.is_empty() && translated.is_empty() {
            continue;
        }

        let key = dedup_key(&original, &translated);
        if seen.contains(&key) {
            report.skipped += 1;
            continue;
        }
        seen.push(key);

        imported.push(Word {
            id: timestamp_id(index),
            deck_id: target_deck_id.to_string(),
            original,
            translated,
            word_type,
            from_lang: None,
            to_lang: None,
            audio: Some(true),
            proficiency: None,
        });
    }

    report.imported = imported.len();
    (imported, report)
}

/// Full import: builds the duplicate set from the store at the requested
/// scope, plans the rows, and merges the survivors into the store.
pub fn import_rows(
    store: &Store,
    rows: &[Vec<String>],
    mapping: &ColumnMapping,
    target_deck_id: &str,
    scope: DedupScope,
) -> ImportReport {
    let existing = match scope {
        DedupScope::Global => store.words(),
        DedupScope::TargetDeck => store.words_in_deck(target_deck_id),
    };

    let (words, report) = plan_import(rows, mapping, &existing, target_deck_id);
    if !words.is_empty() {
        store.add_words(words);
    }

    tracing::info!(
        imported = report.imported,
        skipped = report.skipped,
        deck_id = target_deck_id,
        "CSV import finished"
    );
    report
}
