pub mod streak;

use crate::constants::{
    PROFICIENCY_DELTA_EASY, PROFICIENCY_DELTA_GOOD, PROFICIENCY_DELTA_HARD, PROFICIENCY_MAX,
    PROFICIENCY_MIN, XP_EASY, XP_GOOD, XP_HARD,
};
use crate::store::operations::words::{Word, WordPatch};
use crate::store::Store;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rating {
    Hard,
    Good,
    Easy,
}

impl Rating {
    pub fn proficiency_delta(self) -> i16 {
        match self {
            Self::Hard => PROFICIENCY_DELTA_HARD,
            Self::Good => PROFICIENCY_DELTA_GOOD,
            Self::Easy => PROFICIENCY_DELTA_EASY,
        }
    }

    pub fn xp_reward(self) -> u64 {
        match self {
            Self::Hard => XP_HARD,
            Self::Good => XP_GOOD,
            Self::Easy => XP_EASY,
        }
    }
}

/// `clamp(current + delta(rating), 0, 100)`.
pub fn apply_rating(current: u8, rating: Rating) -> u8 {
    let next = i16::from(current) + rating.proficiency_delta();
    next.clamp(i16::from(PROFICIENCY_MIN), i16::from(PROFICIENCY_MAX)) as u8
}

/// One flashcard run over a word list. Active until the position advances
/// past the last card; Finished is terminal until `restart`.
///
/// Rating a card updates proficiency, awards XP, and logs one history entry
/// for the card's deck, then advances. Plain navigation moves the position
/// without touching any of those.
#[derive(Debug)]
pub struct StudySession {
    words: Vec<Word>,
    index: usize,
    finished: bool,
    rated: usize,
}

impl StudySession {
    pub fn new(words: Vec<Word>) -> Self {
        Self {
            words,
            index: 0,
            finished: false,
            rated: 0,
        }
    }

    /// Session over one deck's words, or the whole vocabulary when no deck
    /// is given.
    pub fn from_store(store: &Store, deck_id: Option<&str>) -> Self {
        let words = match deck_id {
            Some(id) => store.words_in_deck(id),
            None => store.words(),
        };
        Self::new(words)
    }

    /// Jumps to the card with `word_id`, when present. Used to resume from
    /// a specific card.
    pub fn start_at(&mut self, word_id: &str) {
        if let Some(idx) = self.words.iter().position(|w| w.id == word_id) {
            self.index = idx;
        }
    }

    pub fn current(&self) -> Option<&Word> {
        if self.finished {
            return None;
        }
        self.words.get(self.index)
    }

    pub fn position(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Cards rated so far in this run.
    pub fn rated_count(&self) -> usize {
        self.rated
    }

    /// Applies the rating to the current card, then advances. Without a
    /// current card this only advances.
    pub fn rate(&mut self, store: &Store, rating: Rating) {
        if let Some(word) = self.current().cloned() {
            let next = apply_rating(word.proficiency.unwrap_or(0), rating);
            store.update_word(&word.id, WordPatch::proficiency(next));
            store.add_xp(rating.xp_reward());
            store.log_study(1, &word.deck_id);

            // Keep the session's own copy current so repeated ratings of the
            // same card compound.
            if let Some(own) = self.words.iter_mut().find(|w| w.id == word.id) {
                own.proficiency = Some(next);
            }
            self.rated += 1;
        }
        self.advance();
    }

    /// Moves forward without rating: position changes, proficiency, XP, and
    /// history do not.
    pub fn next(&mut self) {
        self.advance();
    }

    pub fn previous(&mut self) {
        if self.index > 0 {
            self.index -= 1;
        }
    }

    fn advance(&mut self) {
        if self.index + 1 < self.words.len() {
            self.index += 1;
        } else {
            self.finished = true;
        }
    }

    /// Back to the first card on the same session object.
    pub fn restart(&mut self) {
        self.index = 0;
        self.finished = false;
        self.rated = 0;
    }
}
