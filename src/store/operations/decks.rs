use serde::{Deserialize, Serialize};

use crate::store::Store;
use crate::sync::relay::RelayOp;
use crate::sync::remote::{deck_insert_row, deck_patch_row};

/// A named collection of words sharing a language pair. `count` and
/// `progress` are display-only hints set at creation or pull time; no
/// mutation recomputes them, so they are allowed to drift from the actual
/// word count.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Deck {
    pub id: String,
    pub title: String,
    pub subtitle: String,
    pub count: u32,
    pub progress: u8,
    pub from_lang: String,
    pub to_lang: String,
    pub color_class: String,
    pub icon: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_new: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_review: Option<bool>,
}

/// Partial update for a deck. Unset fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DeckPatch {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub count: Option<u32>,
    pub progress: Option<u8>,
    pub from_lang: Option<String>,
    pub to_lang: Option<String>,
    pub color_class: Option<String>,
    pub icon: Option<String>,
    pub is_new: Option<bool>,
    pub is_review: Option<bool>,
}

impl DeckPatch {
    pub fn apply(&self, deck: &mut Deck) {
        if let Some(title) = &self.title {
            deck.title = title.clone();
        }
        if let Some(subtitle) = &self.subtitle {
            deck.subtitle = subtitle.clone();
        }
        if let Some(count) = self.count {
            deck.count = count;
        }
        if let Some(progress) = self.progress {
            deck.progress = progress;
        }
        if let Some(from_lang) = &self.from_lang {
            deck.from_lang = from_lang.clone();
        }
        if let Some(to_lang) = &self.to_lang {
            deck.to_lang = to_lang.clone();
        }
        if let Some(color_class) = &self.color_class {
            deck.color_class = color_class.clone();
        }
        if let Some(icon) = &self.icon {
            deck.icon = icon.clone();
        }
        if let Some(is_new) = self.is_new {
            deck.is_new = Some(is_new);
        }
        if let Some(is_review) = self.is_review {
            deck.is_review = Some(is_review);
        }
    }
}

impl Store {
    /// Appends a deck. The caller supplies the id (time-based in practice,
    /// which keeps collisions unlikely without guaranteeing uniqueness).
    pub fn create_deck(&self, deck: Deck) {
        self.mutate(|state| state.decks.push(deck.clone()));
        self.relay_with_user(|user| RelayOp::InsertDeck(deck_insert_row(&deck, &user.user_id)));
    }

    /// Merges `patch` onto the matching deck. Unknown ids are silent no-ops.
    pub fn update_deck(&self, id: &str, patch: DeckPatch) {
        self.mutate(|state| {
            if let Some(deck) = state.decks.iter_mut().find(|d| d.id == id) {
                patch.apply(deck);
            }
        });
        self.relay_with_user(|_| RelayOp::UpdateDeck {
            id: id.to_string(),
            changes: deck_patch_row(&patch),
        });
    }

    /// Removes the deck and, in the same state transition, every word whose
    /// `deck_id` matches. Only the deck delete is relayed; cascaded words are
    /// removed locally only.
    pub fn delete_deck(&self, id: &str) {
        self.mutate(|state| {
            state.decks.retain(|d| d.id != id);
            state.words.retain(|w| w.deck_id != id);
        });
        self.relay_with_user(|_| RelayOp::DeleteDeck { id: id.to_string() });
    }

    pub fn decks(&self) -> Vec<Deck> {
        self.read(|state| state.decks.clone())
    }

    pub fn get_deck(&self, id: &str) -> Option<Deck> {
        self.read(|state| state.decks.iter().find(|d| d.id == id).cloned())
    }

    /// Wholesale overwrite used by reconciliation pulls. Persists but never
    /// relays.
    pub fn replace_decks(&self, decks: Vec<Deck>) {
        self.mutate(|state| state.decks = decks);
    }
}
