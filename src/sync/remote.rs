use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::RemoteConfig;
use crate::constants::{
    DEFAULT_DECK_ICON, DEFAULT_WORD_TYPE, PULLED_DECK_COLOR_CLASS, PULLED_DECK_FROM_LANG,
    PULLED_DECK_TO_LANG, PULLED_WORD_FROM_LANG, PULLED_WORD_TO_LANG,
};
use crate::store::operations::decks::{Deck, DeckPatch};
use crate::store::operations::words::{Word, WordPatch};

/// Wire representation of a word. The remote schema is snake_case and only
/// carries the shared fields; display metadata stays client-side.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WordRow {
    pub id: String,
    pub deck_id: String,
    pub original: String,
    pub translated: String,
    #[serde(rename = "type", default)]
    pub word_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proficiency: Option<u8>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeckRow {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

/// Partial word update in remote field names (`deckId` becomes `deck_id`).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct WordRowPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deck_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translated: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub word_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proficiency: Option<u8>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeckRowPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("remote network error: {0}")]
    Network(String),
    #[error("remote api error: status={status}, message={message}")]
    Api { status: u16, message: String },
}

impl From<reqwest::Error> for RemoteError {
    fn from(err: reqwest::Error) -> Self {
        RemoteError::Network(err.to_string())
    }
}

/// Remote data collaborator: two record collections reachable by full read,
/// bulk insert, update-by-id, and delete-by-id. The destructive
/// reconciliation semantics live behind this trait so a merging strategy
/// could later be substituted without touching callers.
#[async_trait]
pub trait RemoteBackend: Send + Sync {
    async fn fetch_decks(&self) -> Result<Vec<DeckRow>, RemoteError>;
    async fn fetch_words(&self) -> Result<Vec<WordRow>, RemoteError>;
    async fn insert_decks(&self, rows: &[DeckRow]) -> Result<(), RemoteError>;
    async fn insert_words(&self, rows: &[WordRow]) -> Result<(), RemoteError>;
    async fn update_word(&self, id: &str, changes: &WordRowPatch) -> Result<(), RemoteError>;
    async fn delete_word(&self, id: &str) -> Result<(), RemoteError>;
    async fn update_deck(&self, id: &str, changes: &DeckRowPatch) -> Result<(), RemoteError>;
    async fn delete_deck(&self, id: &str) -> Result<(), RemoteError>;
}

pub fn word_insert_row(word: &Word, user_id: &str) -> WordRow {
    WordRow {
        id: word.id.clone(),
        deck_id: word.deck_id.clone(),
        original: word.original.clone(),
        translated: word.translated.clone(),
        word_type: Some(word.word_type.clone()),
        user_id: Some(user_id.to_string()),
        proficiency: None,
    }
}

pub fn word_patch_row(patch: &WordPatch) -> WordRowPatch {
    WordRowPatch {
        deck_id: patch.deck_id.clone(),
        original: patch.original.clone(),
        translated: patch.translated.clone(),
        word_type: patch.word_type.clone(),
        proficiency: patch.proficiency,
    }
}

pub fn deck_insert_row(deck: &Deck, user_id: &str) -> DeckRow {
    DeckRow {
        id: deck.id.clone(),
        title: deck.title.clone(),
        subtitle: Some(deck.subtitle.clone()),
        icon: Some(deck.icon.clone()),
        user_id: Some(user_id.to_string()),
    }
}

pub fn deck_patch_row(patch: &DeckPatch) -> DeckRowPatch {
    DeckRowPatch {
        title: patch.title.clone(),
        subtitle: patch.subtitle.clone(),
        icon: patch.icon.clone(),
    }
}

/// Maps a pulled word row onto the local model. Proficiency prefers the
/// remote value, then the local word with the same id, then zero.
pub fn word_from_row(row: &WordRow, local: &[Word]) -> Word {
    let local_match = local.iter().find(|w| w.id == row.id);
    Word {
        id: row.id.clone(),
        deck_id: row.deck_id.clone(),
        original: row.original.clone(),
        translated: row.translated.clone(),
        word_type: row
            .word_type
            .clone()
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| DEFAULT_WORD_TYPE.to_string()),
        from_lang: Some(PULLED_WORD_FROM_LANG.to_string()),
        to_lang: Some(PULLED_WORD_TO_LANG.to_string()),
        audio: Some(true),
        proficiency: Some(
            row.proficiency
                .or_else(|| local_match.and_then(|w| w.proficiency))
                .unwrap_or(0),
        ),
    }
}

/// Maps a pulled deck row onto the local model, filling the display fields
/// the remote schema does not carry.
pub fn deck_from_row(row: &DeckRow) -> Deck {
    Deck {
        id: row.id.clone(),
        title: row.title.clone(),
        subtitle: row.subtitle.clone().unwrap_or_default(),
        count: 0,
        progress: 0,
        from_lang: PULLED_DECK_FROM_LANG.to_string(),
        to_lang: PULLED_DECK_TO_LANG.to_string(),
        color_class: PULLED_DECK_COLOR_CLASS.to_string(),
        icon: row
            .icon
            .clone()
            .filter(|i| !i.is_empty())
            .unwrap_or_else(|| DEFAULT_DECK_ICON.to_string()),
        is_new: None,
        is_review: None,
    }
}

/// Supabase-style REST client: `GET ?select=*`, `POST` array inserts,
/// `PATCH`/`DELETE` filtered by `id=eq.{id}`.
pub struct HttpRemote {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl HttpRemote {
    pub fn new(config: &RemoteConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        }
    }

    fn collection_url(&self, collection: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, collection)
    }

    fn authorized(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        req.header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response, RemoteError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response.text().await.unwrap_or_default();
        Err(RemoteError::Api {
            status: status.as_u16(),
            message,
        })
    }

    async fn fetch_all<T: serde::de::DeserializeOwned>(
        &self,
        collection: &str,
    ) -> Result<Vec<T>, RemoteError> {
        let req = self
            .client
            .get(self.collection_url(collection))
            .query(&[("select", "*")]);
        let response = Self::check(self.authorized(req).send().await?).await?;
        Ok(response.json().await?)
    }

    async fn insert_all<T: Serialize>(
        &self,
        collection: &str,
        rows: &[T],
    ) -> Result<(), RemoteError> {
        let req = self.client.post(self.collection_url(collection)).json(rows);
        Self::check(self.authorized(req).send().await?).await?;
        Ok(())
    }

    async fn update_by_id<T: Serialize>(
        &self,
        collection: &str,
        id: &str,
        changes: &T,
    ) -> Result<(), RemoteError> {
        let req = self
            .client
            .patch(self.collection_url(collection))
            .query(&[("id", format!("eq.{id}"))])
            .json(changes);
        Self::check(self.authorized(req).send().await?).await?;
        Ok(())
    }

    async fn delete_by_id(&self, collection: &str, id: &str) -> Result<(), RemoteError> {
        let req = self
            .client
            .delete(self.collection_url(collection))
            .query(&[("id", format!("eq.{id}"))]);
        Self::check(self.authorized(req).send().await?).await?;
        Ok(())
    }
}

#[async_trait]
impl RemoteBackend for HttpRemote {
    async fn fetch_decks(&self) -> Result<Vec<DeckRow>, RemoteError> {
        self.fetch_all("decks").await
    }

    async fn fetch_words(&self) -> Result<Vec<WordRow>, RemoteError> {
        self.fetch_all("words").await
    }

    async fn insert_decks(&self, rows: &[DeckRow]) -> Result<(), RemoteError> {
        self.insert_all("decks", rows).await
    }

    async fn insert_words(&self, rows: &[WordRow]) -> Result<(), RemoteError> {
        self.insert_all("words", rows).await
    }

    async fn update_word(&self, id: &str, changes: &WordRowPatch) -> Result<(), RemoteError> {
        self.update_by_id("words", id, changes).await
    }

    async fn delete_word(&self, id: &str) -> Result<(), RemoteError> {
        self.delete_by_id("words", id).await
    }

    async fn update_deck(&self, id: &str, changes: &DeckRowPatch) -> Result<(), RemoteError> {
        self.update_by_id("decks", id, changes).await
    }

    async fn delete_deck(&self, id: &str) -> Result<(), RemoteError> {
        self.delete_by_id("decks", id).await
    }
}
