//! AI-backed study helpers: example sentences, quizzes, and language
//! detection for imported vocabulary. Every call goes through a
//! [`CompletionProvider`], and every response is treated as untrusted text
//! until it parses.

use serde::{Deserialize, Serialize};

use crate::constants::{EXAMPLE_SENTENCE_COUNT, MAX_AI_DETECTION_BATCH, QUIZ_QUESTION_COUNT};
use crate::lang::{detect_language_from_text, is_ambiguous_latin};
use crate::services::completion::{CompletionError, CompletionProvider};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExampleSentence {
    pub sentence: String,
    pub translation: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: String,
    pub explanation: String,
}

/// Strips Markdown code fences the model wraps around JSON, then parses.
/// `None` means the text was not usable JSON of the expected shape.
fn parse_lenient<T: serde::de::DeserializeOwned>(raw: &str) -> Option<T> {
    let mut text = raw.trim();
    if let Some(rest) = text.strip_prefix("```json") {
        text = rest;
    } else if let Some(rest) = text.strip_prefix("```") {
        text = rest;
    }
    if let Some(rest) = text.strip_suffix("```") {
        text = rest;
    }
    serde_json::from_str(text.trim()).ok()
}

/// Example sentences for one word. A malformed model response is an error
/// here: the caller shows it to the user instead of an empty card.
pub async fn generate_examples(
    provider: &dyn CompletionProvider,
    word: &str,
    translation: &str,
) -> Result<Vec<ExampleSentence>, CompletionError> {
    let prompt = format!(
        "Generate {EXAMPLE_SENTENCE_COUNT} simple example sentences using the word \
         \"{word}\" (meaning: \"{translation}\"). Respond with a JSON array of objects \
         with keys \"sentence\" and \"translation\". Respond with JSON only."
    );
    let raw = provider.complete(&prompt).await?;
    parse_lenient(&raw).ok_or(CompletionError::Malformed)
}

/// Multiple-choice quiz over a word list. Quiz generation is best-effort:
/// any failure collapses to an empty quiz rather than an error.
pub async fn generate_quiz(
    provider: &dyn CompletionProvider,
    words: &[(String, String)],
) -> Vec<QuizQuestion> {
    if words.is_empty() {
        return Vec::new();
    }

    let vocab = words
        .iter()
        .map(|(original, translated)| format!("{original} = {translated}"))
        .collect::<Vec<_>>()
        .join("; ");
    let prompt = format!(
        "Create a {QUIZ_QUESTION_COUNT}-question multiple-choice vocabulary quiz from \
         this list: {vocab}. Respond with a JSON array of objects with keys \
         \"question\", \"options\" (4 strings), \"correctAnswer\", and \
         \"explanation\". Respond with JSON only."
    );

    match provider.complete(&prompt).await {
        Ok(raw) => match parse_lenient::<Vec<QuizQuestion>>(&raw) {
            Some(questions) => questions,
            None => {
                tracing::warn!("quiz response did not parse, returning empty quiz");
                Vec::new()
            }
        },
        Err(err) => {
            tracing::warn!(error = %err, "quiz generation failed, returning empty quiz");
            Vec::new()
        }
    }
}

/// Language code for one text. Script and stop-word heuristics answer most
/// inputs; only plain Latin text is worth asking the model, and a model
/// failure falls back to the heuristic answer.
pub async fn detect_language(provider: &dyn CompletionProvider, text: &str) -> String {
    if !is_ambiguous_latin(text) {
        return detect_language_from_text(text);
    }

    let prompt = format!(
        "What language is the word \"{text}\"? Answer with only a two-letter code \
         such as DE, EN, FR, ES."
    );
    match provider.complete(&prompt).await {
        Ok(raw) => {
            let code = raw.trim().to_uppercase();
            if code.len() == 2 && code.chars().all(|c| c.is_ascii_alphabetic()) {
                code
            } else {
                detect_language_from_text(text)
            }
        }
        Err(err) => {
            tracing::warn!(error = %err, "language detection failed, using heuristic");
            detect_language_from_text(text)
        }
    }
}

/// Batched detection for imports. Texts beyond [`MAX_AI_DETECTION_BATCH`]
/// ambiguous entries keep their heuristic answer; one oversized import must
/// not turn into hundreds of API calls.
pub async fn detect_languages_batch(
    provider: &dyn CompletionProvider,
    texts: &[String],
) -> Vec<String> {
    let mut results = Vec::with_capacity(texts.len());
    let mut asked = 0usize;

    for text in texts {
        if is_ambiguous_latin(text) && asked < MAX_AI_DETECTION_BATCH {
            asked += 1;
            results.push(detect_language(provider, text).await);
        } else {
            results.push(detect_language_from_text(text));
        }
    }
    results
}
