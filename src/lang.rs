//! Language-name normalization and cheap script/stop-word detection.
//! Heuristics handle the obvious cases; only ambiguous Latin-script text is
//! worth an AI round trip (see `services::ai::detect_language`).

/// Maps a display-style language label (including the labels Google
/// Translate CSV exports use) to a two-letter code. Unknown labels fall back
/// to their first two letters, uppercased.
pub fn normalize_language_code(lang: &str) -> String {
    let trimmed = lang.trim();
    let mapped = match trimmed {
        "German" | "德文" => "DE",
        "English" | "英文" => "EN",
        "Chinese" | "中文 (繁體)" | "中文(繁體)" | "中文 (简体)" | "中文(简体)" => "CN",
        "French" | "法文" => "FR",
        "Spanish" | "西班牙文" => "ES",
        "Japanese" | "日文" => "JP",
        "Korean" | "韓文" => "KR",
        "Italian" | "義大利文" => "IT",
        "Portuguese" | "葡萄牙文" => "PT",
        "Russian" | "俄文" => "RU",
        "Arabic" | "阿拉伯文" => "AR",
        "偵測語言" => "AUTO",
        _ => "",
    };
    if !mapped.is_empty() {
        return mapped.to_string();
    }
    trimmed.chars().take(2).collect::<String>().to_uppercase()
}

const GERMAN_STOPWORDS: &[&str] = &[
    "der", "die", "das", "ein", "eine", "ist", "und", "nicht", "auf", "für", "mit", "von", "bei",
    "nach", "zu", "aus", "über", "auch", "nur", "noch", "wie", "was", "wenn", "kann", "muss",
    "will", "soll", "hat", "haben", "sein", "sind", "wird", "werden",
];

const FRENCH_STOPWORDS: &[&str] = &[
    "le", "la", "les", "un", "une", "des", "est", "sont", "avec", "pour", "dans", "sur", "par",
    "que", "qui", "ce", "cette", "ces",
];

const SPANISH_STOPWORDS: &[&str] = &[
    "el", "la", "los", "las", "un", "una", "es", "son", "con", "para", "en", "por", "que", "como",
    "pero", "muy", "más",
];

fn contains_stopword(text: &str, stopwords: &[&str]) -> bool {
    text.split(|c: char| !c.is_alphabetic())
        .filter(|w| !w.is_empty())
        .any(|w| stopwords.contains(&w.to_lowercase().as_str()))
}

/// Guesses a language code from script ranges and stop words. Defaults to
/// `EN` for plain Latin text, which is exactly the ambiguous case callers
/// may hand to the AI detector.
pub fn detect_language_from_text(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return "EN".to_string();
    }

    let has = |pred: fn(char) -> bool| trimmed.chars().any(pred);

    if has(|c| ('\u{4e00}'..='\u{9fff}').contains(&c)) {
        return "CN".to_string();
    }
    if has(|c| "äöüßÄÖÜ".contains(c)) || contains_stopword(trimmed, GERMAN_STOPWORDS) {
        return "DE".to_string();
    }
    if has(|c| "àâçéèêëïîôùûü".contains(c)) || contains_stopword(trimmed, FRENCH_STOPWORDS) {
        return "FR".to_string();
    }
    if has(|c| "ñáéíóú¿¡".contains(c)) || contains_stopword(trimmed, SPANISH_STOPWORDS) {
        return "ES".to_string();
    }
    if has(|c| ('\u{3040}'..='\u{309f}').contains(&c) || ('\u{30a0}'..='\u{30ff}').contains(&c)) {
        return "JP".to_string();
    }
    if has(|c| ('\u{ac00}'..='\u{d7af}').contains(&c) || ('\u{1100}'..='\u{11ff}').contains(&c)) {
        return "KR".to_string();
    }

    "EN".to_string()
}

/// True when the text is plain Latin letters/spaces and the heuristics said
/// "EN". Such text could just as well be unaccented German.
pub fn is_ambiguous_latin(text: &str) -> bool {
    !text.trim().is_empty()
        && text
            .chars()
            .all(|c| c.is_ascii_alphabetic() || c.is_whitespace() || c == '-' || c == '\'')
        && detect_language_from_text(text) == "EN"
}

pub const KNOWN_CODES: &[&str] = &["DE", "EN", "FR", "ES", "CN", "JP", "KR", "IT", "PT", "RU"];
