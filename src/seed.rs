//! Built-in sample content shown on first launch, before the user has
//! created or synced anything. Loaded only when no persisted snapshot exists.

use crate::store::operations::decks::Deck;
use crate::store::operations::words::Word;

pub fn seed_decks() -> Vec<Deck> {
    vec![
        Deck {
            id: "1".to_string(),
            title: "German Verbs".to_string(),
            subtitle: "Basics • 50 words".to_string(),
            count: 50,
            progress: 10,
            from_lang: "German".to_string(),
            to_lang: "English".to_string(),
            color_class: "text-primary bg-blue-50 dark:bg-blue-900/20".to_string(),
            icon: "menu_book".to_string(),
            is_new: Some(true),
            is_review: None,
        },
        Deck {
            id: "2".to_string(),
            title: "Travel Phrases".to_string(),
            subtitle: "Last studied: Yesterday".to_string(),
            count: 230,
            progress: 65,
            from_lang: "English".to_string(),
            to_lang: "German".to_string(),
            color_class: "text-orange-500 bg-orange-50 dark:bg-orange-900/20".to_string(),
            icon: "flight".to_string(),
            is_new: None,
            is_review: None,
        },
        Deck {
            id: "3".to_string(),
            title: "Kitchen Vocab".to_string(),
            subtitle: "Review needed • 45 words".to_string(),
            count: 45,
            progress: 85,
            from_lang: "German".to_string(),
            to_lang: "English".to_string(),
            color_class: "text-purple-500 bg-purple-50 dark:bg-purple-900/20".to_string(),
            icon: "restaurant".to_string(),
            is_new: None,
            is_review: Some(true),
        },
    ]
}

pub fn seed_words() -> Vec<Word> {
    let entries: &[(&str, &str, &str, &str, u8)] = &[
        ("1", "Der Apfel", "The Apple", "Noun", 85),
        ("2", "Das Haus", "The House", "Noun", 40),
        ("3", "Laufen", "To run", "Verb", 10),
        ("4", "Der Hund", "The Dog", "Noun", 95),
        ("5", "Glücklich", "Happy", "Adjective", 60),
        ("6", "Der Baum", "The Tree", "Noun", 25),
        ("7", "Sehen", "To see", "Verb", 5),
    ];

    entries
        .iter()
        .map(|(id, original, translated, word_type, proficiency)| Word {
            id: id.to_string(),
            deck_id: "1".to_string(),
            original: original.to_string(),
            translated: translated.to_string(),
            word_type: word_type.to_string(),
            from_lang: None,
            to_lang: None,
            audio: Some(true),
            proficiency: Some(*proficiency),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_words_belong_to_a_seed_deck() {
        let deck_ids: Vec<String> = seed_decks().into_iter().map(|d| d.id).collect();
        for word in seed_words() {
            assert!(deck_ids.contains(&word.deck_id));
        }
    }
}
