pub mod decks;
pub mod filters;
pub mod history;
pub mod words;
