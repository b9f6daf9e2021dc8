/// Proficiency delta for a "hard" rating.
pub const PROFICIENCY_DELTA_HARD: i16 = -10;

/// Proficiency delta for a "good" rating.
pub const PROFICIENCY_DELTA_GOOD: i16 = 5;

/// Proficiency delta for an "easy" rating.
pub const PROFICIENCY_DELTA_EASY: i16 = 15;

/// Proficiency is clamped to this inclusive range.
pub const PROFICIENCY_MIN: u8 = 0;
pub const PROFICIENCY_MAX: u8 = 100;

/// Experience points awarded per rated card.
pub const XP_HARD: u64 = 5;
pub const XP_GOOD: u64 = 10;
pub const XP_EASY: u64 = 15;

/// Word type assigned when an import row or remote row carries none.
pub const DEFAULT_WORD_TYPE: &str = "Term";

/// Display defaults applied to decks pulled from the remote backend.
/// The remote schema only stores id/title/subtitle/icon; everything else
/// is presentation metadata the client fills in.
pub const PULLED_DECK_FROM_LANG: &str = "German";
pub const PULLED_DECK_TO_LANG: &str = "English";
pub const PULLED_DECK_COLOR_CLASS: &str = "bg-emerald-500";
pub const DEFAULT_DECK_ICON: &str = "folder";

/// Language codes applied to words pulled from the remote backend.
pub const PULLED_WORD_FROM_LANG: &str = "DE";
pub const PULLED_WORD_TO_LANG: &str = "EN";

/// Number of quiz questions requested from the completion provider.
pub const QUIZ_QUESTION_COUNT: usize = 5;

/// Number of example sentences requested per word.
pub const EXAMPLE_SENTENCE_COUNT: usize = 3;

/// Upper bound on texts sent to the AI in one language-detection batch.
pub const MAX_AI_DETECTION_BATCH: usize = 50;
