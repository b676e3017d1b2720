//! Text moderation for chat messages.
//!
//! Detection runs over a normalized form of the message: lowercased, with
//! common digit/symbol substitutions folded back to letters, so that
//! disguised spellings still match. Censoring replaces plain-text matches
//! with asterisks; a disguised match still flags the message but cannot be
//! located reliably in the original text, which then passes through as-is.

/// Maximum accepted message length, in characters.
pub const MAX_MESSAGE_LENGTH: usize = 2000;

/// Minimum accepted message length after trimming, in characters.
pub const MIN_MESSAGE_LENGTH: usize = 1;

/// Base profanity list, both Russian and English. Stems rather than full
/// words where inflection varies.
const BANNED_WORDS: &[&str] = &[
    // Russian
    "хуй",
    "пизд",
    "блядь",
    "бля",
    "ебан",
    "ебат",
    "сука",
    "мудак",
    "пидор",
    "гандон",
    "шлюх",
    // English
    "fuck",
    "shit",
    "bitch",
    "asshole",
    "cunt",
];

/// Substitutions folded away during normalization. An empty replacement
/// removes the character entirely.
const LEET_REPLACEMENTS: &[(char, &str)] = &[
    ('0', "о"),
    ('1', "и"),
    ('3', "е"),
    ('4', "а"),
    ('5', "s"),
    ('6', "б"),
    ('@', "а"),
    ('$', "s"),
    ('!', "и"),
    ('*', ""),
    ('.', ""),
    ('-', ""),
    ('_', ""),
];

/// Result of moderating one message.
#[derive(Debug, Clone, PartialEq)]
pub struct ModerationResult {
    /// Whether the message may be stored and delivered.
    pub passed: bool,
    /// The text as submitted.
    pub original: String,
    /// The text to store: censored when a banned word matched, truncated
    /// when over-long, otherwise unchanged.
    pub filtered: String,
    /// Why the message failed, or which word was censored.
    pub reason: Option<String>,
}

/// Moderates a message: length bounds, then banned-word detection.
///
/// A banned word does not reject the message; it is censored and the result
/// notes which word matched. Only empty, too-short or over-long messages
/// fail moderation outright.
pub fn moderate(text: &str) -> ModerationResult {
    if text.is_empty() {
        return ModerationResult {
            passed: false,
            original: String::new(),
            filtered: String::new(),
            reason: Some("Empty message".to_string()),
        };
    }

    if text.chars().count() > MAX_MESSAGE_LENGTH {
        return ModerationResult {
            passed: false,
            original: text.to_string(),
            filtered: text.chars().take(MAX_MESSAGE_LENGTH).collect(),
            reason: Some(format!("Message too long (max {})", MAX_MESSAGE_LENGTH)),
        };
    }

    if text.trim().chars().count() < MIN_MESSAGE_LENGTH {
        return ModerationResult {
            passed: false,
            original: text.to_string(),
            filtered: String::new(),
            reason: Some("Message too short".to_string()),
        };
    }

    if let Some(word) = find_banned_word(text) {
        return ModerationResult {
            passed: true,
            original: text.to_string(),
            filtered: censor(text, word),
            reason: Some(format!("Censored: {}", word)),
        };
    }

    ModerationResult {
        passed: true,
        original: text.to_string(),
        filtered: text.to_string(),
        reason: None,
    }
}

/// Lowercases and folds leet substitutions for banned-word matching.
fn normalize(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.to_lowercase().chars() {
        match LEET_REPLACEMENTS.iter().find(|(from, _)| *from == c) {
            Some((_, to)) => result.push_str(to),
            None => result.push(c),
        }
    }
    result
}

/// First banned word present in the normalized text, if any.
fn find_banned_word(text: &str) -> Option<&'static str> {
    let normalized = normalize(text);
    BANNED_WORDS
        .iter()
        .find(|word| normalized.contains(*word))
        .copied()
}

/// Replaces case-insensitive plain occurrences of `word` with asterisks.
///
/// Works per character so multi-byte text keeps its shape; occurrences that
/// only exist in the normalized form are left alone.
fn censor(text: &str, word: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let lower: Vec<char> = chars
        .iter()
        .map(|c| c.to_lowercase().next().unwrap_or(*c))
        .collect();
    let target: Vec<char> = word.chars().collect();

    let mut censored = chars;
    let mut i = 0;
    while i + target.len() <= lower.len() {
        if lower[i..i + target.len()] == target[..] {
            for slot in censored.iter_mut().skip(i).take(target.len()) {
                *slot = '*';
            }
            i += target.len();
        } else {
            i += 1;
        }
    }

    censored.into_iter().collect()
}
