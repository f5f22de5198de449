//! Static pattern library: forbidden scene endings, emotion labels,
//! good-ending keywords, and dialogue formality.
//!
//! These are configuration data, compiled once per process. Extending a set
//! must never require touching the analyzer.

use once_cell::sync::Lazy;
use regex::Regex;

/// A matcher with a stable name that violations can reference
pub struct NamedPattern {
    pub name: &'static str,
    pub re: Regex,
}

/// Emotion words shared by all emotion-label patterns
const EMOTION_WORDS: &str = "angry|furious|sad|happy|scared|afraid|terrified|nervous|anxious|worried|relieved|guilty|ashamed|embarrassed|excited|frustrated|confused|jealous|lonely|miserable|overwhelmed|uncomfortable";

/// Reflective or philosophical closing statements, tested against the
/// ending window only
pub static FORBIDDEN_ENDING_PATTERNS: Lazy<Vec<NamedPattern>> = Lazy::new(|| {
    [
        ("one_day_at_a_time", r"(?i)\bone day at a time\b"),
        (
            "vow_of_protection",
            r"(?i)\b(?:would|will|must)\b[^.!?]{0,60}?\b(?:protect|ensure)\b",
        ),
        (
            "even_the_mighty",
            r"(?i)\beven (?:gods|goddesses|heroes|kings|queens|people) (?:had|have) to\b",
        ),
        (
            "declaration_of_intent",
            r"(?i)\bthis was\b[^.!?]{0,60}?\band i was going to\b",
        ),
        ("fortune_cookie", r"(?i)\bfortune cookie\b"),
    ]
    .into_iter()
    .map(|(name, re)| NamedPattern {
        name,
        re: Regex::new(re).expect("forbidden ending pattern"),
    })
    .collect()
});

/// Direct naming of an emotion instead of depicting it, tested against the
/// full text
pub static EMOTION_LABEL_PATTERNS: Lazy<Vec<NamedPattern>> = Lazy::new(|| {
    [
        (
            "felt_emotion",
            format!(r"(?i)\bI felt (?:so |very |really )?(?:{EMOTION_WORDS})\b"),
        ),
        (
            "seemed_emotion",
            format!(r"(?i)\b(?:he|she|they|I) (?:seemed|appeared|looked) (?:{EMOTION_WORDS})\b"),
        ),
        (
            "was_emotion",
            format!(r"(?i)\bI was (?:so |very |really )?(?:{EMOTION_WORDS})\b"),
        ),
    ]
    .into_iter()
    .map(|(name, re)| NamedPattern {
        name,
        re: Regex::new(&re).expect("emotion label pattern"),
    })
    .collect()
});

/// Keywords whose presence in the ending window suggests a concrete,
/// non-reflective ending. Presence heuristic, not a hard rule: matching is
/// plain case-insensitive substring containment.
pub const GOOD_ENDING_CATEGORIES: &[(&str, &[&str])] = &[
    (
        "physical_action",
        &[
            "grabbed", "reached", "stepped", "turned", "walked", "pulled", "pushed", "opened",
            "closed", "picked up", "set down", "leaned",
        ],
    ),
    (
        "dialogue_marker",
        &["said", "asked", "whispered", "muttered", "shouted", "called out", "replied"],
    ),
    (
        "sensory_verb",
        &["heard", "smelled", "tasted", "watched", "listened", "felt the", "caught the scent"],
    ),
    (
        "interruption",
        &["suddenly", "knock", "rang", "buzzed", "slammed", "burst", "footsteps", "interrupted"],
    ),
];

/// Contraction-free formal constructions inside quoted speech
pub static FORMAL_DIALOGUE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:I am|we are|he is|she is)\b").expect("formal dialogue pattern"));

/// Cues that the surrounding text intends a formal register; when any is
/// present in the message, the dialogue check is suppressed entirely
pub const FORMALITY_EXEMPT_CUES: &[&str] =
    &["formal", "lord", "lady", "your majesty", "your highness"];

/// Double-quoted spans of speech
pub static QUOTED_SPAN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""([^"]+)""#).expect("quoted span pattern"));

/// Runs of characters terminated by `.`, `!`, or `?`
pub static SENTENCE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^.!?]+[.!?]+").expect("sentence pattern"));
