//! Pattern-matching analysis of a single message.
//!
//! `analyze` is a pure function: no I/O, no shared state, safe to call
//! concurrently on independent inputs.

use crate::config::RuleConfig;
use crate::patterns::{
    EMOTION_LABEL_PATTERNS, FORBIDDEN_ENDING_PATTERNS, FORMAL_DIALOGUE_RE, FORMALITY_EXEMPT_CUES,
    GOOD_ENDING_CATEGORIES, QUOTED_SPAN_RE, SENTENCE_RE,
};
use crate::types::{AnalysisResult, Severity, Violation, ViolationKind};

/// Number of trailing sentences scrutinized for closing-statement violations
const ENDING_WINDOW_SENTENCES: usize = 3;

/// Split text into sentences on runs terminated by `.`, `!`, or `?`.
/// A trailing fragment without terminal punctuation counts as a sentence.
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences: Vec<String> = Vec::new();
    let mut consumed = 0;
    for m in SENTENCE_RE.find_iter(text) {
        let s = m.as_str().trim();
        if !s.is_empty() {
            sentences.push(s.to_string());
        }
        consumed = m.end();
    }
    let rest = text[consumed..].trim();
    if !rest.is_empty() {
        sentences.push(rest.to_string());
    }
    sentences
}

/// The last sentences of a message, most recent last
fn ending_window(sentences: &[String]) -> Vec<String> {
    let start = sentences.len().saturating_sub(ENDING_WINDOW_SENTENCES);
    sentences[start..].to_vec()
}

/// Run every enabled check against `text` and collect violations in fixed
/// check order: scene_ending, show_dont_tell, dialogue
pub fn analyze(text: &str, config: &RuleConfig) -> AnalysisResult {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return AnalysisResult::empty();
    }

    let word_count = trimmed.split_whitespace().count();
    let sentences = split_sentences(text);
    let last_sentences = ending_window(&sentences);
    let window = last_sentences.join(" ");

    let mut violations = Vec::new();

    if config.scene_endings {
        check_scene_ending(&window, config.strict_mode, &mut violations);
    }
    if config.show_dont_tell {
        check_show_dont_tell(text, &mut violations);
    }
    if config.dialogue_naturalness {
        check_dialogue(text, &mut violations);
    }

    AnalysisResult {
        violations,
        last_sentences,
        word_count,
    }
}

fn check_scene_ending(window: &str, strict_mode: bool, violations: &mut Vec<Violation>) {
    for pattern in FORBIDDEN_ENDING_PATTERNS.iter() {
        if let Some(m) = pattern.re.find(window) {
            violations.push(Violation {
                kind: ViolationKind::SceneEnding,
                severity: Severity::High,
                matched_text: m.as_str().to_string(),
                message: "Scene ends on a reflective or philosophical note".to_string(),
                source_pattern: Some(pattern.name),
            });
        }
    }

    // Good-ending keywords are a presence heuristic; their absence is only
    // flagged in strict mode
    let lowered = window.to_lowercase();
    let has_good_keyword = GOOD_ENDING_CATEGORIES
        .iter()
        .flat_map(|(_, keywords)| keywords.iter())
        .any(|kw| lowered.contains(kw));
    if !has_good_keyword && strict_mode {
        violations.push(Violation {
            kind: ViolationKind::SceneEnding,
            severity: Severity::Medium,
            matched_text: window.to_string(),
            message: "Ending has no concrete action, dialogue, sensory detail, or interruption"
                .to_string(),
            source_pattern: None,
        });
    }
}

fn check_show_dont_tell(text: &str, violations: &mut Vec<Violation>) {
    for pattern in EMOTION_LABEL_PATTERNS.iter() {
        for m in pattern.re.find_iter(text) {
            violations.push(Violation {
                kind: ViolationKind::ShowDontTell,
                severity: Severity::Medium,
                matched_text: m.as_str().to_string(),
                message: "Emotion is named directly instead of shown".to_string(),
                source_pattern: Some(pattern.name),
            });
        }
    }
}

fn check_dialogue(text: &str, violations: &mut Vec<Violation>) {
    // Exemption cues are checked against the whole message, not the quoted
    // span; an intentionally formal scene suppresses the check entirely
    let lowered = text.to_lowercase();
    if FORMALITY_EXEMPT_CUES.iter().any(|cue| lowered.contains(cue)) {
        return;
    }

    for caps in QUOTED_SPAN_RE.captures_iter(text) {
        let Some(inner) = caps.get(1) else {
            continue;
        };
        if FORMAL_DIALOGUE_RE.is_match(inner.as_str()) {
            violations.push(Violation {
                kind: ViolationKind::Dialogue,
                severity: Severity::Low,
                matched_text: inner.as_str().to_string(),
                message: "Dialogue reads formal; contractions would sound more natural"
                    .to_string(),
                source_pattern: None,
            });
        }
    }
}
