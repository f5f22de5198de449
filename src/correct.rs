//! Two-tier correction: delegate to the rewrite backend, fall back to
//! local deterministic edits when it fails or returns nothing usable.

use crate::llm::RewriteBackend;
use crate::patterns::{FORBIDDEN_ENDING_PATTERNS, SENTENCE_RE};
use crate::types::{AnalysisResult, Violation, ViolationKind};
use crate::util;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Longest excerpt of matched text quoted in the rewrite prompt
const PROMPT_EXCERPT_MAX_CHARS: usize = 80;
/// Most sentences the fallback will ever drop from an ending
const MAX_DROPPED_SENTENCES: usize = 2;
/// Texts this short are never trimmed by the fallback
const MIN_SENTENCES_FOR_REMOVAL: usize = 3;

const REVISION_MARKER_PREFIX: &str = "[show, don't tell: ";
const REVISION_MARKER_SUFFIX: &str = "]";

/// Correct `text` according to the violations in `analysis`.
///
/// With no violations the input is returned unchanged. Otherwise the
/// backend gets one chance; an error, an empty response, or an unchanged
/// response all route to the deterministic fallback.
pub async fn correct(
    text: &str,
    analysis: &AnalysisResult,
    backend: &dyn RewriteBackend,
) -> String {
    if analysis.violations.is_empty() {
        return text.to_string();
    }

    let prompt = build_prompt(text, &analysis.violations);
    match backend.generate(&prompt).await {
        Ok(response) => {
            let rewrite = response.trim();
            // Compare trimmed to trimmed: an echo of the passage minus
            // surrounding whitespace is still an unchanged response
            if !rewrite.is_empty() && rewrite != text.trim() {
                debug!("Applying backend rewrite ({} chars)", rewrite.len());
                return rewrite.to_string();
            }
            debug!("Backend rewrite empty or unchanged, applying fallback edits");
        }
        Err(e) => {
            warn!("Rewrite backend failed: {e:#}, applying fallback edits");
        }
    }

    fallback(text, &analysis.violations)
}

/// Build the single rewrite request sent to the backend
fn build_prompt(text: &str, violations: &[Violation]) -> String {
    let mut items = String::new();
    for (i, v) in violations.iter().enumerate() {
        items.push_str(&format!(
            "{}. [{}] {} (near: \"{}\")\n",
            i + 1,
            v.kind,
            v.message,
            util::excerpt(&v.matched_text, PROMPT_EXCERPT_MAX_CHARS)
        ));
    }

    format!(
        "The following passage violates storytelling guidelines.\n\n\
         Passage:\n\n{text}\n\n\
         Violations:\n\n{items}\n\
         Instructions:\n\
         - Fix all listed violations\n\
         - Replace reflective endings with concrete action, dialogue, sensory detail, or an interruption\n\
         - Replace named emotions with physical depiction\n\
         - Make dialogue sound natural with contractions\n\
         - Preserve point of view, tense, and voice\n\
         - Change as little of the text as possible\n\
         - Return only the corrected text"
    )
}

/// Deterministic edits applied when the backend is unavailable or
/// ineffective. Dialogue violations are reported only, never edited, to
/// avoid mangling intentional character voice.
pub fn fallback(text: &str, violations: &[Violation]) -> String {
    let mut out = text.to_string();
    if violations.iter().any(|v| v.kind == ViolationKind::SceneEnding) {
        out = drop_reflective_ending(&out);
    }
    mark_emotion_labels(&out, violations)
}

/// Drop up to two trailing sentences that match a forbidden ending
/// pattern. Texts of 2 or fewer sentences are never touched, and a text
/// with nothing to drop is returned byte-identical.
///
/// The kept portion is truncated at the last kept sentence's original
/// byte offset, so inter-sentence whitespace survives untouched.
fn drop_reflective_ending(text: &str) -> String {
    let mut spans: Vec<(usize, usize)> = SENTENCE_RE
        .find_iter(text)
        .map(|m| (m.start(), m.end()))
        .collect();
    let consumed = spans.last().map(|&(_, end)| end).unwrap_or(0);
    if !text[consumed..].trim().is_empty() {
        // Trailing fragment without terminal punctuation
        spans.push((consumed, text.len()));
    }
    if spans.len() < MIN_SENTENCES_FOR_REMOVAL {
        return text.to_string();
    }

    let mut dropped = 0;
    while dropped < MAX_DROPPED_SENTENCES {
        let Some(&(start, end)) = spans.last() else {
            break;
        };
        let sentence = text[start..end].trim();
        if FORBIDDEN_ENDING_PATTERNS.iter().any(|p| p.re.is_match(sentence)) {
            spans.pop();
            dropped += 1;
        } else {
            break;
        }
    }

    if dropped == 0 {
        return text.to_string();
    }
    debug!("Fallback dropped {dropped} reflective ending sentence(s)");
    let keep_end = spans.last().map(|&(_, end)| end).unwrap_or(0);
    text[..keep_end].to_string()
}

/// Wrap each show-don't-tell span in a revision marker.
///
/// Replacement is anchored: a per-needle cursor advances past each
/// rewritten span, so identical spans are each processed once and
/// look-alike substrings elsewhere are left alone.
fn mark_emotion_labels(text: &str, violations: &[Violation]) -> String {
    let mut out = text.to_string();
    let mut cursors: HashMap<&str, usize> = HashMap::new();

    for v in violations
        .iter()
        .filter(|v| v.kind == ViolationKind::ShowDontTell)
    {
        let needle = v.matched_text.as_str();
        if needle.is_empty() {
            continue;
        }
        let from = *cursors.get(needle).unwrap_or(&0);
        if from >= out.len() {
            continue;
        }
        // The span may have been removed by the ending trim; skip quietly
        let Some(rel) = out[from..].find(needle) else {
            continue;
        };
        let start = from + rel;
        let marker = format!("{REVISION_MARKER_PREFIX}{needle}{REVISION_MARKER_SUFFIX}");
        out.replace_range(start..start + needle.len(), &marker);
        cursors.insert(needle, start + marker.len());
    }
    out
}
