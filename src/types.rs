use serde::Serialize;
use std::fmt;

/// How strongly a violation should be surfaced to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Low => write!(f, "low"),
            Severity::Medium => write!(f, "medium"),
            Severity::High => write!(f, "high"),
        }
    }
}

/// Which storytelling guideline a violation belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    SceneEnding,
    ShowDontTell,
    Dialogue,
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViolationKind::SceneEnding => write!(f, "scene_ending"),
            ViolationKind::ShowDontTell => write!(f, "show_dont_tell"),
            ViolationKind::Dialogue => write!(f, "dialogue"),
        }
    }
}

/// A single detected deviation from a storytelling guideline
#[derive(Debug, Clone, Serialize)]
pub struct Violation {
    pub kind: ViolationKind,
    pub severity: Severity,
    /// Exact span of text that triggered the violation
    pub matched_text: String,
    /// Human-readable explanation of what is wrong
    pub message: String,
    /// Name of the library pattern that matched, if one did
    pub source_pattern: Option<&'static str>,
}

/// Everything the analyzer derives from one message
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResult {
    /// Violations in check order: scene_ending, show_dont_tell, dialogue
    pub violations: Vec<Violation>,
    /// The ending window: up to 3 sentences, most recent last
    pub last_sentences: Vec<String>,
    pub word_count: usize,
}

impl AnalysisResult {
    pub fn empty() -> Self {
        Self {
            violations: Vec::new(),
            last_sentences: Vec::new(),
            word_count: 0,
        }
    }
}
