//! Aggregates violations into a human-readable summary.
//!
//! The reporter only classifies and formats; how a severity maps to a
//! notification class is the caller's concern.

use crate::types::{Severity, Violation};
use crate::util;

/// Longest excerpt of matched text shown per summary line
const REPORT_EXCERPT_MAX_CHARS: usize = 60;

/// Violations grouped by severity, intra-bucket order preserved
#[derive(Debug)]
pub struct Summary {
    pub high: Vec<Violation>,
    pub medium: Vec<Violation>,
    pub low: Vec<Violation>,
}

/// Group violations into severity buckets. Returns `None` for an empty
/// list so a clean message produces no report at all.
pub fn summarize(violations: &[Violation]) -> Option<Summary> {
    if violations.is_empty() {
        return None;
    }

    let mut summary = Summary {
        high: Vec::new(),
        medium: Vec::new(),
        low: Vec::new(),
    };
    for v in violations {
        match v.severity {
            Severity::High => summary.high.push(v.clone()),
            Severity::Medium => summary.medium.push(v.clone()),
            Severity::Low => summary.low.push(v.clone()),
        }
    }
    Some(summary)
}

impl Summary {
    pub fn total(&self) -> usize {
        self.high.len() + self.medium.len() + self.low.len()
    }

    pub fn max_severity(&self) -> Severity {
        if !self.high.is_empty() {
            Severity::High
        } else if !self.medium.is_empty() {
            Severity::Medium
        } else {
            Severity::Low
        }
    }

    /// Render the summary as text: bucket counts, with excerpts for the
    /// high and medium buckets
    pub fn render(&self) -> String {
        let mut out = format!(
            "{} storytelling violation(s): {} high, {} medium, {} low\n",
            self.total(),
            self.high.len(),
            self.medium.len(),
            self.low.len()
        );

        for (label, bucket) in [("high", &self.high), ("medium", &self.medium)] {
            for v in bucket {
                out.push_str(&format!(
                    "- [{label}] {}: {} (\"{}\")\n",
                    v.kind,
                    v.message,
                    util::excerpt(&v.matched_text, REPORT_EXCERPT_MAX_CHARS)
                ));
            }
        }
        if !self.low.is_empty() {
            out.push_str(&format!(
                "- [low] {} dialogue naturalness issue(s), reported only\n",
                self.low.len()
            ));
        }
        out.trim_end().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ViolationKind;

    fn violation(kind: ViolationKind, severity: Severity, matched: &str) -> Violation {
        Violation {
            kind,
            severity,
            matched_text: matched.to_string(),
            message: "test".to_string(),
            source_pattern: None,
        }
    }

    #[test]
    fn empty_list_produces_no_report() {
        assert!(summarize(&[]).is_none());
    }

    #[test]
    fn bucket_counts_sum_to_total() {
        let violations = vec![
            violation(ViolationKind::SceneEnding, Severity::High, "one day at a time"),
            violation(ViolationKind::ShowDontTell, Severity::Medium, "I felt angry"),
            violation(ViolationKind::ShowDontTell, Severity::Medium, "I was scared"),
            violation(ViolationKind::Dialogue, Severity::Low, "I am here"),
        ];
        let summary = summarize(&violations).unwrap();
        assert_eq!(summary.total(), violations.len());
        assert_eq!(summary.high.len(), 1);
        assert_eq!(summary.medium.len(), 2);
        assert_eq!(summary.low.len(), 1);
        assert_eq!(summary.max_severity(), Severity::High);
    }

    #[test]
    fn intra_bucket_order_is_preserved() {
        let violations = vec![
            violation(ViolationKind::ShowDontTell, Severity::Medium, "first"),
            violation(ViolationKind::ShowDontTell, Severity::Medium, "second"),
        ];
        let summary = summarize(&violations).unwrap();
        assert_eq!(summary.medium[0].matched_text, "first");
        assert_eq!(summary.medium[1].matched_text, "second");
    }

    #[test]
    fn render_truncates_long_matches() {
        let long = "x".repeat(200);
        let violations = vec![violation(ViolationKind::SceneEnding, Severity::High, &long)];
        let rendered = summarize(&violations).unwrap().render();
        assert!(rendered.contains(&format!("{}...", "x".repeat(60))));
        assert!(!rendered.contains(&"x".repeat(61)));
    }

    #[test]
    fn low_only_summary_reports_info_class() {
        let violations = vec![violation(ViolationKind::Dialogue, Severity::Low, "I am sure")];
        let summary = summarize(&violations).unwrap();
        assert_eq!(summary.max_severity(), Severity::Low);
        assert!(summary.render().contains("1 dialogue naturalness issue"));
    }
}
