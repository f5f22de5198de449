//! Wires analyzer, corrector, and reporter together for one message cycle.

use crate::analyze::analyze;
use crate::config::Config;
use crate::correct::correct;
use crate::llm::RewriteBackend;
use crate::report::summarize;
use crate::types::{AnalysisResult, Severity};
use tracing::{debug, info};

/// Presentation class for a surfaced notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeClass {
    Error,
    Warning,
    Info,
}

impl NoticeClass {
    pub fn for_severity(severity: Severity) -> Self {
        match severity {
            Severity::High => NoticeClass::Error,
            Severity::Medium => NoticeClass::Warning,
            Severity::Low => NoticeClass::Info,
        }
    }
}

/// Capability-injected reporting sink. The host decides how notifications
/// are rendered; the core never touches an ambient notification surface.
pub trait Notifier: Send + Sync {
    fn notify(&self, class: NoticeClass, message: &str);
}

/// What one message cycle produced
#[derive(Debug)]
pub struct Outcome {
    pub analysis: AnalysisResult,
    /// Corrected text, present only when it differs from the input; the
    /// host writes it back to its message store and re-renders
    pub corrected: Option<String>,
}

/// Process one incoming message: analyze, optionally correct, report.
pub async fn process_message(
    text: &str,
    config: &Config,
    backend: &dyn RewriteBackend,
    notifier: &dyn Notifier,
) -> Outcome {
    if !config.enabled {
        debug!("Validation disabled, skipping message");
        return Outcome {
            analysis: AnalysisResult::empty(),
            corrected: None,
        };
    }

    let analysis = analyze(text, &config.rules);
    debug!(
        "Analyzed message: {} violation(s), {} word(s)",
        analysis.violations.len(),
        analysis.word_count
    );

    if analysis.violations.is_empty() {
        if config.notify_on_clean {
            notifier.notify(NoticeClass::Info, "No storytelling violations found");
        }
        return Outcome {
            analysis,
            corrected: None,
        };
    }

    let corrected = if config.rules.auto_correct {
        let fixed = correct(text, &analysis, backend).await;
        if fixed != text {
            info!("Correction applied ({} -> {} chars)", text.len(), fixed.len());
            Some(fixed)
        } else {
            debug!("No applicable correction, leaving message unchanged");
            None
        }
    } else {
        None
    };

    if config.warnings {
        if let Some(summary) = summarize(&analysis.violations) {
            let class = NoticeClass::for_severity(summary.max_severity());
            notifier.notify(class, &summary.render());
        }
    }

    Outcome {
        analysis,
        corrected,
    }
}
