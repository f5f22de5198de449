use async_trait::async_trait;
use prosekeeper::analyze::analyze;
use prosekeeper::config::{Config, RuleConfig};
use prosekeeper::correct::{correct, fallback};
use prosekeeper::llm::RewriteBackend;
use prosekeeper::orchestrator::{NoticeClass, Notifier, process_message};
use prosekeeper::report::summarize;
use prosekeeper::types::{Severity, ViolationKind};
use std::sync::Mutex;

struct FixedBackend(&'static str);

#[async_trait]
impl RewriteBackend for FixedBackend {
    async fn generate(&self, _prompt: &str) -> anyhow::Result<String> {
        Ok(self.0.to_string())
    }
}

struct DownBackend;

#[async_trait]
impl RewriteBackend for DownBackend {
    async fn generate(&self, _prompt: &str) -> anyhow::Result<String> {
        anyhow::bail!("connection refused")
    }
}

#[derive(Default)]
struct CollectingNotifier(Mutex<Vec<(NoticeClass, String)>>);

impl Notifier for CollectingNotifier {
    fn notify(&self, class: NoticeClass, message: &str) {
        self.0.lock().unwrap().push((class, message.to_string()));
    }
}

const REFLECTIVE_MESSAGE: &str = "I locked the front door and leaned my forehead against it. \
     The house settled into silence around me. \
     And I would do everything in my power to protect that. \
     One day at a time.";

#[test]
fn clean_narration_produces_no_violations() {
    let text = "I dropped the keys in the bowl by the door. \
                The kettle was already hissing in the kitchen. \
                She looked up from her book and pointed at the second mug.";
    let result = analyze(text, &RuleConfig::default());
    assert!(result.violations.is_empty(), "got {:?}", result.violations);
    assert!(result.word_count > 0);
    assert_eq!(result.last_sentences.len(), 3);
}

#[test]
fn reflective_ending_is_detected_and_summarized() {
    let result = analyze(REFLECTIVE_MESSAGE, &RuleConfig::default());
    let high: Vec<_> = result
        .violations
        .iter()
        .filter(|v| v.kind == ViolationKind::SceneEnding && v.severity == Severity::High)
        .collect();
    assert!(!high.is_empty());

    let summary = summarize(&result.violations).unwrap();
    assert_eq!(summary.total(), result.violations.len());
    assert_eq!(summary.max_severity(), Severity::High);
    assert!(summary.render().contains("scene_ending"));
}

#[test]
fn mixed_violations_keep_check_order() {
    let text = "\"I am not certain this is wise,\" she murmured. \
                I felt nervous as I counted the steps down. \
                This was the cellar, and I was going to search it.";
    let result = analyze(text, &RuleConfig::default());
    let kinds: Vec<_> = result.violations.iter().map(|v| v.kind).collect();
    assert!(kinds.contains(&ViolationKind::SceneEnding));
    assert!(kinds.contains(&ViolationKind::ShowDontTell));
    assert!(kinds.contains(&ViolationKind::Dialogue));

    let first_dialogue = kinds.iter().position(|k| *k == ViolationKind::Dialogue).unwrap();
    let last_scene = kinds
        .iter()
        .rposition(|k| *k == ViolationKind::SceneEnding)
        .unwrap();
    assert!(last_scene < first_dialogue);
}

#[tokio::test]
async fn backend_rewrite_is_applied_end_to_end() {
    let rewrite = "I locked the front door and leaned my forehead against it. \
                   The house settled into silence around me. \
                   I flipped the deadbolt twice and listened to the hallway clock.";
    let notifier = CollectingNotifier::default();
    let outcome = process_message(
        REFLECTIVE_MESSAGE,
        &Config::default(),
        &FixedBackend(rewrite),
        &notifier,
    )
    .await;
    assert_eq!(outcome.corrected.as_deref(), Some(rewrite));

    let notices = notifier.0.lock().unwrap();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].0, NoticeClass::Error);
}

#[tokio::test]
async fn dead_backend_degrades_to_deterministic_trim() {
    let analysis = analyze(REFLECTIVE_MESSAGE, &RuleConfig::default());
    let corrected = correct(REFLECTIVE_MESSAGE, &analysis, &DownBackend).await;

    // Both trailing reflective sentences are dropped, nothing else changes
    assert!(corrected.starts_with("I locked the front door"));
    assert!(!corrected.contains("One day at a time"));
    assert!(!corrected.contains("power to protect"));
    assert!(corrected.contains("The house settled into silence around me."));
}

#[tokio::test]
async fn emotion_labels_are_marked_when_backend_is_down() {
    let text = "I set the phone face down on the counter. \
                I felt anxious about the silence that followed. \
                The fridge hummed on while I waited for a knock that never came.";
    let notifier = CollectingNotifier::default();
    let outcome =
        process_message(text, &Config::default(), &DownBackend, &notifier).await;
    let corrected = outcome.corrected.unwrap();
    assert!(corrected.contains("[show, don't tell: I felt anxious]"));
    assert!(corrected.starts_with("I set the phone face down on the counter."));
}

#[tokio::test]
async fn echoed_rewrite_without_newline_still_falls_back() {
    // fs::read_to_string keeps the trailing newline; a backend echoing the
    // passage back without it is still an unchanged response
    let text = "The lock clicked shut. I checked it twice. One day at a time.\n";
    let analysis = analyze(text, &RuleConfig::default());
    let corrected = correct(
        text,
        &analysis,
        &FixedBackend("The lock clicked shut. I checked it twice. One day at a time."),
    )
    .await;
    assert!(!corrected.contains("One day at a time"));
    assert_eq!(corrected, "The lock clicked shut. I checked it twice.");
}

#[tokio::test]
async fn correction_is_idempotent_on_clean_text() {
    let text = "She slid the letter across the table and tapped it twice.";
    let analysis = analyze(text, &RuleConfig::default());
    assert!(analysis.violations.is_empty());
    assert_eq!(correct(text, &analysis, &DownBackend).await, text);
    assert_eq!(fallback(text, &analysis.violations), text);
}

#[tokio::test]
async fn disabled_validation_passes_everything_through() {
    let config = Config {
        enabled: false,
        ..Config::default()
    };
    let notifier = CollectingNotifier::default();
    let outcome =
        process_message(REFLECTIVE_MESSAGE, &config, &DownBackend, &notifier).await;
    assert!(outcome.corrected.is_none());
    assert!(outcome.analysis.violations.is_empty());
    assert!(notifier.0.lock().unwrap().is_empty());
}

#[test]
fn analysis_result_serializes_to_json() {
    let result = analyze(REFLECTIVE_MESSAGE, &RuleConfig::default());
    let json = serde_json::to_string_pretty(&result).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert!(parsed.get("violations").is_some());
    assert!(parsed.get("last_sentences").is_some());
    assert!(parsed.get("word_count").is_some());
    let first = &parsed["violations"][0];
    assert_eq!(first["kind"], "scene_ending");
    assert_eq!(first["severity"], "high");
}
