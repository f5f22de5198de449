use anyhow::Context;
use serde::Deserialize;
use std::fs;

/// Commented config template written by `prosekeeper init`
pub const DEFAULT_CONFIG: &str = r#"# Master switch; when false every message passes through untouched
enabled = true
# Surface a violation summary when violations are found
warnings = true
# Also surface a notification when a message is clean (diagnostic)
notify_on_clean = false

[rules]
# Flag reflective or philosophical scene endings
scene_endings = true
# Flag emotions that are named instead of shown
show_dont_tell = true
# Flag contraction-free formal dialogue
dialogue_naturalness = true
# Also flag endings that merely lack concrete action/dialogue/sensory detail
strict_mode = false
# Rewrite flagged messages (LLM first, deterministic fallback)
auto_correct = true

[llm]
base_url = "https://api.openai.com/v1"
model = "gpt-4o-mini"
# temperature = 0.7
max_tokens = 2048
"#;

#[derive(Deserialize, Debug, Clone)]
pub struct Config {
    /// Master switch; when false the orchestrator is a no-op
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Surface violation summaries through the notifier
    #[serde(default = "default_true")]
    pub warnings: bool,
    /// Surface a notification even when a message is clean
    #[serde(default)]
    pub notify_on_clean: bool,
    #[serde(default)]
    pub rules: RuleConfig,
    #[serde(default)]
    pub llm: LlmConfig,
}

/// Per-check toggles, read-only to the analyzer and corrector within one
/// message cycle
#[derive(Deserialize, Debug, Clone)]
pub struct RuleConfig {
    #[serde(default = "default_true")]
    pub scene_endings: bool,
    #[serde(default = "default_true")]
    pub show_dont_tell: bool,
    #[serde(default = "default_true")]
    pub dialogue_naturalness: bool,
    #[serde(default)]
    pub strict_mode: bool,
    #[serde(default = "default_true")]
    pub auto_correct: bool,
}

#[derive(Deserialize, Debug, Clone)]
pub struct LlmConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default)]
    pub temperature: Option<f32>,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

fn default_true() -> bool {
    true
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_max_tokens() -> u32 {
    2048
}

impl Default for Config {
    fn default() -> Self {
        Self {
            enabled: true,
            warnings: true,
            notify_on_clean: false,
            rules: RuleConfig::default(),
            llm: LlmConfig::default(),
        }
    }
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            scene_endings: true,
            show_dont_tell: true,
            dialogue_naturalness: true,
            strict_mode: false,
            auto_correct: true,
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            temperature: None,
            max_tokens: default_max_tokens(),
        }
    }
}

impl Config {
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content =
            fs::read_to_string(path).with_context(|| format!("failed to read config {path}"))?;
        let config = toml::from_str(&content)
            .with_context(|| format!("failed to parse config {path}"))?;
        Ok(config)
    }
}
