//! Rule-based validator and corrector for LLM-generated narrative prose.
//!
//! The analyzer matches a static pattern library against a message and
//! produces a violation list; the corrector delegates to a generative
//! rewrite backend and falls back to deterministic edits when that fails;
//! the reporter buckets violations by severity; the orchestrator wires the
//! three together per message.

pub mod analyze;
pub mod config;
pub mod correct;
pub mod llm;
pub mod orchestrator;
pub mod patterns;
pub mod report;
pub mod types;
pub mod util;
