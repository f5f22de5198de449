mod cli;

use anyhow::{Context, bail};
use clap::Parser;
use cli::{CheckArgs, Cli, Commands, FixArgs, InitArgs};
use prosekeeper::analyze::analyze;
use prosekeeper::config::{Config, DEFAULT_CONFIG};
use prosekeeper::llm::OpenAiRewriter;
use prosekeeper::orchestrator::{self, NoticeClass, Notifier};
use prosekeeper::report::summarize;
use prosekeeper::types::Severity;
use std::io::Read;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

const EXIT_FAILURE: i32 = 1;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&cli.log_level))
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Init(args) => init(args),
        Commands::Check(args) => check(args),
        Commands::Fix(args) => fix(args).await,
    }
}

fn init(args: InitArgs) -> anyhow::Result<()> {
    if std::path::Path::new(&args.config).exists() && !args.r#override {
        bail!("{} already exists (use --override to replace it)", args.config);
    }
    std::fs::write(&args.config, DEFAULT_CONFIG)
        .with_context(|| format!("failed to write {}", args.config))?;
    info!("Wrote default config to {}", args.config);
    Ok(())
}

fn check(args: CheckArgs) -> anyhow::Result<()> {
    let config = Config::load(&args.config)?;
    let text = read_input(args.input.as_deref())?;

    let analysis = analyze(&text, &config.rules);

    let rendered = match summarize(&analysis.violations) {
        Some(summary) => summary.render(),
        None => "No violations found".to_string(),
    };

    if let Some(path) = &args.output {
        write_output(path, &analysis, &rendered)?;
    } else {
        println!("{rendered}");
    }

    // High-severity violations fail the run, mirroring a blocking review
    let has_high = analysis
        .violations
        .iter()
        .any(|v| v.severity == Severity::High);
    if has_high {
        error!("High-severity violations found");
        std::process::exit(EXIT_FAILURE);
    }
    Ok(())
}

async fn fix(args: FixArgs) -> anyhow::Result<()> {
    let config = Config::load(&args.config)?;
    let text = read_input(args.input.as_deref())?;

    let backend = OpenAiRewriter::new(
        config.llm.base_url.clone(),
        args.api_key.clone(),
        config.llm.model.clone(),
        config.llm.temperature,
        config.llm.max_tokens,
    );

    let outcome =
        orchestrator::process_message(&text, &config, &backend, &TracingNotifier).await;

    let Some(corrected) = outcome.corrected else {
        info!("No correction applied");
        if args.output.is_none() && !args.write {
            println!("{text}");
        }
        return Ok(());
    };

    if args.write {
        let Some(input_path) = &args.input else {
            bail!("--write requires an input file");
        };
        std::fs::write(input_path, &corrected)
            .with_context(|| format!("failed to write {input_path}"))?;
        info!("Corrected text written back to {input_path}");
    } else if let Some(path) = &args.output {
        std::fs::write(path, &corrected)
            .with_context(|| format!("failed to write {path}"))?;
        info!("Corrected text written to {path}");
    } else {
        println!("{corrected}");
    }
    Ok(())
}

fn read_input(path: Option<&str>) -> anyhow::Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("failed to read {path}"))
        }
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("failed to read stdin")?;
            Ok(text)
        }
    }
}

fn write_output(
    path: &str,
    analysis: &prosekeeper::types::AnalysisResult,
    rendered: &str,
) -> anyhow::Result<()> {
    let content = if path.ends_with(".json") {
        serde_json::to_string_pretty(analysis)?
    } else if path.ends_with(".md") {
        rendered.to_string()
    } else {
        bail!("Output file must end with .md or .json");
    };

    std::fs::write(path, content).with_context(|| format!("failed to write {path}"))?;
    info!("Results written to {path}");
    Ok(())
}

/// Surfaces orchestrator notifications through the log, the CLI stand-in
/// for the host's notification UI
struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, class: NoticeClass, message: &str) {
        match class {
            NoticeClass::Error => {
                for line in message.lines() {
                    error!("{line}");
                }
            }
            NoticeClass::Warning => {
                for line in message.lines() {
                    warn!("{line}");
                }
            }
            NoticeClass::Info => {
                for line in message.lines() {
                    info!("{line}");
                }
            }
        }
    }
}
