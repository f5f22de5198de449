use clap::{Parser, Subcommand};

// Display order for API key option (placed at top of help text)
const API_KEY_DISPLAY_ORDER: usize = 0;
// Display order for log level option (placed at end of help text)
const LOG_LEVEL_DISPLAY_ORDER: usize = 100;

/// CLI arguments
#[derive(Parser)]
#[command(name = "prosekeeper", version, about = "Validates and corrects narrative prose against storytelling rules", long_about = None)]
pub struct Cli {
    /// Log level (see https://docs.rs/tracing-subscriber/latest/tracing_subscriber/filter/struct.EnvFilter.html)
    /// [env: PROSEKEEPER_LOG=] [default: info]
    #[arg(
        long,
        env = "PROSEKEEPER_LOG",
        default_value = "info",
        global = true,
        hide_default_value = true,
        hide_env = true,
        display_order = LOG_LEVEL_DISPLAY_ORDER,
        verbatim_doc_comment
    )]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a default prosekeeper.toml config file
    Init(InitArgs),
    /// Analyze a message and report violations
    Check(CheckArgs),
    /// Analyze a message and rewrite it to fix violations
    Fix(FixArgs),
}

/// Arguments for the init command
#[derive(Parser)]
pub struct InitArgs {
    /// Path to config file
    #[arg(long, default_value = "prosekeeper.toml")]
    pub config: String,

    /// Override existing config file
    #[arg(long)]
    pub r#override: bool,
}

/// Arguments for the check command
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Input file with the message text (reads stdin when omitted)
    pub input: Option<String>,

    /// Path to config file (initialize with `prosekeeper init`)
    #[arg(long, default_value = "prosekeeper.toml")]
    pub config: String,

    /// Output file path (.md or .json)
    #[arg(long)]
    pub output: Option<String>,
}

/// Arguments for the fix command
#[derive(Parser, Debug)]
pub struct FixArgs {
    /// Input file with the message text (reads stdin when omitted)
    pub input: Option<String>,

    /// Path to config file (initialize with `prosekeeper init`)
    #[arg(long, default_value = "prosekeeper.toml")]
    pub config: String,

    /// LLM API key
    #[arg(long, env = "PROSEKEEPER_LLM_API_KEY", display_order = API_KEY_DISPLAY_ORDER)]
    pub api_key: String,

    /// Write the corrected text back to the input file
    #[arg(long, conflicts_with = "output")]
    pub write: bool,

    /// Output file path for the corrected text
    #[arg(long)]
    pub output: Option<String>,
}
