//! # Commands
//!
//! - `credsweep scan` - Scan a directory tree for leaked credentials
//! - `credsweep smart-scan` - Scan a local path or a remote URL
//! - `credsweep validate` - Check a credential against its provider API
//! - `credsweep rules` - List detection rules

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

mod commands;
mod fetch;
mod scanning;
mod ui;

use std::path::PathBuf;

use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};
use console::style;
use credsweep_core::ProviderKind;

use crate::ui::colors;

const REPO_URL: &str = "https://github.com/credsweep/credsweep";

#[derive(Debug, Parser)]
#[command(
    name = "credsweep",
    version,
    styles = ui::clap_styles(),
    arg_required_else_help = true,
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(visible_alias = "s")]
    Scan(ScanArgs),

    #[command(name = "smart-scan", visible_alias = "ss")]
    SmartScan(SmartScanArgs),

    #[command(visible_alias = "v")]
    Validate(ValidateArgs),

    #[command(visible_alias = "r")]
    Rules(RulesArgs),
}

/// Output format for scan and validation results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable terminal output.
    #[default]
    Text,
    /// Machine-readable JSON.
    Json,
}

/// Arguments for the `credsweep scan` command.
#[derive(Debug, Parser)]
pub struct ScanArgs {
    /// Directory to scan for leaked credentials.
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t)]
    pub format: OutputFormat,

    /// Write output to a file instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Path to `.credsweep.toml` configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Report per-line locations (findings that span lines are missed).
    #[arg(long)]
    pub lines: bool,

    /// Always exit with code 0, even when credentials are found.
    #[arg(long)]
    pub exit_zero: bool,

    /// Skip files larger than this size in bytes.
    #[arg(long)]
    pub max_file_size: Option<u64>,

    /// Number of parallel scanning threads.
    #[arg(long)]
    pub concurrency: Option<usize>,
}

/// Arguments for the `credsweep smart-scan` command.
#[derive(Debug, Parser)]
pub struct SmartScanArgs {
    /// Local directory or remote URL (GitHub blob links are rewritten
    /// to their raw form automatically).
    pub target: String,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t)]
    pub format: OutputFormat,

    /// Path to `.credsweep.toml` configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Always exit with code 0, even when credentials are found.
    #[arg(long)]
    pub exit_zero: bool,
}

/// Arguments for the `credsweep validate` command.
#[derive(Debug, Parser)]
pub struct ValidateArgs {
    /// Provider to validate against (e.g. `openai`, `anthropic`,
    /// `azure-openai-key`).
    pub provider: ProviderKind,

    /// The credential value to check.
    pub credential: String,

    /// Azure resource endpoint, required for `azure-openai-key`.
    #[arg(short, long)]
    pub endpoint: Option<String>,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t)]
    pub format: OutputFormat,
}

/// Arguments for the `credsweep rules` command.
#[derive(Debug, Parser)]
pub struct RulesArgs {
    /// Filter rules by provider.
    #[arg(short, long)]
    pub provider: Option<ProviderKind>,

    /// Show rule details including regex and keywords.
    #[arg(short, long)]
    pub verbose: bool,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t)]
    pub format: OutputFormat,
}

fn main() {
    #[cfg(feature = "tracing")]
    {
        use tracing_subscriber::{EnvFilter, fmt, prelude::*};

        tracing_subscriber::registry()
            .with(fmt::layer().with_target(false).without_time())
            .with(EnvFilter::from_default_env())
            .init();
    }

    let cli = parse_cli();

    if let Err(e) = run(cli.command) {
        ui::print_error(&format!("{e:#}"));
        std::process::exit(ui::exit::ERROR);
    }
}

fn parse_cli() -> Cli {
    let cmd = Cli::command().about(build_about()).after_help(build_after_help());

    let matches = cmd.get_matches();

    #[expect(clippy::expect_used, reason = "clap already validated args; this cannot fail")]
    Cli::from_arg_matches(&matches).expect("failed to parse arguments")
}

fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Scan(args) => commands::scan::run(&args),
        Command::SmartScan(args) => commands::smart::run(&args),
        Command::Validate(args) => commands::validate::run(&args),
        Command::Rules(args) => commands::rules::run(&args),
    }
}

fn build_about() -> String {
    format!(
        r"
  {} finds leaked API credentials in source trees and remote files.

  Detects OpenAI, Anthropic, Gemini, and Azure OpenAI credentials,
  masks everything it reports, and can check keys against live
  provider APIs.",
        colors::accent().apply_to("credsweep").bold()
    )
}

fn build_after_help() -> String {
    format!(
        r"
  {}
    credsweep scan .                         Scan current directory
    credsweep scan src/ --format json        Output as JSON
    credsweep smart-scan https://github.com/acme/app/blob/main/.env
    credsweep validate openai sk-...         Check a key against OpenAI
    credsweep validate azure-openai-key KEY --endpoint https://res.openai.azure.com
    credsweep rules --verbose                Show rule regexes and keywords

  Learn more: {}",
        style("Examples:").bold(),
        colors::accent().apply_to(REPO_URL).underlined()
    )
}
