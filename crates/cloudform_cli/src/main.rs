//! # Commands
//!
//! - `cloudform list` - List stored cloud connections
//! - `cloudform show` - Show one connection with secrets masked
//! - `cloudform create` - Build and submit a new connection
//! - `cloudform edit` - Load, change and resubmit a connection
//! - `cloudform init` - Create configuration file

mod commands;
mod ui;

use std::path::PathBuf;

use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};
use cloudform_core::prelude::*;
use console::style;

use crate::commands::draft::DraftArgs;
use crate::ui::colors;

#[derive(Debug, Parser)]
#[command(
    name = "cloudform",
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
    #[command(visible_alias = "ls")]
    List(ListArgs),

    Show(ShowArgs),

    #[command(visible_alias = "c")]
    Create(CreateArgs),

    #[command(visible_alias = "e")]
    Edit(EditArgs),

    Init(InitArgs),
}

/// Output format for `cloudform show`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable terminal output.
    #[default]
    Text,
    /// Machine-readable JSON with secrets masked.
    Json,
}

/// Arguments for the `cloudform list` command.
#[derive(Debug, Parser)]
pub struct ListArgs {
    /// Only list records for this provider.
    #[arg(short, long)]
    pub provider: Option<Provider>,

    /// Path to `.cloudform.toml` configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Arguments for the `cloudform show` command.
#[derive(Debug, Parser)]
pub struct ShowArgs {
    /// Identifier of the record to show.
    pub id: String,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t)]
    pub format: OutputFormat,

    /// Path to `.cloudform.toml` configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Arguments for the `cloudform create` command.
#[derive(Debug, Parser)]
pub struct CreateArgs {
    /// Draft edits.
    #[command(flatten)]
    pub draft: DraftArgs,
}

/// Arguments for the `cloudform edit` command.
#[derive(Debug, Parser)]
pub struct EditArgs {
    /// Identifier of the record to edit.
    pub id: String,

    /// Draft edits.
    #[command(flatten)]
    pub draft: DraftArgs,
}

/// Arguments for the `cloudform init` command.
#[derive(Debug, Parser)]
pub struct InitArgs {
    /// Overwrite an existing configuration file.
    #[arg(short, long)]
    pub force: bool,

    /// Write the config file to a custom path.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

fn main() {
    #[cfg(feature = "tracing")]
    {
        use tracing_subscriber::{EnvFilter, fmt, prelude::*};

        tracing_subscriber::registry()
            .with(fmt::layer().with_target(false).without_time().with_writer(std::io::stderr))
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
        Command::List(args) => commands::list::run(args.provider, args.config.as_deref()),
        Command::Show(args) => commands::show::run(&args.id, args.format, args.config.as_deref()),
        Command::Create(args) => commands::create::run(&args.draft),
        Command::Edit(args) => commands::edit::run(&args.id, &args.draft),
        Command::Init(args) => commands::init::run(args.force, args.output),
    }
}

fn build_about() -> String {
    format!(
        r"
  {} edits cloud connection records for AWS, Azure and GCP.

  Drafts are validated per field before they are submitted.
  Secrets are masked wherever a record is printed.",
        colors::accent().apply_to("cloudform").bold()
    )
}

fn build_after_help() -> String {
    format!(
        r"
  {}
    cloudform list                                  List stored connections
    cloudform show cloud-aws-prod                   Show one connection
    cloudform show cloud-aws-prod --format json     Output as JSON
    cloudform create --name prod \
        --cred accessKeyId=AKIA... --cred secretAccessKey=...
                                                    Create an AWS connection
    cloudform edit cloud-gcp-data --schedule week   Add a weekly scan
    cloudform edit cloud-aws-dev --dry-run          Preview the payload
    cloudform init                                  Create config file",
        style("Examples:").bold(),
    )
}
