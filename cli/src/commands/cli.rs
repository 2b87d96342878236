//! Command-line arguments.

use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};

/// Output of the `runs` and `join` subcommands.
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser, Debug, Clone)]
#[command(version, about = "Browse and compare agent trajectory runs")]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file; defaults to ./trajview.toml, then ~/.trajview/config.toml.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Read data from a static file server instead of the configured source.
    #[arg(long, global = true, conflicts_with = "data_dir")]
    pub data_url: Option<String>,

    /// Read data from a local directory containing `data/`.
    #[arg(long, global = true)]
    pub data_dir: Option<String>,

    /// Prefix prepended to every data path.
    #[arg(long, global = true)]
    pub base_prefix: Option<String>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Serve the index, viewer and compare pages.
    Serve(ServeArgs),
    /// List available runs.
    Runs(RunsArgs),
    /// Join two runs' task indices.
    Join(JoinArgs),
    /// Render one task record as a standalone HTML page.
    Show(ShowArgs),
}

#[derive(ClapArgs, Debug, Clone)]
pub struct ServeArgs {
    /// Bind address; overrides `http_server.host`.
    #[arg(long)]
    pub host: Option<String>,

    /// Bind port; overrides `http_server.port`.
    #[arg(long)]
    pub port: Option<u16>,

    /// Server instance id reported by /health; generated when omitted.
    #[arg(long)]
    pub session_id: Option<String>,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct RunsArgs {
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct JoinArgs {
    #[arg(long)]
    pub left: String,

    #[arg(long)]
    pub right: String,

    /// Only rows whose outcomes differ.
    #[arg(long, default_value_t = false)]
    pub diff_only: bool,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct ShowArgs {
    /// Task id; must not be blank.
    #[arg(long)]
    pub task: String,

    /// Omit for the single-run layout.
    #[arg(long)]
    pub run: Option<String>,

    /// Write the page here instead of stdout.
    #[arg(long)]
    pub out: Option<PathBuf>,
}
