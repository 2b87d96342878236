use clap::Parser;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use trajview_core::api::{AppConfig, CliError};
use trajview_core::config;

mod commands;
mod http;

use commands::cli;

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let args = cli::Args::parse();

    let mut cfg = config::load(args.config.as_deref())?;
    commands::apply_overrides(&mut cfg, &args);
    let _guard = init_tracing(&cfg);

    let loader = trajview_plugins::build_loader(&cfg).map_err(CliError::Source)?;
    dispatch(args.command, &cfg, loader).await
}

/// RUST_LOG wins over the configured level. With `logging.dir` set, output goes
/// to a daily-rolling file; the returned guard flushes it on exit.
fn init_tracing(cfg: &AppConfig) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&cfg.logging.level));

    match &cfg.logging.dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "trajview.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(writer)
                .try_init();
            Some(guard)
        }
        None => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .try_init();
            None
        }
    }
}

/// Routes the parsed subcommand to its handler.
async fn dispatch(
    cmd: cli::Commands,
    cfg: &AppConfig,
    loader: trajview_core::api::Loader,
) -> Result<(), CliError> {
    match cmd {
        cli::Commands::Serve(serve_args) => commands::serve::handle_serve(serve_args, cfg, loader).await,
        cli::Commands::Runs(runs_args) => commands::runs::handle_runs(runs_args, &loader).await,
        cli::Commands::Join(join_args) => commands::join::handle_join(join_args, &loader).await,
        cli::Commands::Show(show_args) => commands::show::handle_show(show_args, &loader).await,
    }
}
