//! noteshelf - browse and publish markdown notes kept in a repository

pub mod app;
pub mod cli;
pub mod domain;
pub mod export;
pub mod infra;
pub mod ingest;
pub mod source;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{
    Cli, Command,
    config::Config,
    handlers::{
        Session, handle_browse, handle_completions, handle_fetch, handle_list, handle_show,
        handle_site,
    },
};

/// Main entry point for the CLI application.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Command::Completions(args) = &cli.command {
        return handle_completions(args);
    }

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let session = Session::new(&config, &cli);

    match &cli.command {
        Command::Fetch(args) => handle_fetch(args, &session),
        Command::List(args) => handle_list(args, &session),
        Command::Show(args) => handle_show(args, &session),
        Command::Site(args) => handle_site(args, &session),
        Command::Browse(args) => handle_browse(args, &session),
        Command::Completions(args) => handle_completions(args),
    }
}

/// Logs go to stderr. `RUST_LOG` wins over `-v`.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::new(format!("noteshelf={level}"))
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
