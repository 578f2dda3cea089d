//! CLI command definitions and handlers

pub mod config;
pub mod handlers;
pub mod output;

use clap::{ArgAction, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::domain::{ALL_CATEGORIES, CategoryFilter, PublishPreset};
use output::OutputFormat;

/// noteshelf - browse and publish markdown notes from a repository
#[derive(Parser, Debug)]
#[command(name = "noteshelf", version, about, long_about = None)]
pub struct Cli {
    /// Config file (overrides the default location)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Notes artifact (overrides config file)
    #[arg(long, global = true)]
    pub artifact: Option<PathBuf>,

    /// Publish preset (overrides config file)
    #[arg(long, global = true, value_enum)]
    pub preset: Option<PublishPreset>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fetch every note from the repository and write the artifact
    Fetch(FetchArgs),

    /// List notes, optionally filtered by category and search text
    #[command(name = "ls")]
    List(ListArgs),

    /// Render a note, found by title or filename
    Show(ShowArgs),

    /// Generate a static site
    Site(SiteArgs),

    /// Browse notes interactively
    Browse(BrowseArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `fetch` command
#[derive(Parser, Debug)]
pub struct FetchArgs {
    /// Artifact path to write (defaults to --artifact, then config)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `ls` (list) command
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Category to show (all, computing, math, philosophy, misc, note)
    #[arg(short, long, default_value = ALL_CATEGORIES)]
    pub category: CategoryFilter,

    /// Keep notes whose title or excerpt contains this text
    #[arg(short, long)]
    pub search: Option<String>,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `show` command
#[derive(Parser, Debug)]
pub struct ShowArgs {
    /// Note title or filename (partial, case-insensitive)
    pub name: String,

    /// Print the markdown instead of rendered HTML
    #[arg(long)]
    pub raw: bool,

    /// Wrap all list items in a single list
    #[arg(long)]
    pub legacy_lists: bool,
}

/// Arguments for the `site` command
#[derive(Parser, Debug)]
pub struct SiteArgs {
    /// Output directory
    #[arg(short, long)]
    pub output: PathBuf,

    /// CSS theme (default, dark, or path to CSS file)
    #[arg(long)]
    pub theme: Option<String>,

    /// Site title (overrides config file)
    #[arg(long)]
    pub title: Option<String>,

    /// Wrap all list items in a single list
    #[arg(long)]
    pub legacy_lists: bool,
}

/// Arguments for the `browse` command
#[derive(Parser, Debug)]
pub struct BrowseArgs {
    /// Initial category
    #[arg(short, long, default_value = ALL_CATEGORIES)]
    pub category: CategoryFilter,

    /// Initial search text
    #[arg(short, long)]
    pub search: Option<String>,
}

/// Arguments for the `completions` command
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for (bash, zsh, fish)
    #[arg(value_enum)]
    pub shell: Shell,
}
