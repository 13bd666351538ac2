//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

const DIFFICULTY_VALUES: [&str; 4] = ["all", "beginner", "intermediate", "advanced"];

#[derive(Parser)]
#[command(
    name = "syllabus",
    version,
    about = "Browse a topic catalog and track study progress",
    long_about = "Browse a categorized topic catalog, filter by difficulty and text,\n\
                  and track completion, bookmarks and notes per topic.\n\n\
                  State is saved between runs; progress always spans the whole catalog."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Catalog JSON file (overrides `[catalog] path` in settings).
    #[arg(long, value_name = "PATH", global = true)]
    pub catalog: Option<PathBuf>,

    /// Session state file (overrides `[state] path` in settings).
    #[arg(long, value_name = "PATH", global = true)]
    pub state: Option<PathBuf>,

    /// Settings file (default: platform config folder).
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// List categories with their topic counts.
    Categories,

    /// List topics of the active category after filtering.
    Topics(FilterArgs),

    /// Show one topic with its examples and your note.
    Show(TopicArg),

    /// Show overall completion progress.
    Progress,

    /// Toggle the completed flag of a topic.
    Complete(TopicArg),

    /// Toggle the bookmark flag of a topic.
    Bookmark(TopicArg),

    /// Toggle whether a topic shows its examples by default.
    Expand(TopicArg),

    /// Show, save, or delete the note of a topic.
    Note(NoteArgs),

    /// List bookmarked topics.
    Bookmarks,

    /// Change and save the active category, difficulty filter, or search query.
    Select(SelectArgs),
}

#[derive(Args)]
pub struct TopicArg {
    /// Topic key.
    #[arg(value_name = "KEY")]
    pub key: String,
}

/// One-off filters; the saved selection fills in anything not given.
#[derive(Args)]
pub struct FilterArgs {
    /// Category key.
    #[arg(long, value_name = "KEY")]
    pub category: Option<String>,

    /// Difficulty filter.
    #[arg(long, value_parser = DIFFICULTY_VALUES, ignore_case = true)]
    pub difficulty: Option<String>,

    /// Case-insensitive text search within the category.
    #[arg(long, value_name = "TEXT")]
    pub search: Option<String>,
}

#[derive(Args)]
pub struct NoteArgs {
    /// Topic key.
    #[arg(value_name = "KEY")]
    pub key: String,

    /// New note text. An empty string saves an empty note.
    #[arg(value_name = "TEXT", conflicts_with = "delete")]
    pub text: Option<String>,

    /// Delete the note.
    #[arg(long)]
    pub delete: bool,
}

#[derive(Args)]
pub struct SelectArgs {
    #[command(flatten)]
    pub filters: FilterArgs,

    /// Clear the saved search query.
    #[arg(long = "clear-search", conflicts_with = "search")]
    pub clear_search: bool,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
