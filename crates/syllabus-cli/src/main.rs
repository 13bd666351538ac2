//! Syllabus CLI.

use std::io::{self, IsTerminal};

use anyhow::{Context, Result};
use clap::{ColorChoice, Parser};
use syllabus_cli::logging::{LogConfig, LogFormat, init_logging};
use syllabus_cli::settings::{Settings, load_settings};
use syllabus_cli::workspace::Workspace;
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use crate::commands::{
    run_bookmark, run_bookmarks, run_categories, run_complete, run_expand, run_note,
    run_progress, run_select, run_show, run_topics,
};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match run(&cli) {
        Ok(()) => 0,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

fn run(cli: &Cli) -> Result<()> {
    let settings = load_settings(cli.config.as_deref());
    let width = settings.display.effective_table_width();
    let mut workspace = open_workspace(cli, &settings)?;
    match &cli.command {
        Command::Categories => run_categories(&workspace, width),
        Command::Topics(args) => run_topics(&mut workspace, args, width),
        Command::Show(args) => run_show(&workspace, &args.key),
        Command::Progress => run_progress(&workspace),
        Command::Complete(args) => run_complete(&mut workspace, &args.key),
        Command::Bookmark(args) => run_bookmark(&mut workspace, &args.key),
        Command::Expand(args) => run_expand(&mut workspace, &args.key),
        Command::Note(args) => run_note(&mut workspace, args),
        Command::Bookmarks => run_bookmarks(&workspace, width),
        Command::Select(args) => run_select(&mut workspace, args),
    }
}

fn open_workspace(cli: &Cli, settings: &Settings) -> Result<Workspace> {
    let catalog = settings
        .catalog_path(cli.catalog.as_deref())
        .context("no catalog configured; pass --catalog or set [catalog] path in settings")?;
    let state = settings
        .state_path(cli.state.as_deref())
        .context("no state location available; pass --state or set [state] path in settings")?;
    Workspace::open(&catalog, state)
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let level_filter = match cli.log_level {
        Some(LogLevelArg::Error) => LevelFilter::ERROR,
        Some(LogLevelArg::Warn) => LevelFilter::WARN,
        Some(LogLevelArg::Info) => LevelFilter::INFO,
        Some(LogLevelArg::Debug) => LevelFilter::DEBUG,
        Some(LogLevelArg::Trace) => LevelFilter::TRACE,
        None => cli.verbosity.tracing_level_filter(),
    };
    let format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    let with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    LogConfig::default()
        .with_level_filter(level_filter)
        .with_env_filter(!(cli.verbosity.is_present() || cli.log_level.is_some()))
        .with_ansi(with_ansi)
        .with_format(format)
        .with_log_file(cli.log_file.clone())
}
