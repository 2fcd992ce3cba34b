//! Bates renamer CLI.

use std::io::{self, IsTerminal};
use std::path::PathBuf;

use anyhow::{Context, Result};
use bates_cli::logging::{LogConfig, LogFormat, init_logging};
use bates_cli::prompt::{DIRECTORY_PROMPT, MAPPING_PROMPT, normalize_input_path, prompt_path};
use bates_core::{RunRequest, run};
use bates_report::ConsoleSink;
use clap::{ColorChoice, Parser};
use tracing::level_filters::LevelFilter;
use tracing::{debug, error};

mod cli;

use crate::cli::{Cli, LogFormatArg, LogLevelArg};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }

    let request = match resolve_request(&cli) {
        Ok(request) => request,
        Err(err) => {
            error!(error = %err, "could not read input paths");
            eprintln!("error: {err:#}");
            std::process::exit(1);
        }
    };
    debug!(
        mapping = %request.mapping_path.display(),
        directory = %request.directory.display(),
        "starting run"
    );

    // Load and rename failures are reported in the run output; the exit
    // code stays 0 once a run has started.
    let result = run(&request, ConsoleSink::stdout());
    debug!(
        phase = ?result.phase,
        renamed = result.renamed_count(),
        failed = result.failed_count(),
        unmatched = result.unmatched_count(),
        "run complete"
    );
}

/// Takes paths from the arguments, prompting for any that are missing.
fn resolve_request(cli: &Cli) -> Result<RunRequest> {
    let mapping = path_or_prompt(cli.mapping_file.as_deref(), MAPPING_PROMPT)
        .context("read mapping file path")?;
    let directory = path_or_prompt(cli.directory.as_deref(), DIRECTORY_PROMPT)
        .context("read directory path")?;
    Ok(RunRequest::new(mapping, directory))
}

fn path_or_prompt(arg: Option<&str>, prompt: &str) -> io::Result<PathBuf> {
    match arg {
        Some(raw) => Ok(normalize_input_path(raw)),
        None => prompt_path(&mut io::stdin().lock(), &mut io::stdout(), prompt),
    }
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.with_timestamps = cli.log_timestamps;
    config.with_target = cli.log_target;
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
