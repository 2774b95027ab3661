// loop2md — convert one Loop HTML export to a Markdown file.
//
// Exit codes: 0 on success (including an empty input, which writes an empty
// file), 1 on any failure. Diagnostics go to stderr.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{ArgAction, Parser};
use tracing_subscriber::EnvFilter;

/// Convert HTML (from a Microsoft Loop export) to Markdown.
#[derive(Debug, Parser)]
#[command(name = "loop2md", version, about)]
struct Cli {
    /// Path to the input HTML file.
    #[arg(long = "in", value_name = "PATH")]
    input: PathBuf,

    /// Path to the output Markdown file.
    #[arg(long = "out", value_name = "PATH")]
    output: PathBuf,

    /// Increase log verbosity (-v info, -vv debug). `RUST_LOG` overrides.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("Input file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("Could not read {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("Conversion failed: {0}")]
    Convert(#[from] loop2md::ConversionError),
    #[error("Could not write {}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("ERROR: {err}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .without_time()
        .init();
}

fn run(cli: &Cli) -> Result<(), CliError> {
    if !cli.input.exists() {
        return Err(CliError::NotFound(cli.input.clone()));
    }

    let html = fs::read_to_string(&cli.input).map_err(|source| CliError::Read {
        path: cli.input.clone(),
        source,
    })?;

    if loop2md::is_empty_input(&html) {
        eprintln!("WARNING: Input file is empty: {}", cli.input.display());
        return write_output(&cli.output, "");
    }

    // Convert fully before touching the output so a failure leaves no file.
    let markdown = loop2md::convert(&html)?;
    write_output(&cli.output, &markdown)?;

    tracing::info!(
        input = %cli.input.display(),
        output = %cli.output.display(),
        bytes = markdown.len(),
        "wrote markdown"
    );
    Ok(())
}

fn write_output(path: &Path, contents: &str) -> Result<(), CliError> {
    let write_err = |source| CliError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_err)?;
    }
    fs::write(path, contents).map_err(write_err)
}
