//! Lista CLI application entry point
//!
//! Loads lines from a file or stdin into an in-memory host, runs the
//! narrowing prompt on the terminal, and writes the committed lines to
//! stdout (or `--output`).
//!
//! # Usage
//!
//! ```bash
//! # Narrow a file and print what is left
//! lista notes.txt
//!
//! # Narrow a pipeline's output, starting from a query
//! git log --oneline | lista -q fix
//!
//! # Show the effective configuration
//! lista --print-config
//! ```
//!
//! # Configuration
//!
//! Settings are read from the user's config directory
//! (`~/.config/lista/config.toml` on Linux) or from `--config PATH`.
//! Logging goes to stderr and is controlled by `LISTA_LOG`
//! (default `lista=warn`).

use lista::{
    BufferHost, Lista, ListaError, SessionResult, Status,
    cli::{self, Cli},
    config::ListaConfig,
    ui::ratatui_adapter::{RatatuiRenderer, TerminalEvents, TerminalGuard, widgets::KeyHint},
};
use std::fs;
use std::io::{self, Read, Write};
use std::process::ExitCode;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

type Result<T> = std::result::Result<T, ListaError>;

/// Exit status when the prompt was cancelled
const EXIT_CANCELLED: u8 = 130;

fn init_logging() {
    let filter = EnvFilter::try_from_env("LISTA_LOG")
        .or_else(|_| EnvFilter::try_new("lista=warn"))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(io::stderr)
                .with_target(true)
                .with_ansi(false),
        )
        .init();
}

/// Read the input lines from `cli.file`, or stdin when no file is given
fn read_lines(cli: &Cli) -> Result<Vec<String>> {
    let text = match &cli.file {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text)?;
            text
        }
    };
    Ok(text.lines().map(str::to_string).collect())
}

/// Run the prompt on the terminal against `host`
///
/// The terminal is restored before this returns, on success and on error.
fn narrow(lista: &Lista, host: &mut BufferHost) -> Result<SessionResult> {
    let guard = TerminalGuard::enter()?;
    let mut events = TerminalEvents::new(lista.keymap().clone());
    let mut renderer = RatatuiRenderer::new(guard.terminal()?)
        .with_hints(KeyHint::from_keymap(lista.keymap()));

    let outcome = lista.run(host, &mut events, &mut renderer);
    drop(renderer);
    guard.finish(outcome)
}

/// Write the session outcome to `--output` or stdout
fn write_output(cli: &Cli, result: &SessionResult, lines: &[String]) -> Result<()> {
    let mut text = if cli.json {
        serde_json::to_string_pretty(result).map_err(io::Error::from)?
    } else {
        lines.join("\n")
    };
    if !text.is_empty() {
        text.push('\n');
    }

    match &cli.output {
        Some(path) => fs::write(path, text)?,
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(text.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}

fn run(cli: &Cli) -> Result<ExitCode> {
    let config = ListaConfig::load(cli.config.as_deref(), &cli.overrides())?;

    if cli.print_config {
        print!("{}", config.to_toml()?);
        return Ok(ExitCode::SUCCESS);
    }

    let lista = Lista::from_config(&config)?.with_initial_query(cli.initial_query());

    let lines = read_lines(cli)?;
    let total = lines.len();
    let mut host = BufferHost::new(lines);
    if let Some((row, col)) = cli.line {
        host = host.with_cursor(row, col);
    }
    debug!(lines = total, "input loaded");

    let result = narrow(&lista, &mut host)?;
    info!(status = ?result.status, committed = result.committed, "prompt closed");

    if result.status == Status::Cancelled {
        cli::status("Cancelled", cli.quiet);
        return Ok(ExitCode::from(EXIT_CANCELLED));
    }

    let lines = host.into_lines();
    write_output(cli, &result, &lines)?;
    cli::status(
        &format!("Narrowed to {} of {total} lines", lines.len()),
        cli.quiet,
    );
    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse_args();

    match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            cli::error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}
