//! # Havir Counter Library
//!
//! Terminal front end for the Havir counter: browse the menu, build an
//! invoice, print it.
//!
//! ## Module Organization
//! ```text
//! havir_counter/
//! ├── lib.rs          ◄─── You are here (startup & command loop)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── config.rs   ◄─── Configuration from HAVIR_* variables
//! │   ├── catalog.rs  ◄─── Menu file loading
//! │   └── session.rs  ◄─── Invoice, active category, daily numbering
//! ├── commands/
//! │   ├── mod.rs      ◄─── Parsing & dispatch
//! │   ├── menu.rs     ◄─── Category browsing
//! │   ├── invoice.rs  ◄─── Invoice manipulation
//! │   └── receipt.rs  ◄─── Printing
//! ├── view.rs         ◄─── Terminal rendering
//! └── error.rs        ◄─── Error type for commands and startup
//! ```

pub mod commands;
pub mod error;
pub mod state;
pub mod view;

use std::io::{BufRead, Write};

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use commands::{Command, Outcome};
use error::AppError;
use state::{load_catalog, CounterConfig, Session};

const PROMPT: &str = "> ";

/// Runs the counter on stdin/stdout.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Counter Startup                                   │
/// │                                                                         │
/// │  1. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter, to stderr                     │
/// │     • Default: info, havir crates at debug; RUST_LOG overrides          │
/// │                                                                         │
/// │  2. Load Configuration ───────────────────────────────────────────────► │
/// │     • HAVIR_* environment variables over defaults                       │
/// │                                                                         │
/// │  3. Load Catalog ─────────────────────────────────────────────────────► │
/// │     • ./menu-data.json, the platform data dir, or HAVIR_CATALOG_PATH    │
/// │     • Any failure ends the process with exit code 1                     │
/// │                                                                         │
/// │  4. Command Loop ─────────────────────────────────────────────────────► │
/// │     • One command per line until quit or end of input                   │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run() -> Result<(), AppError> {
    init_tracing();

    info!("Starting Havir counter");

    let config = CounterConfig::from_env().map_err(|e| {
        error!(error = %e, "Configuration rejected");
        AppError::from(e)
    })?;
    info!(catalog = %config.catalog_path.display(), locale = %config.receipt.locale, "Configuration loaded");

    let catalog = load_catalog(&config.catalog_path, &config.receipt.currency)
        .await
        .map_err(|e| {
            error!(code = ?e.code, error = %e.message, "Catalog load failed");
            e
        })?;

    let mut session = Session::new(&catalog, &config);

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    run_counter(&mut session, stdin.lock(), stdout.lock())?;

    info!(receipts = session.receipts_issued(), "Counter closed");
    Ok(())
}

/// Reads commands from `input` until `quit` or end of input.
///
/// Command errors are written as `error: ...` lines and the loop goes on;
/// only I/O failures on `input`/`output` end it.
pub fn run_counter<R, W>(session: &mut Session<'_>, mut input: R, mut output: W) -> Result<(), AppError>
where
    R: BufRead,
    W: Write,
{
    writeln!(output, "{}\n", commands::menu::show_menu(session))?;
    writeln!(output, "{}", commands::invoice::show(session))?;

    let mut line = String::new();
    loop {
        write!(output, "\n{}", PROMPT)?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            break;
        }

        let result = Command::parse(&line).and_then(|command| match command {
            Some(command) => commands::execute(session, command).map(Some),
            None => Ok(None),
        });

        match result {
            Ok(Some(Outcome::Render(text))) => writeln!(output, "{}", text)?,
            Ok(Some(Outcome::Quit)) => break,
            Ok(None) => {}
            Err(err) => {
                warn!(code = ?err.code, error = %err.message, input = line.trim(), "Command failed");
                writeln!(output, "error: {}", err)?;
            }
        }
    }

    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=havir=trace` - Show trace for havir crates only
/// - Default: INFO, havir crates at DEBUG
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,havir=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
