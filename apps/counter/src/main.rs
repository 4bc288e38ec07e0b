//! # Havir Counter Entry Point
//!
//! ## Application Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Havir Counter                                    │
//! │                                                                         │
//! │   stdin ──► commands ──► session ──► havir-core ──► view ──► stdout     │
//! │                                          │                              │
//! │                                          └──► receipts (stdout / dir)   │
//! │                                                                         │
//! │   logs ──────────────────────────────────────────────────────► stderr   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Startup Sequence
//! 1. Initialize tracing (logging)
//! 2. Load configuration from `HAVIR_*`
//! 3. Read the menu file
//! 4. Create the session
//! 5. Run the command loop until `quit` or end of input

use std::process::ExitCode;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // The actual setup is in lib.rs for better testability
    match havir_counter::run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", err);
            ExitCode::FAILURE
        }
    }
}
