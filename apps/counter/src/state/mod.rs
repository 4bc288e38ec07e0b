//! # State Module
//!
//! Everything the counter holds between two commands.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────┐  ┌──────────────────────────┐  ┌──────────────────┐   │
//! │  │ CounterConfig│  │         Catalog          │  │     Session      │   │
//! │  │              │  │                          │  │                  │   │
//! │  │  store       │  │  loaded once at startup  │◄─│  InvoiceEngine   │   │
//! │  │  receipt     │◄─┼──────────────────────────┼──│  active category │   │
//! │  │  paths       │  │  read-only afterwards    │  │  daily counter   │   │
//! │  └──────────────┘  └──────────────────────────┘  └──────────────────┘   │
//! │                                                                         │
//! │  OWNERSHIP:                                                             │
//! │  • Config and Catalog live in `run()` for the whole process             │
//! │  • Session borrows both; no locks, one command at a time                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod catalog;
mod config;
mod session;

pub use catalog::load_catalog;
pub use config::{ConfigError, CounterConfig, DEFAULT_CATALOG_FILE};
pub use session::{DailyCounter, Session};
