//! # Configuration State
//!
//! Stores counter configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`HAVIR_*`)
//! 2. Defaults (this file)
//!
//! ## Thread Safety
//! Configuration is read-only after initialization; the session only ever
//! borrows it.

use directories::ProjectDirs;
use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

use havir_core::validation::{validate_currency_decimals, validate_receipt_width};
use havir_core::{CurrencyFormat, DocumentKind, ReceiptFormat, ReceiptLocale, StoreProfile};

/// File name looked up when `HAVIR_CATALOG_PATH` is not set.
pub const DEFAULT_CATALOG_FILE: &str = "menu-data.json";

/// Counter configuration.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CounterConfig {
    /// Menu file read once at startup.
    pub catalog_path: PathBuf,

    /// Store details printed on invoices.
    pub store: StoreProfile,

    /// Width, locale and currency of everything rendered.
    pub receipt: ReceiptFormat,

    /// Whether `print` produces text or HTML documents.
    pub receipt_kind: DocumentKind,

    /// Where printed receipts are saved; stdout when unset.
    pub receipt_dir: Option<PathBuf>,
}

/// Configuration error types.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}

impl Default for CounterConfig {
    /// Returns defaults suitable for the original Havir counter.
    ///
    /// ## Default Values
    /// - Store: "هاویر", Persian labels and digits
    /// - Currency: Toman, no decimals
    /// - Receipt: 42 columns, plain text, printed to stdout
    fn default() -> Self {
        CounterConfig {
            catalog_path: PathBuf::from(DEFAULT_CATALOG_FILE),
            store: StoreProfile::default(),
            receipt: ReceiptFormat::default(),
            receipt_kind: DocumentKind::Text,
            receipt_dir: None,
        }
    }
}

impl CounterConfig {
    /// Creates the configuration from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `HAVIR_CATALOG_PATH`: menu file
    /// - `HAVIR_STORE_NAME`, `HAVIR_STORE_PHONE`, `HAVIR_STORE_FOOTER`
    /// - `HAVIR_STORE_ADDRESS`: address lines separated by `|`
    /// - `HAVIR_LOCALE`: `fa` or `en`
    /// - `HAVIR_RECEIPT_WIDTH`: 20..=120 columns
    /// - `HAVIR_RECEIPT_FORMAT`: `text` or `html`
    /// - `HAVIR_RECEIPT_DIR`: save receipts here instead of printing them
    /// - `HAVIR_CURRENCY_CODE`, `HAVIR_CURRENCY_SYMBOL`, `HAVIR_CURRENCY_DECIMALS`
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`CounterConfig::from_env`] with an explicit variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let mut config = CounterConfig::default();

        config.catalog_path = match var("HAVIR_CATALOG_PATH") {
            Some(path) => PathBuf::from(path),
            None => default_catalog_path(),
        };

        if let Some(name) = var("HAVIR_STORE_NAME") {
            config.store.name = name;
        }
        if let Some(phone) = var("HAVIR_STORE_PHONE") {
            config.store.phone = Some(phone);
        }
        if let Some(footer) = var("HAVIR_STORE_FOOTER") {
            config.store.footer = Some(footer);
        }
        if let Some(address) = var("HAVIR_STORE_ADDRESS") {
            config.store.address_lines = address
                .split('|')
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(str::to_string)
                .collect();
        }

        if let Some(locale) = var("HAVIR_LOCALE") {
            config.receipt.locale = locale
                .parse::<ReceiptLocale>()
                .map_err(|_| invalid("HAVIR_LOCALE"))?;
        }

        if let Some(width) = var("HAVIR_RECEIPT_WIDTH") {
            let width: usize = width
                .parse()
                .map_err(|_| invalid("HAVIR_RECEIPT_WIDTH"))?;
            validate_receipt_width(width).map_err(|_| invalid("HAVIR_RECEIPT_WIDTH"))?;
            config.receipt.width = width;
        }

        if let Some(kind) = var("HAVIR_RECEIPT_FORMAT") {
            config.receipt_kind = kind
                .parse::<DocumentKind>()
                .map_err(|_| invalid("HAVIR_RECEIPT_FORMAT"))?;
        }

        config.receipt_dir = var("HAVIR_RECEIPT_DIR").map(PathBuf::from);

        config.receipt.currency = currency_from(&var)?;

        Ok(config)
    }
}

fn currency_from<F>(var: &F) -> Result<CurrencyFormat, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut currency = CurrencyFormat::default();

    if let Some(code) = var("HAVIR_CURRENCY_CODE") {
        currency.code = code.to_ascii_uppercase();
        // A non-Toman code without an explicit symbol prints the code itself
        currency.symbol = currency.code.clone();
        currency.symbol_after = true;
    }
    if let Some(symbol) = var("HAVIR_CURRENCY_SYMBOL") {
        currency.symbol = symbol;
    }
    if let Some(decimals) = var("HAVIR_CURRENCY_DECIMALS") {
        let decimals: u32 = decimals
            .parse()
            .map_err(|_| invalid("HAVIR_CURRENCY_DECIMALS"))?;
        validate_currency_decimals(decimals).map_err(|_| invalid("HAVIR_CURRENCY_DECIMALS"))?;
        currency.decimals = decimals;
    }

    Ok(currency)
}

fn invalid(var: &str) -> ConfigError {
    ConfigError::InvalidValue(var.to_string())
}

/// Determines where the menu file lives when not configured.
///
/// ## Lookup Order
/// 1. `./menu-data.json` (next to where the counter is started)
/// 2. Platform data dir:
///    - **Linux**: `~/.local/share/havir-pos/menu-data.json`
///    - **macOS**: `~/Library/Application Support/com.havir.pos/menu-data.json`
///    - **Windows**: `%APPDATA%\havir\pos\data\menu-data.json`
///
/// Falls back to the relative path so the startup error names a file.
fn default_catalog_path() -> PathBuf {
    let local = Path::new(DEFAULT_CATALOG_FILE);
    if local.exists() {
        return local.to_path_buf();
    }

    ProjectDirs::from("com", "havir", "pos")
        .map(|dirs| dirs.data_dir().join(DEFAULT_CATALOG_FILE))
        .filter(|path| path.exists())
        .unwrap_or_else(|| local.to_path_buf())
}
