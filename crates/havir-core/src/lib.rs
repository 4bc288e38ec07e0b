//! # havir-core: Pure Business Logic for Havir POS
//!
//! This crate is the **heart** of the counter. It turns a menu file into a
//! catalog, keeps the running invoice, computes totals and renders receipts,
//! all as pure functions with zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Havir POS Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 havir-counter (apps/counter)                    │   │
//! │  │   config ──► catalog load ──► session ──► commands ──► view     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ plain function calls                   │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ havir-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌─────────┐  │   │
//! │  │   │ catalog │ │ invoice │ │  money  │ │ receipt │ │ locale  │  │   │
//! │  │   │ Catalog │ │ Engine  │ │  Money  │ │ Exporter│ │ digits  │  │   │
//! │  │   │ Category│ │ Totals  │ │Discount │ │ Bundle  │ │ currency│  │   │
//! │  │   └─────────┘ └─────────┘ └─────────┘ └─────────┘ └─────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO CLOCK • NO TERMINAL • PURE FUNCTIONS             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (MenuEntry, DiscountRate, InvoiceMode)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`catalog`] - Menu file parsing and lookup
//! - [`invoice`] - The invoice engine and its totals
//! - [`receipt`] - Customer invoice and kitchen slip rendering
//! - [`locale`] - Digits, grouping, currency and date formatting
//! - [`error`] - Domain error types
//! - [`validation`] - Field rules
//!
//! ## Example Usage
//!
//! ```rust
//! use havir_core::{Catalog, CurrencyFormat, EntryId, InvoiceEngine};
//!
//! let json = r#"{"Drinks": [{"id": 1, "name": "Tea", "price": 20000}]}"#;
//! let catalog = Catalog::from_json(json, &CurrencyFormat::default()).unwrap();
//!
//! let mut invoice = InvoiceEngine::new(&catalog);
//! invoice.add_item(&EntryId::from(1u64)).unwrap();
//! invoice.set_discount_percent(150.0); // clamped to 100
//!
//! assert!(invoice.compute_totals().total.is_zero());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod error;
pub mod invoice;
pub mod locale;
pub mod money;
pub mod receipt;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use catalog::{Catalog, Category};
pub use error::{CatalogError, CoreError, CoreResult, ValidationError};
pub use invoice::{InvoiceEngine, InvoiceSnapshot, LineItem, SnapshotLine, Totals};
pub use locale::{CurrencyFormat, ReceiptLocale};
pub use money::Money;
pub use receipt::{
    DocumentKind, ReceiptBundle, ReceiptExporter, ReceiptFormat, ReceiptHeader, StoreProfile,
};
pub use types::*;
