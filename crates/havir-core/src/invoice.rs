//! # Invoice Engine
//!
//! Owns the running invoice of one counter session: the selected lines and
//! the discount rate. Totals are always recomputed from scratch.
//!
//! ## Command / Query Split
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Invoice Engine Operations                            │
//! │                                                                         │
//! │  Commands (mutate, return nothing useful)                               │
//! │  ─────────────────────────────────────────                              │
//! │  add_item(id) ─────────────► qty += 1, or new line with qty 1           │
//! │  set_quantity(id, n) ──────► n <= 0 removes, else qty = n (saturating)  │
//! │  set_discount_percent(v) ──► clamp(v, 0, 100)                           │
//! │  reset() ──────────────────► no lines, 0% discount                      │
//! │                                                                         │
//! │  Queries (pure, no side effects)                                        │
//! │  ───────────────────────────────                                        │
//! │  compute_totals() ─────────► subtotal, discount_amount, total           │
//! │  snapshot() ───────────────► owned copy for the receipt exporter        │
//! │  lines(), mode(), discount()                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The engine has no idea how it is displayed; the caller re-renders after
//! each command.
//!
//! ## Example
//! ```rust
//! use havir_core::catalog::Catalog;
//! use havir_core::invoice::InvoiceEngine;
//! use havir_core::locale::CurrencyFormat;
//! use havir_core::types::EntryId;
//!
//! let json = r#"{"Drinks": [{"id": 1, "name": "Tea", "price": 20000}]}"#;
//! let catalog = Catalog::from_json(json, &CurrencyFormat::default()).unwrap();
//! let tea = EntryId::from(1u64);
//!
//! let mut invoice = InvoiceEngine::new(&catalog);
//! invoice.add_item(&tea).unwrap();
//! invoice.add_item(&tea).unwrap();
//! invoice.set_discount_percent(10.0);
//!
//! let totals = invoice.compute_totals();
//! assert_eq!(totals.subtotal.minor(), 40_000);
//! assert_eq!(totals.discount_amount.minor(), 4_000);
//! assert_eq!(totals.total.minor(), 36_000);
//! ```

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{DiscountRate, EntryId, InvoiceMode, MenuEntry};
use crate::validation::saturate_quantity;

// =============================================================================
// Line Item
// =============================================================================

/// One catalog entry selected into the invoice.
///
/// Borrows the entry from the catalog; quantity is always at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineItem<'c> {
    entry: &'c MenuEntry,
    quantity: u32,
}

impl<'c> LineItem<'c> {
    pub fn entry(&self) -> &'c MenuEntry {
        self.entry
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Unit price × quantity.
    pub fn line_total(&self) -> Money {
        self.entry.line_total(self.quantity)
    }
}

// =============================================================================
// Totals
// =============================================================================

/// Totals derived from the current invoice.
///
/// ## Invariants
/// - `total = subtotal - discount_amount`
/// - `discount_amount = subtotal × discount%`, rounded half-up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    pub subtotal: Money,
    pub discount_amount: Money,
    pub total: Money,
    /// Number of distinct lines.
    pub line_count: usize,
    /// Sum of all quantities.
    pub total_quantity: u64,
}

// =============================================================================
// Snapshot
// =============================================================================

/// Owned, read-only copy of one invoice line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotLine {
    pub entry_id: EntryId,
    pub name: String,
    pub category: String,
    pub unit_price: Money,
    pub quantity: u32,
    pub line_total: Money,
}

/// Everything the receipt exporter needs, detached from the engine.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceSnapshot {
    pub lines: Vec<SnapshotLine>,
    pub discount: DiscountRate,
    pub totals: Totals,
}

impl InvoiceSnapshot {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

// =============================================================================
// Invoice Engine
// =============================================================================

/// The running invoice of one session.
///
/// ## Invariants
/// - Lines are unique by entry id and keep the order they were first added
/// - Every line has quantity of at least 1
/// - Discount is within 0..=100%
#[derive(Debug, Clone)]
pub struct InvoiceEngine<'c> {
    catalog: &'c Catalog,
    lines: Vec<LineItem<'c>>,
    discount: DiscountRate,
}

impl<'c> InvoiceEngine<'c> {
    /// Creates an empty invoice over `catalog`.
    pub fn new(catalog: &'c Catalog) -> Self {
        InvoiceEngine {
            catalog,
            lines: Vec::new(),
            discount: DiscountRate::zero(),
        }
    }

    /// The catalog this invoice sells from.
    pub fn catalog(&self) -> &'c Catalog {
        self.catalog
    }

    // -------------------------------------------------------------------------
    // Commands
    // -------------------------------------------------------------------------

    /// Adds one portion of a catalog entry.
    ///
    /// ## Behavior
    /// - Entry already on the invoice: quantity + 1, saturating at `u32::MAX`
    /// - Otherwise: new line with quantity 1, appended at the end
    ///
    /// ## Errors
    /// [`CoreError::EntryNotFound`] if `id` is not in the catalog.
    pub fn add_item(&mut self, id: &EntryId) -> CoreResult<()> {
        if let Some(line) = self.line_mut(id) {
            line.quantity = line.quantity.saturating_add(1);
            return Ok(());
        }

        let entry = self
            .catalog
            .get(id)
            .ok_or_else(|| CoreError::EntryNotFound(id.clone()))?;
        self.lines.push(LineItem { entry, quantity: 1 });
        Ok(())
    }

    /// Sets the quantity of a line.
    ///
    /// ## Behavior
    /// - `quantity <= 0`: removes the line; no-op if there is none
    /// - `quantity > u32::MAX`: stored as `u32::MAX`
    ///
    /// ## Errors
    /// [`CoreError::LineNotFound`] for a positive quantity on an entry that
    /// is not on the invoice. Nothing is inserted.
    pub fn set_quantity(&mut self, id: &EntryId, quantity: i64) -> CoreResult<()> {
        if quantity <= 0 {
            self.lines.retain(|l| &l.entry.id != id);
            return Ok(());
        }

        let line = self
            .line_mut(id)
            .ok_or_else(|| CoreError::LineNotFound(id.clone()))?;
        line.quantity = saturate_quantity(quantity);
        Ok(())
    }

    /// One more portion of a line already on the invoice.
    pub fn increment(&mut self, id: &EntryId) -> CoreResult<()> {
        let current = self.quantity_of(id).ok_or_else(|| CoreError::LineNotFound(id.clone()))?;
        self.set_quantity(id, current as i64 + 1)
    }

    /// One portion fewer; the line disappears when it reaches zero.
    pub fn decrement(&mut self, id: &EntryId) -> CoreResult<()> {
        let current = self.quantity_of(id).ok_or_else(|| CoreError::LineNotFound(id.clone()))?;
        self.set_quantity(id, current as i64 - 1)
    }

    /// Removes a line; no-op if it is not on the invoice.
    pub fn remove_item(&mut self, id: &EntryId) {
        self.lines.retain(|l| &l.entry.id != id);
    }

    /// Sets the invoice discount, clamped to [0, 100]. NaN counts as 0.
    pub fn set_discount_percent(&mut self, value: f64) {
        self.discount = DiscountRate::from_percent(value);
    }

    /// Sets the discount from operator text (see [`DiscountRate::parse_input`]).
    pub fn set_discount_input(&mut self, text: &str) {
        self.discount = DiscountRate::parse_input(text);
    }

    /// Clears every line and the discount.
    pub fn reset(&mut self) {
        self.lines.clear();
        self.discount = DiscountRate::zero();
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    /// Computes subtotal, discount and total from the current lines.
    pub fn compute_totals(&self) -> Totals {
        let subtotal: Money = self.lines.iter().map(LineItem::line_total).sum();
        let discount_amount = subtotal.percentage_of(self.discount);

        Totals {
            subtotal,
            discount_amount,
            total: subtotal - discount_amount,
            line_count: self.lines.len(),
            total_quantity: self.lines.iter().map(|l| l.quantity as u64).sum(),
        }
    }

    /// Lines in the order they were first added.
    pub fn lines(&self) -> impl Iterator<Item = &LineItem<'c>> + '_ {
        self.lines.iter()
    }

    /// The line for `id`, if present.
    pub fn line(&self, id: &EntryId) -> Option<&LineItem<'c>> {
        self.lines.iter().find(|l| &l.entry.id == id)
    }

    /// Quantity of `id` on the invoice, if present.
    pub fn quantity_of(&self, id: &EntryId) -> Option<u32> {
        self.line(id).map(LineItem::quantity)
    }

    pub fn discount(&self) -> DiscountRate {
        self.discount
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn mode(&self) -> InvoiceMode {
        if self.lines.is_empty() {
            InvoiceMode::Empty
        } else {
            InvoiceMode::Populated
        }
    }

    /// Detached copy for printing; later commands do not affect it.
    pub fn snapshot(&self) -> InvoiceSnapshot {
        InvoiceSnapshot {
            lines: self
                .lines
                .iter()
                .map(|l| SnapshotLine {
                    entry_id: l.entry.id.clone(),
                    name: l.entry.name.clone(),
                    category: l.entry.category.clone(),
                    unit_price: l.entry.price,
                    quantity: l.quantity,
                    line_total: l.line_total(),
                })
                .collect(),
            discount: self.discount,
            totals: self.compute_totals(),
        }
    }

    fn line_mut(&mut self, id: &EntryId) -> Option<&mut LineItem<'c>> {
        self.lines.iter_mut().find(|l| &l.entry.id == id)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
