//! # Invoice Commands
//!
//! Thin wrappers over [`InvoiceEngine`](havir_core::InvoiceEngine) that log
//! the change and return the re-rendered invoice.
//!
//! ## Invoice Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Invoice Lifecycle                                    │
//! │                                                                         │
//! │  ┌──────────┐   add     ┌───────────┐   print    ┌───────────┐          │
//! │  │  Empty   │─────────► │ Populated │──────────► │ Populated │          │
//! │  │          │           │           │ (unchanged)│           │          │
//! │  └──────────┘           └───────────┘            └───────────┘          │
//! │       ▲                   │      ▲                                      │
//! │       │  reset / last     │      │ qty / inc / dec / discount           │
//! │       └───line removed────┘      └──────────                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use havir_core::{EntryId, InvoiceMode, InvoiceSnapshot};
use serde::Serialize;
use tracing::{debug, info};

use crate::error::AppError;
use crate::state::Session;
use crate::view;

/// Invoice as returned by the `json` command.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceResponse {
    pub mode: InvoiceMode,
    pub discount_percent: f64,
    #[serde(flatten)]
    pub snapshot: InvoiceSnapshot,
}

impl From<InvoiceSnapshot> for InvoiceResponse {
    fn from(snapshot: InvoiceSnapshot) -> Self {
        InvoiceResponse {
            mode: if snapshot.is_empty() {
                InvoiceMode::Empty
            } else {
                InvoiceMode::Populated
            },
            discount_percent: snapshot.discount.percent(),
            snapshot,
        }
    }
}

fn render(session: &Session<'_>) -> String {
    view::render_invoice(&session.invoice, &session.config().receipt)
}

/// Adds one unit of a catalog entry.
pub fn add_item(session: &mut Session<'_>, id: &EntryId) -> Result<String, AppError> {
    session.invoice.add_item(id)?;
    debug!(entry_id = %id, quantity = ?session.invoice.quantity_of(id), "add_item");
    Ok(render(session))
}

/// Sets a line's quantity; zero or less removes the line.
pub fn set_quantity(session: &mut Session<'_>, id: &EntryId, quantity: i64) -> Result<String, AppError> {
    session.invoice.set_quantity(id, quantity)?;
    debug!(entry_id = %id, requested = quantity, stored = ?session.invoice.quantity_of(id), "set_quantity");
    Ok(render(session))
}

pub fn increment(session: &mut Session<'_>, id: &EntryId) -> Result<String, AppError> {
    session.invoice.increment(id)?;
    debug!(entry_id = %id, "increment");
    Ok(render(session))
}

pub fn decrement(session: &mut Session<'_>, id: &EntryId) -> Result<String, AppError> {
    session.invoice.decrement(id)?;
    debug!(entry_id = %id, "decrement");
    Ok(render(session))
}

/// Removes a line. Removing an absent line is a no-op.
pub fn remove_item(session: &mut Session<'_>, id: &EntryId) -> String {
    session.invoice.remove_item(id);
    debug!(entry_id = %id, "remove_item");
    render(session)
}

/// Sets the discount from operator text, clamped to 0..=100%.
pub fn set_discount(session: &mut Session<'_>, text: &str) -> String {
    session.invoice.set_discount_input(text);
    debug!(input = text, stored_bps = session.invoice.discount().bps(), "set_discount");
    render(session)
}

pub fn show(session: &Session<'_>) -> String {
    render(session)
}

pub fn show_json(session: &Session<'_>) -> Result<String, AppError> {
    let response = InvoiceResponse::from(session.invoice.snapshot());
    serde_json::to_string_pretty(&response)
        .map_err(|e| AppError::internal(format!("Cannot serialize invoice: {}", e)))
}

/// Empties the invoice and clears the discount.
pub fn reset(session: &mut Session<'_>) -> String {
    let dropped = session.invoice.lines().count();
    session.invoice.reset();
    info!(dropped_lines = dropped, "Invoice reset");
    render(session)
}
