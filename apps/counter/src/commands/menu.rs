//! # Menu Commands
//!
//! Browsing the catalog. Nothing here touches the invoice.

use tracing::debug;

use crate::error::AppError;
use crate::state::Session;
use crate::view;

/// Category list plus the entries of the active category.
pub fn show_menu(session: &Session<'_>) -> String {
    let format = &session.config().receipt;
    let active = session.active_category();

    let mut out = view::render_categories(session.catalog(), active, format);
    if let Some(category) = active {
        out.push_str("\n\n");
        out.push_str(&view::render_menu(category, &session.invoice, format));
    }
    out
}

/// Switches the browsed category by name or 1-based number.
pub fn select_category(session: &mut Session<'_>, selector: &str) -> Result<String, AppError> {
    let category = session.select_category(selector)?;
    debug!(category = category.name(), "Category selected");
    Ok(show_menu(session))
}
