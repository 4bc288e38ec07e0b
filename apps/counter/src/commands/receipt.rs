//! # Receipt Commands
//!
//! Printing the customer invoice and the kitchen slip.
//!
//! ## Print Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  print                                                                  │
//! │    │                                                                    │
//! │    ▼                                                                    │
//! │  invoice empty? ──yes──► error, nothing printed                         │
//! │    │ no                                                                 │
//! │    ▼                                                                    │
//! │  header = new v4 id + next daily number + local time                    │
//! │    │                                                                    │
//! │    ▼                                                                    │
//! │  ReceiptExporter::export(snapshot, header, kind)                        │
//! │    │                                                                    │
//! │    ├── HAVIR_RECEIPT_DIR set ──► <dir>/<n>-invoice.<ext>                │
//! │    │                             <dir>/<n>-kitchen.<ext>                │
//! │    └── otherwise ──────────────► both documents to stdout               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The invoice itself is left as it was; `reset` starts the next order.

use std::path::{Path, PathBuf};

use chrono::{DateTime, FixedOffset, Local};
use havir_core::{ReceiptBundle, ReceiptHeader};
use tracing::info;

use crate::error::AppError;
use crate::state::Session;

/// Prints with the current local time.
pub fn print(session: &mut Session<'_>) -> Result<String, AppError> {
    print_at(session, Local::now().fixed_offset())
}

/// Prints as if issued at `now`.
pub fn print_at(session: &mut Session<'_>, now: DateTime<FixedOffset>) -> Result<String, AppError> {
    if session.invoice.is_empty() {
        return Err(AppError::validation("Nothing to print: the invoice is empty"));
    }

    let snapshot = session.invoice.snapshot();
    let header = session.next_header(now);
    let config = session.config();
    let bundle = session.exporter().export(&snapshot, &header, config.receipt_kind);

    info!(
        invoice_id = %header.invoice_id,
        daily_number = header.daily_number,
        total = snapshot.totals.total.minor(),
        "Receipt printed"
    );

    match &config.receipt_dir {
        Some(dir) => {
            let (invoice, kitchen) = save(dir, &header, &bundle)?;
            Ok(format!(
                "Saved receipt #{}:\n  {}\n  {}",
                header.daily_number,
                invoice.display(),
                kitchen.display()
            ))
        }
        None => Ok(format!("{}\n\n{}", bundle.invoice, bundle.kitchen_slip)),
    }
}

/// Writes both documents, returning their paths.
fn save(dir: &Path, header: &ReceiptHeader, bundle: &ReceiptBundle) -> Result<(PathBuf, PathBuf), AppError> {
    std::fs::create_dir_all(dir)?;

    let ext = bundle.kind.extension();
    let invoice = dir.join(format!("{}-invoice.{}", header.daily_number, ext));
    let kitchen = dir.join(format!("{}-kitchen.{}", header.daily_number, ext));

    std::fs::write(&invoice, &bundle.invoice)?;
    std::fs::write(&kitchen, &bundle.kitchen_slip)?;

    Ok((invoice, kitchen))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::state::CounterConfig;
    use chrono::TimeZone;
    use havir_core::{Catalog, CurrencyFormat, DocumentKind, EntryId, ReceiptLocale};
    use uuid::Uuid;

    fn catalog() -> Catalog {
        Catalog::from_json(
            r#"{"Drinks": [{"id": 1, "name": "Tea", "price": 20000}]}"#,
            &CurrencyFormat::default(),
        )
        .unwrap()
    }

    fn noon() -> DateTime<FixedOffset> {
        FixedOffset::east_opt(3 * 3600 + 1800)
            .unwrap()
            .with_ymd_and_hms(2024, 3, 20, 12, 5, 0)
            .unwrap()
    }

    #[test]
    fn test_print_empty_invoice_is_refused() {
        let catalog = catalog();
        let config = CounterConfig::default();
        let mut session = Session::new(&catalog, &config);

        let err = print_at(&mut session, noon()).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(session.receipts_issued(), 0);
    }

    #[test]
    fn test_print_to_stdout() {
        let catalog = catalog();
        let mut config = CounterConfig::default();
        config.receipt.locale = ReceiptLocale::En;
        let mut session = Session::new(&catalog, &config);
        session.invoice.add_item(&EntryId::from(1u64)).unwrap();

        let text = print_at(&mut session, noon()).unwrap();
        assert!(text.contains("Invoice"));
        assert!(text.contains("Kitchen Slip"));
        assert!(text.contains("2024/03/20"));

        // Printing leaves the invoice as it was
        assert_eq!(session.invoice.quantity_of(&EntryId::from(1u64)), Some(1));
        assert_eq!(session.receipts_issued(), 1);
    }

    #[test]
    fn test_print_to_directory() {
        let catalog = catalog();
        let dir = std::env::temp_dir().join(format!("havir-receipts-{}", Uuid::new_v4()));
        let mut config = CounterConfig::default();
        config.receipt_dir = Some(dir.clone());
        config.receipt_kind = DocumentKind::Html;
        let mut session = Session::new(&catalog, &config);
        session.invoice.add_item(&EntryId::from(1u64)).unwrap();

        print_at(&mut session, noon()).unwrap();
        let message = print_at(&mut session, noon()).unwrap();
        assert!(message.starts_with("Saved receipt #2"));

        let invoice = std::fs::read_to_string(dir.join("2-invoice.html")).unwrap();
        assert!(invoice.contains("dir=\"rtl\""));
        assert!(dir.join("1-kitchen.html").exists());

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
