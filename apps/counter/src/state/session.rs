//! # Counter Session
//!
//! One operator at one counter: the running invoice, the category being
//! browsed and the receipt numbering for the day.
//!
//! ## Session Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Session Lifecycle                                    │
//! │                                                                         │
//! │  Session::new ──► active category = first in file                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  add / qty / discount ──► invoice (InvoiceEngine)                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  print ──► next_header() ──► daily number +1 (resets at midnight)       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  reset ──► invoice emptied, numbering kept                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, FixedOffset, NaiveDate};
use havir_core::locale::delocalize_digits;
use havir_core::{Catalog, Category, InvoiceEngine, ReceiptExporter, ReceiptHeader};
use uuid::Uuid;

use super::CounterConfig;
use crate::error::AppError;

/// Running order number within one business day.
///
/// The first receipt of a day is number 1.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DailyCounter {
    day: Option<NaiveDate>,
    last: u32,
}

impl DailyCounter {
    /// Returns the number for a receipt issued at `now`.
    pub fn next(&mut self, now: &DateTime<FixedOffset>) -> u32 {
        let today = now.date_naive();
        if self.day != Some(today) {
            self.day = Some(today);
            self.last = 0;
        }
        self.last = self.last.saturating_add(1);
        self.last
    }

    /// Number of receipts issued so far today.
    pub fn issued(&self) -> u32 {
        self.last
    }
}

/// The counter's mutable state.
#[derive(Debug)]
pub struct Session<'a> {
    pub invoice: InvoiceEngine<'a>,
    config: &'a CounterConfig,
    active_category: usize,
    counter: DailyCounter,
}

impl<'a> Session<'a> {
    pub fn new(catalog: &'a Catalog, config: &'a CounterConfig) -> Self {
        Session {
            invoice: InvoiceEngine::new(catalog),
            config,
            active_category: 0,
            counter: DailyCounter::default(),
        }
    }

    pub fn catalog(&self) -> &'a Catalog {
        self.invoice.catalog()
    }

    pub fn config(&self) -> &'a CounterConfig {
        self.config
    }

    /// Exporter bound to the configured store and format.
    pub fn exporter(&self) -> ReceiptExporter<'a> {
        ReceiptExporter::new(&self.config.store, &self.config.receipt)
    }

    /// The category currently shown, `None` only for a catalog without
    /// categories.
    pub fn active_category(&self) -> Option<&'a Category> {
        self.catalog().categories().get(self.active_category)
    }

    /// Switches the browsed category.
    ///
    /// Accepts an exact category name or its 1-based position (Persian
    /// digits allowed).
    pub fn select_category(&mut self, selector: &str) -> Result<&'a Category, AppError> {
        let selector = selector.trim();
        let categories = self.catalog().categories();

        let position = categories
            .iter()
            .position(|c| c.name() == selector)
            .or_else(|| {
                delocalize_digits(selector)
                    .parse::<usize>()
                    .ok()
                    .filter(|n| (1..=categories.len()).contains(n))
                    .map(|n| n - 1)
            })
            .ok_or_else(|| AppError::not_found("Category", selector))?;

        self.active_category = position;
        Ok(&categories[position])
    }

    /// Identification for the next printed receipt.
    pub fn next_header(&mut self, now: DateTime<FixedOffset>) -> ReceiptHeader {
        ReceiptHeader {
            invoice_id: Uuid::new_v4(),
            daily_number: self.counter.next(&now),
            issued_at: now,
        }
    }

    pub fn receipts_issued(&self) -> u32 {
        self.counter.issued()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn catalog() -> Catalog {
        Catalog::from_json(
            r#"{"Drinks": [{"id": 1, "name": "Tea", "price": 20000}],
                "Food": [{"id": 2, "name": "Kebab", "price": 150000}]}"#,
            &Default::default(),
        )
        .unwrap()
    }

    fn at(day: u32, hour: u32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(3 * 3600 + 1800)
            .unwrap()
            .with_ymd_and_hms(2024, 3, day, hour, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_starts_on_first_category() {
        let catalog = catalog();
        let config = CounterConfig::default();
        let session = Session::new(&catalog, &config);

        assert_eq!(session.active_category().unwrap().name(), "Drinks");
        assert!(session.invoice.is_empty());
    }

    #[test]
    fn test_select_category() {
        let catalog = catalog();
        let config = CounterConfig::default();
        let mut session = Session::new(&catalog, &config);

        assert_eq!(session.select_category("Food").unwrap().name(), "Food");
        assert_eq!(session.select_category("1").unwrap().name(), "Drinks");
        assert_eq!(session.select_category("۲").unwrap().name(), "Food");

        assert!(session.select_category("0").is_err());
        assert!(session.select_category("Desserts").is_err());
        // Failed selection keeps the current one
        assert_eq!(session.active_category().unwrap().name(), "Food");
    }

    #[test]
    fn test_daily_numbering() {
        let mut counter = DailyCounter::default();
        assert_eq!(counter.next(&at(1, 9)), 1);
        assert_eq!(counter.next(&at(1, 13)), 2);
        assert_eq!(counter.issued(), 2);

        // New day starts again at 1
        assert_eq!(counter.next(&at(2, 8)), 1);
    }

    #[test]
    fn test_next_header() {
        let catalog = catalog();
        let config = CounterConfig::default();
        let mut session = Session::new(&catalog, &config);

        let first = session.next_header(at(1, 9));
        let second = session.next_header(at(1, 10));

        assert_eq!(first.daily_number, 1);
        assert_eq!(second.daily_number, 2);
        assert_ne!(first.invoice_id, second.invoice_id);
        assert_eq!(second.issued_at, at(1, 10));
        assert_eq!(session.receipts_issued(), 2);
    }
}
