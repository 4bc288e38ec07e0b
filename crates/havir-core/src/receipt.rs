//! # Receipt Exporter
//!
//! Renders an [`InvoiceSnapshot`] into the two documents printed at the
//! counter:
//!
//! ```text
//! ┌──────────────────────────────┐     ┌──────────────────────────────┐
//! │  Customer invoice            │     │  Kitchen slip                │
//! │  ─────────────────────────   │     │  ─────────────────────────   │
//! │  store banner                │     │  daily number, time          │
//! │  invoice id, daily number    │     │  name ........ qty           │
//! │  date, time                  │     │  name ........ qty           │
//! │  name / qty / unit / total   │     │                              │
//! │  subtotal, discount, total   │     │  (no prices)                 │
//! │  footer, address, phone      │     │                              │
//! └──────────────────────────────┘     └──────────────────────────────┘
//! ```
//!
//! Both come as fixed-width text (thermal roll) or as a standalone HTML page.
//! Rendering is pure: the timestamp and receipt numbers arrive in a
//! [`ReceiptHeader`], and the snapshot is only read.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

use crate::error::ValidationError;
use crate::invoice::InvoiceSnapshot;
use crate::locale::{CurrencyFormat, ReceiptLocale};
use crate::money::Money;

/// Default paper width in characters (80mm roll, font A).
pub const DEFAULT_RECEIPT_WIDTH: usize = 42;

const QTY_WIDTH: usize = 5;

// =============================================================================
// Inputs
// =============================================================================

/// Per-print identification, supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptHeader {
    /// Unique id of this printed invoice.
    pub invoice_id: Uuid,

    /// Running number of the order within the business day.
    pub daily_number: u32,

    /// When the receipt was issued, in the counter's local offset.
    pub issued_at: DateTime<FixedOffset>,
}

impl ReceiptHeader {
    /// First eight hex digits of the invoice id, as printed.
    pub fn short_id(&self) -> String {
        self.invoice_id.simple().to_string()[..8].to_string()
    }
}

/// Store details printed on the customer invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreProfile {
    pub name: String,
    pub address_lines: Vec<String>,
    pub phone: Option<String>,
    /// Closing line under the totals.
    pub footer: Option<String>,
}

impl Default for StoreProfile {
    fn default() -> Self {
        StoreProfile {
            name: "هاویر".to_string(),
            address_lines: Vec::new(),
            phone: None,
            footer: Some("هاویر به یاد می ماند".to_string()),
        }
    }
}

/// Output flavour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Text,
    Html,
}

impl DocumentKind {
    /// File extension for saved receipts.
    pub const fn extension(&self) -> &'static str {
        match self {
            DocumentKind::Text => "txt",
            DocumentKind::Html => "html",
        }
    }
}

impl Default for DocumentKind {
    fn default() -> Self {
        DocumentKind::Text
    }
}

impl FromStr for DocumentKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "txt" => Ok(DocumentKind::Text),
            "html" => Ok(DocumentKind::Html),
            _ => Err(ValidationError::NotAllowed {
                field: "receipt format".to_string(),
                allowed: vec!["text".to_string(), "html".to_string()],
            }),
        }
    }
}

/// Layout and localisation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptFormat {
    /// Characters per line for text output.
    pub width: usize,
    pub locale: ReceiptLocale,
    pub currency: CurrencyFormat,
}

impl Default for ReceiptFormat {
    fn default() -> Self {
        ReceiptFormat {
            width: DEFAULT_RECEIPT_WIDTH,
            locale: ReceiptLocale::default(),
            currency: CurrencyFormat::default(),
        }
    }
}

/// The pair of documents produced by one print.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptBundle {
    pub kind: DocumentKind,
    pub invoice: String,
    pub kitchen_slip: String,
}

// =============================================================================
// Labels
// =============================================================================

struct Labels {
    invoice_title: &'static str,
    slip_title: &'static str,
    invoice_no: &'static str,
    daily_no: &'static str,
    date: &'static str,
    time: &'static str,
    item: &'static str,
    qty: &'static str,
    unit_price: &'static str,
    line_total: &'static str,
    subtotal: &'static str,
    discount: &'static str,
    total: &'static str,
    phone: &'static str,
    no_items: &'static str,
}

static EN_LABELS: Labels = Labels {
    invoice_title: "Invoice",
    slip_title: "Kitchen Slip",
    invoice_no: "Invoice No.",
    daily_no: "Daily No.",
    date: "Date",
    time: "Time",
    item: "Item",
    qty: "Qty",
    unit_price: "Unit Price",
    line_total: "Total",
    subtotal: "Subtotal",
    discount: "Discount",
    total: "Final Total",
    phone: "Tel",
    no_items: "(no items)",
};

static FA_LABELS: Labels = Labels {
    invoice_title: "فاکتور فروش",
    slip_title: "فیش خلاصه",
    invoice_no: "شماره فاکتور",
    daily_no: "شماره روزانه",
    date: "تاریخ",
    time: "ساعت",
    item: "کالا و خدمات",
    qty: "تعداد",
    unit_price: "فی",
    line_total: "مبلغ",
    subtotal: "جمع کل",
    discount: "تخفیف",
    total: "جمع نهایی",
    phone: "تلفن",
    no_items: "(بدون قلم)",
};

fn labels(locale: ReceiptLocale) -> &'static Labels {
    match locale {
        ReceiptLocale::En => &EN_LABELS,
        ReceiptLocale::Fa => &FA_LABELS,
    }
}

// =============================================================================
// Exporter
// =============================================================================

/// Renders snapshots with one store profile and format.
#[derive(Debug, Clone)]
pub struct ReceiptExporter<'a> {
    store: &'a StoreProfile,
    format: &'a ReceiptFormat,
}

impl<'a> ReceiptExporter<'a> {
    pub fn new(store: &'a StoreProfile, format: &'a ReceiptFormat) -> Self {
        ReceiptExporter { store, format }
    }

    /// Renders both documents in the requested flavour.
    pub fn export(
        &self,
        snapshot: &InvoiceSnapshot,
        header: &ReceiptHeader,
        kind: DocumentKind,
    ) -> ReceiptBundle {
        let (invoice, kitchen_slip) = match kind {
            DocumentKind::Text => (
                self.render_invoice_text(snapshot, header),
                self.render_kitchen_slip_text(snapshot, header),
            ),
            DocumentKind::Html => (
                self.render_invoice_html(snapshot, header),
                self.render_kitchen_slip_html(snapshot, header),
            ),
        };

        ReceiptBundle {
            kind,
            invoice,
            kitchen_slip,
        }
    }

    fn locale(&self) -> ReceiptLocale {
        self.format.locale
    }

    fn money(&self, amount: Money) -> String {
        self.format.currency.format(amount, self.locale())
    }

    fn amount(&self, amount: Money) -> String {
        self.format.currency.format_amount(amount, self.locale())
    }

    fn number(&self, n: u64) -> String {
        self.locale().format_integer(n as i64)
    }

    // -------------------------------------------------------------------------
    // Text
    // -------------------------------------------------------------------------

    /// Two text columns in reading order: `start` leads, `end` trails.
    ///
    /// Right-to-left locales mirror the row, so `start` sits flush right.
    fn row(&self, start: &str, end: &str) -> String {
        if self.locale().is_rtl() {
            mirrored_columns(start, end, self.format.width)
        } else {
            columns(start, end, self.format.width)
        }
    }

    /// Item name, quantity and amount in reading order.
    fn item_row(&self, name: &str, qty: &str, amount: &str) -> String {
        if self.locale().is_rtl() {
            let figures = format!("{:<10}  {:>w$}", amount, qty, w = QTY_WIDTH);
            mirrored_columns(name, &figures, self.format.width)
        } else {
            let figures = format!("{:>w$}  {:>10}", qty, amount, w = QTY_WIDTH);
            columns(name, &figures, self.format.width)
        }
    }

    /// Fixed-width customer invoice.
    ///
    /// ```text
    /// en:  Tea              2      40,000
    ///      Final Total      40,500 تومان
    /// fa:  ۴۰٬۰۰۰          ۲          چای
    ///      ۴۰٬۵۰۰ تومان         جمع نهایی
    /// ```
    pub fn render_invoice_text(&self, snapshot: &InvoiceSnapshot, header: &ReceiptHeader) -> String {
        let width = self.format.width;
        let l = labels(self.locale());
        let locale = self.locale();
        let mut out = String::new();

        push_line(&mut out, &center(&self.store.name, width));
        push_line(&mut out, &center(l.invoice_title, width));
        push_line(&mut out, &"=".repeat(width));
        push_line(&mut out, &self.row(&format!("{}: {}", l.invoice_no, header.short_id()), ""));
        push_line(
            &mut out,
            &self.row(
                &format!("{}: {}", l.daily_no, self.number(header.daily_number as u64)),
                &format!("{}: {}", l.time, locale.format_time(&header.issued_at)),
            ),
        );
        push_line(
            &mut out,
            &self.row(&format!("{}: {}", l.date, locale.format_date(&header.issued_at)), ""),
        );
        push_line(&mut out, &"-".repeat(width));
        push_line(&mut out, &self.item_row(l.item, l.qty, l.line_total));
        push_line(&mut out, &"-".repeat(width));

        if snapshot.lines.is_empty() {
            push_line(&mut out, &center(l.no_items, width));
        }
        for line in &snapshot.lines {
            push_line(
                &mut out,
                &self.item_row(
                    &line.name,
                    &self.number(line.quantity as u64),
                    &self.amount(line.line_total),
                ),
            );
            push_line(
                &mut out,
                &self.row(&format!("  {} {}", l.unit_price, self.amount(line.unit_price)), ""),
            );
        }

        let totals = &snapshot.totals;
        push_line(&mut out, &"-".repeat(width));
        push_line(&mut out, &self.row(l.subtotal, &self.money(totals.subtotal)));
        push_line(
            &mut out,
            &self.row(
                &format!("{} ({})", l.discount, locale.format_percent(snapshot.discount)),
                &self.money(totals.discount_amount),
            ),
        );
        push_line(&mut out, &self.row(l.total, &self.money(totals.total)));
        push_line(&mut out, &"=".repeat(width));

        if let Some(footer) = &self.store.footer {
            push_line(&mut out, &center(footer, width));
        }
        for address in &self.store.address_lines {
            push_line(&mut out, &center(address, width));
        }
        if let Some(phone) = &self.store.phone {
            push_line(
                &mut out,
                &center(&format!("{}: {}", l.phone, locale.localize_digits(phone)), width),
            );
        }

        out
    }

    /// Fixed-width kitchen slip: names and quantities only.
    pub fn render_kitchen_slip_text(
        &self,
        snapshot: &InvoiceSnapshot,
        header: &ReceiptHeader,
    ) -> String {
        let width = self.format.width;
        let l = labels(self.locale());
        let mut out = String::new();

        push_line(&mut out, &center(l.slip_title, width));
        push_line(&mut out, &"=".repeat(width));
        push_line(
            &mut out,
            &self.row(
                &format!("{}: {}", l.daily_no, self.number(header.daily_number as u64)),
                &format!("{}: {}", l.time, self.locale().format_time(&header.issued_at)),
            ),
        );
        push_line(&mut out, &"-".repeat(width));
        push_line(&mut out, &self.row(l.item, l.qty));
        push_line(&mut out, &"-".repeat(width));

        if snapshot.lines.is_empty() {
            push_line(&mut out, &center(l.no_items, width));
        }
        for line in &snapshot.lines {
            push_line(&mut out, &self.row(&line.name, &self.number(line.quantity as u64)));
        }
        push_line(&mut out, &"=".repeat(width));

        out
    }

    // -------------------------------------------------------------------------
    // HTML
    // -------------------------------------------------------------------------

    /// Standalone printable HTML customer invoice.
    pub fn render_invoice_html(&self, snapshot: &InvoiceSnapshot, header: &ReceiptHeader) -> String {
        let l = labels(self.locale());
        let locale = self.locale();
        let mut body = String::new();

        body.push_str(&format!("<h1>{}</h1>\n", escape_html(&self.store.name)));
        body.push_str(&format!(
            "<div class=\"meta\"><span>{}: {}</span><span>{}: {}</span></div>\n",
            l.invoice_no,
            header.short_id(),
            l.daily_no,
            self.number(header.daily_number as u64)
        ));
        body.push_str(&format!(
            "<div class=\"meta\"><span>{}: {}</span><span>{}: {}</span></div>\n",
            l.date,
            locale.format_date(&header.issued_at),
            l.time,
            locale.format_time(&header.issued_at)
        ));

        body.push_str("<table>\n<thead>\n<tr>");
        for heading in [l.item, l.qty, l.unit_price, l.line_total] {
            body.push_str(&format!("<th>{}</th>", heading));
        }
        body.push_str("</tr>\n</thead>\n<tbody>\n");

        for line in &snapshot.lines {
            body.push_str(&format!(
                "<tr><td><div class=\"item-name\">{}</div><div class=\"item-category\">{}</div></td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                escape_html(&line.name),
                escape_html(&line.category),
                self.number(line.quantity as u64),
                self.amount(line.unit_price),
                self.amount(line.line_total)
            ));
        }
        if snapshot.lines.is_empty() {
            body.push_str(&format!("<tr><td colspan=\"4\">{}</td></tr>\n", l.no_items));
        }

        let totals = &snapshot.totals;
        body.push_str(&format!(
            "<tr><td colspan=\"3\">{}:</td><td>{}</td></tr>\n",
            l.subtotal,
            self.money(totals.subtotal)
        ));
        body.push_str(&format!(
            "<tr><td colspan=\"3\">{} ({}):</td><td>{}</td></tr>\n",
            l.discount,
            locale.format_percent(snapshot.discount),
            self.money(totals.discount_amount)
        ));
        body.push_str(&format!(
            "<tr class=\"final-total\"><td colspan=\"3\">{}:</td><td>{}</td></tr>\n",
            l.total,
            self.money(totals.total)
        ));
        body.push_str("</tbody>\n</table>\n");

        if let Some(footer) = &self.store.footer {
            body.push_str(&format!("<h1>{}</h1>\n", escape_html(footer)));
        }
        let mut details: Vec<String> = self.store.address_lines.iter().map(|a| escape_html(a)).collect();
        if let Some(phone) = &self.store.phone {
            details.push(format!("{}: {}", l.phone, escape_html(&locale.localize_digits(phone))));
        }
        if !details.is_empty() {
            body.push_str(&format!("<p>{}</p>\n", details.join("<br>\n")));
        }

        self.html_page(&format!("{} - {}", l.invoice_title, self.store.name), &body)
    }

    /// Standalone printable HTML kitchen slip.
    pub fn render_kitchen_slip_html(
        &self,
        snapshot: &InvoiceSnapshot,
        header: &ReceiptHeader,
    ) -> String {
        let l = labels(self.locale());
        let mut body = String::new();

        body.push_str(&format!("<h1>{}</h1>\n", l.slip_title));
        body.push_str(&format!(
            "<div class=\"meta\"><span>{}: {}</span><span>{}: {}</span></div>\n",
            l.daily_no,
            self.number(header.daily_number as u64),
            l.time,
            self.locale().format_time(&header.issued_at)
        ));
        body.push_str(&format!(
            "<table>\n<thead>\n<tr><th>{}</th><th>{}</th></tr>\n</thead>\n<tbody>\n",
            l.item, l.qty
        ));
        for line in &snapshot.lines {
            body.push_str(&format!(
                "<tr><td>{}</td><td>{}</td></tr>\n",
                escape_html(&line.name),
                self.number(line.quantity as u64)
            ));
        }
        if snapshot.lines.is_empty() {
            body.push_str(&format!("<tr><td colspan=\"2\">{}</td></tr>\n", l.no_items));
        }
        body.push_str("</tbody>\n</table>\n");

        self.html_page(l.slip_title, &body)
    }

    fn html_page(&self, title: &str, body: &str) -> String {
        let dir = if self.locale().is_rtl() { "rtl" } else { "ltr" };
        let align = if self.locale().is_rtl() { "right" } else { "left" };

        format!(
            "<!DOCTYPE html>\n<html lang=\"{lang}\" dir=\"{dir}\">\n<head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n<style>\n\
body {{ font-family: 'BYekan', 'Vazirmatn', sans-serif; text-align: {align}; margin: 20px; font-size: 1.5rem; }}\n\
table {{ width: 100%; border-collapse: collapse; margin-bottom: 20px; }}\n\
th, td {{ padding: 10px; border: 1px solid #000; text-align: {align}; }}\n\
th {{ background-color: #f2f2f2; }}\n\
h1 {{ color: #ffffff; background-color: #000000; }}\n\
.meta {{ display: flex; justify-content: space-between; }}\n\
.item-category {{ font-size: 0.8em; color: #555; }}\n\
.final-total {{ font-weight: bold; }}\n\
</style>\n</head>\n<body>\n{body}</body>\n</html>\n",
            lang = self.locale().tag(),
            dir = dir,
            title = escape_html(title),
            align = align,
            body = body,
        )
    }
}

// =============================================================================
// Layout Helpers
// =============================================================================

fn push_line(out: &mut String, line: &str) {
    out.push_str(line.trim_end());
    out.push('\n');
}

fn display_width(s: &str) -> usize {
    s.chars().count()
}

/// Cuts `s` to at most `max` characters, marking the cut with `…`.
fn truncate(s: &str, max: usize) -> String {
    if display_width(s) <= max {
        return s.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut cut: String = s.chars().take(max - 1).collect();
    cut.push('…');
    cut
}

fn center(s: &str, width: usize) -> String {
    let s = truncate(s, width);
    let pad = width.saturating_sub(display_width(&s)) / 2;
    format!("{}{}", " ".repeat(pad), s)
}

/// `left` flush left and `right` flush right on one line.
///
/// `left` is truncated when both do not fit; `right` never is.
fn columns(left: &str, right: &str, width: usize) -> String {
    let right_width = display_width(right);
    let room = width.saturating_sub(right_width + 1).max(1);
    let left = truncate(left, room);
    let gap = width.saturating_sub(display_width(&left) + right_width).max(1);
    format!("{}{}{}", left, " ".repeat(gap), right)
}

/// [`columns`] for right-to-left text: `end` flush left, `start` flush right.
///
/// `start` is truncated when both do not fit; `end` never is.
fn mirrored_columns(start: &str, end: &str, width: usize) -> String {
    let end_width = display_width(end);
    let room = width.saturating_sub(end_width + 1).max(1);
    let start = truncate(start, room);
    let gap = width.saturating_sub(display_width(&start) + end_width).max(1);
    format!("{}{}{}", end, " ".repeat(gap), start)
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::invoice::InvoiceEngine;
    use crate::types::EntryId;
    use chrono::TimeZone;

    fn header() -> ReceiptHeader {
        let offset = FixedOffset::east_opt(3 * 3600 + 1800).unwrap();
        ReceiptHeader {
            invoice_id: Uuid::parse_str("550e8400-e29b-41d4-a716-446655440000").unwrap(),
            daily_number: 12,
            issued_at: offset.with_ymd_and_hms(2024, 3, 9, 12, 5, 0).unwrap(),
        }
    }

    fn store() -> StoreProfile {
        StoreProfile {
            name: "Havir".to_string(),
            address_lines: vec!["Coastal Street".to_string()],
            phone: Some("09100000000".to_string()),
            footer: Some("Thank you".to_string()),
        }
    }

    fn english() -> ReceiptFormat {
        ReceiptFormat {
            width: 32,
            locale: ReceiptLocale::En,
            currency: CurrencyFormat::default(),
        }
    }

    fn snapshot() -> InvoiceSnapshot {
        let catalog = Catalog::from_json(
            r#"{"Drinks": [
                {"id": 1, "name": "Tea", "price": 20000},
                {"id": 2, "name": "<Special> & Co", "price": 5000}
            ]}"#,
            &CurrencyFormat::default(),
        )
        .unwrap();
        let mut invoice = InvoiceEngine::new(&catalog);
        invoice.add_item(&EntryId::from(1u64)).unwrap();
        invoice.add_item(&EntryId::from(1u64)).unwrap();
        invoice.add_item(&EntryId::from(2u64)).unwrap();
        invoice.set_discount_percent(10.0);
        invoice.snapshot()
    }

    #[test]
    fn test_short_id() {
        assert_eq!(header().short_id(), "550e8400");
    }

    #[test]
    fn test_invoice_text_contents() {
        let store = store();
        let format = english();
        let text = ReceiptExporter::new(&store, &format).render_invoice_text(&snapshot(), &header());

        assert!(text.contains("Havir"));
        assert!(text.contains("Invoice No.: 550e8400"));
        assert!(text.contains("Daily No.: 12"));
        assert!(text.contains("Date: 2024/03/09"));
        assert!(text.contains("Time: 12:05"));
        assert!(text.contains("Tea"));
        assert!(text.contains("40,000"));
        assert!(text.contains("Unit Price 20,000"));
        assert!(text.contains("Discount (10%)"));
        assert!(text.contains("4,500 تومان"));
        assert!(text.contains("40,500 تومان"));
        assert!(text.contains("Tel: 09100000000"));
    }

    #[test]
    fn test_text_lines_fit_width() {
        let store = store();
        let format = english();
        let exporter = ReceiptExporter::new(&store, &format);
        let bundle = exporter.export(&snapshot(), &header(), DocumentKind::Text);

        for line in bundle.invoice.lines().chain(bundle.kitchen_slip.lines()) {
            assert!(
                display_width(line) <= 32,
                "line too wide ({}): {line:?}",
                display_width(line)
            );
        }
    }

    #[test]
    fn test_kitchen_slip_has_no_prices() {
        let store = store();
        let format = english();
        let slip = ReceiptExporter::new(&store, &format).render_kitchen_slip_text(&snapshot(), &header());

        assert!(slip.contains("Kitchen Slip"));
        assert!(slip.contains("Tea"));
        assert!(!slip.contains("20,000"));
        assert!(!slip.contains("تومان"));
    }

    #[test]
    fn test_persian_invoice_uses_persian_digits() {
        let store = StoreProfile::default();
        let format = ReceiptFormat {
            width: 42,
            ..ReceiptFormat::default()
        };
        let text = ReceiptExporter::new(&store, &format).render_invoice_text(&snapshot(), &header());

        assert!(text.contains("هاویر"));
        assert!(text.contains("جمع نهایی"));
        assert!(text.contains("۴۰٬۵۰۰ تومان"));
        assert!(text.contains("تخفیف (۱۰٪)"));
        assert!(!text.contains("40,500"));
    }

    #[test]
    fn test_invoice_html_is_rtl_and_escaped() {
        let store = StoreProfile::default();
        let format = ReceiptFormat::default();
        let html = ReceiptExporter::new(&store, &format).render_invoice_html(&snapshot(), &header());

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("dir=\"rtl\""));
        assert!(html.contains("&lt;Special&gt; &amp; Co"));
        assert!(!html.contains("<Special>"));
        assert!(html.contains("class=\"final-total\""));
    }

    #[test]
    fn test_kitchen_slip_html() {
        let store = store();
        let format = english();
        let html = ReceiptExporter::new(&store, &format).render_kitchen_slip_html(&snapshot(), &header());

        assert!(html.contains("dir=\"ltr\""));
        assert!(html.contains("<tr><td>Tea</td><td>2</td></tr>"));
        assert!(!html.contains("20,000"));
    }

    #[test]
    fn test_empty_invoice_still_renders() {
        let store = store();
        let format = english();
        let bundle = ReceiptExporter::new(&store, &format).export(
            &InvoiceSnapshot::default(),
            &header(),
            DocumentKind::Html,
        );

        assert_eq!(bundle.kind, DocumentKind::Html);
        assert!(bundle.invoice.contains("(no items)"));
        assert!(bundle.kitchen_slip.contains("(no items)"));
    }

    #[test]
    fn test_document_kind_from_str() {
        assert_eq!("HTML".parse::<DocumentKind>().unwrap(), DocumentKind::Html);
        assert_eq!("txt".parse::<DocumentKind>().unwrap(), DocumentKind::Text);
        assert!("pdf".parse::<DocumentKind>().is_err());
        assert_eq!(DocumentKind::Html.extension(), "html");
    }

    #[test]
    fn test_columns_and_truncate() {
        assert_eq!(columns("Tea", "2", 10), "Tea      2");
        assert_eq!(truncate("Espresso", 5), "Espr…");
        assert_eq!(columns("Very long item name", "99", 10), "Very l… 99");
        assert_eq!(center("ab", 6), "  ab");
        assert_eq!(mirrored_columns("Tea", "2", 10), "2      Tea");
        assert_eq!(mirrored_columns("Very long item name", "99", 10), "99 Very l…");
    }

    #[test]
    fn test_persian_text_columns_are_mirrored() {
        let store = StoreProfile::default();
        let format = ReceiptFormat {
            width: 42,
            ..ReceiptFormat::default()
        };
        let exporter = ReceiptExporter::new(&store, &format);
        let bundle = exporter.export(&snapshot(), &header(), DocumentKind::Text);

        let find = |text: &str, needle: &str| {
            text.lines()
                .find(|line| line.contains(needle))
                .map(str::to_string)
                .unwrap()
        };

        // Item name on the right, amount on the left
        let tea = find(&bundle.invoice, "Tea");
        assert!(tea.ends_with("Tea"), "{tea:?}");
        assert!(tea.starts_with("۴۰٬۰۰۰"), "{tea:?}");

        let total = find(&bundle.invoice, "جمع نهایی");
        assert!(total.ends_with("جمع نهایی"), "{total:?}");
        assert!(total.starts_with("۴۰٬۵۰۰ تومان"), "{total:?}");

        let invoice_no = find(&bundle.invoice, "شماره فاکتور");
        assert!(invoice_no.starts_with(' '));
        assert_eq!(display_width(&invoice_no), 42);

        let slip_tea = find(&bundle.kitchen_slip, "Tea");
        assert!(slip_tea.starts_with('۲'), "{slip_tea:?}");
        assert!(slip_tea.ends_with("Tea"));

        for line in bundle.invoice.lines().chain(bundle.kitchen_slip.lines()) {
            assert!(display_width(line) <= 42, "line too wide: {line:?}");
        }
    }

    #[test]
    fn test_english_text_columns_stay_left_to_right() {
        let store = store();
        let format = english();
        let text = ReceiptExporter::new(&store, &format).render_invoice_text(&snapshot(), &header());

        let tea = text.lines().find(|line| line.contains("Tea")).unwrap();
        assert!(tea.starts_with("Tea"));
        assert!(tea.ends_with("40,000"));
    }
}
