//! # Terminal Views
//!
//! Plain-text screens printed after each command.
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │  Categories: [1] Drinks  2 Food          │  render_categories
//! │                                          │
//! │  Drinks                                  │  render_menu
//! │    1    Tea ............. 20,000 T  x2   │
//! │                                          │
//! │  #  Item        Qty    Unit     Total    │  render_invoice
//! │  1  Tea           2  20,000    40,000    │
//! │  Subtotal                      40,000    │
//! │  Discount (10%)                -4,000    │
//! │  Total                         36,000    │
//! └──────────────────────────────────────────┘
//! ```
//!
//! Amounts and digits follow the configured receipt locale; the labels are
//! for the operator and stay in English.

use havir_core::{Catalog, Category, InvoiceEngine, InvoiceMode, Money, ReceiptFormat};

const HELP: &str = "\
Commands:
  menu | categories        list categories and the current menu
  category <name|number>   switch the browsed category
  add <id>                 add one of an item to the invoice
  qty <id> <n>             set the quantity (0 or less removes the line)
  inc <id> | dec <id>      change the quantity by one
  remove <id>              drop a line from the invoice
  discount <percent>       set the invoice discount (clamped to 0..100)
  show                     show the invoice
  json                     show the invoice as JSON
  reset                    start a new invoice
  print                    print the invoice and kitchen slip
  help                     this text
  quit | exit              leave the counter";

const EMPTY_INVOICE: &str = "Invoice is empty. Add an item with 'add <id>'.";

pub fn render_help() -> String {
    HELP.to_string()
}

/// One line listing every category, the active one in brackets.
pub fn render_categories(catalog: &Catalog, active: Option<&Category>, format: &ReceiptFormat) -> String {
    let active_name = active.map(Category::name);
    let items: Vec<String> = catalog
        .categories()
        .iter()
        .enumerate()
        .map(|(i, category)| {
            let number = format.locale.format_integer(i as i64 + 1);
            if Some(category.name()) == active_name {
                format!("[{}] {}", number, category.name())
            } else {
                format!("{} {}", number, category.name())
            }
        })
        .collect();

    format!("Categories: {}", items.join("  "))
}

/// Entries of `category`, marking the quantity already on the invoice.
pub fn render_menu(category: &Category, invoice: &InvoiceEngine<'_>, format: &ReceiptFormat) -> String {
    let mut out = String::new();
    out.push_str(category.name());
    out.push('\n');

    if category.entries().is_empty() {
        out.push_str("  (no items)\n");
        return out;
    }

    let id_width = column_width(category.entries().iter().map(|e| e.id.as_str()), 2);
    let name_width = column_width(category.entries().iter().map(|e| e.name.as_str()), 4);

    for entry in category.entries() {
        let price = format.currency.format(entry.price, format.locale);
        let mut row = format!(
            "  {}  {}  {}",
            pad_right(entry.id.as_str(), id_width),
            pad_right(&entry.name, name_width),
            price
        );
        if let Some(qty) = invoice.quantity_of(&entry.id) {
            row.push_str(&format!("  x{}", format.locale.format_integer(i64::from(qty))));
        }
        out.push_str(&row);
        out.push('\n');
    }

    out
}

/// The running invoice: a placeholder when empty, else lines and totals.
pub fn render_invoice(invoice: &InvoiceEngine<'_>, format: &ReceiptFormat) -> String {
    if invoice.mode() == InvoiceMode::Empty {
        return EMPTY_INVOICE.to_string();
    }

    let locale = format.locale;
    let money = |amount: Money| format.currency.format(amount, locale);
    let totals = invoice.compute_totals();

    let rows: Vec<[String; 5]> = invoice
        .lines()
        .map(|line| {
            let entry = line.entry();
            [
                entry.id.to_string(),
                entry.name.clone(),
                locale.format_integer(i64::from(line.quantity())),
                money(entry.price),
                money(line.line_total()),
            ]
        })
        .collect();

    let header = ["#", "Item", "Qty", "Unit", "Total"].map(str::to_string);
    let widths: Vec<usize> = (0..5)
        .map(|col| {
            rows.iter()
                .chain(std::iter::once(&header))
                .map(|r| char_width(&r[col]))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let render_row = |r: &[String; 5]| {
        format!(
            "{}  {}  {}  {}  {}",
            pad_right(&r[0], widths[0]),
            pad_right(&r[1], widths[1]),
            pad_left(&r[2], widths[2]),
            pad_left(&r[3], widths[3]),
            pad_left(&r[4], widths[4]),
        )
    };

    let mut lines = vec![render_row(&header)];
    lines.extend(rows.iter().map(render_row));
    let table_width = lines.iter().map(|l| char_width(l)).max().unwrap_or(0);
    lines.push("-".repeat(table_width));

    let mut summary = vec![("Subtotal".to_string(), money(totals.subtotal))];
    if !invoice.discount().is_zero() {
        summary.push((
            format!("Discount ({})", locale.format_percent(invoice.discount())),
            money(Money::zero() - totals.discount_amount),
        ));
    }
    summary.push(("Total".to_string(), money(totals.total)));

    for (label, amount) in summary {
        let gap = table_width.saturating_sub(char_width(&label) + char_width(&amount)).max(2);
        lines.push(format!("{}{}{}", label, " ".repeat(gap), amount));
    }

    lines.push(format!(
        "{} line(s), {} item(s)",
        locale.format_integer(totals.line_count as i64),
        locale.format_integer(totals.total_quantity as i64),
    ));

    lines.join("\n")
}

fn char_width(s: &str) -> usize {
    s.chars().count()
}

fn column_width<'s>(values: impl Iterator<Item = &'s str>, min: usize) -> usize {
    values.map(char_width).max().unwrap_or(0).max(min)
}

fn pad_right(s: &str, width: usize) -> String {
    format!("{}{}", s, " ".repeat(width.saturating_sub(char_width(s))))
}

fn pad_left(s: &str, width: usize) -> String {
    format!("{}{}", " ".repeat(width.saturating_sub(char_width(s))), s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use havir_core::{CurrencyFormat, EntryId, ReceiptLocale};

    fn catalog() -> Catalog {
        Catalog::from_json(
            r#"{"Drinks": [{"id": 1, "name": "Tea", "price": 20000},
                           {"id": 3, "name": "Coffee", "price": 45000}],
                "Food": [{"id": 2, "name": "Kebab", "price": 150000}]}"#,
            &CurrencyFormat::default(),
        )
        .unwrap()
    }

    fn english() -> ReceiptFormat {
        ReceiptFormat {
            locale: ReceiptLocale::En,
            ..ReceiptFormat::default()
        }
    }

    #[test]
    fn test_empty_invoice_placeholder() {
        let catalog = catalog();
        let invoice = InvoiceEngine::new(&catalog);
        assert_eq!(render_invoice(&invoice, &english()), EMPTY_INVOICE);
    }

    #[test]
    fn test_invoice_table() {
        let catalog = catalog();
        let mut invoice = InvoiceEngine::new(&catalog);
        invoice.add_item(&EntryId::from(1u64)).unwrap();
        invoice.add_item(&EntryId::from(1u64)).unwrap();
        invoice.set_discount_percent(10.0);

        let view = render_invoice(&invoice, &english());
        assert!(view.contains("Tea"));
        assert!(view.contains("40,000"));
        assert!(view.contains("Discount (10%)"));
        assert!(view.contains("-4,000"));
        assert!(view.contains("36,000"));
        assert!(view.ends_with("1 line(s), 2 item(s)"));
    }

    #[test]
    fn test_invoice_without_discount_has_no_discount_row() {
        let catalog = catalog();
        let mut invoice = InvoiceEngine::new(&catalog);
        invoice.add_item(&EntryId::from(2u64)).unwrap();

        let view = render_invoice(&invoice, &english());
        assert!(!view.contains("Discount"));
    }

    #[test]
    fn test_categories_marks_active() {
        let catalog = catalog();
        let line = render_categories(&catalog, catalog.category("Food"), &english());
        assert_eq!(line, "Categories: 1 Drinks  [2] Food");
    }

    #[test]
    fn test_persian_digits() {
        let catalog = catalog();
        let line = render_categories(&catalog, catalog.first_category(), &ReceiptFormat::default());
        assert_eq!(line, "Categories: [۱] Drinks  ۲ Food");
    }

    #[test]
    fn test_menu_shows_quantity_on_invoice() {
        let catalog = catalog();
        let mut invoice = InvoiceEngine::new(&catalog);
        invoice.add_item(&EntryId::from(3u64)).unwrap();
        invoice.set_quantity(&EntryId::from(3u64), 4).unwrap();

        let drinks = catalog.category("Drinks").unwrap();
        let menu = render_menu(drinks, &invoice, &english());
        let coffee = menu.lines().find(|l| l.contains("Coffee")).unwrap();
        let tea = menu.lines().find(|l| l.contains("Tea")).unwrap();

        assert!(menu.starts_with("Drinks\n"));
        assert!(coffee.ends_with("x4"));
        assert!(!tea.contains('x'));
    }
}
