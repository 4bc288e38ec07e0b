//! # Locale Formatting
//!
//! Number, currency and date formatting for receipts and the counter view.
//!
//! The invoice engine only ever sees locale-neutral [`Money`] and
//! [`DiscountRate`] values. Everything a customer reads goes through here:
//!
//! ```text
//! Money(1250000) ──► group ──► "1,250,000" ──► localize ──► "۱٬۲۵۰٬۰۰۰ تومان"
//! ```

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::DiscountRate;

/// Extended Arabic-Indic digits used in Persian text, indexed by value.
const PERSIAN_DIGITS: [char; 10] = ['۰', '۱', '۲', '۳', '۴', '۵', '۶', '۷', '۸', '۹'];

/// Arabic-Indic digits; operators sometimes type these on Arabic layouts.
const ARABIC_DIGITS: [char; 10] = ['٠', '١', '٢', '٣', '٤', '٥', '٦', '٧', '٨', '٩'];

// =============================================================================
// Receipt Locale
// =============================================================================

/// Language and numbering conventions for rendered output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReceiptLocale {
    /// English labels, ASCII digits, `,` grouping.
    En,
    /// Persian labels, Persian digits, `٬` grouping, right-to-left.
    Fa,
}

impl ReceiptLocale {
    /// Whether documents in this locale read right-to-left.
    #[inline]
    pub const fn is_rtl(&self) -> bool {
        matches!(self, ReceiptLocale::Fa)
    }

    /// BCP 47 language tag, used for the HTML `lang` attribute.
    pub const fn tag(&self) -> &'static str {
        match self {
            ReceiptLocale::En => "en",
            ReceiptLocale::Fa => "fa",
        }
    }

    const fn group_separator(&self) -> &'static str {
        match self {
            ReceiptLocale::En => ",",
            ReceiptLocale::Fa => "٬",
        }
    }

    const fn decimal_separator(&self) -> &'static str {
        match self {
            ReceiptLocale::En => ".",
            ReceiptLocale::Fa => "٫",
        }
    }

    /// Replaces ASCII digits with the locale's digits.
    pub fn localize_digits(&self, text: &str) -> String {
        match self {
            ReceiptLocale::En => text.to_string(),
            ReceiptLocale::Fa => text
                .chars()
                .map(|c| match c.to_digit(10) {
                    Some(d) if c.is_ascii_digit() => PERSIAN_DIGITS[d as usize],
                    _ => c,
                })
                .collect(),
        }
    }

    /// Formats an integer with thousands grouping and localized digits.
    ///
    /// ## Example
    /// ```rust
    /// use havir_core::locale::ReceiptLocale;
    ///
    /// assert_eq!(ReceiptLocale::En.format_integer(1_250_000), "1,250,000");
    /// assert_eq!(ReceiptLocale::Fa.format_integer(1_250), "۱٬۲۵۰");
    /// ```
    pub fn format_integer(&self, value: i64) -> String {
        let grouped = group_thousands(value.unsigned_abs(), self.group_separator());
        let sign = if value < 0 { "-" } else { "" };
        self.localize_digits(&format!("{}{}", sign, grouped))
    }

    /// Formats a discount rate as a percentage without trailing zeros.
    ///
    /// ## Example
    /// ```rust
    /// use havir_core::locale::ReceiptLocale;
    /// use havir_core::types::DiscountRate;
    ///
    /// assert_eq!(ReceiptLocale::En.format_percent(DiscountRate::from_bps(1250)), "12.5%");
    /// assert_eq!(ReceiptLocale::En.format_percent(DiscountRate::from_bps(1000)), "10%");
    /// assert_eq!(ReceiptLocale::Fa.format_percent(DiscountRate::from_bps(1000)), "۱۰٪");
    /// ```
    pub fn format_percent(&self, rate: DiscountRate) -> String {
        let whole = rate.bps() / 100;
        let frac = rate.bps() % 100;
        let number = if frac == 0 {
            whole.to_string()
        } else {
            let frac = format!("{:02}", frac);
            format!(
                "{}{}{}",
                whole,
                self.decimal_separator(),
                frac.trim_end_matches('0')
            )
        };
        let sign = match self {
            ReceiptLocale::En => "%",
            ReceiptLocale::Fa => "٪",
        };
        format!("{}{}", self.localize_digits(&number), sign)
    }

    /// Formats a date as `YYYY/MM/DD` with localized digits.
    pub fn format_date(&self, at: &DateTime<FixedOffset>) -> String {
        self.localize_digits(&at.format("%Y/%m/%d").to_string())
    }

    /// Formats a time of day as `HH:MM` with localized digits.
    pub fn format_time(&self, at: &DateTime<FixedOffset>) -> String {
        self.localize_digits(&at.format("%H:%M").to_string())
    }
}

impl Default for ReceiptLocale {
    fn default() -> Self {
        ReceiptLocale::Fa
    }
}

impl fmt::Display for ReceiptLocale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for ReceiptLocale {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" | "en-us" | "english" => Ok(ReceiptLocale::En),
            "fa" | "fa-ir" | "persian" | "farsi" => Ok(ReceiptLocale::Fa),
            _ => Err(ValidationError::NotAllowed {
                field: "locale".to_string(),
                allowed: vec!["en".to_string(), "fa".to_string()],
            }),
        }
    }
}

// =============================================================================
// Currency Format
// =============================================================================

/// How prices are scaled and labelled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyFormat {
    /// Currency code (ISO 4217 where one exists; Toman has none, so `IRT`).
    pub code: String,

    /// Label printed next to amounts.
    pub symbol: String,

    /// Fraction digits of the minor unit (0 for Toman, 2 for USD).
    pub decimals: u32,

    /// Print the symbol after the number (`20,000 Toman`) instead of before.
    pub symbol_after: bool,
}

impl CurrencyFormat {
    /// Largest supported number of fraction digits.
    pub const MAX_DECIMALS: u32 = 4;

    /// Number of minor units in one major unit.
    #[inline]
    pub fn scale(&self) -> i64 {
        10_i64.pow(self.decimals.min(Self::MAX_DECIMALS))
    }

    /// Formats an amount without the currency label.
    ///
    /// ## Example
    /// ```rust
    /// use havir_core::locale::{CurrencyFormat, ReceiptLocale};
    /// use havir_core::money::Money;
    ///
    /// let usd = CurrencyFormat::usd();
    /// assert_eq!(usd.format_amount(Money::from_minor(123_456), ReceiptLocale::En), "1,234.56");
    /// ```
    pub fn format_amount(&self, amount: Money, locale: ReceiptLocale) -> String {
        let scale = self.scale();
        let minor = amount.minor();
        let major = minor.unsigned_abs() / scale as u64;
        let frac = minor.unsigned_abs() % scale as u64;

        let mut text = String::new();
        if minor < 0 {
            text.push('-');
        }
        text.push_str(&group_thousands(major, locale.group_separator()));
        if self.decimals > 0 {
            text.push_str(locale.decimal_separator());
            text.push_str(&format!("{:0width$}", frac, width = self.decimals as usize));
        }
        locale.localize_digits(&text)
    }

    /// Formats an amount with the currency label.
    ///
    /// ## Example
    /// ```rust
    /// use havir_core::locale::{CurrencyFormat, ReceiptLocale};
    /// use havir_core::money::Money;
    ///
    /// let toman = CurrencyFormat::default();
    /// assert_eq!(toman.format(Money::from_minor(36_000), ReceiptLocale::Fa), "۳۶٬۰۰۰ تومان");
    /// ```
    pub fn format(&self, amount: Money, locale: ReceiptLocale) -> String {
        let number = self.format_amount(amount, locale);
        if self.symbol.is_empty() {
            number
        } else if self.symbol_after {
            format!("{} {}", number, self.symbol)
        } else if let Some(unsigned) = number.strip_prefix('-') {
            format!("-{}{}", self.symbol, unsigned)
        } else {
            format!("{}{}", self.symbol, number)
        }
    }

    /// US dollars, mostly useful in tests and demos.
    pub fn usd() -> Self {
        CurrencyFormat {
            code: "USD".to_string(),
            symbol: "$".to_string(),
            decimals: 2,
            symbol_after: false,
        }
    }
}

impl Default for CurrencyFormat {
    /// Iranian Toman: whole units, label after the number.
    fn default() -> Self {
        CurrencyFormat {
            code: "IRT".to_string(),
            symbol: "تومان".to_string(),
            decimals: 0,
            symbol_after: true,
        }
    }
}

// =============================================================================
// Digit Helpers
// =============================================================================

/// Replaces Persian and Arabic-Indic digits with ASCII digits.
///
/// ## Example
/// ```rust
/// use havir_core::locale::delocalize_digits;
///
/// assert_eq!(delocalize_digits("۱۲٫۵"), "12٫5");
/// assert_eq!(delocalize_digits("٣"), "3");
/// ```
pub fn delocalize_digits(text: &str) -> String {
    text.chars()
        .map(|c| {
            PERSIAN_DIGITS
                .iter()
                .position(|&d| d == c)
                .or_else(|| ARABIC_DIGITS.iter().position(|&d| d == c))
                .and_then(|d| char::from_digit(d as u32, 10))
                .unwrap_or(c)
        })
        .collect()
}

/// Groups an unsigned integer into thousands.
fn group_thousands(value: u64, separator: &str) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 * separator.len());
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push_str(separator);
        }
        out.push(c);
    }
    out
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn tehran_noon() -> DateTime<FixedOffset> {
        let offset = FixedOffset::east_opt(3 * 3600 + 1800).unwrap();
        offset.with_ymd_and_hms(2024, 3, 9, 12, 5, 0).unwrap()
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0, ","), "0");
        assert_eq!(group_thousands(999, ","), "999");
        assert_eq!(group_thousands(1_000, ","), "1,000");
        assert_eq!(group_thousands(1_234_567, ","), "1,234,567");
    }

    #[test]
    fn test_format_integer() {
        assert_eq!(ReceiptLocale::En.format_integer(-40_000), "-40,000");
        assert_eq!(ReceiptLocale::Fa.format_integer(2), "۲");
    }

    #[test]
    fn test_localize_roundtrip_digits() {
        let fa = ReceiptLocale::Fa.localize_digits("0123456789");
        assert_eq!(fa, "۰۱۲۳۴۵۶۷۸۹");
        assert_eq!(delocalize_digits(&fa), "0123456789");
    }

    #[test]
    fn test_currency_format_toman() {
        let toman = CurrencyFormat::default();
        assert_eq!(
            toman.format(Money::from_minor(40_000), ReceiptLocale::En),
            "40,000 تومان"
        );
        assert_eq!(toman.format_amount(Money::zero(), ReceiptLocale::Fa), "۰");
    }

    #[test]
    fn test_currency_format_usd() {
        let usd = CurrencyFormat::usd();
        assert_eq!(usd.format(Money::from_minor(1099), ReceiptLocale::En), "$10.99");
        assert_eq!(usd.format(Money::from_minor(5), ReceiptLocale::En), "$0.05");
        assert_eq!(usd.format(Money::from_minor(-550), ReceiptLocale::En), "-$5.50");
        assert_eq!(usd.format_amount(Money::from_minor(1099), ReceiptLocale::Fa), "۱۰٫۹۹");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(ReceiptLocale::En.format_percent(DiscountRate::zero()), "0%");
        assert_eq!(ReceiptLocale::En.format_percent(DiscountRate::from_bps(5)), "0.05%");
        assert_eq!(ReceiptLocale::Fa.format_percent(DiscountRate::from_bps(1250)), "۱۲٫۵٪");
    }

    #[test]
    fn test_format_date_and_time() {
        let at = tehran_noon();
        assert_eq!(ReceiptLocale::En.format_date(&at), "2024/03/09");
        assert_eq!(ReceiptLocale::En.format_time(&at), "12:05");
        assert_eq!(ReceiptLocale::Fa.format_time(&at), "۱۲:۰۵");
    }

    #[test]
    fn test_locale_from_str() {
        assert_eq!("fa".parse::<ReceiptLocale>().unwrap(), ReceiptLocale::Fa);
        assert_eq!(" EN ".parse::<ReceiptLocale>().unwrap(), ReceiptLocale::En);
        assert!("de".parse::<ReceiptLocale>().is_err());
        assert!(ReceiptLocale::Fa.is_rtl());
        assert!(!ReceiptLocale::En.is_rtl());
    }
}
