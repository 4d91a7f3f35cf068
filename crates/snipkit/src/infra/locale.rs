//! Locale-aware currency formatting
//!
//! `to_currency` delegates to a [`CurrencyFormatter`]. The bundled
//! [`BasicCurrencyFormatter`] covers a fixed table of locales and currencies;
//! plug in another implementation for full CLDR coverage.

use crate::constants::DEFAULT_LOCALE;
use tracing::trace;

/// Locale errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LocaleError {
    /// Locale tag not known to the formatter
    #[error("Unsupported locale: {0}")]
    UnsupportedLocale(String),

    /// Currency code not known to the formatter
    #[error("Unsupported currency: {0}")]
    UnsupportedCurrency(String),

    /// NaN or infinite amount
    #[error("Amount is not a finite number")]
    NonFiniteAmount,
}

/// Capability for rendering an amount of money
pub trait CurrencyFormatter {
    /// Format `amount` of `currency` (ISO 4217 code) for `locale` (BCP 47 tag)
    fn format_currency(&self, amount: f64, currency: &str, locale: &str)
    -> Result<String, LocaleError>;
}

/// Format an amount of money, using [`DEFAULT_LOCALE`] when `locale` is `None`
///
/// ```
/// use snipkit::BasicCurrencyFormatter;
/// use snipkit::infra::locale::to_currency;
///
/// let fmt = BasicCurrencyFormatter;
/// assert_eq!(to_currency(&fmt, 123456.789, "EUR", None).unwrap(), "€123,456.79");
/// assert_eq!(to_currency(&fmt, 123456.789, "JPY", Some("ja-JP")).unwrap(), "￥123,457");
/// ```
pub fn to_currency<F: CurrencyFormatter + ?Sized>(
    formatter: &F,
    amount: f64,
    currency: &str,
    locale: Option<&str>,
) -> Result<String, LocaleError> {
    let locale = locale.unwrap_or(DEFAULT_LOCALE);
    let out = formatter.format_currency(amount, currency, locale)?;
    trace!(amount, currency, locale, formatted = %out, "to_currency");
    Ok(out)
}

// =============================================================================
// Built-in formatter
// =============================================================================

/// Number layout of a locale
#[derive(Clone, Copy, Debug)]
struct LocaleRules {
    group: &'static str,
    decimal: char,
    /// Symbol goes after the number, separated by this string
    suffix_sep: Option<&'static str>,
}

/// Currency metadata
#[derive(Clone, Copy, Debug)]
struct CurrencyRules {
    code: &'static str,
    symbol: &'static str,
    fraction_digits: usize,
}

const LOCALES: &[(&str, LocaleRules)] = &[
    (
        "en-US",
        LocaleRules {
            group: ",",
            decimal: '.',
            suffix_sep: None,
        },
    ),
    (
        "en-GB",
        LocaleRules {
            group: ",",
            decimal: '.',
            suffix_sep: None,
        },
    ),
    (
        "ja-JP",
        LocaleRules {
            group: ",",
            decimal: '.',
            suffix_sep: None,
        },
    ),
    (
        "de-DE",
        LocaleRules {
            group: ".",
            decimal: ',',
            suffix_sep: Some("\u{a0}"),
        },
    ),
    (
        "fr-FR",
        LocaleRules {
            group: "\u{202f}",
            decimal: ',',
            suffix_sep: Some("\u{a0}"),
        },
    ),
];

const CURRENCIES: &[CurrencyRules] = &[
    CurrencyRules {
        code: "USD",
        symbol: "$",
        fraction_digits: 2,
    },
    CurrencyRules {
        code: "EUR",
        symbol: "€",
        fraction_digits: 2,
    },
    CurrencyRules {
        code: "GBP",
        symbol: "£",
        fraction_digits: 2,
    },
    CurrencyRules {
        code: "JPY",
        symbol: "¥",
        fraction_digits: 0,
    },
    CurrencyRules {
        code: "INR",
        symbol: "₹",
        fraction_digits: 2,
    },
    CurrencyRules {
        code: "CHF",
        symbol: "CHF",
        fraction_digits: 2,
    },
];

/// Table-driven formatter for a handful of common locales
#[derive(Clone, Copy, Debug, Default)]
pub struct BasicCurrencyFormatter;

impl BasicCurrencyFormatter {
    fn locale(tag: &str) -> Result<LocaleRules, LocaleError> {
        LOCALES
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(tag))
            .map(|(_, rules)| *rules)
            .ok_or_else(|| LocaleError::UnsupportedLocale(tag.to_string()))
    }

    fn currency(code: &str) -> Result<CurrencyRules, LocaleError> {
        CURRENCIES
            .iter()
            .find(|c| c.code.eq_ignore_ascii_case(code))
            .copied()
            .ok_or_else(|| LocaleError::UnsupportedCurrency(code.to_string()))
    }
}

impl CurrencyFormatter for BasicCurrencyFormatter {
    fn format_currency(
        &self,
        amount: f64,
        currency: &str,
        locale: &str,
    ) -> Result<String, LocaleError> {
        if !amount.is_finite() {
            return Err(LocaleError::NonFiniteAmount);
        }
        let rules = Self::locale(locale)?;
        let cur = Self::currency(currency)?;

        // Japanese locales render the yen with the full-width sign
        let symbol = if cur.code == "JPY" && locale.eq_ignore_ascii_case("ja-JP") {
            "￥"
        } else {
            cur.symbol
        };

        let fixed = format!("{:.*}", cur.fraction_digits, amount.abs());
        let (int_part, frac_part) = match fixed.split_once('.') {
            Some((i, f)) => (i, Some(f)),
            None => (fixed.as_str(), None),
        };

        let mut number = group_digits(int_part, rules.group);
        if let Some(frac) = frac_part {
            number.push(rules.decimal);
            number.push_str(frac);
        }

        let negative = amount < 0.0 && fixed.bytes().any(|b| b.is_ascii_digit() && b != b'0');
        let sign = if negative { "-" } else { "" };

        Ok(match rules.suffix_sep {
            Some(sep) => format!("{}{}{}{}", sign, number, sep, symbol),
            None => format!("{}{}{}", sign, symbol, number),
        })
    }
}

/// Insert `group` between every three digits, counting from the right
fn group_digits(digits: &str, group: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3 * group.len());
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push_str(group);
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fmt(amount: f64, currency: &str, locale: Option<&str>) -> Result<String, LocaleError> {
        to_currency(&BasicCurrencyFormatter, amount, currency, locale)
    }

    #[test]
    fn test_group_digits() {
        assert_eq!(group_digits("1", ","), "1");
        assert_eq!(group_digits("123", ","), "123");
        assert_eq!(group_digits("1234", ","), "1,234");
        assert_eq!(group_digits("1234567", "."), "1.234.567");
    }

    #[test]
    fn test_default_locale() {
        assert_eq!(fmt(123456.789, "EUR", None).unwrap(), "€123,456.79");
        assert_eq!(fmt(123456.789, "USD", None).unwrap(), "$123,456.79");
    }

    #[test]
    fn test_suffix_locales() {
        assert_eq!(
            fmt(123456.789, "EUR", Some("de-DE")).unwrap(),
            "123.456,79\u{a0}€"
        );
        assert_eq!(
            fmt(123456.789, "EUR", Some("fr-FR")).unwrap(),
            "123\u{202f}456,79\u{a0}€"
        );
    }

    #[test]
    fn test_zero_fraction_currency() {
        assert_eq!(fmt(322342436423.2435, "JPY", None).unwrap(), "¥322,342,436,423");
        assert_eq!(fmt(1234.6, "JPY", Some("ja-JP")).unwrap(), "￥1,235");
    }

    #[test]
    fn test_negative_amounts() {
        assert_eq!(fmt(-1234.5, "USD", None).unwrap(), "-$1,234.50");
        assert_eq!(fmt(-0.001, "USD", None).unwrap(), "$0.00");
    }

    #[test]
    fn test_errors() {
        assert_eq!(
            fmt(1.0, "USD", Some("xx-XX")),
            Err(LocaleError::UnsupportedLocale("xx-XX".to_string()))
        );
        assert_eq!(
            fmt(1.0, "XYZ", None),
            Err(LocaleError::UnsupportedCurrency("XYZ".to_string()))
        );
        assert_eq!(fmt(f64::NAN, "USD", None), Err(LocaleError::NonFiniteAmount));
    }
}
