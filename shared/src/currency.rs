//! Currency conversion and money formatting.
//!
//! Aggregates coming from the server are denominated in USD. They are only
//! converted for display; individual records keep their native currency.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::{ExchangeRateInfo, Transaction};

/// Local storage key holding the display currency preference
pub const PREFERRED_CURRENCY_KEY: &str = "preferred_currency";

/// PEN to USD rate used before the server has told us anything
pub const FALLBACK_PEN_TO_USD: f64 = 0.27;

/// USD to PEN rate used when the PEN to USD rate is unusable
pub const FALLBACK_USD_TO_PEN: f64 = 3.7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Currency {
    #[default]
    #[serde(rename = "USD")]
    Usd,
    #[serde(rename = "PEN")]
    Pen,
}

impl Currency {
    pub const ALL: [Currency; 2] = [Currency::Usd, Currency::Pen];

    pub fn code(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Pen => "PEN",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Usd => "$",
            Currency::Pen => "S/",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Currency::Usd => "US Dollar",
            Currency::Pen => "Soles",
        }
    }

    /// The other currency, used by the USD | PEN toggle
    pub fn toggled(&self) -> Currency {
        match self {
            Currency::Usd => Currency::Pen,
            Currency::Pen => Currency::Usd,
        }
    }

    /// Parse a stored preference, defaulting to USD for anything unexpected
    pub fn from_preference(stored: Option<&str>) -> Currency {
        stored.and_then(|raw| raw.parse().ok()).unwrap_or_default()
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
#[error("Unsupported currency: {0}")]
pub struct UnsupportedCurrency(pub String);

impl FromStr for Currency {
    type Err = UnsupportedCurrency;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "USD" => Ok(Currency::Usd),
            "PEN" => Ok(Currency::Pen),
            other => Err(UnsupportedCurrency(other.to_string())),
        }
    }
}

/// The PEN/USD rate in effect for a page
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExchangeRate {
    pen_to_usd: f64,
}

impl Default for ExchangeRate {
    fn default() -> Self {
        Self {
            pen_to_usd: FALLBACK_PEN_TO_USD,
        }
    }
}

impl ExchangeRate {
    pub fn new(pen_to_usd: f64) -> Self {
        Self { pen_to_usd }
    }

    /// Pick the freshest rate available: the rate endpoint, then the one
    /// embedded in the summary, then the fallback.
    pub fn resolve(rate_info: Option<&ExchangeRateInfo>, summary_rate: Option<f64>) -> Self {
        let pen_to_usd = rate_info
            .map(|info| info.rate)
            .or(summary_rate)
            .unwrap_or(FALLBACK_PEN_TO_USD);
        Self { pen_to_usd }
    }

    pub fn pen_to_usd(&self) -> f64 {
        self.pen_to_usd
    }

    pub fn usd_to_pen(&self) -> f64 {
        if self.pen_to_usd > 0.0 {
            1.0 / self.pen_to_usd
        } else {
            FALLBACK_USD_TO_PEN
        }
    }

    /// Convert a USD figure into the display currency
    pub fn from_usd(&self, usd: f64, display: Currency) -> f64 {
        match display {
            Currency::Usd => usd,
            Currency::Pen => usd * self.usd_to_pen(),
        }
    }

    /// Convert a figure in the given currency back into USD
    pub fn to_usd(&self, amount: f64, currency: Currency) -> f64 {
        match currency {
            Currency::Usd => amount,
            Currency::Pen => amount * self.pen_to_usd,
        }
    }

    /// Summary card value: whole dollars for USD, two decimals for soles
    pub fn format_summary(&self, usd: f64, display: Currency) -> String {
        match display {
            Currency::Usd => format_usd_whole(usd),
            Currency::Pen => format_pen(self.from_usd(usd, display)),
        }
    }

    /// Category and budget figures: two decimals, compact symbol
    pub fn format_compact(&self, usd: f64, display: Currency) -> String {
        format!("{}{:.2}", display.symbol(), self.from_usd(usd, display))
    }

    /// Chart labels and tooltips
    pub fn format_chart(&self, usd: f64, display: Currency) -> String {
        match display {
            Currency::Usd => format!("${}", group_thousands(usd, 2)),
            Currency::Pen => format_pen(self.from_usd(usd, display)),
        }
    }

    /// Converted hint shown under a record whose native currency differs
    /// from the display currency
    pub fn converted_hint(&self, tx: &Transaction, display: Currency) -> Option<String> {
        let magnitude = tx.amount.abs();
        match (display, tx.currency) {
            (Currency::Usd, Currency::Pen) => Some(format!("→ ${:.2}", magnitude * self.pen_to_usd)),
            (Currency::Pen, Currency::Usd) => Some(format!("→ S/{:.2}", magnitude * self.usd_to_pen())),
            _ => None,
        }
    }

    /// "1 PEN = $0.2700 USD"
    pub fn describe(&self) -> String {
        format!("1 PEN = ${:.4} USD", self.pen_to_usd)
    }
}

/// Round half away from zero to the given number of decimals
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Absolute value with comma thousands separators, e.g. 1234.5 -> "1,234.50"
pub fn group_thousands(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value.abs());
    let (whole, fraction) = match formatted.split_once('.') {
        Some((whole, fraction)) => (whole.to_string(), Some(fraction.to_string())),
        None => (formatted.clone(), None),
    };

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    match fraction {
        Some(fraction) => format!("{}.{}", grouped, fraction),
        None => grouped,
    }
}

/// "$1,235" for coarse summary figures
pub fn format_usd_whole(value: f64) -> String {
    format!("${}", group_thousands(value, 0))
}

/// "S/ 1,234.56"
pub fn format_pen(value: f64) -> String {
    format!("S/ {}", group_thousands(value, 2))
}

/// Unsigned amount in its own currency with no space, e.g. "S/40.00"
pub fn format_native(amount: f64, currency: Currency) -> String {
    format!("{}{:.2}", currency.symbol(), amount.abs())
}

/// Signed amount of a record in its native currency, e.g. "+$12.50" or "-S/40.00"
pub fn format_signed(tx: &Transaction) -> String {
    let sign = if tx.is_income() { '+' } else { '-' };
    format!("{}{}", sign, format_native(tx.amount, tx.currency))
}

/// Signed total such as "+$12.50" or "-$3.00"
pub fn format_signed_total(value: f64, currency: Currency) -> String {
    let sign = if value >= 0.0 { '+' } else { '-' };
    format!("{}{}", sign, format_native(value, currency))
}

/// How long ago the rate was fetched, if the server said
pub fn describe_rate_age(age_hours: Option<f64>) -> Option<String> {
    age_hours.map(|hours| {
        if hours < 1.0 {
            "just now".to_string()
        } else {
            format!("{}h ago", hours.round() as i64)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Category;
    use chrono::NaiveDate;

    fn tx(amount: f64, currency: Currency) -> Transaction {
        Transaction {
            id: 1,
            date: NaiveDate::from_ymd_opt(2025, 6, 5).unwrap(),
            description: "Test".to_string(),
            amount,
            currency,
            category: Category::Other,
            bank: "Manual".to_string(),
            email_id: None,
            created_at: None,
        }
    }

    #[test]
    fn test_usd_to_pen_and_back_round_trips() {
        let rate = ExchangeRate::new(0.2683);
        for usd in [0.0, 0.01, 12.5, 999.99, 123456.78] {
            let pen = rate.from_usd(usd, Currency::Pen);
            let back = rate.to_usd(pen, Currency::Pen);
            assert!((round_to(back, 2) - usd).abs() < 0.005, "{} -> {} -> {}", usd, pen, back);
        }
    }

    #[test]
    fn test_usd_to_pen_falls_back_on_bad_rate() {
        assert_eq!(ExchangeRate::new(0.0).usd_to_pen(), FALLBACK_USD_TO_PEN);
        assert_eq!(ExchangeRate::new(0.25).usd_to_pen(), 4.0);
    }

    #[test]
    fn test_resolve_prefers_rate_endpoint_then_summary() {
        let info = ExchangeRateInfo {
            rate: 0.26,
            age_hours: Some(2.0),
            from_currency: None,
            to_currency: None,
            fetched_at: None,
            source: None,
        };
        assert_eq!(ExchangeRate::resolve(Some(&info), Some(0.3)).pen_to_usd(), 0.26);
        assert_eq!(ExchangeRate::resolve(None, Some(0.3)).pen_to_usd(), 0.3);
        assert_eq!(ExchangeRate::resolve(None, None).pen_to_usd(), FALLBACK_PEN_TO_USD);
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0.0, 2), "0.00");
        assert_eq!(group_thousands(999.0, 0), "999");
        assert_eq!(group_thousands(1234.5, 2), "1,234.50");
        assert_eq!(group_thousands(-1234567.891, 2), "1,234,567.89");
    }

    #[test]
    fn test_summary_formatting() {
        let rate = ExchangeRate::new(0.25);
        assert_eq!(rate.format_summary(1234.6, Currency::Usd), "$1,235");
        assert_eq!(rate.format_summary(-50.0, Currency::Usd), "$50");
        assert_eq!(rate.format_summary(1000.0, Currency::Pen), "S/ 4,000.00");
    }

    #[test]
    fn test_compact_and_chart_formatting() {
        let rate = ExchangeRate::new(0.25);
        assert_eq!(rate.format_compact(12.5, Currency::Usd), "$12.50");
        assert_eq!(rate.format_compact(12.5, Currency::Pen), "S/50.00");
        assert_eq!(rate.format_chart(1500.0, Currency::Usd), "$1,500.00");
        assert_eq!(rate.format_chart(1500.0, Currency::Pen), "S/ 6,000.00");
    }

    #[test]
    fn test_signed_record_amounts() {
        assert_eq!(format_signed(&tx(12.5, Currency::Usd)), "+$12.50");
        assert_eq!(format_signed(&tx(-40.0, Currency::Pen)), "-S/40.00");
        assert_eq!(format_signed_total(-3.0, Currency::Usd), "-$3.00");
    }

    #[test]
    fn test_converted_hint_only_when_currencies_differ() {
        let rate = ExchangeRate::new(0.27);
        assert_eq!(rate.converted_hint(&tx(-40.0, Currency::Pen), Currency::Usd).as_deref(), Some("→ $10.80"));
        assert_eq!(rate.converted_hint(&tx(-40.0, Currency::Pen), Currency::Pen), None);
        assert_eq!(rate.converted_hint(&tx(27.0, Currency::Usd), Currency::Pen).as_deref(), Some("→ S/100.00"));
    }

    #[test]
    fn test_rate_descriptions() {
        assert_eq!(ExchangeRate::new(0.27).describe(), "1 PEN = $0.2700 USD");
        assert_eq!(describe_rate_age(Some(0.4)).as_deref(), Some("just now"));
        assert_eq!(describe_rate_age(Some(5.6)).as_deref(), Some("6h ago"));
        assert_eq!(describe_rate_age(None), None);
    }

    #[test]
    fn test_preference_parsing() {
        assert_eq!(Currency::from_preference(Some("PEN")), Currency::Pen);
        assert_eq!(Currency::from_preference(Some("EUR")), Currency::Usd);
        assert_eq!(Currency::from_preference(None), Currency::Usd);
        assert_eq!(
            "EUR".parse::<Currency>(),
            Err(UnsupportedCurrency("EUR".to_string()))
        );
        assert_eq!(Currency::Usd.toggled(), Currency::Pen);
    }
}
