//! Currency-aware display of salaries
//!
//! Amounts are converted and rounded in decimal arithmetic so that, e.g.,
//! 83200 INR at 83.2 INR/USD renders as exactly "$1,000.00".

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Serialize, Serializer};
use std::str::FromStr;

use crate::types::Currency;

/// INR per USD
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExchangeRate(Decimal);

impl ExchangeRate {
    /// `None` unless the rate is finite and positive
    pub fn from_f64(inr_per_usd: f64) -> Option<Self> {
        if !inr_per_usd.is_finite() || inr_per_usd <= 0.0 {
            return None;
        }
        decimal_from_f64(inr_per_usd)
            .filter(|d| d.is_sign_positive() && !d.is_zero())
            .map(ExchangeRate)
    }

    pub fn inr_per_usd(&self) -> Decimal {
        self.0
    }
}

impl Default for ExchangeRate {
    fn default() -> Self {
        ExchangeRate(Decimal::new(832, 1))
    }
}

impl Serialize for ExchangeRate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_string())
    }
}

/// Parse through the shortest round-trip text so 83.2 stays 83.2
fn decimal_from_f64(value: f64) -> Option<Decimal> {
    Decimal::from_str(&value.to_string()).ok()
}

/// Render `amount_inr` in the requested currency.
///
/// INR: symbol, thousands separators, no decimals ("₹83,200").
/// USD: converted at `rate`, two decimals ("$1,000.00").
pub fn format_salary(amount_inr: f64, currency: Currency, rate: ExchangeRate) -> String {
    match currency {
        Currency::Inr => format_amount(currency.symbol(), amount_inr, None, 0),
        Currency::Usd => format_amount(currency.symbol(), amount_inr, Some(rate), 2),
    }
}

fn format_amount(symbol: &str, amount: f64, divide_by: Option<ExchangeRate>, dp: u32) -> String {
    let exact = decimal_from_f64(amount).and_then(|d| match divide_by {
        Some(rate) => d.checked_div(rate.0),
        None => Some(d),
    });

    let plain = match exact {
        Some(value) => {
            let mut rounded = value.round_dp_with_strategy(dp, RoundingStrategy::MidpointNearestEven);
            rounded.rescale(dp);
            if rounded.is_zero() {
                rounded.set_sign_positive(true);
            }
            rounded.to_string()
        }
        // Out of decimal range: fall back to binary floating point
        None => {
            let value = match divide_by.and_then(|r| r.0.to_f64()) {
                Some(rate) => amount / rate,
                None => amount,
            };
            format!("{:.*}", dp as usize, value)
        }
    };

    format!("{}{}", symbol, group_thousands(&plain))
}

/// Insert ',' every three integer digits: "-1234567.5" -> "-1,234,567.5"
fn group_thousands(plain: &str) -> String {
    let (sign, unsigned) = match plain.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", plain),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };

    let digits: Vec<char> = int_part.chars().collect();
    let mut grouped = String::with_capacity(plain.len() + digits.len() / 3);
    grouped.push_str(sign);
    for (i, d) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*d);
    }
    if let Some(frac) = frac_part {
        grouped.push('.');
        grouped.push_str(frac);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_amounts() {
        let rate = ExchangeRate::default();
        assert_eq!(format_salary(83_200.0, Currency::Usd, rate), "$1,000.00");
        assert_eq!(format_salary(83_200.0, Currency::Inr, rate), "₹83,200");
    }

    #[test]
    fn test_rounding() {
        let rate = ExchangeRate::default();
        assert_eq!(format_salary(74_523.5, Currency::Inr, rate), "₹74,524");
        // Ties go to the even neighbour
        assert_eq!(format_salary(74_522.5, Currency::Inr, rate), "₹74,522");
        assert_eq!(format_salary(0.5, Currency::Inr, rate), "₹0");
        // 10.4 / 83.2 = 0.125 exactly
        assert_eq!(format_salary(10.4, Currency::Usd, rate), "$0.12");
        assert_eq!(format_salary(999.4, Currency::Inr, rate), "₹999");
        // 100 / 83.2 = 1.20192...
        assert_eq!(format_salary(100.0, Currency::Usd, rate), "$1.20");
        assert_eq!(format_salary(0.0, Currency::Usd, rate), "$0.00");
        assert_eq!(format_salary(0.0, Currency::Inr, rate), "₹0");
    }

    #[test]
    fn test_large_and_negative_amounts() {
        let rate = ExchangeRate::default();
        assert_eq!(format_salary(1_234_567_890.0, Currency::Inr, rate), "₹1,234,567,890");
        assert_eq!(format_salary(-8_320.0, Currency::Usd, rate), "$-100.00");
    }

    #[test]
    fn test_custom_rate() {
        let rate = ExchangeRate::from_f64(80.0).unwrap();
        assert_eq!(format_salary(160_000.0, Currency::Usd, rate), "$2,000.00");
        assert_eq!(rate.inr_per_usd().to_string(), "80");
    }

    #[test]
    fn test_invalid_rates() {
        assert!(ExchangeRate::from_f64(0.0).is_none());
        assert!(ExchangeRate::from_f64(-83.2).is_none());
        assert!(ExchangeRate::from_f64(f64::NAN).is_none());
        assert_eq!(ExchangeRate::from_f64(83.2), Some(ExchangeRate::default()));
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands("1"), "1");
        assert_eq!(group_thousands("123"), "123");
        assert_eq!(group_thousands("1234"), "1,234");
        assert_eq!(group_thousands("-1234567.25"), "-1,234,567.25");
    }
}
