//! The single currency a ledger is kept in, and the conversion between decimal values and
//! integer minor units.

use crate::model::{Amount, Money};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// The largest number of minor-unit digits a ledger currency may have.
pub const MAX_MINOR_DIGITS: u32 = 6;

/// The ledger currency: an ISO-ish code (used only for display) and the number of decimal digits
/// in its minor unit, e.g. `USD` with `2` (cents) or `JPY` with `0`.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "RawCurrency")]
pub struct Currency {
    code: String,
    minor_digits: u32,
}

/// The unchecked form of `Currency` as it appears in JSON.
#[derive(Deserialize)]
struct RawCurrency {
    code: String,
    minor_digits: u32,
}

impl TryFrom<RawCurrency> for Currency {
    type Error = String;

    fn try_from(raw: RawCurrency) -> Result<Self, Self::Error> {
        Currency::new(raw.code, raw.minor_digits).ok_or_else(|| {
            format!(
                "a currency may have at most {MAX_MINOR_DIGITS} minor digits, got {}",
                raw.minor_digits
            )
        })
    }
}

impl Default for Currency {
    fn default() -> Self {
        Self {
            code: String::from("USD"),
            minor_digits: 2,
        }
    }
}

impl Currency {
    /// Returns `None` if `minor_digits` is larger than [`MAX_MINOR_DIGITS`].
    pub fn new(code: impl Into<String>, minor_digits: u32) -> Option<Self> {
        if minor_digits > MAX_MINOR_DIGITS {
            return None;
        }
        Some(Self {
            code: code.into(),
            minor_digits,
        })
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn minor_digits(&self) -> u32 {
        self.minor_digits
    }

    /// Number of minor units in one major unit, e.g. 100 for cents.
    fn scale(&self) -> i64 {
        10_i64.pow(self.minor_digits)
    }

    /// Half of one minor unit, e.g. `0.005` for cents. This is the tolerance used when checking
    /// that decimal split values reconcile to an expense amount.
    pub fn half_minor_unit(&self) -> Decimal {
        Decimal::new(5, self.minor_digits + 1)
    }

    /// Converts a decimal value into minor units, rounding half-to-even at the minor unit.
    /// Returns `None` if the result does not fit in `Money`.
    pub fn to_money(&self, value: Decimal) -> Option<Money> {
        let rounded =
            value.round_dp_with_strategy(self.minor_digits, RoundingStrategy::MidpointNearestEven);
        let minor = rounded.checked_mul(Decimal::from(self.scale()))?;
        minor.trunc().to_i64().map(Money::from_minor)
    }

    /// The exact decimal value of `money`.
    pub fn to_decimal(&self, money: Money) -> Decimal {
        Decimal::new(money.minor(), self.minor_digits)
    }

    /// The boundary representation of `money` for display.
    pub fn to_amount(&self, money: Money) -> Amount {
        Amount::new(self.to_decimal(money))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_default_is_cents() {
        let usd = Currency::default();
        assert_eq!(usd.code(), "USD");
        assert_eq!(usd.minor_digits(), 2);
        assert_eq!(usd.half_minor_unit(), dec("0.005"));
    }

    #[test]
    fn test_to_money() {
        let usd = Currency::default();
        assert_eq!(usd.to_money(dec("10.00")), Some(Money::from_minor(1000)));
        assert_eq!(usd.to_money(dec("3.3")), Some(Money::from_minor(330)));
        assert_eq!(usd.to_money(dec("-0.01")), Some(Money::from_minor(-1)));
    }

    #[test]
    fn test_to_money_rounds_half_even() {
        let usd = Currency::default();
        assert_eq!(usd.to_money(dec("0.125")), Some(Money::from_minor(12)));
        assert_eq!(usd.to_money(dec("0.135")), Some(Money::from_minor(14)));
        assert_eq!(usd.to_money(dec("0.1251")), Some(Money::from_minor(13)));
    }

    #[test]
    fn test_to_money_overflow() {
        let usd = Currency::default();
        assert_eq!(usd.to_money(dec("99999999999999999999999")), None);
    }

    #[test]
    fn test_zero_digit_currency() {
        let jpy = Currency::new("JPY", 0).unwrap();
        assert_eq!(jpy.to_money(dec("1500")), Some(Money::from_minor(1500)));
        assert_eq!(jpy.half_minor_unit(), dec("0.5"));
        assert_eq!(jpy.to_decimal(Money::from_minor(7)), dec("7"));
    }

    #[test]
    fn test_too_many_digits() {
        assert!(Currency::new("XXX", MAX_MINOR_DIGITS + 1).is_none());
    }

    #[test]
    fn test_deserialize_checks_digits() {
        let ok: Currency = serde_json::from_str(r#"{"code":"EUR","minor_digits":2}"#).unwrap();
        assert_eq!(ok.code(), "EUR");
        let err = serde_json::from_str::<Currency>(r#"{"code":"XXX","minor_digits":40}"#);
        assert!(err.is_err());
    }

    #[test]
    fn test_to_decimal_keeps_scale() {
        let usd = Currency::default();
        assert_eq!(usd.to_decimal(Money::from_minor(6000)).to_string(), "60.00");
        assert_eq!(usd.to_decimal(Money::from_minor(-3000)).to_string(), "-30.00");
    }
}
