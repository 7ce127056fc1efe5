//! Amount type for monetary values as they cross the ledger boundary.
//!
//! Callers hand the ledger decimal values such as `"$1,250.00"` or `"12.5"`, and the ledger hands
//! balances back the same way. Inside the ledger everything is [`Money`](crate::model::Money).

use format_num::NumberFormat;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::error::Error;
use std::fmt;
use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;

/// How an amount was (or should be) written.
///
/// # Examples
///  - `AmountFormat{ dollar: true, commas: true }` -> `-$60,000.00`
///  - `AmountFormat{ dollar: false, commas: false }` -> `-60000.00`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AmountFormat {
    dollar: bool,
    commas: bool,
}

impl AmountFormat {
    pub const fn new(dollar: bool, commas: bool) -> Self {
        Self { dollar, commas }
    }

    /// Bare digits, e.g. `-1250.00`.
    pub const fn plain() -> Self {
        Self::new(false, false)
    }
}

impl Default for AmountFormat {
    fn default() -> Self {
        DEFAULT_FORMAT
    }
}

const DEFAULT_FORMAT: AmountFormat = AmountFormat {
    dollar: true,
    commas: true,
};

/// A decimal money value at the boundary of the ledger.
///
/// Formatting is significant for equality, so compare [`Amount::value`] when you mean numeric
/// equality.
///
/// ```
/// # use group_ledger::model::Amount;
/// # use std::str::FromStr;
/// let a = Amount::from_str("-5000.00").unwrap();
/// let b = Amount::from_str("-$5,000.00").unwrap();
/// assert_ne!(a, b);
/// assert_eq!(a.value(), b.value());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Amount {
    value: Decimal,
    format: AmountFormat,
}

impl Amount {
    pub const fn new(value: Decimal) -> Self {
        Self {
            value,
            format: DEFAULT_FORMAT,
        }
    }

    pub const fn new_with_format(value: Decimal, format: AmountFormat) -> Self {
        Self { value, format }
    }

    /// Returns the same value written with `format`.
    pub fn with_format(self, format: AmountFormat) -> Self {
        Self { format, ..self }
    }

    pub fn value(&self) -> Decimal {
        self.value
    }

    pub fn is_zero(&self) -> bool {
        self.value.is_zero()
    }

    pub fn is_positive(&self) -> bool {
        self.value > Decimal::ZERO
    }

    pub fn is_negative(&self) -> bool {
        self.value < Decimal::ZERO
    }
}

/// An error that can occur when parsing a string into an `Amount`.
pub struct AmountError(rust_decimal::Error);

impl Debug for AmountError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Debug::fmt(&self.0, f)
    }
}

impl Display for AmountError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl std::error::Error for AmountError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.0)
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Ok(Amount::default());
        }

        let (negative, unsigned) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };
        let (dollar, digits) = match unsigned.strip_prefix('$') {
            Some(rest) => (true, rest),
            None => (false, unsigned),
        };

        let without_commas = digits.replace(',', "");
        let commas = without_commas.len() < digits.len();

        let mut value = Decimal::from_str(&without_commas).map_err(AmountError)?;
        if negative {
            value = -value;
        }
        Ok(Amount {
            value,
            format: AmountFormat { dollar, commas },
        })
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let sign = if self.is_negative() { "-" } else { "" };
        let num = self.value.abs();
        let dol = if self.format.dollar { "$" } else { "" };

        if self.format.commas {
            let pattern = format!(",.{}f", num.scale());
            let grouped = NumberFormat::new().format(&pattern, num.to_f64().unwrap_or_default());
            write!(f, "{sign}{dol}{grouped}")
        } else {
            write!(f, "{sign}{dol}{num}")
        }
    }
}

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Amount::from_str(&s).map_err(serde::de::Error::custom)
    }
}

impl From<Decimal> for Amount {
    fn from(value: Decimal) -> Self {
        Amount::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.value()
    }
}
