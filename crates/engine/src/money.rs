use std::{fmt, ops::Add, str::FromStr};

use rust_decimal::Decimal;

use crate::EngineError;

/// Money amount in Rupiah, backed by an exact decimal.
///
/// Use this type for **all** monetary values in the engine (income, asset
/// values, tax amounts) so that bracket arithmetic never drifts.
///
/// # Examples
///
/// ```rust
/// use engine::Money;
///
/// let amount = Money::from_major(3_900_000);
/// assert_eq!(amount.to_string(), "Rp 3900000.00");
/// ```
///
/// Parsing from operator input (optional `Rp` prefix, `.` or `,` as decimal
/// separator; rejects negative values):
///
/// ```rust
/// use engine::Money;
///
/// assert_eq!("4500000".parse::<Money>().unwrap(), Money::from_major(4_500_000));
/// assert_eq!("Rp 10,5".parse::<Money>().unwrap().to_string(), "Rp 10.50");
/// assert!("-1".parse::<Money>().is_err());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Money = Money(Decimal::ZERO);

    /// Creates a new amount from a decimal value.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Creates a new amount from whole Rupiah.
    #[must_use]
    pub fn from_major(amount: i64) -> Self {
        Self(Decimal::from(amount))
    }

    /// Returns the raw decimal value.
    #[must_use]
    pub const fn amount(self) -> Decimal {
        self.0
    }

    /// Returns `true` if the amount is strictly positive.
    #[must_use]
    pub fn is_positive(self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Multiplies the amount by a rate, saturating at the decimal range.
    #[must_use]
    pub fn apply_rate(self, rate: Decimal) -> Money {
        Money(self.0.saturating_mul(rate))
    }

    /// Text written to the roster file: the shortest exact decimal form.
    #[must_use]
    pub fn to_storage(self) -> String {
        self.0.normalize().to_string()
    }

    /// Decodes a stored amount.
    ///
    /// Accepts plain decimals and scientific notation (`1.5e+07`), which
    /// older roster files contain. Returns `None` for anything else.
    #[must_use]
    pub fn parse_stored(raw: &str) -> Option<Money> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        Decimal::from_str(trimmed)
            .or_else(|_| Decimal::from_scientific(trimmed))
            .ok()
            .map(Money)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rp {:.2}", self.0)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Self::Output {
        Money(self.0.saturating_add(rhs.0))
    }
}

impl FromStr for Money {
    type Err = EngineError;

    /// Parses operator input into an amount.
    ///
    /// Validation rules:
    /// - an optional `Rp` prefix is ignored
    /// - `,` is accepted as decimal separator
    /// - rejects empty, negative and non-numeric strings
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let trimmed = trimmed
            .strip_prefix("Rp")
            .or_else(|| trimmed.strip_prefix("rp"))
            .unwrap_or(trimmed)
            .trim();
        if trimmed.is_empty() {
            return Err(EngineError::InvalidAmount("empty amount".to_string()));
        }
        if trimmed.starts_with('-') {
            return Err(EngineError::InvalidAmount(
                "amount must not be negative".to_string(),
            ));
        }

        let normalized = trimmed.replace(',', ".");
        let value = Decimal::from_str(&normalized)
            .map_err(|_| EngineError::InvalidAmount(format!("not a number: {trimmed}")))?;
        Ok(Money(value))
    }
}
