use crate::error::PixError;
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// A non-negative monetary amount with at most two decimal places.
///
/// This is a wrapper around `rust_decimal::Decimal` so that amounts which cannot be
/// written as `units.cents` are rejected before any payload is built.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Deserialize)]
#[serde(try_from = "Decimal")]
pub struct Amount(Decimal);

impl Amount {
    pub const ZERO: Self = Self(Decimal::ZERO);

    pub fn new(value: Decimal) -> Result<Self, PixError> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(PixError::InvalidAmount(format!("{value} is negative")));
        }
        if value.round_dp(2) != value {
            return Err(PixError::InvalidAmount(format!(
                "{value} has more than two decimal places"
            )));
        }
        // -0 compares equal to zero but would print a sign
        if value.is_zero() {
            return Ok(Self::ZERO);
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Renders the amount as it appears in a payload: two decimals, a dot,
    /// no grouping, no sign.
    pub fn to_payload_string(&self) -> String {
        format!("{:.2}", self.0)
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = PixError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<f64> for Amount {
    type Error = PixError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if !value.is_finite() {
            return Err(PixError::InvalidAmount(format!("{value} is not finite")));
        }
        let decimal = Decimal::from_f64(value)
            .ok_or_else(|| PixError::InvalidAmount(format!("{value} is out of range")))?;
        Self::new(decimal)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_payload_string())
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_payload_string())
    }
}
