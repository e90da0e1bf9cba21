//! Money in Indian rupees, backed by decimal arithmetic.
//!
//! All amounts in the booking flow are rupee-denominated. On the wire (stored
//! cart blobs, booking payloads, catalog records) money is a bare JSON number,
//! so [`Rupees`] serializes as `f64` and keeps `Decimal` precision internally.

use core::fmt;
use core::iter::Sum;
use core::ops::{Add, AddAssign, Sub};

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A rupee amount.
///
/// Ordered so thresholds (like the minimum order total) compare cleanly.
/// Amounts are expected to be non-negative everywhere except transient totals
/// before clamping; see [`Rupees::clamp_zero`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Rupees(Decimal);

impl Rupees {
    /// Zero rupees.
    #[must_use]
    pub const fn zero() -> Self {
        Self(Decimal::ZERO)
    }

    /// Create an amount from a decimal value.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create an amount from a whole number of rupees.
    #[must_use]
    pub fn from_rupees(rupees: i64) -> Self {
        Self(Decimal::from(rupees))
    }

    /// The underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Round to whole rupees using half-up rounding (18.5 rounds to 19).
    #[must_use]
    pub fn round_half_up(self) -> Self {
        Self(
            self.0
                .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero),
        )
    }

    /// Floor the amount at zero.
    ///
    /// A promo discount larger than subtotal plus tax would otherwise produce
    /// a negative grand total.
    #[must_use]
    pub fn clamp_zero(self) -> Self {
        if self.0.is_sign_negative() {
            Self::zero()
        } else {
            self
        }
    }

    /// Whether the amount is exactly zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Convert to `f64` for the wire boundary.
    #[must_use]
    pub fn to_f64(&self) -> f64 {
        self.0.to_f64().unwrap_or(0.0)
    }

    /// Convert from a wire `f64`. Returns `None` for non-finite values.
    #[must_use]
    pub fn from_f64(value: f64) -> Option<Self> {
        Decimal::from_f64(value).map(Self)
    }

    /// Format with a `₹` prefix and en-IN digit grouping (`₹1,00,000`).
    #[must_use]
    pub fn display(&self) -> String {
        format!("₹{self}")
    }
}

/// Group a digit string the en-IN way: last three digits, then pairs.
fn group_en_in(digits: &str) -> String {
    let len = digits.chars().count();
    let mut out = String::with_capacity(len + len / 2);
    for (i, c) in digits.chars().enumerate() {
        out.push(c);
        let remaining = len - i - 1;
        if remaining == 3 || (remaining > 3 && (remaining - 3) % 2 == 0) {
            out.push(',');
        }
    }
    out
}

impl fmt::Display for Rupees {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let amount = self.0;
        if amount.is_sign_negative() {
            write!(f, "-")?;
        }
        let abs = amount.abs();
        let whole = abs.trunc();
        write!(f, "{}", group_en_in(&whole.to_string()))?;
        let fract = abs.fract();
        if !fract.is_zero() {
            let paise = (fract * Decimal::from(100))
                .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
                .to_u32()
                .unwrap_or(0);
            write!(f, ".{paise:02}")?;
        }
        Ok(())
    }
}

impl Serialize for Rupees {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.to_f64())
    }
}

impl<'de> Deserialize<'de> for Rupees {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = f64::deserialize(deserializer)?;
        Self::from_f64(value)
            .ok_or_else(|| serde::de::Error::custom("rupee amount must be a finite number"))
    }
}

impl Add for Rupees {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Rupees {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for Rupees {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl Sum for Rupees {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), Add::add)
    }
}

impl From<Decimal> for Rupees {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}
