//! Order totals: subtotal, GST, promo discount, minimum-order gate.

use kushi_core::Rupees;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::session::CartItem;

/// GST applied to the service subtotal.
pub const GST_RATE_PERCENT: u32 = 18;

/// Bookings must exceed this grand total to proceed.
pub const MINIMUM_ORDER: Rupees = Rupees::new(Decimal::from_parts(1500, 0, 0, false, 0));

/// Message shown when the minimum-order gate rejects a booking.
pub const MINIMUM_ORDER_MESSAGE: &str =
    "Minimum booking amount should be more than ₹1500 to proceed.";

/// Computed order totals.
///
/// Serialized into the booking payload as bare numbers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Totals {
    pub subtotal: Rupees,
    pub tax: Rupees,
    pub discount: Rupees,
    pub total: Rupees,
}

impl Totals {
    /// Price a booking's item set.
    ///
    /// Each item counts once regardless of its stored quantity - the booking
    /// flow books every service a single time. GST is rounded to whole rupees
    /// half-up, and a promo discount larger than subtotal plus tax clamps the
    /// grand total at zero instead of going negative.
    #[must_use]
    pub fn compute(items: &[CartItem], promo_discount: Rupees) -> Self {
        let subtotal: Rupees = items.iter().map(CartItem::effective_price).sum();
        let tax = apply_gst(subtotal);
        let total = (subtotal + tax - promo_discount).clamp_zero();
        Self {
            subtotal,
            tax,
            discount: promo_discount,
            total,
        }
    }

    /// Whether the grand total clears the minimum-order gate (strictly
    /// greater than [`MINIMUM_ORDER`]; exactly ₹1500 is rejected).
    #[must_use]
    pub fn meets_minimum(&self) -> bool {
        self.total > MINIMUM_ORDER
    }
}

/// GST on `subtotal`, rounded to whole rupees half-up.
#[must_use]
pub fn apply_gst(subtotal: Rupees) -> Rupees {
    let rate = Decimal::from(GST_RATE_PERCENT) / Decimal::from(100);
    Rupees::new(subtotal.amount() * rate).round_half_up()
}
