//! Status enums for bookings and payments.

use serde::{Deserialize, Serialize};

/// Booking lifecycle status.
///
/// Wire strings match the backend's expectations ("Pending", "Confirmed", ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum BookingStatus {
    #[default]
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

/// Payment status attached to a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PaymentStatus {
    #[default]
    Unpaid,
    Pending,
    Paid,
}

/// Payment method offered at checkout.
///
/// Wire ids are lowercase ("card", "upi", "netbanking", "cash"). Only cash on
/// service is currently open for selection; the online methods are listed but
/// disabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Card,
    Upi,
    NetBanking,
    Cash,
}

impl PaymentMethod {
    /// All methods, in display order.
    pub const ALL: [Self; 4] = [Self::Card, Self::Upi, Self::NetBanking, Self::Cash];

    /// The lowercase wire id sent in booking payloads.
    #[must_use]
    pub const fn wire_id(&self) -> &'static str {
        match self {
            Self::Card => "card",
            Self::Upi => "upi",
            Self::NetBanking => "netbanking",
            Self::Cash => "cash",
        }
    }

    /// Human-readable name for the checkout list.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Card => "Credit/Debit Card",
            Self::Upi => "UPI / QR Code",
            Self::NetBanking => "Net Banking",
            Self::Cash => "Pay On Service",
        }
    }

    /// Short description shown under the method name.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Card => "Visa, MasterCard, Amex",
            Self::Upi => "Google Pay, PhonePe, Paytm",
            Self::NetBanking => "All Major Banks",
            Self::Cash => "Pay during service",
        }
    }

    /// Whether the method can currently be selected.
    #[must_use]
    pub const fn is_available(&self) -> bool {
        matches!(self, Self::Cash)
    }

    /// The payment status a booking gets when confirmed with this method.
    ///
    /// Cash stays pending until collected at service time; online methods are
    /// recorded as paid.
    #[must_use]
    pub const fn settlement_status(&self) -> PaymentStatus {
        match self {
            Self::Cash => PaymentStatus::Pending,
            _ => PaymentStatus::Paid,
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.wire_id())
    }
}
