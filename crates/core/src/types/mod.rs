//! Core types for Kushi Services.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod contact;
pub mod id;
pub mod money;
pub mod status;

pub use contact::{
    CustomerName, CustomerNameError, Email, EmailError, Phone, PhoneError, Pincode, PincodeError,
};
pub use id::*;
pub use money::Rupees;
pub use status::{BookingStatus, PaymentMethod, PaymentStatus};
