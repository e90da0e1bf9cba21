//! Kushi Core - Shared types library.
//!
//! This crate provides common types used across all Kushi Services components:
//! - `storefront` - Customer-facing booking funnel (cart, booking form, payment)
//! - `admin` - Dashboard clients and chart datasets
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no storage access,
//! no HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, money, contact fields, and statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
