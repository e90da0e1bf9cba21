//! Kushi Storefront - the customer-facing booking funnel.
//!
//! This crate is the logic layer behind the Kushi Services website: category
//! browsing feeds a cart, the cart feeds a booking session, the booking form
//! validates contact and schedule details, and a confirmed submission is
//! handed to the payment step which commits the booking to the backend.
//!
//! # Architecture
//!
//! - [`storage`] - injected key-value persistence (the browser-local-storage
//!   analog); everything durable goes through the [`storage::KeyValueStore`]
//!   trait so tests can swap an in-memory store
//! - [`catalog`] - service catalog snapshots, package tiers, and the built-in
//!   mini services
//! - [`session`] - cart items, the booking-session merger, and the permanent
//!   services cart
//! - [`pricing`] - subtotal / GST / promo-discount totals
//! - [`booking`] - time slots, the booking form, and the submit controller
//! - [`payment`] - method selection and the final booking commit
//! - [`api`] - REST client for the external backend
//! - [`account`] - stored user snapshot, bearer token, sign-in/sign-up flows
//! - [`recommend`] - similar-service and mini-service suggestions
//!
//! Session, pricing, and validation are synchronous by construction; only the
//! REST client is async.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod account;
pub mod api;
pub mod booking;
pub mod catalog;
pub mod config;
pub mod error;
pub mod payment;
pub mod pricing;
pub mod recommend;
pub mod session;
pub mod storage;

pub use config::StorefrontConfig;
pub use error::FunnelError;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Initialize tracing with an `EnvFilter` for embedders.
///
/// Defaults to info level for this crate if `RUST_LOG` is not set. Call once
/// at startup; a second call panics, so binaries embedding this crate should
/// own subscriber setup themselves if they need anything fancier.
pub fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "kushi_storefront=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
