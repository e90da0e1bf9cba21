//! Kushi Admin - data layer for the internal dashboard.
//!
//! The dashboard itself is a thin rendering shell; everything it plots comes
//! through here. [`api`] fetches the booking aggregates from the backend's
//! `/api/admin` endpoints (which wrap their list responses inconsistently, so
//! the client tolerates both shapes), and [`charts`] turns the raw rows into
//! ready-to-render datasets.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod charts;
pub mod config;

pub use api::{AdminApiClient, AdminApiError, CategoryBookingStat, MostBookedService, TopRatedService};
pub use charts::CategoryBookingsChart;
pub use config::AdminConfig;
