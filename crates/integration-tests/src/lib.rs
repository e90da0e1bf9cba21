//! Shared fixtures for the end-to-end flow tests.
//!
//! Each test drives the real funnel types against a `wiremock` backend and an
//! in-memory key-value store, so the flows here exercise exactly what the
//! site does: fetch catalog, fill a cart, merge the booking session, validate
//! the form, and commit the payment.

use chrono::{NaiveDate, NaiveDateTime};
use kushi_admin::{AdminApiClient, AdminConfig};
use kushi_storefront::StorefrontConfig;
use kushi_storefront::api::ApiClient;
use kushi_storefront::booking::BookingForm;
use serde_json::{Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Storefront API client pointed at a mock backend.
#[must_use]
pub fn storefront_client(server_uri: &str) -> ApiClient {
    let config = StorefrontConfig {
        api_base_url: url::Url::parse(server_uri).expect("mock server URI must parse"),
        ..StorefrontConfig::default()
    };
    ApiClient::new(&config).expect("failed to build storefront client")
}

/// Admin API client pointed at a mock backend.
#[must_use]
pub fn admin_client(server_uri: &str) -> AdminApiClient {
    let config = AdminConfig {
        api_base_url: url::Url::parse(server_uri).expect("mock server URI must parse"),
        ..AdminConfig::default()
    };
    AdminApiClient::new(&config).expect("failed to build admin client")
}

/// A catalog response body with two active services and one inactive one.
#[must_use]
pub fn catalog_body() -> Value {
    json!([
        {
            "service_id": 12,
            "service_name": "Deep House Cleaning",
            "service_category": "Cleaning",
            "service_type": "Home",
            "service_cost": 2000.0,
            "original_cost": 2500.0,
            "rating": 4.6,
            "rating_count": 120,
            "duration": "5-6 hours",
            "service_description": "Full home deep clean",
            "service_image_url": "/uploads/deep.jpg",
            "active": "Y"
        },
        {
            "service_id": 13,
            "service_name": "Sofa Shampooing",
            "service_category": "Cleaning",
            "service_type": "Upholstery",
            "service_cost": 999.0,
            "rating": "4.4",
            "active": "Y"
        },
        {
            "service_id": 14,
            "service_name": "Retired Offering",
            "service_cost": 100.0,
            "active": "N"
        }
    ])
}

/// Mount the catalog endpoint on a mock backend.
pub async fn mount_catalog(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/customers/all-services"))
        .respond_with(ResponseTemplate::new(200).set_body_json(catalog_body()))
        .mount(server)
        .await;
}

/// A fixed clock two weeks before the fixture form's appointment date.
#[must_use]
pub fn booking_clock() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 3, 18)
        .and_then(|date| date.and_hms_opt(9, 0, 0))
        .expect("fixture clock must be valid")
}

/// A booking form with every required field filled in.
#[must_use]
pub fn filled_form() -> BookingForm {
    BookingForm {
        date: "2025-04-01".to_owned(),
        time: "10:00 AM".to_owned(),
        name: "Asha Rao".to_owned(),
        email: "asha@example.com".to_owned(),
        phone: "9876543210".to_owned(),
        address: "12 MG Road".to_owned(),
        city: "Bengaluru".to_owned(),
        pincode: "560001".to_owned(),
        ..BookingForm::default()
    }
}
