//! End-to-end booking funnel: catalog → cart → session → form → payment.

#![allow(clippy::unwrap_used)]

use kushi_core::{PaymentMethod, PaymentStatus, Rupees};
use kushi_integration_tests::{booking_clock, filled_form, mount_catalog, storefront_client};
use kushi_storefront::booking::{SubmitError, submit_booking};
use kushi_storefront::payment::confirm_payment;
use kushi_storefront::session::{BookingSession, ServicesCart, SessionSeed};
use kushi_storefront::storage::{KeyValueStore, MemoryStore, keys, read_json_or_default};
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn cart_to_confirmed_cash_booking() {
    let server = MockServer::start().await;
    mount_catalog(&server).await;
    Mock::given(method("POST"))
        .and(path("/api/bookings/newbookings"))
        .and(body_partial_json(serde_json::json!({
            "customerName": "Asha Rao",
            "bookingServiceName": "Deep House Cleaning",
            "bookingAmount": 2000.0,
            "totalAmount": 2360.0,
            "paymentMethod": "cash",
            "paymentStatus": "Pending"
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let api = storefront_client(&server.uri());
    let store = MemoryStore::new();

    let services = api.all_services().await.unwrap();
    let deep_clean = services
        .iter()
        .find(|s| s.name == "Deep House Cleaning")
        .unwrap();

    let mut cart = ServicesCart::load(&store);
    cart.add_service(&store, deep_clean);

    let session = BookingSession::initialize(&store, SessionSeed::CartHandoff(cart.handoff()));
    assert_eq!(session.items().len(), 1);

    let draft = submit_booking(
        &store,
        &session,
        &filled_form(),
        Rupees::zero(),
        "",
        None,
        booking_clock(),
    )
    .unwrap();
    assert_eq!(draft.totals.subtotal, Rupees::from_rupees(2000));
    assert_eq!(draft.totals.tax, Rupees::from_rupees(360));
    assert_eq!(draft.totals.total, Rupees::from_rupees(2360));

    let receipt = confirm_payment(&api, &store, &draft, PaymentMethod::Cash)
        .await
        .unwrap();
    assert_eq!(receipt.service_name, "Deep House Cleaning");
    assert_eq!(receipt.settlement, PaymentStatus::Pending);

    // Payment clears the cart keys but keeps the saved form for next time.
    assert_eq!(store.get(keys::SERVICES_CART).unwrap(), None);
    assert_eq!(store.get(keys::BOOKING_SESSION).unwrap(), None);
    assert!(store.get(keys::BOOKING_FORM).unwrap().is_some());
}

#[tokio::test]
async fn minimum_order_boundary_is_strict() {
    let server = MockServer::start().await;
    mount_catalog(&server).await;

    let api = storefront_client(&server.uri());
    let store = MemoryStore::new();

    let services = api.all_services().await.unwrap();
    let deep_clean = services
        .iter()
        .find(|s| s.name == "Deep House Cleaning")
        .unwrap()
        .clone();
    let session = BookingSession::initialize(&store, SessionSeed::BookNow(deep_clean));

    // 2000 + 360 GST = 2360; a promo of 860 lands exactly on 1500.
    let err = submit_booking(
        &store,
        &session,
        &filled_form(),
        Rupees::from_rupees(860),
        "WELCOME",
        None,
        booking_clock(),
    )
    .unwrap_err();
    assert!(matches!(err, SubmitError::BelowMinimum { .. }));

    // One rupee above the line goes through.
    let draft = submit_booking(
        &store,
        &session,
        &filled_form(),
        Rupees::from_rupees(859),
        "WELCOME",
        None,
        booking_clock(),
    )
    .unwrap();
    assert_eq!(draft.totals.total, Rupees::from_rupees(1501));
    assert_eq!(draft.applied_promo, "WELCOME");
}

#[tokio::test]
async fn field_errors_are_not_the_minimum_popup() {
    let server = MockServer::start().await;
    mount_catalog(&server).await;

    let api = storefront_client(&server.uri());
    let store = MemoryStore::new();

    let services = api.all_services().await.unwrap();
    let deep_clean = services
        .iter()
        .find(|s| s.name == "Deep House Cleaning")
        .unwrap()
        .clone();
    let session = BookingSession::initialize(&store, SessionSeed::BookNow(deep_clean));

    let mut form = filled_form();
    form.phone = "98765".to_owned();

    let err = submit_booking(&store, &session, &form, Rupees::zero(), "", None, booking_clock())
        .unwrap_err();
    match err {
        SubmitError::Validation(errors) => {
            assert_eq!(
                errors.message_for("phone"),
                Some("Phone number must be exactly 10 digits")
            );
        }
        other => panic!("expected field errors, got {other}"),
    }
}

#[tokio::test]
async fn stored_session_wins_over_handoff_and_book_now() {
    let server = MockServer::start().await;
    mount_catalog(&server).await;

    let api = storefront_client(&server.uri());
    let store = MemoryStore::new();

    let services = api.all_services().await.unwrap();
    let deep_clean = services
        .iter()
        .find(|s| s.name == "Deep House Cleaning")
        .unwrap()
        .clone();
    let sofa = services
        .iter()
        .find(|s| s.name == "Sofa Shampooing")
        .unwrap()
        .clone();

    // Seed a stored session with one item at its current price.
    let first = BookingSession::initialize(&store, SessionSeed::BookNow(deep_clean.clone()));
    assert_eq!(first.items().len(), 1);
    let stored_price = first.items()[0].price;

    // A handoff does not replace a non-empty stored session.
    let merged = BookingSession::initialize(
        &store,
        SessionSeed::CartHandoff(vec![
            kushi_storefront::session::CartItem::from_service(&sofa),
        ]),
    );
    assert_eq!(merged.items().len(), 1);
    assert_eq!(merged.items()[0].id, deep_clean.id);

    // Booking the same service again, even at a different price, keeps the
    // stored line untouched.
    let mut repriced = deep_clean.clone();
    repriced.price = Rupees::from_rupees(700);
    let after = BookingSession::initialize(&store, SessionSeed::BookNow(repriced));
    assert_eq!(after.items().len(), 1);
    assert_eq!(after.items()[0].price, stored_price);
}

#[tokio::test]
async fn session_round_trip_preserves_order_and_fields() {
    let server = MockServer::start().await;
    mount_catalog(&server).await;

    let api = storefront_client(&server.uri());
    let store = MemoryStore::new();

    let services = api.all_services().await.unwrap();
    let handoff: Vec<_> = services
        .iter()
        .take(3)
        .map(kushi_storefront::session::CartItem::from_service)
        .collect();

    let session = BookingSession::initialize(&store, SessionSeed::CartHandoff(handoff.clone()));
    let reloaded = BookingSession::initialize(&store, SessionSeed::Resume);

    assert_eq!(reloaded.items().len(), session.items().len());
    for (stored, original) in reloaded.items().iter().zip(&handoff) {
        assert_eq!(stored.id, original.id);
        assert_eq!(stored.name, original.name);
        assert_eq!(stored.price, original.price);
        assert_eq!(stored.category, original.category);
    }

    // The raw stored value is the plain camelCase item array.
    let raw: Vec<serde_json::Value> = read_json_or_default(&store, keys::BOOKING_SESSION);
    assert_eq!(raw.len(), handoff.len());
    assert!(raw[0].get("cartItemId").is_some());
}
