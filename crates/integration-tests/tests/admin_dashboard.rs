//! Admin dashboard data layer against a mock backend.

#![allow(clippy::unwrap_used)]

use kushi_admin::CategoryBookingsChart;
use kushi_integration_tests::admin_client;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn category_stats_become_a_sorted_chart() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/admin/category-wise-bookings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": [
                { "serviceCategory": "Painting", "completedCount": 3, "cancelledCount": 1 },
                { "serviceCategory": "Cleaning", "completedCount": 18, "cancelledCount": 6 }
            ]
        })))
        .mount(&server)
        .await;

    let stats = admin_client(&server.uri())
        .category_wise_bookings()
        .await
        .unwrap();
    let chart = CategoryBookingsChart::from_stats(stats);

    assert!(!chart.is_empty());
    assert_eq!(chart.labels(), vec!["Cleaning", "Painting"]);
    assert_eq!(chart.completed_series(), vec![18, 3]);
    assert_eq!(chart.cancelled_series(), vec![6, 1]);
    assert_eq!(chart.total_completed(), 21);
    assert_eq!(chart.total_cancelled(), 7);
    assert!((chart.completion_rate() - 0.75).abs() < f64::EPSILON);
}

#[tokio::test]
async fn no_bookings_renders_the_empty_card() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/admin/category-wise-bookings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&server)
        .await;

    let stats = admin_client(&server.uri())
        .category_wise_bookings()
        .await
        .unwrap();
    let chart = CategoryBookingsChart::from_stats(stats);

    assert!(chart.is_empty());
    assert!(chart.labels().is_empty());
}

#[tokio::test]
async fn top_rated_table_rows_parse() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/admin/top-rated-services"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {
                "service_name": "Deep House Cleaning",
                "service_type": "Cleaning",
                "service_cost": 2999.0,
                "service_image_url": "/uploads/deep.jpg",
                "rating": 4.8,
                "rating_count": 231
            },
            {
                "service_name": "Sofa Shampooing",
                "rating": 4.4
            }
        ])))
        .mount(&server)
        .await;

    let rows = admin_client(&server.uri()).top_rated_services().await.unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].service_name, "Deep House Cleaning");
    assert_eq!(rows[0].rating_count, 231);
    // Sparse rows fall back to defaults instead of failing the fetch.
    assert_eq!(rows[1].service_type, "");
    assert_eq!(rows[1].rating_count, 0);
}
