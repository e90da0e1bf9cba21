//! REST client for the admin dashboard endpoints.

use kushi_core::Rupees;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::config::AdminConfig;

/// Errors from the admin API client.
#[derive(Debug, Error)]
pub enum AdminApiError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Failed to parse response: {0}")]
    Parse(String),
}

/// Per-category completed/cancelled booking counts from the backend
/// aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryBookingStat {
    #[serde(default)]
    pub service_category: String,
    #[serde(default)]
    pub completed_count: u64,
    #[serde(default)]
    pub cancelled_count: u64,
}

/// A row of the dashboard's top-rated services table.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TopRatedService {
    #[serde(default)]
    pub service_name: String,
    #[serde(default)]
    pub service_type: String,
    #[serde(default)]
    pub service_cost: Rupees,
    #[serde(default)]
    pub service_image_url: String,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub rating_count: u32,
}

/// A most-booked-service aggregate row.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MostBookedService {
    #[serde(default)]
    pub booking_service_name: Option<String>,
    #[serde(default)]
    pub service_name: Option<String>,
    #[serde(default)]
    pub bookings: u64,
}

impl MostBookedService {
    /// Display name for the row, whichever field the backend filled.
    #[must_use]
    pub fn name(&self) -> &str {
        self.booking_service_name
            .as_deref()
            .or(self.service_name.as_deref())
            .unwrap_or("")
    }
}

/// The backend wraps list endpoints inconsistently; accept either shape.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ListEnvelope<T> {
    Bare(Vec<T>),
    Wrapped { data: Vec<T> },
}

impl<T> ListEnvelope<T> {
    fn into_vec(self) -> Vec<T> {
        match self {
            Self::Bare(items) | Self::Wrapped { data: items } => items,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TopServicesEnvelope {
    Wrapped {
        #[serde(rename = "topServices")]
        top_services: Vec<MostBookedService>,
    },
    Bare(Vec<MostBookedService>),
}

/// Client for the `/api/admin` aggregate endpoints.
#[derive(Debug, Clone)]
pub struct AdminApiClient {
    client: reqwest::Client,
    base_url: Url,
}

impl AdminApiClient {
    /// Build a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the underlying HTTP client cannot be constructed.
    pub fn new(config: &AdminConfig) -> Result<Self, AdminApiError> {
        let client = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .build()?;
        Ok(Self {
            client,
            base_url: config.api_base_url.clone(),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, AdminApiError> {
        self.base_url
            .join(path)
            .map_err(|e| AdminApiError::Parse(format!("invalid endpoint '{path}': {e}")))
    }

    /// Fetch per-category completed/cancelled booking counts.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure, non-success status, or an
    /// unparseable body.
    pub async fn category_wise_bookings(
        &self,
    ) -> Result<Vec<CategoryBookingStat>, AdminApiError> {
        let url = self.endpoint("/api/admin/category-wise-bookings")?;
        let response = self.client.get(url).send().await?;
        let response = check_status(response).await?;
        let envelope: ListEnvelope<CategoryBookingStat> = response.json().await?;
        Ok(envelope.into_vec())
    }

    /// Fetch the top-rated services table rows.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure, non-success status, or an
    /// unparseable body.
    pub async fn top_rated_services(&self) -> Result<Vec<TopRatedService>, AdminApiError> {
        let url = self.endpoint("/api/admin/top-rated-services")?;
        let response = self.client.get(url).send().await?;
        let response = check_status(response).await?;
        let envelope: ListEnvelope<TopRatedService> = response.json().await?;
        Ok(envelope.into_vec())
    }

    /// Fetch the most-booked-services aggregate.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure, non-success status, or an
    /// unparseable body.
    pub async fn top_services(&self) -> Result<Vec<MostBookedService>, AdminApiError> {
        let url = self.endpoint("/api/admin/top-services")?;
        let response = self.client.get(url).send().await?;
        let response = check_status(response).await?;
        let envelope: TopServicesEnvelope = response.json().await?;
        Ok(match envelope {
            TopServicesEnvelope::Wrapped { top_services } => top_services,
            TopServicesEnvelope::Bare(rows) => rows,
        })
    }
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, AdminApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response
        .text()
        .await
        .unwrap_or_else(|_| "<unreadable body>".to_string());
    tracing::warn!(status = status.as_u16(), %message, "admin API error");
    Err(AdminApiError::Api {
        status: status.as_u16(),
        message,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn client_for(server: &MockServer) -> AdminApiClient {
        let config = AdminConfig {
            api_base_url: Url::parse(&server.uri()).unwrap(),
            ..AdminConfig::default()
        };
        AdminApiClient::new(&config).unwrap()
    }

    #[tokio::test]
    async fn test_category_stats_accept_bare_array() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/admin/category-wise-bookings"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                { "serviceCategory": "Cleaning", "completedCount": 12, "cancelledCount": 3 }
            ])))
            .mount(&server)
            .await;

        let stats = client_for(&server)
            .await
            .category_wise_bookings()
            .await
            .unwrap();
        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].service_category, "Cleaning");
        assert_eq!(stats[0].completed_count, 12);
        assert_eq!(stats[0].cancelled_count, 3);
    }

    #[tokio::test]
    async fn test_category_stats_accept_data_wrapper() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/admin/category-wise-bookings"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [
                    { "serviceCategory": "Painting", "completedCount": 4, "cancelledCount": 0 }
                ]
            })))
            .mount(&server)
            .await;

        let stats = client_for(&server)
            .await
            .category_wise_bookings()
            .await
            .unwrap();
        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].service_category, "Painting");
    }

    #[tokio::test]
    async fn test_top_rated_rows_parse() {
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
                }
            ])))
            .mount(&server)
            .await;

        let rows = client_for(&server).await.top_rated_services().await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].service_name, "Deep House Cleaning");
        assert_eq!(rows[0].service_cost, Rupees::from_rupees(2999));
        assert_eq!(rows[0].rating_count, 231);
    }

    #[tokio::test]
    async fn test_top_services_accept_wrapper() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/admin/top-services"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "topServices": [
                    { "booking_service_name": "Bathroom Cleaning", "bookings": 42 }
                ]
            })))
            .mount(&server)
            .await;

        let rows = client_for(&server).await.top_services().await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name(), "Bathroom Cleaning");
        assert_eq!(rows[0].bookings, 42);
    }

    #[tokio::test]
    async fn test_error_status_surfaces() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/admin/category-wise-bookings"))
            .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .await
            .category_wise_bookings()
            .await
            .unwrap_err();
        assert!(matches!(err, AdminApiError::Api { status: 503, .. }));
    }
}
