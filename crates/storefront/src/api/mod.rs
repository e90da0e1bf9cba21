//! REST client for the Kushi Services backend.
//!
//! One [`ApiClient`] serves the whole funnel: catalog fetches (cached),
//! booking commits, auth, offers, and the most-booked-services feed. Every
//! endpoint checks the HTTP status before parsing and maps failures into
//! [`ApiError`].

pub mod types;

use std::sync::Arc;

use kushi_core::BookingId;
use moka::future::Cache;
use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use tokio::sync::watch;

use crate::booking::BookingPayload;
use crate::catalog::{Service, ServiceRecord, mini_services};
use crate::config::StorefrontConfig;

pub use types::{
    AuthResponse, BookedServiceRef, BookingRecord, BookingStatusUpdate, ForgotPasswordRequest,
    GalleryImage, ListResponse, Offer, OneOrMany, ProfileRecord, RatingUpdate, SignUpRequest,
    TopService, normalize_upload_url,
};

/// Cache key for the single catalog snapshot.
const SERVICES_CACHE_KEY: &str = "all-services";

/// Errors that can occur when talking to the backend API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Failed to parse a response or build a request URL.
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Backend REST API client.
#[derive(Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: url::Url,
    services_cache: Cache<&'static str, Arc<Vec<Service>>>,
}

impl ApiClient {
    /// Create a new API client from configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &StorefrontConfig) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert("Accept", HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.http_timeout)
            .build()?;

        let services_cache = Cache::builder()
            .max_capacity(1)
            .time_to_live(config.services_cache_ttl)
            .build();

        Ok(Self {
            client,
            base_url: config.api_base_url.clone(),
            services_cache,
        })
    }

    fn endpoint(&self, path: &str) -> Result<url::Url, ApiError> {
        self.base_url
            .join(path)
            .map_err(|e| ApiError::Parse(format!("invalid endpoint {path}: {e}")))
    }

    /// The full catalog: active backend records plus the built-in minis.
    ///
    /// Snapshots are cached for the configured TTL, so a browsing session
    /// does not hammer the catalog endpoint.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the response does not parse.
    pub async fn all_services(&self) -> Result<Arc<Vec<Service>>, ApiError> {
        if let Some(cached) = self.services_cache.get(SERVICES_CACHE_KEY).await {
            return Ok(cached);
        }

        let url = self.endpoint("/api/customers/all-services")?;
        let response = self.client.get(url).send().await?;
        let response = check_status(response).await?;

        let records: ListResponse<ServiceRecord> = response
            .json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))?;

        let mut services: Vec<Service> = records
            .into_vec()
            .iter()
            .enumerate()
            .filter(|(_, record)| record.is_active())
            .map(|(index, record)| Service::from_record(record, index, &self.base_url))
            .collect();
        services.extend(mini_services());

        let services = Arc::new(services);
        self.services_cache
            .insert(SERVICES_CACHE_KEY, Arc::clone(&services))
            .await;
        Ok(services)
    }

    /// Like [`Self::all_services`], but a failed fetch degrades to the
    /// built-in minis instead of erroring, so booking keeps working offline.
    pub async fn all_services_or_minis(&self) -> Arc<Vec<Service>> {
        match self.all_services().await {
            Ok(services) => services,
            Err(err) => {
                tracing::warn!(error = %err, "catalog fetch failed, serving mini services only");
                Arc::new(mini_services())
            }
        }
    }

    /// Commit a booking. The payload must already carry the chosen payment
    /// method and settlement status.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the backend rejects the record.
    pub async fn create_booking(&self, payload: &BookingPayload) -> Result<(), ApiError> {
        let url = self.endpoint("/api/bookings/newbookings")?;
        let response = self.client.post(url).json(payload).send().await?;
        check_status(response).await?;
        Ok(())
    }

    /// Sign in with email and password.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the credentials are rejected.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<AuthResponse, ApiError> {
        let url = self.endpoint("/api/auth/signin")?;
        let body = serde_json::json!({ "email": email, "password": password });
        let response = self.client.post(url).json(&body).send().await?;
        let response = check_status(response).await?;
        response
            .json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }

    /// Register a new account.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the backend rejects the signup.
    pub async fn sign_up(&self, request: &SignUpRequest) -> Result<AuthResponse, ApiError> {
        let url = self.endpoint("/api/auth/signup")?;
        let response = self.client.post(url).json(request).send().await?;
        let response = check_status(response).await?;
        response
            .json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }

    /// Fetch the full profile for a user id, with a bearer token when one
    /// was issued at sign-in.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails; callers typically fall back to
    /// the sign-in payload's inline profile.
    pub async fn profile(
        &self,
        user_id: &str,
        token: Option<&SecretString>,
    ) -> Result<ProfileRecord, ApiError> {
        let url = self.endpoint(&format!("/api/auth/profile/{user_id}"))?;
        let mut request = self.client.get(url);
        if let Some(token) = token {
            request = request.bearer_auth(token.expose_secret());
        }
        let response = request.send().await?;
        let response = check_status(response).await?;
        response
            .json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }

    /// The current rotating offers, image URLs absolutized.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the response does not parse.
    pub async fn offers(&self) -> Result<Vec<Offer>, ApiError> {
        let url = self.endpoint("/api/offers")?;
        let response = self.client.get(url).send().await?;
        let response = check_status(response).await?;

        let offers: ListResponse<Offer> = response
            .json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))?;

        Ok(offers
            .into_vec()
            .into_iter()
            .map(|mut offer| {
                offer.image_url = offer
                    .image_url
                    .as_deref()
                    .and_then(|raw| normalize_upload_url(&self.base_url, raw));
                offer
            })
            .collect())
    }

    /// The most-booked services, unwrapped from whichever envelope the
    /// backend uses.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the response does not parse.
    pub async fn top_services(&self) -> Result<Vec<TopService>, ApiError> {
        let url = self.endpoint("/api/admin/top-services")?;
        let response = self.client.get(url).send().await?;
        let response = check_status(response).await?;

        let top: types::TopServicesResponse = response
            .json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))?;
        Ok(top.into_vec())
    }

    /// The signed-in customer's order history.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the response does not parse.
    pub async fn bookings_for_email(&self, email: &str) -> Result<Vec<BookingRecord>, ApiError> {
        let mut url = self.endpoint("/api/auth/bookings/logged-in")?;
        url.query_pairs_mut().append_pair("email", email);
        let response = self.client.get(url).send().await?;
        let response = check_status(response).await?;
        let records: ListResponse<BookingRecord> = response
            .json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))?;
        Ok(records.into_vec())
    }

    /// One booking by its backend id, for the order detail view.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the response does not parse.
    pub async fn booking(&self, id: BookingId) -> Result<BookingRecord, ApiError> {
        let url = self.endpoint(&format!("/api/bookings/{id}"))?;
        let response = self.client.get(url).send().await?;
        let response = check_status(response).await?;
        response
            .json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }

    /// Update a booking's status, e.g. a customer cancellation.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the backend rejects the update.
    pub async fn update_booking_status(
        &self,
        id: BookingId,
        update: &BookingStatusUpdate,
    ) -> Result<(), ApiError> {
        let url = self.endpoint(&format!("/api/bookings/{id}/status"))?;
        let response = self.client.put(url).json(update).send().await?;
        check_status(response).await?;
        Ok(())
    }

    /// Rate a completed booking.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the backend rejects the rating.
    pub async fn submit_rating(
        &self,
        id: BookingId,
        rating: u8,
        feedback: &str,
    ) -> Result<(), ApiError> {
        let url = self.endpoint(&format!("/api/auth/bookings/{id}/rating"))?;
        let body = RatingUpdate {
            rating,
            feedback: feedback.to_owned(),
        };
        let response = self.client.put(url).json(&body).send().await?;
        check_status(response).await?;
        Ok(())
    }

    /// Reset a forgotten password.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the backend rejects the reset.
    pub async fn forgot_password(&self, email: &str, new_password: &str) -> Result<(), ApiError> {
        let url = self.endpoint("/api/auth/forgot-password")?;
        let body = ForgotPasswordRequest {
            email: email.to_owned(),
            new_password: new_password.to_owned(),
        };
        let response = self.client.post(url).json(&body).send().await?;
        check_status(response).await?;
        Ok(())
    }

    /// The customer gallery, file URLs absolutized.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the response does not parse.
    pub async fn gallery(&self) -> Result<Vec<GalleryImage>, ApiError> {
        let url = self.endpoint("/api/gallery")?;
        let response = self.client.get(url).send().await?;
        let response = check_status(response).await?;
        let images: ListResponse<GalleryImage> = response
            .json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))?;
        Ok(images
            .into_vec()
            .into_iter()
            .map(|mut image| {
                if let Some(absolute) = normalize_upload_url(&self.base_url, &image.file_url) {
                    image.file_url = absolute;
                }
                image
            })
            .collect())
    }

    /// Spawn a background task that re-polls the offers endpoint on the
    /// configured interval, publishing each successful fetch on the returned
    /// channel. A failed poll keeps the previous offers.
    #[must_use]
    pub fn spawn_offer_refresh(
        &self,
        interval: std::time::Duration,
    ) -> watch::Receiver<Vec<Offer>> {
        let (tx, rx) = watch::channel(Vec::new());
        let client = self.clone();

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                ticker.tick().await;
                match client.offers().await {
                    Ok(offers) => {
                        if tx.send(offers).is_err() {
                            // All receivers dropped.
                            break;
                        }
                    }
                    Err(err) => {
                        tracing::warn!(error = %err, "offer refresh failed, keeping last batch");
                    }
                }
            }
        });

        rx
    }
}

/// Check the response status, turning non-2xx into [`ApiError::Api`] with
/// the response body as the message.
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = response.status();
    if !status.is_success() {
        let message = response.text().await.unwrap_or_default();
        return Err(ApiError::Api {
            status: status.as_u16(),
            message,
        });
    }
    Ok(response)
}
