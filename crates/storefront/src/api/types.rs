//! Wire types for the backend REST API.
//!
//! The backend is loose about shapes: list endpoints sometimes wrap their
//! array in an envelope, numeric fields sometimes arrive as strings, and the
//! same record uses different key spellings across endpoints. The types here
//! absorb that so callers see one clean shape.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::catalog::LenientNumber;

/// A list endpoint's response, with or without a `{"data": [...]}` envelope.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ListResponse<T> {
    Bare(Vec<T>),
    Wrapped { data: Vec<T> },
}

impl<T> ListResponse<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Self::Bare(items) | Self::Wrapped { data: items } => items,
        }
    }
}

/// `GET /api/admin/top-services`: either a bare array or
/// `{"topServices": [...]}`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum TopServicesResponse {
    Wrapped {
        #[serde(rename = "topServices")]
        top_services: Vec<TopService>,
    },
    Bare(Vec<TopService>),
}

impl TopServicesResponse {
    pub fn into_vec(self) -> Vec<TopService> {
        match self {
            Self::Wrapped { top_services } | Self::Bare(top_services) => top_services,
        }
    }
}

/// One most-booked service, as the dashboard aggregates it.
///
/// Field spellings vary between deployments; accessors apply the fallback
/// chains.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TopService {
    #[serde(default)]
    pub booking_service_id: Option<LenientNumber>,
    #[serde(default)]
    pub service_id: Option<LenientNumber>,
    #[serde(default)]
    pub id: Option<LenientNumber>,
    #[serde(default)]
    pub booking_service_name: Option<String>,
    #[serde(default)]
    pub service_name: Option<String>,
    #[serde(default)]
    pub booking_service_subcategory: Option<String>,
    #[serde(default)]
    pub service_type: Option<String>,
    #[serde(default)]
    pub service_category: Option<String>,
    #[serde(default)]
    pub bookings: Option<LenientNumber>,
}

impl TopService {
    /// The service id, trying the spellings in order.
    #[must_use]
    pub fn service_id(&self) -> Option<String> {
        [&self.booking_service_id, &self.service_id, &self.id]
            .into_iter()
            .flatten()
            .next()
            .and_then(LenientNumber::as_f64)
            .map(|id| format!("{id:.0}"))
    }

    /// The display name, trying the spellings in order.
    #[must_use]
    pub fn name(&self) -> &str {
        self.booking_service_name
            .as_deref()
            .or(self.service_name.as_deref())
            .unwrap_or("")
            .trim()
    }

    /// The best available category/subcategory hint for routing.
    #[must_use]
    pub fn subcategory_hint(&self) -> &str {
        self.booking_service_subcategory
            .as_deref()
            .or(self.service_type.as_deref())
            .or(self.service_category.as_deref())
            .map_or("general", str::trim)
    }
}

/// A rotating promotional offer from `GET /api/offers`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Offer {
    pub id: i64,
    pub text: String,
    #[serde(default)]
    pub font_family: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub emoji: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Absolutize an offer's image reference against the API base.
///
/// Bare filenames are assumed to live under `/uploads/`.
#[must_use]
pub fn normalize_upload_url(base_url: &Url, raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if raw.starts_with("http") {
        return Some(raw.to_owned());
    }
    let path = if raw.starts_with('/') {
        raw.to_owned()
    } else {
        format!("/uploads/{raw}")
    };
    base_url.join(&path).map(|u| u.to_string()).ok()
}

/// `POST /api/auth/signin` / `signup` response.
///
/// The user id key differs between backend versions; profile fields may be
/// inlined or require a follow-up profile fetch.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    #[serde(default)]
    pub id: Option<LenientNumber>,
    #[serde(default)]
    pub customer_id: Option<LenientNumber>,
    #[serde(default)]
    pub user_id: Option<LenientNumber>,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(flatten)]
    pub profile: ProfileRecord,
}

impl AuthResponse {
    /// The user id, trying `id`, `customerId`, then `userId`.
    #[must_use]
    pub fn resolved_user_id(&self) -> Option<String> {
        [&self.id, &self.customer_id, &self.user_id]
            .into_iter()
            .flatten()
            .next()
            .and_then(LenientNumber::as_f64)
            .map(|id| format!("{id:.0}"))
    }
}

/// Account profile fields, from the auth response or the profile endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRecord {
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub pincode: Option<String>,
    #[serde(default)]
    pub join_date: Option<String>,
    #[serde(default)]
    pub total_bookings: Option<u32>,
    #[serde(default)]
    pub total_spent: Option<f64>,
}

impl ProfileRecord {
    /// The full name, falling back to `"first last"` when only the split
    /// fields are present.
    #[must_use]
    pub fn display_name(&self) -> String {
        if let Some(full) = self.full_name.as_deref().filter(|s| !s.trim().is_empty()) {
            return full.trim().to_owned();
        }
        format!(
            "{} {}",
            self.first_name.as_deref().unwrap_or(""),
            self.last_name.as_deref().unwrap_or("")
        )
        .trim()
        .to_owned()
    }
}

/// `POST /api/auth/signup` request body.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpRequest {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
}

/// `POST /api/auth/forgot-password` request body.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForgotPasswordRequest {
    pub email: String,
    pub new_password: String,
}

/// A field the backend serves as either one string or a list of strings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl OneOrMany {
    /// Normalize to a list.
    #[must_use]
    pub fn into_vec(self) -> Vec<String> {
        match self {
            Self::One(value) => vec![value],
            Self::Many(values) => values,
        }
    }
}

/// A service reference inside an order-history row: some deployments store
/// plain names, others full records.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum BookedServiceRef {
    Name(String),
    Record {
        #[serde(default, rename = "serviceId")]
        service_id: Option<String>,
        #[serde(default, rename = "serviceName")]
        service_name: Option<String>,
    },
}

impl BookedServiceRef {
    /// The best display name for the reference.
    #[must_use]
    pub fn display_name(&self) -> &str {
        match self {
            Self::Name(name) => name,
            Self::Record {
                service_name,
                service_id,
            } => service_name
                .as_deref()
                .or(service_id.as_deref())
                .unwrap_or(""),
        }
    }
}

/// An order-history row from `GET /api/auth/bookings/logged-in`.
///
/// The backend mixes snake_case and camelCase in the same record, so every
/// field carries its literal wire name.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookingRecord {
    #[serde(default)]
    pub booking_id: i64,
    #[serde(default)]
    pub booking_service_name: String,
    #[serde(default, rename = "bookingDate")]
    pub booking_date: String,
    #[serde(default)]
    pub booking_time: String,
    #[serde(default, rename = "totalAmount")]
    pub total_amount: f64,
    #[serde(default)]
    pub discount: Option<f64>,
    #[serde(default, rename = "bookingStatus")]
    pub booking_status: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub address_line_1: String,
    #[serde(default)]
    pub worker_assign: Option<OneOrMany>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub feedback: Option<String>,
    #[serde(default, rename = "canceledBy")]
    pub canceled_by: Option<String>,
    #[serde(default)]
    pub cancellation_reason: Option<String>,
    #[serde(default)]
    pub services: Option<Vec<BookedServiceRef>>,
}

impl BookingRecord {
    /// Assigned workers, normalized to a list.
    #[must_use]
    pub fn workers(&self) -> Vec<String> {
        self.worker_assign.clone().map(OneOrMany::into_vec).unwrap_or_default()
    }

    /// The booked services, normalized to a list.
    #[must_use]
    pub fn services(&self) -> &[BookedServiceRef] {
        self.services.as_deref().unwrap_or_default()
    }
}

/// `PUT /api/bookings/{id}/status` request body.
#[derive(Debug, Clone, Serialize)]
pub struct BookingStatusUpdate {
    pub status: String,
    #[serde(rename = "canceledBy")]
    pub canceled_by: String,
    pub cancellation_reason: String,
}

impl BookingStatusUpdate {
    /// A customer-initiated cancellation with its reason.
    #[must_use]
    pub fn customer_cancellation(reason: &str) -> Self {
        Self {
            status: "cancelled".to_owned(),
            canceled_by: "customer".to_owned(),
            cancellation_reason: reason.to_owned(),
        }
    }
}

/// `PUT /api/auth/bookings/{id}/rating` request body.
#[derive(Debug, Clone, Serialize)]
pub struct RatingUpdate {
    pub rating: u8,
    pub feedback: String,
}

/// A gallery entry from `GET /api/gallery`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GalleryImage {
    pub id: i64,
    pub file_name: String,
    pub file_url: String,
    pub uploaded_at: String,
    pub description: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_list_response_bare_and_wrapped() {
        let bare: ListResponse<i32> = serde_json::from_str("[1, 2, 3]").unwrap();
        assert_eq!(bare.into_vec(), vec![1, 2, 3]);

        let wrapped: ListResponse<i32> = serde_json::from_str(r#"{"data": [4]}"#).unwrap();
        assert_eq!(wrapped.into_vec(), vec![4]);
    }

    #[test]
    fn test_top_services_wrapper() {
        let wrapped: TopServicesResponse = serde_json::from_str(
            r#"{"topServices": [{"booking_service_name": "Sofa Cleaning", "bookings": 12}]}"#,
        )
        .unwrap();
        let list = wrapped.into_vec();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].name(), "Sofa Cleaning");
    }

    #[test]
    fn test_top_service_fallback_chains() {
        let top: TopService = serde_json::from_str(
            r#"{"service_id": "17", "service_name": "Deep Clean", "service_type": "Bathroom"}"#,
        )
        .unwrap();
        assert_eq!(top.service_id().as_deref(), Some("17"));
        assert_eq!(top.name(), "Deep Clean");
        assert_eq!(top.subcategory_hint(), "Bathroom");

        let empty = TopService::default();
        assert_eq!(empty.service_id(), None);
        assert_eq!(empty.name(), "");
        assert_eq!(empty.subcategory_hint(), "general");
    }

    #[test]
    fn test_normalize_upload_url() {
        let base = Url::parse("https://api.kushiservices.in").unwrap();
        assert_eq!(normalize_upload_url(&base, ""), None);
        assert_eq!(
            normalize_upload_url(&base, "https://cdn.example.com/x.png").as_deref(),
            Some("https://cdn.example.com/x.png")
        );
        assert_eq!(
            normalize_upload_url(&base, "/banners/holi.png").as_deref(),
            Some("https://api.kushiservices.in/banners/holi.png")
        );
        assert_eq!(
            normalize_upload_url(&base, "holi.png").as_deref(),
            Some("https://api.kushiservices.in/uploads/holi.png")
        );
    }

    #[test]
    fn test_auth_response_id_fallback() {
        let by_id: AuthResponse = serde_json::from_str(r#"{"id": 5}"#).unwrap();
        assert_eq!(by_id.resolved_user_id().as_deref(), Some("5"));

        let by_customer: AuthResponse =
            serde_json::from_str(r#"{"customerId": "9", "token": "t"}"#).unwrap();
        assert_eq!(by_customer.resolved_user_id().as_deref(), Some("9"));

        let missing: AuthResponse = serde_json::from_str(r#"{"token": "t"}"#).unwrap();
        assert_eq!(missing.resolved_user_id(), None);
    }

    #[test]
    fn test_booking_record_mixed_shapes() {
        let record: BookingRecord = serde_json::from_str(
            r#"{
                "booking_id": 31,
                "booking_service_name": "Deep House Cleaning",
                "bookingDate": "2025-04-01T10:00:00",
                "booking_time": "10:00 AM",
                "totalAmount": 2360.0,
                "bookingStatus": "completed",
                "worker_assign": "Ravi",
                "services": ["Deep House Cleaning", {"serviceId": "12"}]
            }"#,
        )
        .unwrap();

        assert_eq!(record.booking_id, 31);
        assert_eq!(record.workers(), vec!["Ravi"]);
        assert_eq!(record.services().len(), 2);
        assert_eq!(record.services()[0].display_name(), "Deep House Cleaning");
        assert_eq!(record.services()[1].display_name(), "12");

        let listed: BookingRecord = serde_json::from_str(
            r#"{"booking_id": 32, "worker_assign": ["Ravi", "Sita"]}"#,
        )
        .unwrap();
        assert_eq!(listed.workers(), vec!["Ravi", "Sita"]);

        let sparse: BookingRecord = serde_json::from_str("{}").unwrap();
        assert!(sparse.workers().is_empty());
        assert!(sparse.services().is_empty());
    }

    #[test]
    fn test_cancellation_body_wire_names() {
        let update = BookingStatusUpdate::customer_cancellation("double booked");
        let body = serde_json::to_value(&update).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "status": "cancelled",
                "canceledBy": "customer",
                "cancellation_reason": "double booked"
            })
        );
    }

    #[test]
    fn test_profile_display_name() {
        let full: ProfileRecord =
            serde_json::from_str(r#"{"fullName": " Asha Rao "}"#).unwrap();
        assert_eq!(full.display_name(), "Asha Rao");

        let split: ProfileRecord =
            serde_json::from_str(r#"{"firstName": "Asha", "lastName": "Rao"}"#).unwrap();
        assert_eq!(split.display_name(), "Asha Rao");

        assert_eq!(ProfileRecord::default().display_name(), "");
    }
}
