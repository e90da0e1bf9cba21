//! Service catalog snapshots.
//!
//! Catalog records come from `GET /api/customers/all-services` in a loose
//! snake_case shape with plenty of optional fields. [`Service`] is the cleaned
//! snapshot the rest of the funnel works with; the mapping applies the site's
//! display fallbacks so a sparse record still renders.

pub mod mini;
pub mod packages;

use kushi_core::{Rupees, ServiceId};
use serde::{Deserialize, Serialize};
use url::Url;

pub use mini::mini_services;
pub use packages::{ServicePackage, parse_packages};

/// Image used when a record carries no image URL.
const PLACEHOLDER_IMAGE: &str = "/placeholder.jpg";

/// A bookable catalog offering, snapshotted at fetch time.
///
/// Prices and descriptions are copied, not live-linked: a cart item created
/// from a `Service` keeps the price at time of add even if the catalog
/// changes later.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub id: ServiceId,
    pub name: String,
    pub category: String,
    pub subcategory: String,
    pub price: Rupees,
    pub original_price: Rupees,
    pub rating: f64,
    pub reviews: String,
    pub duration: String,
    pub description: String,
    pub image: String,
    /// Raw `name:price:description;...` tier string; empty if single-tier.
    pub package: String,
}

impl Service {
    /// Build a display-ready snapshot from a wire record.
    ///
    /// `index` is the positional fallback id for records missing
    /// `service_id`; `base_url` absolutizes relative image paths.
    #[must_use]
    pub fn from_record(record: &ServiceRecord, index: usize, base_url: &Url) -> Self {
        let price = record
            .service_cost
            .and_then(Rupees::from_f64)
            .unwrap_or_else(Rupees::zero);
        let original_price = record
            .original_cost
            .and_then(Rupees::from_f64)
            .unwrap_or(price);

        Self {
            id: record
                .service_id
                .map_or_else(|| ServiceId::new(index.to_string()), |id| {
                    ServiceId::new(id.to_string())
                }),
            name: record
                .service_name
                .clone()
                .unwrap_or_else(|| "Unnamed Service".to_owned()),
            category: record
                .service_category
                .clone()
                .unwrap_or_else(|| "General".to_owned()),
            subcategory: record.service_type.clone().unwrap_or_default(),
            price,
            original_price,
            rating: record
                .rating
                .as_ref()
                .and_then(LenientNumber::as_f64)
                .unwrap_or(4.8),
            reviews: record
                .rating_count
                .as_ref()
                .and_then(LenientNumber::as_f64)
                .map_or_else(|| "0".to_owned(), |count| format!("{count:.0}")),
            duration: record
                .duration
                .clone()
                .unwrap_or_else(|| "4-6 hours".to_owned()),
            description: record.service_description.clone().unwrap_or_default(),
            image: absolutize_image(record.service_image_url.as_deref(), base_url),
            package: record.service_package.clone().unwrap_or_default(),
        }
    }

    /// Whether this is one of the built-in mini services.
    #[must_use]
    pub fn is_mini(&self) -> bool {
        self.id.is_mini()
    }

    /// The parsed package tiers, if any.
    #[must_use]
    pub fn packages(&self) -> Vec<ServicePackage> {
        parse_packages(&self.package)
    }

    /// Whether the service offers a choice of tiers (more than one package).
    #[must_use]
    pub fn has_multiple_packages(&self) -> bool {
        self.packages().len() > 1
    }

    /// Whether the service carries any package data at all.
    #[must_use]
    pub fn has_packages(&self) -> bool {
        !self.package.trim().is_empty()
    }

    /// A copy of this service specialized to one chosen tier.
    ///
    /// The name becomes `"Name (Tier)"`, the price swaps to the tier price,
    /// and the description prefers the tier's own text - the details page's
    /// package selection.
    #[must_use]
    pub fn with_package(&self, pkg: &ServicePackage) -> Self {
        let mut chosen = self.clone();
        chosen.name = format!("{} ({})", self.name, pkg.name);
        chosen.price = pkg.price.unwrap_or(self.price);
        if !pkg.description.is_empty() {
            chosen.description.clone_from(&pkg.description);
        }
        chosen.package.clone_from(&pkg.name);
        chosen
    }
}

/// Raw catalog record as the backend serves it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServiceRecord {
    #[serde(default)]
    pub service_id: Option<i64>,
    #[serde(default)]
    pub service_name: Option<String>,
    #[serde(default)]
    pub service_category: Option<String>,
    #[serde(default)]
    pub service_type: Option<String>,
    #[serde(default)]
    pub service_cost: Option<f64>,
    #[serde(default)]
    pub original_cost: Option<f64>,
    #[serde(default)]
    pub rating: Option<LenientNumber>,
    #[serde(default)]
    pub rating_count: Option<LenientNumber>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub service_description: Option<String>,
    #[serde(default)]
    pub service_image_url: Option<String>,
    #[serde(default)]
    pub service_package: Option<String>,
    #[serde(default)]
    pub active: Option<String>,
}

impl ServiceRecord {
    /// Records are listed only when the backend flags them `"Y"`.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active.as_deref() == Some("Y")
    }
}

/// A number the backend sometimes sends as a string (`"4.5"` vs `4.5`).
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum LenientNumber {
    Number(f64),
    Text(String),
}

impl LenientNumber {
    /// The numeric value, if the text form parses.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.trim().parse().ok(),
        }
    }
}

/// Absolutize an image path against the API base URL.
fn absolutize_image(raw: Option<&str>, base_url: &Url) -> String {
    match raw {
        None | Some("") => PLACEHOLDER_IMAGE.to_owned(),
        Some(path) if path.starts_with("http") => path.to_owned(),
        Some(path) => base_url
            .join(path)
            .map_or_else(|_| PLACEHOLDER_IMAGE.to_owned(), |u| u.to_string()),
    }
}
