//! Package tiers parsed from the catalog's `service_package` string.
//!
//! The backend encodes tiers as a single `;`-separated field of
//! `name:price:description` triples, e.g.
//! `"Basic:999:Surface clean;Premium:1999:Deep clean"`.

use kushi_core::Rupees;

/// One named tier of a catalog service.
#[derive(Debug, Clone, PartialEq)]
pub struct ServicePackage {
    /// Tier name, e.g. "Basic" or "Premium".
    pub name: String,
    /// Tier price; `None` if the price segment was missing or unparseable.
    pub price: Option<Rupees>,
    /// Tier-specific description; empty if not provided.
    pub description: String,
}

/// Parse the raw `service_package` field into its tiers.
///
/// Empty segments are skipped; missing price or description parts fall back
/// to `None` / empty the way the site's split did.
#[must_use]
pub fn parse_packages(raw: &str) -> Vec<ServicePackage> {
    raw.split(';')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            let mut parts = segment.splitn(3, ':');
            let name = parts.next().unwrap_or_default().trim().to_owned();
            let price = parts
                .next()
                .and_then(|p| p.trim().parse::<f64>().ok())
                .and_then(Rupees::from_f64);
            let description = parts.next().unwrap_or_default().trim().to_owned();
            ServicePackage {
                name,
                price,
                description,
            }
        })
        .collect()
}
