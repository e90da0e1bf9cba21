//! Service suggestions: similar-service carousels, mini add-ons, and
//! resolving a most-booked entry back to a catalog service.

use std::cmp::Ordering;

use crate::api::TopService;
use crate::catalog::{Service, mini_services};
use crate::session::CartItem;

/// Which fallback tier produced a suggestion set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimilarTier {
    /// Services sharing a subcategory with the booked items.
    Subcategory,
    /// Services sharing only a main category.
    Category,
    /// Global fallback: highest-rated services overall.
    TopRated,
}

/// A suggestion carousel: the services plus the heading to show over them.
#[derive(Debug, Clone)]
pub struct Suggestions {
    pub tier: SimilarTier,
    pub services: Vec<Service>,
    pub title: &'static str,
}

/// Build the similar-services carousel for the current item set.
///
/// Candidates exclude anything already booked and the built-in minis (those
/// have their own section). Matching falls through three tiers: same
/// subcategory, then same main category, then the top-rated services
/// overall. The result is capped at `limit` and titled per the tier that
/// matched.
#[must_use]
pub fn similar_services(all: &[Service], items: &[CartItem], limit: usize) -> Suggestions {
    if all.is_empty() || items.is_empty() {
        return Suggestions {
            tier: SimilarTier::TopRated,
            services: Vec::new(),
            title: "You Might Also Like",
        };
    }

    let subcategories: Vec<&str> = items
        .iter()
        .map(|item| item.subcategory.as_str())
        .filter(|s| !s.is_empty())
        .collect();
    let categories: Vec<&str> = items
        .iter()
        .map(|item| item.category.as_str())
        .filter(|c| !c.is_empty())
        .collect();

    let candidates: Vec<&Service> = all
        .iter()
        .filter(|service| {
            !items.iter().any(|item| item.id == service.id) && !service.is_mini()
        })
        .collect();

    let mut tier = SimilarTier::Subcategory;
    let mut matched: Vec<&Service> = candidates
        .iter()
        .copied()
        .filter(|service| subcategories.contains(&service.subcategory.as_str()))
        .collect();

    if matched.is_empty() {
        tier = SimilarTier::Category;
        matched = candidates
            .iter()
            .copied()
            .filter(|service| categories.contains(&service.category.as_str()))
            .collect();
    }

    if matched.is_empty() {
        tier = SimilarTier::TopRated;
        matched = candidates;
        matched.sort_by(|a, b| b.rating.partial_cmp(&a.rating).unwrap_or(Ordering::Equal));
    }

    matched.truncate(limit);
    let title = if matched.is_empty() {
        "You Might Also Like"
    } else {
        match tier {
            SimilarTier::Subcategory => "Similar Services in Your Subcategory",
            SimilarTier::Category => "More Services in the Same Category",
            SimilarTier::TopRated => "Top-Rated Services You Might Need",
        }
    };

    Suggestions {
        tier,
        services: matched.into_iter().cloned().collect(),
        title,
    }
}

/// The mini services not already in the item set.
#[must_use]
pub fn available_minis(items: &[CartItem]) -> Vec<Service> {
    mini_services()
        .into_iter()
        .filter(|mini| !items.iter().any(|item| item.id == mini.id))
        .collect()
}

/// Services from entirely different categories than the booked items,
/// for the "Other Services" carousel.
#[must_use]
pub fn other_services(all: &[Service], items: &[CartItem], limit: usize) -> Vec<Service> {
    let booked_categories: Vec<&str> =
        items.iter().map(|item| item.category.as_str()).collect();
    all.iter()
        .filter(|service| !booked_categories.contains(&service.category.as_str()))
        .take(limit)
        .cloned()
        .collect()
}

/// Resolve a most-booked entry to a catalog service.
///
/// Tries, in order: matching id, exact name (case-insensitive), then a
/// catalog name containing the aggregate's name - the backend sometimes
/// reports a shortened service name.
#[must_use]
pub fn resolve_top_service<'a>(all: &'a [Service], top: &TopService) -> Option<&'a Service> {
    if let Some(id) = top.service_id()
        && let Some(found) = all.iter().find(|service| service.id.as_str() == id)
    {
        return Some(found);
    }

    let name = top.name().to_lowercase();
    if name.is_empty() {
        return None;
    }

    all.iter()
        .find(|service| service.name.trim().to_lowercase() == name)
        .or_else(|| {
            all.iter()
                .find(|service| service.name.trim().to_lowercase().contains(&name))
        })
}
