//! Cart line items.

use kushi_core::{CartItemId, Rupees, ServiceId};
use serde::{Deserialize, Serialize};

use crate::catalog::Service;

const fn default_quantity() -> u32 {
    1
}

/// One line in the services cart or booking session.
///
/// The serialized shape is the persisted contract: camelCase keys, prices as
/// bare numbers. Carts written by older visitors may lack `cartItemId` (a
/// fresh one is generated on read) and any of the optional display fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// Unique per cart line, independent of the service id.
    #[serde(default = "CartItemId::generate")]
    pub cart_item_id: CartItemId,
    /// The catalog service this line snapshots.
    pub id: ServiceId,
    pub name: String,
    #[serde(default)]
    pub price: Rupees,
    #[serde(default)]
    pub discounted_price: Rupees,
    #[serde(default)]
    pub original_price: Rupees,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    /// Chosen package tier name, or "Standard".
    #[serde(default)]
    pub tier: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub reviews: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub subcategory: String,
}

impl CartItem {
    /// Snapshot a catalog service as a quantity-one cart line.
    #[must_use]
    pub fn from_service(service: &Service) -> Self {
        Self {
            cart_item_id: CartItemId::generate(),
            id: service.id.clone(),
            name: service.name.clone(),
            price: service.price,
            discounted_price: service.price,
            original_price: if service.original_price.is_zero() {
                service.price
            } else {
                service.original_price
            },
            quantity: 1,
            tier: if service.package.trim().is_empty() {
                "Standard".to_owned()
            } else {
                service.package.clone()
            },
            duration: service.duration.clone(),
            rating: service.rating,
            reviews: service.reviews.clone(),
            description: service.description.clone(),
            category: service.category.clone(),
            subcategory: service.subcategory.clone(),
        }
    }

    /// The price that counts toward totals: `price`, falling back to the
    /// discounted price when `price` is missing from an old stored blob.
    #[must_use]
    pub fn effective_price(&self) -> Rupees {
        if self.price.is_zero() {
            self.discounted_price
        } else {
            self.price
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::catalog::mini_services;

    #[test]
    fn test_from_service_snapshots_fields() {
        let minis = mini_services();
        let chimney = minis.first().unwrap();
        let item = CartItem::from_service(chimney);

        assert_eq!(item.id, chimney.id);
        assert_eq!(item.price, chimney.price);
        assert_eq!(item.original_price, chimney.price);
        assert_eq!(item.quantity, 1);
        assert_eq!(item.tier, "Standard");
    }

    #[test]
    fn test_deserialize_backfills_missing_fields() {
        let item: CartItem = serde_json::from_str(
            r#"{"id": "42", "name": "Sofa Cleaning", "price": 1299}"#,
        )
        .unwrap();

        assert!(!item.cart_item_id.as_str().is_empty());
        assert_eq!(item.quantity, 1);
        assert_eq!(item.effective_price(), Rupees::from_rupees(1299));
    }

    #[test]
    fn test_effective_price_falls_back_to_discounted() {
        let item: CartItem = serde_json::from_str(
            r#"{"id": "42", "name": "Sofa Cleaning", "discountedPrice": 999}"#,
        )
        .unwrap();
        assert_eq!(item.effective_price(), Rupees::from_rupees(999));
    }

    #[test]
    fn test_serializes_camel_case() {
        let minis = mini_services();
        let item = CartItem::from_service(minis.first().unwrap());
        let json = serde_json::to_value(&item).unwrap();

        assert!(json.get("cartItemId").is_some());
        assert!(json.get("discountedPrice").is_some());
        assert!(json.get("originalPrice").is_some());
        assert!(json.get("cart_item_id").is_none());
    }
}
