//! The permanent services cart.
//!
//! Distinct from the booking session: the cart survives a completed visit
//! (under [`keys::SERVICES_CART`]) until payment succeeds, while the session
//! is scoped to one booking attempt.

use kushi_core::CartItemId;

use crate::catalog::Service;
use crate::storage::{KeyValueStore, keys, read_json_or_default, write_json};

use super::item::CartItem;

/// Result of adding a service to the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartAdd {
    /// A new line was appended.
    Added,
    /// The service was already present; its quantity was bumped.
    QuantityBumped,
    /// The service has package tiers; the caller must route the visitor to
    /// tier selection instead of adding directly.
    NeedsPackageChoice,
}

/// In-memory view of the persisted services cart.
#[derive(Debug, Clone, Default)]
pub struct ServicesCart {
    items: Vec<CartItem>,
}

impl ServicesCart {
    /// Load the cart from storage. Missing or malformed data yields an empty
    /// cart; items missing a `cartItemId` get one generated.
    #[must_use]
    pub fn load(store: &dyn KeyValueStore) -> Self {
        Self {
            items: read_json_or_default(store, keys::SERVICES_CART),
        }
    }

    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total service count across lines, quantities included.
    #[must_use]
    pub fn service_count(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    /// Add a catalog service.
    ///
    /// Tiered services (any package data, minis excepted) are not added here;
    /// the visitor picks a tier on the details page first. Adding a service
    /// already in the cart bumps that line's quantity instead of duplicating
    /// it.
    pub fn add_service(&mut self, store: &dyn KeyValueStore, service: &Service) -> CartAdd {
        if service.has_packages() && !service.is_mini() {
            return CartAdd::NeedsPackageChoice;
        }

        let outcome = if let Some(existing) =
            self.items.iter_mut().find(|item| item.id == service.id)
        {
            existing.quantity += 1;
            CartAdd::QuantityBumped
        } else {
            self.items.push(CartItem::from_service(service));
            CartAdd::Added
        };

        self.persist(store);
        outcome
    }

    /// Add an already-built line, e.g. a tier-specialized snapshot from the
    /// details page.
    pub fn add_item(&mut self, store: &dyn KeyValueStore, item: CartItem) {
        self.items.push(item);
        self.persist(store);
    }

    /// Remove the line with the given cart-item id, if present.
    pub fn remove_item(&mut self, store: &dyn KeyValueStore, id: &CartItemId) {
        self.items.retain(|item| &item.cart_item_id != id);
        self.persist(store);
    }

    /// Replace a line in place, keeping its position, e.g. after re-choosing
    /// a package tier on the details page.
    pub fn replace_item(&mut self, store: &dyn KeyValueStore, id: &CartItemId, item: CartItem) {
        if let Some(existing) = self.items.iter_mut().find(|i| &i.cart_item_id == id) {
            *existing = item;
            self.persist(store);
        }
    }

    /// The items to hand to the booking page, leaving the cart itself
    /// untouched. The cart is only cleared once payment succeeds.
    #[must_use]
    pub fn handoff(&self) -> Vec<CartItem> {
        self.items.clone()
    }

    fn persist(&self, store: &dyn KeyValueStore) {
        write_json(store, keys::SERVICES_CART, &self.items);
    }
}
