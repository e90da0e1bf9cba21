//! Cart items, the services cart, and the transient booking session.

pub mod cart;
pub mod item;
pub mod merge;

use kushi_core::CartItemId;

use crate::catalog::Service;
use crate::storage::{KeyValueStore, keys, remove_key, write_json};

pub use cart::{CartAdd, ServicesCart};
pub use item::CartItem;
pub use merge::{SessionSeed, merge_session};

/// Result of adding a service to an active booking session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionAdd {
    /// The service was appended to the session.
    Added,
    /// An item with the same service id is already in the session.
    AlreadyPresent,
    /// The service has package tiers and needs tier selection first.
    NeedsPackageChoice,
}

/// The in-progress booking's item set, mirrored to storage on every change.
#[derive(Debug, Clone)]
pub struct BookingSession {
    items: Vec<CartItem>,
}

impl BookingSession {
    /// Open the booking page: merge `seed` into any persisted session.
    #[must_use]
    pub fn initialize(store: &dyn KeyValueStore, seed: SessionSeed) -> Self {
        Self {
            items: merge_session(store, seed),
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

    /// The comma-joined service names shown in the form's service summary.
    #[must_use]
    pub fn service_names(&self) -> String {
        self.items
            .iter()
            .map(|item| item.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Add a suggested service (mini or similar) to the session.
    ///
    /// Tiered services route to tier selection; a service already present is
    /// left alone rather than duplicated or bumped.
    pub fn add_service(&mut self, store: &dyn KeyValueStore, service: &Service) -> SessionAdd {
        if service.has_packages() {
            return SessionAdd::NeedsPackageChoice;
        }
        if self.items.iter().any(|item| item.id == service.id) {
            return SessionAdd::AlreadyPresent;
        }

        self.items.push(CartItem::from_service(service));
        self.persist(store);
        SessionAdd::Added
    }

    /// Remove one line by its cart-item id.
    pub fn remove_item(&mut self, store: &dyn KeyValueStore, id: &CartItemId) {
        self.items.retain(|item| &item.cart_item_id != id);
        self.persist(store);
    }

    /// Drop the persisted session, e.g. after payment commits the booking.
    pub fn clear(store: &dyn KeyValueStore) {
        remove_key(store, keys::BOOKING_SESSION);
    }

    fn persist(&self, store: &dyn KeyValueStore) {
        write_json(store, keys::BOOKING_SESSION, &self.items);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::catalog::mini_services;
    use crate::storage::MemoryStore;

    #[test]
    fn test_add_and_remove_round_trips_storage() {
        let store = MemoryStore::new();
        let mut session = BookingSession::initialize(&store, SessionSeed::Resume);
        let minis = mini_services();

        assert_eq!(session.add_service(&store, &minis[0]), SessionAdd::Added);
        assert_eq!(
            session.add_service(&store, &minis[0]),
            SessionAdd::AlreadyPresent
        );
        assert_eq!(session.items().len(), 1);

        let resumed = BookingSession::initialize(&store, SessionSeed::Resume);
        assert_eq!(resumed.items().len(), 1);

        let id = session.items()[0].cart_item_id.clone();
        session.remove_item(&store, &id);
        assert!(session.is_empty());
    }

    #[test]
    fn test_service_names_joined() {
        let store = MemoryStore::new();
        let mut session = BookingSession::initialize(&store, SessionSeed::Resume);
        let minis = mini_services();
        session.add_service(&store, &minis[0]);
        session.add_service(&store, &minis[1]);

        assert_eq!(
            session.service_names(),
            "Kitchen Chimney Cleaning, Micro Oven Cleaning"
        );
    }

    #[test]
    fn test_clear_removes_key() {
        let store = MemoryStore::new();
        let mut session = BookingSession::initialize(&store, SessionSeed::Resume);
        let minis = mini_services();
        session.add_service(&store, &minis[0]);

        BookingSession::clear(&store);
        assert_eq!(store.get(keys::BOOKING_SESSION).unwrap(), None);
    }
}
