//! Booking-session initialization.
//!
//! Opening the booking page merges up to three sources of items into the
//! transient session under [`keys::BOOKING_SESSION`]: whatever session
//! already exists, a cart handoff from the cart page, and a single "Book Now"
//! service from a details page. Precedence is fixed; see [`merge_session`].

use crate::catalog::Service;
use crate::storage::{KeyValueStore, keys, read_json_or_default, write_json};

use super::item::CartItem;

/// What the visitor arrived at the booking page with.
#[derive(Debug, Clone)]
pub enum SessionSeed {
    /// Plain navigation; resume whatever session exists.
    Resume,
    /// The cart page handed over its items.
    CartHandoff(Vec<CartItem>),
    /// A "Book Now" click on a single service.
    BookNow(Service),
}

/// Initialize the booking session from `seed` and persist the result.
///
/// Rules, in order:
/// 1. An existing non-empty session wins over a cart handoff; the handoff is
///    ignored so a visitor returning mid-booking keeps their in-progress set.
/// 2. A cart handoff into an empty session seeds it, with every quantity
///    forced to one (the booking flow books each service once).
/// 3. A "Book Now" service is appended unless an item with the same service
///    id is already present. The check is by service id only, so a different
///    package tier of an already-added service is dropped rather than added
///    as a second line.
///
/// The merged list is written back before returning, making a reload of the
/// booking page a [`SessionSeed::Resume`].
pub fn merge_session(store: &dyn KeyValueStore, seed: SessionSeed) -> Vec<CartItem> {
    let mut items: Vec<CartItem> = read_json_or_default(store, keys::BOOKING_SESSION);

    match seed {
        SessionSeed::Resume => {}
        SessionSeed::CartHandoff(handoff) => {
            if items.is_empty() && !handoff.is_empty() {
                items = handoff
                    .into_iter()
                    .map(|mut item| {
                        item.quantity = 1;
                        item
                    })
                    .collect();
            }
        }
        SessionSeed::BookNow(service) => {
            let already_present = items.iter().any(|item| item.id == service.id);
            if already_present {
                tracing::debug!(service_id = %service.id, "book-now service already in session");
            } else {
                items.push(CartItem::from_service(&service));
            }
        }
    }

    write_json(store, keys::BOOKING_SESSION, &items);
    items
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::catalog::mini_services;
    use crate::storage::MemoryStore;

    fn two_minis() -> Vec<CartItem> {
        mini_services()
            .iter()
            .take(2)
            .map(CartItem::from_service)
            .collect()
    }

    #[test]
    fn test_resume_empty_session() {
        let store = MemoryStore::new();
        let items = merge_session(&store, SessionSeed::Resume);
        assert!(items.is_empty());
        // An empty session is still persisted.
        assert_eq!(
            store.get(keys::BOOKING_SESSION).unwrap().as_deref(),
            Some("[]")
        );
    }

    #[test]
    fn test_handoff_seeds_empty_session_with_quantity_one() {
        let store = MemoryStore::new();
        let mut handoff = two_minis();
        if let Some(first) = handoff.first_mut() {
            first.quantity = 3;
        }

        let items = merge_session(&store, SessionSeed::CartHandoff(handoff));
        assert_eq!(items.len(), 2);
        assert!(items.iter().all(|i| i.quantity == 1));
    }

    #[test]
    fn test_existing_session_wins_over_handoff() {
        let store = MemoryStore::new();
        let existing = two_minis();
        write_json(&store, keys::BOOKING_SESSION, &existing);

        let minis = mini_services();
        let other = vec![CartItem::from_service(&minis[4])];
        let items = merge_session(&store, SessionSeed::CartHandoff(other));

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id, existing[0].id);
    }

    #[test]
    fn test_book_now_appends_new_service() {
        let store = MemoryStore::new();
        write_json(&store, keys::BOOKING_SESSION, &two_minis());

        let minis = mini_services();
        let items = merge_session(&store, SessionSeed::BookNow(minis[5].clone()));
        assert_eq!(items.len(), 3);
        assert_eq!(items[2].id, minis[5].id);
    }

    #[test]
    fn test_book_now_duplicate_service_id_is_dropped() {
        let store = MemoryStore::new();
        write_json(&store, keys::BOOKING_SESSION, &two_minis());

        let minis = mini_services();
        let items = merge_session(&store, SessionSeed::BookNow(minis[0].clone()));
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn test_malformed_session_treated_as_empty() {
        let store = MemoryStore::new();
        store.set(keys::BOOKING_SESSION, "{oops").unwrap();

        let items = merge_session(&store, SessionSeed::CartHandoff(two_minis()));
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn test_merge_persists_for_reload() {
        let store = MemoryStore::new();
        merge_session(&store, SessionSeed::CartHandoff(two_minis()));

        let reloaded = merge_session(&store, SessionSeed::Resume);
        assert_eq!(reloaded.len(), 2);
    }
}
