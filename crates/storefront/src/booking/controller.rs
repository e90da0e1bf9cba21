//! The submit step: validation, the minimum-order gate, payment handoff.

use chrono::NaiveDateTime;
use kushi_core::{CartItemId, Rupees};
use thiserror::Error;

use crate::account::StoredUser;
use crate::catalog::Service;
use crate::pricing::{MINIMUM_ORDER_MESSAGE, Totals};
use crate::session::{BookingSession, CartItem, SessionAdd, SessionSeed};
use crate::storage::KeyValueStore;

use super::form::{BookingForm, ValidationErrors};
use super::payload::BookingPayload;

/// Why a submit was rejected. Each variant maps to what the visitor sees.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// One or more form fields failed validation.
    #[error(transparent)]
    Validation(ValidationErrors),

    /// The grand total did not exceed the minimum order amount.
    #[error("{MINIMUM_ORDER_MESSAGE}")]
    BelowMinimum { total: Rupees },

    /// The session has no items.
    #[error("Please add at least one service to your booking.")]
    EmptyCart,
}

/// Everything the payment step needs, produced by a successful submit.
#[derive(Debug, Clone)]
pub struct BookingDraft {
    pub payload: BookingPayload,
    pub items: Vec<CartItem>,
    pub totals: Totals,
    pub applied_promo: String,
}

/// Validate and assemble a booking, or reject it.
///
/// Checks run in a fixed order: field validation first, then the
/// minimum-order gate, then the non-empty-session check. Scheduling rules
/// (no past dates, the same-day 30-minute lead) are checked against `now`.
/// The form is persisted before validation so a rejected submit still
/// resumes fully filled in. No network I/O happens here; the draft is
/// committed by the payment step.
///
/// # Errors
///
/// Returns the first failing check as a [`SubmitError`].
pub fn submit_booking(
    store: &dyn KeyValueStore,
    session: &BookingSession,
    form: &BookingForm,
    promo_discount: Rupees,
    applied_promo: &str,
    user: Option<&StoredUser>,
    now: NaiveDateTime,
) -> Result<BookingDraft, SubmitError> {
    form.persist(store);

    let validated = form
        .validate(!session.is_empty(), now)
        .map_err(SubmitError::Validation)?;

    let totals = Totals::compute(session.items(), promo_discount);
    if !totals.meets_minimum() {
        tracing::info!(total = %totals.total, "booking below minimum order");
        return Err(SubmitError::BelowMinimum {
            total: totals.total,
        });
    }

    if session.is_empty() {
        return Err(SubmitError::EmptyCart);
    }

    let customer_id = user.and_then(StoredUser::customer_id);
    let payload = BookingPayload::assemble(&validated, session.items(), &totals, customer_id);

    tracing::info!(
        services = %payload.booking_service_name,
        total = %totals.total,
        "booking draft ready for payment"
    );

    Ok(BookingDraft {
        payload,
        items: session.items().to_vec(),
        totals,
        applied_promo: applied_promo.to_owned(),
    })
}

/// Stateful driver for the booking page.
///
/// Owns the merged session, the (possibly resumed) form, and any applied
/// promo, and keeps the form's service summary in sync as items come and go.
/// Totals are recomputed on demand rather than stored. A UI shell calls
/// [`BookingController::submit`] and hands the resulting draft to the payment
/// step.
#[derive(Debug)]
pub struct BookingController {
    session: BookingSession,
    form: BookingForm,
    promo_discount: Rupees,
    applied_promo: String,
}

impl BookingController {
    /// Open the booking page: merge the session from `seed` and load or
    /// prefill the form.
    #[must_use]
    pub fn open(store: &dyn KeyValueStore, seed: SessionSeed, user: Option<&StoredUser>) -> Self {
        let session = BookingSession::initialize(store, seed);
        let mut form = BookingForm::load_or_prefill(store, &session, user);
        form.sync_services(&session);
        Self {
            session,
            form,
            promo_discount: Rupees::zero(),
            applied_promo: String::new(),
        }
    }

    #[must_use]
    pub fn session(&self) -> &BookingSession {
        &self.session
    }

    #[must_use]
    pub fn form(&self) -> &BookingForm {
        &self.form
    }

    /// Edit the form, persisting the result for resume.
    pub fn update_form(
        &mut self,
        store: &dyn KeyValueStore,
        edit: impl FnOnce(&mut BookingForm),
    ) {
        edit(&mut self.form);
        self.form.persist(store);
    }

    /// Apply a promo code's discount.
    pub fn apply_promo(&mut self, code: &str, discount: Rupees) {
        self.applied_promo = code.to_owned();
        self.promo_discount = discount;
    }

    /// Current totals for the summary panel.
    #[must_use]
    pub fn totals(&self) -> Totals {
        Totals::compute(self.session.items(), self.promo_discount)
    }

    /// Add a service to the session, keeping the form's service summary in
    /// sync.
    pub fn add_service(&mut self, store: &dyn KeyValueStore, service: &Service) -> SessionAdd {
        let outcome = self.session.add_service(store, service);
        if outcome == SessionAdd::Added {
            self.form.sync_services(&self.session);
            self.form.persist(store);
        }
        outcome
    }

    /// Remove an item from the session, keeping the form's service summary
    /// in sync.
    pub fn remove_item(&mut self, store: &dyn KeyValueStore, id: &CartItemId) {
        self.session.remove_item(store, id);
        self.form.sync_services(&self.session);
        self.form.persist(store);
    }

    /// Validate and assemble the booking draft.
    ///
    /// # Errors
    ///
    /// Returns the first failing check as a [`SubmitError`].
    pub fn submit(
        &self,
        store: &dyn KeyValueStore,
        user: Option<&StoredUser>,
        now: NaiveDateTime,
    ) -> Result<BookingDraft, SubmitError> {
        submit_booking(
            store,
            &self.session,
            &self.form,
            self.promo_discount,
            &self.applied_promo,
            user,
            now,
        )
    }
}
