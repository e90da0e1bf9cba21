//! The payment step: method selection and the final booking commit.

use kushi_core::{PaymentMethod, PaymentStatus, Rupees};
use thiserror::Error;

use crate::account;
use crate::api::{ApiClient, ApiError};
use crate::booking::BookingDraft;
use crate::session::BookingSession;
use crate::storage::{KeyValueStore, keys, remove_key};

/// Errors from confirming a payment.
#[derive(Debug, Error)]
pub enum PaymentError {
    /// The chosen method is listed but not open for selection.
    #[error("payment method '{0}' is not available yet")]
    MethodUnavailable(PaymentMethod),

    /// The booking commit failed after payment was accepted.
    #[error("Payment succeeded but booking failed. Contact support.")]
    BookingCommit(#[source] ApiError),
}

/// What the confirmation screen shows after a committed booking.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentReceipt {
    /// Name of the first booked service.
    pub service_name: String,
    pub total: Rupees,
    /// `Pending` for pay-on-service, `Paid` for settled online payments.
    pub settlement: PaymentStatus,
}

/// Commit the drafted booking with the chosen payment method.
///
/// Stamps the method and its settlement status into the payload, posts it,
/// then finalizes local state: the signed-in user's booking stats are bumped
/// and both the services cart and the booking session are cleared. Storage is
/// only touched after the backend accepts the booking, so a failed commit
/// leaves everything resumable.
///
/// # Errors
///
/// Returns error if the method is unavailable or the backend rejects the
/// booking.
pub async fn confirm_payment(
    api: &ApiClient,
    store: &dyn KeyValueStore,
    draft: &BookingDraft,
    method: PaymentMethod,
) -> Result<PaymentReceipt, PaymentError> {
    if !method.is_available() {
        return Err(PaymentError::MethodUnavailable(method));
    }

    let mut payload = draft.payload.clone();
    payload.payment_method = method.wire_id().to_owned();
    payload.payment_status = method.settlement_status();

    api.create_booking(&payload)
        .await
        .map_err(PaymentError::BookingCommit)?;

    account::record_booking(store, draft.totals.total, method);
    remove_key(store, keys::SERVICES_CART);
    BookingSession::clear(store);

    let service_name = draft
        .items
        .first()
        .map_or_else(|| "Service".to_owned(), |item| item.name.clone());

    tracing::info!(
        service = %service_name,
        total = %draft.totals.total,
        method = %method,
        "booking committed"
    );

    Ok(PaymentReceipt {
        service_name,
        total: draft.totals.total,
        settlement: method.settlement_status(),
    })
}
