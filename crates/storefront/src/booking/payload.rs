//! The booking record sent to the backend.

use kushi_core::{BookingStatus, CustomerId, PaymentStatus, Rupees};
use serde::{Deserialize, Serialize};

use crate::pricing::Totals;
use crate::session::CartItem;

use super::form::ValidatedForm;
use super::slots::to_iso_date_time;

/// The backend's booking record, shaped exactly as `POST /api/bookings`
/// expects it.
///
/// Most keys are camelCase; `service_id` is the backend's own spelling.
/// Workflow fields (`confirmationDate`, `workerAssign`, audit columns) are
/// sent empty and filled in server-side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingPayload {
    pub customer_id: Option<CustomerId>,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_number: String,
    pub address_line1: String,
    pub address_line2: String,
    pub address_line3: String,
    pub city: String,
    pub zip_code: String,
    /// Pre-tax subtotal.
    pub booking_amount: Rupees,
    /// Grand total after GST and promo discount.
    pub total_amount: Rupees,
    /// `yyyy-MM-ddTHH:mm:ss` combining the chosen date and slot.
    pub booking_date: String,
    pub booking_service_name: String,
    pub booking_status: BookingStatus,
    /// The display slot, e.g. `"02:00 PM"`.
    pub booking_time: String,
    pub confirmation_date: String,
    pub created_by: String,
    pub created_date: String,
    /// Empty until the payment step selects a method.
    pub payment_method: String,
    pub payment_status: PaymentStatus,
    pub reference_details: String,
    pub reference_name: String,
    pub remarks: String,
    pub updated_by: String,
    pub updated_date: String,
    pub worker_assign: String,
    pub visit_list: String,
    /// Numeric id of the first booked service; `null` for mini services.
    #[serde(rename = "service_id")]
    pub service_id: Option<i64>,
    /// Always null; the backend resolves the account itself.
    pub user: Option<serde_json::Value>,
}

impl BookingPayload {
    /// Assemble the record from a validated form, the session's items, and
    /// the computed totals.
    #[must_use]
    pub fn assemble(
        form: &ValidatedForm,
        items: &[CartItem],
        totals: &Totals,
        customer_id: Option<CustomerId>,
    ) -> Self {
        let service_names = if form.specific_service.is_empty() {
            items
                .iter()
                .map(|item| item.name.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        } else {
            form.specific_service.clone()
        };

        Self {
            customer_id,
            customer_name: form.name.to_string(),
            customer_email: form.email.to_string(),
            customer_number: form.phone.to_string(),
            address_line1: form.address.clone(),
            address_line2: String::new(),
            address_line3: String::new(),
            city: form.city.clone(),
            zip_code: form.pincode.to_string(),
            booking_amount: totals.subtotal,
            total_amount: totals.total,
            booking_date: to_iso_date_time(form.date, &form.time).unwrap_or_default(),
            booking_service_name: service_names,
            booking_status: BookingStatus::Pending,
            booking_time: form.time.clone(),
            confirmation_date: String::new(),
            created_by: "Customer".to_owned(),
            created_date: String::new(),
            payment_method: String::new(),
            payment_status: PaymentStatus::Unpaid,
            reference_details: String::new(),
            reference_name: String::new(),
            remarks: form.special_requests.clone(),
            updated_by: String::new(),
            updated_date: String::new(),
            worker_assign: String::new(),
            visit_list: String::new(),
            service_id: items.first().and_then(|item| item.id.as_backend_id()),
            user: None,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::catalog::mini_services;
    use chrono::NaiveDate;
    use kushi_core::{CustomerName, Email, Phone, Pincode};

    fn valid_form() -> ValidatedForm {
        ValidatedForm {
            name: CustomerName::parse("Asha Rao").unwrap(),
            email: Email::parse("asha@example.com").unwrap(),
            phone: Phone::parse("9876543210").unwrap(),
            address: "12 MG Road".to_owned(),
            city: "Bengaluru".to_owned(),
            pincode: Pincode::parse("560001").unwrap(),
            date: NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(),
            time: "02:00 PM".to_owned(),
            service_category: "Cleaning".to_owned(),
            specific_service: String::new(),
            special_requests: "Bring ladder".to_owned(),
        }
    }

    #[test]
    fn test_assemble_wire_shape() {
        let minis = mini_services();
        let items = vec![crate::session::CartItem::from_service(&minis[0])];
        let totals = Totals::compute(&items, Rupees::zero());

        let payload = BookingPayload::assemble(&valid_form(), &items, &totals, None);
        let json = serde_json::to_value(&payload).unwrap();

        assert_eq!(json["customerName"], "Asha Rao");
        assert_eq!(json["zipCode"], "560001");
        assert_eq!(json["bookingDate"], "2025-04-01T14:00:00");
        assert_eq!(json["bookingStatus"], "Pending");
        assert_eq!(json["paymentStatus"], "Unpaid");
        assert_eq!(json["createdBy"], "Customer");
        // Mini services have no numeric backend id.
        assert_eq!(json["service_id"], serde_json::Value::Null);
        assert_eq!(json["user"], serde_json::Value::Null);
        assert_eq!(json["bookingServiceName"], "Kitchen Chimney Cleaning");
    }

    #[test]
    fn test_signed_in_customer_id_is_numeric() {
        let minis = mini_services();
        let items = vec![crate::session::CartItem::from_service(&minis[0])];
        let totals = Totals::compute(&items, Rupees::zero());

        let payload =
            BookingPayload::assemble(&valid_form(), &items, &totals, Some(CustomerId::new(31)));
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["customerId"], serde_json::json!(31));
    }

    #[test]
    fn test_numeric_service_id_forwarded() {
        let minis = mini_services();
        let mut items = vec![crate::session::CartItem::from_service(&minis[0])];
        items[0].id = kushi_core::ServiceId::new("42");

        let totals = Totals::compute(&items, Rupees::zero());
        let payload = BookingPayload::assemble(&valid_form(), &items, &totals, None);
        assert_eq!(payload.service_id, Some(42));
    }

    #[test]
    fn test_form_summary_wins_over_item_names() {
        let minis = mini_services();
        let items = vec![crate::session::CartItem::from_service(&minis[0])];
        let totals = Totals::compute(&items, Rupees::zero());

        let mut form = valid_form();
        form.specific_service = "Custom Summary".to_owned();
        let payload = BookingPayload::assemble(&form, &items, &totals, None);
        assert_eq!(payload.booking_service_name, "Custom Summary");
    }
}
