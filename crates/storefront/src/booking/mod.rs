//! The booking step: schedule slots, the form, and submit.

pub mod controller;
pub mod form;
pub mod payload;
pub mod slots;

pub use controller::{BookingController, BookingDraft, SubmitError, submit_booking};
pub use form::{BookingForm, FieldError, ValidatedForm, ValidationErrors};
pub use payload::BookingPayload;
pub use slots::{TIME_SLOTS, available_slots, to_iso_date_time};
