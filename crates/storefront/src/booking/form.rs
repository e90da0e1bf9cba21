//! The booking form: raw input, persistence, and validation.

use chrono::{NaiveDate, NaiveDateTime};
use kushi_core::{CustomerName, CustomerNameError, Email, EmailError, Phone, PhoneError, Pincode,
    PincodeError};
use serde::{Deserialize, Serialize};

use crate::account::StoredUser;
use crate::session::BookingSession;
use crate::storage::{KeyValueStore, keys, read_json_or_default, remove_key, write_json};

use super::slots::{available_slots, parse_slot};

/// Raw form state, exactly as typed.
///
/// Persisted under [`keys::BOOKING_FORM`] on every change so an interrupted
/// booking resumes with the form filled in. Validation happens at submit via
/// [`BookingForm::validate`]; until then every field is free text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BookingForm {
    pub service_category: String,
    /// Comma-joined names of the session's services.
    pub specific_service: String,
    /// Appointment date as `YYYY-MM-DD`.
    pub date: String,
    /// Display slot, e.g. `"02:00 PM"`.
    pub time: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub pincode: String,
    pub special_requests: String,
}

impl BookingForm {
    /// Load the saved form, or prefill a fresh one from the session and the
    /// signed-in user's stored contact details.
    #[must_use]
    pub fn load_or_prefill(
        store: &dyn KeyValueStore,
        session: &BookingSession,
        user: Option<&StoredUser>,
    ) -> Self {
        if let Ok(Some(raw)) = store.get(keys::BOOKING_FORM)
            && let Ok(form) = serde_json::from_str(&raw)
        {
            return form;
        }

        let mut form = Self {
            service_category: session
                .items()
                .first()
                .map(|item| item.category.clone())
                .unwrap_or_default(),
            specific_service: session.service_names(),
            ..Self::default()
        };
        if let Some(user) = user {
            form.name.clone_from(&user.full_name);
            form.email.clone_from(&user.email);
            form.phone.clone_from(&user.phone);
            form.address.clone_from(&user.address);
            form.city.clone_from(&user.city);
            form.pincode.clone_from(&user.pincode);
        }
        form
    }

    /// Save the current state for resume.
    pub fn persist(&self, store: &dyn KeyValueStore) {
        write_json(store, keys::BOOKING_FORM, self);
    }

    /// Drop the saved form, e.g. once the booking is committed.
    pub fn clear(store: &dyn KeyValueStore) {
        remove_key(store, keys::BOOKING_FORM);
    }

    /// Refresh the service summary fields after the session's items change.
    pub fn sync_services(&mut self, session: &BookingSession) {
        self.specific_service = session.service_names();
        if session.is_empty() {
            self.service_category.clear();
        } else if self.service_category.is_empty()
            && let Some(first) = session.items().first()
        {
            self.service_category.clone_from(&first.category);
        }
    }

    /// Validate every field, collecting all failures rather than stopping at
    /// the first.
    ///
    /// Scheduling is checked against `now`: the date must be today or later,
    /// and a same-day slot must still be bookable (more than 30 minutes
    /// ahead).
    ///
    /// # Errors
    ///
    /// Returns the per-field error messages if any field is missing or
    /// malformed, or if the session has no items.
    pub fn validate(
        &self,
        has_items: bool,
        now: NaiveDateTime,
    ) -> Result<ValidatedForm, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        if !has_items {
            errors.push("cart", "Please add a service to book.");
        }

        let date = if self.date.trim().is_empty() {
            errors.push("date", "Please select a date");
            None
        } else {
            match NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d") {
                Ok(parsed) if parsed < now.date() => {
                    errors.push("date", "Please select a date from today onwards");
                    None
                }
                Ok(parsed) => Some(parsed),
                Err(_) => {
                    errors.push("date", "Please select a date");
                    None
                }
            }
        };

        let slot = self.time.trim();
        if slot.is_empty() || parse_slot(slot).is_none() {
            errors.push("time", "Please select a time");
        } else if let Some(date) = date
            && date == now.date()
            && !available_slots(date, now).iter().any(|open| *open == slot)
        {
            errors.push("time", "Please select a time at least 30 minutes from now");
        }

        let name = match CustomerName::parse(&self.name) {
            Ok(name) => Some(name),
            Err(CustomerNameError::Empty) => {
                errors.push("name", "Full name is required");
                None
            }
            Err(CustomerNameError::InvalidCharacters) => {
                errors.push("name", "Name must contain only letters and spaces");
                None
            }
        };

        let email = match Email::parse(&self.email) {
            Ok(email) => Some(email),
            Err(EmailError::Empty) => {
                errors.push("email", "Email is required");
                None
            }
            Err(_) => {
                errors.push("email", "Enter a valid email address");
                None
            }
        };

        let phone = match Phone::parse(&self.phone) {
            Ok(phone) => Some(phone),
            Err(PhoneError::Empty) => {
                errors.push("phone", "Phone number is required");
                None
            }
            Err(PhoneError::WrongDigitCount { .. }) => {
                errors.push("phone", "Phone number must be exactly 10 digits");
                None
            }
        };

        if self.address.trim().is_empty() {
            errors.push("address", "Address is required");
        }
        if self.city.trim().is_empty() {
            errors.push("city", "City is required");
        }

        let pincode = match Pincode::parse(&self.pincode) {
            Ok(pincode) => Some(pincode),
            Err(PincodeError::Empty) => {
                errors.push("pincode", "Pincode is required");
                None
            }
            Err(PincodeError::Invalid) => {
                errors.push("pincode", "Pincode must be 6 digits");
                None
            }
        };

        if !errors.is_empty() {
            return Err(errors);
        }

        // All `None` cases pushed an error above, so these are present here.
        match (name, email, phone, pincode, date) {
            (Some(name), Some(email), Some(phone), Some(pincode), Some(date)) => {
                Ok(ValidatedForm {
                    name,
                    email,
                    phone,
                    address: self.address.trim().to_owned(),
                    city: self.city.trim().to_owned(),
                    pincode,
                    date,
                    time: self.time.trim().to_owned(),
                    service_category: self.service_category.clone(),
                    specific_service: self.specific_service.clone(),
                    special_requests: self.special_requests.clone(),
                })
            }
            _ => Err(errors),
        }
    }
}

/// A form that passed validation; contact fields are parsed newtypes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedForm {
    pub name: CustomerName,
    pub email: Email,
    pub phone: Phone,
    pub address: String,
    pub city: String,
    pub pincode: Pincode,
    pub date: NaiveDate,
    pub time: String,
    pub service_category: String,
    pub specific_service: String,
    pub special_requests: String,
}

/// Per-field validation failures, in form order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

/// One field's failure message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

impl ValidationErrors {
    fn push(&mut self, field: &'static str, message: &'static str) {
        self.errors.push(FieldError { field, message });
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    /// The message for a given field, if that field failed.
    #[must_use]
    pub fn message_for(&self, field: &str) -> Option<&'static str> {
        self.errors
            .iter()
            .find(|err| err.field == field)
            .map(|err| err.message)
    }
}

impl core::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} invalid booking field(s):", self.errors.len())?;
        for err in &self.errors {
            write!(f, " {}: {};", err.field, err.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}
