//! Signed-in user state: the stored snapshot, the bearer token, and the
//! sign-in/sign-up flows.

use kushi_core::{CustomerId, PaymentMethod, Rupees};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::api::{ApiClient, ApiError, ProfileRecord, SignUpRequest};
use crate::storage::{KeyValueStore, keys, remove_key, write_json};

/// Errors from the auth flows.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Backend call failed or rejected the credentials.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The auth response carried no user id under any known key.
    #[error("Invalid login response: missing user id")]
    MissingUserId,
}

/// The persisted account snapshot under [`keys::USER`].
///
/// This is a cache of profile data, not a credential: the bearer token lives
/// separately under [`keys::TOKEN`]. `totalBookings` / `totalSpent` are
/// bumped locally after each committed booking.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StoredUser {
    pub id: String,
    pub full_name: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub pincode: String,
    pub join_date: String,
    pub total_bookings: u32,
    pub total_spent: f64,
}

impl StoredUser {
    /// The numeric customer id for booking payloads, if one is stored.
    /// The snapshot keeps the id as text; a blank or non-numeric value
    /// yields `None` and the booking goes out as a guest.
    #[must_use]
    pub fn customer_id(&self) -> Option<CustomerId> {
        self.id.trim().parse().ok().map(CustomerId::new)
    }
}

/// Split a full name into first name and the rest.
fn derive_names(full_name: &str) -> (String, String) {
    let mut parts = full_name.trim().split_whitespace();
    let first = parts.next().unwrap_or_default().to_owned();
    let last = parts.collect::<Vec<_>>().join(" ");
    (first, last)
}

/// Build the stored snapshot from a profile record.
fn normalize_user(user_id: String, profile: &ProfileRecord) -> StoredUser {
    let full_name = profile.display_name();
    let (first_name, last_name) = derive_names(&full_name);
    StoredUser {
        id: user_id,
        full_name,
        first_name,
        last_name,
        email: profile.email.clone().unwrap_or_default(),
        phone: profile.phone.clone().unwrap_or_default(),
        address: profile.address.clone().unwrap_or_default(),
        city: profile.city.clone().unwrap_or_default(),
        pincode: profile.pincode.clone().unwrap_or_default(),
        join_date: profile.join_date.clone().unwrap_or_default(),
        total_bookings: profile.total_bookings.unwrap_or(0),
        total_spent: profile.total_spent.unwrap_or(0.0),
    }
}

/// Load the stored user, if any. A snapshot that no longer parses is
/// removed rather than kept around to fail again.
#[must_use]
pub fn load_user(store: &dyn KeyValueStore) -> Option<StoredUser> {
    match store.get(keys::USER) {
        Ok(Some(raw)) => match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(err) => {
                tracing::warn!(error = %err, "stored user snapshot is malformed, discarding");
                remove_key(store, keys::USER);
                None
            }
        },
        Ok(None) => None,
        Err(err) => {
            tracing::warn!(error = %err, "could not read stored user");
            None
        }
    }
}

/// The stored bearer token, if one was issued at sign-in.
#[must_use]
pub fn load_token(store: &dyn KeyValueStore) -> Option<SecretString> {
    match store.get(keys::TOKEN) {
        Ok(Some(raw)) if !raw.is_empty() => Some(SecretString::from(raw)),
        Ok(_) => None,
        Err(err) => {
            tracing::warn!(error = %err, "could not read stored token");
            None
        }
    }
}

/// Sign in, persist the token and user snapshot, and return the snapshot.
///
/// The profile endpoint is tried for the freshest data; if it fails, the
/// sign-in response's inline profile is used instead.
///
/// # Errors
///
/// Returns error if the sign-in call fails or no user id can be resolved.
pub async fn sign_in(
    api: &ApiClient,
    store: &dyn KeyValueStore,
    email: &str,
    password: &str,
) -> Result<StoredUser, AuthError> {
    let auth = api.sign_in(email, password).await?;
    let user_id = auth.resolved_user_id().ok_or(AuthError::MissingUserId)?;

    let token = auth.token.clone().map(SecretString::from);
    if let Some(token) = &token
        && let Err(err) = store.set(keys::TOKEN, token.expose_secret())
    {
        tracing::warn!(error = %err, "could not persist auth token");
    }

    let profile = match api.profile(&user_id, token.as_ref()).await {
        Ok(profile) => profile,
        Err(err) => {
            tracing::warn!(error = %err, "profile fetch failed, using sign-in payload");
            auth.profile
        }
    };

    let mut user = normalize_user(user_id, &profile);
    if user.email.is_empty() {
        user.email = email.to_owned();
    }
    write_json(store, keys::USER, &user);
    tracing::info!(user_id = %user.id, "signed in");
    Ok(user)
}

/// Register a new account and persist it like a sign-in.
///
/// # Errors
///
/// Returns error if the signup call fails or no user id can be resolved.
pub async fn sign_up(
    api: &ApiClient,
    store: &dyn KeyValueStore,
    request: &SignUpRequest,
) -> Result<StoredUser, AuthError> {
    let auth = api.sign_up(request).await?;
    let user_id = auth.resolved_user_id().ok_or(AuthError::MissingUserId)?;

    if let Some(token) = &auth.token
        && let Err(err) = store.set(keys::TOKEN, token)
    {
        tracing::warn!(error = %err, "could not persist auth token");
    }

    let mut user = normalize_user(user_id, &auth.profile);
    if user.full_name.is_empty() {
        user.full_name.clone_from(&request.full_name);
        let (first, last) = derive_names(&request.full_name);
        user.first_name = first;
        user.last_name = last;
    }
    if user.email.is_empty() {
        user.email.clone_from(&request.email);
    }
    if user.phone.is_empty() {
        user.phone.clone_from(&request.phone);
    }
    write_json(store, keys::USER, &user);
    Ok(user)
}

/// Drop the stored user and token.
pub fn sign_out(store: &dyn KeyValueStore) {
    remove_key(store, keys::USER);
    remove_key(store, keys::TOKEN);
}

/// Bump the stored user's booking stats after a committed booking.
///
/// Pay-on-service bookings count toward `totalBookings` but not
/// `totalSpent`, since no money has changed hands yet.
pub fn record_booking(store: &dyn KeyValueStore, total: Rupees, method: PaymentMethod) {
    let Some(mut user) = load_user(store) else {
        return;
    };
    user.total_bookings += 1;
    if method != PaymentMethod::Cash {
        user.total_spent += total.to_f64();
    }
    write_json(store, keys::USER, &user);
}
