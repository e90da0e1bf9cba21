//! Newtype IDs for type-safe entity references.
//!
//! Use the `define_string_id!` macro to create type-safe ID wrappers that
//! prevent accidentally mixing IDs from different entity types. Catalog
//! service ids and locally generated cart item ids travel as JSON strings, so
//! those wrappers are string-backed; backend-assigned booking and customer
//! ids are numeric.

use serde::{Deserialize, Serialize};

/// Macro to define a type-safe string ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`
/// - Conversion methods: `new()`, `as_str()`, `into_inner()`
/// - `From<String>`, `From<&str>`, and `AsRef<str>` implementations
///
/// # Example
///
/// ```rust
/// # use kushi_core::define_string_id;
/// define_string_id!(FooId);
/// define_string_id!(BarId);
///
/// let foo = FooId::new("42");
/// let bar = BarId::new("42");
///
/// // These are different types, so this won't compile:
/// // let _: FooId = bar;
/// ```
#[macro_export]
macro_rules! define_string_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from a string value.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the underlying string value.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the ID and return its inner string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_string_id!(ServiceId);
define_string_id!(CartItemId);

/// Prefix used by the built-in mini service catalog entries.
const MINI_ID_PREFIX: &str = "mini-";

impl ServiceId {
    /// Whether this id refers to one of the built-in mini services
    /// (`mini-1`..`mini-6`) rather than a backend catalog record.
    #[must_use]
    pub fn is_mini(&self) -> bool {
        self.0.starts_with(MINI_ID_PREFIX)
    }

    /// Parse the numeric backend id, if this id refers to a backend record.
    ///
    /// Mini services and other non-numeric ids yield `None`, which maps to a
    /// JSON `null` in the booking payload.
    #[must_use]
    pub fn as_backend_id(&self) -> Option<i64> {
        self.0.parse().ok()
    }
}

impl CartItemId {
    /// Generate a fresh, opaque, unique cart item id.
    ///
    /// Called at add-time; two adds of the same catalog service always get
    /// distinct cart item ids.
    #[must_use]
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}

/// Backend-assigned booking identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookingId(i64);

impl BookingId {
    /// Create a new booking ID.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the underlying i64 value.
    #[must_use]
    pub const fn as_i64(&self) -> i64 {
        self.0
    }
}

impl core::fmt::Display for BookingId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for BookingId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<BookingId> for i64 {
    fn from(id: BookingId) -> Self {
        id.0
    }
}

/// Backend-assigned customer identifier, sent as a JSON number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomerId(i64);

impl CustomerId {
    /// Create a new customer ID.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the underlying i64 value.
    #[must_use]
    pub const fn as_i64(&self) -> i64 {
        self.0
    }
}

impl core::fmt::Display for CustomerId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for CustomerId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<CustomerId> for i64 {
    fn from(id: CustomerId) -> Self {
        id.0
    }
}
