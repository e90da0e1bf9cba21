//! Contact-field newtypes with parse-time validation.
//!
//! The booking form accepts free text and converts it into these types at
//! validation time, so everything past the form boundary is known-good.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing an [`Email`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EmailError {
    /// The input string is empty.
    #[error("email cannot be empty")]
    Empty,
    /// The input does not contain an @ symbol.
    #[error("email must contain an @ symbol")]
    MissingAtSymbol,
    /// The local part (before @) is empty or has forbidden characters.
    #[error("email local part is invalid")]
    InvalidLocalPart,
    /// The domain part (after @) is malformed.
    #[error("email domain is invalid")]
    InvalidDomain,
}

/// An email address.
///
/// Enforces the booking form's `local@domain.tld` structure:
///
/// - Local part: non-empty, characters from `[A-Za-z0-9._-]`
/// - Domain: a leading label of `[A-Za-z0-9-]`, then at least one dot-separated
///   alphabetic segment of length >= 2
///
/// ## Examples
///
/// ```
/// use kushi_core::Email;
///
/// assert!(Email::parse("user@example.com").is_ok());
/// assert!(Email::parse("user.name-x@sub-domain.co.in").is_ok());
///
/// assert!(Email::parse("").is_err());          // empty
/// assert!(Email::parse("no-at-symbol").is_err());
/// assert!(Email::parse("user@domain").is_err()); // no TLD
/// assert!(Email::parse("user@domain.c").is_err()); // TLD too short
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// Parse an `Email` from a string. Leading and trailing whitespace is
    /// trimmed before validation.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, lacks an @ symbol, or has a
    /// malformed local part or domain.
    pub fn parse(s: &str) -> Result<Self, EmailError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(EmailError::Empty);
        }

        let (local, domain) = s.split_once('@').ok_or(EmailError::MissingAtSymbol)?;

        if local.is_empty()
            || !local
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
        {
            return Err(EmailError::InvalidLocalPart);
        }

        let mut labels = domain.split('.');
        let head = labels.next().unwrap_or_default();
        if head.is_empty() || !head.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Err(EmailError::InvalidDomain);
        }

        let mut saw_tld = false;
        for label in labels {
            if label.len() < 2 || !label.chars().all(|c| c.is_ascii_alphabetic()) {
                return Err(EmailError::InvalidDomain);
            }
            saw_tld = true;
        }
        if !saw_tld {
            return Err(EmailError::InvalidDomain);
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the email address as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `Email` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Email {
    type Err = EmailError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Errors that can occur when parsing a [`Phone`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PhoneError {
    /// The input string is empty.
    #[error("phone number cannot be empty")]
    Empty,
    /// After stripping punctuation, the digit count is not 10.
    #[error("phone number must be exactly 10 digits (got {digits})")]
    WrongDigitCount {
        /// Number of digits found in the input.
        digits: usize,
    },
}

/// A 10-digit Indian phone number.
///
/// Punctuation and spaces are stripped before counting, so `"987-654-3210"`
/// parses to the same value as `"9876543210"`. The normalized digits are kept.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Phone(String);

impl Phone {
    /// Number of digits in a valid phone number.
    pub const DIGITS: usize = 10;

    /// Parse a `Phone` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty or does not contain exactly 10
    /// digits after stripping non-digit characters.
    pub fn parse(s: &str) -> Result<Self, PhoneError> {
        if s.trim().is_empty() {
            return Err(PhoneError::Empty);
        }

        let digits: String = s.chars().filter(char::is_ascii_digit).collect();
        if digits.len() != Self::DIGITS {
            return Err(PhoneError::WrongDigitCount {
                digits: digits.len(),
            });
        }

        Ok(Self(digits))
    }

    /// Returns the normalized 10-digit string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Phone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Phone {
    type Err = PhoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Errors that can occur when parsing a [`Pincode`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PincodeError {
    /// The input string is empty.
    #[error("pincode cannot be empty")]
    Empty,
    /// The input is not exactly 6 digits.
    #[error("pincode must be 6 digits")]
    Invalid,
}

/// A 6-digit Indian postal code.
///
/// Unlike [`Phone`], no stripping is applied: the input must be exactly six
/// ASCII digits (`"56004A"` fails).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Pincode(String);

impl Pincode {
    /// Number of digits in a valid pincode.
    pub const DIGITS: usize = 6;

    /// Parse a `Pincode` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty or is not exactly 6 ASCII digits.
    pub fn parse(s: &str) -> Result<Self, PincodeError> {
        if s.trim().is_empty() {
            return Err(PincodeError::Empty);
        }
        if s.len() != Self::DIGITS || !s.chars().all(|c| c.is_ascii_digit()) {
            return Err(PincodeError::Invalid);
        }
        Ok(Self(s.to_owned()))
    }

    /// Returns the pincode as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Pincode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Pincode {
    type Err = PincodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Errors that can occur when parsing a [`CustomerName`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CustomerNameError {
    /// The input string is empty.
    #[error("full name is required")]
    Empty,
    /// The input contains characters other than letters and spaces.
    #[error("name must contain only letters and spaces")]
    InvalidCharacters,
}

/// A customer's full name: non-empty, letters and spaces only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct CustomerName(String);

impl CustomerName {
    /// Parse a `CustomerName` from a string, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns an error if the trimmed input is empty or contains anything
    /// other than letters and spaces.
    pub fn parse(s: &str) -> Result<Self, CustomerNameError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(CustomerNameError::Empty);
        }
        if !trimmed.chars().all(|c| c.is_alphabetic() || c == ' ') {
            return Err(CustomerNameError::InvalidCharacters);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CustomerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_emails() {
        assert!(Email::parse("user@example.com").is_ok());
        assert!(Email::parse("user.name@example.co.uk").is_ok());
        assert!(Email::parse("user_x-1@my-domain.in").is_ok());
        assert!(Email::parse("  padded@example.com  ").is_ok());
    }

    #[test]
    fn test_parse_invalid_emails() {
        assert_eq!(Email::parse(""), Err(EmailError::Empty));
        assert_eq!(Email::parse("no-at"), Err(EmailError::MissingAtSymbol));
        assert_eq!(Email::parse("@example.com"), Err(EmailError::InvalidLocalPart));
        assert_eq!(Email::parse("a b@example.com"), Err(EmailError::InvalidLocalPart));
        assert_eq!(Email::parse("user@"), Err(EmailError::InvalidDomain));
        assert_eq!(Email::parse("user@domain"), Err(EmailError::InvalidDomain));
        assert_eq!(Email::parse("user@domain.c"), Err(EmailError::InvalidDomain));
        assert_eq!(Email::parse("user@domain.c0m"), Err(EmailError::InvalidDomain));
    }

    #[test]
    fn test_phone_strips_punctuation() {
        let phone = Phone::parse("987-654-3210").unwrap();
        assert_eq!(phone.as_str(), "9876543210");

        let phone = Phone::parse("(987) 654 3210").unwrap();
        assert_eq!(phone.as_str(), "9876543210");
    }

    #[test]
    fn test_phone_digit_count() {
        assert_eq!(
            Phone::parse("98765"),
            Err(PhoneError::WrongDigitCount { digits: 5 })
        );
        assert_eq!(
            Phone::parse("98765432101"),
            Err(PhoneError::WrongDigitCount { digits: 11 })
        );
        assert_eq!(Phone::parse("  "), Err(PhoneError::Empty));
    }

    #[test]
    fn test_pincode() {
        assert!(Pincode::parse("560049").is_ok());
        assert_eq!(Pincode::parse("56004"), Err(PincodeError::Invalid));
        assert_eq!(Pincode::parse("56004A"), Err(PincodeError::Invalid));
        assert_eq!(Pincode::parse("5600491"), Err(PincodeError::Invalid));
        assert_eq!(Pincode::parse(""), Err(PincodeError::Empty));
    }

    #[test]
    fn test_customer_name() {
        assert_eq!(
            CustomerName::parse("  Asha Rao ").unwrap().as_str(),
            "Asha Rao"
        );
        assert_eq!(CustomerName::parse(""), Err(CustomerNameError::Empty));
        assert_eq!(
            CustomerName::parse("Asha R4o"),
            Err(CustomerNameError::InvalidCharacters)
        );
    }
}
