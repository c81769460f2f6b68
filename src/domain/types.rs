//! Strongly-typed value objects used by domain entities.
//!
//! These wrappers enforce basic invariants (e.g., positive identifiers,
//! ten-digit phone numbers, strictly positive amounts) so that once a value
//! reaches the gateway it can be sent to the API without further checks.
use std::collections::HashSet;
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::ValidateEmail;

/// Number of digits a local phone number must carry.
pub const PHONE_DIGITS: usize = 10;

/// Errors produced when attempting to construct a constrained value object.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// Provided identifier is zero or negative.
    #[error("id must be greater than zero")]
    NonPositiveId,
    /// Provided email failed format validation.
    #[error("invalid email address")]
    InvalidEmail,
    /// Provided string contained no non-whitespace characters.
    #[error("value cannot be empty")]
    EmptyString,
    /// Phone number did not carry the expected digit count.
    #[error("phone number must have 10 digits")]
    InvalidPhone,
    /// Amount was zero, negative or unparsable.
    #[error("amount must be > 0")]
    NonPositiveAmount,
    /// Provided value failed custom validation.
    #[error("invalid value: {0}")]
    InvalidValue(String),
}

/// Macro to generate lightweight newtypes for positive identifiers.
macro_rules! id_newtype {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(i64);

        impl $name {
            /// Creates a new identifier ensuring it is greater than zero.
            pub fn new(value: i64) -> Result<Self, TypeConstraintError> {
                if value > 0 {
                    Ok(Self(value))
                } else {
                    Err(TypeConstraintError::NonPositiveId)
                }
            }

            /// Returns the raw `i64` backing this identifier.
            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<i64> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: i64) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for i64 {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

id_newtype!(UserId, "Unique identifier for an application user.");
id_newtype!(ClientId, "Unique identifier for a customer.");
id_newtype!(DebtId, "Unique identifier for a debt.");
id_newtype!(PaymentId, "Unique identifier for a payment.");

/// Lower-cased and validated email address.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct ClientEmail(String);

impl ClientEmail {
    /// Validates and normalizes an email string.
    pub fn new<S: Into<String>>(email: S) -> Result<Self, TypeConstraintError> {
        let normalized = email.into().trim().to_lowercase();
        if normalized.validate_email() {
            Ok(Self(normalized))
        } else {
            Err(TypeConstraintError::InvalidEmail)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for ClientEmail {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<&str> for ClientEmail {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Wrapper for non-empty, trimmed strings.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct NonEmptyString(String);

impl NonEmptyString {
    /// Trims whitespace and rejects empty inputs.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let trimmed = value.into().trim().to_string();
        if trimmed.is_empty() {
            return Err(TypeConstraintError::EmptyString);
        }
        Ok(Self(trimmed))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

macro_rules! non_empty_string_newtype {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(String);

        impl $name {
            /// Constructs a trimmed, non-empty value.
            pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
                let inner = NonEmptyString::new(value)?;
                Ok(Self(inner.into_inner()))
            }

            /// Borrow the value as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the wrapper and return the owned string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl Deref for $name {
            type Target = str;

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }
    };
}

non_empty_string_newtype!(ClientName, "Customer name wrapper enforcing non-empty values.");

/// Free text typed by the operator, sanitized and trimmed.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct SanitizedText(String);

impl SanitizedText {
    /// Strips markup and rejects values that end up empty. The result is
    /// plain text: characters such as `&` and `<` are kept as typed.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let sanitized = strip_markup(&value.into());
        let inner = NonEmptyString::new(sanitized)?;
        Ok(Self(inner.into_inner()))
    }

    /// Like [`SanitizedText::new`] but maps blank input to `None`.
    pub fn optional<S: Into<String>>(value: S) -> Option<Self> {
        Self::new(value).ok()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

/// Removes every tag (and the content of `script`/`style`) and decodes the
/// entities the HTML serializer writes back, so the API stores plain text.
fn strip_markup(value: &str) -> String {
    let html = ammonia::Builder::empty()
        .clean_content_tags(HashSet::from(["script", "style"]))
        .clean(value)
        .to_string();
    html.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&nbsp;", "\u{a0}")
        .replace("&amp;", "&")
}

impl Display for SanitizedText {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Keeps only the ASCII digits of a phone number as typed by the operator.
pub fn phone_digits(value: &str) -> String {
    value.chars().filter(char::is_ascii_digit).collect()
}

/// Local phone number reduced to its ten digits.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Strips separators and requires exactly [`PHONE_DIGITS`] digits.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let raw = value.into();
        if raw.trim().is_empty() {
            return Err(TypeConstraintError::EmptyString);
        }
        let digits = phone_digits(&raw);
        if digits.len() != PHONE_DIGITS {
            return Err(TypeConstraintError::InvalidPhone);
        }
        Ok(Self(digits))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for PhoneNumber {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<&str> for PhoneNumber {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Monetary amount strictly greater than zero.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct PositiveAmount(Decimal);

impl PositiveAmount {
    pub fn new(value: Decimal) -> Result<Self, TypeConstraintError> {
        if value > Decimal::ZERO {
            Ok(Self(value))
        } else {
            Err(TypeConstraintError::NonPositiveAmount)
        }
    }

    /// Parses operator input such as `"1500"`, `"1,500.50"` or `" 99.9 "`.
    pub fn parse(value: &str) -> Result<Self, TypeConstraintError> {
        let cleaned: String = value
            .trim()
            .chars()
            .filter(|c| *c != ',' && *c != '$' && !c.is_whitespace())
            .collect();
        let amount =
            Decimal::from_str(&cleaned).map_err(|_| TypeConstraintError::NonPositiveAmount)?;
        Self::new(amount)
    }

    pub const fn get(self) -> Decimal {
        self.0
    }
}

impl Display for PositiveAmount {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_must_be_positive() {
        assert_eq!(ClientId::new(0), Err(TypeConstraintError::NonPositiveId));
        assert_eq!(DebtId::new(-3), Err(TypeConstraintError::NonPositiveId));
        assert_eq!(PaymentId::new(7).map(PaymentId::get), Ok(7));
    }

    #[test]
    fn phone_requires_ten_digits() {
        assert_eq!(
            PhoneNumber::new("555123"),
            Err(TypeConstraintError::InvalidPhone)
        );
        assert_eq!(PhoneNumber::new("  "), Err(TypeConstraintError::EmptyString));
        let phone = PhoneNumber::new("(555) 123-4567").expect("valid phone");
        assert_eq!(phone.as_str(), "5551234567");
    }

    #[test]
    fn email_is_normalized() {
        let email = ClientEmail::new("  Ana@Example.COM ").expect("valid email");
        assert_eq!(email.as_str(), "ana@example.com");
        assert!(ClientEmail::new("not-an-email").is_err());
    }

    #[test]
    fn amounts_must_be_positive() {
        assert_eq!(
            PositiveAmount::parse("0"),
            Err(TypeConstraintError::NonPositiveAmount)
        );
        assert_eq!(
            PositiveAmount::parse("-10"),
            Err(TypeConstraintError::NonPositiveAmount)
        );
        assert_eq!(
            PositiveAmount::parse("abc"),
            Err(TypeConstraintError::NonPositiveAmount)
        );
        let amount = PositiveAmount::parse("$1,500.50").expect("valid amount");
        assert_eq!(amount.get(), Decimal::new(150050, 2));
    }

    #[test]
    fn sanitized_text_strips_markup() {
        let text = SanitizedText::new("<script>x</script>Anillo de oro").expect("non-empty");
        assert_eq!(text.as_str(), "Anillo de oro");
        assert!(SanitizedText::optional("   ").is_none());
    }

    #[test]
    fn sanitized_text_keeps_plain_characters() {
        let text = SanitizedText::new("Aretes & collar <3").expect("non-empty");
        assert_eq!(text.as_str(), "Aretes & collar <3");

        let text = SanitizedText::new("Pago <b>parcial</b> > 50%").expect("non-empty");
        assert_eq!(text.as_str(), "Pago parcial > 50%");
    }
}
