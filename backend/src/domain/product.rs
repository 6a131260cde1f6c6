//! Product data model.
//!
//! A [`Product`] is created exactly once by the intake service and is never
//! updated afterwards. Identifier and timestamp are assigned server-side; the
//! remaining fields come from a validated [`ProductDraft`].

use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Number;
use uuid::Uuid;

/// Validation errors returned by the product value constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProductValidationError {
    /// The product identifier was not a UUID.
    #[error("product id must be a valid UUID")]
    InvalidId,
    /// The product name was the empty string.
    #[error("product name must not be empty")]
    EmptyName,
    /// The creation timestamp was not RFC 3339.
    #[error("createdAt must be an RFC 3339 timestamp")]
    InvalidTimestamp,
}

/// Server-generated product identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProductId(Uuid);

impl ProductId {
    /// Generate a fresh random identifier.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    #[must_use]
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    #[must_use]
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<ProductId> for String {
    fn from(value: ProductId) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for ProductId {
    type Error = ProductValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Uuid::parse_str(&value)
            .map(Self)
            .map_err(|_| ProductValidationError::InvalidId)
    }
}

/// Non-empty product name. Whitespace-only names are accepted as submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProductName(String);

impl ProductName {
    /// Validate and construct a [`ProductName`].
    pub fn new(name: impl Into<String>) -> Result<Self, ProductValidationError> {
        let name = name.into();
        if name.is_empty() {
            return Err(ProductValidationError::EmptyName);
        }
        Ok(Self(name))
    }
}

impl AsRef<str> for ProductName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for ProductName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<ProductName> for String {
    fn from(value: ProductName) -> Self {
        value.0
    }
}

impl TryFrom<String> for ProductName {
    type Error = ProductValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Product price as submitted.
///
/// The JSON number is kept verbatim so `10` is echoed back as `10` rather
/// than `10.0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(Number);

impl Price {
    /// Wrap a JSON number.
    #[must_use]
    pub fn new(number: Number) -> Self {
        Self(number)
    }

    /// Build a price from a float, rejecting NaN and infinities.
    #[must_use]
    pub fn from_f64(value: f64) -> Option<Self> {
        Number::from_f64(value).map(Self)
    }

    /// Lossy floating point view used by storage adapters.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        self.0.as_f64()
    }

    /// Underlying JSON number.
    #[must_use]
    pub fn as_number(&self) -> &Number {
        &self.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Creation timestamp, serialised as ISO-8601 UTC with millisecond precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct CreatedAt(DateTime<Utc>);

impl CreatedAt {
    /// Wrap a UTC timestamp.
    #[must_use]
    pub fn new(at: DateTime<Utc>) -> Self {
        Self(at)
    }

    /// Access the timestamp.
    #[must_use]
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Render as `YYYY-MM-DDTHH:MM:SS.mmmZ`.
    #[must_use]
    pub fn to_iso8601(&self) -> String {
        self.0.to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

impl Serialize for CreatedAt {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_iso8601())
    }
}

impl<'de> Deserialize<'de> for CreatedAt {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|parsed| Self(parsed.with_timezone(&Utc)))
            .map_err(|_| serde::de::Error::custom(ProductValidationError::InvalidTimestamp))
    }
}

/// Validated product submission awaiting identifier and timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    pub name: ProductName,
    pub description: Option<String>,
    pub price: Price,
}

impl ProductDraft {
    /// Assign the server-generated fields and produce the persisted record.
    #[must_use]
    pub fn into_product(self, product_id: ProductId, created_at: CreatedAt) -> Product {
        Product {
            product_id,
            name: self.name,
            description: self.description,
            price: self.price,
            created_at,
        }
    }
}

/// Persisted product record.
///
/// Serialises to `{productId, name, description?, price, createdAt}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub product_id: ProductId,
    pub name: ProductName,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub price: Price,
    pub created_at: CreatedAt,
}
