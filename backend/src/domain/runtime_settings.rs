//! Settings read from the environment on every invocation.
//!
//! Unlike process settings, these are not cached: each intake request and each
//! notification batch reads them afresh, so operators can repoint the store,
//! channel or mail addresses without a restart. Empty values count as missing.

use mockable::Env;

/// Table (store location) the intake handler writes to.
pub const PRODUCTS_TABLE_ENV: &str = "PRODUCTS_TABLE_NAME";
/// Topic (channel location) the intake handler publishes to.
pub const PRODUCT_EVENTS_TOPIC_ENV: &str = "PRODUCT_EVENTS_TOPIC";
/// Sender address for notification emails.
pub const SENDER_EMAIL_ENV: &str = "SENDER_EMAIL_ADDRESS";
/// Recipient address for notification emails.
pub const RECIPIENT_EMAIL_ENV: &str = "RECIPIENT_EMAIL_ADDRESS";

/// Errors raised while reading per-invocation settings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuntimeConfigError {
    /// One or more required variables were unset or empty.
    #[error("missing required environment variables: {}", names.join(", "))]
    Missing { names: Vec<&'static str> },
}

/// Opaque store location, interpreted by the repository adapter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StoreLocation(String);

impl StoreLocation {
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }
}

impl AsRef<str> for StoreLocation {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Opaque channel location, interpreted by the publisher adapter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChannelLocation(String);

impl ChannelLocation {
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }
}

impl AsRef<str> for ChannelLocation {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Settings required by the intake handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntakeSettings {
    pub store: StoreLocation,
    pub channel: ChannelLocation,
}

impl IntakeSettings {
    /// Read the store and channel locations.
    ///
    /// # Examples
    /// ```
    /// use catalogue::domain::IntakeSettings;
    /// use mockable::MockEnv;
    ///
    /// let mut env = MockEnv::new();
    /// env.expect_string().returning(|name| match name {
    ///     "PRODUCTS_TABLE_NAME" => Some("products".to_owned()),
    ///     "PRODUCT_EVENTS_TOPIC" => Some("product-events".to_owned()),
    ///     _ => None,
    /// });
    ///
    /// let settings = IntakeSettings::from_env(&env).expect("configured");
    /// assert_eq!(settings.store.as_ref(), "products");
    /// ```
    pub fn from_env<E: Env + ?Sized>(env: &E) -> Result<Self, RuntimeConfigError> {
        let [store, channel] = require(env, [PRODUCTS_TABLE_ENV, PRODUCT_EVENTS_TOPIC_ENV])?;
        Ok(Self {
            store: StoreLocation::new(store),
            channel: ChannelLocation::new(channel),
        })
    }
}

/// Settings required by the notification handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotifierSettings {
    pub sender: String,
    pub recipient: String,
}

impl NotifierSettings {
    /// Read the sender and recipient addresses.
    pub fn from_env<E: Env + ?Sized>(env: &E) -> Result<Self, RuntimeConfigError> {
        let [sender, recipient] = require(env, [SENDER_EMAIL_ENV, RECIPIENT_EMAIL_ENV])?;
        Ok(Self { sender, recipient })
    }
}

fn require<E: Env + ?Sized, const N: usize>(
    env: &E,
    names: [&'static str; N],
) -> Result<[String; N], RuntimeConfigError> {
    let values = names.map(|name| env.string(name).filter(|value| !value.trim().is_empty()));
    let missing: Vec<&'static str> = names
        .iter()
        .zip(values.iter())
        .filter(|(_, value)| value.is_none())
        .map(|(name, _)| *name)
        .collect();
    if !missing.is_empty() {
        return Err(RuntimeConfigError::Missing { names: missing });
    }
    Ok(values.map(Option::unwrap_or_default))
}
