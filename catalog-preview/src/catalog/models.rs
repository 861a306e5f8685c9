//! Data models for catalog records and display items.
//!
//! Records arrive from an untrusted endpoint, so they are never deserialized
//! with a strict schema. Each field is picked out of the raw JSON by type and
//! anything of the wrong shape is treated as absent.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::HashMap;

use crate::errors::CatalogError;

/// One image reference inside a record's `image` list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImageRef {
    /// The image URL, if it was a string.
    pub url: Option<String>,
}

impl ImageRef {
    /// Creates an image reference with a URL.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: Some(url.into()) }
    }

    /// Reads an image reference from raw JSON.
    ///
    /// Non-object values yield a reference without a URL.
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        Self {
            url: value.get("url").and_then(Value::as_str).map(String::from),
        }
    }
}

/// The nested field bag of a catalog record.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RecordFields {
    /// Product name, if it was a string.
    pub name: Option<String>,
    /// Price in minor currency units, if it was a number.
    pub price: Option<serde_json::Number>,
    /// Image list, if it was an array.
    pub image: Option<Vec<ImageRef>>,
}

impl RecordFields {
    /// Creates an empty field bag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the price in minor units.
    #[must_use]
    pub fn with_price(mut self, minor_units: i64) -> Self {
        self.price = Some(minor_units.into());
        self
    }

    /// Appends an image URL.
    #[must_use]
    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        self.image.get_or_insert_with(Vec::new).push(ImageRef::new(url));
        self
    }

    /// Reads a field bag from raw JSON.
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        Self {
            name: value.get("name").and_then(Value::as_str).map(String::from),
            price: match value.get("price") {
                Some(Value::Number(n)) => Some(n.clone()),
                _ => None,
            },
            image: value
                .get("image")
                .and_then(Value::as_array)
                .map(|items| items.iter().map(ImageRef::from_value).collect()),
        }
    }
}

/// One raw product entry as received over the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CatalogRecord {
    /// The field bag, if the record had an object under `fields`.
    pub fields: Option<RecordFields>,
}

impl CatalogRecord {
    /// Creates a record with a field bag.
    #[must_use]
    pub fn new(fields: RecordFields) -> Self {
        Self { fields: Some(fields) }
    }

    /// Creates a record without a field bag.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Reads a record from raw JSON. Never fails.
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        Self {
            fields: value
                .get("fields")
                .filter(|f| f.is_object())
                .map(RecordFields::from_value),
        }
    }

    /// Returns the record's name, if it has one.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.fields.as_ref().and_then(|f| f.name.as_deref())
    }

    /// Name used when logging the record at `index` (0-based).
    #[must_use]
    pub fn log_name(&self, index: usize) -> String {
        self.name()
            .map_or_else(|| format!("Product {}", index + 1), String::from)
    }
}

impl<'de> Deserialize<'de> for CatalogRecord {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_value(&value))
    }
}

/// Decodes a response body into catalog records.
///
/// Bodies that are valid JSON but not an array decode to an empty list.
/// Bodies that are not JSON at all return a [`CatalogError::Decode`].
pub fn decode_records(body: &str) -> Result<Vec<CatalogRecord>, CatalogError> {
    let value: Value = serde_json::from_str(body)?;
    Ok(records_from_value(&value))
}

/// Converts a decoded JSON value into catalog records.
#[must_use]
pub fn records_from_value(value: &Value) -> Vec<CatalogRecord> {
    match value {
        Value::Array(items) => items.iter().map(CatalogRecord::from_value).collect(),
        _ => Vec::new(),
    }
}

/// A normalized product, safe to render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayItem {
    /// Product name.
    pub name: String,
    /// Price in minor currency units.
    pub price_minor_units: i64,
    /// Image URL.
    pub image_url: String,
}

impl DisplayItem {
    /// Creates a display item.
    #[must_use]
    pub fn new(name: impl Into<String>, price_minor_units: i64, image_url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            price_minor_units,
            image_url: image_url.into(),
        }
    }

    /// The price as shown to the user, e.g. `$19.99`.
    #[must_use]
    pub fn formatted_price(&self) -> String {
        format_price(self.price_minor_units)
    }

    /// Converts to dictionary.
    #[must_use]
    pub fn to_dict(&self) -> HashMap<String, Value> {
        let mut dict = HashMap::new();
        dict.insert("name".to_string(), serde_json::json!(self.name));
        dict.insert("price_minor_units".to_string(), serde_json::json!(self.price_minor_units));
        dict.insert("price".to_string(), serde_json::json!(self.formatted_price()));
        dict.insert("image_url".to_string(), serde_json::json!(self.image_url));
        dict
    }
}

/// Formats minor currency units as dollars with two decimals.
///
/// The sign follows the symbol (`$-0.05`), matching how the storefront
/// has always printed refunds.
#[must_use]
pub fn format_price(minor_units: i64) -> String {
    let sign = if minor_units < 0 { "-" } else { "" };
    let abs = minor_units.unsigned_abs();
    format!("${sign}{}.{:02}", abs / 100, abs % 100)
}

/// Result of fetching the catalog once.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    /// The catalog was fetched; the payload may be empty.
    Success(Vec<CatalogRecord>),
    /// The fetch failed.
    Failure(CatalogError),
}

impl FetchOutcome {
    /// Whether the fetch succeeded.
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Returns the payload, if successful.
    #[must_use]
    pub fn records(&self) -> Option<&[CatalogRecord]> {
        match self {
            Self::Success(records) => Some(records),
            Self::Failure(_) => None,
        }
    }

    /// Returns the error, if failed.
    #[must_use]
    pub fn error(&self) -> Option<&CatalogError> {
        match self {
            Self::Success(_) => None,
            Self::Failure(err) => Some(err),
        }
    }
}

impl From<Result<Vec<CatalogRecord>, CatalogError>> for FetchOutcome {
    fn from(result: Result<Vec<CatalogRecord>, CatalogError>) -> Self {
        match result {
            Ok(records) => Self::Success(records),
            Err(err) => Self::Failure(err),
        }
    }
}
