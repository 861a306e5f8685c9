//! Turns untrusted catalog records into display items.

use serde_json::Number;

use super::models::{CatalogRecord, DisplayItem, RecordFields};
use crate::config::FALLBACK_IMAGE;

/// Name used for records without a usable name.
pub const DEFAULT_NAME: &str = "Unnamed Product";

/// Normalizes catalog records by substituting defaults for missing data.
#[derive(Debug, Clone)]
pub struct FieldNormalizer {
    fallback_image: String,
}

impl Default for FieldNormalizer {
    fn default() -> Self {
        Self::new(FALLBACK_IMAGE)
    }
}

impl FieldNormalizer {
    /// Creates a normalizer with a custom fallback image.
    #[must_use]
    pub fn new(fallback_image: impl Into<String>) -> Self {
        Self {
            fallback_image: fallback_image.into(),
        }
    }

    /// Normalizes one record. Never fails.
    #[must_use]
    pub fn normalize(&self, record: &CatalogRecord) -> DisplayItem {
        let Some(fields) = &record.fields else {
            return DisplayItem::new(DEFAULT_NAME, 0, self.fallback_image.as_str());
        };

        DisplayItem {
            name: fields.name.clone().unwrap_or_else(|| DEFAULT_NAME.to_string()),
            price_minor_units: fields.price.as_ref().map_or(0, price_to_minor_units),
            image_url: first_image_url(fields)
                .unwrap_or(self.fallback_image.as_str())
                .to_string(),
        }
    }

    /// Normalizes at most `limit` records, preserving order.
    #[must_use]
    pub fn normalize_preview(&self, records: &[CatalogRecord], limit: usize) -> Vec<DisplayItem> {
        records.iter().take(limit).map(|r| self.normalize(r)).collect()
    }
}

fn first_image_url(fields: &RecordFields) -> Option<&str> {
    match fields.image.as_deref() {
        Some([first, ..]) => first.url.as_deref().filter(|url| !url.is_empty()),
        _ => None,
    }
}

/// Fractional prices are rounded to the nearest minor unit and
/// out-of-range values saturate.
#[allow(clippy::cast_possible_truncation)]
fn price_to_minor_units(price: &Number) -> i64 {
    if let Some(n) = price.as_i64() {
        return n;
    }
    match price.as_f64() {
        Some(f) if f.is_finite() => f.round() as i64,
        _ => 0,
    }
}
