//! Catalog records, normalization, and retrieval.
//!
//! This module provides:
//! - Lenient models for records received from the catalog endpoint
//! - The field normalizer that produces safe display items
//! - The fetch capability and its reqwest implementation

mod fetch;
mod models;
mod normalize;

#[cfg(feature = "http")]
pub use fetch::HttpFetcher;
#[cfg(test)]
pub use fetch::MockCatalogFetcher;
pub use fetch::{CatalogFetcher, FetchResponse};
pub use models::{
    decode_records, format_price, records_from_value, CatalogRecord, DisplayItem, FetchOutcome,
    ImageRef, RecordFields,
};
pub use normalize::{FieldNormalizer, DEFAULT_NAME};
