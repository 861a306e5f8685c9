//! Testing utilities for catalog previews.
//!
//! This module provides:
//! - A scripted fetcher
//! - Payload fixtures
//! - Assertions over the in-memory view

mod assertions;
pub mod fixtures;
mod mocks;

pub use assertions::{
    assert_card_titles, assert_status, card_count, card_images, card_prices, card_titles,
};
pub use mocks::{ScriptedResponse, StaticFetcher};
