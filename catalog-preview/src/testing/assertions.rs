//! Assertions over a rendered [`MemoryViewTree`].

use crate::render::CARD_CLASS;
use crate::view::MemoryViewTree;

/// Titles of all rendered product cards, in order.
#[must_use]
pub fn card_titles(tree: &MemoryViewTree) -> Vec<String> {
    tree.descendants_with_class(tree.root(), "product-title")
        .into_iter()
        .filter_map(|title| title.text)
        .collect()
}

/// Formatted prices of all rendered product cards, in order.
#[must_use]
pub fn card_prices(tree: &MemoryViewTree) -> Vec<String> {
    tree.descendants_with_class(tree.root(), "product-price")
        .into_iter()
        .filter_map(|price| price.text)
        .collect()
}

/// Image sources of all rendered product cards, in order.
#[must_use]
pub fn card_images(tree: &MemoryViewTree) -> Vec<String> {
    tree.descendants_with_class(tree.root(), "product-media")
        .into_iter()
        .filter_map(|media| media.children.first().copied())
        .filter_map(|img| tree.element(img))
        .filter_map(|img| img.attribute("src").map(String::from))
        .collect()
}

/// Number of cards in the view, skeletons included.
#[must_use]
pub fn card_count(tree: &MemoryViewTree) -> usize {
    tree.descendants_with_class(tree.root(), CARD_CLASS).len()
}

/// Asserts the status line text.
///
/// # Panics
///
/// Panics if the status differs or the status element is missing.
pub fn assert_status(tree: &MemoryViewTree, expected: &str) {
    let actual = tree.text_by_id("status");
    assert_eq!(actual.as_deref(), Some(expected), "unexpected status text");
}

/// Asserts the rendered card titles.
///
/// # Panics
///
/// Panics if the titles differ.
pub fn assert_card_titles(tree: &MemoryViewTree, expected: &[&str]) {
    let actual = card_titles(tree);
    assert_eq!(actual, expected, "unexpected card titles");
}
