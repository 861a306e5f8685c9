//! Configuration types for fetching and previewing the catalog.

use serde::{Deserialize, Serialize};

/// The catalog endpoint used when none is configured.
pub const DEFAULT_ENDPOINT: &str = "https://www.course-api.com/javascript-store-products";

/// Placeholder shown for products without a usable image.
///
/// A percent-encoded SVG that reads "No Image" on a dark background.
pub const FALLBACK_IMAGE: &str = concat!(
    "data:image/svg+xml;charset=UTF-8,",
    "%3Csvg%20xmlns%3D'http%3A%2F%2Fwww.w3.org%2F2000%2Fsvg'%20width%3D'512'",
    "%20height%3D'512'%20viewBox%3D'0%200%20512%20512'%3E",
    "%3Crect%20width%3D'100%25'%20height%3D'100%25'%20fill%3D'%230b0e13'%2F%3E",
    "%3Cg%20fill%3D'%237aa2ff'%20font-family%3D'Arial%2CHelvetica%2Csans-serif'%3E",
    "%3Ctext%20x%3D'50%25'%20y%3D'50%25'%20text-anchor%3D'middle'%20font-size%3D'24'",
    "%20fill%3D'%237aa2ff'%3ENo%20Image%3C%2Ftext%3E%3C%2Fg%3E%3C%2Fsvg%3E",
);

/// Configuration for a catalog preview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// URL of the catalog endpoint.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Maximum number of records rendered.
    #[serde(default = "default_preview_limit")]
    pub preview_limit: usize,
    /// Whether the render pipeline shows skeleton cards while loading.
    #[serde(default = "default_true")]
    pub show_skeletons: bool,
    /// Number of skeleton cards shown while loading.
    #[serde(default = "default_preview_limit")]
    pub skeleton_count: usize,
    /// Image used when a record has no usable image URL.
    #[serde(default = "default_fallback_image")]
    pub fallback_image: String,
    /// Element ids looked up in the view tree.
    #[serde(default)]
    pub ids: ViewIds,
    /// User-visible status strings.
    #[serde(default)]
    pub messages: StatusMessages,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_preview_limit() -> usize {
    5
}

fn default_true() -> bool {
    true
}

fn default_fallback_image() -> String {
    FALLBACK_IMAGE.to_string()
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            preview_limit: default_preview_limit(),
            show_skeletons: default_true(),
            skeleton_count: default_preview_limit(),
            fallback_image: default_fallback_image(),
            ids: ViewIds::default(),
            messages: StatusMessages::default(),
        }
    }
}

impl CatalogConfig {
    /// Creates a new configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the endpoint.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Sets the preview limit.
    #[must_use]
    pub fn with_preview_limit(mut self, limit: usize) -> Self {
        self.preview_limit = limit;
        self
    }

    /// Enables or disables loading skeletons.
    #[must_use]
    pub fn with_skeletons(mut self, show: bool) -> Self {
        self.show_skeletons = show;
        self
    }

    /// Sets the fallback image.
    #[must_use]
    pub fn with_fallback_image(mut self, image: impl Into<String>) -> Self {
        self.fallback_image = image.into();
        self
    }
}

/// Element ids the renderer and status surface look up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewIds {
    /// Id of the element that holds product cards.
    #[serde(default = "default_container_id")]
    pub container: String,
    /// Id of the status line.
    #[serde(default = "default_status_id")]
    pub status: String,
}

fn default_container_id() -> String {
    "product-container".to_string()
}

fn default_status_id() -> String {
    "status".to_string()
}

impl Default for ViewIds {
    fn default() -> Self {
        Self {
            container: default_container_id(),
            status: default_status_id(),
        }
    }
}

/// Status strings shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusMessages {
    /// Shown when the log pipeline starts.
    #[serde(default = "default_log_loading")]
    pub log_loading: String,
    /// Shown when the log pipeline finishes.
    #[serde(default = "default_log_loaded")]
    pub log_loaded: String,
    /// Shown when the render pipeline starts.
    #[serde(default = "default_render_loading")]
    pub render_loading: String,
    /// Shown when there is nothing to render.
    #[serde(default = "default_empty")]
    pub empty: String,
}

fn default_log_loading() -> String {
    "Loading products (log)\u{2026}".to_string()
}

fn default_log_loaded() -> String {
    "Products loaded.".to_string()
}

fn default_render_loading() -> String {
    "Loading products (render)...".to_string()
}

fn default_empty() -> String {
    "No products to display.".to_string()
}

impl Default for StatusMessages {
    fn default() -> Self {
        Self {
            log_loading: default_log_loading(),
            log_loaded: default_log_loaded(),
            render_loading: default_render_loading(),
            empty: default_empty(),
        }
    }
}

impl StatusMessages {
    /// Status shown after rendering `count` cards.
    #[must_use]
    pub fn showing(count: usize) -> String {
        format!("Showing {count} product(s).")
    }

    /// Status shown when an error is reported.
    #[must_use]
    pub fn error(message: &str) -> String {
        format!("An error occurred: {message}")
    }
}
