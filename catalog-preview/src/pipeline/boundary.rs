//! The catch boundary wrapped around each pipeline run.

use futures::FutureExt;
use std::future::Future;
use std::panic::AssertUnwindSafe;

use crate::errors::CatalogError;

/// Generates an identifier for one pipeline run.
#[must_use]
pub fn new_run_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Runs `body`, turning a panic into [`CatalogError::Unknown`].
///
/// Together with the body's own `Result` this gives each pipeline exactly
/// one place where failures surface.
pub async fn guarded<T, F>(body: F) -> Result<T, CatalogError>
where
    F: Future<Output = Result<T, CatalogError>>,
{
    match AssertUnwindSafe(body).catch_unwind().await {
        Ok(result) => result,
        Err(payload) => Err(CatalogError::from_panic(payload.as_ref())),
    }
}
