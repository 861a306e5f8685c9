//! Scripted fetchers for testing.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::catalog::{CatalogFetcher, FetchResponse};
use crate::errors::CatalogError;

/// One scripted reaction to a fetch.
#[derive(Debug, Clone)]
pub enum ScriptedResponse {
    /// Answer with a response.
    Respond(FetchResponse),
    /// Fail before any response, like a transport rejection.
    Fail(CatalogError),
    /// Panic inside the fetch.
    Panic(String),
}

/// A fetcher that replays scripted responses.
///
/// Responses are consumed in order; the last one repeats once the script
/// runs out. Each fetch yields to the scheduler before answering, so
/// concurrent pipelines interleave the way they would over a network.
#[derive(Debug)]
pub struct StaticFetcher {
    script: Mutex<VecDeque<ScriptedResponse>>,
    last: Mutex<ScriptedResponse>,
    urls: Mutex<Vec<String>>,
    call_count: AtomicUsize,
}

impl StaticFetcher {
    /// Creates a fetcher that always reacts the same way.
    #[must_use]
    pub fn new(response: ScriptedResponse) -> Self {
        Self::sequence(vec![response])
    }

    /// Creates a fetcher that reacts with each response in turn.
    ///
    /// An empty sequence behaves like a 200 with an empty array.
    #[must_use]
    pub fn sequence(responses: Vec<ScriptedResponse>) -> Self {
        let last = responses
            .last()
            .cloned()
            .unwrap_or_else(|| ScriptedResponse::Respond(FetchResponse::new(200, "[]")));
        Self {
            script: Mutex::new(responses.into()),
            last: Mutex::new(last),
            urls: Mutex::new(Vec::new()),
            call_count: AtomicUsize::new(0),
        }
    }

    /// Always answers 200 with the given JSON.
    #[must_use]
    pub fn ok_json(value: serde_json::Value) -> Self {
        Self::new(ScriptedResponse::Respond(FetchResponse::ok_json(&value)))
    }

    /// Always answers with a status and raw body.
    #[must_use]
    pub fn body(status: u16, body: impl Into<String>) -> Self {
        Self::new(ScriptedResponse::Respond(FetchResponse::new(status, body)))
    }

    /// Always answers with an empty body and the given status.
    #[must_use]
    pub fn status(status: u16) -> Self {
        Self::body(status, "")
    }

    /// Always fails at the transport layer.
    #[must_use]
    pub fn transport_error(reason: impl Into<String>) -> Self {
        Self::new(ScriptedResponse::Fail(CatalogError::transport(reason)))
    }

    /// Always panics.
    #[must_use]
    pub fn panicking(message: impl Into<String>) -> Self {
        Self::new(ScriptedResponse::Panic(message.into()))
    }

    /// Returns the number of fetches.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Returns the requested URLs in order.
    #[must_use]
    pub fn requested_urls(&self) -> Vec<String> {
        self.urls.lock().clone()
    }

    fn next_response(&self) -> ScriptedResponse {
        let next = self.script.lock().pop_front();
        match next {
            Some(response) => {
                *self.last.lock() = response.clone();
                response
            }
            None => self.last.lock().clone(),
        }
    }
}

#[async_trait]
impl CatalogFetcher for StaticFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchResponse, CatalogError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        self.urls.lock().push(url.to_string());
        let response = self.next_response();

        tokio::task::yield_now().await;

        match response {
            ScriptedResponse::Respond(response) => Ok(response),
            ScriptedResponse::Fail(err) => Err(err),
            ScriptedResponse::Panic(message) => panic!("{message}"),
        }
    }
}
