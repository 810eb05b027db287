//! Read-only snapshot of the failing request.
//!
//! Translators and the response writer see the request through this snapshot
//! rather than the live `http::Request`, which the inner service consumes
//! before the resolver ever runs.

use axum::http::{HeaderMap, Method, Request, Uri};

use crate::negotiation::MediaType;

/// Media types the matched route declared it can produce, attached to the
/// request by upstream routing as an extension. Reflects the original
/// handler's capabilities, so the orchestrator discards it before negotiating
/// the error response.
#[derive(Debug, Clone)]
pub struct ProducibleMediaTypes(pub Vec<MediaType>);

/// Immutable view of the request that raised an error, plus the clearable
/// producible-media-types hint.
#[derive(Debug, Clone)]
pub struct RequestContext {
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    producible: Option<Vec<MediaType>>,
}

impl RequestContext {
    pub fn new(method: Method, uri: Uri, headers: HeaderMap) -> Self {
        Self {
            method,
            uri,
            headers,
            producible: None,
        }
    }

    /// Snapshot an incoming request, picking up the producible hint if
    /// upstream routing attached one.
    pub fn from_request<B>(request: &Request<B>) -> Self {
        Self {
            method: request.method().clone(),
            uri: request.uri().clone(),
            headers: request.headers().clone(),
            producible: request
                .extensions()
                .get::<ProducibleMediaTypes>()
                .map(|hint| hint.0.clone()),
        }
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Producible hint, if still set.
    pub fn producible_media_types(&self) -> Option<&[MediaType]> {
        self.producible.as_deref()
    }

    /// Attach a producible hint. Mostly useful in tests and when building a
    /// context by hand.
    pub fn set_producible_media_types(&mut self, media_types: Vec<MediaType>) {
        self.producible = Some(media_types);
    }

    /// Drop the producible hint. Returns whether one was set.
    pub(crate) fn clear_producible_media_types(&mut self) -> bool {
        self.producible.take().is_some()
    }
}
