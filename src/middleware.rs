//! Axum wiring for the resolver.
//!
//! Handlers return [`Caught`] as their error type; it parks the raised error
//! in the response extensions behind a placeholder status. The
//! [`resolve_errors`] middleware picks it up after the inner service runs and
//! lets the resolver produce the real response.

use std::fmt;
use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::request::RequestContext;
use crate::resolver::{ErrorResolver, Outcome};
use crate::translator::ResolvableError;

/// Cloneable carrier for an error raised by a handler.
///
/// As a response it is a bare 500 with the error parked in the extensions;
/// that placeholder survives only when no `resolve_errors` layer is installed
/// or the resolver declines the error.
#[derive(Clone)]
pub struct Caught(Arc<dyn ResolvableError>);

impl Caught {
    pub fn new<E: ResolvableError>(error: E) -> Self {
        Self(Arc::new(error))
    }

    pub fn error(&self) -> &dyn ResolvableError {
        self.0.as_ref()
    }
}

impl fmt::Debug for Caught {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Caught").field(&self.0).finish()
    }
}

impl fmt::Display for Caught {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl<E: ResolvableError> From<E> for Caught {
    fn from(error: E) -> Self {
        Self::new(error)
    }
}

impl IntoResponse for Caught {
    fn into_response(self) -> Response {
        let mut response = StatusCode::INTERNAL_SERVER_ERROR.into_response();
        response.extensions_mut().insert(self);
        response
    }
}

/// Middleware resolving handler errors into content-negotiated responses.
///
/// Install with `axum::middleware::from_fn_with_state(resolver, resolve_errors)`.
/// The request is snapshotted before the inner service consumes it, since
/// negotiation needs the original Accept header. A `NotHandled` outcome lets
/// the placeholder response through, which is the host's own fallback path.
pub async fn resolve_errors(
    State(resolver): State<Arc<ErrorResolver>>,
    request: Request,
    next: Next,
) -> Response {
    let mut context = RequestContext::from_request(&request);
    let mut response = next.run(request).await;

    let Some(caught) = response.extensions_mut().remove::<Caught>() else {
        return response;
    };

    match resolver.on_error(&mut context, caught.error()) {
        Outcome::Handled(resolved) => resolved,
        Outcome::NotHandled => response,
    }
}
