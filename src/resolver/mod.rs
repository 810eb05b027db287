//! The resolution orchestrator: entry point invoked by the hosting pipeline
//! when a handler raises an error.

mod builder;
mod writer;

pub use builder::ErrorResolverBuilder;
pub use writer::ResponseWriter;

use axum::http::StatusCode;
use axum::response::Response;
use tracing::{error, warn};

use crate::negotiation::MediaType;
use crate::request::RequestContext;
use crate::translator::{ErrorType, ResolvableError, TranslatorRegistry};

/// Whether the resolver produced a response for the error.
#[derive(Debug)]
pub enum Outcome {
    /// A best-effort response was produced (possibly status-only if body
    /// writing failed). The pipeline must not apply further error handling.
    Handled(Response),
    /// No translator is registered for the error; the host should apply its
    /// own default behaviour.
    NotHandled,
}

impl Outcome {
    pub fn is_handled(&self) -> bool {
        matches!(self, Self::Handled(_))
    }
}

/// Maps a raised error to a content-negotiated HTTP response.
///
/// Stateless across invocations and safe to share behind an `Arc`: the
/// translator and codec registries are built once and read-only afterwards,
/// so concurrent requests need no locking.
pub struct ErrorResolver {
    translators: TranslatorRegistry,
    writer: ResponseWriter,
}

impl ErrorResolver {
    pub fn builder() -> ErrorResolverBuilder {
        ErrorResolverBuilder::new()
    }

    pub(crate) fn new(translators: TranslatorRegistry, writer: ResponseWriter) -> Self {
        Self {
            translators,
            writer,
        }
    }

    /// Handle an error raised while processing `request`.
    ///
    /// Never panics and never returns an error: an error handler that throws
    /// defeats its purpose, so every internal failure is contained here and
    /// logged instead. Each call is independent; calling twice with the same
    /// input produces the same outcome.
    pub fn on_error(
        &self,
        request: &mut RequestContext,
        error: &dyn ResolvableError,
    ) -> Outcome {
        // The producible hint reflects the failed handler's capabilities,
        // not the error response's; a stale hint would wrongly narrow
        // negotiation below.
        request.clear_producible_media_types();

        let translator = match self.translators.resolve(error) {
            Ok(translator) => translator,
            Err(resolve_error) => {
                warn!(
                    method = %request.method(),
                    path = %request.uri().path(),
                    "No translator found to handle error: {resolve_error}"
                );
                return Outcome::NotHandled;
            }
        };

        let model = match translator.translate(error, request) {
            Ok(model) => model,
            Err(translate_error) => {
                error!(
                    method = %request.method(),
                    path = %request.uri().path(),
                    error = %translate_error,
                    "Translator failed, abandoning error response body"
                );
                return Outcome::Handled(writer::status_only(StatusCode::INTERNAL_SERVER_ERROR));
            }
        };

        match self.writer.write(&model, request) {
            Ok(response) => Outcome::Handled(response),
            Err(write_error) => {
                error!(
                    method = %request.method(),
                    path = %request.uri().path(),
                    model = ?model,
                    error = %write_error,
                    "Failed to write error response"
                );
                // Best effort was made; report handled with the bare status
                // rather than escalating a second error.
                Outcome::Handled(writer::status_only(model.status()))
            }
        }
    }

    /// Fallback media type used when negotiation fails.
    pub fn default_media_type(&self) -> &MediaType {
        self.writer.default_media_type()
    }

    /// Media types the configured codecs produce, in priority order.
    pub fn codec_media_types(&self) -> Vec<MediaType> {
        self.writer.codecs().media_types()
    }

    /// Error types with a registered translator, in registration order.
    pub fn registered_error_types(&self) -> &[ErrorType] {
        self.translators.registered_types()
    }
}
