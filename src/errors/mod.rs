//! Error taxonomy for the resolver pipeline.
//!
//! Failures raised while handling another error must never escape
//! [`crate::resolver::ErrorResolver::on_error`]; they are contained there and
//! surfaced through `tracing` instead of propagating.

use thiserror::Error;

/// Translator lookup failure.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// No translator is registered for the error's type or any of its
    /// ancestors. The orchestrator converts this to `Outcome::NotHandled`.
    #[error("no translator registered for error type {error_type} or any of its ancestors")]
    NoTranslatorFound {
        /// Name of the concrete error type that could not be resolved.
        error_type: String,
    },
}

/// Failure inside a translator while producing a response model.
#[derive(Debug, Error)]
pub enum TranslateError {
    /// A typed translator received an error instance of a different concrete
    /// type. Happens when a typed translator is registered for an ancestor
    /// type and resolution selects it for a subtype instance.
    #[error("translator for {expected} received an instance of {actual}")]
    TypeMismatch {
        expected: &'static str,
        actual: &'static str,
    },

    /// The translator itself failed to build a response model.
    #[error("translator failed: {0}")]
    Failed(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Failure while encoding a response body.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("failed to serialize response body: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Failure while writing a negotiated error response.
#[derive(Debug, Error)]
pub enum WriteError {
    /// Neither the requested media types nor the fallback type matched a
    /// registered codec.
    #[error("no codec available for requested media types [{requested}] or the fallback type")]
    NotAcceptable { requested: String },

    /// Hard codec failure. Never retried against the fallback type.
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// The negotiated media type could not be rendered as a Content-Type
    /// header value.
    #[error("invalid content type header: {0}")]
    ContentType(#[from] axum::http::header::InvalidHeaderValue),
}

/// Invalid resolver configuration, reported at build time.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Two translators were registered for the same error type. Ambiguous
    /// registrations are rejected rather than tie-broken.
    #[error("translator already registered for error type {type_name}")]
    DuplicateTranslator { type_name: &'static str },

    /// The fallback media type must be concrete so the fallback phase always
    /// names a single producible type.
    #[error("default media type must be concrete, got {media_type}")]
    WildcardDefaultMediaType { media_type: String },
}

/// Media type parse failure.
#[derive(Debug, Error)]
pub enum MediaTypeError {
    #[error("invalid media type {value:?}")]
    Invalid { value: String },
}
