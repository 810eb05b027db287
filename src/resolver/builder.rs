use std::any::Any;

use super::writer::ResponseWriter;
use super::ErrorResolver;
use crate::codec::{BodyCodec, CodecRegistry};
use crate::errors::ConfigError;
use crate::negotiation::MediaType;
use crate::request::RequestContext;
use crate::response::ResponseModel;
use crate::translator::{
    ErrorType, FnTranslator, ResolvableError, Translator, TranslatorRegistry, TypedTranslator,
};

/// One-shot configuration for [`ErrorResolver`]. Applied before serving;
/// the built resolver is immutable.
///
/// When no codecs are registered, the default set (JSON, XML, plain text)
/// is installed. The fallback media type defaults to `application/xml`.
pub struct ErrorResolverBuilder {
    translators: Vec<(ErrorType, Box<dyn Translator>)>,
    codecs: Vec<Box<dyn BodyCodec>>,
    default_media_type: MediaType,
}

impl ErrorResolverBuilder {
    pub(crate) fn new() -> Self {
        Self {
            translators: Vec::new(),
            codecs: Vec::new(),
            default_media_type: MediaType::application_xml(),
        }
    }

    /// Register a translator for error type `E` and every subtype whose
    /// ancestry lists `E`. The closure sees the error through the trait
    /// object, so subtype instances are fine.
    pub fn translator<E: Any>(
        mut self,
        translate: impl Fn(&dyn ResolvableError, &RequestContext) -> ResponseModel
            + Send
            + Sync
            + 'static,
    ) -> Self {
        self.translators
            .push((ErrorType::of::<E>(), Box::new(FnTranslator(translate))));
        self
    }

    /// Register a downcasting translator for exactly `E`. Prefer
    /// [`Self::translator`] when subtypes of `E` may reach this registration,
    /// since the downcast fails for them.
    pub fn typed_translator<E: ResolvableError>(
        mut self,
        translate: impl Fn(&E, &RequestContext) -> ResponseModel + Send + Sync + 'static,
    ) -> Self {
        self.translators.push((
            ErrorType::of::<E>(),
            Box::new(TypedTranslator::new(translate)),
        ));
        self
    }

    /// Register a custom [`Translator`] implementation for `error_type`.
    pub fn register(
        mut self,
        error_type: ErrorType,
        translator: impl Translator + 'static,
    ) -> Self {
        self.translators.push((error_type, Box::new(translator)));
        self
    }

    /// Append a codec. Registration order is negotiation priority.
    pub fn codec(mut self, codec: impl BodyCodec + 'static) -> Self {
        self.codecs.push(Box::new(codec));
        self
    }

    /// Media type used when the client's preferences match no codec.
    pub fn default_media_type(mut self, media_type: MediaType) -> Self {
        self.default_media_type = media_type;
        self
    }

    /// Validate the configuration and build the resolver. Fails fast on
    /// duplicate translator registrations and wildcard fallback types.
    pub fn build(self) -> Result<ErrorResolver, ConfigError> {
        if !self.default_media_type.is_concrete() {
            return Err(ConfigError::WildcardDefaultMediaType {
                media_type: self.default_media_type.to_string(),
            });
        }

        let mut registry = TranslatorRegistry::new();
        for (error_type, translator) in self.translators {
            registry.insert(error_type, translator)?;
        }

        let codecs = if self.codecs.is_empty() {
            CodecRegistry::with_defaults()
        } else {
            CodecRegistry::new(self.codecs)
        };

        Ok(ErrorResolver::new(
            registry,
            ResponseWriter::new(codecs, self.default_media_type),
        ))
    }
}

impl Default for ErrorResolverBuilder {
    fn default() -> Self {
        Self::new()
    }
}
