use std::any::TypeId;
use std::collections::HashMap;
use tracing::debug;

use super::{ErrorType, ResolvableError, Translator};
use crate::errors::{ConfigError, ResolveError};

/// Read-only mapping from error type to translator.
///
/// Populated once by the resolver builder, then shared across concurrent
/// requests without locking. Registration order is kept for diagnostics
/// only; lookup is by type identity.
pub struct TranslatorRegistry {
    translators: HashMap<TypeId, Box<dyn Translator>>,
    registered: Vec<ErrorType>,
}

impl TranslatorRegistry {
    pub(crate) fn new() -> Self {
        Self {
            translators: HashMap::new(),
            registered: Vec::new(),
        }
    }

    /// Register a translator for one error type. A second registration for
    /// the same type is an ambiguity and is rejected.
    pub(crate) fn insert(
        &mut self,
        error_type: ErrorType,
        translator: Box<dyn Translator>,
    ) -> Result<(), ConfigError> {
        if self.translators.contains_key(&error_type.id()) {
            return Err(ConfigError::DuplicateTranslator {
                type_name: error_type.name(),
            });
        }
        self.translators.insert(error_type.id(), translator);
        self.registered.push(error_type);
        Ok(())
    }

    /// Walk the error's ancestry chain and return the translator registered
    /// for the most specific matching type.
    ///
    /// Pure lookup: no registry or request state is touched. A translator for
    /// a subtype beats one for a supertype, and translators registered for
    /// unrelated sibling types are never selected.
    pub fn resolve(
        &self,
        error: &dyn ResolvableError,
    ) -> Result<&dyn Translator, ResolveError> {
        let chain = error.ancestry();

        for error_type in &chain {
            if let Some(translator) = self.translators.get(&error_type.id()) {
                debug!(
                    error_type = %chain.first().unwrap_or(error_type),
                    matched = %error_type,
                    "Resolved translator for error"
                );
                return Ok(translator.as_ref());
            }
        }

        Err(ResolveError::NoTranslatorFound {
            error_type: chain
                .first()
                .map(|t| t.name().to_string())
                .unwrap_or_else(|| "unknown".to_string()),
        })
    }

    /// Registered error types in registration order.
    pub fn registered_types(&self) -> &[ErrorType] {
        &self.registered
    }

    pub fn len(&self) -> usize {
        self.registered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registered.is_empty()
    }
}
