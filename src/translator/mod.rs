//! Error types, translators and the translator registry.
//!
//! Runtime subclass reflection is replaced by an explicit ancestry chain:
//! every resolvable error names its own type and its "is-a" supertypes, most
//! specific first. Resolution walks that chain against the registry, so a
//! translator registered for a supertype handles every subtype that lists it,
//! while a more specific registration always wins.

mod registry;

pub use registry::TranslatorRegistry;

use std::any::{type_name, Any, TypeId};
use std::fmt;
use std::marker::PhantomData;

use crate::errors::TranslateError;
use crate::request::RequestContext;
use crate::response::ResponseModel;

/// Identifier for an error type in the ancestry chain. Ancestor entries may
/// name plain marker types; only the concrete error itself must implement
/// [`ResolvableError`].
#[derive(Debug, Clone, Copy)]
pub struct ErrorType {
    id: TypeId,
    name: &'static str,
}

impl ErrorType {
    pub fn of<E: Any>() -> Self {
        Self {
            id: TypeId::of::<E>(),
            name: type_name::<E>(),
        }
    }

    /// Fully qualified type name, for diagnostics and logs.
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub(crate) fn id(&self) -> TypeId {
        self.id
    }
}

impl PartialEq for ErrorType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ErrorType {}

impl std::hash::Hash for ErrorType {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for ErrorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// An error condition the resolver can map to an HTTP response.
///
/// `ancestry` returns the type chain used for translator lookup: the error's
/// own type first, then each supertype outward, excluding the universal root.
/// Chains are finite by construction.
///
/// ```
/// use http_error_resolver::translator::{ErrorType, ResolvableError};
///
/// #[derive(Debug)]
/// struct ClientError;
///
/// #[derive(Debug)]
/// struct ValidationError { field: String }
///
/// impl std::fmt::Display for ValidationError {
///     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
///         write!(f, "invalid value for {}", self.field)
///     }
/// }
///
/// impl std::error::Error for ValidationError {}
///
/// impl ResolvableError for ValidationError {
///     fn ancestry(&self) -> Vec<ErrorType> {
///         vec![ErrorType::of::<Self>(), ErrorType::of::<ClientError>()]
///     }
///
///     fn as_any(&self) -> &dyn std::any::Any {
///         self
///     }
/// }
/// ```
pub trait ResolvableError: std::error::Error + Send + Sync + 'static {
    /// Type chain for translator lookup, most specific first, starting with
    /// the error's own type.
    fn ancestry(&self) -> Vec<ErrorType>;

    /// Concrete-type access for downcasting translators.
    fn as_any(&self) -> &dyn Any;
}

/// Converts one family of errors into a structured response. Stateless and
/// shared across concurrent requests; owned by the registry.
pub trait Translator: Send + Sync {
    fn translate(
        &self,
        error: &dyn ResolvableError,
        request: &RequestContext,
    ) -> Result<ResponseModel, TranslateError>;
}

/// Adapter for closures operating on the error through the trait object.
/// Suitable for supertype registrations, which receive subtype instances.
pub(crate) struct FnTranslator<F>(pub(crate) F);

impl<F> Translator for FnTranslator<F>
where
    F: Fn(&dyn ResolvableError, &RequestContext) -> ResponseModel + Send + Sync,
{
    fn translate(
        &self,
        error: &dyn ResolvableError,
        request: &RequestContext,
    ) -> Result<ResponseModel, TranslateError> {
        Ok((self.0)(error, request))
    }
}

/// Adapter for closures over one concrete error type. Fails with
/// `TranslateError::TypeMismatch` when resolution hands it a different
/// concrete type, so it is only appropriate for exact-type registrations.
pub(crate) struct TypedTranslator<E, F> {
    translate: F,
    _marker: PhantomData<fn(&E)>,
}

impl<E, F> TypedTranslator<E, F> {
    pub(crate) fn new(translate: F) -> Self {
        Self {
            translate,
            _marker: PhantomData,
        }
    }
}

impl<E, F> Translator for TypedTranslator<E, F>
where
    E: ResolvableError,
    F: Fn(&E, &RequestContext) -> ResponseModel + Send + Sync,
{
    fn translate(
        &self,
        error: &dyn ResolvableError,
        request: &RequestContext,
    ) -> Result<ResponseModel, TranslateError> {
        let typed = error
            .as_any()
            .downcast_ref::<E>()
            .ok_or_else(|| TranslateError::TypeMismatch {
                expected: type_name::<E>(),
                actual: error
                    .ancestry()
                    .first()
                    .map(ErrorType::name)
                    .unwrap_or("unknown"),
            })?;
        Ok((self.translate)(typed, request))
    }
}

#[cfg(test)]
pub(crate) mod test_errors {
    //! A small error hierarchy shared by unit tests:
    //! `FieldValidationError < ValidationError < ClientError`.

    use super::{ErrorType, ResolvableError};
    use std::any::Any;
    use std::fmt;

    #[derive(Debug)]
    pub struct ClientError;

    #[derive(Debug)]
    pub struct ValidationError {
        pub message: String,
    }

    #[derive(Debug)]
    pub struct FieldValidationError {
        pub field: String,
    }

    #[derive(Debug)]
    pub struct TimeoutError;

    impl fmt::Display for ValidationError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "validation failed: {}", self.message)
        }
    }

    impl fmt::Display for FieldValidationError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "invalid value for field {}", self.field)
        }
    }

    impl fmt::Display for TimeoutError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("request timed out")
        }
    }

    impl std::error::Error for ValidationError {}
    impl std::error::Error for FieldValidationError {}
    impl std::error::Error for TimeoutError {}

    impl ResolvableError for ValidationError {
        fn ancestry(&self) -> Vec<ErrorType> {
            vec![ErrorType::of::<Self>(), ErrorType::of::<ClientError>()]
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    impl ResolvableError for FieldValidationError {
        fn ancestry(&self) -> Vec<ErrorType> {
            vec![
                ErrorType::of::<Self>(),
                ErrorType::of::<ValidationError>(),
                ErrorType::of::<ClientError>(),
            ]
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    impl ResolvableError for TimeoutError {
        fn ancestry(&self) -> Vec<ErrorType> {
            vec![ErrorType::of::<Self>()]
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    }
}
