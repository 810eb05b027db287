//! Content-negotiated HTTP error responses for axum services.
//!
//! When a handler raises an error, [`resolver::ErrorResolver`] walks the
//! error's type ancestry to the most specific registered translator, asks it
//! for a structured response model, and writes the model with a codec chosen
//! by content negotiation against the client's `Accept` header, falling back
//! to a fixed default media type when negotiation fails.

pub mod codec;
pub mod errors;
pub mod middleware;
pub mod negotiation;
pub mod request;
pub mod resolver;
pub mod response;
pub mod translator;

pub use codec::{BodyCodec, CodecRegistry, JsonCodec, TextCodec, XmlCodec};
pub use middleware::{resolve_errors, Caught};
pub use negotiation::MediaType;
pub use request::{ProducibleMediaTypes, RequestContext};
pub use resolver::{ErrorResolver, ErrorResolverBuilder, Outcome};
pub use response::ResponseModel;
pub use translator::{ErrorType, ResolvableError, Translator};
