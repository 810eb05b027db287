//! Media types and Accept-header content negotiation.

mod accept;
mod media_type;

pub use accept::parse_accept;
pub use media_type::MediaType;

use crate::request::RequestContext;

/// Per-request negotiation input: the client's acceptable media ranges in
/// preference order, plus the configured fallback type. Built for one write
/// and discarded.
#[derive(Debug, Clone)]
pub struct NegotiationContext {
    acceptable: Vec<MediaType>,
    fallback: MediaType,
}

impl NegotiationContext {
    /// Derive the acceptable types from the request: the producible hint
    /// wins when present (upstream routing already narrowed the candidates),
    /// otherwise the parsed `Accept` header. No header means `*/*`.
    pub fn from_request(request: &RequestContext, fallback: MediaType) -> Self {
        let acceptable = match request.producible_media_types() {
            Some(producible) if !producible.is_empty() => producible.to_vec(),
            _ => parse_accept(request.headers()),
        };
        Self {
            acceptable,
            fallback,
        }
    }

    pub fn acceptable(&self) -> &[MediaType] {
        &self.acceptable
    }

    pub fn fallback(&self) -> &MediaType {
        &self.fallback
    }
}
