//! Body codecs and the ordered codec registry.
//!
//! A codec renders an opaque body value as one concrete media type. The
//! registry's order is its priority: when several codecs could satisfy the
//! same acceptable range, the first registered one wins.

mod json;
mod text;
mod xml;

pub use json::JsonCodec;
pub use text::TextCodec;
pub use xml::XmlCodec;

use bytes::Bytes;
use serde_json::Value;

use crate::errors::CodecError;
use crate::negotiation::MediaType;

/// Serializes a response body as a single concrete media type.
pub trait BodyCodec: Send + Sync {
    /// The media type this codec produces. Must be concrete.
    fn media_type(&self) -> &MediaType;

    /// Encode the body value for the wire.
    fn encode(&self, body: &Value) -> Result<Bytes, CodecError>;
}

/// Ordered, read-only set of codecs. Built once at configuration time and
/// shared across concurrent requests.
pub struct CodecRegistry {
    codecs: Vec<Box<dyn BodyCodec>>,
}

impl CodecRegistry {
    pub fn new(codecs: Vec<Box<dyn BodyCodec>>) -> Self {
        Self { codecs }
    }

    /// The default codec set: JSON, XML, plain text, in that priority order.
    pub fn with_defaults() -> Self {
        Self::new(vec![
            Box::new(JsonCodec::new()),
            Box::new(XmlCodec::default()),
            Box::new(TextCodec::new()),
        ])
    }

    /// Find a codec for the highest-preference acceptable range that any
    /// codec can produce. Ranges are tried in the given order; within one
    /// range, codecs are tried in registration order.
    pub fn negotiate(&self, acceptable: &[MediaType]) -> Option<&dyn BodyCodec> {
        for range in acceptable {
            for codec in &self.codecs {
                if range.includes(codec.media_type()) {
                    return Some(codec.as_ref());
                }
            }
        }
        None
    }

    /// Produced media types in registration (priority) order.
    pub fn media_types(&self) -> Vec<MediaType> {
        self.codecs
            .iter()
            .map(|codec| codec.media_type().clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.codecs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codecs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negotiate_prefers_earlier_ranges() {
        let registry = CodecRegistry::with_defaults();
        let codec = registry
            .negotiate(&[MediaType::application_xml(), MediaType::application_json()])
            .unwrap();
        assert_eq!(codec.media_type(), &MediaType::application_xml());
    }

    #[test]
    fn test_negotiate_wildcard_uses_registration_order() {
        let registry = CodecRegistry::with_defaults();
        let codec = registry.negotiate(&[MediaType::any()]).unwrap();
        assert_eq!(codec.media_type(), &MediaType::application_json());
    }

    #[test]
    fn test_negotiate_subtype_wildcard() {
        let registry = CodecRegistry::with_defaults();
        let codec = registry.negotiate(&[MediaType::new("text", "*")]).unwrap();
        assert_eq!(codec.media_type(), &MediaType::text_plain());
    }

    #[test]
    fn test_negotiate_miss() {
        let registry = CodecRegistry::new(vec![Box::new(JsonCodec::new())]);
        assert!(registry.negotiate(&[MediaType::application_xml()]).is_none());
    }
}
