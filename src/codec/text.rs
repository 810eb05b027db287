use bytes::Bytes;
use serde_json::Value;

use super::BodyCodec;
use crate::errors::CodecError;
use crate::negotiation::MediaType;

/// `text/plain` codec. Strings render verbatim, everything else as compact
/// JSON so structured bodies stay legible to curl users.
pub struct TextCodec {
    media_type: MediaType,
}

impl TextCodec {
    pub fn new() -> Self {
        Self {
            media_type: MediaType::text_plain(),
        }
    }
}

impl Default for TextCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl BodyCodec for TextCodec {
    fn media_type(&self) -> &MediaType {
        &self.media_type
    }

    fn encode(&self, body: &Value) -> Result<Bytes, CodecError> {
        let text = match body {
            Value::Null => String::new(),
            Value::String(s) => s.clone(),
            other => serde_json::to_string(other)?,
        };
        Ok(Bytes::from(text))
    }
}
