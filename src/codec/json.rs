use bytes::Bytes;
use serde_json::Value;

use super::BodyCodec;
use crate::errors::CodecError;
use crate::negotiation::MediaType;

/// `application/json` codec backed by `serde_json`.
pub struct JsonCodec {
    media_type: MediaType,
}

impl JsonCodec {
    pub fn new() -> Self {
        Self {
            media_type: MediaType::application_json(),
        }
    }
}

impl Default for JsonCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl BodyCodec for JsonCodec {
    fn media_type(&self) -> &MediaType {
        &self.media_type
    }

    fn encode(&self, body: &Value) -> Result<Bytes, CodecError> {
        Ok(Bytes::from(serde_json::to_vec(body)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_encode_object() {
        let codec = JsonCodec::new();
        let bytes = codec
            .encode(&json!({ "code": "NOT_FOUND", "message": "missing" }))
            .unwrap();
        let round_trip: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(round_trip["code"], "NOT_FOUND");
    }
}
