use axum::body::Body;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::Response;
use bytes::Bytes;
use tracing::debug;

use crate::codec::CodecRegistry;
use crate::errors::WriteError;
use crate::negotiation::{MediaType, NegotiationContext};
use crate::request::RequestContext;
use crate::response::ResponseModel;

/// Negotiation phase. One transition: a miss in `Primary` moves to
/// `Fallback`, where only the configured default media type is offered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Primary,
    Fallback,
}

/// Writes a response model to the wire using a codec selected by content
/// negotiation, falling back to a fixed media type when the client's
/// preferences match nothing.
pub struct ResponseWriter {
    codecs: CodecRegistry,
    default_media_type: MediaType,
}

impl ResponseWriter {
    pub(crate) fn new(codecs: CodecRegistry, default_media_type: MediaType) -> Self {
        Self {
            codecs,
            default_media_type,
        }
    }

    pub fn codecs(&self) -> &CodecRegistry {
        &self.codecs
    }

    pub fn default_media_type(&self) -> &MediaType {
        &self.default_media_type
    }

    /// Negotiate a codec and render the model as a complete response.
    ///
    /// Primary candidates are the model's declared Content-Type when present,
    /// otherwise the request's acceptable types. A negotiation miss retries
    /// once against the default media type; any codec failure is final.
    pub fn write(
        &self,
        model: &ResponseModel,
        request: &RequestContext,
    ) -> Result<Response, WriteError> {
        let negotiation =
            NegotiationContext::from_request(request, self.default_media_type.clone());
        let declared = model.declared_content_type().map(|media| [media]);
        let primary: &[MediaType] = declared
            .as_ref()
            .map(|d| d.as_slice())
            .unwrap_or_else(|| negotiation.acceptable());
        let fallback = [negotiation.fallback().clone()];

        let mut phase = Phase::Primary;
        let codec = loop {
            let candidates: &[MediaType] = match phase {
                Phase::Primary => primary,
                Phase::Fallback => &fallback,
            };

            match self.codecs.negotiate(candidates) {
                Some(codec) => break codec,
                None => match phase {
                    Phase::Primary => {
                        debug!(
                            requested = %join(candidates),
                            fallback = %negotiation.fallback(),
                            "Requested media type is not supported, falling back to default one"
                        );
                        phase = Phase::Fallback;
                    }
                    Phase::Fallback => {
                        return Err(WriteError::NotAcceptable {
                            requested: join(primary),
                        });
                    }
                },
            }
        };

        let bytes = match model.body() {
            Some(body) => codec.encode(body)?,
            None => Bytes::new(),
        };

        let mut response = Response::new(Body::from(bytes));
        *response.status_mut() = model.status();
        for (name, value) in model.headers() {
            response.headers_mut().append(name.clone(), value.clone());
        }
        response.headers_mut().insert(
            header::CONTENT_TYPE,
            HeaderValue::from_str(&codec.media_type().to_string())?,
        );
        Ok(response)
    }
}

/// Response carrying only a status line, used when body writing was
/// abandoned and the pipeline proceeds with whatever is already set.
pub(crate) fn status_only(status: StatusCode) -> Response {
    let mut response = Response::new(Body::empty());
    *response.status_mut() = status;
    response
}

fn join(media_types: &[MediaType]) -> String {
    media_types
        .iter()
        .map(MediaType::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{JsonCodec, XmlCodec};
    use axum::http::{HeaderMap, HeaderName, Method, Uri};
    use serde_json::json;

    fn request_with_accept(value: Option<&str>) -> RequestContext {
        let mut headers = HeaderMap::new();
        if let Some(value) = value {
            headers.insert(header::ACCEPT, HeaderValue::from_str(value).unwrap());
        }
        RequestContext::new(Method::GET, Uri::from_static("/"), headers)
    }

    fn writer() -> ResponseWriter {
        ResponseWriter::new(CodecRegistry::with_defaults(), MediaType::application_xml())
    }

    fn content_type(response: &Response) -> &str {
        response
            .headers()
            .get(header::CONTENT_TYPE)
            .unwrap()
            .to_str()
            .unwrap()
    }

    #[test]
    fn test_accept_match_uses_requested_codec() {
        let model = ResponseModel::new(StatusCode::NOT_FOUND).with_body(json!({ "code": 404 }));
        let response = writer()
            .write(&model, &request_with_accept(Some("application/json")))
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(content_type(&response), "application/json");
    }

    #[test]
    fn test_accept_miss_falls_back_to_default() {
        let model = ResponseModel::new(StatusCode::BAD_REQUEST).with_body(json!({ "code": 400 }));
        let response = writer()
            .write(&model, &request_with_accept(Some("image/png")))
            .unwrap();
        assert_eq!(content_type(&response), "application/xml");
    }

    #[test]
    fn test_all_refused_accept_takes_fallback() {
        // Refusing the only type named is not the same as accepting
        // anything: JSON must not be served, the fallback type must be.
        let model = ResponseModel::new(StatusCode::BAD_REQUEST).with_body(json!({ "code": 400 }));
        let response = writer()
            .write(&model, &request_with_accept(Some("application/json;q=0")))
            .unwrap();
        assert_eq!(content_type(&response), "application/xml");
    }

    #[test]
    fn test_not_acceptable_reports_declared_type() {
        // Primary miss caused by a declared Content-Type pin: the
        // diagnostic names the pinned type, not the Accept list.
        let writer = ResponseWriter::new(
            CodecRegistry::new(vec![Box::new(JsonCodec::new())]),
            MediaType::application_xml(),
        );
        let model = ResponseModel::new(StatusCode::BAD_REQUEST)
            .with_header(
                header::CONTENT_TYPE,
                HeaderValue::from_static("text/csv"),
            )
            .with_body(json!({}));
        let error = writer
            .write(&model, &request_with_accept(Some("application/json")))
            .unwrap_err();
        assert!(error.to_string().contains("text/csv"));
        assert!(!error.to_string().contains("application/json"));
    }

    #[test]
    fn test_fallback_miss_is_not_acceptable() {
        let writer = ResponseWriter::new(
            CodecRegistry::new(vec![Box::new(JsonCodec::new())]),
            MediaType::application_xml(),
        );
        let model = ResponseModel::new(StatusCode::BAD_REQUEST).with_body(json!({}));
        let result = writer.write(&model, &request_with_accept(Some("image/png")));
        assert!(matches!(result, Err(WriteError::NotAcceptable { .. })));
    }

    #[test]
    fn test_declared_content_type_pins_negotiation() {
        let model = ResponseModel::new(StatusCode::BAD_REQUEST)
            .with_header(
                header::CONTENT_TYPE,
                HeaderValue::from_static("application/xml"),
            )
            .with_body(json!({ "code": 400 }));
        // Client asks for JSON, but the translator pinned XML.
        let response = writer()
            .write(&model, &request_with_accept(Some("application/json")))
            .unwrap();
        assert_eq!(content_type(&response), "application/xml");
    }

    #[test]
    fn test_producible_hint_narrows_negotiation() {
        let mut request = request_with_accept(Some("application/json"));
        request.set_producible_media_types(vec![MediaType::application_xml()]);
        let model = ResponseModel::new(StatusCode::BAD_REQUEST).with_body(json!({}));
        let response = writer().write(&model, &request).unwrap();
        assert_eq!(content_type(&response), "application/xml");
    }

    #[test]
    fn test_model_headers_carried_over() {
        let model = ResponseModel::new(StatusCode::TOO_MANY_REQUESTS)
            .with_header(
                HeaderName::from_static("retry-after"),
                HeaderValue::from_static("30"),
            )
            .with_body(json!({ "code": 429 }));
        let response = writer()
            .write(&model, &request_with_accept(None))
            .unwrap();
        assert_eq!(response.headers().get("retry-after").unwrap(), "30");
    }

    #[test]
    fn test_empty_body_still_negotiates() {
        let model = ResponseModel::new(StatusCode::NO_CONTENT);
        let response = writer()
            .write(&model, &request_with_accept(Some("application/json")))
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert_eq!(content_type(&response), "application/json");
    }

    #[test]
    fn test_custom_codec_priority() {
        // Two codecs produce XML; the first registered wins the wildcard.
        let writer = ResponseWriter::new(
            CodecRegistry::new(vec![
                Box::new(XmlCodec::new("error")),
                Box::new(XmlCodec::new("problem")),
            ]),
            MediaType::application_xml(),
        );
        let model = ResponseModel::new(StatusCode::BAD_REQUEST).with_body(json!("boom"));
        let response = writer.write(&model, &request_with_accept(None)).unwrap();
        assert_eq!(content_type(&response), "application/xml");
    }
}
