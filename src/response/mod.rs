//! Structured representation of an error response, produced by translators
//! and consumed by the response writer.

use axum::http::{header, HeaderMap, HeaderName, HeaderValue, StatusCode};
use serde_json::Value;

use crate::negotiation::MediaType;

/// Status, headers and an opaque body value. The body stays a
/// [`serde_json::Value`] until a codec renders it for the negotiated media
/// type. Immutable once handed to the writer.
#[derive(Debug, Clone)]
pub struct ResponseModel {
    status: StatusCode,
    headers: HeaderMap,
    body: Option<Value>,
}

impl ResponseModel {
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: None,
        }
    }

    /// Append a header. Multi-valued headers accumulate.
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.append(name, value);
        self
    }

    pub fn with_body(mut self, body: impl Into<Value>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }

    /// Content type declared by the translator, if any. When set it pins
    /// negotiation to that single type instead of the client's preferences.
    pub(crate) fn declared_content_type(&self) -> Option<MediaType> {
        let value = self.headers.get(header::CONTENT_TYPE)?;
        MediaType::parse(value.to_str().ok()?).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_builder_accumulates_headers() {
        let model = ResponseModel::new(StatusCode::NOT_FOUND)
            .with_header(
                HeaderName::from_static("x-error-code"),
                HeaderValue::from_static("CARD_NOT_FOUND"),
            )
            .with_header(
                HeaderName::from_static("x-error-code"),
                HeaderValue::from_static("SECONDARY"),
            )
            .with_body(json!({ "message": "not found" }));

        assert_eq!(model.status(), StatusCode::NOT_FOUND);
        assert_eq!(model.headers().get_all("x-error-code").iter().count(), 2);
        assert_eq!(model.body().unwrap()["message"], "not found");
    }

    #[test]
    fn test_declared_content_type() {
        let model = ResponseModel::new(StatusCode::BAD_REQUEST).with_header(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json; charset=utf-8"),
        );
        assert_eq!(
            model.declared_content_type(),
            Some(MediaType::application_json())
        );

        let bare = ResponseModel::new(StatusCode::BAD_REQUEST);
        assert_eq!(bare.declared_content_type(), None);
    }
}
