use bytes::Bytes;
use serde_json::Value;

use super::BodyCodec;
use crate::errors::CodecError;
use crate::negotiation::MediaType;

/// `application/xml` codec rendering a JSON value tree as XML elements.
///
/// Object keys become child elements, arrays become repeated `<item>`
/// elements, scalars become text content. Keys are sanitized into valid
/// element names rather than rejected, so any translator body serializes.
pub struct XmlCodec {
    media_type: MediaType,
    root: String,
}

impl XmlCodec {
    /// Codec with a custom root element name.
    pub fn new(root: impl Into<String>) -> Self {
        Self {
            media_type: MediaType::application_xml(),
            root: sanitize_name(&root.into()),
        }
    }

    pub fn root(&self) -> &str {
        &self.root
    }
}

impl Default for XmlCodec {
    fn default() -> Self {
        Self::new("response")
    }
}

impl BodyCodec for XmlCodec {
    fn media_type(&self) -> &MediaType {
        &self.media_type
    }

    fn encode(&self, body: &Value) -> Result<Bytes, CodecError> {
        let mut out = String::with_capacity(128);
        out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>");
        render_element(&mut out, &self.root, body);
        Ok(Bytes::from(out))
    }
}

fn render_element(out: &mut String, tag: &str, value: &Value) {
    match value {
        Value::Null => {
            out.push('<');
            out.push_str(tag);
            out.push_str("/>");
        }
        Value::Bool(b) => render_text(out, tag, if *b { "true" } else { "false" }),
        Value::Number(n) => render_text(out, tag, &n.to_string()),
        Value::String(s) => render_text(out, tag, s),
        Value::Array(items) => {
            out.push('<');
            out.push_str(tag);
            out.push('>');
            for item in items {
                render_element(out, "item", item);
            }
            out.push_str("</");
            out.push_str(tag);
            out.push('>');
        }
        Value::Object(map) => {
            out.push('<');
            out.push_str(tag);
            out.push('>');
            for (key, child) in map {
                render_element(out, &sanitize_name(key), child);
            }
            out.push_str("</");
            out.push_str(tag);
            out.push('>');
        }
    }
}

fn render_text(out: &mut String, tag: &str, text: &str) {
    out.push('<');
    out.push_str(tag);
    out.push('>');
    out.push_str(&escape(text));
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Coerce an arbitrary key into a valid XML element name.
fn sanitize_name(name: &str) -> String {
    let mut sanitized: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '.' {
                c
            } else {
                '_'
            }
        })
        .collect();

    let starts_ok = sanitized
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');

    if !starts_ok {
        sanitized.insert(0, '_');
    }
    sanitized
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn encode(value: Value) -> String {
        let codec = XmlCodec::default();
        String::from_utf8(codec.encode(&value).unwrap().to_vec()).unwrap()
    }

    #[test]
    fn test_object_rendering() {
        let xml = encode(json!({ "code": "NOT_FOUND", "status": 404 }));
        assert!(xml.contains("<response>"));
        assert!(xml.contains("<code>NOT_FOUND</code>"));
        assert!(xml.contains("<status>404</status>"));
        assert!(xml.ends_with("</response>"));
    }

    #[test]
    fn test_array_rendering() {
        let xml = encode(json!({ "errors": ["first", "second"] }));
        assert!(xml.contains("<errors><item>first</item><item>second</item></errors>"));
    }

    #[test]
    fn test_escaping() {
        let xml = encode(json!({ "message": "a < b & c > \"d\"" }));
        assert!(xml.contains("<message>a &lt; b &amp; c &gt; &quot;d&quot;</message>"));
    }

    #[test]
    fn test_null_and_bool() {
        let xml = encode(json!({ "detail": null, "retryable": false }));
        assert!(xml.contains("<detail/>"));
        assert!(xml.contains("<retryable>false</retryable>"));
    }

    #[test]
    fn test_key_sanitization() {
        let xml = encode(json!({ "bad key!": 1, "1st": 2 }));
        assert!(xml.contains("<bad_key_>1</bad_key_>"));
        assert!(xml.contains("<_1st>2</_1st>"));
    }

    #[test]
    fn test_custom_root() {
        let codec = XmlCodec::new("error");
        let xml =
            String::from_utf8(codec.encode(&json!("boom")).unwrap().to_vec()).unwrap();
        assert!(xml.contains("<error>boom</error>"));
    }
}
