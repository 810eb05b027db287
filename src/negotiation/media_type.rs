use std::fmt;
use std::str::FromStr;

use crate::errors::MediaTypeError;

/// A `type/subtype` media type, normalized to lowercase.
///
/// Either component may be the wildcard `*`, making the value a media range
/// usable for matching (`*/*`, `application/*`). Parameters present in a
/// parsed value (e.g. `;charset=utf-8`) are discarded; negotiation here
/// operates on the type pair only.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MediaType {
    kind: String,
    subtype: String,
}

impl MediaType {
    /// Build a media type from its two components, lowercasing both.
    pub fn new(kind: impl Into<String>, subtype: impl Into<String>) -> Self {
        Self {
            kind: kind.into().to_ascii_lowercase(),
            subtype: subtype.into().to_ascii_lowercase(),
        }
    }

    /// `application/json`
    pub fn application_json() -> Self {
        Self::new("application", "json")
    }

    /// `application/xml`
    pub fn application_xml() -> Self {
        Self::new("application", "xml")
    }

    /// `text/plain`
    pub fn text_plain() -> Self {
        Self::new("text", "plain")
    }

    /// `*/*`
    pub fn any() -> Self {
        Self::new("*", "*")
    }

    /// Parse a media type, tolerating surrounding whitespace and dropping
    /// any parameters after the first `;`.
    pub fn parse(value: &str) -> Result<Self, MediaTypeError> {
        let invalid = || MediaTypeError::Invalid {
            value: value.to_string(),
        };

        let essence = value.split(';').next().unwrap_or("").trim();
        let (kind, subtype) = essence.split_once('/').ok_or_else(invalid)?;
        let (kind, subtype) = (kind.trim(), subtype.trim());

        if kind.is_empty() || subtype.is_empty() {
            return Err(invalid());
        }
        // A wildcard type with a concrete subtype (`*/json`) is meaningless.
        if kind == "*" && subtype != "*" {
            return Err(invalid());
        }
        if [kind, subtype].iter().any(|part| {
            part.contains(|c: char| c.is_whitespace() || c == ',' || c == ';' || c == '/')
        }) {
            return Err(invalid());
        }

        Ok(Self::new(kind, subtype))
    }

    /// Primary type, e.g. `application`.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Subtype, e.g. `json`.
    pub fn subtype(&self) -> &str {
        &self.subtype
    }

    /// Whether neither component is a wildcard.
    pub fn is_concrete(&self) -> bool {
        self.kind != "*" && self.subtype != "*"
    }

    /// Whether this value, treated as a media range, covers `other`.
    ///
    /// `*/*` covers everything, `application/*` covers every `application`
    /// subtype, and a concrete type covers only itself.
    pub fn includes(&self, other: &MediaType) -> bool {
        if self.kind == "*" {
            return true;
        }
        if self.kind != other.kind {
            return false;
        }
        self.subtype == "*" || self.subtype == other.subtype
    }

    /// Matching precedence: concrete > subtype wildcard > full wildcard.
    /// Used to order equally-weighted Accept entries.
    pub(crate) fn specificity(&self) -> u8 {
        match (self.kind.as_str(), self.subtype.as_str()) {
            ("*", _) => 0,
            (_, "*") => 1,
            _ => 2,
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.kind, self.subtype)
    }
}

impl FromStr for MediaType {
    type Err = MediaTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
