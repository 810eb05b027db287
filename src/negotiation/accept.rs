use axum::http::{header, HeaderMap};

use super::media_type::MediaType;

/// Quality weights are kept in thousandths so entries sort without float
/// comparisons. `q=0.5` parses to 500.
const DEFAULT_QUALITY: u16 = 1000;

/// Parse the `Accept` header(s) into media ranges ordered by preference:
/// quality weight first, then specificity for equally-weighted entries.
///
/// Lenient on purpose, like the parsers browsers are written against:
/// malformed entries are skipped rather than failing the whole header, and
/// `q=0` entries are dropped. A missing or empty header yields `*/*`; a
/// header that was present but whose entries were all refused or
/// unparseable yields an empty list, since "accepts anything" and "refused
/// everything it named" must negotiate differently.
pub fn parse_accept(headers: &HeaderMap) -> Vec<MediaType> {
    let mut entries: Vec<(MediaType, u16)> = Vec::new();
    let mut saw_entry = false;

    for value in headers.get_all(header::ACCEPT) {
        let Ok(value) = value.to_str() else {
            continue;
        };
        for entry in value.split(',') {
            if entry.trim().is_empty() {
                continue;
            }
            saw_entry = true;
            let Some((media, quality)) = parse_entry(entry) else {
                continue;
            };
            if quality == 0 {
                continue;
            }
            entries.push((media, quality));
        }
    }

    if entries.is_empty() {
        return if saw_entry {
            Vec::new()
        } else {
            vec![MediaType::any()]
        };
    }

    entries.sort_by(|(a, qa), (b, qb)| {
        qb.cmp(qa)
            .then_with(|| b.specificity().cmp(&a.specificity()))
    });
    entries.into_iter().map(|(media, _)| media).collect()
}

/// Parse a single Accept list entry such as `application/json;q=0.8`.
fn parse_entry(entry: &str) -> Option<(MediaType, u16)> {
    let mut parts = entry.split(';');
    let media = MediaType::parse(parts.next()?).ok()?;

    let mut quality = DEFAULT_QUALITY;
    for param in parts {
        let Some((name, value)) = param.split_once('=') else {
            continue;
        };
        if name.trim().eq_ignore_ascii_case("q") {
            quality = parse_quality(value.trim())?;
            break;
        }
    }
    Some((media, quality))
}

fn parse_quality(value: &str) -> Option<u16> {
    let quality: f32 = value.parse().ok()?;
    if !(0.0..=1.0).contains(&quality) {
        return None;
    }
    Some((quality * 1000.0).round() as u16)
}
