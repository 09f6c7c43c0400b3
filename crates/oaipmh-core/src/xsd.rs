//! # anyURI Schema Check
//!
//! Validates a candidate string as an XML Schema `anyURI` the way a schema
//! validator sees it: the candidate is placed into a generated one-element
//! XML document, the document is read back, and the element value is then
//! checked against the `anyURI` datatype.
//!
//! ## Security Invariant
//!
//! The candidate is written as escaped *text content* through the XML
//! writer, never concatenated into markup. A value such as
//! `x</uri><uri>y` therefore stays a single text node and cannot change
//! the shape of the document it is checked in.
//!
//! Every failure (unwritable document, unreadable document, altered value,
//! datatype violation) surfaces as [`ValidationError::InvalidAnyUri`]. XML
//! library error types do not leave this module.

use std::io::Cursor;

use once_cell::sync::Lazy;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use regex::Regex;

use crate::error::ValidationError;
use crate::macros::{matches, Pattern};

/// Element that carries the candidate value.
const ELEMENT: &str = "uri";

/// Namespace of the generated check document.
const NAMESPACE: &str = "urn:oaipmh:schema:anyURI";

static SCHEME: Pattern = Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*$").ok());

/// Validate `value` as an XML Schema `anyURI`.
pub(crate) fn validate_any_uri(value: &str) -> Result<(), ValidationError> {
    check(value).map_err(|reason| {
        tracing::trace!(value, %reason, "anyURI check failed");
        ValidationError::InvalidAnyUri {
            value: value.to_string(),
            reason,
        }
    })
}

fn check(value: &str) -> Result<(), String> {
    if let Some(c) = value.chars().find(|c| !is_xml_char(*c)) {
        return Err(format!(
            "character U+{:04X} is not allowed in an XML document",
            u32::from(c)
        ));
    }

    let document = build_document(value)?;
    let text = read_element_text(&document)?;
    if text != value {
        return Err("value was altered by the XML round trip".to_string());
    }

    check_datatype(&collapse_whitespace(&text))
}

/// Produce `<?xml ...?><uri xmlns="...">VALUE</uri>` with VALUE escaped.
fn build_document(value: &str) -> Result<String, String> {
    let mut writer = Writer::new(Cursor::new(Vec::new()));
    let start = BytesStart::new(ELEMENT).with_attributes([("xmlns", NAMESPACE)]);

    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(|e| format!("cannot write document: {e}"))?;
    writer
        .write_event(Event::Start(start))
        .map_err(|e| format!("cannot write document: {e}"))?;
    writer
        .write_event(Event::Text(BytesText::new(value)))
        .map_err(|e| format!("cannot write document: {e}"))?;
    writer
        .write_event(Event::End(BytesEnd::new(ELEMENT)))
        .map_err(|e| format!("cannot write document: {e}"))?;

    String::from_utf8(writer.into_inner().into_inner())
        .map_err(|e| format!("document is not UTF-8: {e}"))
}

/// Read the generated document back and return the unescaped value of its
/// single root element. Any other element, CDATA, comment or processing
/// instruction means the document does not have the expected shape.
fn read_element_text(document: &str) -> Result<String, String> {
    let mut reader = Reader::from_str(document);
    let mut depth = 0usize;
    let mut roots = 0usize;
    let mut text = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Decl(_)) => {}
            Ok(Event::Start(e)) => {
                if depth > 0 || e.name().as_ref() != ELEMENT.as_bytes() {
                    return Err("unexpected element in document".to_string());
                }
                depth += 1;
                roots += 1;
            }
            Ok(Event::Empty(e)) => {
                if depth > 0 || e.name().as_ref() != ELEMENT.as_bytes() {
                    return Err("unexpected element in document".to_string());
                }
                roots += 1;
            }
            Ok(Event::End(_)) => {
                depth = depth.saturating_sub(1);
            }
            Ok(Event::Text(t)) => {
                if depth == 0 {
                    if t.iter().all(u8::is_ascii_whitespace) {
                        continue;
                    }
                    return Err("text outside the root element".to_string());
                }
                let unescaped = t
                    .unescape()
                    .map_err(|e| format!("cannot unescape element value: {e}"))?;
                text.push_str(&unescaped);
            }
            Ok(Event::Eof) => break,
            Ok(_) => return Err("unexpected markup in document".to_string()),
            Err(e) => return Err(format!("document is not well-formed: {e}")),
        }
    }

    if roots != 1 || depth != 0 {
        return Err("document must contain exactly one root element".to_string());
    }
    Ok(text)
}

/// The `collapse` whitespace facet that `anyURI` applies before lexical
/// checking: tabs and line breaks become spaces, runs collapse, ends trim.
fn collapse_whitespace(value: &str) -> String {
    value
        .split(|c: char| matches!(c, ' ' | '\t' | '\n' | '\r'))
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Lexical rules of `anyURI`: after escaping of disallowed characters the
/// value must be an RFC 3986 URI reference. Characters that would be
/// escaped (spaces, non-ASCII) are therefore accepted; malformed escapes,
/// a second fragment marker, a bad scheme and stray brackets are not.
fn check_datatype(value: &str) -> Result<(), String> {
    let bytes = value.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let valid = bytes.len() > i + 2
                && bytes[i + 1].is_ascii_hexdigit()
                && bytes[i + 2].is_ascii_hexdigit();
            if !valid {
                return Err(format!("malformed percent-escape at offset {i}"));
            }
            i += 3;
        } else {
            i += 1;
        }
    }

    if value.matches('#').count() > 1 {
        return Err("more than one fragment marker '#'".to_string());
    }

    let rest = match value.find([':', '/', '?', '#']) {
        Some(pos) if bytes[pos] == b':' => {
            let scheme = &value[..pos];
            if !matches(&SCHEME, scheme) {
                return Err(format!("invalid scheme {scheme:?}"));
            }
            &value[pos + 1..]
        }
        _ => value,
    };

    let (authority, remainder) = match rest.strip_prefix("//") {
        Some(after) => {
            let end = after.find(['/', '?', '#']).unwrap_or(after.len());
            (&after[..end], &after[end..])
        }
        None => ("", rest),
    };

    if remainder.contains(['[', ']']) {
        return Err("brackets are only allowed around an IP literal host".to_string());
    }
    if authority.contains(['[', ']']) {
        let host = authority.rsplit('@').next().unwrap_or(authority);
        let well_formed = host.starts_with('[')
            && host.matches('[').count() == 1
            && host.matches(']').count() == 1
            && host
                .find(']')
                .is_some_and(|end| host[end + 1..].is_empty() || host[end + 1..].starts_with(':'));
        if !well_formed {
            return Err("malformed IP literal host".to_string());
        }
    }

    Ok(())
}

/// The XML 1.0 `Char` production.
fn is_xml_char(c: char) -> bool {
    matches!(c,
        '\u{9}' | '\u{A}' | '\u{D}'
        | '\u{20}'..='\u{D7FF}'
        | '\u{E000}'..='\u{FFFD}'
        | '\u{10000}'..='\u{10FFFF}')
}
