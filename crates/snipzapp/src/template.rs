//! # Placeholders
//!
//! A script value may contain `{{name}}` markers. Before a templated script is
//! copied, each distinct name is asked for once and the answers are substituted
//! into the value.
//!
//! Scanning rules:
//! - Markers are found left to right: the first `{{`, then the next `}}`.
//!   Whatever lies between is the name. There is no nesting, so
//!   `{{a{{b}}` names a single placeholder `a{{b`.
//! - An unterminated `{{` ends the scan. Everything before it still counts.
//! - Empty markers (`{{}}`) are left alone.
//!
//! [`render`] walks the text with the same scanner ([`segments`]), so extraction and
//! substitution always agree on where markers are. Substituted text is never
//! re-scanned, and markers without a binding are kept verbatim.

use std::collections::HashMap;

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// Name -> replacement text.
pub type Bindings = HashMap<String, String>;

/// A run of a script value: literal text, or a complete `{{name}}` marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    Text(&'a str),
    Marker { name: &'a str, raw: &'a str },
}

/// Splits `value` into literal text and well-formed markers, in order.
/// Concatenating every segment's text (or `raw`) gives back `value`.
pub fn segments(value: &str) -> Vec<Segment<'_>> {
    let mut out = Vec::new();
    let mut rest = value;

    while let Some(start) = rest.find(OPEN) {
        let after_open = &rest[start + OPEN.len()..];
        let Some(end) = after_open.find(CLOSE) else {
            break;
        };
        if start > 0 {
            out.push(Segment::Text(&rest[..start]));
        }
        let raw_len = OPEN.len() + end + CLOSE.len();
        out.push(Segment::Marker {
            name: &after_open[..end],
            raw: &rest[start..start + raw_len],
        });
        rest = &rest[start + raw_len..];
    }

    if !rest.is_empty() {
        out.push(Segment::Text(rest));
    }
    out
}

/// Distinct placeholder names in first-occurrence order.
pub fn extract_placeholders(value: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for segment in segments(value) {
        if let Segment::Marker { name, .. } = segment {
            if !name.is_empty() && !names.iter().any(|n| n == name) {
                names.push(name.to_string());
            }
        }
    }
    names
}

pub fn has_placeholders(value: &str) -> bool {
    !extract_placeholders(value).is_empty()
}

/// Substitutes bound placeholders. Never fails; unbound markers stay as written.
pub fn render(value: &str, bindings: &Bindings) -> String {
    let mut out = String::with_capacity(value.len());
    for segment in segments(value) {
        match segment {
            Segment::Text(text) => out.push_str(text),
            Segment::Marker { name, raw } => match bindings.get(name) {
                Some(replacement) if !name.is_empty() => out.push_str(replacement),
                _ => out.push_str(raw),
            },
        }
    }
    out
}
