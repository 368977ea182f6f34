//! Response Extractor: recovers a JSON payload from free-form model output.
//!
//! Tier 1: strict parse of the trimmed text.
//! Tier 2: strict parse of the first balanced bracket region. Runs when tier 1
//!         fails to parse, and also when it parses to the wrong shape (an
//!         object wrapping the expected array, say). Only the first region is
//!         tried; later regions are never considered.
//!
//! Never errors. Callers get `Extraction::Unrecoverable` and pick a default.

use serde_json::Value;
use tracing::debug;

/// Top-level JSON shape a task expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonShape {
    Array,
    Object,
}

impl JsonShape {
    fn delimiters(self) -> (char, char) {
        match self {
            JsonShape::Array => ('[', ']'),
            JsonShape::Object => ('{', '}'),
        }
    }

    fn matches(self, value: &Value) -> bool {
        match self {
            JsonShape::Array => value.is_array(),
            JsonShape::Object => value.is_object(),
        }
    }
}

/// Which recovery stage produced the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseTier {
    Strict,
    BracketScan,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Extraction {
    Parsed { value: Value, tier: ParseTier },
    Unrecoverable,
}

impl Extraction {
    pub fn into_value(self) -> Option<Value> {
        match self {
            Extraction::Parsed { value, .. } => Some(value),
            Extraction::Unrecoverable => None,
        }
    }
}

/// Extracts a JSON value of the requested `shape` from raw model text.
pub fn extract_json(raw: &str, shape: JsonShape) -> Extraction {
    let trimmed = raw.trim();

    if let Some(value) = parse_shape(trimmed, shape) {
        return Extraction::Parsed {
            value,
            tier: ParseTier::Strict,
        };
    }

    debug!("Strict JSON parse failed for {shape:?}, scanning for bracketed region");

    match first_balanced_region(trimmed, shape).and_then(|region| parse_shape(region, shape)) {
        Some(value) => Extraction::Parsed {
            value,
            tier: ParseTier::BracketScan,
        },
        None => {
            debug!("No parseable {shape:?} found in model output");
            Extraction::Unrecoverable
        }
    }
}

fn parse_shape(text: &str, shape: JsonShape) -> Option<Value> {
    serde_json::from_str::<Value>(text)
        .ok()
        .filter(|value| shape.matches(value))
}

/// Returns the first region that opens with the shape's bracket and closes
/// at matching depth. Brackets inside JSON string literals are ignored.
fn first_balanced_region(text: &str, shape: JsonShape) -> Option<&str> {
    let (open, close) = shape.delimiters();
    let start = text.find(open)?;

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text[start..].char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match ch {
            '"' => in_string = true,
            c if c == open => depth += 1,
            c if c == close => {
                depth -= 1;
                if depth == 0 {
                    let end = start + offset + ch.len_utf8();
                    return Some(&text[start..end]);
                }
            }
            _ => {}
        }
    }

    None
}
