//! JSON pretty-printer
//!
//! Parses the whole input and re-serializes it with a two-space indent,
//! tagging every emitted piece with a token category. Input that does not
//! parse comes back as a single Default piece.
//!
//! Each level is kept as raw JSON until it is written, so number text comes
//! out exactly as it was typed.

use std::fmt;

use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use serde_json::value::RawValue;
use tracing::debug;

use super::tokens::TokenType;

const INDENT: &str = "  ";

/// Pieces of a formatted document, in output order
pub type JsonPieces = Vec<(TokenType, String)>;

/// Object members in source order with their values left unparsed
///
/// A repeated key keeps its first position and takes the last value.
struct Members(Vec<(String, Box<RawValue>)>);

impl<'de> Deserialize<'de> for Members {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct MembersVisitor;

        impl<'de> Visitor<'de> for MembersVisitor {
            type Value = Members;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a JSON object")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Members, A::Error> {
                let mut members: Vec<(String, Box<RawValue>)> = Vec::new();
                while let Some((key, value)) = map.next_entry::<String, Box<RawValue>>()? {
                    match members.iter_mut().find(|(existing, _)| *existing == key) {
                        Some(slot) => slot.1 = value,
                        None => members.push((key, value)),
                    }
                }
                Ok(Members(members))
            }
        }

        deserializer.deserialize_map(MembersVisitor)
    }
}

/// Format `text` as indented JSON
///
/// Returns `None` when the input is not valid JSON.
pub fn format_json(text: &str) -> Option<JsonPieces> {
    let formatted = serde_json::from_str::<Box<RawValue>>(text).and_then(|raw| {
        let mut pieces = Vec::new();
        write_value(&raw, 0, &mut pieces)?;
        Ok(pieces)
    });
    match formatted {
        Ok(pieces) => Some(pieces),
        Err(err) => {
            debug!(error = %err, len = text.len(), "JSON parse failed, highlighting as plain text");
            None
        }
    }
}

fn push(pieces: &mut JsonPieces, token_type: TokenType, text: impl Into<String>) {
    pieces.push((token_type, text.into()));
}

fn push_indent(pieces: &mut JsonPieces, level: usize) {
    if level > 0 {
        push(pieces, TokenType::Default, INDENT.repeat(level));
    }
}

fn quoted(text: &str) -> String {
    serde_json::to_string(text).unwrap_or_else(|_| format!("\"{text}\""))
}

fn write_value(raw: &RawValue, level: usize, pieces: &mut JsonPieces) -> serde_json::Result<()> {
    let text = raw.get().trim();
    match text.as_bytes().first() {
        Some(b'{') => {
            let Members(members) = serde_json::from_str(text)?;
            if members.is_empty() {
                push(pieces, TokenType::Default, "{}");
                return Ok(());
            }
            push(pieces, TokenType::Default, "{\n");
            for (i, (key, item)) in members.iter().enumerate() {
                if i > 0 {
                    push(pieces, TokenType::Default, ",\n");
                }
                push_indent(pieces, level + 1);
                push(pieces, TokenType::PropertyName, quoted(key));
                push(pieces, TokenType::Default, ": ");
                write_value(item, level + 1, pieces)?;
            }
            push(pieces, TokenType::Default, "\n");
            push_indent(pieces, level);
            push(pieces, TokenType::Default, "}");
        }
        Some(b'[') => {
            let items: Vec<Box<RawValue>> = serde_json::from_str(text)?;
            if items.is_empty() {
                push(pieces, TokenType::Default, "[]");
                return Ok(());
            }
            push(pieces, TokenType::Default, "[\n");
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    push(pieces, TokenType::Default, ",\n");
                }
                push_indent(pieces, level + 1);
                write_value(item, level + 1, pieces)?;
            }
            push(pieces, TokenType::Default, "\n");
            push_indent(pieces, level);
            push(pieces, TokenType::Default, "]");
        }
        Some(b'"') => {
            let value: String = serde_json::from_str(text)?;
            push(pieces, TokenType::String, quoted(&value));
        }
        // true, false and null
        Some(b't' | b'f' | b'n') => push(pieces, TokenType::Boolean, text),
        _ => push(pieces, TokenType::Number, text),
    }
    Ok(())
}
