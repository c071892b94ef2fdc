//! Query result ingestion
//!
//! Result rows arrive from the database as a tree of maps, lists and
//! scalars. Before they can be shown in JSON mode they are converted to a
//! JSON tree: binary values become base64 strings and attachments become a
//! small descriptor object.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::Serialize;
use serde_json::{Map, Number, Value};

use crate::error::Result;

/// Attachment metadata as reported by the database
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Attachment {
    pub content_type: Option<String>,
    pub length: Option<u64>,
    pub digest: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BlobDescriptor<'a> {
    #[serde(rename = "@type")]
    kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    content_type: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    length: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    digest: Option<&'a str>,
}

/// One value of a materialized query result
#[derive(Debug, Clone, PartialEq)]
pub enum ResultValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Bytes(Vec<u8>),
    Attachment(Attachment),
    Array(Vec<ResultValue>),
    /// Keys in result order
    Map(Vec<(String, ResultValue)>),
}

impl ResultValue {
    /// Convert to a JSON tree
    pub fn to_json(&self) -> Value {
        match self {
            ResultValue::Null => Value::Null,
            ResultValue::Bool(b) => Value::Bool(*b),
            ResultValue::Int(i) => Value::Number((*i).into()),
            ResultValue::Float(f) => Number::from_f64(*f).map_or(Value::Null, Value::Number),
            ResultValue::String(s) => Value::String(s.clone()),
            ResultValue::Bytes(bytes) => Value::String(STANDARD.encode(bytes)),
            ResultValue::Attachment(attachment) => attachment_descriptor(attachment),
            ResultValue::Array(items) => Value::Array(items.iter().map(Self::to_json).collect()),
            ResultValue::Map(entries) => {
                let map: Map<String, Value> = entries
                    .iter()
                    .map(|(key, value)| (key.clone(), value.to_json()))
                    .collect();
                Value::Object(map)
            }
        }
    }
}

fn attachment_descriptor(attachment: &Attachment) -> Value {
    let descriptor = BlobDescriptor {
        kind: "blob",
        content_type: attachment.content_type.as_deref(),
        length: attachment.length,
        digest: attachment.digest.as_deref(),
    };
    // Only string and integer fields, so this cannot fail
    serde_json::to_value(descriptor).unwrap_or(Value::Null)
}

/// Serialize result rows as JSON text for highlighting
pub fn to_json_text(rows: &[ResultValue]) -> Result<String> {
    let rows: Vec<Value> = rows.iter().map(ResultValue::to_json).collect();
    Ok(serde_json::to_string(&rows)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scalars() {
        assert_eq!(ResultValue::Null.to_json(), Value::Null);
        assert_eq!(ResultValue::Bool(true).to_json(), json!(true));
        assert_eq!(ResultValue::Int(-7).to_json(), json!(-7));
        assert_eq!(ResultValue::String("x".into()).to_json(), json!("x"));
        assert_eq!(ResultValue::Float(f64::NAN).to_json(), Value::Null);
    }

    #[test]
    fn test_bytes_base64() {
        let value = ResultValue::Bytes(b"hello".to_vec());
        assert_eq!(value.to_json(), json!("aGVsbG8="));
    }

    #[test]
    fn test_attachment_descriptor() {
        let value = ResultValue::Attachment(Attachment {
            content_type: Some("image/png".into()),
            length: Some(1024),
            digest: Some("sha1-abc".into()),
        });
        assert_eq!(
            serde_json::to_string(&value.to_json()).unwrap(),
            r#"{"@type":"blob","contentType":"image/png","length":1024,"digest":"sha1-abc"}"#
        );

        let bare = ResultValue::Attachment(Attachment::default());
        assert_eq!(serde_json::to_string(&bare.to_json()).unwrap(), r#"{"@type":"blob"}"#);
    }

    #[test]
    fn test_map_order_preserved() {
        let row = ResultValue::Map(vec![
            ("name".into(), ResultValue::String("Inn".into())),
            ("id".into(), ResultValue::Int(1)),
            ("tags".into(), ResultValue::Array(vec![ResultValue::Null])),
        ]);
        assert_eq!(
            to_json_text(&[row]).unwrap(),
            r#"[{"name":"Inn","id":1,"tags":[null]}]"#
        );
    }

    #[test]
    fn test_rows_highlight_as_json() {
        use crate::syntax::{resolve, tokenize, HighlightLanguage, Theme};

        let text = to_json_text(&[ResultValue::Map(vec![(
            "thumb".into(),
            ResultValue::Bytes(vec![0, 1, 2]),
        )])])
        .unwrap();
        let palette = resolve(Theme::Light);
        let runs = tokenize(&text, HighlightLanguage::Json, &palette);
        assert!(runs.iter().any(|run| run.text == "\"AAEC\"" && run.color == palette.string));
    }
}
