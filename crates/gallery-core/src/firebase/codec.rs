//! Firestore Value Codec
//!
//! Firestore's REST API wraps every field in a typed value object, e.g.
//! `{"x": {"doubleValue": 48}}`.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tracing::warn;

use crate::domain::{GalleryItem, Layout, NewGalleryDocument, StoreError, StoreResult};

/// The typed values the gallery reads and writes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldValue {
    StringValue(String),
    DoubleValue(f64),
    /// int64 travels as a decimal string
    IntegerValue(String),
    TimestampValue(String),
    BooleanValue(bool),
    NullValue(()),
}

impl FieldValue {
    fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::StringValue(s) => Some(s),
            _ => None,
        }
    }

    fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::DoubleValue(v) => Some(*v),
            FieldValue::IntegerValue(s) => s.parse::<i64>().ok().map(|v| v as f64),
            _ => None,
        }
    }

    fn as_timestamp(&self) -> Option<DateTime<Utc>> {
        match self {
            FieldValue::TimestampValue(s) => parse_timestamp(s),
            _ => None,
        }
    }
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw).ok().map(|t| t.with_timezone(&Utc))
}

fn string(value: &str) -> Value {
    json!({ "stringValue": value })
}

fn double(value: f64) -> Value {
    json!({ "doubleValue": value })
}

/// Field map for a new gallery document. `createdAt` is set by a server
/// transform, not here.
pub fn encode_document(document: &NewGalleryDocument) -> Value {
    let mut fields = Map::new();
    fields.insert("url".into(), string(&document.url));
    fields.insert("fileName".into(), string(&document.file_name));
    fields.insert("storagePath".into(), string(&document.storage_path));
    fields.insert("x".into(), double(document.layout.x));
    fields.insert("y".into(), double(document.layout.y));
    fields.insert("w".into(), double(document.layout.w));
    fields.insert("h".into(), double(document.layout.h));
    fields.insert(
        "caption".into(),
        match &document.caption {
            Some(caption) => string(caption),
            None => json!({ "nullValue": null }),
        },
    );
    Value::Object(fields)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDocument {
    name: String,
    #[serde(default)]
    fields: HashMap<String, Value>,
    create_time: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RunQueryEntry {
    document: Option<RawDocument>,
}

/// Decode one REST document resource into a gallery item.
pub fn decode_document(raw: &Value) -> StoreResult<GalleryItem> {
    let raw: RawDocument = serde_json::from_value(raw.clone())?;
    decode_raw(raw)
}

fn decode_raw(raw: RawDocument) -> StoreResult<GalleryItem> {
    let fields: HashMap<String, FieldValue> = raw
        .fields
        .into_iter()
        .filter_map(|(name, value)| serde_json::from_value(value).ok().map(|v| (name, v)))
        .collect();

    let text = |name: &str| fields.get(name).and_then(FieldValue::as_str).map(str::to_string);
    let number = |name: &str| {
        fields
            .get(name)
            .and_then(FieldValue::as_f64)
            .ok_or_else(|| StoreError::Decode(format!("{}: missing numeric field '{name}'", raw.name)))
    };

    let id = raw.name.rsplit('/').next().unwrap_or_default().to_string();
    let url = text("url").ok_or_else(|| StoreError::Decode(format!("{}: missing url", raw.name)))?;
    let layout = Layout::new(number("x")?, number("y")?, number("w")?, number("h")?);
    let created_at = fields
        .get("createdAt")
        .and_then(FieldValue::as_timestamp)
        .or_else(|| raw.create_time.as_deref().and_then(parse_timestamp));

    Ok(GalleryItem {
        id,
        url,
        file_name: text("fileName").unwrap_or_default(),
        layout,
        caption: text("caption"),
        storage_path: text("storagePath"),
        created_at,
    })
}

/// Decode a `runQuery` response. Malformed documents are skipped.
pub fn decode_run_query(body: Value) -> StoreResult<Vec<GalleryItem>> {
    let entries: Vec<RunQueryEntry> = serde_json::from_value(body)?;
    let mut items = Vec::with_capacity(entries.len());
    for document in entries.into_iter().filter_map(|entry| entry.document) {
        let name = document.name.clone();
        match decode_raw(document) {
            Ok(item) => items.push(item),
            Err(err) => warn!(document = %name, error = %err, "skipping gallery document"),
        }
    }
    Ok(items)
}
