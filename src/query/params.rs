//! Convert between serde_json::Value (HTTP boundary) and BSON (storage).

use crate::error::AppError;
use bson::{Bson, Document};
use serde_json::{Map, Value};

/// Convert a JSON object into a BSON document. Integers become Int64, floats Double.
pub fn json_object_to_document(obj: &Map<String, Value>) -> Result<Document, AppError> {
    bson::to_document(obj).map_err(|e| AppError::BadRequest(format!("unsupported field value: {}", e)))
}

/// Convert a single JSON value into BSON.
pub fn json_to_bson(v: &Value) -> Result<Bson, AppError> {
    bson::to_bson(v).map_err(|e| AppError::BadRequest(format!("unsupported field value: {}", e)))
}

/// Render a stored document for the client. ObjectIds (including `_id`) become plain hex strings;
/// everything else uses relaxed extended JSON so numbers stay numbers.
pub fn document_to_json(doc: Document) -> Value {
    let mut map = Map::with_capacity(doc.len());
    for (k, v) in doc {
        map.insert(k, bson_to_json(v));
    }
    Value::Object(map)
}

pub fn bson_to_json(v: Bson) -> Value {
    match v {
        Bson::ObjectId(oid) => Value::String(oid.to_hex()),
        Bson::Document(d) => document_to_json(d),
        Bson::Array(items) => Value::Array(items.into_iter().map(bson_to_json).collect()),
        other => other.into_relaxed_extjson(),
    }
}

/// Coerce a query-string value to the BSON type a client most likely meant.
/// `true`/`false` become booleans, integers Int64, decimals Double; anything else stays a string.
pub fn query_value_to_bson(s: &str) -> Bson {
    if s.eq_ignore_ascii_case("true") {
        return Bson::Boolean(true);
    }
    if s.eq_ignore_ascii_case("false") {
        return Bson::Boolean(false);
    }
    if let Ok(n) = s.parse::<i64>() {
        return Bson::Int64(n);
    }
    if let Ok(f) = s.parse::<f64>() {
        if f.is_finite() {
            return Bson::Double(f);
        }
    }
    Bson::String(s.to_string())
}
