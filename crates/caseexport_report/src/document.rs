//! Document model, equality filters and cell value conversion.

use caseexport_io_xlsx::EnumCellValue;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde_json::{Map, Value};

/// One stored document.
pub type Document = Map<String, Value>;

const C_FORMAT_DATETIME: &str = "%Y-%m-%d %H:%M:%S";

////////////////////////////////////////////////////////////////////////////////
// #region Filter

/// Conjunction of field equality tests. Empty filter matches every document.
///
/// A `Null` condition also matches documents where the field is missing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpecDocumentFilter {
    l_conditions: Vec<(String, Value)>,
}

impl SpecDocumentFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an equality condition on `field`.
    pub fn where_eq(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.l_conditions.push((field.to_string(), value.into()));
        self
    }

    pub fn matches(&self, document: &Document) -> bool {
        self.l_conditions.iter().all(|(field, expected)| {
            match document.get(field) {
                Some(actual) => is_value_equal(actual, expected),
                None => expected.is_null(),
            }
        })
    }
}

/// Value equality with numbers compared by numeric value (`1 == 1.0`).
pub fn is_value_equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => match (a.as_i64(), b.as_i64()) {
            (Some(x), Some(y)) => x == y,
            _ => a.as_f64() == b.as_f64(),
        },
        _ => left == right,
    }
}

/// `null`, empty text, zero, false, or an empty list/object.
pub fn is_value_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !*b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(l_items) => l_items.is_empty(),
        Value::Object(dict_fields) => dict_fields.is_empty(),
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region ExtendedJson

/// Replace MongoDB extended-JSON wrappers with plain scalars, recursively.
///
/// - `{"$date": ...}` -> `"YYYY-MM-DD HH:MM:SS"` (UTC)
/// - `{"$numberLong"|"$numberInt": "n"}` -> integer
/// - `{"$numberDouble"|"$numberDecimal": "x"}` -> number
/// - `{"$oid": "..."}` -> text
///
/// Wrappers that fail to parse are left as they are.
pub fn normalize_extended_json(value: Value) -> Value {
    match value {
        Value::Array(l_items) => {
            Value::Array(l_items.into_iter().map(normalize_extended_json).collect())
        }
        Value::Object(dict_fields) => {
            if dict_fields.len() == 1
                && let Some((key, inner)) = dict_fields.iter().next()
                && let Some(scalar) = cast_extended_scalar(key, inner)
            {
                return scalar;
            }
            Value::Object(
                dict_fields
                    .into_iter()
                    .map(|(key, inner)| (key, normalize_extended_json(inner)))
                    .collect(),
            )
        }
        other => other,
    }
}

fn cast_extended_scalar(key: &str, inner: &Value) -> Option<Value> {
    match key {
        "$oid" => inner.as_str().map(|s| Value::String(s.to_string())),
        "$numberLong" | "$numberInt" => inner
            .as_str()
            .and_then(|s| s.trim().parse::<i64>().ok())
            .map(Value::from),
        "$numberDouble" | "$numberDecimal" => inner
            .as_str()
            .and_then(|s| s.trim().parse::<f64>().ok())
            .and_then(serde_json::Number::from_f64)
            .map(Value::Number),
        "$date" => cast_extended_date(inner).map(Value::String),
        _ => None,
    }
}

fn cast_extended_date(inner: &Value) -> Option<String> {
    let dt: NaiveDateTime = match inner {
        Value::String(s) => DateTime::parse_from_rfc3339(s).ok()?.naive_utc(),
        Value::Number(n) => DateTime::<Utc>::from_timestamp_millis(n.as_i64()?)?.naive_utc(),
        Value::Object(dict) => {
            let n_millis = dict
                .get("$numberLong")
                .and_then(Value::as_str)
                .and_then(|s| s.trim().parse::<i64>().ok())?;
            DateTime::<Utc>::from_timestamp_millis(n_millis)?.naive_utc()
        }
        _ => return None,
    };
    Some(dt.format(C_FORMAT_DATETIME).to_string())
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region CellValues

/// Convert a scalar field value; `None` for arrays and objects.
///
/// Missing fields and `null` become a blank cell.
pub fn cast_scalar_cell_value(value: Option<&Value>) -> Option<EnumCellValue> {
    match value {
        None | Some(Value::Null) => Some(EnumCellValue::None),
        Some(Value::Bool(b)) => Some(EnumCellValue::Boolean(*b)),
        Some(Value::Number(n)) => Some(match n.as_i64() {
            Some(i) => EnumCellValue::Integer(i),
            None => EnumCellValue::Number(n.as_f64().unwrap_or(f64::NAN)),
        }),
        Some(Value::String(s)) => Some(EnumCellValue::String(s.clone())),
        Some(Value::Array(_)) | Some(Value::Object(_)) => None,
    }
}

/// Like [`cast_scalar_cell_value`], but arrays and objects become compact JSON text.
pub fn derive_stringified_cell_value(value: Option<&Value>) -> EnumCellValue {
    match value {
        Some(inner @ (Value::Array(_) | Value::Object(_))) => EnumCellValue::String(inner.to_string()),
        other => cast_scalar_cell_value(other).unwrap_or(EnumCellValue::None),
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region EmbeddedLists

/// Object items of the list stored under `field`.
///
/// Missing or non-list fields yield nothing; non-object list items are skipped.
pub fn derive_embedded_documents(document: &Document, field: &str) -> Vec<Document> {
    match document.get(field) {
        Some(Value::Array(l_items)) => l_items
            .iter()
            .filter_map(|item| item.as_object().cloned())
            .collect(),
        _ => Vec::new(),
    }
}

/// Flatten the `field` lists of every parent into one list of children.
///
/// Each child receives the parent's `l_inherit` fields (`null` when the parent
/// lacks one), overwriting the child's own values.
pub fn flatten_nested_documents(
    parents: &[Document],
    field: &str,
    l_inherit: &[&str],
) -> Vec<Document> {
    let mut l_children = Vec::new();
    for parent in parents {
        for mut child in derive_embedded_documents(parent, field) {
            for key in l_inherit {
                child.insert(
                    key.to_string(),
                    parent.get(*key).cloned().unwrap_or(Value::Null),
                );
            }
            l_children.push(child);
        }
    }
    l_children
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
