//! Normalization of the heterogeneous response envelopes the backend emits.
//!
//! List endpoints answer with a bare array, with `{data: {records, total,
//! page, ...}}`, with `{isSuccess, data: [...]}` or with an array under some
//! resource-specific key. [`Envelope`] names each of those shapes; the
//! `extract_*` and `safe_*` helpers are defined on top of it and never fail,
//! degrading to empty collections and default pagination instead.

use serde_json::{Map, Value};

use crate::pagination::PaginationInfo;

/// Top-level keys checked, in order, for a record array.
pub const COMMON_ARRAY_KEYS: [&str; 7] = [
    "records", "items", "list", "results", "children", "orders", "users",
];

pub(crate) const PAGINATION_KEYS: [&str; 4] = ["total", "page", "limit", "totalPages"];

/// Known shapes of a list response.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Envelope<'a> {
    /// The response is the record array itself.
    Bare(&'a [Value]),
    /// Array under a caller-named key or one of [`COMMON_ARRAY_KEYS`].
    Keyed { key: &'a str, records: &'a [Value] },
    /// `{data: {records: [...], total, page, limit, totalPages}}`.
    Paged {
        records: &'a [Value],
        meta: &'a Map<String, Value>,
    },
    /// `{data: [...]}`, or a `data`/`isSuccess` wrapper carrying no array.
    Wrapped(&'a [Value]),
    /// An object without any recognizable record array.
    Unrecognized(&'a Map<String, Value>),
    /// `null` or a scalar.
    Empty,
}

impl<'a> Envelope<'a> {
    /// Classifies `response`, probing `data_key` before the built-in shapes.
    pub fn classify(response: &'a Value, data_key: Option<&'a str>) -> Self {
        let root = match response {
            Value::Array(items) => return Envelope::Bare(items),
            Value::Object(root) => root,
            _ => return Envelope::Empty,
        };

        if let Some(key) = data_key {
            if let Some(Value::Array(records)) = root.get(key) {
                return Envelope::Keyed { key, records };
            }
        }

        match root.get("data") {
            Some(Value::Object(meta)) => {
                if let Some(Value::Array(records)) = meta.get("records") {
                    return Envelope::Paged { records, meta };
                }
            }
            Some(Value::Array(records)) => return Envelope::Wrapped(records),
            _ => {}
        }

        for key in COMMON_ARRAY_KEYS {
            if let Some(Value::Array(records)) = root.get(key) {
                return Envelope::Keyed { key, records };
            }
        }

        if root.contains_key("data") || root.contains_key("isSuccess") || root.contains_key("success")
        {
            return Envelope::Wrapped(&[]);
        }

        Envelope::Unrecognized(root)
    }

    /// The record array carried by the envelope; empty when there is none.
    pub fn records(&self) -> &'a [Value] {
        match *self {
            Envelope::Bare(records)
            | Envelope::Keyed { records, .. }
            | Envelope::Paged { records, .. }
            | Envelope::Wrapped(records) => records,
            Envelope::Unrecognized(_) | Envelope::Empty => &[],
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, Envelope::Unrecognized(_))
    }
}

/// Message of a response explicitly flagged as failed
/// (`isSuccess: false` or `success: false`).
pub fn rejection(response: &Value) -> Option<String> {
    let root = response.as_object()?;
    let failed = ["isSuccess", "success"]
        .iter()
        .any(|key| root.get(*key) == Some(&Value::Bool(false)));
    if !failed {
        return None;
    }
    let message = ["message", "error", "errorMessage"]
        .iter()
        .find_map(|key| root.get(*key).and_then(Value::as_str))
        .unwrap_or("request was not successful");
    Some(message.to_string())
}

/// Extracts the record array from any response shape.
///
/// Returns `[]` for `null`, scalars and objects without a recognizable array.
pub fn extract_array_from_response(response: &Value, data_key: Option<&str>) -> Vec<Value> {
    Envelope::classify(response, data_key).records().to_vec()
}

/// Extracts the pagination descriptor from any response shape.
///
/// `defaults` replaces the built-in `{total: 0, page: 1, limit: 10,
/// totalPages: 0}`; individual fields missing from the response fall back to
/// it. `totalPages` is taken as sent and only computed when the response is a
/// bare array.
pub fn extract_pagination_from_response(
    response: &Value,
    defaults: PaginationInfo,
) -> PaginationInfo {
    match response {
        Value::Object(root) => {
            if let Some(Value::Object(data)) = root.get("data") {
                return read_pagination(data, defaults);
            }
            if PAGINATION_KEYS.iter().any(|key| root.contains_key(*key)) {
                return read_pagination(root, defaults);
            }
            defaults
        }
        Value::Array(items) => {
            let total = items.len() as u64;
            let limit = defaults.limit.max(1);
            PaginationInfo {
                total,
                page: defaults.page.max(1),
                limit,
                total_pages: total.div_ceil(limit),
            }
        }
        _ => defaults,
    }
}

fn read_pagination(source: &Map<String, Value>, defaults: PaginationInfo) -> PaginationInfo {
    let positive = |key: &str, fallback: u64| {
        count(source.get(key))
            .filter(|value| *value >= 1)
            .unwrap_or(fallback)
    };
    PaginationInfo {
        total: count(source.get("total")).unwrap_or(defaults.total),
        page: positive("page", defaults.page),
        limit: positive("limit", defaults.limit),
        total_pages: count(source.get("totalPages")).unwrap_or(defaults.total_pages),
    }
}

/// Reads a non-negative integer from a number or a numeric string.
fn count(value: Option<&Value>) -> Option<u64> {
    match value? {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64)),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Runs `operation` on the array in `value`, or returns `fallback` when the
/// value is not an array.
pub fn safe_array_operation<'a, R>(
    value: &'a Value,
    operation: impl FnOnce(&'a [Value]) -> R,
    fallback: R,
) -> R {
    match value {
        Value::Array(items) => operation(items),
        Value::Null => fallback,
        other => {
            log::warn!("Expected an array, got {}; using fallback", kind(other));
            fallback
        }
    }
}

/// Array slice `[start, end)` clamped to the array bounds; `end = None` means
/// "to the end".
pub fn safe_slice(value: &Value, start: usize, end: Option<usize>) -> Vec<Value> {
    safe_array_operation(
        value,
        |items| {
            let end = end.unwrap_or(items.len()).min(items.len());
            let start = start.min(end);
            items[start..end].to_vec()
        },
        Vec::new(),
    )
}

pub fn safe_map<T>(value: &Value, f: impl FnMut(&Value) -> T) -> Vec<T> {
    safe_array_operation(value, |items| items.iter().map(f).collect(), Vec::new())
}

pub fn safe_filter(value: &Value, mut predicate: impl FnMut(&Value) -> bool) -> Vec<Value> {
    safe_array_operation(
        value,
        |items| {
            items
                .iter()
                .filter(|item| predicate(*item))
                .cloned()
                .collect()
        },
        Vec::new(),
    )
}
