pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::{Map, Value};

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// Scalar and nested-object fields as dotted `(key, value)` pairs, in
/// object order. Arrays of objects are left to the caller.
pub(crate) fn flatten_fields<'a>(map: &'a Map<String, Value>) -> Vec<(String, &'a Value)> {
    let mut out = Vec::new();
    push_fields("", map, &mut out);
    out
}

fn push_fields<'a>(prefix: &str, map: &'a Map<String, Value>, out: &mut Vec<(String, &'a Value)>) {
    for (key, val) in map {
        let name = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match val {
            Value::Object(inner) => push_fields(&name, inner, out),
            Value::Array(items) if is_record_array(items) => {}
            _ => out.push((name, val)),
        }
    }
}

/// Non-empty array whose elements are all objects.
pub(crate) fn is_record_array(items: &[Value]) -> bool {
    !items.is_empty() && items.iter().all(Value::is_object)
}

/// Record arrays in the object, with their keys.
pub(crate) fn record_arrays(map: &Map<String, Value>) -> Vec<(&str, &[Value])> {
    map.iter()
        .filter_map(|(key, val)| match val {
            Value::Array(items) if is_record_array(items) => Some((key.as_str(), items.as_slice())),
            _ => None,
        })
        .collect()
}
