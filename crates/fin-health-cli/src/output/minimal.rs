use serde_json::Value;

/// Headline fields, in priority order.
const PRIORITY_KEYS: [&str; 6] = [
    "health_score",
    "z_score",
    "health_grade",
    "risk_level",
    "growth_rates",
    "years",
];

/// Print just the headline value of the result.
///
/// An assessment prints `score grade tier`; other results print the first
/// non-null priority field, then fall back to the first field.
pub fn print_minimal(value: &Value) {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    if let Value::Object(map) = result_obj {
        if let (Some(score), Some(grade), Some(tier)) = (
            map.get("health_score"),
            map.get("health_grade"),
            map.get("risk_level"),
        ) {
            println!(
                "{} {} {}",
                format_minimal(score),
                format_minimal(grade),
                format_minimal(tier)
            );
            return;
        }

        for key in &PRIORITY_KEYS {
            if let Some(val) = map.get(*key) {
                if !val.is_null() {
                    println!("{}", format_minimal(val));
                    return;
                }
            }
        }

        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, format_minimal(val));
            return;
        }
    }

    println!("{}", format_minimal(result_obj));
}

fn format_minimal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
