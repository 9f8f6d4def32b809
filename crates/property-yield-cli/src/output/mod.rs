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

/// Flatten nested objects into `parent.child` keys so a full analysis
/// (metrics, breakdown, monthly) fits a two-column layout. Arrays stay as values.
pub fn flatten(map: &Map<String, Value>) -> Vec<(String, Value)> {
    let mut rows = Vec::with_capacity(map.len());
    for (key, val) in map {
        match val {
            Value::Object(inner) => {
                for (child, child_val) in flatten(inner) {
                    rows.push((format!("{key}.{child}"), child_val));
                }
            }
            _ => rows.push((key.clone(), val.clone())),
        }
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flatten_nested_analysis() {
        let value = json!({
            "metrics": { "netYield": "4.43", "capRate": "4.52" },
            "issues": [],
        });
        let rows = flatten(value.as_object().unwrap());
        let keys: Vec<&str> = rows.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["issues", "metrics.capRate", "metrics.netYield"]);
    }
}
