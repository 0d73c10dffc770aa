pub mod csv_out;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::Value;

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => match serde_json::to_string_pretty(value) {
            Ok(s) => println!("{}", s),
            Err(e) => eprintln!("JSON serialization error: {}", e),
        },
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// Rows of a detailed report: an array of `{label, value}` objects.
pub(crate) fn as_report_rows(value: &Value) -> Option<Vec<(String, String)>> {
    let arr = value.as_array()?;
    arr.iter()
        .map(|row| {
            let label = row.get("label")?.as_str()?;
            let value = row.get("value")?;
            Some((label.to_string(), scalar_to_string(value)))
        })
        .collect()
}

/// Render a JSON scalar without quotes; nested values as compact JSON.
pub(crate) fn scalar_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_report_rows_detected() {
        let value = json!([
            { "label": "Días", "value": "-7" },
            { "label": "Tipo", "value": "Colocadora" }
        ]);
        let rows = as_report_rows(&value).unwrap();
        assert_eq!(rows[0], ("Días".to_string(), "-7".to_string()));
        assert_eq!(rows[1].1, "Colocadora");
    }

    #[test]
    fn test_non_report_array_not_detected() {
        assert!(as_report_rows(&json!([{ "a": 1 }])).is_none());
        assert!(as_report_rows(&json!({ "net_amount": "1" })).is_none());
    }
}
