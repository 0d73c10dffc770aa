use serde_json::Value;
use tabled::{builder::Builder, Table};

use super::{as_report_rows, scalar_to_string};

/// Format output as a two-column table using the tabled crate.
pub fn print_table(value: &Value) {
    if let Some(rows) = as_report_rows(value) {
        let mut builder = Builder::default();
        builder.push_record(["Concepto", "Valor"]);
        for (label, val) in rows {
            builder.push_record([label, val]);
        }
        println!("{}", Table::from(builder));
        return;
    }

    match value {
        Value::Object(map) => match map.get("result") {
            Some(Value::Object(result)) => {
                print_fields(result);
                print_envelope_notes(map);
            }
            _ => print_fields(map),
        },
        _ => println!("{}", scalar_to_string(value)),
    }
}

fn print_fields(map: &serde_json::Map<String, Value>) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in map {
        builder.push_record([key.as_str(), &scalar_to_string(val)]);
    }
    println!("{}", Table::from(builder));
}

fn print_envelope_notes(envelope: &serde_json::Map<String, Value>) {
    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings.iter().filter_map(Value::as_str) {
                println!("  - {}", w);
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}
