use serde_json::Value;
use std::io;

use super::{as_report_rows, scalar_to_string};

/// Write output as two-column CSV to stdout.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    if let Some(rows) = as_report_rows(value) {
        let _ = wtr.write_record(["label", "value"]);
        for (label, val) in rows {
            let _ = wtr.write_record([label, val]);
        }
    } else if let Value::Object(map) = value {
        let fields = match map.get("result") {
            Some(Value::Object(result)) => result,
            _ => map,
        };
        let _ = wtr.write_record(["field", "value"]);
        for (key, val) in fields {
            let _ = wtr.write_record([key.as_str(), &scalar_to_string(val)]);
        }
    } else {
        let _ = wtr.write_record([&scalar_to_string(value)]);
    }

    let _ = wtr.flush();
}
