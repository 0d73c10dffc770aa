use serde_json::Value;

use super::{as_report_rows, scalar_to_string};

/// Print just the key answer value from the output.
///
/// The net settlement amount is the headline figure of every command; a
/// detailed report prints its last row (Importe Neto).
pub fn print_minimal(value: &Value) {
    if let Some(rows) = as_report_rows(value) {
        if let Some((_, net)) = rows.last() {
            println!("{}", net);
        }
        return;
    }

    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    if let Some(net) = result_obj.get("net_amount").filter(|v| !v.is_null()) {
        println!("{}", scalar_to_string(net));
        return;
    }

    if let Some((key, val)) = result_obj.as_object().and_then(|m| m.iter().next()) {
        println!("{}: {}", key, scalar_to_string(val));
        return;
    }

    println!("{}", scalar_to_string(result_obj));
}
