use serde_json::Value;
use std::io;

use super::{is_term_map, sorted_terms, MODE_KEYS, TERM_FIELDS};

/// Write output as CSV to stdout.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    match value {
        Value::Object(map) => {
            if let Some(result) = map.get("result") {
                write_result_csv(&mut wtr, result);
            } else if is_term_map(value) {
                write_term_header(&mut wtr, false);
                write_term_rows(&mut wtr, value, None);
            } else {
                write_flat_csv(&mut wtr, map);
            }
        }
        Value::Array(arr) => {
            for item in arr {
                let _ = wtr.write_record([&format_csv_value(item)]);
            }
        }
        _ => {
            let _ = wtr.write_record([&format_csv_value(value)]);
        }
    }

    let _ = wtr.flush();
}

fn write_result_csv(wtr: &mut csv::Writer<io::StdoutLock<'_>>, result: &Value) {
    match result {
        // A sweep evaluation: one row per mode and term
        Value::Object(res_map) if res_map.keys().any(|k| MODE_KEYS.contains(&k.as_str())) => {
            write_term_header(wtr, true);
            for key in MODE_KEYS {
                if let Some(mode) = res_map.get(key) {
                    write_term_rows(wtr, mode, Some(key));
                }
            }
        }
        _ if is_term_map(result) => {
            write_term_header(wtr, false);
            write_term_rows(wtr, result, None);
        }
        Value::Object(res_map) => {
            write_flat_csv(wtr, res_map);
        }
        _ => {
            let _ = wtr.write_record([&format_csv_value(result)]);
        }
    }
}

fn write_term_header(wtr: &mut csv::Writer<io::StdoutLock<'_>>, with_mode: bool) {
    let mut header: Vec<&str> = Vec::new();
    if with_mode {
        header.push("mode");
    }
    header.push("years");
    header.extend(TERM_FIELDS);
    let _ = wtr.write_record(&header);
}

fn write_term_rows(wtr: &mut csv::Writer<io::StdoutLock<'_>>, value: &Value, mode: Option<&str>) {
    let map = match value {
        Value::Object(map) => map,
        _ => return,
    };

    for (years, record) in sorted_terms(map) {
        let mut row: Vec<String> = Vec::new();
        if let Some(mode) = mode {
            row.push(mode.to_string());
        }
        row.push(years.to_string());
        for field in TERM_FIELDS {
            row.push(record.get(field).map(format_csv_value).unwrap_or_default());
        }
        let _ = wtr.write_record(&row);
    }
}

fn write_flat_csv(wtr: &mut csv::Writer<io::StdoutLock<'_>>, map: &serde_json::Map<String, Value>) {
    let _ = wtr.write_record(["field", "value"]);
    for (key, val) in map {
        let _ = wtr.write_record([key.as_str(), &format_csv_value(val)]);
    }
}

fn format_csv_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
