use serde_json::Value;
use tabled::{builder::Builder, Table};

use super::{is_term_map, sorted_terms, MODE_KEYS, TERM_FIELDS};

/// Format output as a table using the tabled crate.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => {
            if let Some(result) = map.get("result") {
                print_result_table(result, map);
            } else if is_term_map(value) {
                print_term_table(value);
            } else {
                print_flat_object(value);
            }
        }
        _ => {
            println!("{}", value);
        }
    }
}

fn print_result_table(result: &Value, envelope: &serde_json::Map<String, Value>) {
    match result {
        // A sweep evaluation: one table per calculation mode
        Value::Object(res_map) if res_map.keys().any(|k| MODE_KEYS.contains(&k.as_str())) => {
            for key in MODE_KEYS {
                if let Some(mode) = res_map.get(key) {
                    println!("{}:", mode_title(key));
                    print_term_table(mode);
                    println!();
                }
            }
        }
        _ if is_term_map(result) => {
            print_term_table(result);
        }
        Value::Object(res_map) => {
            let mut builder = Builder::default();
            builder.push_record(["Field", "Value"]);
            for (key, val) in res_map {
                builder.push_record([key.as_str(), &format_value(val)]);
            }
            println!("{}", Table::from(builder));
        }
        _ => {
            print_flat_object(&Value::Object(envelope.clone()));
        }
    }

    // Print warnings if any
    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {}", s);
                }
            }
        }
    }

    // Print methodology
    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

fn mode_title(key: &str) -> &'static str {
    match key {
        "standard" => "Standard schedule",
        "overpayment" => "Overpayment schedule",
        "investment_surplus" => "Investment of surplus",
        _ => "Results",
    }
}

fn print_term_table(value: &Value) {
    let map = match value {
        Value::Object(map) => map,
        _ => {
            println!("{}", value);
            return;
        }
    };

    let mut builder = Builder::default();
    builder.push_record([
        "Years",
        "Monthly payment",
        "Total cost",
        "Adjusted cost",
        "Investment balance",
    ]);

    for (years, record) in sorted_terms(map) {
        let mut row = vec![years.to_string()];
        for field in TERM_FIELDS {
            row.push(record.get(field).map(format_value).unwrap_or_default());
        }
        builder.push_record(row);
    }

    println!("{}", Table::from(builder));
}

fn print_flat_object(value: &Value) {
    if let Value::Object(map) = value {
        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        for (key, val) in map {
            builder.push_record([key.as_str(), &format_value(val)]);
        }
        println!("{}", Table::from(builder));
    }
}

fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(format_value).collect();
            items.join(", ")
        }
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}
