pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::Value;

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// The calculation mode keys a sweep result may carry, in display order.
pub const MODE_KEYS: [&str; 3] = ["standard", "overpayment", "investment_surplus"];

/// The per-term fields of a sweep record, in display order.
pub const TERM_FIELDS: [&str; 4] = [
    "monthly_payment",
    "total_cost",
    "total_cost_adjusted",
    "investment_balance",
];

/// True when the value is a mapping from term years to record objects.
pub fn is_term_map(value: &Value) -> bool {
    match value {
        Value::Object(map) => {
            !map.is_empty()
                && map.iter().all(|(key, record)| {
                    key.parse::<u32>().is_ok()
                        && record
                            .as_object()
                            .is_some_and(|fields| fields.contains_key("monthly_payment"))
                })
        }
        _ => false,
    }
}

/// Term-map entries sorted by numeric year (JSON object keys are strings).
pub fn sorted_terms(map: &serde_json::Map<String, Value>) -> Vec<(u32, &Value)> {
    let mut terms: Vec<(u32, &Value)> = map
        .iter()
        .filter_map(|(key, record)| key.parse::<u32>().ok().map(|years| (years, record)))
        .collect();
    terms.sort_by_key(|(years, _)| *years);
    terms
}
