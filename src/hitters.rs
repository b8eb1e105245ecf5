use serde_json::Value;

use crate::rows::{NAME_KEYS, Row, TEAM_KEYS, first_present};

pub const HITTER_COLUMNS: [&str; 23] = [
    "Bats", "Name", "Age", "Team", "Season", "G", "AB", "PA", "H", "2B", "3B", "HR", "R", "RBI",
    "BB", "SO", "HBP", "SB", "CS", "AVG", "OBP", "SLG", "OPS",
];

// Output column, upstream aliases, rendered as a 3-decimal rate.
const HITTER_FIELDS: [(&str, &[&str], bool); 23] = [
    ("Bats", &["Bats", "Bat", "B"], false),
    ("Name", NAME_KEYS, false),
    ("Age", &["Age"], false),
    ("Team", TEAM_KEYS, false),
    ("Season", &["Season", "season", "Year"], false),
    ("G", &["G", "Games"], false),
    ("AB", &["AB"], false),
    ("PA", &["PA"], false),
    ("H", &["H", "Hits"], false),
    ("2B", &["2B", "Doubles"], false),
    ("3B", &["3B", "Triples"], false),
    ("HR", &["HR", "HomeRuns"], false),
    ("R", &["R", "Runs"], false),
    ("RBI", &["RBI"], false),
    ("BB", &["BB"], false),
    ("SO", &["SO", "K", "Ks"], false),
    ("HBP", &["HBP"], false),
    ("SB", &["SB"], false),
    ("CS", &["CS"], false),
    ("AVG", &["AVG", "BA", "Avg"], true),
    ("OBP", &["OBP"], true),
    ("SLG", &["SLG"], true),
    ("OPS", &["OPS"], true),
];

/// Renders numeric-looking values as "0.000"; anything else passes through.
pub fn fmt3(value: &Value) -> Value {
    let as_float = match value {
        Value::Null => return Value::String(String::new()),
        Value::String(s) if s.is_empty() => return Value::String(String::new()),
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    };
    match as_float {
        Some(f) => Value::String(format!("{f:.3}")),
        None => value.clone(),
    }
}

pub fn normalize_hitter(row: &Row) -> Row {
    let mut out = Row::new();
    for (column, keys, rate) in HITTER_FIELDS {
        let value = first_present(row, keys);
        let value = if rate { fmt3(&value) } else { value };
        out.insert(column.to_string(), value);
    }
    out
}
