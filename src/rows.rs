use std::collections::HashSet;

use serde_json::{Map, Value};

pub type Row = Map<String, Value>;

const ROW_LIST_KEYS: [&str; 4] = ["data", "rows", "result", "results"];

pub const PLAYER_ID_KEYS: &[&str] = &[
    "playerid",
    "playerId",
    "PlayerId",
    "player_id",
    "IDfg",
    "xMLBAMID",
];
pub const NAME_KEYS: &[&str] = &["Name", "Player", "playerName", "PlayerName"];
pub const TEAM_KEYS: &[&str] = &["Team", "Tm", "TeamName", "AbbName"];

/// Row objects from a leaders payload; anything unrecognized yields no rows.
pub fn extract_rows(payload: &Value) -> Vec<Row> {
    let Some(obj) = payload.as_object() else {
        return Vec::new();
    };
    ROW_LIST_KEYS
        .iter()
        .find_map(|key| obj.get(*key).and_then(Value::as_array))
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item.as_object().cloned())
                .collect()
        })
        .unwrap_or_default()
}

/// Value of the first key that exists, even when it is null or empty.
pub fn first_present(row: &Row, keys: &[&str]) -> Value {
    keys.iter()
        .find_map(|key| row.get(*key))
        .cloned()
        .unwrap_or_else(|| Value::String(String::new()))
}

/// Identity used to collapse rows seen in more than one batch.
pub fn dedup_key(row: &Row) -> String {
    if let Some(id) = PLAYER_ID_KEYS
        .iter()
        .find_map(|key| row.get(*key))
        .filter(|v| !is_blank(v))
    {
        return format!("id:{}", scalar_text(id));
    }
    let name = scalar_text(&first_present(row, NAME_KEYS));
    let team = scalar_text(&first_present(row, TEAM_KEYS));
    format!("nt:{name}|{team}")
}

/// First-seen order wins; duplicates inside `base` collapse as well.
pub fn merge_rows(base: Vec<Row>, incoming: Vec<Row>) -> Vec<Row> {
    let mut seen = HashSet::new();
    let mut out = Vec::with_capacity(base.len() + incoming.len());
    for row in base.into_iter().chain(incoming) {
        if seen.insert(dedup_key(&row)) {
            out.push(row);
        }
    }
    out
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
