use std::fs;
use std::path::PathBuf;

use serde_json::{Value, json};

use fa_leaderboards::hitters::{HITTER_COLUMNS, normalize_hitter};
use fa_leaderboards::rows::{Row, extract_rows};

fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

fn row(v: Value) -> Row {
    v.as_object().cloned().expect("object literal")
}

fn keys(row: &Row) -> Vec<&str> {
    row.keys().map(String::as_str).collect()
}

#[test]
fn normalizes_leaders_fixture() {
    let payload: Value = serde_json::from_str(&read_fixture("leaders_bat.json")).unwrap();
    let rows = extract_rows(&payload);
    assert_eq!(rows.len(), 2);

    let star = normalize_hitter(&rows[0]);
    assert_eq!(keys(&star), HITTER_COLUMNS);
    assert_eq!(star["Bats"], "R");
    assert_eq!(star["Team"], "LAD");
    assert_eq!(star["HR"], 55);
    assert_eq!(star["2B"], 25);
    assert_eq!(star["AVG"], "0.282");
    assert_eq!(star["OBP"], "0.392");
    assert_eq!(star["SLG"], "0.622");
    assert_eq!(star["OPS"], "1.014");
    assert!(!star.contains_key("wRC+"));
    assert!(!star.contains_key("playerid"));

    let bench = normalize_hitter(&rows[1]);
    assert_eq!(keys(&bench), HITTER_COLUMNS);
    assert_eq!(bench["Bats"], "L");
    assert_eq!(bench["Name"], "Utility Example");
    assert_eq!(bench["Team"], "- - -");
    assert_eq!(bench["Season"], 2025);
    assert_eq!(bench["G"], 12);
    assert_eq!(bench["SO"], 0);
    assert_eq!(bench["PA"], "");
    assert_eq!(bench["RBI"], "");
    assert_eq!(bench["AVG"], "");
    assert_eq!(bench["OBP"], "");
    assert_eq!(bench["SLG"], "n/a");
    assert_eq!(bench["OPS"], "");
}

#[test]
fn any_row_shape_gets_exactly_the_fixed_columns() {
    let shapes = [
        json!({}),
        json!({"unrelated": true, "nested": {"HR": 3}}),
        json!({"HomeRuns": 7, "Avg": "0.3", "Player": "X"}),
        json!({"HR": null, "AVG": "abc", "B": "S", "AbbName": "SEA"}),
    ];
    for shape in shapes {
        let normalized = normalize_hitter(&row(shape));
        assert_eq!(normalized.len(), 23);
        assert_eq!(keys(&normalized), HITTER_COLUMNS);
    }

    let empty = normalize_hitter(&Row::new());
    assert!(empty.values().all(|v| v == ""));

    let aliased = normalize_hitter(&row(json!({"HomeRuns": 7, "Avg": "0.3", "Player": "X"})));
    assert_eq!(aliased["HR"], 7);
    assert_eq!(aliased["AVG"], "0.300");
    assert_eq!(aliased["Name"], "X");

    let odd = normalize_hitter(&row(json!({"HR": null, "AVG": "abc", "B": "S", "AbbName": "SEA"})));
    assert_eq!(odd["HR"], Value::Null);
    assert_eq!(odd["AVG"], "abc");
    assert_eq!(odd["Bats"], "S");
    assert_eq!(odd["Team"], "SEA");
}
