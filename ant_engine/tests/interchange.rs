// interchange.rs - Configuration text in and out

use ant_engine::{ConfigError, PRESETS, parse, validate};
use serde_json::json;

#[test]
fn every_preset_survives_a_round_trip() {
    for preset in PRESETS {
        let cfg = preset.build().unwrap();
        let text = cfg.to_json().unwrap();
        let again = parse(&text).unwrap();
        assert_eq!(again, cfg, "{}", preset.name);
        assert_eq!(again.to_json().unwrap(), text);
    }
}

#[test]
fn hand_written_table_loads() {
    let text = r#"{
        "name": "Two states",
        "states": 2,
        "colors": 1,
        "transitions": [
            { "newColor": 0, "turn": 1, "nextState": 1 },
            { "newColor": 0, "turn": 0, "nextState": 0 },
            { "newColor": 0, "turn": 1, "nextState": 0 },
            { "newColor": 0, "turn": 1, "nextState": 1 }
        ]
    }"#;
    let cfg = parse(text).unwrap();
    assert_eq!((cfg.states(), cfg.colors(), cfg.table().len()), (2, 1, 4));
}

#[test]
fn table_size_must_match_shape() {
    let err = validate(&json!({
        "name": "short",
        "states": 2,
        "colors": 3,
        "transitions": []
    }))
    .unwrap_err();
    assert_eq!(err, ConfigError::TransitionCountMismatch { expected: 8, found: 0 });
    assert_eq!(err.to_string(), "expected 8 transitions (states * (colors + 1)), found 0");
}
