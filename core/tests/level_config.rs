use blossom_core::*;

#[test]
fn custom_level_from_json() {
    let level: Level =
        serde_json::from_str(r#"{ "name": "corridor", "rows": 3, "columns": 12, "mines": 6 }"#)
            .unwrap();

    assert_eq!(level.name(), "corridor");
    assert_eq!(level.size(), GridSize::new(3, 12));
    assert_eq!(level.mine_count(), 6);

    let board = Board::new(level, 5).open_cell(Position::new(1, 6));
    assert_eq!(board.cells().mine_count(), 6);
}

#[test]
fn overfull_level_is_rejected() {
    let err = serde_json::from_str::<Level>(
        r#"{ "name": "full", "rows": 2, "columns": 2, "mines": 4 }"#,
    )
    .unwrap_err();

    assert!(err.to_string().contains("Too many mines"));
}

#[test]
fn presets_serialize_as_plain_config() {
    let value = serde_json::to_value(Level::VERY_EASY).unwrap();

    assert_eq!(
        value,
        serde_json::json!({ "name": "VERY_EASY", "rows": 4, "columns": 4, "mines": 3 })
    );
}
