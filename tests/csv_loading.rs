use rust_csv_matrix::ingestion::{
    load_from_path, load_from_reader, load_from_str, load_table, LoadOptions, LoadRequest,
};
use rust_csv_matrix::types::{CategoryMap, RawTable};
use rust_csv_matrix::LoadError;

fn entries(map: &CategoryMap) -> Vec<(String, i64)> {
    map.iter().map(|(k, id)| (k.to_string(), id)).collect()
}

fn pairs(items: &[(&str, i64)]) -> Vec<(String, i64)> {
    items.iter().map(|(k, id)| (k.to_string(), *id)).collect()
}

#[test]
fn load_scores_fixture_types_each_column() {
    let table = load_from_path("tests/fixtures/scores.csv", &LoadOptions::default()).unwrap();

    assert_eq!(table.shape(), (3, 3));
    assert_eq!(table.labels, vec!["id", "color", "score"]);
    assert_eq!(table.categorical, vec![false, true, false]);

    assert_eq!(table.matrix.column(0), Some(vec![1.0, 2.0, 3.0]));
    assert_eq!(table.matrix.column(1), Some(vec![0.0, 1.0, 0.0]));
    let score = table.matrix.column(2).unwrap();
    assert_eq!(score[0], 3.5);
    assert!(score[1].is_nan());
    assert_eq!(score[2], 4.0);

    let color = table.mappings[1].as_ref().unwrap();
    assert_eq!(entries(color), pairs(&[("red", 0), ("blue", 1)]));
    assert_eq!(color.missing_id(), None);
}

#[test]
fn numeric_columns_carry_shadow_mappings() {
    let table = load_from_path("tests/fixtures/scores.csv", &LoadOptions::default()).unwrap();

    let id = table.mappings[0].as_ref().unwrap();
    assert_eq!(entries(id), pairs(&[("1", 0), ("2", 1), ("3", 2)]));

    let score = table.mappings[2].as_ref().unwrap();
    assert_eq!(entries(score), pairs(&[("3.5", 0), ("4.0", 1), ("nan", 2)]));
}

#[test]
fn unknown_label_fails_without_a_matrix() {
    let err = load_from_path("tests/fixtures/scores.csv", &LoadOptions::with_columns(["weight"])).unwrap_err();
    assert!(matches!(err, LoadError::ColumnNotFound(ref label) if label == "weight"));
}

#[test]
fn requested_columns_reorder_and_repeat() {
    let opts = LoadOptions::with_columns(["score", "color", "score"]);
    let table = load_from_path("tests/fixtures/scores.csv", &opts).unwrap();
    assert_eq!(table.shape(), (3, 3));
    assert_eq!(table.labels, vec!["score", "color", "score"]);
    assert_eq!(table.categorical, vec![false, true, false]);
    assert_eq!(table.matrix.row(0), Some(&[3.5, 0.0, 3.5][..]));
}

#[test]
fn quoted_comma_forces_categorical() {
    let table = load_from_path("tests/fixtures/quoted.csv", &LoadOptions::default()).unwrap();

    // The blank CRLF line is skipped.
    assert_eq!(table.shape(), (3, 3));
    assert_eq!(table.categorical, vec![true, true, true]);

    let amount = table.mapping_for("amount").unwrap();
    assert_eq!(entries(amount), pairs(&[("1,000", 0), ("250", 1), ("75", 2)]));

    let region = table.mapping_for("region").unwrap();
    assert_eq!(entries(region), pairs(&[("north", 0), ("south", 1), ("nan", 2)]));
    assert_eq!(table.matrix.column(2), Some(vec![0.0, 1.0, 2.0]));
}

#[test]
fn missing_sentinel_gets_the_last_id() {
    let table = load_from_path("tests/fixtures/obs.csv", &LoadOptions::default()).unwrap();

    let note = table.mapping_for("note").unwrap();
    assert_eq!(note.missing_id(), Some(note.len() as i64 - 1));
    assert_eq!(table.matrix.column(2), Some(vec![1.0, 0.0, 0.0]));

    let cluster = table.mapping_for("cluster").unwrap();
    assert_eq!(cluster.missing_id(), None);
}

#[test]
fn shape_counts_only_non_empty_data_lines() {
    let text = "a,b\n\n1,2\n\n\n3,4\n5\n";
    let table = load_from_str(text, &LoadOptions::default()).unwrap();
    assert_eq!(table.shape(), (3, 2));
    assert!(table.matrix.get(2, 1).unwrap().is_nan());
}

#[test]
fn header_without_rows_is_empty_input() {
    let err = load_from_str("a,b\n\n", &LoadOptions::default()).unwrap_err();
    assert!(matches!(err, LoadError::EmptyInput { .. }));

    let err = load_from_reader("".as_bytes(), &LoadOptions::default()).unwrap_err();
    assert!(matches!(err, LoadError::EmptyInput { .. }));
}

#[test]
fn missing_file_is_io_error() {
    let err = load_from_path("tests/fixtures/does_not_exist.csv", &LoadOptions::default()).unwrap_err();
    assert!(matches!(err, LoadError::Io(_)));
}

#[test]
fn overflow_sentinel_replaces_large_numeric_mapping() {
    let mut text = String::from("v,w\n");
    for i in 0..1500 {
        text.push_str(&format!("{i},{}\n", i % 7));
    }
    let table = load_from_str(&text, &LoadOptions::default()).unwrap();

    let v = table.mappings[0].as_ref().unwrap();
    assert!(v.is_overflow());
    assert_eq!(entries(v), pairs(&[("Overflow", -1), ("Too Many", -2)]));
    assert_eq!(table.matrix.get(1499, 0), Some(1499.0));

    let w = table.mappings[1].as_ref().unwrap();
    assert_eq!(w.len(), 7);
}

#[test]
fn shadow_ceiling_is_configurable() {
    let opts = LoadOptions {
        max_shadow_categories: 2,
        ..Default::default()
    };
    let table = load_from_path("tests/fixtures/scores.csv", &opts).unwrap();
    assert!(table.mappings[0].as_ref().is_some_and(|m| m.is_overflow()));
    assert!(!table.mappings[2].as_ref().is_some_and(|m| m.is_overflow()));
}

#[test]
fn categorical_ids_are_dense_in_first_seen_order() {
    let text = "c\nz\ny\nz\nx\ny\n";
    let table = load_from_str(text, &LoadOptions::default()).unwrap();
    let map = table.mappings[0].as_ref().unwrap();
    let ids: Vec<i64> = map.iter().map(|(_, id)| id).collect();
    assert_eq!(ids, vec![0, 1, 2]);
    assert_eq!(entries(map), pairs(&[("z", 0), ("y", 1), ("x", 2)]));
    assert_eq!(table.matrix.column(0), Some(vec![0.0, 1.0, 0.0, 2.0, 1.0]));
}

#[test]
fn load_table_accepts_pretokenized_rows_with_quotes() {
    let raw = RawTable::new(
        vec!["c".to_string()],
        vec![
            vec!["\"a\"".to_string()],
            vec!["a".to_string()],
            vec!["\"\"".to_string()],
            vec!["b".to_string()],
        ],
    );
    let table = load_table(&raw, &LoadOptions::default()).unwrap();
    let map = table.mappings[0].as_ref().unwrap();
    assert_eq!(entries(map), pairs(&[("\"a\"", 0), ("a", 1), ("b", 2), ("nan", 3)]));
    assert_eq!(table.matrix.column(0), Some(vec![0.0, 1.0, 3.0, 2.0]));
}

#[test]
fn duplicate_headers_resolve_to_last_column() {
    let table = load_from_str("k,k\n1,x\n", &LoadOptions::with_columns(["k"])).unwrap();
    assert_eq!(table.categorical, vec![true]);
}

#[test]
fn into_parts_returns_matrix_mappings_and_flags() {
    let table = load_from_path("tests/fixtures/scores.csv", &LoadOptions::default()).unwrap();
    let (matrix, mappings, flags) = table.into_parts();
    assert_eq!(matrix.shape(), (3, 3));
    assert_eq!(mappings.len(), 3);
    assert_eq!(flags, vec![false, true, false]);
}

#[test]
fn load_request_matches_direct_path_load() {
    let request = LoadRequest {
        path: "tests/fixtures/scores.csv".into(),
        options: LoadOptions::with_columns(["score", "color"]),
    };
    let queued = request.clone();

    let table = queued.run().unwrap();
    let direct = load_from_path(&request.path, &request.options).unwrap();

    assert_eq!(table.labels, direct.labels);
    assert_eq!(table.mappings, direct.mappings);
    assert_eq!(table.categorical, vec![false, true]);
    let same_cells = table
        .matrix
        .as_slice()
        .iter()
        .zip(direct.matrix.as_slice())
        .all(|(a, b)| a == b || (a.is_nan() && b.is_nan()));
    assert!(same_cells);
}

#[test]
fn load_request_reports_missing_file() {
    let request = LoadRequest {
        path: "tests/fixtures/does_not_exist.csv".into(),
        options: LoadOptions::default(),
    };
    assert!(matches!(request.run(), Err(LoadError::Io(_))));
}
