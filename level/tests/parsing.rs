use orb_maze_core::{CellCoord, CellKind, LevelNumber};
use orb_maze_level::{
    Axis, DirectorySource, LevelData, LevelDirectory, LevelFormatError, LevelSource, MarkerRole,
};
use serde_json::json;

fn bundled_levels() -> DirectorySource {
    DirectorySource::new(concat!(env!("CARGO_MANIFEST_DIR"), "/../levels"))
}

#[test]
fn parses_full_document() {
    let raw = json!({
        "gridSize": 3,
        "timeLimit": 10,
        "hits": 2,
        "description": "Break through!",
        "layout": ["P.C", ".W.", "C.O"]
    })
    .to_string();

    let level = LevelData::parse(&raw).expect("level parses");

    assert_eq!((level.columns(), level.rows()), (3, 3));
    assert_eq!(level.start(), CellCoord::new(0, 0));
    assert_eq!(level.goal(), CellCoord::new(2, 2));
    assert_eq!(level.time_limit_seconds(), 10);
    assert_eq!(level.hit_budget(), 2);
    assert_eq!(level.description(), "Break through!");
    assert_eq!(
        level.crates().collect::<Vec<_>>(),
        vec![CellCoord::new(2, 0), CellCoord::new(0, 2)]
    );
    assert_eq!(level.cell(CellCoord::new(1, 1)), Some(CellKind::Wall));
    assert_eq!(level.cell(CellCoord::new(3, 0)), None);
}

#[test]
fn parsing_is_deterministic() {
    let raw = json!({ "layout": ["P.C", "..O"], "hits": 1 }).to_string();

    let first = LevelData::parse(&raw).expect("level parses");
    let second = orb_maze_level::parse(&raw).expect("level parses");

    assert_eq!(first, second);
}

#[test]
fn rejects_ragged_rows() {
    let raw = json!({ "layout": ["P..", ".O"] }).to_string();

    let error = LevelData::parse(&raw).unwrap_err();

    assert!(matches!(
        error,
        LevelFormatError::RaggedRow {
            row: 1,
            expected: 3,
            found: 2
        }
    ));
}

#[test]
fn rejects_empty_layout() {
    let error = LevelData::parse(&json!({ "layout": [] }).to_string()).unwrap_err();
    assert!(matches!(error, LevelFormatError::EmptyLayout));

    let error = LevelData::parse(&json!({ "layout": [""] }).to_string()).unwrap_err();
    assert!(matches!(error, LevelFormatError::EmptyLayout));
}

#[test]
fn rejects_missing_markers() {
    let error = LevelData::parse(&json!({ "layout": ["..O"] }).to_string()).unwrap_err();
    assert!(matches!(error, LevelFormatError::Missing(MarkerRole::Start)));

    let error = LevelData::parse(&json!({ "layout": ["P.."] }).to_string()).unwrap_err();
    assert!(matches!(error, LevelFormatError::Missing(MarkerRole::Goal)));
}

#[test]
fn rejects_duplicate_markers() {
    let error = LevelData::parse(&json!({ "layout": ["P.P", "..O"] }).to_string()).unwrap_err();

    assert!(matches!(
        error,
        LevelFormatError::Duplicate {
            role: MarkerRole::Start,
            first,
            second,
        } if first == CellCoord::new(0, 0) && second == CellCoord::new(2, 0)
    ));

    let error = LevelData::parse(&json!({ "layout": ["PO", "O."] }).to_string()).unwrap_err();
    assert!(matches!(
        error,
        LevelFormatError::Duplicate {
            role: MarkerRole::Goal,
            ..
        }
    ));
}

#[test]
fn rejects_declared_size_that_disagrees_with_layout() {
    let raw = json!({ "gridSize": 4, "layout": ["P..", "...", "..O"] }).to_string();

    let error = LevelData::parse(&raw).unwrap_err();

    assert!(matches!(
        error,
        LevelFormatError::DimensionMismatch {
            axis: Axis::Width,
            declared: 4,
            actual: 3
        }
    ));

    let raw = json!({ "width": 3, "height": 1, "layout": ["P..", "..O"] }).to_string();
    let error = LevelData::parse(&raw).unwrap_err();
    assert!(matches!(
        error,
        LevelFormatError::DimensionMismatch {
            axis: Axis::Height,
            declared: 1,
            actual: 2
        }
    ));
}

#[test]
fn rejects_non_document_payloads() {
    let error = LevelData::parse("not json").unwrap_err();
    assert!(matches!(error, LevelFormatError::InvalidDocument(_)));

    let error = LevelData::parse(&json!({ "layout": ["PO"], "hits": -1 }).to_string()).unwrap_err();
    assert!(matches!(error, LevelFormatError::InvalidDocument(_)));
}

#[test]
fn accepts_explicit_start_and_orb_coordinates() {
    let raw = json!({
        "layout": ["...", ".W.", "..."],
        "playerStart": [0, 2],
        "orb": { "position": [2, 0] }
    })
    .to_string();

    let level = LevelData::parse(&raw).expect("level parses");

    assert_eq!(level.start(), CellCoord::new(0, 2));
    assert_eq!(level.goal(), CellCoord::new(2, 0));
}

#[test]
fn rejects_explicit_coordinates_outside_grid() {
    let raw = json!({ "layout": ["..O"], "playerStart": [5, 0] }).to_string();

    let error = LevelData::parse(&raw).unwrap_err();

    assert!(matches!(
        error,
        LevelFormatError::OutOfRange {
            role: MarkerRole::Start,
            columns: 3,
            rows: 1,
            ..
        }
    ));
}

#[test]
fn rejects_explicit_coordinates_on_walls() {
    let raw = json!({ "layout": ["P.W"], "orb": { "position": [2, 0] } }).to_string();

    let error = LevelData::parse(&raw).unwrap_err();

    assert!(matches!(
        error,
        LevelFormatError::NotFloor {
            role: MarkerRole::Goal,
            ..
        }
    ));
}

#[test]
fn rejects_marker_combined_with_explicit_coordinate() {
    let raw = json!({ "layout": ["P.O"], "playerStart": [1, 0] }).to_string();

    let error = LevelData::parse(&raw).unwrap_err();

    assert!(matches!(
        error,
        LevelFormatError::Duplicate {
            role: MarkerRole::Start,
            ..
        }
    ));
}

#[test]
fn rejects_start_on_goal() {
    let raw = json!({
        "layout": ["..."],
        "playerStart": [1, 0],
        "orb": { "position": [1, 0] }
    })
    .to_string();

    let error = LevelData::parse(&raw).unwrap_err();

    assert!(matches!(error, LevelFormatError::StartIsGoal(cell) if cell == CellCoord::new(1, 0)));
}

#[test]
fn bundled_levels_parse() {
    let source = bundled_levels();
    let directory = LevelDirectory::probe(&source);
    assert_eq!(directory.len(), 4);

    for level in directory.iter() {
        let raw = source.fetch(level).expect("bundled level readable");
        let data = LevelData::parse(&raw)
            .unwrap_or_else(|error| panic!("level {level} failed to parse: {error}"));
        assert!(!data.description().is_empty());
    }
}

#[test]
fn directory_source_reports_missing_files() {
    let source = bundled_levels();

    assert!(!source.contains(LevelNumber::new(99)));
    let error = source.fetch(LevelNumber::new(99)).unwrap_err();
    assert_eq!(error.level(), LevelNumber::new(99));
}
