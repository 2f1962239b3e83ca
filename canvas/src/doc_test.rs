use super::*;

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn path_of(points: &[(f64, f64)]) -> Path {
    let mut iter = points.iter().map(|&(x, y)| pt(x, y));
    let mut path = Path::new(iter.next().unwrap());
    for p in iter {
        path.push(p);
    }
    path
}

// =============================================================
// Path
// =============================================================

#[test]
fn new_path_holds_its_first_point() {
    let path = Path::new(pt(1.0, 2.0));
    assert_eq!(path.len(), 1);
    assert!(!path.is_empty());
    assert_eq!(path.points(), &[pt(1.0, 2.0)]);
}

#[test]
fn push_appends_in_order() {
    let path = path_of(&[(0.0, 0.0), (1.0, 1.0), (2.0, 0.0)]);
    assert_eq!(path.points(), &[pt(0.0, 0.0), pt(1.0, 1.0), pt(2.0, 0.0)]);
}

#[test]
fn single_point_path_is_a_tap() {
    assert!(!Path::new(pt(5.0, 5.0)).has_segment());
}

#[test]
fn two_point_path_has_segment() {
    assert!(path_of(&[(0.0, 0.0), (10.0, 0.0)]).has_segment());
}

#[test]
fn push_duplicate_point_is_kept() {
    let path = path_of(&[(1.0, 1.0), (1.0, 1.0)]);
    assert_eq!(path.len(), 2);
}

#[test]
fn path_serializes_as_point_array() {
    let json = serde_json::to_value(path_of(&[(0.0, 0.0), (10.0, 5.0)])).unwrap();
    assert_eq!(json, serde_json::json!([{ "x": 0.0, "y": 0.0 }, { "x": 10.0, "y": 5.0 }]));
}

// =============================================================
// PathHistory
// =============================================================

#[test]
fn history_starts_empty() {
    let history = PathHistory::new();
    assert!(history.is_empty());
    assert_eq!(history.len(), 0);
    assert!(history.iter().next().is_none());
}

#[test]
fn push_returns_index_in_order() {
    let mut history = PathHistory::new();
    assert_eq!(history.push(Path::new(pt(0.0, 0.0))), 0);
    assert_eq!(history.push(Path::new(pt(1.0, 0.0))), 1);
    assert_eq!(history.push(Path::new(pt(2.0, 0.0))), 2);
    assert_eq!(history.len(), 3);
}

#[test]
fn iteration_preserves_insertion_order() {
    let mut history = PathHistory::new();
    for i in 0..5 {
        history.push(Path::new(pt(f64::from(i), 0.0)));
    }
    let firsts: Vec<f64> = history.iter().map(|p| p.points()[0].x).collect();
    assert_eq!(firsts, vec![0.0, 1.0, 2.0, 3.0, 4.0]);

    let via_into_iter: Vec<f64> = (&history).into_iter().map(|p| p.points()[0].x).collect();
    assert_eq!(firsts, via_into_iter);
}

#[test]
fn clear_empties_history() {
    let mut history = PathHistory::new();
    history.push(Path::new(pt(0.0, 0.0)));
    history.push(Path::new(pt(1.0, 1.0)));
    history.clear();
    assert!(history.is_empty());
    assert!(history.iter().next().is_none());
}

#[test]
fn push_stores_path_unchanged() {
    let mut history = PathHistory::new();
    let path = path_of(&[(0.0, 0.0), (3.0, 4.0)]);
    let index = history.push(path.clone());
    assert_eq!(history.iter().nth(index), Some(&path));
}
