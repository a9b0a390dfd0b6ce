//! Board lifecycle: gestures, container resizes, widget reconciliation and
//! persistence through the debounced writer.

use std::sync::Arc;
use std::time::{Duration, Instant};

use pretty_assertions::assert_eq;

use widget_board::layout::{lint, overlaps};
use widget_board::store::load_record;
use widget_board::{
    Board, BoardConfig, Bounds, DebouncedWriter, FileStore, Gesture, LayoutRecord, LayoutStore,
    Manifest, MemoryStore, Point, ResizeHandle, StoreError, WidgetSpec,
};

fn bench_widgets() -> Vec<WidgetSpec> {
    Manifest::from_str(include_str!("fixtures/bench.toml"))
        .expect("Should parse")
        .widgets
}

fn saved() -> LayoutRecord {
    LayoutRecord::load(include_str!("fixtures/saved-layout.json")).expect("Should load")
}

fn restored_board() -> Board {
    Board::new(
        BoardConfig::new().with_seed(3),
        bench_widgets(),
        Bounds::new(1000.0, 800.0),
        Some(saved()),
    )
}

fn origin(board: &Board, id: &str) -> (f64, f64) {
    let item = board.item(id).expect("item exists");
    (item.x, item.y)
}

#[test]
fn test_restored_board_follows_record() {
    let board = restored_board();
    assert!(!board.is_dirty());
    assert_eq!(origin(&board, "temp"), (131.0, 106.0));
    assert_eq!(origin(&board, "log"), (631.0, 506.0));
    assert!(board.item("retired").is_none());
    assert_eq!(board.render_order(), vec!["rpm", "pressure", "log", "temp"]);
}

#[test]
fn test_bring_to_front_reorders_paint() {
    let mut board = restored_board();
    assert!(board.bring_to_front("rpm"));
    assert_eq!(board.item("rpm").map(|i| i.z), Some(5));
    assert_eq!(board.render_order(), vec!["pressure", "log", "temp", "rpm"]);
    assert!(board.is_dirty());
    assert!(!board.bring_to_front("retired"));
}

#[test]
fn test_drag_gesture_end_to_end() {
    let mut board = restored_board();
    assert!(board.begin_drag("temp", Point::new(131.0, 106.0)));
    assert!(matches!(board.gesture(), Some(Gesture::Drag(_))));

    // straight into rpm's column
    assert!(board.pointer_move(Point::new(500.0, 106.0)));
    assert!(board.pointer_move(Point::new(600.0, 106.0)));
    assert!(board.pointer_up());
    assert!(board.gesture().is_none());

    let temp = board.item("temp").expect("temp");
    let rpm = board.item("rpm").expect("rpm");
    assert!(!overlaps(&temp.rect(), &rpm.rect()));
    let warnings = lint::check(board.items(), board.bounds(), &board.config().layout);
    assert!(warnings.is_empty(), "{:?}", warnings);
    assert!(board.is_dirty());
}

#[test]
fn test_resize_gesture_respects_limits() {
    let mut board = restored_board();
    let log = board.item("log").cloned().expect("log");
    let corner = Point::new(log.x + log.w, log.y + log.h);
    assert!(board.begin_resize("log", ResizeHandle::SouthEast, corner));

    let limits = match board.gesture() {
        Some(Gesture::Resize(session)) => session.limits,
        other => panic!("expected a resize gesture, got {:?}", other),
    };
    assert!(board.pointer_move(Point::new(5000.0, 5000.0)));

    let grown = board.item("log").cloned().expect("log");
    assert_eq!((grown.x, grown.y), (log.x, log.y));
    assert_eq!(grown.x + grown.w, 1000.0);
    assert_eq!(grown.y + grown.h, 800.0);
    assert!(grown.w <= limits.max_w && grown.h <= limits.max_h);

    assert!(board.pointer_move(Point::new(0.0, 0.0)));
    let shrunk = board.item("log").cloned().expect("log");
    assert_eq!((shrunk.w, shrunk.h), (limits.min_w, limits.min_h));
    assert!(board.pointer_up());
}

#[test]
fn test_container_resize_is_proportional() {
    let mut board = restored_board();
    board.set_bounds(Bounds::new(2000.0, 1600.0));

    let temp = board.item("temp").cloned().expect("temp");
    assert_eq!((temp.w, temp.h), (488.0, 388.0));
    assert_eq!((temp.x, temp.y), (256.0, 206.0));
    assert_eq!((temp.rx, temp.ry), (0.25, 0.25));
    assert!(!board.is_dirty());

    board.set_bounds(Bounds::new(1000.0, 800.0));
    assert_eq!(origin(&board, "temp"), (131.0, 106.0));
    assert_eq!(board.item("temp").map(|i| i.w), Some(238.0));
}

#[test]
fn test_collapsed_container_keeps_the_layout() {
    let mut board = Board::new(
        BoardConfig::new().with_seed(3),
        bench_widgets(),
        Bounds::new(1000.0, 800.0),
        None,
    );
    let before = board.items().to_vec();

    board.set_bounds(Bounds::new(0.0, 0.0));
    assert_eq!(board.items(), &before[..]);
    assert!(!board.begin_drag("temp", Point::new(20.0, 20.0)));

    board.set_bounds(Bounds::new(1000.0, 800.0));
    for (after, before) in board.items().iter().zip(&before) {
        assert_eq!(
            (after.w, after.h, after.mw, after.mh),
            (before.w, before.h, before.mw, before.mh)
        );
        assert_eq!((after.rx, after.ry), (before.rx, before.ry));
        assert!((after.x - before.x).abs() < 1e-6 && (after.y - before.y).abs() < 1e-6);
    }
    assert!(!board.is_dirty());
}

#[test]
fn test_widget_change_while_collapsed_applies_on_return() {
    let mut board = restored_board();
    board.set_bounds(Bounds::new(1000.0, 0.0));

    let mut widgets = bench_widgets();
    widgets.retain(|w| w.id != "log");
    widgets.push(WidgetSpec::new("fan", "gauge"));
    board.set_widgets(widgets);
    assert!(board.item("log").is_some());
    assert!(board.item("fan").is_none());
    assert!(!board.is_dirty());

    board.set_bounds(Bounds::new(1000.0, 800.0));
    assert!(board.item("log").is_none());
    assert!(board.item("fan").is_some());
    assert_eq!(board.item("temp").map(|i| (i.w, i.mw)), Some((238.0, 0.5)));
    assert!(board.is_dirty());
}

#[test]
fn test_container_resize_ends_active_resize() {
    let mut board = restored_board();
    let temp = board.item("temp").cloned().expect("temp");
    let edge = Point::new(temp.x + temp.w, temp.y + temp.h / 2.0);
    assert!(board.begin_resize("temp", ResizeHandle::East, edge));

    board.set_bounds(Bounds::new(600.0, 500.0));
    assert!(board.gesture().is_none());
    assert!(!board.pointer_move(Point::new(edge.x + 5.0, edge.y)));
    let warnings = lint::check(board.items(), board.bounds(), &board.config().layout);
    assert!(warnings.is_empty(), "{:?}", warnings);
    let base = board.items()[0].w / board.items()[0].mw;
    for item in board.items() {
        assert!((item.w - base * item.mw).abs() < 1e-9, "{}", item.id);
    }
}

#[test]
fn test_cancel_keeps_applied_geometry() {
    let mut board = restored_board();
    assert!(board.begin_drag("temp", Point::new(131.0, 106.0)));
    assert!(board.pointer_move(Point::new(300.0, 106.0)));

    assert!(board.pointer_cancel());
    assert!(board.gesture().is_none());
    assert_eq!(origin(&board, "temp"), (300.0, 106.0));
    assert!(board.is_dirty());
    assert!(!board.pointer_cancel());

    assert!(board.begin_resize("rpm", ResizeHandle::West, Point::new(631.0, 200.0)));
    assert!(matches!(board.gesture(), Some(Gesture::Resize(_))));
}

#[test]
fn test_widget_reconciliation_keeps_survivors() {
    let mut board = restored_board();
    let before: Vec<(f64, f64)> = ["temp", "rpm", "pressure"]
        .iter()
        .map(|id| origin(&board, id))
        .collect();

    let mut widgets = bench_widgets();
    widgets.retain(|w| w.id != "log");
    widgets.push(WidgetSpec::new("fan", "gauge"));
    board.set_widgets(widgets);

    let after: Vec<(f64, f64)> = ["temp", "rpm", "pressure"]
        .iter()
        .map(|id| origin(&board, id))
        .collect();
    assert_eq!(after, before);
    assert!(board.item("log").is_none());
    let fan = board.item("fan").expect("fan");
    assert_eq!((fan.mw, fan.mh), (1.0, 1.0));
    assert!(board.is_dirty());
}

#[test]
fn test_gesture_on_removed_item_goes_stale() {
    let mut board = restored_board();
    assert!(board.begin_drag("log", Point::new(700.0, 600.0)));
    board.set_widgets(
        bench_widgets()
            .into_iter()
            .filter(|w| w.id != "log")
            .collect(),
    );

    let before = board.snapshot();
    assert!(!board.pointer_move(Point::new(100.0, 100.0)));
    assert!(Arc::ptr_eq(&before, &board.snapshot()));
    assert!(board.pointer_up());
}

#[test]
fn test_writes_are_debounced() {
    let mut board = restored_board();
    let key = board.config().storage_key.clone();
    let mut writer = DebouncedWriter::new(MemoryStore::new(), key.clone(), board.config().debounce);
    let start = Instant::now();

    // nothing changed yet
    assert!(!board.sync_to(&mut writer, 1, start));

    for step in 0..5u64 {
        assert!(board.bring_to_front("rpm"));
        let now = start + Duration::from_millis(100 * step);
        assert!(board.sync_to(&mut writer, step, now));
        assert!(!writer.poll(now));
    }
    assert!(!board.is_dirty());
    assert!(writer.poll(start + Duration::from_millis(900)));
    assert!(!writer.is_pending());
    assert_eq!(writer.store().writes(), 1);

    let stored = load_record(writer.store(), &key).expect("record stored");
    assert_eq!(stored, board.record(4));
}

struct BrokenStore;

impl LayoutStore for BrokenStore {
    fn get_data(&self, _key: &str) -> Result<Option<String>, StoreError> {
        Err(StoreError::Unavailable("quota exceeded".to_string()))
    }

    fn set_data(&mut self, _key: &str, _value: Option<&str>) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("quota exceeded".to_string()))
    }
}

#[test]
fn test_store_failures_are_swallowed() {
    let mut board = restored_board();
    assert!(load_record(&BrokenStore, "widget-board.layout").is_none());

    let mut writer = DebouncedWriter::new(BrokenStore, "widget-board.layout", Duration::ZERO);
    let before = board.snapshot();
    assert!(board.bring_to_front("log"));
    assert!(board.sync_to(&mut writer, 0, Instant::now()));
    assert!(writer.flush());
    assert!(!writer.is_pending());
    assert_eq!(before.len(), board.items().len());
    assert_eq!(board.render_order().last(), Some(&"log"));
}

#[test]
fn test_file_store_round_trip() {
    let dir = std::env::temp_dir().join(format!("widget-board-test-{}", std::process::id()));
    let mut store = FileStore::new(&dir);
    let board = restored_board();
    let text = board.record(7).to_json().expect("encode");

    store.set_data("bench/layout", Some(&text)).expect("write");
    let loaded = load_record(&store, "bench/layout").expect("read back");
    assert_eq!(loaded, board.record(7));

    let reopened = Board::new(
        BoardConfig::new().with_seed(99),
        bench_widgets(),
        Bounds::new(1000.0, 800.0),
        Some(loaded),
    );
    assert_eq!(reopened.items(), board.items());

    store.set_data("bench/layout", None).expect("remove");
    assert!(store.get_data("bench/layout").expect("read").is_none());
    let _ = std::fs::remove_dir_all(&dir);
}
