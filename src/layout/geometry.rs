//! Rectangle primitives shared by every solver stage

use super::types::{Axis, Bounds, Item, Point, Rect};

/// Movements smaller than this are treated as no movement
pub(crate) const EPSILON: f64 = 1e-6;

/// Whether two rectangles intersect with positive area.
///
/// Touching edges do not count.
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    let (ox, oy) = overlap_amount(a, b);
    ox > 0.0 && oy > 0.0
}

/// Signed intersection extents `(ox, oy)`.
///
/// Positive values are the overlap depth on that axis; zero or negative
/// means the rectangles are separated along it.
pub fn overlap_amount(a: &Rect, b: &Rect) -> (f64, f64) {
    let ox = a.right().min(b.right()) - a.x.max(b.x);
    let oy = a.bottom().min(b.bottom()) - a.y.max(b.y);
    (ox, oy)
}

/// Center of a rectangle
pub fn center(a: &Rect) -> Point {
    a.center()
}

/// Keep an item inside the container. Size is never touched.
pub fn clamp_to_bounds(item: &Item, bounds: Bounds) -> Item {
    let mut clamped = item.clone();
    if !bounds.is_ready() {
        return clamped;
    }
    clamped.x = clamp(item.x, 0.0, (bounds.width - item.w).max(0.0));
    clamped.y = clamp(item.y, 0.0, (bounds.height - item.h).max(0.0));
    clamped
}

/// `min(max(value, lo), hi)`; the upper bound wins when the range is inverted
pub(crate) fn clamp(value: f64, lo: f64, hi: f64) -> f64 {
    value.max(lo).min(hi)
}

/// The cheaper separation axis. Equal depths resolve on X.
pub(crate) fn smaller_overlap_axis(ox: f64, oy: f64) -> Axis {
    if oy < ox {
        Axis::Y
    } else {
        Axis::X
    }
}

/// Direction `b` should move away from `a` on an axis, `+1.0` or `-1.0`.
///
/// Coincident centers use `tie`.
pub(crate) fn push_direction(a: &Rect, b: &Rect, axis: Axis, tie: f64) -> f64 {
    let (from, to) = (a.center(), b.center());
    let delta = axis.pick(to.x - from.x, to.y - from.y);
    if delta > 0.0 {
        1.0
    } else if delta < 0.0 {
        -1.0
    } else {
        tie
    }
}

/// Whether two rectangles differ by more than [`EPSILON`] on any edge
pub(crate) fn rect_changed(before: &Rect, after: &Rect) -> bool {
    (before.x - after.x).abs() > EPSILON
        || (before.y - after.y).abs() > EPSILON
        || (before.width - after.width).abs() > EPSILON
        || (before.height - after.height).abs() > EPSILON
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlapping_rects() {
        let a = Rect::new(0.0, 0.0, 100.0, 100.0);
        let b = Rect::new(80.0, 50.0, 100.0, 100.0);
        assert!(overlaps(&a, &b));
        assert_eq!(overlap_amount(&a, &b), (20.0, 50.0));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = Rect::new(0.0, 0.0, 100.0, 100.0);
        let b = Rect::new(100.0, 0.0, 50.0, 100.0);
        assert!(!overlaps(&a, &b));
        assert_eq!(overlap_amount(&a, &b).0, 0.0);
    }

    #[test]
    fn test_separated_amount_is_negative() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(30.0, 0.0, 10.0, 10.0);
        assert_eq!(overlap_amount(&a, &b), (-20.0, 10.0));
    }

    #[test]
    fn test_clamp_to_bounds_keeps_size() {
        let item = Item::new("a", -20.0, 950.0, 200.0, 100.0);
        let clamped = clamp_to_bounds(&item, Bounds::new(1000.0, 800.0));
        assert_eq!((clamped.x, clamped.y), (0.0, 700.0));
        assert_eq!((clamped.w, clamped.h), (200.0, 100.0));
    }

    #[test]
    fn test_clamp_oversized_item_pins_to_origin() {
        let item = Item::new("a", 40.0, 40.0, 500.0, 500.0);
        let clamped = clamp_to_bounds(&item, Bounds::new(300.0, 300.0));
        assert_eq!((clamped.x, clamped.y), (0.0, 0.0));
    }

    #[test]
    fn test_clamp_ignores_unready_bounds() {
        let item = Item::new("a", -20.0, -20.0, 10.0, 10.0);
        assert_eq!(clamp_to_bounds(&item, Bounds::new(0.0, 0.0)), item);
    }

    #[test]
    fn test_axis_and_direction_ties() {
        assert_eq!(smaller_overlap_axis(10.0, 10.0), Axis::X);
        assert_eq!(smaller_overlap_axis(10.0, 4.0), Axis::Y);
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert_eq!(push_direction(&a, &a, Axis::X, 1.0), 1.0);
        let left = Rect::new(-5.0, 0.0, 10.0, 10.0);
        assert_eq!(push_direction(&a, &left, Axis::X, 1.0), -1.0);
    }

    #[test]
    fn test_inverted_clamp_prefers_upper_bound() {
        assert_eq!(clamp(150.0, 180.0, 120.0), 120.0);
    }
}
