//! Relative center normalization
//!
//! `rx, ry` are the canonical persisted position: the item center as a
//! fraction of the container. They are always recomputed from geometry,
//! never edited directly.

use super::geometry::clamp;
use super::types::{Bounds, Item, Rect};

/// Container-relative center of a rectangle, clamped to `[0, 1]`
pub fn relative_center(rect: &Rect, bounds: Bounds) -> (f64, f64) {
    let center = rect.center();
    (
        clamp(center.x / bounds.width, 0.0, 1.0),
        clamp(center.y / bounds.height, 0.0, 1.0),
    )
}

/// Recompute `rx, ry` for every item. Unready bounds pass through.
pub fn normalize_centers(items: &[Item], bounds: Bounds) -> Vec<Item> {
    if !bounds.is_ready() {
        return items.to_vec();
    }
    items
        .iter()
        .map(|item| {
            let (rx, ry) = relative_center(&item.rect(), bounds);
            Item {
                rx,
                ry,
                ..item.clone()
            }
        })
        .collect()
}
