//! Drag pusher: move one item and displace the neighbors in its way

use super::config::LayoutConfig;
use super::geometry::{clamp_to_bounds, push_direction, smaller_overlap_axis};
use super::normalize::normalize_centers;
use super::push::{cascade, PushPolicy};
use super::types::{Axis, Bounds, Item, Point, Rect};

/// An active drag gesture
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    /// Id of the dragged item
    pub id: String,
    /// Pointer offset from the item's top-left corner at gesture start
    pub offset: Point,
}

impl DragSession {
    /// Start dragging `item` with the pointer at `pointer`
    pub fn begin(item: &Item, pointer: Point) -> Self {
        Self {
            id: item.id.clone(),
            offset: Point::new(pointer.x - item.x, pointer.y - item.y),
        }
    }
}

struct DragPolicy;

impl PushPolicy for DragPolicy {
    fn axis(&self, ox: f64, oy: f64) -> Axis {
        smaller_overlap_axis(ox, oy)
    }

    fn direction(&self, active: &Rect, neighbor: &Rect, axis: Axis) -> f64 {
        push_direction(active, neighbor, axis, 1.0)
    }

    fn give_way(
        &self,
        active: &mut Item,
        _neighbor: &Rect,
        axis: Axis,
        dir: f64,
        residual: f64,
        _pad: f64,
    ) {
        // back off by whatever the neighbor could not absorb
        let pos = active.position(axis);
        active.set_position(axis, pos - dir * residual);
    }
}

/// Apply one pointer move of a drag gesture.
///
/// Unknown ids and unready bounds return the items unchanged.
pub fn drag_to(
    items: &[Item],
    bounds: Bounds,
    session: &DragSession,
    pointer: Point,
    config: &LayoutConfig,
) -> Vec<Item> {
    if !bounds.is_ready() {
        return items.to_vec();
    }
    let Some(active) = items.iter().position(|item| item.id == session.id) else {
        return items.to_vec();
    };

    let mut next = items.to_vec();
    next[active].x = pointer.x - session.offset.x;
    next[active].y = pointer.y - session.offset.y;
    next[active] = clamp_to_bounds(&next[active], bounds);

    let next = cascade(next, active, bounds, config, &DragPolicy);
    normalize_centers(&next, bounds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::geometry::overlaps;

    fn bounds() -> Bounds {
        Bounds::new(1000.0, 800.0)
    }

    fn drag(items: &[Item], session: &DragSession, to: Point) -> Vec<Item> {
        drag_to(items, bounds(), session, to, &LayoutConfig::default())
    }

    #[test]
    fn test_session_records_pointer_offset() {
        let item = Item::new("a", 100.0, 50.0, 200.0, 100.0);
        let session = DragSession::begin(&item, Point::new(130.0, 70.0));
        assert_eq!(session.offset, Point::new(30.0, 20.0));
    }

    #[test]
    fn test_drag_without_neighbors_follows_pointer() {
        let items = vec![Item::new("a", 100.0, 50.0, 200.0, 100.0)];
        let session = DragSession::begin(&items[0], Point::new(100.0, 50.0));
        let moved = drag(&items, &session, Point::new(400.0, 300.0));
        assert_eq!((moved[0].x, moved[0].y), (400.0, 300.0));
        assert_eq!(moved[0].rx, 0.5);
        assert_eq!(moved[0].ry, 0.4375);
    }

    #[test]
    fn test_drag_is_clamped_to_container() {
        let items = vec![Item::new("a", 100.0, 50.0, 200.0, 100.0)];
        let session = DragSession::begin(&items[0], Point::new(100.0, 50.0));
        let moved = drag(&items, &session, Point::new(5000.0, -40.0));
        assert_eq!((moved[0].x, moved[0].y), (800.0, 0.0));
    }

    #[test]
    fn test_neighbor_with_room_is_displaced() {
        let items = vec![
            Item::new("a", 0.0, 0.0, 200.0, 200.0),
            Item::new("b", 300.0, 0.0, 200.0, 200.0),
        ];
        let session = DragSession::begin(&items[0], Point::new(0.0, 0.0));
        let moved = drag(&items, &session, Point::new(150.0, 0.0));
        assert_eq!(moved[0].x, 150.0);
        // overlap 50 + pad 8
        assert_eq!(moved[1].x, 358.0);
        assert!(!overlaps(&moved[0].rect(), &moved[1].rect()));
    }

    #[test]
    fn test_unknown_id_is_noop() {
        let items = vec![Item::new("a", 0.0, 0.0, 200.0, 200.0)];
        let session = DragSession {
            id: "gone".to_string(),
            offset: Point::default(),
        };
        let moved = drag(&items, &session, Point::new(150.0, 0.0));
        assert_eq!(moved, items);
    }

    #[test]
    fn test_unready_bounds_is_noop() {
        let items = vec![Item::new("a", 0.0, 0.0, 200.0, 200.0)];
        let session = DragSession::begin(&items[0], Point::default());
        let config = LayoutConfig::default();
        let moved = drag_to(&items, Bounds::new(0.0, 10.0), &session, Point::new(50.0, 0.0), &config);
        assert_eq!(moved, items);
    }
}
