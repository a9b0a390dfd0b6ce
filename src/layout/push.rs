//! Push cascade shared by the drag and resize pushers
//!
//! The active item displaces every neighbor it overlaps. A neighbor that
//! would be pushed out of the container is pinned against the edge and the
//! active item gives way instead; how it gives way is up to the gesture.
//! After each direct pass the global resolver runs with the active item
//! locked to settle second-order collisions.

use tracing::trace;

use super::config::LayoutConfig;
use super::geometry::{clamp, clamp_to_bounds, overlap_amount, overlaps, rect_changed, EPSILON};
use super::resolver::resolve;
use super::types::{Axis, Bounds, Item, Rect};

/// Gesture-specific choices made during a push cascade
pub(crate) trait PushPolicy {
    /// Axis on which to separate the active item from a neighbor
    fn axis(&self, ox: f64, oy: f64) -> Axis;

    /// Direction, `+1.0` or `-1.0`, the neighbor is pushed along `axis`
    fn direction(&self, active: &Rect, neighbor: &Rect, axis: Axis) -> f64;

    /// Adjust the active item so it clears a neighbor pinned at the container
    /// edge. `dir` is the direction the neighbor was pushed and `residual`
    /// the distance it could not travel.
    fn give_way(
        &self,
        active: &mut Item,
        neighbor: &Rect,
        axis: Axis,
        dir: f64,
        residual: f64,
        pad: f64,
    );
}

/// Run the cascade for the item at `active`, returning the settled list
pub(crate) fn cascade(
    mut items: Vec<Item>,
    active: usize,
    bounds: Bounds,
    config: &LayoutConfig,
    policy: &impl PushPolicy,
) -> Vec<Item> {
    let active_id = items[active].id.clone();

    for round in 0..config.max_push_rounds {
        let mut moved = false;

        for j in 0..items.len() {
            if j == active {
                continue;
            }
            let a = items[active].rect();
            let b = items[j].rect();
            if !overlaps(&a, &b) {
                continue;
            }

            let (ox, oy) = overlap_amount(&a, &b);
            let axis = policy.axis(ox, oy);
            let dir = policy.direction(&a, &b, axis);

            // fully clear of the active item, even when contained in it
            let target = if dir > 0.0 {
                a.end(axis) + config.pad
            } else {
                a.start(axis) - config.pad - b.extent(axis)
            };
            let limit = (bounds.extent(axis) - b.extent(axis)).max(0.0);
            let placed = clamp(target, 0.0, limit);
            if (placed - b.start(axis)).abs() > EPSILON {
                items[j].set_position(axis, placed);
                moved = true;
            }

            let residual = (target - placed).abs();
            if residual > EPSILON {
                let neighbor = items[j].rect();
                let before = items[active].rect();
                policy.give_way(&mut items[active], &neighbor, axis, dir, residual, config.pad);
                items[active] = clamp_to_bounds(&items[active], bounds);
                if rect_changed(&before, &items[active].rect()) {
                    moved = true;
                }
            }
        }

        let settled = resolve(&items, bounds, &[active_id.as_str()], config);
        if settled.adjustments > 0 {
            moved = true;
        }
        items = settled.items;

        if !moved {
            trace!(id = %active_id, round, "push cascade settled");
            break;
        }
    }

    items
}
