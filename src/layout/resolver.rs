//! Global overlap resolver
//!
//! An iterative all-pairs separation pass used for seeding, bulk re-layout
//! and as the second-order settling step of the interactive pushers. Each
//! pass visits every unordered pair `(i, j)` with `i < j` in list order and
//! separates overlapping pairs along the axis with the smaller overlap.
//! Adjustments are visible to later pairs in the same pass. The loop ends at
//! the first pass that moves nothing, or when the pass budget runs out; in
//! the latter case the best achieved state is returned, which may still
//! contain overlaps.

use tracing::debug;

use super::config::LayoutConfig;
use super::geometry::{
    clamp_to_bounds, overlap_amount, overlaps, push_direction, smaller_overlap_axis, EPSILON,
};
use super::types::{Axis, Bounds, Item};

/// Outcome of a resolver run
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub items: Vec<Item>,
    /// Passes executed, including the final quiet pass
    pub passes: usize,
    /// Pair separations that actually moved at least one item
    pub adjustments: usize,
    /// Whether a pass finished with no adjustments
    pub converged: bool,
}

/// Separate overlapping items, leaving `locked` ids in place.
pub fn resolve_overlaps(
    items: &[Item],
    bounds: Bounds,
    locked: &[&str],
    config: &LayoutConfig,
) -> Vec<Item> {
    resolve(items, bounds, locked, config).items
}

/// Like [`resolve_overlaps`], also reporting how the run went.
pub fn resolve(
    items: &[Item],
    bounds: Bounds,
    locked: &[&str],
    config: &LayoutConfig,
) -> Resolution {
    let mut out = items.to_vec();
    if !bounds.is_ready() || out.len() < 2 {
        return Resolution {
            items: out,
            passes: 0,
            adjustments: 0,
            converged: true,
        };
    }

    let pinned: Vec<bool> = out
        .iter()
        .map(|item| locked.contains(&item.id.as_str()))
        .collect();

    let mut passes = 0;
    let mut adjustments = 0;
    let mut converged = false;

    while passes < config.max_resolve_passes {
        passes += 1;
        let mut moved_pairs = 0;

        for i in 0..out.len() {
            for j in (i + 1)..out.len() {
                let (share_i, share_j) = match (pinned[i], pinned[j]) {
                    (true, true) => continue,
                    (false, false) => (0.5, 0.5),
                    (true, false) => (0.0, 1.0),
                    (false, true) => (1.0, 0.0),
                };

                let a = out[i].rect();
                let b = out[j].rect();
                if !overlaps(&a, &b) {
                    continue;
                }

                let (ox, oy) = overlap_amount(&a, &b);
                let axis = smaller_overlap_axis(ox, oy);
                let dir = push_direction(&a, &b, axis, 1.0);
                let shift = axis.pick(ox, oy) + config.pad;

                let moved_i = nudge(&mut out[i], axis, -dir * shift * share_i, bounds);
                let moved_j = nudge(&mut out[j], axis, dir * shift * share_j, bounds);
                if moved_i || moved_j {
                    moved_pairs += 1;
                }
            }
        }

        adjustments += moved_pairs;
        if moved_pairs == 0 {
            converged = true;
            break;
        }
    }

    debug!(
        items = out.len(),
        passes, adjustments, converged, "overlap resolution finished"
    );

    Resolution {
        items: out,
        passes,
        adjustments,
        converged,
    }
}

/// Shift an item along an axis and re-clamp it; reports whether it moved
fn nudge(item: &mut Item, axis: Axis, delta: f64, bounds: Bounds) -> bool {
    if delta == 0.0 {
        return false;
    }
    let before = item.position(axis);
    item.set_position(axis, before + delta);
    *item = clamp_to_bounds(item, bounds);
    (item.position(axis) - before).abs() > EPSILON
}
