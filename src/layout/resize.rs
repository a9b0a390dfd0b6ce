//! Resize pusher: grow or shrink one item from a handle, displacing neighbors
//!
//! Only the edges named by the handle move; the opposite edge stays where it
//! was when the gesture started. Sizes are clamped to the limits captured at
//! gesture start and to the container edge on the side being dragged.

use std::fmt;
use std::str::FromStr;

use super::config::LayoutConfig;
use super::geometry::{clamp, clamp_to_bounds, push_direction, smaller_overlap_axis};
use super::normalize::normalize_centers;
use super::push::{cascade, PushPolicy};
use super::sizing::multipliers_from_size;
use super::types::{Axis, BaseSize, Bounds, Item, Point, Rect, SizeLimits};

/// The handle a resize gesture was started from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResizeHandle {
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl ResizeHandle {
    pub const ALL: [ResizeHandle; 8] = [
        ResizeHandle::North,
        ResizeHandle::South,
        ResizeHandle::East,
        ResizeHandle::West,
        ResizeHandle::NorthEast,
        ResizeHandle::NorthWest,
        ResizeHandle::SouthEast,
        ResizeHandle::SouthWest,
    ];

    /// Edge directions `(dir_x, dir_y)`; zero means that axis is fixed
    pub fn direction(self) -> (i8, i8) {
        match self {
            ResizeHandle::North => (0, -1),
            ResizeHandle::South => (0, 1),
            ResizeHandle::East => (1, 0),
            ResizeHandle::West => (-1, 0),
            ResizeHandle::NorthEast => (1, -1),
            ResizeHandle::NorthWest => (-1, -1),
            ResizeHandle::SouthEast => (1, 1),
            ResizeHandle::SouthWest => (-1, 1),
        }
    }

    /// Direction on one axis
    pub fn direction_on(self, axis: Axis) -> i8 {
        let (dx, dy) = self.direction();
        match axis {
            Axis::X => dx,
            Axis::Y => dy,
        }
    }

    /// The single axis an edge handle acts on; `None` for corners
    pub fn edge_axis(self) -> Option<Axis> {
        match self.direction() {
            (0, _) => Some(Axis::Y),
            (_, 0) => Some(Axis::X),
            _ => None,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            ResizeHandle::North => "n",
            ResizeHandle::South => "s",
            ResizeHandle::East => "e",
            ResizeHandle::West => "w",
            ResizeHandle::NorthEast => "ne",
            ResizeHandle::NorthWest => "nw",
            ResizeHandle::SouthEast => "se",
            ResizeHandle::SouthWest => "sw",
        }
    }
}

impl fmt::Display for ResizeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ResizeHandle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ResizeHandle::ALL
            .into_iter()
            .find(|handle| handle.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                format!(
                    "unknown resize handle '{}' (expected n, s, e, w, ne, nw, se or sw)",
                    s
                )
            })
    }
}

/// An active resize gesture
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeSession {
    pub id: String,
    pub handle: ResizeHandle,
    /// Pointer position at gesture start
    pub start: Point,
    /// Item rectangle at gesture start
    pub anchor: Rect,
    /// Base size captured at gesture start
    pub base: BaseSize,
    /// Limits captured at gesture start
    pub limits: SizeLimits,
}

impl ResizeSession {
    pub fn begin(
        item: &Item,
        handle: ResizeHandle,
        pointer: Point,
        base: BaseSize,
        limits: SizeLimits,
    ) -> Self {
        Self {
            id: item.id.clone(),
            handle,
            start: pointer,
            anchor: item.rect(),
            base,
            limits,
        }
    }

    /// The rectangle the handle asks for, before any pushing
    fn desired_rect(&self, pointer: Point, bounds: Bounds) -> Rect {
        let (x, width) = self.resize_axis(Axis::X, pointer.x - self.start.x, bounds);
        let (y, height) = self.resize_axis(Axis::Y, pointer.y - self.start.y, bounds);
        Rect::new(x, y, width, height)
    }

    /// `(start, size)` on one axis after moving the active edge by `delta`
    fn resize_axis(&self, axis: Axis, delta: f64, bounds: Bounds) -> (f64, f64) {
        let lead = self.anchor.start(axis);
        let trail = self.anchor.end(axis);
        let min = self.limits.min_size(axis);
        let max = self.limits.max_size(axis);

        match self.handle.direction_on(axis) {
            1 => {
                let size = clamp(trail + delta - lead, min, max);
                let size = size.min(bounds.extent(axis) - lead).max(0.0);
                (lead, size)
            }
            -1 => {
                let size = clamp(trail - (lead + delta), min, max);
                let size = size.min(trail).max(0.0);
                (trail - size, size)
            }
            _ => (lead, trail - lead),
        }
    }
}

struct ResizePolicy<'a> {
    session: &'a ResizeSession,
}

impl PushPolicy for ResizePolicy<'_> {
    fn axis(&self, ox: f64, oy: f64) -> Axis {
        self.session
            .handle
            .edge_axis()
            .unwrap_or_else(|| smaller_overlap_axis(ox, oy))
    }

    fn direction(&self, _active: &Rect, neighbor: &Rect, axis: Axis) -> f64 {
        // relative to the rectangle at gesture start, not the grown one
        let tie = if self.session.handle.direction_on(axis) < 0 {
            -1.0
        } else {
            1.0
        };
        push_direction(&self.session.anchor, neighbor, axis, tie)
    }

    fn give_way(
        &self,
        active: &mut Item,
        neighbor: &Rect,
        axis: Axis,
        dir: f64,
        _residual: f64,
        pad: f64,
    ) {
        let handle_dir = f64::from(self.session.handle.direction_on(axis));
        // neighbors on the fixed side never move the fixed edge
        if handle_dir == 0.0 || dir != handle_dir {
            return;
        }
        let min = self.session.limits.min_size(axis);
        let lead = active.position(axis);
        let size = active.size(axis);
        let trail = lead + size;

        if dir > 0.0 {
            let clipped = (neighbor.start(axis) - pad - lead).max(min).min(size);
            active.set_size(axis, clipped);
        } else {
            let clipped = (trail - (neighbor.end(axis) + pad)).max(min).min(size);
            active.set_position(axis, trail - clipped);
            active.set_size(axis, clipped);
        }
    }
}

/// Apply one pointer move of a resize gesture.
///
/// Unknown ids, unready bounds and sessions with a degenerate base size
/// return the items unchanged.
pub fn resize_to(
    items: &[Item],
    bounds: Bounds,
    session: &ResizeSession,
    pointer: Point,
    config: &LayoutConfig,
) -> Vec<Item> {
    if !bounds.is_ready() || !session.base.is_valid() {
        return items.to_vec();
    }
    let Some(active) = items.iter().position(|item| item.id == session.id) else {
        return items.to_vec();
    };

    let desired = session.desired_rect(pointer, bounds);
    let mut next = items.to_vec();
    next[active].x = desired.x;
    next[active].y = desired.y;
    next[active].w = desired.width;
    next[active].h = desired.height;
    next[active] = clamp_to_bounds(&next[active], bounds);

    let mut next = cascade(next, active, bounds, config, &ResizePolicy { session });
    next[active] = multipliers_from_size(&next[active], &session.base, &session.limits);
    normalize_centers(&next, bounds)
}
