//! Core types for the layout engine

use serde::{Deserialize, Serialize};

/// A 2D point in container pixel space
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// One of the two layout axes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    /// Select the component belonging to this axis
    pub fn pick(self, x: f64, y: f64) -> f64 {
        match self {
            Axis::X => x,
            Axis::Y => y,
        }
    }
}

/// An axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge x-coordinate
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge y-coordinate
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Center point of the rectangle
    pub fn center(&self) -> Point {
        Point {
            x: self.x + self.width / 2.0,
            y: self.y + self.height / 2.0,
        }
    }

    /// Leading edge (left or top) on an axis
    pub fn start(&self, axis: Axis) -> f64 {
        axis.pick(self.x, self.y)
    }

    /// Trailing edge (right or bottom) on an axis
    pub fn end(&self, axis: Axis) -> f64 {
        axis.pick(self.right(), self.bottom())
    }

    /// Size along an axis
    pub fn extent(&self, axis: Axis) -> f64 {
        axis.pick(self.width, self.height)
    }
}

/// Size of the container the items live in.
///
/// Bounds with either dimension `<= 0` are "not ready": every geometry
/// operation passes its input through untouched until real bounds arrive.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Whether both dimensions are positive
    pub fn is_ready(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }

    /// Container size along an axis
    pub fn extent(&self, axis: Axis) -> f64 {
        axis.pick(self.width, self.height)
    }
}

/// A panel placed inside the container.
///
/// `x, y, w, h` are absolute pixels. `mw, mh` express the size as a multiple
/// of the current base cell and `rx, ry` the center as a fraction of the
/// container; those four are what gets persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub id: String,
    /// Configuration kind, carried through to the persisted record
    pub kind: String,
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    pub mw: f64,
    pub mh: f64,
    pub rx: f64,
    pub ry: f64,
    /// Stacking order; higher is in front
    pub z: i64,
}

impl Item {
    /// Create an item with unit multipliers and a zero relative center
    pub fn new(id: impl Into<String>, x: f64, y: f64, w: f64, h: f64) -> Self {
        Self {
            id: id.into(),
            kind: String::new(),
            x,
            y,
            w,
            h,
            mw: 1.0,
            mh: 1.0,
            rx: 0.0,
            ry: 0.0,
            z: 0,
        }
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    pub fn with_multipliers(mut self, mw: f64, mh: f64) -> Self {
        self.mw = mw;
        self.mh = mh;
        self
    }

    pub fn with_z(mut self, z: i64) -> Self {
        self.z = z;
        self
    }

    /// The item's rectangle
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.w, self.h)
    }

    /// Position of the leading edge on an axis
    pub fn position(&self, axis: Axis) -> f64 {
        axis.pick(self.x, self.y)
    }

    pub fn set_position(&mut self, axis: Axis, value: f64) {
        match axis {
            Axis::X => self.x = value,
            Axis::Y => self.y = value,
        }
    }

    /// Pixel size on an axis
    pub fn size(&self, axis: Axis) -> f64 {
        axis.pick(self.w, self.h)
    }

    pub fn set_size(&mut self, axis: Axis, value: f64) {
        match axis {
            Axis::X => self.w = value,
            Axis::Y => self.h = value,
        }
    }
}

/// The uniform cell size derived from item count and container bounds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BaseSize {
    pub width: f64,
    pub height: f64,
    pub cols: usize,
    pub rows: usize,
}

impl BaseSize {
    /// Base cell size on an axis
    pub fn extent(&self, axis: Axis) -> f64 {
        axis.pick(self.width, self.height)
    }

    /// Whether both dimensions are usable as a divisor
    pub fn is_valid(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}

/// Per-item pixel and multiplier limits for the current bounds and base size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeLimits {
    pub min_w: f64,
    pub min_h: f64,
    pub max_w: f64,
    pub max_h: f64,
    pub min_mw: f64,
    pub min_mh: f64,
    pub max_mw: f64,
    pub max_mh: f64,
}

impl SizeLimits {
    /// Minimum pixel size on an axis
    pub fn min_size(&self, axis: Axis) -> f64 {
        axis.pick(self.min_w, self.min_h)
    }

    /// Maximum pixel size on an axis
    pub fn max_size(&self, axis: Axis) -> f64 {
        axis.pick(self.max_w, self.max_h)
    }

    /// Clamp a width multiplier into range
    pub fn clamp_mw(&self, mw: f64) -> f64 {
        mw.max(self.min_mw).min(self.max_mw)
    }

    /// Clamp a height multiplier into range
    pub fn clamp_mh(&self, mh: f64) -> f64 {
        mh.max(self.min_mh).min(self.max_mh)
    }
}
