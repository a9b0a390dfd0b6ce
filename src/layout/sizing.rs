//! Base cell size and per-item size limits
//!
//! The base size is "one unit" of item size. It is derived from the item
//! count and the container bounds and re-derived whenever either changes;
//! item multipliers are expressed against it so a container resize rescales
//! every item proportionally.

use super::config::LayoutConfig;
use super::geometry::clamp;
use super::types::{BaseSize, Bounds, Item, SizeLimits};

/// Compute the base cell size for `count` items on a square-ish grid.
///
/// `cols = ceil(sqrt(n))`, `rows = ceil(n / cols)`; each cell is the
/// container minus `gap` between and around cells, floored and clamped.
/// Unready bounds yield the configured floor values.
pub fn base_size(count: usize, bounds: Bounds, config: &LayoutConfig) -> BaseSize {
    let cols = ((count as f64).sqrt().ceil() as usize).max(1);
    let rows = count.div_ceil(cols).max(1);
    let (floor_w, floor_h) = config.min_base_size;

    if !bounds.is_ready() {
        return BaseSize {
            width: floor_w,
            height: floor_h,
            cols,
            rows,
        };
    }

    let gap = config.gap;
    let cell_w = (bounds.width - gap * (cols as f64 + 1.0)) / cols as f64;
    let cell_h = (bounds.height - gap * (rows as f64 + 1.0)) / rows as f64;
    let cap_w = config.base_cap_floor.max(bounds.width - 2.0 * gap);
    let cap_h = config.base_cap_floor.max(bounds.height - 2.0 * gap);

    BaseSize {
        width: clamp(cell_w.floor(), floor_w, cap_w),
        height: clamp(cell_h.floor(), floor_h, cap_h),
        cols,
        rows,
    }
}

/// Derive pixel and multiplier limits from the base size and bounds
pub fn size_limits(bounds: Bounds, base: &BaseSize, config: &LayoutConfig) -> SizeLimits {
    let (abs_min_w, abs_min_h) = config.absolute_min_size;
    let min_w = abs_min_w.max(base.width * config.min_mult);
    let min_h = abs_min_h.max(base.height * config.min_mult);
    let max_w = min_w.max((base.width * config.max_mult).min(bounds.width - 1.0));
    let max_h = min_h.max((base.height * config.max_mult).min(bounds.height - 1.0));

    let ratio = |px: f64, unit: f64| {
        if unit > 0.0 {
            clamp(px / unit, config.min_mult, config.max_mult)
        } else {
            1.0
        }
    };

    SizeLimits {
        min_w,
        min_h,
        max_w,
        max_h,
        min_mw: ratio(min_w, base.width),
        min_mh: ratio(min_h, base.height),
        max_mw: ratio(max_w, base.width),
        max_mh: ratio(max_h, base.height),
    }
}

/// Clamp an item's multipliers to the limits and derive its pixel size from them
pub fn apply_multipliers(item: &Item, base: &BaseSize, limits: &SizeLimits) -> Item {
    let mut sized = item.clone();
    sized.mw = limits.clamp_mw(item.mw);
    sized.mh = limits.clamp_mh(item.mh);
    sized.w = base.width * sized.mw;
    sized.h = base.height * sized.mh;
    sized
}

/// Re-derive multipliers from an item's pixel size, clamped to the limits.
///
/// The pixel size is only rewritten when a multiplier had to be clamped.
pub fn multipliers_from_size(item: &Item, base: &BaseSize, limits: &SizeLimits) -> Item {
    if !base.is_valid() {
        return item.clone();
    }
    let mut sized = item.clone();
    let mw = item.w / base.width;
    let mh = item.h / base.height;
    sized.mw = limits.clamp_mw(mw);
    sized.mh = limits.clamp_mh(mh);
    if sized.mw != mw {
        sized.w = base.width * sized.mw;
    }
    if sized.mh != mh {
        sized.h = base.height * sized.mh;
    }
    sized
}
