//! Layout engine for placing, dragging and resizing items in a container
//!
//! Every operation here is a pure function from an item list (plus bounds
//! and configuration) to a new item list. Callers swap the whole list in.
//!
//! Pipeline stages, leaves first:
//!
//! - [`geometry`]: overlap tests, centers, bounds clamping
//! - [`sizing`]: base cell size and per-item size limits
//! - [`resolver`]: iterative all-pairs overlap resolution
//! - [`drag`] / [`resize`]: interactive push cascades
//! - [`normalize`]: container-relative centers for persistence
//! - [`builder`]: initial placement from configuration and a saved record
//! - [`lint`]: invariant checks over a settled layout

pub mod builder;
pub mod config;
pub mod drag;
pub mod geometry;
pub mod lint;
pub mod normalize;
mod push;
pub mod resize;
pub mod resolver;
pub mod sizing;
pub mod types;

pub use builder::build_layout;
pub use config::LayoutConfig;
pub use drag::{drag_to, DragSession};
pub use geometry::{center, clamp_to_bounds, overlap_amount, overlaps};
pub use lint::{LintCategory, LintWarning};
pub use normalize::{normalize_centers, relative_center};
pub use resize::{resize_to, ResizeHandle, ResizeSession};
pub use resolver::{resolve, resolve_overlaps, Resolution};
pub use sizing::{apply_multipliers, base_size, multipliers_from_size, size_limits};
pub use types::*;
