//! Configuration for the layout engine

use serde::Deserialize;

/// Tunable constants for sizing, separation and the solver budgets
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Gap between grid cells and around the outer edge
    pub gap: f64,

    /// Extra clearance added on top of the overlap depth when separating items
    pub pad: f64,

    /// Smallest size multiplier relative to the base cell
    pub min_mult: f64,

    /// Largest size multiplier relative to the base cell
    pub max_mult: f64,

    /// Pixel floor for item size (width, height), keeps tiny containers usable
    pub absolute_min_size: (f64, f64),

    /// Lower clamp for the base cell size (width, height)
    pub min_base_size: (f64, f64),

    /// Lowest value the upper base-size clamp may take
    pub base_cap_floor: f64,

    /// Pass budget for the global overlap resolver
    pub max_resolve_passes: usize,

    /// Round budget for the interactive push cascade
    pub max_push_rounds: usize,

    /// Maximum random offset applied to freshly seeded items
    pub jitter: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            gap: 16.0,
            pad: 8.0,
            min_mult: 0.25,
            max_mult: 3.0,
            absolute_min_size: (96.0, 80.0),
            min_base_size: (180.0, 120.0),
            base_cap_floor: 120.0,
            max_resolve_passes: 40,
            max_push_rounds: 40,
            jitter: 12.0,
        }
    }
}

impl LayoutConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the grid gap
    pub fn with_gap(mut self, gap: f64) -> Self {
        self.gap = gap;
        self
    }

    /// Set the separation padding
    pub fn with_pad(mut self, pad: f64) -> Self {
        self.pad = pad;
        self
    }

    /// Set the multiplier range
    pub fn with_multiplier_range(mut self, min: f64, max: f64) -> Self {
        self.min_mult = min;
        self.max_mult = max;
        self
    }

    /// Set the resolver pass budget
    pub fn with_resolve_passes(mut self, passes: usize) -> Self {
        self.max_resolve_passes = passes;
        self
    }

    /// Set the push cascade round budget
    pub fn with_push_rounds(mut self, rounds: usize) -> Self {
        self.max_push_rounds = rounds;
        self
    }

    /// Set the seeding jitter; zero disables it
    pub fn with_jitter(mut self, jitter: f64) -> Self {
        self.jitter = jitter;
        self
    }
}
