//! Lint pass for detecting layout invariant violations.
//!
//! Runs after any settle step to check the properties the solver promises:
//! items inside the container, sizes consistent with multipliers and limits,
//! relative centers in sync with geometry, and (best effort) no overlaps.

use std::fmt;

use super::config::LayoutConfig;
use super::geometry::{overlap_amount, overlaps};
use super::normalize::relative_center;
use super::sizing::{base_size, size_limits};
use super::types::{Bounds, Item};

/// Slack allowed for floating point drift
const TOLERANCE: f64 = 1e-6;

/// A lint warning about a layout defect
#[derive(Debug)]
pub struct LintWarning {
    pub category: LintCategory,
    pub message: String,
}

/// Category of lint defect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LintCategory {
    Overlap,
    Containment,
    Size,
    Center,
}

impl fmt::Display for LintCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LintCategory::Overlap => write!(f, "overlap"),
            LintCategory::Containment => write!(f, "containment"),
            LintCategory::Size => write!(f, "size"),
            LintCategory::Center => write!(f, "center"),
        }
    }
}

impl fmt::Display for LintWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.category, self.message)
    }
}

/// Run all lint checks on a settled layout.
///
/// Unready bounds enforce nothing and produce no warnings.
pub fn check(items: &[Item], bounds: Bounds, config: &LayoutConfig) -> Vec<LintWarning> {
    let mut warnings = Vec::new();
    if !bounds.is_ready() {
        return warnings;
    }
    check_containment(items, bounds, &mut warnings);
    check_sizes(items, bounds, config, &mut warnings);
    check_centers(items, bounds, &mut warnings);
    check_overlaps(items, &mut warnings);
    warnings
}

// ── Containment ───────────────────────────────────────────────────

fn check_containment(items: &[Item], bounds: Bounds, warnings: &mut Vec<LintWarning>) {
    for item in items {
        let outside = item.x < -TOLERANCE
            || item.y < -TOLERANCE
            || item.x + item.w > bounds.width + TOLERANCE
            || item.y + item.h > bounds.height + TOLERANCE;
        if outside {
            warnings.push(LintWarning {
                category: LintCategory::Containment,
                message: format!(
                    "\"{}\" ({:.1}, {:.1}, {:.1}×{:.1}) extends outside the {:.0}×{:.0} container",
                    item.id, item.x, item.y, item.w, item.h, bounds.width, bounds.height
                ),
            });
        }
    }
}

// ── Size / multipliers ────────────────────────────────────────────

fn check_sizes(
    items: &[Item],
    bounds: Bounds,
    config: &LayoutConfig,
    warnings: &mut Vec<LintWarning>,
) {
    let base = base_size(items.len(), bounds, config);
    let limits = size_limits(bounds, &base, config);

    for item in items {
        let in_range = item.mw >= limits.min_mw - TOLERANCE
            && item.mw <= limits.max_mw + TOLERANCE
            && item.mh >= limits.min_mh - TOLERANCE
            && item.mh <= limits.max_mh + TOLERANCE;
        if !in_range {
            warnings.push(LintWarning {
                category: LintCategory::Size,
                message: format!(
                    "\"{}\" multipliers {:.3}×{:.3} outside [{:.3}, {:.3}]×[{:.3}, {:.3}]",
                    item.id,
                    item.mw,
                    item.mh,
                    limits.min_mw,
                    limits.max_mw,
                    limits.min_mh,
                    limits.max_mh
                ),
            });
        }

        let drift_w = (item.w - base.width * item.mw).abs();
        let drift_h = (item.h - base.height * item.mh).abs();
        if drift_w > TOLERANCE * base.width.max(1.0) || drift_h > TOLERANCE * base.height.max(1.0) {
            warnings.push(LintWarning {
                category: LintCategory::Size,
                message: format!(
                    "\"{}\" size {:.1}×{:.1} does not match base {:.0}×{:.0} at multipliers {:.3}×{:.3}",
                    item.id, item.w, item.h, base.width, base.height, item.mw, item.mh
                ),
            });
        }
    }
}

// ── Relative centers ──────────────────────────────────────────────

fn check_centers(items: &[Item], bounds: Bounds, warnings: &mut Vec<LintWarning>) {
    for item in items {
        let (rx, ry) = relative_center(&item.rect(), bounds);
        if (rx - item.rx).abs() > TOLERANCE || (ry - item.ry).abs() > TOLERANCE {
            warnings.push(LintWarning {
                category: LintCategory::Center,
                message: format!(
                    "\"{}\" stores center ({:.4}, {:.4}) but sits at ({:.4}, {:.4})",
                    item.id, item.rx, item.ry, rx, ry
                ),
            });
        }
    }
}

// ── Overlaps ──────────────────────────────────────────────────────

fn check_overlaps(items: &[Item], warnings: &mut Vec<LintWarning>) {
    for (i, a) in items.iter().enumerate() {
        for b in &items[i + 1..] {
            if overlaps(&a.rect(), &b.rect()) {
                let (ox, oy) = overlap_amount(&a.rect(), &b.rect());
                warnings.push(LintWarning {
                    category: LintCategory::Overlap,
                    message: format!(
                        "\"{}\" and \"{}\" overlap by {:.1}×{:.1}",
                        a.id, b.id, ox, oy
                    ),
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::normalize::normalize_centers;

    fn settled(items: Vec<Item>, bounds: Bounds) -> Vec<Item> {
        normalize_centers(&items, bounds)
    }

    #[test]
    fn test_clean_layout_has_no_warnings() {
        let bounds = Bounds::new(1000.0, 800.0);
        let items = settled(
            vec![
                Item::new("a", 16.0, 16.0, 476.0, 376.0),
                Item::new("b", 508.0, 16.0, 476.0, 376.0),
                Item::new("c", 16.0, 408.0, 476.0, 376.0),
                Item::new("d", 508.0, 408.0, 476.0, 376.0),
            ],
            bounds,
        );
        let warnings = check(&items, bounds, &LayoutConfig::default());
        assert!(warnings.is_empty(), "unexpected: {:?}", warnings);
    }

    #[test]
    fn test_reports_each_category() {
        let bounds = Bounds::new(1000.0, 800.0);
        let mut items = settled(
            vec![
                Item::new("a", 900.0, 16.0, 476.0, 376.0),
                Item::new("b", 880.0, 16.0, 476.0, 376.0),
                Item::new("c", 16.0, 408.0, 300.0, 376.0),
                Item::new("d", 508.0, 408.0, 476.0, 376.0),
            ],
            bounds,
        );
        items[3].rx = 0.1;

        let categories: Vec<LintCategory> = check(&items, bounds, &LayoutConfig::default())
            .iter()
            .map(|w| w.category)
            .collect();
        assert!(categories.contains(&LintCategory::Containment));
        assert!(categories.contains(&LintCategory::Overlap));
        assert!(categories.contains(&LintCategory::Size));
        assert!(categories.contains(&LintCategory::Center));
    }

    #[test]
    fn test_unready_bounds_skip_checks() {
        let items = vec![Item::new("a", -10.0, -10.0, 5.0, 5.0)];
        assert!(check(&items, Bounds::new(0.0, 0.0), &LayoutConfig::default()).is_empty());
    }

    #[test]
    fn test_category_display() {
        assert_eq!(LintCategory::Overlap.to_string(), "overlap");
        assert_eq!(LintCategory::Containment.to_string(), "containment");
    }
}
