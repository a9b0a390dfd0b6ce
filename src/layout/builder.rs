//! Layout builder: configured widgets + optional persisted record → items
//!
//! Every widget first gets a grid-seeded default. Widgets that also appear in
//! the persisted record then take their multipliers, relative center and
//! stacking order from it, each clamped to its valid range. Record entries
//! for widgets no longer configured are dropped. The result is resolved and
//! normalized so it satisfies the layout invariants. An overlaid item that
//! nothing had to move keeps its persisted relative center exactly.

use std::collections::HashMap;

use rand::Rng;

use super::config::LayoutConfig;
use super::geometry::{clamp, clamp_to_bounds};
use super::normalize::{normalize_centers, relative_center};
use super::resolver::resolve_overlaps;
use super::sizing::{apply_multipliers, base_size, size_limits};
use super::types::{BaseSize, Bounds, Item, SizeLimits};
use crate::manifest::WidgetSpec;
use crate::record::{LayoutRecord, WidgetRecord};

/// Build the concrete item list for `widgets` inside `bounds`.
pub fn build_layout(
    widgets: &[WidgetSpec],
    record: Option<&LayoutRecord>,
    bounds: Bounds,
    config: &LayoutConfig,
    rng: &mut impl Rng,
) -> Vec<Item> {
    let base = base_size(widgets.len(), bounds, config);
    let limits = size_limits(bounds, &base, config);

    let saved: HashMap<&str, &WidgetRecord> = record
        .map(|r| r.widgets.iter().map(|w| (w.id.as_str(), w)).collect())
        .unwrap_or_default();

    let mut anchors: Vec<Option<Item>> = Vec::with_capacity(widgets.len());
    let items: Vec<Item> = widgets
        .iter()
        .enumerate()
        .map(|(index, spec)| {
            let seeded = seed_item(spec, index, &base, &limits, bounds, config, rng);
            match saved.get(spec.id.as_str()) {
                Some(entry) => {
                    let (item, anchored) = overlay(seeded, entry, &base, &limits, bounds);
                    anchors.push(anchored.then(|| item.clone()));
                    item
                }
                None => {
                    anchors.push(None);
                    seeded
                }
            }
        })
        .collect();

    let items = resolve_overlaps(&items, bounds, &[], config);
    normalize_centers(&items, bounds)
        .into_iter()
        .zip(anchors)
        .map(|(item, anchor)| match anchor {
            Some(a) if a.x == item.x && a.y == item.y => Item {
                rx: a.rx,
                ry: a.ry,
                ..item
            },
            _ => item,
        })
        .collect()
}

/// Default grid placement for the widget at `index`
fn seed_item(
    spec: &WidgetSpec,
    index: usize,
    base: &BaseSize,
    limits: &SizeLimits,
    bounds: Bounds,
    config: &LayoutConfig,
    rng: &mut impl Rng,
) -> Item {
    let col = (index % base.cols) as f64;
    let row = (index / base.cols) as f64;
    let x = config.gap + col * (base.width + config.gap) + jitter(rng, config.jitter);
    let y = config.gap + row * (base.height + config.gap) + jitter(rng, config.jitter);

    let item = Item::new(spec.id.clone(), x, y, base.width, base.height)
        .with_kind(spec.kind.clone())
        .with_z(index as i64);
    let item = clamp_to_bounds(&apply_multipliers(&item, base, limits), bounds);
    with_relative_center(item, bounds)
}

/// Apply the persisted fields of `entry` on top of a seeded item.
///
/// Also reports whether the item sits exactly where its relative center
/// put it, i.e. bounds clamping did not move it.
fn overlay(
    seeded: Item,
    entry: &WidgetRecord,
    base: &BaseSize,
    limits: &SizeLimits,
    bounds: Bounds,
) -> (Item, bool) {
    let mut item = Item {
        mw: entry.mw.unwrap_or(seeded.mw),
        mh: entry.mh.unwrap_or(seeded.mh),
        rx: clamp(entry.rx.unwrap_or(seeded.rx), 0.0, 1.0),
        ry: clamp(entry.ry.unwrap_or(seeded.ry), 0.0, 1.0),
        z: entry.z.unwrap_or(seeded.z),
        ..seeded
    };
    item = apply_multipliers(&item, base, limits);
    if !bounds.is_ready() {
        return (item, false);
    }
    item.x = item.rx * bounds.width - item.w / 2.0;
    item.y = item.ry * bounds.height - item.h / 2.0;
    let clamped = clamp_to_bounds(&item, bounds);
    let anchored = clamped.x == item.x && clamped.y == item.y;
    (clamped, anchored)
}

fn with_relative_center(item: Item, bounds: Bounds) -> Item {
    if !bounds.is_ready() {
        return item;
    }
    let (rx, ry) = relative_center(&item.rect(), bounds);
    Item { rx, ry, ..item }
}

fn jitter(rng: &mut impl Rng, amount: f64) -> f64 {
    if amount > 0.0 {
        rng.random_range(-amount..=amount)
    } else {
        0.0
    }
}
