//! Widget Board - a push-based layout engine for freely placed panels
//!
//! Panels ("widgets") can be dragged and resized anywhere inside a fixed
//! container. The engine keeps them inside the container, pushes neighbors
//! out of the way instead of letting panels overlap, and stores sizes and
//! positions relative to the container so a layout survives container
//! resizes and restarts.
//!
//! # Example
//!
//! ```rust
//! use widget_board::{arrange, Bounds, WidgetSpec};
//!
//! let widgets = vec![WidgetSpec::new("temp", "gauge"), WidgetSpec::new("rpm", "gauge")];
//! let items = arrange(&widgets, None, Bounds::new(1000.0, 800.0));
//! assert_eq!(items.len(), 2);
//! assert!(items.iter().all(|i| i.x >= 0.0 && i.x + i.w <= 1000.0));
//! ```

pub mod board;
pub mod error;
pub mod layout;
pub mod manifest;
pub mod record;
pub mod store;

pub use board::{Board, BoardConfig, Gesture};
pub use error::RecordError;
pub use layout::{Bounds, Item, LayoutConfig, Point, ResizeHandle};
pub use manifest::{Manifest, ManifestError, WidgetSpec};
pub use record::{LayoutRecord, WidgetRecord};
pub use store::{DebouncedWriter, FileStore, LayoutStore, MemoryStore, StoreError};

use rand::rngs::SmallRng;
use rand::SeedableRng;

/// Lay out `widgets` with the default configuration.
///
/// `saved` is the text of a previously persisted record; anything that does
/// not decode as a valid record is ignored and the default grid is used.
///
/// ```rust
/// use widget_board::{arrange, Bounds, WidgetSpec};
///
/// let widgets = vec![WidgetSpec::new("temp", "gauge")];
/// let saved = r#"{"version":1,"savedAt":0,"widgets":[{"id":"temp","mw":0.5,"mh":0.5,"rx":0.5,"ry":0.5,"z":0}]}"#;
/// let items = arrange(&widgets, Some(saved), Bounds::new(1000.0, 800.0));
/// assert_eq!(items[0].rx, 0.5);
/// ```
pub fn arrange(widgets: &[WidgetSpec], saved: Option<&str>, bounds: Bounds) -> Vec<Item> {
    let record = saved.and_then(LayoutRecord::load);
    layout::build_layout(
        widgets,
        record.as_ref(),
        bounds,
        &LayoutConfig::default(),
        &mut SmallRng::from_os_rng(),
    )
}
