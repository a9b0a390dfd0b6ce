//! Board controller
//!
//! Owns the current item snapshot, the container bounds and the single
//! active gesture. Every operation computes a complete next snapshot and
//! swaps it in, so readers holding an earlier [`Board::snapshot`] keep a
//! consistent view.

use std::sync::Arc;
use std::time::{Duration, Instant};

use rand::rngs::SmallRng;
use rand::SeedableRng;
use tracing::{debug, trace, warn};

use crate::layout::{
    base_size, build_layout, drag_to, resize_to, size_limits, Bounds, DragSession, Item,
    LayoutConfig, Point, ResizeHandle, ResizeSession,
};
use crate::manifest::WidgetSpec;
use crate::record::LayoutRecord;
use crate::store::{DebouncedWriter, LayoutStore};

/// Settings for a [`Board`]
#[derive(Debug, Clone)]
pub struct BoardConfig {
    /// Layout engine constants
    pub layout: LayoutConfig,
    /// Store key the layout record is saved under
    pub storage_key: String,
    /// Quiet period before a layout write goes out
    pub debounce: Duration,
    /// Seed for placement jitter; `None` seeds from the OS
    pub seed: Option<u64>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            layout: LayoutConfig::default(),
            storage_key: "widget-board.layout".to_string(),
            debounce: Duration::from_millis(400),
            seed: None,
        }
    }
}

impl BoardConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_layout(mut self, layout: LayoutConfig) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// The interactive gesture in progress
#[derive(Debug, Clone, PartialEq)]
pub enum Gesture {
    Drag(DragSession),
    Resize(ResizeSession),
}

impl Gesture {
    /// Id of the item the gesture acts on
    pub fn item_id(&self) -> &str {
        match self {
            Gesture::Drag(s) => &s.id,
            Gesture::Resize(s) => &s.id,
        }
    }
}

/// A board of widgets inside one container
#[derive(Debug)]
pub struct Board {
    config: BoardConfig,
    widgets: Vec<WidgetSpec>,
    bounds: Bounds,
    items: Arc<[Item]>,
    gesture: Option<Gesture>,
    /// Record to lay out from once bounds first become ready
    initial: Option<LayoutRecord>,
    laid_out: bool,
    dirty: bool,
    /// Widget list changed while the container was not ready
    widgets_changed: bool,
    rng: SmallRng,
}

impl Board {
    /// Build a board from configured widgets and an optional saved record
    pub fn new(
        config: BoardConfig,
        widgets: Vec<WidgetSpec>,
        bounds: Bounds,
        record: Option<LayoutRecord>,
    ) -> Self {
        let rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        };
        let mut board = Self {
            config,
            widgets,
            bounds,
            items: Arc::from(Vec::new()),
            gesture: None,
            initial: record,
            laid_out: false,
            dirty: false,
            widgets_changed: false,
            rng,
        };
        board.relayout();
        board
    }

    /// Current items; cheap to clone and never mutated after hand-out
    pub fn snapshot(&self) -> Arc<[Item]> {
        Arc::clone(&self.items)
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn item(&self, id: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn widgets(&self) -> &[WidgetSpec] {
        &self.widgets
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn gesture(&self) -> Option<&Gesture> {
        self.gesture.as_ref()
    }

    /// Ids in paint order: ascending `z`, ties in list order
    pub fn render_order(&self) -> Vec<&str> {
        let mut order: Vec<(usize, &Item)> = self.items.iter().enumerate().collect();
        order.sort_by_key(|(index, item)| (item.z, *index));
        order.into_iter().map(|(_, item)| item.id.as_str()).collect()
    }

    /// Raise an item above every other. Returns `false` for unknown ids.
    pub fn bring_to_front(&mut self, id: &str) -> bool {
        let Some(index) = self.items.iter().position(|item| item.id == id) else {
            return false;
        };
        let top = self.items.iter().map(|item| item.z).max().unwrap_or(0);
        let mut next = self.items.to_vec();
        next[index].z = top + 1;
        self.replace(next);
        self.dirty = true;
        true
    }

    /// Start dragging `id` with the pointer at `pointer`.
    ///
    /// Refused while another gesture is active, for unknown ids, and while
    /// bounds are not ready.
    pub fn begin_drag(&mut self, id: &str, pointer: Point) -> bool {
        if self.gesture.is_some() || !self.bounds.is_ready() || !self.bring_to_front(id) {
            return false;
        }
        let Some(item) = self.item(id) else {
            return false;
        };
        self.gesture = Some(Gesture::Drag(DragSession::begin(item, pointer)));
        trace!(id, "drag started");
        true
    }

    /// Start resizing `id` from `handle` with the pointer at `pointer`
    pub fn begin_resize(&mut self, id: &str, handle: ResizeHandle, pointer: Point) -> bool {
        if self.gesture.is_some() || !self.bounds.is_ready() || !self.bring_to_front(id) {
            return false;
        }
        let layout = &self.config.layout;
        let base = base_size(self.items.len(), self.bounds, layout);
        let limits = size_limits(self.bounds, &base, layout);
        let Some(item) = self.item(id) else {
            return false;
        };
        self.gesture = Some(Gesture::Resize(ResizeSession::begin(
            item, handle, pointer, base, limits,
        )));
        trace!(id, %handle, "resize started");
        true
    }

    /// Feed a pointer move to the active gesture.
    ///
    /// Returns `true` if the layout was recomputed. A gesture whose item has
    /// disappeared is left in place until pointer-up or cancel.
    pub fn pointer_move(&mut self, pointer: Point) -> bool {
        let Some(gesture) = &self.gesture else {
            return false;
        };
        if !self.bounds.is_ready() || self.item(gesture.item_id()).is_none() {
            return false;
        }
        let layout = &self.config.layout;
        let next = match gesture {
            Gesture::Drag(session) => drag_to(&self.items, self.bounds, session, pointer, layout),
            Gesture::Resize(session) => {
                resize_to(&self.items, self.bounds, session, pointer, layout)
            }
        };
        self.replace(next);
        true
    }

    /// End the active gesture, keeping its last geometry
    pub fn pointer_up(&mut self) -> bool {
        let ended = self.gesture.take().is_some();
        if ended {
            self.dirty = true;
        }
        ended
    }

    /// Abandon the active gesture. Geometry already applied stays.
    pub fn pointer_cancel(&mut self) -> bool {
        self.pointer_up()
    }

    /// React to a container resize.
    ///
    /// Sizes rescale with the new base size and positions follow the stored
    /// relative centers. Bounds that are not ready leave an already laid
    /// out board untouched until real bounds arrive.
    pub fn set_bounds(&mut self, bounds: Bounds) {
        if bounds == self.bounds {
            return;
        }
        debug!(width = bounds.width, height = bounds.height, "container resized");
        self.bounds = bounds;
        self.relayout();
    }

    /// Replace the configured widget list, keeping the layout of surviving ids
    pub fn set_widgets(&mut self, widgets: Vec<WidgetSpec>) {
        self.widgets = widgets;
        self.widgets_changed = true;
        self.relayout();
    }

    /// The persisted form of the current layout
    pub fn record(&self, saved_at: u64) -> LayoutRecord {
        LayoutRecord::from_items(&self.items, saved_at)
    }

    /// Whether there are changes not yet handed to a writer
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Hand the current layout to `writer` if it changed since the last sync.
    ///
    /// Returns `true` if a write was queued.
    pub fn sync_to<S: LayoutStore>(
        &mut self,
        writer: &mut DebouncedWriter<S>,
        saved_at: u64,
        now: Instant,
    ) -> bool {
        if !self.dirty || !self.laid_out {
            return false;
        }
        match self.record(saved_at).to_json() {
            Ok(text) => {
                writer.submit(text, now);
                self.dirty = false;
                true
            }
            Err(err) => {
                warn!(error = %err, "failed to encode layout");
                false
            }
        }
    }

    /// Re-run the builder against the current layout.
    ///
    /// An active resize ends here: its captured base size and limits no
    /// longer describe the new layout.
    fn relayout(&mut self) {
        if self.laid_out && !self.bounds.is_ready() {
            trace!("container not ready, keeping the current layout");
            return;
        }
        let record = if self.laid_out {
            Some(self.record(0))
        } else {
            self.initial.clone()
        };
        let next = build_layout(
            &self.widgets,
            record.as_ref(),
            self.bounds,
            &self.config.layout,
            &mut self.rng,
        );
        if self.bounds.is_ready() {
            self.laid_out = true;
            self.initial = None;
        }
        self.replace(next);

        if matches!(self.gesture, Some(Gesture::Resize(_))) {
            debug!("layout changed under an active resize, ending it");
            self.gesture = None;
            self.dirty = true;
        }
        if std::mem::take(&mut self.widgets_changed) {
            self.dirty = true;
        }
    }

    fn replace(&mut self, next: Vec<Item>) {
        self.items = Arc::from(next);
    }
}
