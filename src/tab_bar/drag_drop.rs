//! Drag-and-drop reordering for the tab strip.
//!
//! A gesture starts on a tab's handle, hovers over other tabs (by pointer
//! position or by a gesture library reporting the tab under the pointer)
//! and commits a single `(source_id, destination_id)` pair on release.
//! The committed pair becomes one [`ReorderPlan`].

use crate::tab::{Tab, TabId, TabRegistry, array_move};

/// Horizontal extent of a rendered tab, cached per frame.
#[derive(Debug, Clone, PartialEq)]
pub struct TabRect {
    pub id: TabId,
    pub left: f32,
    pub right: f32,
}

impl TabRect {
    pub fn center(&self) -> f32 {
        (self.left + self.right) / 2.0
    }
}

/// Index at which a tab dropped at `pointer_x` would be inserted.
///
/// The first tab whose center lies right of the pointer marks the slot;
/// past the last center the slot is after the last tab.
pub fn insertion_index(pointer_x: f32, rects: &[TabRect]) -> usize {
    rects
        .iter()
        .position(|rect| pointer_x < rect.center())
        .unwrap_or(rects.len())
}

/// Convert an insertion slot into the final index of the moved tab.
///
/// Slots directly before or after the source are no-ops and yield `None`.
pub fn effective_target(source: usize, insert: usize) -> Option<usize> {
    if insert == source || insert == source + 1 {
        return None;
    }
    Some(if insert > source { insert - 1 } else { insert })
}

/// A committed move of one tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReorderPlan {
    pub id: TabId,
    pub from: usize,
    pub to: usize,
}

impl ReorderPlan {
    /// Plan moving `source_id` onto `destination_id`'s index.
    ///
    /// `None` when the ids are equal or either is not in `tabs`.
    pub fn between(tabs: &[Tab], source_id: &str, destination_id: &str) -> Option<Self> {
        if source_id == destination_id {
            return None;
        }
        let from = tabs.iter().position(|t| t.id == source_id)?;
        let to = tabs.iter().position(|t| t.id == destination_id)?;
        Some(Self {
            id: source_id.to_string(),
            from,
            to,
        })
    }

    /// Issue the reorder. Returns `false` if the strip changed since planning.
    pub fn apply(&self, registry: &mut TabRegistry) -> bool {
        if registry.index_of(&self.id) != Some(self.from) || self.to >= registry.len() {
            log::debug!("Stale reorder plan for tab {} dropped", self.id);
            return false;
        }
        let reordered = array_move(registry.tabs(), self.from, self.to);
        registry.reorder(reordered);
        log::debug!(
            "Reordered tab {} from index {} to {}",
            self.id,
            self.from,
            self.to
        );
        true
    }
}

/// Drag gesture in progress on the tab strip.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DragReorder {
    /// Tab being dragged
    dragging: Option<TabId>,
    /// Tab currently under the pointer
    over: Option<TabId>,
}

impl DragReorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start dragging `id`
    pub fn begin(&mut self, id: impl Into<TabId>) {
        let id = id.into();
        self.over = Some(id.clone());
        self.dragging = Some(id);
    }

    /// Check if a drag operation is in progress
    pub fn is_dragging(&self) -> bool {
        self.dragging.is_some()
    }

    pub fn dragging(&self) -> Option<&str> {
        self.dragging.as_deref()
    }

    pub fn over(&self) -> Option<&str> {
        self.over.as_deref()
    }

    /// Gesture library reports the tab under the pointer
    pub fn hover(&mut self, over_id: impl Into<TabId>) {
        if self.dragging.is_some() {
            self.over = Some(over_id.into());
        }
    }

    /// Resolve the destination from the pointer position and the tab rects
    pub fn hover_pointer(&mut self, pointer_x: f32, rects: &[TabRect]) {
        let Some(dragging) = self.dragging.as_deref() else {
            return;
        };
        let Some(source) = rects.iter().position(|r| r.id == dragging) else {
            return;
        };
        let insert = insertion_index(pointer_x, rects);
        let target = effective_target(source, insert).unwrap_or(source);
        self.over = Some(rects[target].id.clone());
    }

    /// Abandon the gesture (Escape, pointer left the window)
    pub fn cancel(&mut self) {
        self.dragging = None;
        self.over = None;
    }

    /// Release: commit the gesture against the current strip.
    ///
    /// Returns a plan only if the drop position differs from the origin.
    pub fn end(&mut self, tabs: &[Tab]) -> Option<ReorderPlan> {
        let dragging = self.dragging.take()?;
        let over = self.over.take()?;
        ReorderPlan::between(tabs, &dragging, &over)
    }
}
