//! Widget manager for tracking UI state of shapes.

use super::handles::{Handle, shape_handles};
use super::state::WidgetState;
use crate::shapes::{EntityId, Shape, TextMeasure};

/// Tracks the single selected shape and the shape hidden behind the text
/// overlay.
///
/// This separates UI concerns from the pure shape data.
#[derive(Debug, Clone, Default)]
pub struct WidgetManager {
    /// Currently selected shape.
    selected: Option<EntityId>,
    /// Shape being edited through the overlay (not painted).
    editing: Option<EntityId>,
}

impl WidgetManager {
    /// Create a new widget manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the state of a shape.
    pub fn state(&self, id: EntityId) -> WidgetState {
        if self.editing == Some(id) {
            WidgetState::Editing
        } else if self.selected == Some(id) {
            WidgetState::Selected
        } else {
            WidgetState::Normal
        }
    }

    /// Get the selected shape ID (if any).
    pub fn selected(&self) -> Option<EntityId> {
        self.selected
    }

    /// Check if a shape is selected.
    pub fn is_selected(&self, id: EntityId) -> bool {
        self.selected == Some(id)
    }

    /// Select a single shape. Returns the previously selected one.
    pub fn select(&mut self, id: EntityId) -> Option<EntityId> {
        self.selected.replace(id)
    }

    /// Clear the selection. Returns the shape that was selected.
    pub fn clear_selection(&mut self) -> Option<EntityId> {
        self.selected.take()
    }

    /// Hide a shape while the overlay edits it.
    pub fn enter_editing(&mut self, id: EntityId) {
        self.editing = Some(id);
    }

    /// Show the edited shape again. Returns it.
    pub fn exit_editing(&mut self) -> Option<EntityId> {
        self.editing.take()
    }

    /// Check if the backend should paint a shape.
    pub fn is_visible(&self, id: EntityId) -> bool {
        self.state(id).is_visible()
    }

    /// Forget a deleted shape. Returns the state it had.
    pub fn remove(&mut self, id: EntityId) -> WidgetState {
        let state = self.state(id);
        if self.selected == Some(id) {
            self.selected = None;
        }
        if self.editing == Some(id) {
            self.editing = None;
        }
        state
    }

    /// Handles to draw for a shape: none unless it is selected and visible.
    pub fn get_handles(&self, shape: &Shape, measure: &dyn TextMeasure) -> Vec<Handle> {
        if self.state(shape.id()) != WidgetState::Selected {
            return vec![];
        }
        shape_handles(shape, measure)
    }
}
