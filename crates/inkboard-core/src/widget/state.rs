//! Widget state definitions.

/// The UI state of a shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WidgetState {
    /// Normal display state - no interaction.
    #[default]
    Normal,
    /// Shape is selected (shows handles, can be moved/resized).
    Selected,
    /// Shape is being edited through the text overlay and is not painted.
    Editing,
}

impl WidgetState {
    /// Check if the shape is selected (either just selected or editing).
    pub fn is_selected(&self) -> bool {
        matches!(self, Self::Selected | Self::Editing)
    }

    /// Check if the backend should paint the shape.
    pub fn is_visible(&self) -> bool {
        !matches!(self, Self::Editing)
    }
}
