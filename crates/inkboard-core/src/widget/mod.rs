//! Selection and visibility state for shapes.
//!
//! Shapes remain pure data. The widget layer tracks which one is selected,
//! which one is hidden behind the text editing overlay, and which handles
//! the backend should draw around the selection.

mod handles;
mod manager;
mod state;

pub use handles::{Handle, HandleKind, ROTATE_HANDLE_OFFSET, shape_handles};
pub use manager::WidgetManager;
pub use state::WidgetState;
