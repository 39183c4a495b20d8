//! Inkboard Core Library
//!
//! Editing engine for the Inkboard diagram editor: entities, tools,
//! selection, text editing and the pan/zoom viewport. Rendering is left to a
//! backend, which feeds [`EditorEvent`]s into a [`Canvas`] and drains
//! [`RenderRequest`]s from it.

pub mod camera;
pub mod canvas;
pub mod config;
pub mod error;
pub mod input;
pub mod selection;
pub mod shapes;
pub mod smoothing;
pub mod text_edit;
pub mod tools;
pub mod widget;

pub use camera::{Viewport, ZoomDirection};
pub use canvas::{Canvas, CanvasDocument};
pub use config::{EditorConfig, SmoothingConfig};
pub use error::{EditorError, EditorResult};
pub use input::{EditorEvent, RenderRequest};
pub use selection::TransformCommit;
pub use shapes::{EntityId, Shape, Stroke, StrokeKind, TextMeasure};
pub use text_edit::{OverlayGeometry, TextKey};
pub use tools::ToolKind;
pub use widget::{Handle, HandleKind, WidgetState};
