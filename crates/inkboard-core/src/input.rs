//! Events delivered by the rendering backend and requests sent back to it.

use crate::selection::TransformCommit;
use crate::shapes::EntityId;
use crate::text_edit::{OverlayGeometry, TextKey};
use crate::tools::ToolKind;
use crate::widget::Handle;
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// Input event for a [`Canvas`](crate::Canvas). Pointer positions are in
/// screen space; move and transform reports are in world space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EditorEvent {
    PointerDown {
        position: Point,
    },
    PointerMove {
        position: Point,
    },
    PointerUp,
    /// Mouse wheel; only the sign of `delta_y` matters.
    Wheel {
        position: Point,
        delta_y: f64,
    },
    /// Canvas dragged by the backend, in screen pixels.
    Pan {
        delta: Vec2,
    },
    /// The backend hit a shape's interactive surface.
    Select {
        id: EntityId,
    },
    /// A drag of a shape ended.
    MoveCommit {
        id: EntityId,
        position: Point,
    },
    /// A resize/rotate of a shape ended.
    TransformCommit {
        id: EntityId,
        #[serde(flatten)]
        commit: TransformCommit,
    },
    /// Double click or double tap on a shape.
    DoubleActivate {
        id: EntityId,
    },
    /// Key pressed while the text overlay has focus.
    KeyDown {
        key: TextKey,
    },
    /// The overlay's editable surface changed its value.
    OverlayInput {
        text: String,
    },
    /// The overlay lost focus.
    Blur,
    SetTool {
        tool: ToolKind,
    },
}

/// Work the backend must do after an event.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderRequest {
    /// Repaint the canvas from the document.
    Redraw,
    /// Paint this entity again.
    Show(EntityId),
    /// Stop painting this entity.
    Hide(EntityId),
    /// Draw resize/rotate handles around a shape.
    AttachHandles { id: EntityId, handles: Vec<Handle> },
    /// Remove the handles from a shape.
    DetachHandles(EntityId),
    /// Whether dragging empty canvas should pan it.
    SetCanvasDraggable(bool),
    /// Create the editable surface, focused, holding `text`.
    OpenOverlay { geometry: OverlayGeometry, text: String },
    /// Move/resize the editable surface.
    SyncOverlay(OverlayGeometry),
    /// Remove the editable surface.
    CloseOverlay,
    /// Start reporting pointer-downs anywhere on screen.
    ListenOutsideClicks,
    /// Stop reporting pointer-downs outside the canvas.
    StopListeningOutsideClicks,
}
