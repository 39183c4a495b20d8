//! Tool system for the editor.

use crate::shapes::{EntityId, StrokeKind};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ToolKind {
    /// Select shapes and drag the canvas.
    #[default]
    Select,
    Pan,
    Square,
    Circle,
    Line,
    Arrow,
    Pen,
    Text,
    Eraser,
}

impl ToolKind {
    /// Whether a selection may exist while this tool is active.
    pub fn allows_selection(self) -> bool {
        !matches!(self, ToolKind::Pan | ToolKind::Eraser)
    }

    /// Whether pointer-down starts a drawing session.
    pub fn is_drawing(self) -> bool {
        matches!(
            self,
            ToolKind::Square | ToolKind::Circle | ToolKind::Line | ToolKind::Arrow | ToolKind::Pen
        )
    }

    /// The stroke this tool draws, if it draws one.
    pub fn stroke_kind(self) -> Option<StrokeKind> {
        match self {
            ToolKind::Pen => Some(StrokeKind::Pen),
            ToolKind::Line => Some(StrokeKind::StraightLine),
            ToolKind::Arrow => Some(StrokeKind::Arrow),
            _ => None,
        }
    }

    /// Whether the backend should let the user drag the canvas itself.
    pub fn canvas_draggable(self) -> bool {
        matches!(self, ToolKind::Select | ToolKind::Pan)
    }

    /// Display name, as used in logs.
    pub fn name(self) -> &'static str {
        match self {
            ToolKind::Select => "select",
            ToolKind::Pan => "pan",
            ToolKind::Square => "square",
            ToolKind::Circle => "circle",
            ToolKind::Line => "line",
            ToolKind::Arrow => "arrow",
            ToolKind::Pen => "pen",
            ToolKind::Text => "text",
            ToolKind::Eraser => "eraser",
        }
    }
}

/// An in-progress drawing gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawingSession {
    /// The entity being drawn.
    pub entity: EntityId,
    /// World-space point where the gesture started.
    pub anchor: Point,
    /// Tool that started the gesture.
    pub tool: ToolKind,
}

/// State of a tool interaction.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ToolState {
    /// Tool is idle, waiting for interaction.
    #[default]
    Idle,
    /// A gesture is drawing an entity.
    Drawing(DrawingSession),
}

/// Manages the current tool and its state.
#[derive(Debug, Clone, Default)]
pub struct ToolManager {
    /// Currently selected tool.
    pub current_tool: ToolKind,
    /// Current state of the tool.
    pub state: ToolState,
}

impl ToolManager {
    /// Create a new tool manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Switch tools. Returns the session that was in progress, which the
    /// caller must finish.
    pub fn set_tool(&mut self, tool: ToolKind) -> Option<DrawingSession> {
        self.current_tool = tool;
        self.end()
    }

    /// Begin drawing `entity` from `anchor` with the current tool.
    pub fn begin(&mut self, entity: EntityId, anchor: Point) {
        self.state = ToolState::Drawing(DrawingSession {
            entity,
            anchor,
            tool: self.current_tool,
        });
    }

    /// End the current gesture, returning its session if one was active.
    pub fn end(&mut self) -> Option<DrawingSession> {
        match std::mem::take(&mut self.state) {
            ToolState::Drawing(session) => Some(session),
            ToolState::Idle => None,
        }
    }

    /// The active session, if any.
    pub fn session(&self) -> Option<&DrawingSession> {
        match &self.state {
            ToolState::Drawing(session) => Some(session),
            ToolState::Idle => None,
        }
    }

    /// Check if a gesture is in progress.
    pub fn is_active(&self) -> bool {
        matches!(self.state, ToolState::Drawing(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_tool_manager_default() {
        let manager = ToolManager::new();
        assert_eq!(manager.current_tool, ToolKind::Select);
        assert!(!manager.is_active());
    }

    #[test]
    fn test_session_lifecycle() {
        let mut manager = ToolManager::new();
        manager.current_tool = ToolKind::Pen;
        let id = Uuid::new_v4();
        manager.begin(id, Point::new(1.0, 2.0));
        assert!(manager.is_active());
        assert_eq!(manager.session().map(|s| s.tool), Some(ToolKind::Pen));

        let session = manager.end();
        assert_eq!(session.map(|s| s.entity), Some(id));
        assert!(!manager.is_active());
        assert!(manager.end().is_none());
    }

    #[test]
    fn test_set_tool_returns_open_session() {
        let mut manager = ToolManager::new();
        manager.current_tool = ToolKind::Square;
        manager.begin(Uuid::new_v4(), Point::ZERO);
        let session = manager.set_tool(ToolKind::Pen);
        assert_eq!(session.map(|s| s.tool), Some(ToolKind::Square));
        assert_eq!(manager.current_tool, ToolKind::Pen);
        assert!(manager.set_tool(ToolKind::Line).is_none());
    }

    #[test]
    fn test_tool_categories() {
        assert!(!ToolKind::Pan.allows_selection());
        assert!(!ToolKind::Eraser.allows_selection());
        assert!(ToolKind::Pen.allows_selection());
        assert!(ToolKind::Select.canvas_draggable());
        assert!(!ToolKind::Square.canvas_draggable());
        assert!(!ToolKind::Text.is_drawing());
        assert_eq!(ToolKind::Arrow.stroke_kind(), Some(StrokeKind::Arrow));
        assert_eq!(ToolKind::Circle.stroke_kind(), None);
    }

    #[test]
    fn test_tool_serde_names() {
        let json = serde_json::to_string(&ToolKind::Eraser).unwrap();
        assert_eq!(json, "\"eraser\"");
        let tool: ToolKind = serde_json::from_str("\"pen\"").unwrap();
        assert_eq!(tool, ToolKind::Pen);
    }
}
