//! In-place text editing overlay.
//!
//! Text is typed into an editable surface the backend places over the
//! canvas. The overlay moves through `Closed -> Editing -> Committing ->
//! Closed`; a commit produces an [`OverlayOutcome`] that the canvas applies
//! to the document before calling [`TextEditSession::finish`].

use crate::camera::Viewport;
use crate::shapes::{EntityId, Text, TextMeasure, to_local};
use kurbo::{Point, Rect, Size};
use serde::{Deserialize, Serialize};

/// Keyboard key delivered to the overlay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextKey {
    Character(String),
    Backspace,
    Enter,
    Escape,
}

/// Result of handling a key in the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEditResult {
    /// Key was handled, text may have changed.
    Handled,
    /// User asked to keep the edit.
    Commit,
    /// User asked to discard the edit.
    Cancel,
}

/// Where an overlay came from.
#[derive(Debug, Clone, PartialEq)]
pub enum OverlayOrigin {
    /// Opened by the text tool. No entity exists yet.
    NewText { anchor: Point },
    /// Opened on an existing text shape, which stays hidden while editing.
    Existing { id: EntityId, original: Text },
}

/// Screen-space placement of the editable surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OverlayGeometry {
    /// Top-left corner on screen.
    pub screen_position: Point,
    pub width: f64,
    pub height: f64,
    /// Font size on screen.
    pub font_size: f64,
    /// Rotation in degrees.
    pub rotation: f64,
}

impl OverlayGeometry {
    /// Check if a screen point lands on the surface, which is turned by
    /// `rotation` around its top-left corner.
    pub fn contains(&self, screen_point: Point) -> bool {
        let local = to_local(screen_point, self.screen_position, self.rotation);
        Rect::from_origin_size(Point::ZERO, Size::new(self.width, self.height)).contains(local.to_point())
    }
}

/// An open overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct TextOverlay {
    origin: OverlayOrigin,
    buffer: String,
    /// World-space top-left corner.
    position: Point,
    font_size: f64,
    rotation: f64,
}

impl TextOverlay {
    /// Empty overlay for the text tool.
    pub fn new_text(anchor: Point, font_size: f64) -> Self {
        Self {
            origin: OverlayOrigin::NewText { anchor },
            buffer: String::new(),
            position: anchor,
            font_size,
            rotation: 0.0,
        }
    }

    /// Overlay pre-filled with an existing shape's text.
    pub fn editing(text: &Text) -> Self {
        Self {
            origin: OverlayOrigin::Existing {
                id: text.id,
                original: text.clone(),
            },
            buffer: text.content.clone(),
            position: text.position,
            font_size: text.font_size,
            rotation: text.rotation,
        }
    }

    pub fn origin(&self) -> &OverlayOrigin {
        &self.origin
    }

    /// The entity being edited, if any.
    pub fn target(&self) -> Option<EntityId> {
        match &self.origin {
            OverlayOrigin::Existing { id, .. } => Some(*id),
            OverlayOrigin::NewText { .. } => None,
        }
    }

    /// Whether this is a text-tool overlay nothing has been typed into.
    pub fn is_blank_new_text(&self) -> bool {
        matches!(self.origin, OverlayOrigin::NewText { .. }) && self.buffer.is_empty()
    }

    /// Get the current text.
    pub fn text(&self) -> &str {
        &self.buffer
    }

    /// Replace the text with the editable surface's value.
    pub fn set_text(&mut self, text: String) {
        self.buffer = text;
    }

    /// Handle a key press.
    pub fn handle_key(&mut self, key: &TextKey) -> TextEditResult {
        match key {
            TextKey::Character(c) => {
                self.buffer.push_str(c);
                TextEditResult::Handled
            }
            TextKey::Backspace => {
                self.buffer.pop();
                TextEditResult::Handled
            }
            TextKey::Enter => TextEditResult::Commit,
            TextKey::Escape => TextEditResult::Cancel,
        }
    }

    /// Place the surface over the text's current screen location, sized to
    /// fit the text plus one spare line. Empty text still gets one em of
    /// width.
    pub fn sync_geometry(&self, viewport: &Viewport, measure: &dyn TextMeasure) -> OverlayGeometry {
        let size = measure.measure(&self.buffer, self.font_size);
        let scale = viewport.scale;
        OverlayGeometry {
            screen_position: viewport.to_screen(self.position),
            width: size.width.max(self.font_size) * scale,
            height: (size.height + self.font_size) * scale,
            font_size: self.font_size * scale,
            rotation: self.rotation,
        }
    }

    fn into_outcome(self, keep: bool) -> OverlayOutcome {
        match (self.origin, keep) {
            (OverlayOrigin::NewText { anchor }, true) => OverlayOutcome::Create(
                Text::new(anchor, self.buffer).with_font_size(self.font_size),
            ),
            (OverlayOrigin::NewText { .. }, false) => OverlayOutcome::Cancelled { restore: None },
            (OverlayOrigin::Existing { mut original, .. }, true) => {
                original.content = self.buffer;
                OverlayOutcome::Update(original)
            }
            (OverlayOrigin::Existing { id, .. }, false) => {
                OverlayOutcome::Cancelled { restore: Some(id) }
            }
        }
    }
}

/// What closing an overlay does to the document.
#[derive(Debug, Clone, PartialEq)]
pub enum OverlayOutcome {
    /// Add a new text shape.
    Create(Text),
    /// Replace an existing text shape (same id) and show it again.
    Update(Text),
    /// Nothing changes; show the hidden shape again if there was one.
    Cancelled { restore: Option<EntityId> },
}

/// Overlay lifecycle.
#[derive(Debug, Clone, PartialEq, Default)]
enum OverlayState {
    #[default]
    Closed,
    Editing(TextOverlay),
    /// The outcome has been handed out; waiting for [`TextEditSession::finish`].
    Committing,
}

/// Owns the single overlay a canvas may have open.
#[derive(Debug, Clone, Default)]
pub struct TextEditSession {
    state: OverlayState,
}

impl TextEditSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn overlay(&self) -> Option<&TextOverlay> {
        match &self.state {
            OverlayState::Editing(overlay) => Some(overlay),
            _ => None,
        }
    }

    pub fn overlay_mut(&mut self) -> Option<&mut TextOverlay> {
        match &mut self.state {
            OverlayState::Editing(overlay) => Some(overlay),
            _ => None,
        }
    }

    /// Open an overlay. Returns false (and drops `overlay`) unless the
    /// session is closed; callers commit the previous one first.
    pub fn open(&mut self, overlay: TextOverlay) -> bool {
        if !matches!(self.state, OverlayState::Closed) {
            return false;
        }
        self.state = OverlayState::Editing(overlay);
        true
    }

    /// Keep the edit. Moves to `Committing` and returns the outcome, or
    /// `None` when no overlay is being edited.
    pub fn commit(&mut self) -> Option<OverlayOutcome> {
        self.close(true)
    }

    /// Discard the edit. Moves to `Committing` and returns the outcome.
    pub fn cancel(&mut self) -> Option<OverlayOutcome> {
        self.close(false)
    }

    fn close(&mut self, keep: bool) -> Option<OverlayOutcome> {
        match std::mem::replace(&mut self.state, OverlayState::Committing) {
            OverlayState::Editing(overlay) => Some(overlay.into_outcome(keep)),
            other => {
                self.state = other;
                None
            }
        }
    }

    /// Complete a commit or cancel. Returns true if the session was
    /// committing.
    pub fn finish(&mut self) -> bool {
        if matches!(self.state, OverlayState::Committing) {
            self.state = OverlayState::Closed;
            true
        } else {
            false
        }
    }
}
