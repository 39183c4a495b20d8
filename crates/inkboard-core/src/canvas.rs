//! Canvas document and editing session.

use crate::camera::{Viewport, ZoomDirection};
use crate::config::{EditorConfig, SmoothingConfig};
use crate::error::{EditorError, EditorResult};
use crate::input::{EditorEvent, RenderRequest};
use crate::selection::{self, TransformCommit};
use crate::shapes::{
    ApproximateTextMeasure, Circle, Entity, EntityId, EntityRef, Shape, ShapeStyle, ShapeTrait,
    Square, Stroke, StrokeKind, TextMeasure,
};
use crate::text_edit::{OverlayOutcome, TextEditResult, TextEditSession, TextKey, TextOverlay};
use crate::tools::{DrawingSession, ToolKind, ToolManager};
use crate::widget::{WidgetManager, WidgetState};
use kurbo::{Point, Rect, Vec2};
use std::collections::HashMap;
use uuid::Uuid;

/// All strokes and shapes on the canvas, with their paint order.
#[derive(Debug, Clone, Default)]
pub struct CanvasDocument {
    strokes: HashMap<EntityId, Stroke>,
    shapes: HashMap<EntityId, Shape>,
    /// Paint order (back to front). Creation order; never rearranged.
    z_order: Vec<EntityId>,
}

impl CanvasDocument {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a stroke at `point`.
    pub fn create_stroke(&mut self, kind: StrokeKind, point: Point, style: ShapeStyle) -> EntityId {
        let mut stroke = Stroke::new(kind, point);
        stroke.style = style;
        let id = stroke.id;
        self.strokes.insert(id, stroke);
        self.z_order.push(id);
        id
    }

    /// Append a raw pen sample.
    pub fn append_stroke_point(&mut self, id: EntityId, point: Point) -> EditorResult<()> {
        self.stroke_mut(id)?.add_point(point);
        Ok(())
    }

    /// Move the second endpoint of a line or arrow.
    pub fn set_stroke_endpoint(&mut self, id: EntityId, point: Point) -> EditorResult<()> {
        self.stroke_mut(id)?.set_endpoint(point);
        Ok(())
    }

    /// Smooth a finished pen stroke. Other strokes are left unchanged.
    pub fn finalize_stroke(&mut self, id: EntityId, smoothing: &SmoothingConfig) -> EditorResult<()> {
        self.stroke_mut(id)?.finalize(smoothing);
        Ok(())
    }

    /// Add a shape on top of everything else. A shape whose id is already
    /// taken gets a fresh one.
    pub fn create_shape(&mut self, mut shape: Shape) -> EntityId {
        if self.contains(shape.id()) {
            shape.set_id(Uuid::new_v4());
        }
        let id = shape.id();
        self.shapes.insert(id, shape);
        self.z_order.push(id);
        id
    }

    /// Replace a shape wholesale. The stored id and paint position are kept.
    pub fn update_shape(&mut self, id: EntityId, mut shape: Shape) -> EditorResult<()> {
        if self.strokes.contains_key(&id) {
            return Err(EditorError::NotAShape(id));
        }
        let slot = self.shapes.get_mut(&id).ok_or(EditorError::EntityNotFound(id))?;
        shape.set_id(id);
        *slot = shape;
        Ok(())
    }

    /// Remove a stroke or shape.
    pub fn remove_entity(&mut self, id: EntityId) -> Option<Entity> {
        let entity = match self.strokes.remove(&id) {
            Some(stroke) => Entity::Stroke(stroke),
            None => Entity::Shape(self.shapes.remove(&id)?),
        };
        self.z_order.retain(|&zid| zid != id);
        Some(entity)
    }

    /// The topmost entity under a world-space point.
    pub fn entity_at(&self, point: Point, tolerance: f64, measure: &dyn TextMeasure) -> Option<EntityId> {
        self.entities_ordered()
            .rev()
            .find(|entity| entity.hit_test(point, tolerance, measure))
            .map(|entity| entity.id())
    }

    /// Get a stroke by ID.
    pub fn get_stroke(&self, id: EntityId) -> Option<&Stroke> {
        self.strokes.get(&id)
    }

    /// Get a shape by ID.
    pub fn get_shape(&self, id: EntityId) -> Option<&Shape> {
        self.shapes.get(&id)
    }

    /// Get a mutable shape by ID.
    pub fn get_shape_mut(&mut self, id: EntityId) -> Option<&mut Shape> {
        self.shapes.get_mut(&id)
    }

    fn stroke_mut(&mut self, id: EntityId) -> EditorResult<&mut Stroke> {
        self.strokes.get_mut(&id).ok_or(EditorError::EntityNotFound(id))
    }

    /// Strokes in paint order.
    pub fn strokes(&self) -> impl Iterator<Item = &Stroke> {
        self.z_order.iter().filter_map(|id| self.strokes.get(id))
    }

    /// Shapes in paint order.
    pub fn shapes(&self) -> impl Iterator<Item = &Shape> {
        self.z_order.iter().filter_map(|id| self.shapes.get(id))
    }

    /// Every entity in paint order (back to front).
    pub fn entities_ordered(&self) -> impl DoubleEndedIterator<Item = EntityRef<'_>> {
        self.z_order.iter().filter_map(|id| {
            self.strokes
                .get(id)
                .map(EntityRef::Stroke)
                .or_else(|| self.shapes.get(id).map(EntityRef::Shape))
        })
    }

    /// Check if an id belongs to this document.
    pub fn contains(&self, id: EntityId) -> bool {
        self.strokes.contains_key(&id) || self.shapes.contains_key(&id)
    }

    /// Check if the document is empty.
    pub fn is_empty(&self) -> bool {
        self.z_order.is_empty()
    }

    /// Get the number of entities.
    pub fn len(&self) -> usize {
        self.z_order.len()
    }
}

/// An editing session: the document plus everything needed to turn backend
/// events into document changes and render requests.
#[derive(Debug)]
pub struct Canvas {
    /// The document being edited.
    pub document: CanvasDocument,
    /// Pan/zoom state.
    pub viewport: Viewport,
    tool_manager: ToolManager,
    widgets: WidgetManager,
    text_edit: TextEditSession,
    config: EditorConfig,
    measure: Box<dyn TextMeasure>,
    requests: Vec<RenderRequest>,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new()
    }
}

impl Canvas {
    /// Create a new canvas with the default configuration.
    pub fn new() -> Self {
        Self::with_config(EditorConfig::default())
    }

    /// Create a canvas using `config`.
    pub fn with_config(config: EditorConfig) -> Self {
        Self {
            document: CanvasDocument::new(),
            viewport: Viewport::with_bounds(config.min_scale, config.max_scale),
            tool_manager: ToolManager::new(),
            widgets: WidgetManager::new(),
            text_edit: TextEditSession::new(),
            config,
            measure: Box::new(ApproximateTextMeasure::default()),
            requests: Vec::new(),
        }
    }

    /// Use the backend's text metrics.
    pub fn with_text_measure(mut self, measure: impl TextMeasure + 'static) -> Self {
        self.measure = Box::new(measure);
        self
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn text_measure(&self) -> &dyn TextMeasure {
        self.measure.as_ref()
    }

    pub fn current_tool(&self) -> ToolKind {
        self.tool_manager.current_tool
    }

    /// The gesture in progress, if any.
    pub fn drawing_session(&self) -> Option<&DrawingSession> {
        self.tool_manager.session()
    }

    pub fn selected(&self) -> Option<EntityId> {
        self.widgets.selected()
    }

    pub fn widget_state(&self, id: EntityId) -> WidgetState {
        self.widgets.state(id)
    }

    /// The open text overlay, if any.
    pub fn overlay(&self) -> Option<&TextOverlay> {
        self.text_edit.overlay()
    }

    /// Whether dragging empty canvas pans it under the current tool.
    pub fn canvas_draggable(&self) -> bool {
        self.tool_manager.current_tool.canvas_draggable()
    }

    /// Live resize policy for the backend's transform handles.
    pub fn constrain_resize(&self, old: Rect, new: Rect) -> Rect {
        selection::constrain_bound_box(old, new, self.config.min_size)
    }

    /// Drain the queued render requests.
    pub fn take_requests(&mut self) -> Vec<RenderRequest> {
        std::mem::take(&mut self.requests)
    }

    fn push(&mut self, request: RenderRequest) {
        if request == RenderRequest::Redraw && self.requests.last() == Some(&RenderRequest::Redraw) {
            return;
        }
        self.requests.push(request);
    }

    /// Dispatch a backend event.
    pub fn handle_event(&mut self, event: EditorEvent) {
        log::trace!("Event: {:?}", event);
        match event {
            EditorEvent::PointerDown { position } => self.pointer_down(position),
            EditorEvent::PointerMove { position } => self.pointer_move(position),
            EditorEvent::PointerUp => self.pointer_up(),
            EditorEvent::Wheel { position, delta_y } => self.wheel(position, delta_y),
            EditorEvent::Pan { delta } => self.pan(delta),
            EditorEvent::Select { id } => self.select(id),
            EditorEvent::MoveCommit { id, position } => self.move_commit(id, position),
            EditorEvent::TransformCommit { id, commit } => self.transform_commit(id, commit),
            EditorEvent::DoubleActivate { id } => self.double_activate(id),
            EditorEvent::KeyDown { key } => self.key_down(key),
            EditorEvent::OverlayInput { text } => self.overlay_input(text),
            EditorEvent::Blur => self.blur(),
            EditorEvent::SetTool { tool } => self.set_tool(tool),
        }
    }

    /// Pointer pressed at a screen position.
    pub fn pointer_down(&mut self, screen: Point) {
        if let Some(overlay) = self.text_edit.overlay() {
            let geometry = overlay.sync_geometry(&self.viewport, self.measure.as_ref());
            if geometry.contains(screen) {
                return;
            }
            self.commit_overlay();
        }

        // A lost pointer-up leaves a session behind
        if let Some(session) = self.tool_manager.end() {
            self.finish_session(session);
        }

        let world = self.viewport.to_world(screen);
        let tool = self.tool_manager.current_tool;
        match tool {
            ToolKind::Pan => {}
            ToolKind::Eraser => self.erase_at(world),
            _ if tool != ToolKind::Pen && self.widgets.selected().is_some() => self.clear_selection(),
            ToolKind::Select => {}
            ToolKind::Text => {
                let overlay = TextOverlay::new_text(world, self.config.default_font_size);
                self.open_overlay(overlay);
            }
            _ if tool.is_drawing() => self.begin_drawing(tool, world),
            _ => {}
        }
    }

    fn begin_drawing(&mut self, tool: ToolKind, world: Point) {
        let id = if let Some(kind) = tool.stroke_kind() {
            self.document.create_stroke(kind, world, ShapeStyle::default())
        } else {
            let shape = match tool {
                ToolKind::Square => {
                    let size = self.config.default_square_size;
                    Shape::Square(Square::new(world, size, size))
                }
                ToolKind::Circle => Shape::Circle(Circle::new(world, self.config.default_circle_radius)),
                _ => return,
            };
            self.document.create_shape(shape)
        };
        log::debug!("Started {} {} at ({:.1}, {:.1})", tool.name(), id, world.x, world.y);
        self.tool_manager.begin(id, world);
        self.push(RenderRequest::Redraw);
    }

    /// Pointer moved to a screen position.
    pub fn pointer_move(&mut self, screen: Point) {
        let Some(session) = self.tool_manager.session().copied() else {
            return;
        };
        let world = self.viewport.to_world(screen);
        log::trace!("Drawing {} to ({:.1}, {:.1})", session.entity, world.x, world.y);

        let result = match session.tool {
            ToolKind::Pen => self.document.append_stroke_point(session.entity, world),
            ToolKind::Line | ToolKind::Arrow => self.document.set_stroke_endpoint(session.entity, world),
            _ => self.drag_shape(&session, world),
        };
        match result {
            Ok(()) => self.push(RenderRequest::Redraw),
            Err(e) => log::warn!("Dropping pointer move: {}", e),
        }
    }

    fn drag_shape(&mut self, session: &DrawingSession, world: Point) -> EditorResult<()> {
        let shape = self
            .document
            .get_shape_mut(session.entity)
            .ok_or(EditorError::EntityNotFound(session.entity))?;
        match shape {
            Shape::Square(square) => {
                square.width = world.x - session.anchor.x;
                square.height = world.y - session.anchor.y;
            }
            Shape::Circle(circle) => {
                circle.radius = (world - session.anchor).hypot();
            }
            Shape::Text(_) => {}
        }
        Ok(())
    }

    /// Pointer released.
    pub fn pointer_up(&mut self) {
        if let Some(session) = self.tool_manager.end() {
            self.finish_session(session);
        }
    }

    fn finish_session(&mut self, session: DrawingSession) {
        if session.tool == ToolKind::Pen {
            if let Err(e) = self.document.finalize_stroke(session.entity, &self.config.smoothing) {
                log::warn!("Cannot finalize stroke: {}", e);
                return;
            }
        }
        log::debug!("Finished {} {}", session.tool.name(), session.entity);
        self.push(RenderRequest::Redraw);
    }

    /// Mouse wheel at a screen position.
    pub fn wheel(&mut self, screen: Point, delta_y: f64) {
        let Some(direction) = ZoomDirection::from_scroll(delta_y) else {
            return;
        };
        let before = self.viewport.scale;
        self.viewport.zoom_at(screen, direction, self.config.zoom_step);
        if (self.viewport.scale - before).abs() < f64::EPSILON {
            return;
        }
        log::trace!("Zoom {}%", self.viewport.zoom_percent());
        self.sync_overlay();
        self.push(RenderRequest::Redraw);
    }

    /// The backend dragged the canvas by `delta` screen pixels.
    pub fn pan(&mut self, delta: Vec2) {
        if !self.canvas_draggable() {
            log::debug!("Ignoring pan with {} tool", self.current_tool().name());
            return;
        }
        self.viewport.pan(delta);
        self.sync_overlay();
        self.push(RenderRequest::Redraw);
    }

    /// The backend reports a click on a shape.
    pub fn select(&mut self, id: EntityId) {
        if !self.current_tool().allows_selection() {
            log::debug!("Ignoring selection with {} tool", self.current_tool().name());
            return;
        }
        let Some(kind) = self.document.get_shape(id).map(Shape::kind_name) else {
            log::warn!("Cannot select {}: not a shape on this canvas", id);
            return;
        };
        if !self.widgets.is_visible(id) {
            log::debug!("Ignoring selection of hidden {}", id);
            return;
        }
        if self.widgets.is_selected(id) {
            return;
        }
        if let Some(previous) = self.widgets.select(id) {
            self.push(RenderRequest::DetachHandles(previous));
        }
        log::debug!("Selected {} {}", kind, id);
        self.attach_handles(id);
        self.push(RenderRequest::Redraw);
    }

    fn clear_selection(&mut self) {
        if let Some(id) = self.widgets.clear_selection() {
            log::debug!("Deselected {}", id);
            self.push(RenderRequest::DetachHandles(id));
            self.push(RenderRequest::Redraw);
        }
    }

    fn attach_handles(&mut self, id: EntityId) {
        let Some(shape) = self.document.get_shape(id) else {
            return;
        };
        let handles = self.widgets.get_handles(shape, self.measure.as_ref());
        if !handles.is_empty() {
            self.push(RenderRequest::AttachHandles { id, handles });
        }
    }

    /// A shape drag ended at `position`.
    pub fn move_commit(&mut self, id: EntityId, position: Point) {
        let Some(shape) = self.document.get_shape(id) else {
            log::warn!("Cannot move {}: not a shape on this canvas", id);
            return;
        };
        if !shape.draggable() {
            log::debug!("Ignoring move of fixed {} {}", shape.kind_name(), id);
            return;
        }
        let moved = selection::move_commit(shape, position);
        self.replace_shape(id, moved);
    }

    /// A shape resize/rotate ended.
    pub fn transform_commit(&mut self, id: EntityId, commit: TransformCommit) {
        let Some(shape) = self.document.get_shape(id) else {
            log::warn!("Cannot transform {}: not a shape on this canvas", id);
            return;
        };
        let transformed = selection::transform_commit(shape, &commit, self.config.min_size);
        self.replace_shape(id, transformed);
    }

    fn replace_shape(&mut self, id: EntityId, shape: Shape) {
        if let Err(e) = self.document.update_shape(id, shape) {
            log::warn!("Cannot update shape: {}", e);
            return;
        }
        self.attach_handles(id);
        self.push(RenderRequest::Redraw);
    }

    fn erase_at(&mut self, world: Point) {
        let Some(id) = self
            .document
            .entity_at(world, self.config.hit_tolerance, self.measure.as_ref())
        else {
            return;
        };
        if self.document.remove_entity(id).is_none() {
            return;
        }
        log::debug!("Erased {}", id);
        if self.widgets.remove(id).is_selected() {
            self.push(RenderRequest::DetachHandles(id));
        }
        self.push(RenderRequest::Redraw);
    }

    /// Double click on a shape. Text shapes open the editing overlay.
    pub fn double_activate(&mut self, id: EntityId) {
        // Close first: the open overlay may be editing this very shape. A
        // blank overlay from the click that began this double click is dropped.
        if self.text_edit.overlay().is_some_and(TextOverlay::is_blank_new_text) {
            self.cancel_overlay();
        } else {
            self.commit_overlay();
        }

        let Some(shape) = self.document.get_shape(id) else {
            log::warn!("Cannot edit {}: not a shape on this canvas", id);
            return;
        };
        let Some(text) = shape.as_text() else {
            return;
        };
        let overlay = TextOverlay::editing(text);

        let was_selected = self.widgets.is_selected(id);
        self.widgets.enter_editing(id);
        if was_selected {
            self.push(RenderRequest::DetachHandles(id));
        }
        self.push(RenderRequest::Hide(id));
        self.open_overlay(overlay);
    }

    fn open_overlay(&mut self, overlay: TextOverlay) {
        self.commit_overlay();

        let geometry = overlay.sync_geometry(&self.viewport, self.measure.as_ref());
        let text = overlay.text().to_string();
        if !self.text_edit.open(overlay) {
            log::warn!("Text overlay still closing, not opening another");
            return;
        }
        log::debug!("Opened text overlay");
        self.push(RenderRequest::OpenOverlay { geometry, text });
        self.push(RenderRequest::ListenOutsideClicks);
    }

    fn sync_overlay(&mut self) {
        if let Some(overlay) = self.text_edit.overlay() {
            let geometry = overlay.sync_geometry(&self.viewport, self.measure.as_ref());
            self.push(RenderRequest::SyncOverlay(geometry));
        }
    }

    fn commit_overlay(&mut self) {
        if let Some(outcome) = self.text_edit.commit() {
            self.close_overlay(outcome);
        }
    }

    fn cancel_overlay(&mut self) {
        if let Some(outcome) = self.text_edit.cancel() {
            self.close_overlay(outcome);
        }
    }

    fn close_overlay(&mut self, outcome: OverlayOutcome) {
        match outcome {
            OverlayOutcome::Create(text) => {
                let id = self.document.create_shape(Shape::Text(text));
                log::debug!("Created text {}", id);
            }
            OverlayOutcome::Update(text) => {
                let id = text.id();
                match self.document.update_shape(id, Shape::Text(text)) {
                    Ok(()) => log::debug!("Updated text {}", id),
                    Err(e) => log::warn!("Cannot update text: {}", e),
                }
                self.restore_edited(id);
            }
            OverlayOutcome::Cancelled { restore } => {
                log::debug!("Text edit cancelled");
                if let Some(id) = restore {
                    self.restore_edited(id);
                }
            }
        }
        self.text_edit.finish();
        self.push(RenderRequest::CloseOverlay);
        self.push(RenderRequest::StopListeningOutsideClicks);
        self.push(RenderRequest::Redraw);
    }

    fn restore_edited(&mut self, id: EntityId) {
        self.widgets.exit_editing();
        self.push(RenderRequest::Show(id));
        self.attach_handles(id);
    }

    /// Key pressed in the overlay.
    pub fn key_down(&mut self, key: TextKey) {
        let Some(overlay) = self.text_edit.overlay_mut() else {
            return;
        };
        match overlay.handle_key(&key) {
            TextEditResult::Handled => self.sync_overlay(),
            TextEditResult::Commit => self.commit_overlay(),
            TextEditResult::Cancel => self.cancel_overlay(),
        }
    }

    /// The overlay's editable surface changed its value.
    pub fn overlay_input(&mut self, text: String) {
        let Some(overlay) = self.text_edit.overlay_mut() else {
            return;
        };
        overlay.set_text(text);
        self.sync_overlay();
    }

    /// The overlay lost focus.
    pub fn blur(&mut self) {
        self.commit_overlay();
    }

    /// Switch tools.
    pub fn set_tool(&mut self, tool: ToolKind) {
        let previous = self.tool_manager.current_tool;
        if let Some(session) = self.tool_manager.set_tool(tool) {
            self.finish_session(session);
        }
        self.commit_overlay();
        if !tool.allows_selection() {
            self.clear_selection();
        }
        if previous != tool {
            log::debug!("Tool changed: {} -> {}", previous.name(), tool.name());
        }
        self.push(RenderRequest::SetCanvasDraggable(tool.canvas_draggable()));
    }
}
