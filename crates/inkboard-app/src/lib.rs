//! Inkboard replay shell.
//!
//! Drives a [`Canvas`] from a JSON script instead of a live rendering
//! backend. Scripts refer to entities by their index in paint order, since
//! ids are only known once the entities exist.

use inkboard_core::shapes::{EntityRef, ShapeStyle};
use inkboard_core::{
    Canvas, EditorConfig, EditorError, EditorEvent, EntityId, RenderRequest, Shape, TextKey,
    ToolKind, TransformCommit,
};
use kurbo::{Point, Vec2};
use peniko::Color;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Replay errors.
#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Script parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Config error: {0}")]
    Config(#[from] EditorError),
    #[error("Step {step}: no entity at index {index}")]
    NoSuchEntity { step: usize, index: usize },
}

/// One scripted input.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScriptStep {
    Tool { tool: ToolKind },
    Down { x: f64, y: f64 },
    Move { x: f64, y: f64 },
    Up,
    Wheel { x: f64, y: f64, delta_y: f64 },
    Pan { dx: f64, dy: f64 },
    Select { entity: usize },
    /// A finished drag of a shape.
    Drag { entity: usize, x: f64, y: f64 },
    Transform {
        entity: usize,
        scale_x: f64,
        scale_y: f64,
        #[serde(default)]
        rotation: f64,
        x: f64,
        y: f64,
    },
    Edit { entity: usize },
    Key { key: TextKey },
    Input { text: String },
    Blur,
}

impl ScriptStep {
    /// Turn the step into a canvas event, resolving entity indices against
    /// the canvas as it is now.
    pub fn to_event(&self, step: usize, canvas: &Canvas) -> Result<EditorEvent, ReplayError> {
        let resolve = |index: usize| -> Result<EntityId, ReplayError> {
            canvas
                .document
                .entities_ordered()
                .nth(index)
                .map(|entity| entity.id())
                .ok_or(ReplayError::NoSuchEntity { step, index })
        };

        let event = match self {
            ScriptStep::Tool { tool } => EditorEvent::SetTool { tool: *tool },
            ScriptStep::Down { x, y } => EditorEvent::PointerDown {
                position: Point::new(*x, *y),
            },
            ScriptStep::Move { x, y } => EditorEvent::PointerMove {
                position: Point::new(*x, *y),
            },
            ScriptStep::Up => EditorEvent::PointerUp,
            ScriptStep::Wheel { x, y, delta_y } => EditorEvent::Wheel {
                position: Point::new(*x, *y),
                delta_y: *delta_y,
            },
            ScriptStep::Pan { dx, dy } => EditorEvent::Pan {
                delta: Vec2::new(*dx, *dy),
            },
            ScriptStep::Select { entity } => EditorEvent::Select {
                id: resolve(*entity)?,
            },
            ScriptStep::Drag { entity, x, y } => EditorEvent::MoveCommit {
                id: resolve(*entity)?,
                position: Point::new(*x, *y),
            },
            ScriptStep::Transform {
                entity,
                scale_x,
                scale_y,
                rotation,
                x,
                y,
            } => EditorEvent::TransformCommit {
                id: resolve(*entity)?,
                commit: TransformCommit {
                    scale_x: *scale_x,
                    scale_y: *scale_y,
                    rotation: *rotation,
                    position: Point::new(*x, *y),
                },
            },
            ScriptStep::Edit { entity } => EditorEvent::DoubleActivate {
                id: resolve(*entity)?,
            },
            ScriptStep::Key { key } => EditorEvent::KeyDown { key: key.clone() },
            ScriptStep::Input { text } => EditorEvent::OverlayInput { text: text.clone() },
            ScriptStep::Blur => EditorEvent::Blur,
        };
        Ok(event)
    }
}

/// Parse a script: a JSON array of steps.
pub fn parse_script(json: &str) -> Result<Vec<ScriptStep>, ReplayError> {
    Ok(serde_json::from_str(json)?)
}

/// Feed every step to `canvas`, returning the render requests it produced.
pub fn replay(canvas: &mut Canvas, steps: &[ScriptStep]) -> Result<Vec<RenderRequest>, ReplayError> {
    let mut requests = Vec::new();
    for (i, step) in steps.iter().enumerate() {
        let event = step.to_event(i, canvas)?;
        canvas.handle_event(event);
        for request in canvas.take_requests() {
            log::debug!("step {}: {:?}", i, request);
            requests.push(request);
        }
    }
    log::info!("Replayed {} steps, {} render requests", steps.len(), requests.len());
    Ok(requests)
}

fn hex(color: Color) -> String {
    let c = color.to_rgba8();
    format!("#{:02x}{:02x}{:02x}", c.r, c.g, c.b)
}

/// Paint a renderer would use for a style, e.g. `stroke #000000 w2.0`.
fn paint(style: &ShapeStyle) -> String {
    let mut parts = Vec::new();
    let stroke = style.stroke();
    if stroke.to_rgba8().a > 0 && style.stroke_width > 0.0 {
        parts.push(format!("stroke {} w{:.1}", hex(stroke), style.stroke_width));
    }
    if let Some(fill) = style.fill() {
        parts.push(format!("fill {}", hex(fill)));
    }
    parts.join(" ")
}

/// One line per entity, in paint order, with its paint.
pub fn summarize(canvas: &Canvas) -> Vec<String> {
    canvas
        .document
        .entities_ordered()
        .enumerate()
        .map(|(i, entity)| {
            let style = match entity {
                EntityRef::Stroke(stroke) => &stroke.style,
                EntityRef::Shape(shape) => shape.style(),
            };
            format!("{}, {}", describe(i, entity), paint(style))
        })
        .collect()
}

fn describe(i: usize, entity: EntityRef<'_>) -> String {
    match entity {
        EntityRef::Stroke(stroke) => {
            format!("{i}: {:?} stroke, {} points", stroke.kind, stroke.len())
        }
        EntityRef::Shape(Shape::Square(s)) => format!(
            "{i}: square at ({:.1}, {:.1}) {:.1}x{:.1}",
            s.position.x, s.position.y, s.width, s.height
        ),
        EntityRef::Shape(Shape::Circle(c)) => format!(
            "{i}: circle at ({:.1}, {:.1}) r={:.1}",
            c.center.x, c.center.y, c.radius
        ),
        EntityRef::Shape(Shape::Text(t)) => format!(
            "{i}: text at ({:.1}, {:.1}) size {:.1} {:?}",
            t.position.x, t.position.y, t.font_size, t.content
        ),
    }
}

/// Load a script and an optional config from disk, replay it on a fresh
/// canvas and summarize the result.
pub fn run_files(script_path: &Path, config_path: Option<&Path>) -> Result<Vec<String>, ReplayError> {
    let config = match config_path {
        Some(path) => EditorConfig::from_json(&std::fs::read_to_string(path)?)?,
        None => EditorConfig::default(),
    };
    let steps = parse_script(&std::fs::read_to_string(script_path)?)?;
    log::info!("Loaded {} steps from {}", steps.len(), script_path.display());

    let mut canvas = Canvas::with_config(config);
    replay(&mut canvas, &steps)?;

    let mut lines = summarize(&canvas);
    lines.push(format!("zoom {}%", canvas.viewport.zoom_percent()));
    Ok(lines)
}
